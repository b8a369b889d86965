use httpmock::prelude::*;
use iserver_client::params::{ServerColor, ServerStyle, ThemeDotDensity, ThemeParameters};
use iserver_client::{LayerInfoService, ServiceOptions, ThemeService};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio_test::assert_ok;

const MAP_PATH: &str = "/iserver/services/map-world/rest/maps/World";

#[tokio::test]
async fn test_get_theme_info_posts_temporary_layer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(format!("{}/tempLayersSet.json", MAP_PATH))
                .header("Content-Type", "application/json")
                .body_contains("\"name\":\"themeLayer\"")
                .body_contains("\"type\":\"DOTDENSITY\"")
                .body_contains("\"dotExpression\":\"Pop_1994\"")
                .body_contains("\"datasetInfo\":{\"name\":\"Countries\",\"dataSourceName\":\"World\"}");
            then.status(201).json_body(json!({
                "succeed": true,
                "newResourceID": "c01d29d8d41743adb673cd1cecda6ed0_4b8b4e5e3a8b",
                "newResourceLocation": "http://localhost:8090/iserver/services/map-world/rest/maps/World/tempLayersSet/c01d29d8.json",
                "postResultType": "CreateChild"
            }));
        })
        .await;

    let theme = ThemeDotDensity::new("Pop_1994", 5_000_000.0)
        .with_style(ServerStyle::marker(0, 2.0, ServerColor::rgb(0, 128, 255)));
    let params = ThemeParameters::new(vec![theme.into()]).with_dataset("Countries", "World");

    let service = ThemeService::new(&server.url(MAP_PATH), ServiceOptions::default()).unwrap();
    let result = assert_ok!(service.get_theme_info(&params).await);

    mock.assert_async().await;
    assert!(result.succeed);
    assert_eq!(
        result.new_resource_id.as_deref(),
        Some("c01d29d8d41743adb673cd1cecda6ed0_4b8b4e5e3a8b")
    );
    assert_eq!(result.extra.get("postResultType"), Some(&json!("CreateChild")));
}

#[tokio::test]
async fn test_get_layers_info() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path(format!("{}/layers.json", MAP_PATH));
            then.status(200).json_body(json!([{
                "name": "World",
                "type": "UGC",
                "visible": true,
                "bounds": {"left": -180, "bottom": -90, "right": 180, "top": 90},
                "subLayers": {"layers": [
                    {
                        "name": "Rivers@World",
                        "ugcLayerType": "VECTOR",
                        "visible": true,
                        "datasetInfo": {"name": "Rivers", "dataSourceName": "World", "type": "LINE"},
                        "style": {"lineWidth": 0.3, "lineColor": {"red": 0, "green": 128, "blue": 255}}
                    },
                    {"name": "Countries@World", "ugcLayerType": "THEME", "visible": false}
                ]}
            }]));
        })
        .await;

    let service = LayerInfoService::new(&server.url(MAP_PATH), ServiceOptions::default()).unwrap();
    let layers = assert_ok!(service.get_layers_info().await);

    mock.assert_async().await;
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].bounds.unwrap().width(), 360.0);

    let sub_layers = &layers[0].sub_layers.layers;
    assert_eq!(sub_layers.len(), 2);
    assert_eq!(sub_layers[0].vector_style().unwrap().line_color, ServerColor::rgb(0, 128, 255));
    assert!(sub_layers[1].vector_style().is_none());
}
