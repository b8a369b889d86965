use httpmock::prelude::*;
use iserver_client::params::{
    FacilityAnalystSinks3DParameters, FacilityAnalystSources3DParameters,
    FacilityAnalystTracedown3DParameters, FacilityAnalystTraceup3DParameters,
    FacilityAnalystUpstream3DParameters,
};
use iserver_client::{NetworkAnalyst3DService, ServiceOptions};
use serde_json::json;

const NETWORK_PATH: &str =
    "/iserver/services/transportationanalyst-sample/rest/networkanalyst3d/RoadNet@Changchun";

fn service(server: &MockServer) -> NetworkAnalyst3DService {
    NetworkAnalyst3DService::new(&server.url(NETWORK_PATH), ServiceOptions::default()).unwrap()
}

#[tokio::test]
async fn test_sinks_facility_analyst() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/sinks.json", NETWORK_PATH))
                .query_param("edgeID", "84")
                .query_param("weightName", "length")
                .query_param("isUncertainDirectionValid", "false");
            then.status(200).json_body(json!({
                "cost": 12.5,
                "edgeIDs": [84, 85, 86],
                "nodeIDs": [40, 41]
            }));
        })
        .await;

    let params = FacilityAnalystSinks3DParameters::from_edge(84).with_weight_name("length");
    let result = service(&server).sinks_facility_analyst(&params).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.edge_ids, vec![84, 85, 86]);
    assert_eq!(result.node_ids, vec![40, 41]);
    assert_eq!(result.cost, Some(12.5));
}

#[tokio::test]
async fn test_each_analysis_hits_its_resource() {
    let server = MockServer::start_async().await;
    let mut mocks = Vec::new();
    for resource in ["sources.json", "traceup.json", "tracedown.json"] {
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("{}/{}", NETWORK_PATH, resource))
                    .query_param("nodeID", "12")
                    .query_param("isUncertainDirectionValid", "true");
                then.status(200).json_body(json!({"edgeIDs": [1], "nodeIDs": [12]}));
            })
            .await;
        mocks.push(mock);
    }

    let service = service(&server);
    service
        .sources_facility_analyst(
            &FacilityAnalystSources3DParameters::from_node(12).with_uncertain_direction_valid(true),
        )
        .await
        .unwrap();
    service
        .trace_up_facility_analyst(
            &FacilityAnalystTraceup3DParameters::from_node(12).with_uncertain_direction_valid(true),
        )
        .await
        .unwrap();
    let result = service
        .trace_down_facility_analyst(
            &FacilityAnalystTracedown3DParameters::from_node(12).with_uncertain_direction_valid(true),
        )
        .await
        .unwrap();

    for mock in &mocks {
        mock.assert_async().await;
    }
    assert_eq!(result.node_ids, vec![12]);
}

#[tokio::test]
async fn test_upstream_facility_analyst() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("{}/upstreamcirticalfaclilities.json", NETWORK_PATH))
                .query_param("sourceNodeIDs", "[1,2,3]")
                .query_param("nodeID", "20");
            then.status(200).json_body(json!({"edgeIDs": [], "nodeIDs": [2], "message": "ok"}));
        })
        .await;

    let params = FacilityAnalystUpstream3DParameters::new(vec![1, 2, 3]).with_node(20);
    let result = service(&server).upstream_facility_analyst(&params).await.unwrap();

    mock.assert_async().await;
    assert_eq!(result.node_ids, vec![2]);
    assert_eq!(result.extra.get("message"), Some(&json!("ok")));
}
