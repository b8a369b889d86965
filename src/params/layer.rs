use crate::core::request::{resource_url, ServiceRequest};
use crate::domain::model::{Bounds, UgcLayerType};
use crate::domain::ports::{to_server_value, Destroyable, ServiceOperation, ToServerJson};
use crate::domain::results::LayersInfo;
use crate::params::style::ServerStyle;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_source_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub dataset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ToServerJson for DatasetInfo {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        to_server_value(self)
    }
}

/// A sub-layer of a UGC map layer. Vector sub-layers carry their own `ServerStyle`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UgcSubLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queryable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_info: Option<DatasetInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ugc_layer_type: Option<UgcLayerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ServerStyle>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UgcSubLayer {
    pub fn vector(name: impl Into<String>, dataset: DatasetInfo, style: ServerStyle) -> Self {
        Self {
            name: Some(name.into()),
            dataset_info: Some(dataset),
            ugc_layer_type: Some(UgcLayerType::Vector),
            style: Some(style),
            ..Self::default()
        }
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn is_vector(&self) -> bool {
        self.ugc_layer_type == Some(UgcLayerType::Vector)
    }

    /// Style of a vector sub-layer; other layer kinds have none.
    pub fn vector_style(&self) -> Option<&ServerStyle> {
        if self.is_vector() {
            self.style.as_ref()
        } else {
            None
        }
    }
}

impl ToServerJson for UgcSubLayer {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        to_server_value(self)
    }
}

impl Destroyable for UgcSubLayer {
    fn destroy(&mut self) {
        *self = Self::default();
    }
}

/// Lists the layers of a map, with their sub-layers and styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetLayersInfoParameters;

impl ServiceOperation for GetLayersInfoParameters {
    type Output = LayersInfo;

    fn build_request(&self, service_url: &Url) -> Result<ServiceRequest> {
        Ok(ServiceRequest::get(resource_url(service_url, &["layers.json"])?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vector_layer_round_trip_keeps_server_keys() {
        let source = json!({
            "name": "Rivers@World",
            "ugcLayerType": "VECTOR",
            "datasetInfo": {"name": "Rivers", "dataSourceName": "World", "type": "LINE"},
            "style": {"lineWidth": 0.5, "lineColor": {"red": 0, "green": 0, "blue": 255}},
            "minScale": 0
        });

        let layer = UgcSubLayer::from_json(source).unwrap();
        assert!(layer.is_vector());
        assert_eq!(layer.vector_style().unwrap().line_color.blue, 255);

        let out = layer.to_server_json().unwrap();
        assert_eq!(out["style"]["lineWidth"], json!(0.5));
        assert_eq!(out["style"]["markerSymbolID"], json!(-1));
        assert_eq!(out["datasetInfo"]["type"], "LINE");
        assert_eq!(out["minScale"], json!(0));
    }

    #[test]
    fn test_theme_layer_has_no_vector_style() {
        let layer = UgcSubLayer {
            ugc_layer_type: Some(UgcLayerType::Theme),
            style: Some(ServerStyle::default()),
            ..UgcSubLayer::default()
        };
        assert!(layer.vector_style().is_none());
    }

    #[test]
    fn test_layers_request() {
        let map = Url::parse("http://localhost:8090/iserver/services/map-world/rest/maps/World").unwrap();
        let request = GetLayersInfoParameters.build_request(&map).unwrap();
        assert_eq!(request.method, reqwest::Method::GET);
        assert_eq!(
            request.url.as_str(),
            "http://localhost:8090/iserver/services/map-world/rest/maps/World/layers.json"
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn test_destroy() {
        let mut layer = UgcSubLayer::vector("Roads", DatasetInfo::default(), ServerStyle::default());
        layer.destroy();
        layer.destroy();
        assert!(layer.style.is_none());
        assert!(layer.name.is_none());
    }
}
