//! Results as returned by the server. Field names mirror the server JSON one to one;
//! keys this client does not model are kept in `extra` instead of being rejected.

use crate::domain::model::{Bounds, Point2D};
use crate::params::layer::UgcSubLayer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerGeometry {
    pub id: i64,
    pub parts: Vec<u32>,
    pub points: Vec<Point2D>,
    #[serde(rename = "type")]
    pub geometry_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerFeature {
    #[serde(rename = "ID")]
    pub id: i64,
    pub field_names: Vec<String>,
    pub field_values: Vec<String>,
    pub geometry: Option<ServerGeometry>,
}

impl ServerFeature {
    /// Pairs each field name with its value. Extra values without a name are dropped.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_names
            .iter()
            .zip(self.field_values.iter())
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

/// Answer of a `featureResults` request. With `returnContent=true` the features are inline,
/// otherwise the server only reports the location of the created result resource.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetFeaturesResult {
    pub feature_count: Option<u64>,
    pub total_count: Option<u64>,
    pub features: Vec<ServerFeature>,
    pub succeed: Option<bool>,
    #[serde(rename = "newResourceID")]
    pub new_resource_id: Option<String>,
    pub new_resource_location: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Answer of requests that create a server resource, e.g. temporary theme layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceResult {
    pub succeed: bool,
    #[serde(rename = "newResourceID")]
    pub new_resource_id: Option<String>,
    pub new_resource_location: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacilityAnalyst3DResult {
    pub cost: Option<f64>,
    #[serde(rename = "edgeIDs")]
    pub edge_ids: Vec<i64>,
    #[serde(rename = "nodeIDs")]
    pub node_ids: Vec<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recordset {
    pub dataset_name: Option<String>,
    pub fields: Vec<String>,
    pub field_captions: Vec<String>,
    pub field_types: Vec<String>,
    pub features: Vec<ServerFeature>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateSpatialDataResult {
    pub succeed: bool,
    pub recordset: Option<Recordset>,
    pub dataset: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubLayers {
    pub layers: Vec<UgcSubLayer>,
}

/// One entry of the `layers.json` listing of a map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerLayer {
    pub name: Option<String>,
    pub caption: Option<String>,
    #[serde(rename = "type")]
    pub layer_type: Option<String>,
    pub visible: Option<bool>,
    pub bounds: Option<Bounds>,
    pub sub_layers: SubLayers,
}

pub type LayersInfo = Vec<ServerLayer>;
