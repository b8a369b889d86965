//! Thematic map definitions and the request that publishes them as temporary layers.

use crate::core::request::{resource_url, ServiceRequest};
use crate::domain::model::serialize_optional_number;
use crate::domain::ports::{to_server_value, Destroyable, ServiceOperation, ToServerJson};
use crate::domain::results::ResourceResult;
use crate::params::filter::JoinItem;
use crate::params::layer::DatasetInfo;
use crate::params::style::ServerStyle;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Map, Value};
use url::Url;

/// Maps source values of the theme field to the values the theme should use.
///
/// Option bags give it as two parallel lists; the server form is a single object keyed by source value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "MemoryDataRepr")]
pub struct ThemeMemoryData {
    pub src_data: Vec<String>,
    pub target_data: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MemoryDataRepr {
    #[serde(rename_all = "camelCase")]
    Lists {
        src_data: Vec<String>,
        target_data: Vec<String>,
    },
    Server(Map<String, Value>),
}

impl From<MemoryDataRepr> for ThemeMemoryData {
    fn from(repr: MemoryDataRepr) -> Self {
        match repr {
            MemoryDataRepr::Lists {
                src_data,
                target_data,
            } => Self {
                src_data,
                target_data,
            },
            MemoryDataRepr::Server(map) => {
                let (src_data, target_data) = map
                    .into_iter()
                    .map(|(src, target)| {
                        let target = match target {
                            Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (src, target)
                    })
                    .unzip();
                Self {
                    src_data,
                    target_data,
                }
            }
        }
    }
}

impl Serialize for ThemeMemoryData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = self.src_data.len().min(self.target_data.len());
        let mut map = serializer.serialize_map(Some(len))?;
        for (src, target) in self.src_data.iter().zip(self.target_data.iter()) {
            map.serialize_entry(src, target)?;
        }
        map.end()
    }
}

impl ThemeMemoryData {
    pub fn new(src_data: Vec<String>, target_data: Vec<String>) -> Self {
        Self {
            src_data,
            target_data,
        }
    }
}

/// Dot density theme: every dot stands for `value` units of `dotExpression` inside a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeDotDensity {
    pub memory_data: Option<ThemeMemoryData>,
    pub dot_expression: Option<String>,
    pub style: Option<ServerStyle>,
    #[serde(serialize_with = "serialize_optional_number")]
    pub value: Option<f64>,
}

impl Default for ThemeDotDensity {
    fn default() -> Self {
        Self {
            memory_data: None,
            dot_expression: None,
            style: Some(ServerStyle::default()),
            value: None,
        }
    }
}

impl ThemeDotDensity {
    pub fn new(dot_expression: impl Into<String>, value: f64) -> Self {
        Self {
            dot_expression: Some(dot_expression.into()),
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: ServerStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_memory_data(mut self, memory_data: ThemeMemoryData) -> Self {
        self.memory_data = Some(memory_data);
        self
    }
}

impl Destroyable for ThemeDotDensity {
    fn destroy(&mut self) {
        self.dot_expression = None;
        self.value = None;
        self.style = None;
        self.memory_data = None;
    }
}

impl Validate for ThemeDotDensity {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("dotExpression", self.dot_expression.as_deref().unwrap_or(""))?;
        match self.value {
            Some(v) if v > 0.0 => Ok(()),
            _ => Err(ClientError::InvalidParameter {
                field: "value".to_string(),
                reason: "each dot must stand for a positive value".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Theme {
    #[serde(rename = "DOTDENSITY")]
    DotDensity(ThemeDotDensity),
}

impl Theme {
    pub fn from_json(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl From<ThemeDotDensity> for Theme {
    fn from(theme: ThemeDotDensity) -> Self {
        Self::DotDensity(theme)
    }
}

impl Destroyable for Theme {
    fn destroy(&mut self) {
        match self {
            Self::DotDensity(theme) => theme.destroy(),
        }
    }
}

impl Validate for Theme {
    fn validate(&self) -> Result<()> {
        match self {
            Self::DotDensity(theme) => theme.validate(),
        }
    }
}

impl ToServerJson for Theme {
    fn to_server_json(&self) -> Result<Value> {
        to_server_value(self)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FieldValuesDisplayFilter {
    pub field_name: Option<String>,
    pub values: Vec<Value>,
    pub display_mode: Option<String>,
}

/// Themes to publish on a map, each bound to a dataset of a data source.
///
/// The per-theme lists (`datasetNames`, `dataSourceNames`) fall back to their last entry when
/// they are shorter than `themes`; `displayFilters`/`displayOrderBys` with a single entry apply
/// to every theme.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ThemeParameters {
    pub themes: Vec<Theme>,
    pub dataset_names: Option<Vec<String>>,
    pub data_source_names: Option<Vec<String>>,
    pub join_items: Option<Vec<JoinItem>>,
    pub display_filters: Option<Vec<String>>,
    pub display_order_bys: Option<Vec<String>>,
    pub field_values_display_filter: Option<FieldValuesDisplayFilter>,
}

fn shared_or_indexed(list: &Option<Vec<String>>, index: usize) -> Option<&str> {
    match list.as_deref() {
        Some([single]) => Some(single.as_str()),
        Some(items) => items.get(index).map(String::as_str),
        None => None,
    }
}

fn indexed_or_last(list: &[String], index: usize) -> Option<&str> {
    list.get(index).or_else(|| list.last()).map(String::as_str)
}

impl ThemeParameters {
    pub fn new(themes: Vec<Theme>) -> Self {
        Self {
            themes,
            ..Self::default()
        }
    }

    pub fn with_dataset(mut self, dataset_name: impl Into<String>, data_source_name: impl Into<String>) -> Self {
        self.dataset_names
            .get_or_insert_with(Vec::new)
            .push(dataset_name.into());
        self.data_source_names
            .get_or_insert_with(Vec::new)
            .push(data_source_name.into());
        self
    }

    pub fn with_display_filter(mut self, filter: impl Into<String>) -> Self {
        self.display_filters
            .get_or_insert_with(Vec::new)
            .push(filter.into());
        self
    }

    pub fn with_join_item(mut self, item: JoinItem) -> Self {
        self.join_items.get_or_insert_with(Vec::new).push(item);
        self
    }

    fn layer_json(&self, index: usize, theme: &Theme) -> Result<Value> {
        let mut layer = Map::new();
        layer.insert("theme".to_string(), theme.to_server_json()?);
        layer.insert("type".to_string(), json!("UGC"));
        layer.insert("ugcLayerType".to_string(), json!("THEME"));

        if let Some(filter) = shared_or_indexed(&self.display_filters, index) {
            layer.insert("displayFilter".to_string(), json!(filter));
        }
        if let Some(order_by) = shared_or_indexed(&self.display_order_bys, index) {
            layer.insert("displayOrderBy".to_string(), json!(order_by));
        }
        if let Some(filter) = &self.field_values_display_filter {
            layer.insert("fieldValuesDisplayFilter".to_string(), to_server_value(filter)?);
        }
        if let Some(item) = self.join_items.as_ref().and_then(|items| items.get(index)) {
            layer.insert("joinItems".to_string(), json!([item.to_server_json()?]));
        }
        if let (Some(datasets), Some(sources)) = (&self.dataset_names, &self.data_source_names) {
            let info = DatasetInfo {
                name: indexed_or_last(datasets, index).map(str::to_string),
                data_source_name: indexed_or_last(sources, index).map(str::to_string),
                ..DatasetInfo::default()
            };
            layer.insert("datasetInfo".to_string(), info.to_server_json()?);
        }

        Ok(Value::Object(layer))
    }
}

impl ToServerJson for ThemeParameters {
    /// The whole body is a one-element array holding a temporary UGC map layer.
    fn to_server_json(&self) -> Result<Value> {
        if self.themes.is_empty() {
            return Err(ClientError::missing("themes"));
        }

        let layers = self
            .themes
            .iter()
            .enumerate()
            .map(|(index, theme)| self.layer_json(index, theme))
            .collect::<Result<Vec<_>>>()?;

        Ok(json!([{
            "type": "UGC",
            "subLayers": {"layers": layers},
            "name": "themeLayer"
        }]))
    }
}

impl Destroyable for ThemeParameters {
    fn destroy(&mut self) {
        self.themes.iter_mut().for_each(Destroyable::destroy);
        self.themes.clear();
        self.dataset_names = None;
        self.data_source_names = None;
        self.join_items = None;
        self.display_filters = None;
        self.display_order_bys = None;
        self.field_values_display_filter = None;
    }
}

impl Validate for ThemeParameters {
    fn validate(&self) -> Result<()> {
        if self.themes.is_empty() {
            return Err(ClientError::missing("themes"));
        }
        self.themes.iter().try_for_each(Validate::validate)?;
        if self.dataset_names.is_none() || self.data_source_names.is_none() {
            return Err(ClientError::missing("datasetNames/dataSourceNames"));
        }
        Ok(())
    }
}

impl ServiceOperation for ThemeParameters {
    type Output = ResourceResult;

    fn build_request(&self, service_url: &Url) -> Result<ServiceRequest> {
        let url = resource_url(service_url, &["tempLayersSet.json"])?;
        Ok(ServiceRequest::post(url, self.to_json_parameters()?))
    }
}
