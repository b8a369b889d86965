//! Dataset feature queries posted to `featureResults.json`.

use crate::core::request::{resource_url, ServiceRequest};
use crate::domain::model::{Bounds, GetFeatureMode, SpatialQueryMode};
use crate::domain::ports::{Destroyable, ServiceOperation, ToServerJson};
use crate::domain::results::GetFeaturesResult;
use crate::params::filter::FilterParameter;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_non_empty_list, validate_required_field, Validate};
use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_TO_INDEX: i64 = 19;
const DEFAULT_MAX_FEATURES: i64 = 1000;

/// Paging and content options shared by every feature query.
pub trait FeatureResultsQuery: ToServerJson {
    fn return_content(&self) -> bool;
    fn from_index(&self) -> i64;
    fn to_index(&self) -> i64;
    fn max_features(&self) -> i64;
}

fn feature_results_request<Q: FeatureResultsQuery>(query: &Q, service_url: &Url) -> Result<ServiceRequest> {
    let url = resource_url(service_url, &["featureResults.json"])?;
    let mut request = ServiceRequest::post(url, query.to_json_parameters()?);

    if query.return_content() {
        request = request.with_query("returnContent", true);
        if query.from_index() >= 0 && query.to_index() >= 0 {
            request = request
                .with_query("fromIndex", query.from_index())
                .with_query("toIndex", query.to_index());
        }
    }
    if query.max_features() > 0 {
        request = request.with_query("maxFeatures", query.max_features());
    }

    Ok(request)
}

/// `queryParameter` the server expects when only result fields are restricted.
/// Its `name` carries the whole dataset name list.
#[derive(Serialize)]
struct FieldsFilter<'a> {
    name: &'a Option<Vec<String>>,
    fields: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoundsQueryBody<'a> {
    dataset_names: &'a Option<Vec<String>>,
    get_feature_mode: GetFeatureMode,
    bounds: Bounds,
    spatial_query_mode: Option<SpatialQueryMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_parameter: Option<FieldsFilter<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attribute_filter: Option<&'a str>,
}

/// Query of the features inside a rectangle, optionally narrowed by an attribute filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GetFeaturesByBoundsParameters {
    pub bounds: Option<Bounds>,
    pub fields: Option<Vec<String>>,
    pub attribute_filter: Option<String>,
    pub spatial_query_mode: Option<SpatialQueryMode>,
    pub dataset_names: Option<Vec<String>>,
    pub return_content: bool,
    pub from_index: i64,
    pub to_index: i64,
    pub max_features: i64,
}

impl Default for GetFeaturesByBoundsParameters {
    fn default() -> Self {
        Self {
            bounds: None,
            fields: None,
            attribute_filter: None,
            spatial_query_mode: Some(SpatialQueryMode::default()),
            dataset_names: None,
            return_content: true,
            from_index: 0,
            to_index: DEFAULT_TO_INDEX,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl GetFeaturesByBoundsParameters {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds: Some(bounds),
            ..Self::default()
        }
    }

    pub fn with_dataset_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dataset_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_attribute_filter(mut self, filter: impl Into<String>) -> Self {
        self.attribute_filter = Some(filter.into());
        self
    }

    pub fn with_spatial_query_mode(mut self, mode: SpatialQueryMode) -> Self {
        self.spatial_query_mode = Some(mode);
        self
    }

    pub fn with_range(mut self, from_index: i64, to_index: i64) -> Self {
        self.from_index = from_index;
        self.to_index = to_index;
        self
    }

    pub fn with_max_features(mut self, max_features: i64) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_return_content(mut self, return_content: bool) -> Self {
        self.return_content = return_content;
        self
    }

    fn effective_attribute_filter(&self) -> Option<&str> {
        self.attribute_filter.as_deref().filter(|f| !f.is_empty())
    }

    /// A non-empty attribute filter switches the query to `BOUNDS_ATTRIBUTEFILTER`.
    pub fn get_feature_mode(&self) -> GetFeatureMode {
        if self.effective_attribute_filter().is_some() {
            GetFeatureMode::BoundsAttributeFilter
        } else {
            GetFeatureMode::Bounds
        }
    }
}

impl ToServerJson for GetFeaturesByBoundsParameters {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        let bounds = self.bounds.ok_or_else(|| ClientError::missing("bounds"))?;
        let body = BoundsQueryBody {
            dataset_names: &self.dataset_names,
            get_feature_mode: self.get_feature_mode(),
            bounds,
            spatial_query_mode: self.spatial_query_mode,
            query_parameter: self.fields.as_deref().map(|fields| FieldsFilter {
                name: &self.dataset_names,
                fields,
            }),
            attribute_filter: self.effective_attribute_filter(),
        };
        Ok(serde_json::to_value(body)?)
    }
}

impl Destroyable for GetFeaturesByBoundsParameters {
    fn destroy(&mut self) {
        self.bounds = None;
        self.fields = None;
        self.attribute_filter = None;
        self.spatial_query_mode = None;
        self.dataset_names = None;
    }
}

impl Validate for GetFeaturesByBoundsParameters {
    fn validate(&self) -> Result<()> {
        let bounds = validate_required_field("bounds", &self.bounds)?;
        if bounds.is_empty() {
            return Err(ClientError::InvalidParameter {
                field: "bounds".to_string(),
                reason: "right/top must be greater than left/bottom".to_string(),
            });
        }
        validate_non_empty_list("datasetNames", &self.dataset_names)?;
        if matches!(self.attribute_filter.as_deref(), Some(f) if f.trim().is_empty()) {
            return Err(ClientError::InvalidParameter {
                field: "attributeFilter".to_string(),
                reason: "an empty filter keeps the query in BOUNDS mode".to_string(),
            });
        }
        Ok(())
    }
}

impl FeatureResultsQuery for GetFeaturesByBoundsParameters {
    fn return_content(&self) -> bool {
        self.return_content
    }

    fn from_index(&self) -> i64 {
        self.from_index
    }

    fn to_index(&self) -> i64 {
        self.to_index
    }

    fn max_features(&self) -> i64 {
        self.max_features
    }
}

impl ServiceOperation for GetFeaturesByBoundsParameters {
    type Output = GetFeaturesResult;

    fn build_request(&self, service_url: &Url) -> Result<ServiceRequest> {
        feature_results_request(self, service_url)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdsQueryBody<'a> {
    dataset_names: &'a Option<Vec<String>>,
    get_feature_mode: GetFeatureMode,
    ids: &'a Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query_parameter: Option<FieldsFilter<'a>>,
}

/// Query of features by their `SmID`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GetFeaturesByIDsParameters {
    #[serde(rename = "IDs")]
    pub ids: Option<Vec<i64>>,
    pub fields: Option<Vec<String>>,
    pub dataset_names: Option<Vec<String>>,
    pub return_content: bool,
    pub from_index: i64,
    pub to_index: i64,
    pub max_features: i64,
}

impl Default for GetFeaturesByIDsParameters {
    fn default() -> Self {
        Self {
            ids: None,
            fields: None,
            dataset_names: None,
            return_content: true,
            from_index: 0,
            to_index: DEFAULT_TO_INDEX,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl GetFeaturesByIDsParameters {
    pub fn new(ids: Vec<i64>) -> Self {
        Self {
            ids: Some(ids),
            ..Self::default()
        }
    }

    pub fn with_dataset_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dataset_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_range(mut self, from_index: i64, to_index: i64) -> Self {
        self.from_index = from_index;
        self.to_index = to_index;
        self
    }

    pub fn with_max_features(mut self, max_features: i64) -> Self {
        self.max_features = max_features;
        self
    }
}

impl ToServerJson for GetFeaturesByIDsParameters {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        let body = IdsQueryBody {
            dataset_names: &self.dataset_names,
            get_feature_mode: GetFeatureMode::Id,
            ids: &self.ids,
            query_parameter: self.fields.as_deref().map(|fields| FieldsFilter {
                name: &self.dataset_names,
                fields,
            }),
        };
        Ok(serde_json::to_value(body)?)
    }
}

impl Destroyable for GetFeaturesByIDsParameters {
    fn destroy(&mut self) {
        self.ids = None;
        self.fields = None;
        self.dataset_names = None;
    }
}

impl Validate for GetFeaturesByIDsParameters {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("IDs", &self.ids)?;
        validate_non_empty_list("datasetNames", &self.dataset_names)
    }
}

impl FeatureResultsQuery for GetFeaturesByIDsParameters {
    fn return_content(&self) -> bool {
        self.return_content
    }

    fn from_index(&self) -> i64 {
        self.from_index
    }

    fn to_index(&self) -> i64 {
        self.to_index
    }

    fn max_features(&self) -> i64 {
        self.max_features
    }
}

impl ServiceOperation for GetFeaturesByIDsParameters {
    type Output = GetFeaturesResult;

    fn build_request(&self, service_url: &Url) -> Result<ServiceRequest> {
        feature_results_request(self, service_url)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SqlQueryBody<'a> {
    dataset_names: &'a Option<Vec<String>>,
    get_feature_mode: GetFeatureMode,
    query_parameter: &'a Option<FilterParameter>,
}

/// Query of features matching an SQL filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GetFeaturesBySQLParameters {
    pub query_parameter: Option<FilterParameter>,
    pub dataset_names: Option<Vec<String>>,
    pub return_content: bool,
    pub from_index: i64,
    pub to_index: i64,
    pub max_features: i64,
}

impl Default for GetFeaturesBySQLParameters {
    fn default() -> Self {
        Self {
            query_parameter: None,
            dataset_names: None,
            return_content: true,
            from_index: 0,
            to_index: DEFAULT_TO_INDEX,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

impl GetFeaturesBySQLParameters {
    pub fn new(query_parameter: FilterParameter) -> Self {
        Self {
            query_parameter: Some(query_parameter),
            ..Self::default()
        }
    }

    pub fn with_dataset_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dataset_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_range(mut self, from_index: i64, to_index: i64) -> Self {
        self.from_index = from_index;
        self.to_index = to_index;
        self
    }

    pub fn with_max_features(mut self, max_features: i64) -> Self {
        self.max_features = max_features;
        self
    }
}

impl ToServerJson for GetFeaturesBySQLParameters {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        let body = SqlQueryBody {
            dataset_names: &self.dataset_names,
            get_feature_mode: GetFeatureMode::Sql,
            query_parameter: &self.query_parameter,
        };
        Ok(serde_json::to_value(body)?)
    }
}

impl Destroyable for GetFeaturesBySQLParameters {
    fn destroy(&mut self) {
        if let Some(filter) = self.query_parameter.as_mut() {
            filter.destroy();
        }
        self.query_parameter = None;
        self.dataset_names = None;
    }
}

impl Validate for GetFeaturesBySQLParameters {
    fn validate(&self) -> Result<()> {
        validate_required_field("queryParameter", &self.query_parameter)?;
        validate_non_empty_list("datasetNames", &self.dataset_names)
    }
}

impl FeatureResultsQuery for GetFeaturesBySQLParameters {
    fn return_content(&self) -> bool {
        self.return_content
    }

    fn from_index(&self) -> i64 {
        self.from_index
    }

    fn to_index(&self) -> i64 {
        self.to_index
    }

    fn max_features(&self) -> i64 {
        self.max_features
    }
}

impl ServiceOperation for GetFeaturesBySQLParameters {
    type Output = GetFeaturesResult;

    fn build_request(&self, service_url: &Url) -> Result<ServiceRequest> {
        feature_results_request(self, service_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::from_options;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn roads_query() -> GetFeaturesByBoundsParameters {
        GetFeaturesByBoundsParameters::new(Bounds::new(0.0, 0.0, 10.0, 10.0))
            .with_dataset_names(["Roads"])
            .with_spatial_query_mode(SpatialQueryMode::Contain)
    }

    #[test]
    fn test_bounds_query_exact_wire_string() {
        assert_eq!(
            roads_query().to_json_parameters().unwrap(),
            r#"{"datasetNames":["Roads"],"getFeatureMode":"BOUNDS","bounds":{"leftBottom":{"x":0,"y":0},"rightTop":{"x":10,"y":10}},"spatialQueryMode":"CONTAIN"}"#
        );
    }

    #[test]
    fn test_bounds_corners_follow_source_bounds() {
        let query = GetFeaturesByBoundsParameters::new(Bounds::new(-12.5, 3.0, 40.25, 77.0));
        let value = query.to_server_json().unwrap();

        assert_eq!(value["bounds"]["leftBottom"]["x"], json!(-12.5));
        assert_eq!(value["bounds"]["leftBottom"]["y"], json!(3));
        assert_eq!(value["bounds"]["rightTop"]["x"], json!(40.25));
        assert_eq!(value["bounds"]["rightTop"]["y"], json!(77));
    }

    #[test]
    fn test_attribute_filter_switches_mode() {
        let plain = roads_query();
        assert_eq!(plain.get_feature_mode(), GetFeatureMode::Bounds);
        assert_eq!(plain.to_server_json().unwrap()["getFeatureMode"], "BOUNDS");

        let filtered = roads_query().with_attribute_filter("SMID < 10");
        let value = filtered.to_server_json().unwrap();
        assert_eq!(value["getFeatureMode"], "BOUNDS_ATTRIBUTEFILTER");
        assert_eq!(value["attributeFilter"], "SMID < 10");

        // An empty filter is treated as no filter at all.
        let empty = roads_query().with_attribute_filter("");
        let value = empty.to_server_json().unwrap();
        assert_eq!(value["getFeatureMode"], "BOUNDS");
        assert!(value.get("attributeFilter").is_none());
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_fields_become_query_parameter() {
        let value = roads_query()
            .with_fields(["NAME", "POP"])
            .to_server_json()
            .unwrap();

        assert_eq!(
            value["queryParameter"],
            json!({"name": ["Roads"], "fields": ["NAME", "POP"]})
        );
    }

    #[test]
    fn test_missing_bounds_is_reported() {
        let query = GetFeaturesByBoundsParameters::default().with_dataset_names(["Roads"]);
        assert!(matches!(
            query.to_json_parameters(),
            Err(ClientError::MissingParameter { ref field }) if field == "bounds"
        ));
    }

    #[test]
    fn test_destroy_twice_clears_references() {
        let mut query = roads_query()
            .with_fields(["NAME"])
            .with_attribute_filter("NAME = 'A'");

        query.destroy();
        query.destroy();

        assert_eq!(query.bounds, None);
        assert_eq!(query.fields, None);
        assert_eq!(query.attribute_filter, None);
        assert_eq!(query.spatial_query_mode, None);
        assert_eq!(query.dataset_names, None);
    }

    #[test]
    fn test_from_options_bag() {
        let query: GetFeaturesByBoundsParameters = from_options(json!({
            "bounds": {"left": 0, "bottom": 0, "right": 10, "top": 10},
            "datasetNames": ["Roads"],
            "spatialQueryMode": "INTERSECT",
            "toIndex": 99
        }))
        .unwrap();

        assert_eq!(query.bounds, Some(Bounds::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(query.spatial_query_mode, Some(SpatialQueryMode::Intersect));
        assert_eq!(query.to_index, 99);
        assert!(query.return_content);

        let unknown = from_options::<GetFeaturesByBoundsParameters>(json!({"bound": {}}));
        assert!(unknown.is_err());
    }

    #[test]
    fn test_feature_results_request() {
        let base = Url::parse("http://localhost:8090/iserver/services/data-world/rest/data").unwrap();
        let request = roads_query().with_range(5, 24).build_request(&base).unwrap();

        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.url.path(), "/iserver/services/data-world/rest/data/featureResults.json");
        assert_eq!(
            request.url.query(),
            Some("returnContent=true&fromIndex=5&toIndex=24&maxFeatures=1000")
        );

        let no_content = roads_query()
            .with_return_content(false)
            .with_max_features(0)
            .build_request(&base)
            .unwrap();
        assert_eq!(no_content.url.query(), None);
    }

    #[test]
    fn test_ids_query() {
        let query = GetFeaturesByIDsParameters::new(vec![1, 2, 3])
            .with_dataset_names(["World:Countries"])
            .with_fields(["SMID"]);

        assert_eq!(
            query.to_json_parameters().unwrap(),
            r#"{"datasetNames":["World:Countries"],"getFeatureMode":"ID","ids":[1,2,3],"queryParameter":{"name":["World:Countries"],"fields":["SMID"]}}"#
        );

        let parsed: GetFeaturesByIDsParameters = from_options(json!({"IDs": [4]})).unwrap();
        assert_eq!(parsed.ids, Some(vec![4]));
    }

    #[test]
    fn test_ids_paging() {
        let base = Url::parse("http://localhost:8090/iserver/services/data-world/rest/data").unwrap();
        let request = GetFeaturesByIDsParameters::new(vec![1])
            .with_range(0, 9)
            .with_max_features(50)
            .build_request(&base)
            .unwrap();

        assert_eq!(
            request.url.query(),
            Some("returnContent=true&fromIndex=0&toIndex=9&maxFeatures=50")
        );
    }

    #[test]
    fn test_sql_query() {
        let query = GetFeaturesBySQLParameters::new(
            FilterParameter::new()
                .with_name("Countries@World")
                .with_attribute_filter("SMID = 247"),
        )
        .with_dataset_names(["World:Countries"]);

        assert_eq!(
            query.to_server_json().unwrap(),
            json!({
                "datasetNames": ["World:Countries"],
                "getFeatureMode": "SQL",
                "queryParameter": {"name": "Countries@World", "attributeFilter": "SMID = 247"}
            })
        );

        let mut query = query;
        query.destroy();
        query.destroy();
        assert!(query.query_parameter.is_none());
        assert!(query.validate().is_err());
    }
}
