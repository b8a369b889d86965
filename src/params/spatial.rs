//! Dynamic segmentation: generating spatial data from a route dataset and an event table.

use crate::core::request::{resource_url, ServiceRequest};
use crate::domain::model::DataReturnMode;
use crate::domain::ports::{to_server_value, Destroyable, ServiceOperation, ToServerJson};
use crate::domain::results::GenerateSpatialDataResult;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_required_field, Validate};
use serde::{Deserialize, Serialize};
use url::Url;

/// How an analysis hands back its output: a stored dataset, a recordset in the response, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DataReturnOption {
    pub expect_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    pub data_return_mode: DataReturnMode,
    pub delete_exist_result_dataset: bool,
}

impl Default for DataReturnOption {
    fn default() -> Self {
        Self {
            expect_count: 1000,
            dataset: None,
            data_return_mode: DataReturnMode::RecordsetOnly,
            delete_exist_result_dataset: true,
        }
    }
}

impl DataReturnOption {
    pub fn dataset(name: impl Into<String>, mode: DataReturnMode) -> Self {
        Self {
            dataset: Some(name.into()),
            data_return_mode: mode,
            ..Self::default()
        }
    }

    fn stores_dataset(&self) -> bool {
        self.data_return_mode != DataReturnMode::RecordsetOnly
    }
}

impl ToServerJson for DataReturnOption {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        to_server_value(self)
    }
}

impl Destroyable for DataReturnOption {
    fn destroy(&mut self) {
        self.dataset = None;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct GenerateSpatialDataParameters {
    /// Route dataset, `name@datasource`. Part of the resource path, never of the body.
    #[serde(skip_serializing)]
    pub route_table: Option<String>,
    #[serde(rename = "routeIDField", skip_serializing_if = "Option::is_none")]
    pub route_id_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_table: Option<String>,
    #[serde(rename = "eventRouteIDField", skip_serializing_if = "Option::is_none")]
    pub event_route_id_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_start_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_end_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure_offset_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_info_field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_return_option: Option<DataReturnOption>,
}

impl GenerateSpatialDataParameters {
    pub fn new(route_table: impl Into<String>, event_table: impl Into<String>) -> Self {
        Self {
            route_table: Some(route_table.into()),
            event_table: Some(event_table.into()),
            ..Self::default()
        }
    }

    pub fn with_route_id_fields(
        mut self,
        route_id_field: impl Into<String>,
        event_route_id_field: impl Into<String>,
    ) -> Self {
        self.route_id_field = Some(route_id_field.into());
        self.event_route_id_field = Some(event_route_id_field.into());
        self
    }

    /// Point events located by a single measure.
    pub fn with_measure_field(mut self, field: impl Into<String>) -> Self {
        self.measure_field = Some(field.into());
        self
    }

    /// Line events spanning a measure range.
    pub fn with_measure_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.measure_start_field = Some(start.into());
        self.measure_end_field = Some(end.into());
        self
    }

    pub fn with_measure_offset_field(mut self, field: impl Into<String>) -> Self {
        self.measure_offset_field = Some(field.into());
        self
    }

    pub fn with_error_info_field(mut self, field: impl Into<String>) -> Self {
        self.error_info_field = Some(field.into());
        self
    }

    pub fn with_retained_fields(mut self, fields: Vec<String>) -> Self {
        self.retained_fields = Some(fields);
        self
    }

    pub fn with_data_return_option(mut self, option: DataReturnOption) -> Self {
        self.data_return_option = Some(option);
        self
    }
}

impl ToServerJson for GenerateSpatialDataParameters {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        to_server_value(self)
    }
}

impl Destroyable for GenerateSpatialDataParameters {
    fn destroy(&mut self) {
        self.route_table = None;
        self.route_id_field = None;
        self.event_table = None;
        self.event_route_id_field = None;
        self.measure_field = None;
        self.measure_start_field = None;
        self.measure_end_field = None;
        self.measure_offset_field = None;
        self.error_info_field = None;
        self.retained_fields = None;
        self.data_return_option = None;
    }
}

impl Validate for GenerateSpatialDataParameters {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("routeTable", validate_required_field("routeTable", &self.route_table)?)?;
        validate_non_empty_string("eventTable", validate_required_field("eventTable", &self.event_table)?)?;
        validate_required_field("routeIDField", &self.route_id_field)?;
        validate_required_field("eventRouteIDField", &self.event_route_id_field)?;

        let point_events = self.measure_field.is_some();
        let line_events = self.measure_start_field.is_some() && self.measure_end_field.is_some();
        if !point_events && !line_events {
            return Err(ClientError::MissingParameter {
                field: "measureField or measureStartField/measureEndField".to_string(),
            });
        }

        if let Some(option) = &self.data_return_option {
            if option.stores_dataset() && option.dataset.is_none() {
                return Err(ClientError::InvalidParameter {
                    field: "dataReturnOption.dataset".to_string(),
                    reason: format!(
                        "a result dataset name is required for {:?}",
                        option.data_return_mode
                    ),
                });
            }
        }
        Ok(())
    }
}

impl ServiceOperation for GenerateSpatialDataParameters {
    type Output = GenerateSpatialDataResult;

    fn build_request(&self, service_url: &Url) -> Result<ServiceRequest> {
        let route_table = validate_required_field("routeTable", &self.route_table)?;
        let url = resource_url(
            service_url,
            &[
                "datasets",
                route_table.as_str(),
                "linearreferencing",
                "generatespatialdata.json",
            ],
        )?;
        Ok(ServiceRequest::post(url, self.to_json_parameters()?).with_query("returnContent", true))
    }
}
