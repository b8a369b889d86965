//! Facility analysis on a 3D network dataset. Every request is a GET on a resource under the
//! network service URL, with the parameters in the query string.

use crate::core::request::{resource_url, ServiceRequest};
use crate::domain::ports::{to_server_value, Destroyable, ServiceOperation, ToServerJson};
use crate::domain::results::FacilityAnalyst3DResult;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_list, validate_one_of, Validate};
use serde::{Deserialize, Serialize};
use url::Url;

macro_rules! facility_parameters {
    ($(#[$doc:meta])* $name:ident => $resource:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields, default)]
        pub struct $name {
            #[serde(rename = "edgeID")]
            pub edge_id: Option<i64>,
            #[serde(rename = "nodeID")]
            pub node_id: Option<i64>,
            pub weight_name: Option<String>,
            pub is_uncertain_direction_valid: bool,
        }

        impl $name {
            pub fn from_edge(edge_id: i64) -> Self {
                Self {
                    edge_id: Some(edge_id),
                    ..Self::default()
                }
            }

            pub fn from_node(node_id: i64) -> Self {
                Self {
                    node_id: Some(node_id),
                    ..Self::default()
                }
            }

            pub fn with_weight_name(mut self, weight_name: impl Into<String>) -> Self {
                self.weight_name = Some(weight_name.into());
                self
            }

            pub fn with_uncertain_direction_valid(mut self, valid: bool) -> Self {
                self.is_uncertain_direction_valid = valid;
                self
            }
        }

        impl ToServerJson for $name {
            fn to_server_json(&self) -> Result<serde_json::Value> {
                to_server_value(self)
            }
        }

        impl Destroyable for $name {
            fn destroy(&mut self) {
                self.edge_id = None;
                self.node_id = None;
                self.weight_name = None;
                self.is_uncertain_direction_valid = false;
            }
        }

        impl Validate for $name {
            fn validate(&self) -> Result<()> {
                validate_one_of("edgeID", self.edge_id, "nodeID", self.node_id)
            }
        }

        impl ServiceOperation for $name {
            type Output = FacilityAnalyst3DResult;

            fn build_request(&self, service_url: &Url) -> Result<ServiceRequest> {
                let url = resource_url(service_url, &[$resource])?;
                Ok(ServiceRequest::get(url)
                    .with_optional_query("edgeID", self.edge_id)
                    .with_optional_query("nodeID", self.node_id)
                    .with_optional_query("weightName", self.weight_name.as_deref())
                    .with_query("isUncertainDirectionValid", self.is_uncertain_direction_valid))
            }
        }
    };
}

facility_parameters!(
    /// Finds the sinks reachable downstream from an edge or node.
    FacilityAnalystSinks3DParameters => "sinks.json"
);

facility_parameters!(
    /// Finds the sources an edge or node is fed from.
    FacilityAnalystSources3DParameters => "sources.json"
);

facility_parameters!(
    /// Traces the network upstream from an edge or node.
    FacilityAnalystTraceup3DParameters => "traceup.json"
);

facility_parameters!(
    /// Traces the network downstream from an edge or node.
    FacilityAnalystTracedown3DParameters => "tracedown.json"
);

/// Finds the critical facilities upstream of an edge or node among `sourceNodeIDs`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct FacilityAnalystUpstream3DParameters {
    #[serde(rename = "sourceNodeIDs")]
    pub source_node_ids: Option<Vec<i64>>,
    #[serde(rename = "edgeID")]
    pub edge_id: Option<i64>,
    #[serde(rename = "nodeID")]
    pub node_id: Option<i64>,
    pub weight_name: Option<String>,
    pub is_uncertain_direction_valid: bool,
}

impl FacilityAnalystUpstream3DParameters {
    pub fn new(source_node_ids: Vec<i64>) -> Self {
        Self {
            source_node_ids: Some(source_node_ids),
            ..Self::default()
        }
    }

    pub fn with_edge(mut self, edge_id: i64) -> Self {
        self.edge_id = Some(edge_id);
        self
    }

    pub fn with_node(mut self, node_id: i64) -> Self {
        self.node_id = Some(node_id);
        self
    }

    pub fn with_weight_name(mut self, weight_name: impl Into<String>) -> Self {
        self.weight_name = Some(weight_name.into());
        self
    }

    pub fn with_uncertain_direction_valid(mut self, valid: bool) -> Self {
        self.is_uncertain_direction_valid = valid;
        self
    }
}

impl ToServerJson for FacilityAnalystUpstream3DParameters {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        to_server_value(self)
    }
}

impl Destroyable for FacilityAnalystUpstream3DParameters {
    fn destroy(&mut self) {
        self.source_node_ids = None;
        self.edge_id = None;
        self.node_id = None;
        self.weight_name = None;
        self.is_uncertain_direction_valid = false;
    }
}

impl Validate for FacilityAnalystUpstream3DParameters {
    fn validate(&self) -> Result<()> {
        validate_non_empty_list("sourceNodeIDs", &self.source_node_ids)?;
        validate_one_of("edgeID", self.edge_id, "nodeID", self.node_id)
    }
}

impl ServiceOperation for FacilityAnalystUpstream3DParameters {
    type Output = FacilityAnalyst3DResult;

    fn build_request(&self, service_url: &Url) -> Result<ServiceRequest> {
        let url = resource_url(service_url, &["upstreamcirticalfaclilities.json"])?;
        let mut request = ServiceRequest::get(url);
        if let Some(ids) = &self.source_node_ids {
            request = request.with_list_query("sourceNodeIDs", ids);
        }
        Ok(request
            .with_optional_query("edgeID", self.edge_id)
            .with_optional_query("nodeID", self.node_id)
            .with_optional_query("weightName", self.weight_name.as_deref())
            .with_query("isUncertainDirectionValid", self.is_uncertain_direction_valid))
    }
}
