use super::service_adapter;
use crate::core::ServiceBase;
use crate::domain::ports::ServiceOperation;
use crate::domain::results::GetFeaturesResult;
use crate::params::{
    GetFeaturesByBoundsParameters, GetFeaturesByIDsParameters, GetFeaturesBySQLParameters,
};
use crate::utils::error::Result;

/// Parameter objects answered by the data service's `featureResults` resource.
pub trait FeatureQuery: ServiceOperation<Output = GetFeaturesResult> {}

impl FeatureQuery for GetFeaturesByBoundsParameters {}
impl FeatureQuery for GetFeaturesByIDsParameters {}
impl FeatureQuery for GetFeaturesBySQLParameters {}

/// Feature queries against a data service, e.g. `.../iserver/services/data-world/rest/data`.
#[derive(Debug, Clone)]
pub struct FeatureService {
    base: ServiceBase,
}

service_adapter!(FeatureService, FeatureQuery);

impl FeatureService {
    pub async fn get_features_by_bounds(
        &self,
        params: &GetFeaturesByBoundsParameters,
    ) -> Result<GetFeaturesResult> {
        self.base.execute(params).await
    }

    pub async fn get_features_by_ids(
        &self,
        params: &GetFeaturesByIDsParameters,
    ) -> Result<GetFeaturesResult> {
        self.base.execute(params).await
    }

    pub async fn get_features_by_sql(
        &self,
        params: &GetFeaturesBySQLParameters,
    ) -> Result<GetFeaturesResult> {
        self.base.execute(params).await
    }
}
