use super::service_adapter;
use crate::core::ServiceBase;
use crate::domain::ports::ServiceOperation;
use crate::domain::results::GenerateSpatialDataResult;
use crate::params::GenerateSpatialDataParameters;
use crate::utils::error::Result;

pub trait SpatialAnalysis: ServiceOperation {}

impl SpatialAnalysis for GenerateSpatialDataParameters {}

/// Spatial analysis service, e.g. `.../iserver/services/spatialanalyst-changchun/restjsr/spatialanalyst`.
#[derive(Debug, Clone)]
pub struct SpatialAnalystService {
    base: ServiceBase,
}

service_adapter!(SpatialAnalystService, SpatialAnalysis);

impl SpatialAnalystService {
    /// Dynamic segmentation of the event table along the routes of `routeTable`.
    pub async fn generate_spatial_data(
        &self,
        params: &GenerateSpatialDataParameters,
    ) -> Result<GenerateSpatialDataResult> {
        self.base.execute(params).await
    }
}
