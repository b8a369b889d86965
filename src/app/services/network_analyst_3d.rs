use super::service_adapter;
use crate::core::ServiceBase;
use crate::domain::ports::ServiceOperation;
use crate::domain::results::FacilityAnalyst3DResult;
use crate::params::{
    FacilityAnalystSinks3DParameters, FacilityAnalystSources3DParameters,
    FacilityAnalystTracedown3DParameters, FacilityAnalystTraceup3DParameters,
    FacilityAnalystUpstream3DParameters,
};
use crate::utils::error::Result;

pub trait FacilityAnalysis: ServiceOperation<Output = FacilityAnalyst3DResult> {}

impl FacilityAnalysis for FacilityAnalystSinks3DParameters {}
impl FacilityAnalysis for FacilityAnalystSources3DParameters {}
impl FacilityAnalysis for FacilityAnalystTraceup3DParameters {}
impl FacilityAnalysis for FacilityAnalystTracedown3DParameters {}
impl FacilityAnalysis for FacilityAnalystUpstream3DParameters {}

/// Facility analysis on a 3D network, bound to one network dataset URL, e.g.
/// `.../iserver/services/transportationanalyst-sample/rest/networkanalyst3d/RoadNet@Changchun`.
#[derive(Debug, Clone)]
pub struct NetworkAnalyst3DService {
    base: ServiceBase,
}

service_adapter!(NetworkAnalyst3DService, FacilityAnalysis);

impl NetworkAnalyst3DService {
    pub async fn sinks_facility_analyst(
        &self,
        params: &FacilityAnalystSinks3DParameters,
    ) -> Result<FacilityAnalyst3DResult> {
        self.base.execute(params).await
    }

    pub async fn sources_facility_analyst(
        &self,
        params: &FacilityAnalystSources3DParameters,
    ) -> Result<FacilityAnalyst3DResult> {
        self.base.execute(params).await
    }

    pub async fn trace_up_facility_analyst(
        &self,
        params: &FacilityAnalystTraceup3DParameters,
    ) -> Result<FacilityAnalyst3DResult> {
        self.base.execute(params).await
    }

    pub async fn trace_down_facility_analyst(
        &self,
        params: &FacilityAnalystTracedown3DParameters,
    ) -> Result<FacilityAnalyst3DResult> {
        self.base.execute(params).await
    }

    pub async fn upstream_facility_analyst(
        &self,
        params: &FacilityAnalystUpstream3DParameters,
    ) -> Result<FacilityAnalyst3DResult> {
        self.base.execute(params).await
    }
}
