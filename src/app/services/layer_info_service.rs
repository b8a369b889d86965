use super::service_adapter;
use crate::core::ServiceBase;
use crate::domain::ports::ServiceOperation;
use crate::domain::results::LayersInfo;
use crate::params::GetLayersInfoParameters;
use crate::utils::error::Result;

pub trait LayerInfoOperation: ServiceOperation<Output = LayersInfo> {}

impl LayerInfoOperation for GetLayersInfoParameters {}

/// Reads the layer tree of a map service.
#[derive(Debug, Clone)]
pub struct LayerInfoService {
    base: ServiceBase,
}

service_adapter!(LayerInfoService, LayerInfoOperation);

impl LayerInfoService {
    pub async fn get_layers_info(&self) -> Result<LayersInfo> {
        self.base.execute(&GetLayersInfoParameters).await
    }
}
