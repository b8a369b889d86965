use super::service_adapter;
use crate::core::ServiceBase;
use crate::domain::ports::ServiceOperation;
use crate::domain::results::ResourceResult;
use crate::params::ThemeParameters;
use crate::utils::error::Result;

/// Parameter objects accepted by the temporary layer set resource.
pub trait ThemeOperation: ServiceOperation<Output = ResourceResult> {}

impl ThemeOperation for ThemeParameters {}

/// Publishes themes as temporary layers of a map service, e.g. `.../iserver/services/map-world/rest/maps/World`.
/// The returned `newResourceID` names the layer set to request tiles with.
#[derive(Debug, Clone)]
pub struct ThemeService {
    base: ServiceBase,
}

service_adapter!(ThemeService, ThemeOperation);

impl ThemeService {
    pub async fn get_theme_info(&self, params: &ThemeParameters) -> Result<ResourceResult> {
        self.base.execute(params).await
    }
}
