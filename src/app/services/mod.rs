//! Service adapters: one type per REST service, one method per server operation.

/// Constructors and the callback entry point every adapter shares. `$operation` bounds the
/// parameter objects the adapter accepts in `process_async`.
macro_rules! service_adapter {
    ($name:ident, $operation:path) => {
        impl $name {
            pub fn new(url: &str, options: $crate::core::ServiceOptions) -> $crate::utils::error::Result<Self> {
                Ok(Self {
                    base: $crate::core::ServiceBase::new(url, options)?,
                })
            }

            pub fn with_transport(
                url: &str,
                options: $crate::core::ServiceOptions,
                transport: std::sync::Arc<dyn $crate::domain::ports::Transport>,
            ) -> $crate::utils::error::Result<Self> {
                Ok(Self {
                    base: $crate::core::ServiceBase::with_transport(url, options, transport)?,
                })
            }

            pub fn base(&self) -> &$crate::core::ServiceBase {
                &self.base
            }

            /// Sends `params` in the background; `callback` receives the result or the failure.
            pub fn process_async<O, F>(&self, params: O, callback: F) -> &Self
            where
                O: $operation + 'static,
                F: FnOnce($crate::utils::error::Result<O::Output>) + Send + 'static,
            {
                self.base.process_async(params, callback);
                self
            }
        }
    };
}

pub(crate) use service_adapter;

pub mod feature_service;
pub mod layer_info_service;
pub mod network_analyst_3d;
pub mod spatial_analyst;
pub mod theme_service;

pub use feature_service::FeatureService;
pub use layer_info_service::LayerInfoService;
pub use network_analyst_3d::NetworkAnalyst3DService;
pub use spatial_analyst::SpatialAnalystService;
pub use theme_service::ThemeService;
