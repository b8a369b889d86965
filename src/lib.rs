pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod params;
pub mod utils;

pub use app::{
    FeatureService, LayerInfoService, NetworkAnalyst3DService, SpatialAnalystService,
    ThemeService,
};
pub use config::ClientConfig;
pub use core::{HttpTransport, ServiceBase, ServiceOptions, ServiceRequest};
pub use domain::model::{Bounds, Point2D, ServerType, SpatialQueryMode};
pub use domain::ports::{Destroyable, ServiceOperation, ToServerJson, Transport};
pub use utils::error::{ClientError, Result};
