pub mod output;
pub mod services;

pub use services::{
    FeatureService, LayerInfoService, NetworkAnalyst3DService, SpatialAnalystService,
    ThemeService,
};
