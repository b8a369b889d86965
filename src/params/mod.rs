pub mod facility_3d;
pub mod filter;
pub mod get_features;
pub mod layer;
pub mod spatial;
pub mod style;
pub mod theme;

use crate::utils::error::{ClientError, Result};
use serde::de::DeserializeOwned;

pub use facility_3d::{
    FacilityAnalystSinks3DParameters, FacilityAnalystSources3DParameters,
    FacilityAnalystTracedown3DParameters, FacilityAnalystTraceup3DParameters,
    FacilityAnalystUpstream3DParameters,
};
pub use filter::{FilterParameter, JoinItem};
pub use get_features::{
    GetFeaturesByBoundsParameters, GetFeaturesByIDsParameters, GetFeaturesBySQLParameters,
};
pub use layer::{DatasetInfo, GetLayersInfoParameters, UgcSubLayer};
pub use spatial::{DataReturnOption, GenerateSpatialDataParameters};
pub use style::{ServerColor, ServerStyle};
pub use theme::{Theme, ThemeDotDensity, ThemeMemoryData, ThemeParameters};

/// Builds a parameter object from a JSON option bag. Absent keys take their defaults,
/// unknown keys are rejected.
pub fn from_options<T: DeserializeOwned>(options: serde_json::Value) -> Result<T> {
    serde_json::from_value(options).map_err(|e| ClientError::InvalidParameter {
        field: "options".to_string(),
        reason: e.to_string(),
    })
}
