use crate::domain::model::{serialize_number, FillGradientMode};
use crate::domain::ports::{to_server_value, ToServerJson};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<u8>,
}

impl ServerColor {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: None,
        }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
}

impl Default for ServerColor {
    fn default() -> Self {
        Self::RED
    }
}

/// Fill, line and marker symbology of a server layer or theme.
///
/// Partial objects coming back from the server are completed with the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerStyle {
    pub fill_back_color: ServerColor,
    pub fill_back_opaque: bool,
    pub fill_fore_color: ServerColor,
    pub fill_gradient_mode: FillGradientMode,
    #[serde(serialize_with = "serialize_number")]
    pub fill_gradient_angle: f64,
    #[serde(serialize_with = "serialize_number")]
    pub fill_gradient_offset_ratio_x: f64,
    #[serde(serialize_with = "serialize_number")]
    pub fill_gradient_offset_ratio_y: f64,
    pub fill_opaque_rate: i32,
    #[serde(rename = "fillSymbolID")]
    pub fill_symbol_id: i32,
    pub line_color: ServerColor,
    #[serde(rename = "lineSymbolID")]
    pub line_symbol_id: i32,
    #[serde(serialize_with = "serialize_number")]
    pub line_width: f64,
    #[serde(serialize_with = "serialize_number")]
    pub marker_angle: f64,
    #[serde(serialize_with = "serialize_number")]
    pub marker_size: f64,
    #[serde(rename = "markerSymbolID")]
    pub marker_symbol_id: i32,
}

impl Default for ServerStyle {
    fn default() -> Self {
        Self {
            fill_back_color: ServerColor::WHITE,
            fill_back_opaque: false,
            fill_fore_color: ServerColor::RED,
            fill_gradient_mode: FillGradientMode::None,
            fill_gradient_angle: 0.0,
            fill_gradient_offset_ratio_x: 0.0,
            fill_gradient_offset_ratio_y: 0.0,
            fill_opaque_rate: 100,
            fill_symbol_id: 0,
            line_color: ServerColor::BLACK,
            line_symbol_id: 0,
            line_width: 1.0,
            marker_angle: 0.0,
            marker_size: 1.0,
            marker_symbol_id: -1,
        }
    }
}

impl ServerStyle {
    pub fn marker(symbol_id: i32, size: f64, color: ServerColor) -> Self {
        Self {
            marker_symbol_id: symbol_id,
            marker_size: size,
            line_color: color,
            fill_fore_color: color,
            ..Self::default()
        }
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl ToServerJson for ServerStyle {
    fn to_server_json(&self) -> Result<serde_json::Value> {
        to_server_value(self)
    }
}
