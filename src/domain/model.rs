use crate::utils::error::ClientError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Writes integral coordinates without a fractional part, the way the server's own clients print numbers.
pub(crate) fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub(crate) fn serialize_optional_number<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_number(value, serializer),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    #[serde(serialize_with = "serialize_number")]
    pub x: f64,
    #[serde(serialize_with = "serialize_number")]
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle in map units. On the wire it is `{"leftBottom":{x,y},"rightTop":{x,y}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "ServerBounds", from = "BoundsRepr")]
pub struct Bounds {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Bounds {
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.top <= self.bottom
    }
}

impl FromStr for Bounds {
    type Err = ClientError;

    /// Parses `left,bottom,right,top`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ClientError::InvalidParameter {
                field: "bounds".to_string(),
                reason: e.to_string(),
            })?;

        match values.as_slice() {
            [left, bottom, right, top] => Ok(Self::new(*left, *bottom, *right, *top)),
            _ => Err(ClientError::InvalidParameter {
                field: "bounds".to_string(),
                reason: format!("expected left,bottom,right,top but got {} values", values.len()),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerBounds {
    left_bottom: Point2D,
    right_top: Point2D,
}

impl From<Bounds> for ServerBounds {
    fn from(bounds: Bounds) -> Self {
        Self {
            left_bottom: Point2D::new(bounds.left, bounds.bottom),
            right_top: Point2D::new(bounds.right, bounds.top),
        }
    }
}

/// Accepted input forms: the server's corner form and the plain edge form used in option bags.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum BoundsRepr {
    Corners(ServerBounds),
    Edges {
        left: f64,
        bottom: f64,
        right: f64,
        top: f64,
    },
}

impl From<BoundsRepr> for Bounds {
    fn from(repr: BoundsRepr) -> Self {
        match repr {
            BoundsRepr::Corners(server) => Self {
                left: server.left_bottom.x,
                bottom: server.left_bottom.y,
                right: server.right_top.x,
                top: server.right_top.y,
            },
            BoundsRepr::Edges {
                left,
                bottom,
                right,
                top,
            } => Self::new(left, bottom, right, top),
        }
    }
}

macro_rules! wire_enum_text {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ClientError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ClientError::InvalidParameter {
                        field: stringify!($name).to_string(),
                        reason: format!("unknown value '{}'", other),
                    }),
                }
            }
        }
    };
}

/// How the server evaluates the query geometry against dataset geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpatialQueryMode {
    #[serde(rename = "NONE")]
    None,
    #[serde(rename = "IDENTITY")]
    Identity,
    #[serde(rename = "DISJOINT")]
    Disjoint,
    #[serde(rename = "INTERSECT")]
    Intersect,
    #[serde(rename = "TOUCH")]
    Touch,
    #[serde(rename = "OVERLAP")]
    Overlap,
    #[serde(rename = "CROSS")]
    Cross,
    #[serde(rename = "WITHIN")]
    Within,
    #[default]
    #[serde(rename = "CONTAIN")]
    Contain,
}

wire_enum_text!(SpatialQueryMode {
    None => "NONE",
    Identity => "IDENTITY",
    Disjoint => "DISJOINT",
    Intersect => "INTERSECT",
    Touch => "TOUCH",
    Overlap => "OVERLAP",
    Cross => "CROSS",
    Within => "WITHIN",
    Contain => "CONTAIN",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GetFeatureMode {
    #[serde(rename = "BOUNDS")]
    Bounds,
    #[serde(rename = "BOUNDS_ATTRIBUTEFILTER")]
    BoundsAttributeFilter,
    #[serde(rename = "ID")]
    Id,
    #[serde(rename = "SQL")]
    Sql,
}

wire_enum_text!(GetFeatureMode {
    Bounds => "BOUNDS",
    BoundsAttributeFilter => "BOUNDS_ATTRIBUTEFILTER",
    Id => "ID",
    Sql => "SQL",
});

/// Kind of server behind the service URL; decides the name of the credential query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServerType {
    #[default]
    Iserver,
    Iportal,
    Online,
}

wire_enum_text!(ServerType {
    Iserver => "ISERVER",
    Iportal => "IPORTAL",
    Online => "ONLINE",
});

impl ServerType {
    pub fn credential_key(&self) -> &'static str {
        match self {
            Self::Iserver | Self::Iportal => "token",
            Self::Online => "key",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinType {
    #[default]
    #[serde(rename = "INNERJOIN")]
    InnerJoin,
    #[serde(rename = "LEFTJOIN")]
    LeftJoin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataReturnMode {
    DatasetOnly,
    #[default]
    RecordsetOnly,
    DatasetAndRecordset,
}

wire_enum_text!(DataReturnMode {
    DatasetOnly => "DATASET_ONLY",
    RecordsetOnly => "RECORDSET_ONLY",
    DatasetAndRecordset => "DATASET_AND_RECORDSET",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FillGradientMode {
    #[default]
    None,
    Linear,
    Radial,
    Conical,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UgcLayerType {
    Theme,
    Vector,
    Grid,
    Image,
}

wire_enum_text!(UgcLayerType {
    Theme => "THEME",
    Vector => "VECTOR",
    Grid => "GRID",
    Image => "IMAGE",
});

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bounds_wire_form() {
        let bounds = Bounds::new(0.0, 0.0, 10.5, 10.0);
        let value = serde_json::to_value(bounds).unwrap();
        assert_eq!(
            value,
            json!({"leftBottom": {"x": 0, "y": 0}, "rightTop": {"x": 10.5, "y": 10}})
        );

        let parsed: Bounds = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, bounds);

        let plain: Bounds =
            serde_json::from_value(json!({"left": 0, "bottom": 0, "right": 10.5, "top": 10})).unwrap();
        assert_eq!(plain, bounds);
    }

    #[test]
    fn test_bounds_from_str() {
        let bounds: Bounds = "-180, -90, 180, 90".parse().unwrap();
        assert_eq!(bounds, Bounds::new(-180.0, -90.0, 180.0, 90.0));
        assert_eq!(bounds.width(), 360.0);
        assert!("1,2,3".parse::<Bounds>().is_err());
        assert!("a,b,c,d".parse::<Bounds>().is_err());
    }

    #[test]
    fn test_enum_text() {
        assert_eq!(SpatialQueryMode::default(), SpatialQueryMode::Contain);
        assert_eq!("intersect".parse::<SpatialQueryMode>().unwrap(), SpatialQueryMode::Intersect);
        assert_eq!(
            serde_json::to_string(&GetFeatureMode::BoundsAttributeFilter).unwrap(),
            "\"BOUNDS_ATTRIBUTEFILTER\""
        );
        assert_eq!(serde_json::to_string(&JoinType::LeftJoin).unwrap(), "\"LEFTJOIN\"");
        assert_eq!(
            serde_json::to_string(&DataReturnMode::DatasetAndRecordset).unwrap(),
            "\"DATASET_AND_RECORDSET\""
        );
        assert_eq!(ServerType::Online.credential_key(), "key");
        assert_eq!("iportal".parse::<ServerType>().unwrap(), ServerType::Iportal);
    }
}
