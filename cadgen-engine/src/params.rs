use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::registry;
use crate::shapes::ShapeKind;

/// 房间墙体方位。平面图中 north 为 +y 边，south 为 -y，east 为 +x，west 为 -x。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    North,
    South,
    East,
    West,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::North, Wall::South, Wall::East, Wall::West];

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Wall::North => "north",
            Wall::South => "south",
            Wall::East => "east",
            Wall::West => "west",
        }
    }

    /// 解析墙体方位，兼容印尼语方位词。
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "north" | "n" | "utara" => Some(Wall::North),
            "south" | "s" | "selatan" => Some(Wall::South),
            "east" | "e" | "timur" => Some(Wall::East),
            "west" | "w" | "barat" => Some(Wall::West),
            _ => None,
        }
    }

    /// north / south 沿 x 方向延伸，east / west 沿 y 方向延伸。
    #[inline]
    pub fn runs_along_x(self) -> bool {
        matches!(self, Wall::North | Wall::South)
    }
}

impl std::fmt::Display for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 门或窗洞口。`offset` 为洞口中心相对墙体中点的有符号距离（沿墙体正方向）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub wall: Wall,
    pub width: f64,
    #[serde(default)]
    pub offset: f64,
}

impl Opening {
    #[inline]
    pub fn new(wall: Wall, width: f64) -> Self {
        Self {
            wall,
            width,
            offset: 0.0,
        }
    }

    #[inline]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }
}

pub const DEFAULT_DOOR_WALL: Wall = Wall::South;
pub const DEFAULT_DOOR_WIDTH: f64 = 80.0;
pub const DEFAULT_WINDOW_WALL: Wall = Wall::North;
pub const DEFAULT_WINDOW_WIDTH: f64 = 100.0;

/// 生成器的输入记录。所有长度单位为厘米，字段均已补齐默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeParameters {
    pub shape_type: String,
    pub width: f64,
    pub length: f64,
    pub height: f64,
    pub diameter: f64,
    #[serde(default)]
    pub doors: Vec<Opening>,
    #[serde(default)]
    pub windows: Vec<Opening>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ShapeParameters {
    /// 按人体工学经验给出的默认尺寸：椅子 40×40×45，桌子/箱体 120×60×75，
    /// 圆柱 Ø100×100，房间 4×5 m、层高 3 m。
    pub fn defaults_for(kind: ShapeKind) -> Self {
        let (width, length, height, diameter) = match kind {
            ShapeKind::Box => (120.0, 60.0, 75.0, 120.0),
            ShapeKind::Cylinder => (100.0, 100.0, 100.0, 100.0),
            ShapeKind::Chair => (40.0, 40.0, 45.0, 40.0),
            ShapeKind::Room => (400.0, 500.0, 300.0, 400.0),
        };
        Self {
            shape_type: kind.key().to_string(),
            width,
            length,
            height,
            diameter,
            doors: Vec::new(),
            windows: Vec::new(),
            description: None,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// 参数摘要：只保留该形状真正使用的尺寸，描述文字不参与。
    pub fn summary(&self, kind: ShapeKind) -> BTreeMap<&'static str, f64> {
        let mut summary = BTreeMap::new();
        match kind {
            ShapeKind::Cylinder => {
                summary.insert("diameter", self.diameter);
                summary.insert("height", self.height);
            }
            ShapeKind::Box | ShapeKind::Chair | ShapeKind::Room => {
                summary.insert("width", self.width);
                summary.insert("length", self.length);
                summary.insert("height", self.height);
            }
        }
        summary
    }
}

/// 原始参数的长度单位。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "mm", alias = "millimeter")]
    Millimeter,
    #[default]
    #[serde(rename = "cm", alias = "centimeter")]
    Centimeter,
    #[serde(rename = "m", alias = "meter")]
    Meter,
}

impl LengthUnit {
    #[inline]
    pub fn to_centimeters(self, value: f64) -> f64 {
        match self {
            LengthUnit::Millimeter => value / 10.0,
            LengthUnit::Centimeter => value,
            LengthUnit::Meter => value * 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOpening {
    pub wall: Option<String>,
    pub width: Option<f64>,
    pub offset: Option<f64>,
}

/// 参数提取方交来的原始记录，任何字段都可能缺失。
///
/// 只有经过 [`RawParameters::normalize`] 之后的 [`ShapeParameters`] 才会交给生成器。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParameters {
    pub shape_type: Option<String>,
    pub unit: Option<LengthUnit>,
    pub width: Option<f64>,
    #[serde(alias = "depth")]
    pub length: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
    pub diameter: Option<f64>,
    pub doors: Option<Vec<RawOpening>>,
    pub windows: Option<Vec<RawOpening>>,
    pub description: Option<String>,
}

impl RawParameters {
    pub fn for_shape(shape_type: impl Into<String>) -> Self {
        Self {
            shape_type: Some(shape_type.into()),
            ..Self::default()
        }
    }

    /// 纯函数：补齐默认值并把长度统一换算为厘米。
    ///
    /// 这里不检查数值正负，非正尺寸交由生成器拒绝；无法识别的墙体方位属于结构错误，
    /// 直接返回 `InvalidParameter`。
    pub fn normalize(self) -> Result<ShapeParameters, EngineError> {
        let shape_type = self
            .shape_type
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ShapeKind::Box.key())
            .to_string();
        let kind = registry::canonical_kind(&shape_type).unwrap_or(ShapeKind::Box);
        let defaults = ShapeParameters::defaults_for(kind);
        let unit = self.unit.unwrap_or_default();
        let scaled = |value: Option<f64>| value.map(|raw| unit.to_centimeters(raw));

        let width = scaled(self.width);
        let diameter = scaled(self.diameter)
            .or_else(|| scaled(self.radius).map(|radius| radius * 2.0))
            .or(if kind == ShapeKind::Cylinder { width } else { None })
            .unwrap_or(defaults.diameter);

        let doors = normalize_openings(
            "doors",
            self.doors,
            unit,
            DEFAULT_DOOR_WALL,
            DEFAULT_DOOR_WIDTH,
        )?;
        let windows = normalize_openings(
            "windows",
            self.windows,
            unit,
            DEFAULT_WINDOW_WALL,
            DEFAULT_WINDOW_WIDTH,
        )?;

        Ok(ShapeParameters {
            shape_type,
            width: width.unwrap_or(defaults.width),
            length: scaled(self.length).unwrap_or(defaults.length),
            height: scaled(self.height).unwrap_or(defaults.height),
            diameter,
            doors,
            windows,
            description: self
                .description
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        })
    }
}

fn normalize_openings(
    field: &str,
    raw: Option<Vec<RawOpening>>,
    unit: LengthUnit,
    default_wall: Wall,
    default_width: f64,
) -> Result<Vec<Opening>, EngineError> {
    raw.unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, opening)| {
            let wall = match opening.wall.as_deref() {
                None => default_wall,
                Some(name) => Wall::parse(name).ok_or_else(|| {
                    EngineError::invalid(
                        format!("{field}[{index}].wall"),
                        format!("unknown wall `{name}`, expected north|south|east|west"),
                    )
                })?,
            };
            Ok(Opening {
                wall,
                width: opening
                    .width
                    .map(|width| unit.to_centimeters(width))
                    .unwrap_or(default_width),
                offset: opening
                    .offset
                    .map(|offset| unit.to_centimeters(offset))
                    .unwrap_or(0.0),
            })
        })
        .collect()
}

/// 校验尺寸为有限正数。
pub fn require_positive(field: &str, value: f64) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::invalid(
            field,
            format!("must be a positive length in centimeters, got {value}"),
        ))
    }
}
