//! 二维参数到三维实体的映射。
//!
//! 与图纸使用同一套参数与偏移量，长度单位仍为厘米；换算到米（÷100）在网格编码边界完成。

use cadgen_core::geometry::{Point3, Vector3};
use serde::Serialize;
use tracing::debug;

use crate::errors::EngineError;
use crate::params::ShapeParameters;
use crate::registry;

/// 基本实体。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Solid {
    /// 轴对齐长方体，`min` 为最小角点。
    Cuboid { min: Point3, size: Vector3 },
    /// 沿 +z 直立的圆柱，`base_center` 为底面圆心。
    Cylinder {
        base_center: Point3,
        radius: f64,
        height: f64,
    },
}

impl Solid {
    /// 实体在 z 方向的最高点。
    pub fn top(&self) -> f64 {
        match self {
            Solid::Cuboid { min, size } => min.z() + size.z(),
            Solid::Cylinder {
                base_center,
                height,
                ..
            } => base_center.z() + height,
        }
    }

    /// 以厘米立方计的体积。
    pub fn volume(&self) -> f64 {
        match self {
            Solid::Cuboid { size, .. } => size.x() * size.y() * size.z(),
            Solid::Cylinder { radius, height, .. } => {
                std::f64::consts::PI * radius * radius * height
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolidModel {
    pub solids: Vec<Solid>,
}

impl SolidModel {
    #[inline]
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn height(&self) -> f64 {
        self.solids.iter().map(Solid::top).fold(0.0, f64::max)
    }
}

impl From<Vec<Solid>> for SolidModel {
    fn from(solids: Vec<Solid>) -> Self {
        Self { solids }
    }
}

/// 按 `shape_type` 解析生成器并构建实体模型。房间返回 `ExtrusionUnsupported`。
pub fn extrude(params: &ShapeParameters) -> Result<SolidModel, EngineError> {
    let generator = registry::resolve(&params.shape_type);
    let model = generator.extrude(params)?;
    debug!(
        shape = %generator.kind(),
        solids = model.len(),
        height = model.height(),
        "已构建三维实体"
    );
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RawParameters;
    use crate::shapes::ShapeKind;

    #[test]
    fn extrusion_follows_resolved_shape() {
        let stool = RawParameters::for_shape("bangku").normalize().unwrap();
        assert_eq!(extrude(&stool).unwrap().len(), 6);

        let pipe = RawParameters {
            radius: Some(10.0),
            height: Some(200.0),
            ..RawParameters::for_shape("pipa")
        }
        .normalize()
        .unwrap();
        let model = extrude(&pipe).unwrap();
        assert_eq!(model.len(), 1);
        assert!((model.height() - 200.0).abs() < 1e-9);
        assert!((model.solids[0].volume() - std::f64::consts::PI * 100.0 * 200.0).abs() < 1e-6);
    }

    #[test]
    fn room_cannot_be_extruded() {
        let room = ShapeParameters::defaults_for(ShapeKind::Room);
        assert!(matches!(
            extrude(&room),
            Err(EngineError::ExtrusionUnsupported(ShapeKind::Room))
        ));
    }

    #[test]
    fn solids_serialize_with_type_tag() {
        let model = extrude(&ShapeParameters::defaults_for(ShapeKind::Box)).unwrap();
        let json = serde_json::to_value(&model).expect("serialize model");
        assert_eq!(json["solids"][0]["type"], "cuboid");
    }
}
