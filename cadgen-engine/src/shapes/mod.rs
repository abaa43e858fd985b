//! 形状生成器：每种形状实现 [`CadObject`]，在各自独立的局部坐标系中绘制三视图。

mod box_shape;
mod chair;
mod cylinder;
mod room;

pub use box_shape::BoxShape;
pub use chair::ChairShape;
pub use cylinder::CylinderShape;
pub use room::RoomShape;

use cadgen_core::layer::StandardLayer;
use cadgen_core::sink::DrawingSink;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::extrude::SolidModel;
use crate::params::ShapeParameters;

/// 已注册形状的规范键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Box,
    Cylinder,
    Chair,
    Room,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Box,
        ShapeKind::Cylinder,
        ShapeKind::Chair,
        ShapeKind::Room,
    ];

    #[inline]
    pub fn key(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Chair => "chair",
            ShapeKind::Room => "room",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// 三个固定的正投影视图。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Top,
    Front,
    Side,
}

impl View {
    pub const ALL: [View; 3] = [View::Top, View::Front, View::Side];

    /// 视图几何所在的主图层。
    #[inline]
    pub fn layer(self) -> StandardLayer {
        match self {
            View::Top => StandardLayer::TopView,
            View::Front => StandardLayer::FrontView,
            View::Side => StandardLayer::SideView,
        }
    }

    #[inline]
    pub fn title(self) -> &'static str {
        match self {
            View::Top => "TOP VIEW",
            View::Front => "FRONT VIEW",
            View::Side => "SIDE VIEW",
        }
    }
}

/// 所有可绘制形状的契约。
///
/// 实现必须是无状态的：参数随每次调用传入，同一实例可在并发请求间共享。
/// 每个 `draw_*` 在追加任何实体之前先调用 [`CadObject::validate`]，
/// 失败时画布保持为空。每个视图都以自身局部原点 (0, 0) 为中心绘制，
/// 视图之间的排版由下游负责。
pub trait CadObject: Send + Sync {
    fn kind(&self) -> ShapeKind;

    fn validate(&self, params: &ShapeParameters) -> Result<(), EngineError>;

    fn draw_top_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError>;

    fn draw_front_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError>;

    fn draw_side_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError>;

    fn draw_view(
        &self,
        view: View,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        match view {
            View::Top => self.draw_top_view(sink, params),
            View::Front => self.draw_front_view(sink, params),
            View::Side => self.draw_side_view(sink, params),
        }
    }

    /// 三维拉伸映射，结果仍以厘米为单位。默认不支持。
    fn extrude(&self, params: &ShapeParameters) -> Result<SolidModel, EngineError> {
        let _ = params;
        Err(EngineError::ExtrusionUnsupported(self.kind()))
    }
}

impl std::fmt::Debug for dyn CadObject + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CadObject")
            .field("kind", &self.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_layers_are_distinct() {
        let layers: Vec<_> = View::ALL.iter().map(|view| view.layer()).collect();
        assert_eq!(
            layers,
            vec![
                StandardLayer::TopView,
                StandardLayer::FrontView,
                StandardLayer::SideView
            ]
        );
        assert_eq!(View::Front.title(), "FRONT VIEW");
    }

    #[test]
    fn shape_kind_keys_round_trip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ShapeKind::from_key("l_shape"), None);
    }
}
