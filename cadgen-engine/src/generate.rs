//! 多视图生成与排版。

use std::collections::BTreeMap;

use cadgen_core::geometry::Vector2;
use cadgen_core::layer::StandardLayer;
use cadgen_core::sink::Drawing;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::EngineError;
use crate::params::ShapeParameters;
use crate::registry::{self, ShapeRegistry};
use crate::shapes::{CadObject, ShapeKind, View};

pub const DEFAULT_VIEW_GAP: f64 = 60.0;

/// 三视图在合成图纸中的排版参数。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewLayout {
    /// 相邻视图包围盒之间的间距（厘米）。
    pub gap: f64,
}

impl Default for ViewLayout {
    fn default() -> Self {
        Self {
            gap: DEFAULT_VIEW_GAP,
        }
    }
}

impl ViewLayout {
    pub fn with_gap(gap: f64) -> Self {
        Self { gap }
    }
}

/// 一次生成的结果：每个视图各自一张局部坐标的图纸。
#[derive(Debug, Clone)]
pub struct ViewSet {
    pub kind: ShapeKind,
    pub top: Drawing,
    pub front: Drawing,
    pub side: Drawing,
}

impl ViewSet {
    #[inline]
    pub fn view(&self, view: View) -> &Drawing {
        match view {
            View::Top => &self.top,
            View::Front => &self.front,
            View::Side => &self.side,
        }
    }

    pub fn entity_count(&self) -> usize {
        self.top.len() + self.front.len() + self.side.len()
    }

    /// 三个视图合并后的分图层实体数。
    pub fn layer_counts(&self) -> BTreeMap<StandardLayer, usize> {
        let mut counts: BTreeMap<StandardLayer, usize> =
            StandardLayer::ALL.iter().map(|layer| (*layer, 0)).collect();
        for view in View::ALL {
            for (layer, count) in self.view(view).layer_counts() {
                *counts.entry(layer).or_default() += count;
            }
        }
        counts
    }

    /// 合成一张图纸：俯视图保持原位，正视图放在其下方，侧视图放在正视图右侧。
    pub fn compose(&self, layout: &ViewLayout) -> Drawing {
        let mut sheet = Drawing::new();
        sheet.append_translated(self.top.clone(), Vector2::new(0.0, 0.0));

        let (Some(top), Some(front), Some(side)) =
            (self.top.bounds(), self.front.bounds(), self.side.bounds())
        else {
            sheet.append_translated(self.front.clone(), Vector2::new(0.0, 0.0));
            sheet.append_translated(self.side.clone(), Vector2::new(0.0, 0.0));
            return sheet;
        };

        let dy = (top.min().y() - layout.gap) - front.max().y();
        sheet.append_translated(self.front.clone(), Vector2::new(0.0, dy));
        let dx = front.max().x() + layout.gap - side.min().x();
        sheet.append_translated(self.side.clone(), Vector2::new(dx, dy));
        debug!(dx, dy, entities = sheet.len(), "三视图已合成");
        sheet
    }
}

/// 用进程级注册表解析 `shape_type` 并生成三视图。
pub fn generate(params: &ShapeParameters) -> Result<ViewSet, EngineError> {
    generate_with(registry::registry(), params)
}

pub fn generate_with(
    registry: &ShapeRegistry,
    params: &ShapeParameters,
) -> Result<ViewSet, EngineError> {
    let generator = registry.resolve(&params.shape_type);
    generate_views(generator, params)
}

/// 先整体校验一次，任一视图失败都不返回部分结果。
pub fn generate_views(
    generator: &dyn CadObject,
    params: &ShapeParameters,
) -> Result<ViewSet, EngineError> {
    let kind = generator.kind();
    generator.validate(params)?;

    let mut top = Drawing::new();
    let mut front = Drawing::new();
    let mut side = Drawing::new();
    generator.draw_top_view(&mut top, params)?;
    generator.draw_front_view(&mut front, params)?;
    generator.draw_side_view(&mut side, params)?;

    let views = ViewSet {
        kind,
        top,
        front,
        side,
    };
    info!(
        shape = %kind,
        requested = %params.shape_type,
        entities = views.entity_count(),
        "三视图生成完成"
    );
    Ok(views)
}
