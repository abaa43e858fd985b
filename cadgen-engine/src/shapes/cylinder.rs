use std::f64::consts::FRAC_PI_4;

use cadgen_core::dimension::{
    add_center_cross, add_dimension_line, add_radius_dimension, add_rectangle, add_title,
};
use cadgen_core::geometry::{Point2, Point3};
use cadgen_core::layer::StandardLayer;
use cadgen_core::sink::DrawingSink;

use crate::errors::EngineError;
use crate::extrude::{Solid, SolidModel};
use crate::params::{ShapeParameters, require_positive};
use crate::shapes::{CadObject, ShapeKind, View};

const DIMENSION_OFFSET: f64 = 15.0;
const TITLE_GAP: f64 = 15.0;
/// 中心线超出轮廓的长度。
const CENTER_LINE_OVERSHOOT: f64 = 5.0;

/// 直立圆柱：柱子、管道、圆桌等。俯视为圆，正视与侧视均为矩形。
#[derive(Debug, Default, Clone, Copy)]
pub struct CylinderShape;

impl CylinderShape {
    /// 正视与侧视完全一致，只是图层不同。
    fn draw_elevation(sink: &mut dyn DrawingSink, view: View, params: &ShapeParameters) {
        let radius = params.radius();
        let half_height = params.height / 2.0;
        add_title(sink, view.title(), Point2::new(-radius, half_height + TITLE_GAP));
        add_rectangle(
            sink,
            view.layer(),
            Point2::new(-radius, -half_height),
            Point2::new(radius, half_height),
        );
        sink.add_line(
            Point2::new(0.0, -half_height - CENTER_LINE_OVERSHOOT),
            Point2::new(0.0, half_height + CENTER_LINE_OVERSHOOT),
            StandardLayer::CenterLines,
        );
        add_dimension_line(
            sink,
            Point2::new(-radius, -half_height),
            Point2::new(radius, -half_height),
            DIMENSION_OFFSET,
        );
        add_dimension_line(
            sink,
            Point2::new(-radius, -half_height),
            Point2::new(-radius, half_height),
            DIMENSION_OFFSET,
        );
    }
}

impl CadObject for CylinderShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Cylinder
    }

    fn validate(&self, params: &ShapeParameters) -> Result<(), EngineError> {
        require_positive("diameter", params.diameter)?;
        require_positive("height", params.height)
    }

    fn draw_top_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        let radius = params.radius();
        let center = Point2::new(0.0, 0.0);
        add_title(sink, View::Top.title(), Point2::new(-radius, radius + TITLE_GAP));
        sink.add_circle(center, radius, StandardLayer::TopView);
        add_center_cross(sink, center, radius + CENTER_LINE_OVERSHOOT);
        add_radius_dimension(sink, center, radius, FRAC_PI_4);
        add_dimension_line(
            sink,
            Point2::new(-radius, -radius),
            Point2::new(radius, -radius),
            DIMENSION_OFFSET,
        );
        add_dimension_line(
            sink,
            Point2::new(radius, -radius),
            Point2::new(radius, radius),
            -DIMENSION_OFFSET,
        );
        Ok(())
    }

    fn draw_front_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        Self::draw_elevation(sink, View::Front, params);
        Ok(())
    }

    fn draw_side_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        Self::draw_elevation(sink, View::Side, params);
        Ok(())
    }

    fn extrude(&self, params: &ShapeParameters) -> Result<SolidModel, EngineError> {
        self.validate(params)?;
        Ok(SolidModel::from(vec![Solid::Cylinder {
            base_center: Point3::new(0.0, 0.0, 0.0),
            radius: params.radius(),
            height: params.height,
        }]))
    }
}

#[cfg(test)]
mod tests {
    use cadgen_core::sink::{Drawing, Entity};

    use super::*;

    fn pillar() -> ShapeParameters {
        ShapeParameters {
            diameter: 60.0,
            height: 80.0,
            ..ShapeParameters::defaults_for(ShapeKind::Cylinder)
        }
    }

    #[test]
    fn top_view_has_one_circle_and_center_cross() {
        let mut drawing = Drawing::new();
        CylinderShape.draw_top_view(&mut drawing, &pillar()).unwrap();

        let circles: Vec<_> = drawing
            .entities()
            .filter_map(|(_, entity)| match entity {
                Entity::Circle(circle) => Some(circle),
                _ => None,
            })
            .collect();
        assert_eq!(circles.len(), 1);
        assert!((circles[0].radius - 30.0).abs() < 1e-9);
        assert_eq!(circles[0].layer, StandardLayer::TopView);
        assert_eq!(drawing.layer_entities(StandardLayer::CenterLines).count(), 2);

        let labels: Vec<String> = drawing
            .layer_entities(StandardLayer::Dimensions)
            .filter_map(|entity| match entity {
                Entity::Text(text) => Some(text.content.clone()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"R30".to_string()));
        assert!(labels.contains(&"60".to_string()));
    }

    #[test]
    fn front_and_side_views_match_geometry() {
        let mut front = Drawing::new();
        let mut side = Drawing::new();
        CylinderShape.draw_front_view(&mut front, &pillar()).unwrap();
        CylinderShape.draw_side_view(&mut side, &pillar()).unwrap();

        let front_outline = front
            .layer_bounds(&[StandardLayer::FrontView])
            .expect("front outline");
        let side_outline = side
            .layer_bounds(&[StandardLayer::SideView])
            .expect("side outline");
        assert_eq!(front_outline, side_outline);
        assert!((front_outline.width() - 60.0).abs() < 1e-9);
        assert!((front_outline.height() - 80.0).abs() < 1e-9);
        assert_eq!(front.len(), side.len());
    }

    #[test]
    fn zero_diameter_is_rejected() {
        let params = ShapeParameters {
            diameter: 0.0,
            ..pillar()
        };
        let mut drawing = Drawing::new();
        let err = CylinderShape
            .draw_top_view(&mut drawing, &params)
            .unwrap_err();
        match err {
            EngineError::InvalidParameter { field, .. } => assert_eq!(field, "diameter"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(drawing.is_empty());
    }
}
