use cadgen_core::dimension::{add_dimension_line, add_rectangle, add_title};
use cadgen_core::geometry::{Point2, Point3, Vector3};
use cadgen_core::sink::DrawingSink;

use crate::errors::EngineError;
use crate::extrude::{Solid, SolidModel};
use crate::params::{ShapeParameters, require_positive};
use crate::shapes::{CadObject, ShapeKind, View};

const DIMENSION_OFFSET: f64 = 15.0;
const TITLE_GAP: f64 = 15.0;

/// 实心长方体：桌子、柜子以及所有无法识别的形状都落到这里。
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxShape;

impl BoxShape {
    /// 以原点为中心画 `horizontal × vertical` 的矩形及两条尺寸线。
    /// `vertical_on_right` 控制竖直尺寸放在右侧还是左侧。
    fn draw_block(
        sink: &mut dyn DrawingSink,
        view: View,
        horizontal: f64,
        vertical: f64,
        vertical_on_right: bool,
    ) {
        let half_h = horizontal / 2.0;
        let half_v = vertical / 2.0;
        add_title(sink, view.title(), Point2::new(-half_h, half_v + TITLE_GAP));
        add_rectangle(
            sink,
            view.layer(),
            Point2::new(-half_h, -half_v),
            Point2::new(half_h, half_v),
        );
        add_dimension_line(
            sink,
            Point2::new(-half_h, -half_v),
            Point2::new(half_h, -half_v),
            DIMENSION_OFFSET,
        );
        if vertical_on_right {
            add_dimension_line(
                sink,
                Point2::new(half_h, -half_v),
                Point2::new(half_h, half_v),
                -DIMENSION_OFFSET,
            );
        } else {
            add_dimension_line(
                sink,
                Point2::new(-half_h, -half_v),
                Point2::new(-half_h, half_v),
                DIMENSION_OFFSET,
            );
        }
    }
}

impl CadObject for BoxShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Box
    }

    fn validate(&self, params: &ShapeParameters) -> Result<(), EngineError> {
        require_positive("width", params.width)?;
        require_positive("length", params.length)?;
        require_positive("height", params.height)
    }

    fn draw_top_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        Self::draw_block(sink, View::Top, params.width, params.length, true);
        Ok(())
    }

    fn draw_front_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        Self::draw_block(sink, View::Front, params.width, params.height, false);
        Ok(())
    }

    fn draw_side_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        Self::draw_block(sink, View::Side, params.length, params.height, true);
        Ok(())
    }

    fn extrude(&self, params: &ShapeParameters) -> Result<SolidModel, EngineError> {
        self.validate(params)?;
        Ok(SolidModel::from(vec![Solid::Cuboid {
            min: Point3::new(-params.width / 2.0, -params.length / 2.0, 0.0),
            size: Vector3::new(params.width, params.length, params.height),
        }]))
    }
}

#[cfg(test)]
mod tests {
    use cadgen_core::layer::StandardLayer;
    use cadgen_core::sink::{Drawing, Entity};

    use super::*;

    fn table() -> ShapeParameters {
        ShapeParameters::defaults_for(ShapeKind::Box)
    }

    #[test]
    fn top_view_is_centered_rectangle_with_two_dimensions() {
        let mut drawing = Drawing::new();
        BoxShape.draw_top_view(&mut drawing, &table()).unwrap();

        let outlines: Vec<_> = drawing.layer_entities(StandardLayer::TopView).collect();
        assert_eq!(outlines.len(), 1);
        match outlines[0] {
            Entity::Polyline(polyline) => {
                assert!(polyline.is_closed);
                assert_eq!(polyline.vertices.len(), 4);
            }
            other => panic!("expected outline polyline, got {other:?}"),
        }
        let bounds = drawing
            .layer_bounds(&[StandardLayer::TopView])
            .expect("outline bounds");
        assert!((bounds.min().x() + 60.0).abs() < 1e-9);
        assert!((bounds.max().y() - 30.0).abs() < 1e-9);
        assert!((bounds.center().x()).abs() < 1e-9);
        assert!((bounds.center().y()).abs() < 1e-9);

        let labels: Vec<String> = drawing
            .layer_entities(StandardLayer::Dimensions)
            .filter_map(|entity| match entity {
                Entity::Text(text) => Some(text.content.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["120".to_string(), "60".to_string()]);
    }

    #[test]
    fn side_view_uses_length_and_height() {
        let mut drawing = Drawing::new();
        BoxShape.draw_side_view(&mut drawing, &table()).unwrap();
        let bounds = drawing
            .layer_bounds(&[StandardLayer::SideView])
            .expect("side bounds");
        assert!((bounds.width() - 60.0).abs() < 1e-9);
        assert!((bounds.height() - 75.0).abs() < 1e-9);
        assert_eq!(drawing.layer_entities(StandardLayer::FrontView).count(), 0);
    }

    #[test]
    fn negative_width_leaves_sink_empty() {
        let params = ShapeParameters {
            width: -5.0,
            ..table()
        };
        for view in View::ALL {
            let mut drawing = Drawing::new();
            let err = BoxShape.draw_view(view, &mut drawing, &params).unwrap_err();
            assert!(matches!(err, EngineError::InvalidParameter { .. }));
            assert!(drawing.is_empty());
        }
    }

    #[test]
    fn extrusion_is_single_cuboid_on_floor() {
        let model = BoxShape.extrude(&table()).unwrap();
        assert_eq!(model.solids.len(), 1);
        match &model.solids[0] {
            Solid::Cuboid { min, size } => {
                assert!((min.z()).abs() < 1e-9);
                assert!((size.x() - 120.0).abs() < 1e-9);
                assert!((size.z() - 75.0).abs() < 1e-9);
            }
            other => panic!("expected cuboid, got {other:?}"),
        }
    }
}
