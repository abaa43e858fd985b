use cadgen_core::dimension::{add_dimension_line, add_rectangle, add_title};
use cadgen_core::geometry::{Point2, Point3, Vector3};
use cadgen_core::layer::StandardLayer;
use cadgen_core::sink::DrawingSink;

use crate::errors::EngineError;
use crate::extrude::{Solid, SolidModel};
use crate::params::{ShapeParameters, require_positive};
use crate::shapes::{CadObject, ShapeKind, View};

/// 椅腿中心到座面边缘的内缩量。
const LEG_INSET: f64 = 3.0;
const LEG_RADIUS: f64 = 2.0;
const SEAT_THICKNESS: f64 = 3.0;
/// 靠背高出座面的高度。
const BACKREST_HEIGHT: f64 = 20.0;
const BACKREST_THICKNESS: f64 = 3.0;
/// 座面的最小宽度与深度：两侧椅腿不得相互重叠。
const MIN_SEAT_SPAN: f64 = 2.0 * (LEG_INSET + LEG_RADIUS);

const DIMENSION_OFFSET: f64 = 15.0;
const TITLE_GAP: f64 = 15.0;

/// 带靠背的四腿椅。`height` 表示座面高度，靠背在其上再加 20 cm。
#[derive(Debug, Default, Clone, Copy)]
pub struct ChairShape;

/// 正视/侧视共用的竖直方向量。所有视图以总高的一半为中心。
struct Elevation {
    floor: f64,
    seat_top: f64,
    top: f64,
}

impl Elevation {
    fn new(seat_height: f64) -> Self {
        let total = seat_height + BACKREST_HEIGHT;
        let floor = -total / 2.0;
        Self {
            floor,
            seat_top: floor + seat_height,
            top: total / 2.0,
        }
    }

    #[inline]
    fn seat_bottom(&self) -> f64 {
        self.seat_top - SEAT_THICKNESS
    }
}

impl ChairShape {
    fn leg_centers(params: &ShapeParameters) -> [Point2; 4] {
        let dx = params.width / 2.0 - LEG_INSET;
        let dy = params.length / 2.0 - LEG_INSET;
        [
            Point2::new(-dx, -dy),
            Point2::new(dx, -dy),
            Point2::new(dx, dy),
            Point2::new(-dx, dy),
        ]
    }
}

impl CadObject for ChairShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Chair
    }

    fn validate(&self, params: &ShapeParameters) -> Result<(), EngineError> {
        require_positive("width", params.width)?;
        require_positive("length", params.length)?;
        require_positive("height", params.height)?;
        for (field, value) in [("width", params.width), ("length", params.length)] {
            if value <= MIN_SEAT_SPAN {
                return Err(EngineError::invalid(
                    field,
                    format!("must exceed {MIN_SEAT_SPAN} cm to fit the legs, got {value}"),
                ));
            }
        }
        if params.height <= SEAT_THICKNESS {
            return Err(EngineError::invalid(
                "height",
                format!(
                    "must exceed seat thickness {SEAT_THICKNESS} cm, got {}",
                    params.height
                ),
            ));
        }
        Ok(())
    }

    fn draw_top_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        let half_w = params.width / 2.0;
        let half_l = params.length / 2.0;
        let layer = StandardLayer::TopView;

        add_title(sink, View::Top.title(), Point2::new(-half_w, half_l + TITLE_GAP));
        add_rectangle(
            sink,
            layer,
            Point2::new(-half_w, -half_l),
            Point2::new(half_w, half_l),
        );
        for center in Self::leg_centers(params) {
            sink.add_circle(center, LEG_RADIUS, layer);
        }
        let back_y = half_l - BACKREST_THICKNESS;
        sink.add_line(
            Point2::new(-half_w, back_y),
            Point2::new(half_w, back_y),
            layer,
        );
        add_dimension_line(
            sink,
            Point2::new(-half_w, -half_l),
            Point2::new(half_w, -half_l),
            DIMENSION_OFFSET,
        );
        add_dimension_line(
            sink,
            Point2::new(half_w, -half_l),
            Point2::new(half_w, half_l),
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
        let half_w = params.width / 2.0;
        let elevation = Elevation::new(params.height);
        let layer = StandardLayer::FrontView;

        add_title(
            sink,
            View::Front.title(),
            Point2::new(-half_w, elevation.top + TITLE_GAP),
        );
        add_rectangle(
            sink,
            layer,
            Point2::new(-half_w, elevation.seat_top),
            Point2::new(half_w, elevation.top),
        );
        add_rectangle(
            sink,
            layer,
            Point2::new(-half_w, elevation.seat_bottom()),
            Point2::new(half_w, elevation.seat_top),
        );
        let leg_x = half_w - LEG_INSET;
        for x in [-leg_x, leg_x] {
            sink.add_line(
                Point2::new(x, elevation.floor),
                Point2::new(x, elevation.seat_bottom()),
                layer,
            );
        }
        add_dimension_line(
            sink,
            Point2::new(-half_w, elevation.floor),
            Point2::new(half_w, elevation.floor),
            DIMENSION_OFFSET,
        );
        add_dimension_line(
            sink,
            Point2::new(-half_w, elevation.floor),
            Point2::new(-half_w, elevation.top),
            DIMENSION_OFFSET,
        );
        Ok(())
    }

    fn draw_side_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        let half_l = params.length / 2.0;
        let elevation = Elevation::new(params.height);
        let layer = StandardLayer::SideView;

        add_title(
            sink,
            View::Side.title(),
            Point2::new(-half_l, elevation.top + TITLE_GAP),
        );
        add_rectangle(
            sink,
            layer,
            Point2::new(half_l - BACKREST_THICKNESS, elevation.seat_top),
            Point2::new(half_l, elevation.top),
        );
        add_rectangle(
            sink,
            layer,
            Point2::new(-half_l, elevation.seat_bottom()),
            Point2::new(half_l, elevation.seat_top),
        );
        let leg_x = half_l - LEG_INSET;
        for x in [-leg_x, leg_x] {
            sink.add_line(
                Point2::new(x, elevation.floor),
                Point2::new(x, elevation.seat_bottom()),
                layer,
            );
        }
        add_dimension_line(
            sink,
            Point2::new(-half_l, elevation.floor),
            Point2::new(half_l, elevation.floor),
            DIMENSION_OFFSET,
        );
        add_dimension_line(
            sink,
            Point2::new(-half_l, elevation.floor),
            Point2::new(-half_l, elevation.top),
            DIMENSION_OFFSET,
        );
        add_dimension_line(
            sink,
            Point2::new(half_l, elevation.floor),
            Point2::new(half_l, elevation.seat_top),
            -DIMENSION_OFFSET,
        );
        Ok(())
    }

    fn extrude(&self, params: &ShapeParameters) -> Result<SolidModel, EngineError> {
        self.validate(params)?;
        let half_w = params.width / 2.0;
        let half_l = params.length / 2.0;
        let seat_bottom = params.height - SEAT_THICKNESS;
        let leg_side = LEG_RADIUS * 2.0;

        let mut solids = Vec::with_capacity(6);
        solids.push(Solid::Cuboid {
            min: Point3::new(-half_w, -half_l, seat_bottom),
            size: Vector3::new(params.width, params.length, SEAT_THICKNESS),
        });
        for center in Self::leg_centers(params) {
            solids.push(Solid::Cuboid {
                min: Point3::new(center.x() - LEG_RADIUS, center.y() - LEG_RADIUS, 0.0),
                size: Vector3::new(leg_side, leg_side, seat_bottom),
            });
        }
        solids.push(Solid::Cuboid {
            min: Point3::new(-half_w, half_l - BACKREST_THICKNESS, params.height),
            size: Vector3::new(params.width, BACKREST_THICKNESS, BACKREST_HEIGHT),
        });
        Ok(SolidModel::from(solids))
    }
}
