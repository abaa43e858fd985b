use std::f64::consts::FRAC_PI_2;

use cadgen_core::dimension::{add_dimension_line, add_rectangle, add_title};
use cadgen_core::geometry::{Point2, Vector2};
use cadgen_core::layer::StandardLayer;
use cadgen_core::sink::{DrawingSink, normalize_angle};

use crate::errors::EngineError;
use crate::params::{Opening, ShapeParameters, Wall, require_positive};
use crate::shapes::{CadObject, ShapeKind};

const DIMENSION_OFFSET: f64 = 25.0;
const TITLE_GAP: f64 = 25.0;
/// 窗户三线符号中外侧两条线到墙线的距离。
const WINDOW_LINE_SPACING: f64 = 3.0;
const MAX_DOOR_HEIGHT: f64 = 200.0;
const DOOR_HEIGHT_RATIO: f64 = 0.7;
const MAX_WINDOW_HEIGHT: f64 = 100.0;
const WINDOW_HEIGHT_RATIO: f64 = 0.3;
const SILL_HEIGHT_RATIO: f64 = 0.35;
const FIT_TOLERANCE: f64 = 1e-9;

/// 正视图展示的墙。
pub const FRONT_WALL: Wall = Wall::South;
/// 侧视图展示的墙。
pub const SIDE_WALL: Wall = Wall::East;

/// 单层矩形房间，平面图中按墙体方位放置门窗符号。
#[derive(Debug, Default, Clone, Copy)]
pub struct RoomShape;

/// 平面图中一面墙的参考系。
///
/// `start` 为墙线起点，`direction` 沿墙体正方向（+x 或 +y），`inward` 指向房间内部。
/// 洞口中心位于 `start + direction * (len / 2 + offset)`。
#[derive(Debug, Clone, Copy)]
struct WallFrame {
    start: Point2,
    direction: Vector2,
    inward: Vector2,
    length: f64,
}

impl WallFrame {
    fn new(wall: Wall, width: f64, length: f64) -> Self {
        let half_w = width / 2.0;
        let half_l = length / 2.0;
        match wall {
            Wall::North => Self {
                start: Point2::new(-half_w, half_l),
                direction: Vector2::new(1.0, 0.0),
                inward: Vector2::new(0.0, -1.0),
                length: width,
            },
            Wall::South => Self {
                start: Point2::new(-half_w, -half_l),
                direction: Vector2::new(1.0, 0.0),
                inward: Vector2::new(0.0, 1.0),
                length: width,
            },
            Wall::East => Self {
                start: Point2::new(half_w, -half_l),
                direction: Vector2::new(0.0, 1.0),
                inward: Vector2::new(-1.0, 0.0),
                length,
            },
            Wall::West => Self {
                start: Point2::new(-half_w, -half_l),
                direction: Vector2::new(0.0, 1.0),
                inward: Vector2::new(1.0, 0.0),
                length,
            },
        }
    }

    #[inline]
    fn at(&self, along: f64) -> Point2 {
        self.start.translate(self.direction.scale(along))
    }

    /// 洞口两侧门框的位置（沿墙方向递增）。
    fn jambs(&self, opening: &Opening) -> (f64, f64) {
        let center = self.length / 2.0 + opening.offset;
        let half = opening.width / 2.0;
        (center - half, center + half)
    }

    /// 门扇圆弧的逆时针起止角：总是从墙线方向与门扇方向中靠后的那个开始扫 90°。
    fn swing_angles(&self) -> (f64, f64) {
        let cross = self.direction.x() * self.inward.y() - self.direction.y() * self.inward.x();
        let from = if cross > 0.0 {
            self.direction
        } else {
            self.inward
        };
        let start = normalize_angle(from.y().atan2(from.x()));
        (start, start + FRAC_PI_2)
    }
}

impl RoomShape {
    fn draw_door(sink: &mut dyn DrawingSink, frame: &WallFrame, door: &Opening) {
        let (hinge_at, _) = frame.jambs(door);
        let hinge = frame.at(hinge_at);
        let leaf_tip = hinge.translate(frame.inward.scale(door.width));
        sink.add_line(hinge, leaf_tip, StandardLayer::TopView);
        let (start_angle, end_angle) = frame.swing_angles();
        sink.add_arc(
            hinge,
            door.width,
            start_angle,
            end_angle,
            StandardLayer::TopView,
        );
    }

    fn draw_window(sink: &mut dyn DrawingSink, frame: &WallFrame, window: &Opening) {
        let (from, to) = frame.jambs(window);
        for step in [-WINDOW_LINE_SPACING, 0.0, WINDOW_LINE_SPACING] {
            let shift = frame.inward.scale(step);
            sink.add_line(
                frame.at(from).translate(shift),
                frame.at(to).translate(shift),
                StandardLayer::TopView,
            );
        }
    }

    /// 墙体立面：外轮廓加该墙上所有门窗洞口。
    fn draw_elevation(
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
        wall: Wall,
        title: &str,
        layer: StandardLayer,
    ) {
        let span = if wall.runs_along_x() {
            params.width
        } else {
            params.length
        };
        let half_span = span / 2.0;
        let half_h = params.height / 2.0;
        let floor = -half_h;

        add_title(sink, title, Point2::new(-half_span, half_h + TITLE_GAP));
        add_rectangle(
            sink,
            layer,
            Point2::new(-half_span, floor),
            Point2::new(half_span, half_h),
        );

        let door_height = MAX_DOOR_HEIGHT.min(DOOR_HEIGHT_RATIO * params.height);
        for door in params.doors.iter().filter(|door| door.wall == wall) {
            add_rectangle(
                sink,
                layer,
                Point2::new(door.offset - door.width / 2.0, floor),
                Point2::new(door.offset + door.width / 2.0, floor + door_height),
            );
        }
        let window_height = MAX_WINDOW_HEIGHT.min(WINDOW_HEIGHT_RATIO * params.height);
        let sill = floor + SILL_HEIGHT_RATIO * params.height;
        for window in params.windows.iter().filter(|window| window.wall == wall) {
            add_rectangle(
                sink,
                layer,
                Point2::new(window.offset - window.width / 2.0, sill),
                Point2::new(window.offset + window.width / 2.0, sill + window_height),
            );
        }

        add_dimension_line(
            sink,
            Point2::new(-half_span, floor),
            Point2::new(half_span, floor),
            DIMENSION_OFFSET,
        );
        add_dimension_line(
            sink,
            Point2::new(-half_span, floor),
            Point2::new(-half_span, half_h),
            DIMENSION_OFFSET,
        );
    }

    fn validate_openings(
        field: &str,
        openings: &[Opening],
        params: &ShapeParameters,
        is_door: bool,
    ) -> Result<(), EngineError> {
        for (index, opening) in openings.iter().enumerate() {
            let path = format!("{field}[{index}]");
            require_positive(&format!("{path}.width"), opening.width)?;
            if !opening.offset.is_finite() {
                return Err(EngineError::invalid(
                    format!("{path}.offset"),
                    format!("must be finite, got {}", opening.offset),
                ));
            }
            let frame = WallFrame::new(opening.wall, params.width, params.length);
            if opening.offset.abs() + opening.width / 2.0 > frame.length / 2.0 + FIT_TOLERANCE {
                return Err(EngineError::invalid(
                    path,
                    format!(
                        "{} cm opening at offset {} does not fit on the {} cm {} wall",
                        opening.width, opening.offset, frame.length, opening.wall
                    ),
                ));
            }
            let depth = if opening.wall.runs_along_x() {
                params.length
            } else {
                params.width
            };
            if is_door && opening.width > depth + FIT_TOLERANCE {
                return Err(EngineError::invalid(
                    path,
                    format!(
                        "{} cm door on the {} wall cannot swing inside a {} cm deep room",
                        opening.width, opening.wall, depth
                    ),
                ));
            }
        }
        Ok(())
    }
}

impl CadObject for RoomShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Room
    }

    fn validate(&self, params: &ShapeParameters) -> Result<(), EngineError> {
        require_positive("width", params.width)?;
        require_positive("length", params.length)?;
        require_positive("height", params.height)?;
        Self::validate_openings("doors", &params.doors, params, true)?;
        Self::validate_openings("windows", &params.windows, params, false)
    }

    fn draw_top_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        let half_w = params.width / 2.0;
        let half_l = params.length / 2.0;

        add_title(
            sink,
            "FLOOR PLAN (TOP VIEW)",
            Point2::new(-half_w, half_l + TITLE_GAP),
        );
        add_rectangle(
            sink,
            StandardLayer::TopView,
            Point2::new(-half_w, -half_l),
            Point2::new(half_w, half_l),
        );
        for door in &params.doors {
            let frame = WallFrame::new(door.wall, params.width, params.length);
            Self::draw_door(sink, &frame, door);
        }
        for window in &params.windows {
            let frame = WallFrame::new(window.wall, params.width, params.length);
            Self::draw_window(sink, &frame, window);
        }
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
        Self::draw_elevation(
            sink,
            params,
            FRONT_WALL,
            "FRONT ELEVATION (SOUTH WALL)",
            StandardLayer::FrontView,
        );
        Ok(())
    }

    fn draw_side_view(
        &self,
        sink: &mut dyn DrawingSink,
        params: &ShapeParameters,
    ) -> Result<(), EngineError> {
        self.validate(params)?;
        Self::draw_elevation(
            sink,
            params,
            SIDE_WALL,
            "SIDE ELEVATION (EAST WALL)",
            StandardLayer::SideView,
        );
        Ok(())
    }
}
