pub mod geometry {
    use glam::{DVec2, DVec3};
    use serde::{Deserialize, Serialize};

    /// 二维点，内部以 `glam::DVec2` 表示。所有图纸坐标单位均为厘米。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point2(pub DVec2);

    impl Point2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        #[inline]
        pub fn from_vec(vec: DVec2) -> Self {
            Self(vec)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn translate(self, offset: Vector2) -> Self {
            Self(self.0 + offset.0)
        }

        #[inline]
        pub fn distance(self, other: Point2) -> f64 {
            self.0.distance(other.0)
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }
    }

    impl From<DVec2> for Point2 {
        fn from(value: DVec2) -> Self {
            Self::from_vec(value)
        }
    }

    /// 二维向量。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Vector2(pub DVec2);

    impl Vector2 {
        #[inline]
        pub fn new(x: f64, y: f64) -> Self {
            Self(DVec2::new(x, y))
        }

        #[inline]
        pub fn from_points(start: Point2, end: Point2) -> Self {
            Self(end.0 - start.0)
        }

        #[inline]
        pub fn length(self) -> f64 {
            self.0.length()
        }

        #[inline]
        pub fn scale(self, factor: f64) -> Self {
            Self(self.0 * factor)
        }

        #[inline]
        pub fn as_vec2(self) -> DVec2 {
            self.0
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }
    }

    impl From<DVec2> for Vector2 {
        fn from(value: DVec2) -> Self {
            Self(value)
        }
    }

    /// 三维点，供拉伸实体使用（单位仍为厘米）。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point3(pub DVec3);

    impl Point3 {
        #[inline]
        pub fn new(x: f64, y: f64, z: f64) -> Self {
            Self(DVec3::new(x, y, z))
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.z
        }

        #[inline]
        pub fn as_vec3(self) -> DVec3 {
            self.0
        }
    }

    impl From<DVec3> for Point3 {
        fn from(value: DVec3) -> Self {
            Self(value)
        }
    }

    /// 三维向量，用于描述长方体尺寸与法向。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Vector3(pub DVec3);

    impl Vector3 {
        #[inline]
        pub fn new(x: f64, y: f64, z: f64) -> Self {
            Self(DVec3::new(x, y, z))
        }

        #[inline]
        pub fn as_vec3(self) -> DVec3 {
            self.0
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.z
        }

        #[inline]
        pub fn normalize(self) -> Option<Self> {
            let len = self.0.length();
            if len <= f64::EPSILON {
                None
            } else {
                Some(Self(self.0 / len))
            }
        }

        #[inline]
        pub fn cross(self, other: Vector3) -> Vector3 {
            Self(self.0.cross(other.0))
        }
    }

    impl From<DVec3> for Vector3 {
        fn from(value: DVec3) -> Self {
            Self(value)
        }
    }

    /// 轴对齐边界框，用于视图排版与预览缩放。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Bounds2D {
        min: Point2,
        max: Point2,
    }

    impl Bounds2D {
        #[inline]
        pub fn new(min: Point2, max: Point2) -> Self {
            Self { min, max }
        }

        #[inline]
        pub fn empty() -> Self {
            Self {
                min: Point2::new(f64::INFINITY, f64::INFINITY),
                max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            }
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.min.x() > self.max.x() || self.min.y() > self.max.y()
        }

        #[inline]
        pub fn min(&self) -> Point2 {
            self.min
        }

        #[inline]
        pub fn max(&self) -> Point2 {
            self.max
        }

        #[inline]
        pub fn width(&self) -> f64 {
            self.max.x() - self.min.x()
        }

        #[inline]
        pub fn height(&self) -> f64 {
            self.max.y() - self.min.y()
        }

        pub fn include_point(&mut self, point: Point2) {
            if self.is_empty() {
                self.min = point;
                self.max = point;
                return;
            }
            let min_vec = self.min.as_vec2().min(point.as_vec2());
            let max_vec = self.max.as_vec2().max(point.as_vec2());
            self.min = Point2::from_vec(min_vec);
            self.max = Point2::from_vec(max_vec);
        }

        pub fn include_bounds(&mut self, other: &Bounds2D) {
            if other.is_empty() {
                return;
            }
            self.include_point(other.min);
            self.include_point(other.max);
        }

        /// 判断点是否位于边界框内（含边界，允许 `tolerance` 误差）。
        pub fn contains(&self, point: Point2, tolerance: f64) -> bool {
            !self.is_empty()
                && point.x() >= self.min.x() - tolerance
                && point.x() <= self.max.x() + tolerance
                && point.y() >= self.min.y() - tolerance
                && point.y() <= self.max.y() + tolerance
        }

        #[inline]
        pub fn center(&self) -> Point2 {
            debug_assert!(!self.is_empty());
            let center = (self.min.as_vec2() + self.max.as_vec2()) * 0.5;
            Point2::from_vec(center)
        }
    }
}

pub mod layer {
    use serde::{Deserialize, Serialize};

    /// 标准图层词表。编码器（DXF / SVG）必须统一使用此处的颜色。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    pub enum StandardLayer {
        TopView,
        FrontView,
        SideView,
        Dimensions,
        Annotations,
        CenterLines,
    }

    impl StandardLayer {
        pub const ALL: [StandardLayer; 6] = [
            StandardLayer::TopView,
            StandardLayer::FrontView,
            StandardLayer::SideView,
            StandardLayer::Dimensions,
            StandardLayer::Annotations,
            StandardLayer::CenterLines,
        ];

        #[inline]
        pub fn name(self) -> &'static str {
            match self {
                StandardLayer::TopView => "TOP_VIEW",
                StandardLayer::FrontView => "FRONT_VIEW",
                StandardLayer::SideView => "SIDE_VIEW",
                StandardLayer::Dimensions => "DIMENSIONS",
                StandardLayer::Annotations => "ANNOTATIONS",
                StandardLayer::CenterLines => "CENTER_LINES",
            }
        }

        /// AutoCAD 颜色索引（ACI）。
        #[inline]
        pub fn aci_color(self) -> i16 {
            match self {
                StandardLayer::TopView => 7,
                StandardLayer::FrontView => 5,
                StandardLayer::SideView => 4,
                StandardLayer::Dimensions => 1,
                StandardLayer::Annotations => 3,
                StandardLayer::CenterLines => 2,
            }
        }

        /// 预览（深色背景）使用的十六进制颜色，与 ACI 色相一一对应。
        #[inline]
        pub fn preview_color(self) -> &'static str {
            match self {
                StandardLayer::TopView => "#e2e8f0",
                StandardLayer::FrontView => "#93c5fd",
                StandardLayer::SideView => "#22d3ee",
                StandardLayer::Dimensions => "#f87171",
                StandardLayer::Annotations => "#4ade80",
                StandardLayer::CenterLines => "#fbbf24",
            }
        }

        /// 中心线图层使用点划线，其余为实线。
        #[inline]
        pub fn linetype(self) -> &'static str {
            match self {
                StandardLayer::CenterLines => "CENTER",
                _ => "CONTINUOUS",
            }
        }
    }

    impl std::fmt::Display for StandardLayer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.name())
        }
    }
}

pub mod sink {
    use std::collections::BTreeMap;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use serde::{Deserialize, Serialize};

    use crate::geometry::{Bounds2D, Point2, Vector2};
    use crate::layer::StandardLayer;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EntityId(u64);

    impl EntityId {
        #[inline]
        pub fn new(raw: u64) -> Self {
            Self(raw)
        }

        /// 提供原始数值，便于序列化或日志输出。
        #[inline]
        pub fn get(self) -> u64 {
            self.0
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub enum Entity {
        Line(Line),
        Circle(Circle),
        Arc(Arc),
        Polyline(Polyline),
        Text(Text),
    }

    impl Entity {
        #[inline]
        pub fn layer(&self) -> StandardLayer {
            match self {
                Entity::Line(line) => line.layer,
                Entity::Circle(circle) => circle.layer,
                Entity::Arc(arc) => arc.layer,
                Entity::Polyline(polyline) => polyline.layer,
                Entity::Text(text) => text.layer,
            }
        }

        #[inline]
        pub fn kind_name(&self) -> &'static str {
            match self {
                Entity::Line(_) => "line",
                Entity::Circle(_) => "circle",
                Entity::Arc(_) => "arc",
                Entity::Polyline(_) => "polyline",
                Entity::Text(_) => "text",
            }
        }

        /// 计算实体的 2D 轴对齐范围，文字退化为插入点。
        pub fn bounds(&self) -> Option<Bounds2D> {
            let mut bounds = Bounds2D::empty();
            match self {
                Entity::Line(line) => {
                    bounds.include_point(line.start);
                    bounds.include_point(line.end);
                }
                Entity::Circle(circle) => {
                    let radius = circle.radius.abs();
                    let center = circle.center;
                    bounds.include_point(Point2::new(center.x() - radius, center.y() - radius));
                    bounds.include_point(Point2::new(center.x() + radius, center.y() + radius));
                }
                Entity::Arc(arc) => arc_bounds(arc, &mut bounds),
                Entity::Polyline(polyline) => {
                    for vertex in &polyline.vertices {
                        bounds.include_point(*vertex);
                    }
                }
                Entity::Text(text) => bounds.include_point(text.insert),
            }
            if bounds.is_empty() { None } else { Some(bounds) }
        }

        /// 返回平移后的副本；原实体保持不变。
        pub fn translated(&self, offset: Vector2) -> Entity {
            match self {
                Entity::Line(line) => Entity::Line(Line {
                    start: line.start.translate(offset),
                    end: line.end.translate(offset),
                    layer: line.layer,
                }),
                Entity::Circle(circle) => Entity::Circle(Circle {
                    center: circle.center.translate(offset),
                    ..circle.clone()
                }),
                Entity::Arc(arc) => Entity::Arc(Arc {
                    center: arc.center.translate(offset),
                    ..arc.clone()
                }),
                Entity::Polyline(polyline) => Entity::Polyline(Polyline {
                    vertices: polyline
                        .vertices
                        .iter()
                        .map(|vertex| vertex.translate(offset))
                        .collect(),
                    is_closed: polyline.is_closed,
                    layer: polyline.layer,
                }),
                Entity::Text(text) => Entity::Text(Text {
                    insert: text.insert.translate(offset),
                    ..text.clone()
                }),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Line {
        pub start: Point2,
        pub end: Point2,
        pub layer: StandardLayer,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Circle {
        pub center: Point2,
        pub radius: f64,
        pub layer: StandardLayer,
    }

    /// 圆弧实体，角度以弧度形式储存，自起始角逆时针扫到结束角。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Arc {
        pub center: Point2,
        pub radius: f64,
        pub start_angle: f64,
        pub end_angle: f64,
        pub layer: StandardLayer,
    }

    impl Arc {
        #[inline]
        pub fn start_point(&self) -> Point2 {
            arc_point(self.center, self.radius, self.start_angle)
        }

        #[inline]
        pub fn end_point(&self) -> Point2 {
            arc_point(self.center, self.radius, self.end_angle)
        }

        /// 逆时针扫过的角度（弧度）。
        #[inline]
        pub fn sweep(&self) -> f64 {
            let (start, end) = canonical_interval(self.start_angle, self.end_angle);
            end - start
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Polyline {
        pub vertices: Vec<Point2>,
        pub is_closed: bool,
        pub layer: StandardLayer,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Text {
        pub insert: Point2,
        pub content: String,
        pub height: f64,
        pub layer: StandardLayer,
    }

    /// 绘图目标的最小契约。每个方法恰好追加一个实体，实体一经追加不再修改。
    ///
    /// 形状生成器只依赖此 trait，因此可以把同一套视图画进 DXF、SVG 预览或其它记录器。
    pub trait DrawingSink {
        fn add_line(&mut self, start: Point2, end: Point2, layer: StandardLayer) -> EntityId;

        fn add_circle(&mut self, center: Point2, radius: f64, layer: StandardLayer) -> EntityId;

        fn add_arc(
            &mut self,
            center: Point2,
            radius: f64,
            start_angle: f64,
            end_angle: f64,
            layer: StandardLayer,
        ) -> EntityId;

        fn add_polyline(
            &mut self,
            vertices: Vec<Point2>,
            is_closed: bool,
            layer: StandardLayer,
        ) -> EntityId;

        fn add_text(
            &mut self,
            insert: Point2,
            content: &str,
            height: f64,
            layer: StandardLayer,
        ) -> EntityId;
    }

    /// 单次生成请求内的实体集合，生命周期为一次请求。
    #[derive(Debug, Default, Clone, Serialize, Deserialize)]
    pub struct Drawing {
        entities: Vec<(EntityId, Entity)>,
        next_entity_id: u64,
    }

    impl Drawing {
        pub fn new() -> Self {
            Self::default()
        }

        #[inline]
        pub fn entities(&self) -> impl Iterator<Item = &(EntityId, Entity)> {
            self.entities.iter()
        }

        #[inline]
        pub fn len(&self) -> usize {
            self.entities.len()
        }

        #[inline]
        pub fn is_empty(&self) -> bool {
            self.entities.is_empty()
        }

        pub fn entity(&self, id: EntityId) -> Option<&Entity> {
            self.entities
                .iter()
                .find(|(entity_id, _)| *entity_id == id)
                .map(|(_, entity)| entity)
        }

        pub fn layer_entities(&self, layer: StandardLayer) -> impl Iterator<Item = &Entity> {
            self.entities
                .iter()
                .map(|(_, entity)| entity)
                .filter(move |entity| entity.layer() == layer)
        }

        /// 按标准图层分组。六个图层总会出现在结果中，空图层对应空列表。
        pub fn entities_by_layer(&self) -> BTreeMap<StandardLayer, Vec<&Entity>> {
            let mut grouped: BTreeMap<StandardLayer, Vec<&Entity>> = StandardLayer::ALL
                .into_iter()
                .map(|layer| (layer, Vec::new()))
                .collect();
            for (_, entity) in &self.entities {
                grouped.entry(entity.layer()).or_default().push(entity);
            }
            grouped
        }

        pub fn layer_counts(&self) -> BTreeMap<StandardLayer, usize> {
            self.entities_by_layer()
                .into_iter()
                .map(|(layer, entities)| (layer, entities.len()))
                .collect()
        }

        pub fn bounds(&self) -> Option<Bounds2D> {
            let mut bounds = Bounds2D::empty();
            let mut has = false;
            for (_, entity) in &self.entities {
                if let Some(entity_bounds) = entity.bounds() {
                    bounds.include_bounds(&entity_bounds);
                    has = true;
                }
            }
            if has { Some(bounds) } else { None }
        }

        /// 仅统计指定图层的范围，排版时用于忽略标注与文字。
        pub fn layer_bounds(&self, layers: &[StandardLayer]) -> Option<Bounds2D> {
            let mut bounds = Bounds2D::empty();
            let mut has = false;
            for (_, entity) in &self.entities {
                if !layers.contains(&entity.layer()) {
                    continue;
                }
                if let Some(entity_bounds) = entity.bounds() {
                    bounds.include_bounds(&entity_bounds);
                    has = true;
                }
            }
            if has { Some(bounds) } else { None }
        }

        /// 把另一份图纸的实体整体平移后追加进来，重新分配 ID。
        pub fn append_translated(&mut self, other: Drawing, offset: Vector2) {
            for (_, entity) in other.entities {
                let moved = entity.translated(offset);
                self.push(moved);
            }
        }

        fn push(&mut self, entity: Entity) -> EntityId {
            let id = self.next_id();
            self.entities.push((id, entity));
            id
        }

        #[inline]
        fn next_id(&mut self) -> EntityId {
            let id = self.next_entity_id;
            self.next_entity_id += 1;
            EntityId(id)
        }
    }

    impl DrawingSink for Drawing {
        fn add_line(&mut self, start: Point2, end: Point2, layer: StandardLayer) -> EntityId {
            self.push(Entity::Line(Line { start, end, layer }))
        }

        fn add_circle(&mut self, center: Point2, radius: f64, layer: StandardLayer) -> EntityId {
            self.push(Entity::Circle(Circle {
                center,
                radius,
                layer,
            }))
        }

        fn add_arc(
            &mut self,
            center: Point2,
            radius: f64,
            start_angle: f64,
            end_angle: f64,
            layer: StandardLayer,
        ) -> EntityId {
            self.push(Entity::Arc(Arc {
                center,
                radius,
                start_angle,
                end_angle,
                layer,
            }))
        }

        fn add_polyline(
            &mut self,
            vertices: Vec<Point2>,
            is_closed: bool,
            layer: StandardLayer,
        ) -> EntityId {
            self.push(Entity::Polyline(Polyline {
                vertices,
                is_closed,
                layer,
            }))
        }

        fn add_text(
            &mut self,
            insert: Point2,
            content: &str,
            height: f64,
            layer: StandardLayer,
        ) -> EntityId {
            self.push(Entity::Text(Text {
                insert,
                content: content.to_string(),
                height,
                layer,
            }))
        }
    }

    pub fn normalize_angle(angle: f64) -> f64 {
        let mut result = angle % TAU;
        if result < 0.0 {
            result += TAU;
        }
        result
    }

    fn canonical_interval(start: f64, end: f64) -> (f64, f64) {
        let start = normalize_angle(start);
        let mut end = normalize_angle(end);
        if (end - start).abs() < 1e-9 {
            end = start + TAU;
        } else if end < start {
            end += TAU;
        }
        (start, end)
    }

    pub fn arc_point(center: Point2, radius: f64, angle: f64) -> Point2 {
        let offset = Vector2::new(radius * angle.cos(), radius * angle.sin());
        center.translate(offset)
    }

    fn arc_bounds(arc: &Arc, bounds: &mut Bounds2D) {
        let radius = arc.radius.abs();
        if radius <= f64::EPSILON {
            bounds.include_point(arc.center);
            return;
        }

        let (start, end) = canonical_interval(arc.start_angle, arc.end_angle);
        bounds.include_point(arc_point(arc.center, radius, start));
        bounds.include_point(arc_point(arc.center, radius, end));

        const QUADRANTS: [f64; 4] = [0.0, FRAC_PI_2, PI, FRAC_PI_2 * 3.0];
        for base in QUADRANTS {
            let mut candidate = base;
            while candidate < start {
                candidate += TAU;
            }
            if candidate <= end {
                bounds.include_point(arc_point(arc.center, radius, candidate));
            }
        }
    }

}

pub mod dimension {
    //! 尺寸线、标题与常用符号的绘制助手。所有输出都落在固定的标准图层上。

    use crate::geometry::{Point2, Vector2};
    use crate::layer::StandardLayer;
    use crate::sink::DrawingSink;

    pub const TITLE_HEIGHT: f64 = 5.0;
    pub const DIMENSION_TEXT_HEIGHT: f64 = 3.0;
    /// 水平尺寸文字相对尺寸线的下移距离。
    const HORIZONTAL_TEXT_GAP: f64 = 5.0;
    /// 竖直尺寸文字相对尺寸线的左移距离。
    const VERTICAL_TEXT_GAP: f64 = 8.0;

    /// 在 ANNOTATIONS 图层写入视图标题。
    pub fn add_title<S: DrawingSink + ?Sized>(sink: &mut S, text: &str, position: Point2) {
        sink.add_text(position, text, TITLE_HEIGHT, StandardLayer::Annotations);
    }

    /// 画一个闭合矩形（单条四点多段线）。
    pub fn add_rectangle<S: DrawingSink + ?Sized>(
        sink: &mut S,
        layer: StandardLayer,
        min: Point2,
        max: Point2,
    ) {
        sink.add_polyline(
            vec![
                Point2::new(min.x(), min.y()),
                Point2::new(max.x(), min.y()),
                Point2::new(max.x(), max.y()),
                Point2::new(min.x(), max.y()),
            ],
            true,
            layer,
        );
    }

    /// 简易线性尺寸：一条尺寸线、两条尺寸界线与数值文字，共四个实体。
    ///
    /// 主方向由 `start -> end` 决定：|dx| > |dy| 视为水平尺寸，尺寸线放在
    /// `start.y - offset`；否则为竖直尺寸，放在 `start.x - offset`。
    /// 负的 `offset` 会把尺寸线放到另一侧。返回测得的长度。
    pub fn add_dimension_line<S: DrawingSink + ?Sized>(
        sink: &mut S,
        start: Point2,
        end: Point2,
        offset: f64,
    ) -> f64 {
        let delta = Vector2::from_points(start, end);
        let length = delta.length();
        let label = format_length(length);
        let layer = StandardLayer::Dimensions;

        if delta.x().abs() > delta.y().abs() {
            let y_off = start.y() - offset;
            sink.add_line(
                Point2::new(start.x(), y_off),
                Point2::new(end.x(), y_off),
                layer,
            );
            sink.add_line(start, Point2::new(start.x(), y_off), layer);
            sink.add_line(end, Point2::new(end.x(), y_off), layer);
            let mid_x = (start.x() + end.x()) / 2.0;
            sink.add_text(
                Point2::new(mid_x, y_off - HORIZONTAL_TEXT_GAP),
                &label,
                DIMENSION_TEXT_HEIGHT,
                layer,
            );
        } else {
            let x_off = start.x() - offset;
            sink.add_line(
                Point2::new(x_off, start.y()),
                Point2::new(x_off, end.y()),
                layer,
            );
            sink.add_line(start, Point2::new(x_off, start.y()), layer);
            sink.add_line(end, Point2::new(x_off, end.y()), layer);
            let mid_y = (start.y() + end.y()) / 2.0;
            sink.add_text(
                Point2::new(x_off - VERTICAL_TEXT_GAP, mid_y),
                &label,
                DIMENSION_TEXT_HEIGHT,
                layer,
            );
        }
        length
    }

    /// 半径标注：从圆心沿 `angle` 方向引到圆周的引线，加上 `R..` 文字。
    pub fn add_radius_dimension<S: DrawingSink + ?Sized>(
        sink: &mut S,
        center: Point2,
        radius: f64,
        angle: f64,
    ) {
        let direction = Vector2::new(angle.cos(), angle.sin());
        let rim = center.translate(direction.scale(radius));
        sink.add_line(center, rim, StandardLayer::Dimensions);
        let label_at = center.translate(direction.scale(radius * 0.5 + DIMENSION_TEXT_HEIGHT));
        sink.add_text(
            label_at,
            &format!("R{}", format_length(radius)),
            DIMENSION_TEXT_HEIGHT,
            StandardLayer::Dimensions,
        );
    }

    /// 十字中心线，落在 CENTER_LINES 图层（点划线）。
    pub fn add_center_cross<S: DrawingSink + ?Sized>(
        sink: &mut S,
        center: Point2,
        half_extent: f64,
    ) {
        sink.add_line(
            Point2::new(center.x() - half_extent, center.y()),
            Point2::new(center.x() + half_extent, center.y()),
            StandardLayer::CenterLines,
        );
        sink.add_line(
            Point2::new(center.x(), center.y() - half_extent),
            Point2::new(center.x(), center.y() + half_extent),
            StandardLayer::CenterLines,
        );
    }

    /// 尺寸数值统一取整到厘米。
    #[inline]
    pub fn format_length(length: f64) -> String {
        format!("{length:.0}")
    }

}
