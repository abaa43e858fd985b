//! 二进制 STL 输出。实体模型以厘米给出，这里统一换算为米。

use std::f64::consts::TAU;

use cadgen_engine::extrude::{Solid, SolidModel};
use glam::DVec3;
use tracing::debug;

use crate::{IoError, SolidEncoder};

/// 厘米到米。
pub const CENTIMETERS_PER_METER: f64 = 100.0;
pub const DEFAULT_CYLINDER_SECTIONS: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct StlWriter {
    pub cylinder_sections: usize,
}

impl Default for StlWriter {
    fn default() -> Self {
        Self {
            cylinder_sections: DEFAULT_CYLINDER_SECTIONS,
        }
    }
}

type Triangle = [DVec3; 3];

impl StlWriter {
    /// 把模型展开为三角面（单位：米）。
    pub fn triangles(&self, model: &SolidModel) -> Vec<Triangle> {
        let mut triangles = Vec::new();
        for solid in &model.solids {
            match solid {
                Solid::Cuboid { min, size } => {
                    let min = min.as_vec3() / CENTIMETERS_PER_METER;
                    let size = size.as_vec3() / CENTIMETERS_PER_METER;
                    cuboid_triangles(min, min + size, &mut triangles);
                }
                Solid::Cylinder {
                    base_center,
                    radius,
                    height,
                } => cylinder_triangles(
                    base_center.as_vec3() / CENTIMETERS_PER_METER,
                    radius / CENTIMETERS_PER_METER,
                    height / CENTIMETERS_PER_METER,
                    self.cylinder_sections.max(3),
                    &mut triangles,
                ),
            }
        }
        triangles
    }

    /// 附带外法向的 `stl_io` 三角面。
    pub fn mesh(&self, model: &SolidModel) -> Vec<stl_io::Triangle> {
        self.triangles(model)
            .into_iter()
            .map(|[a, b, c]| stl_io::Triangle {
                normal: stl_io::Normal::new(to_stl_vector(
                    (b - a).cross(c - a).normalize_or_zero(),
                )),
                vertices: [
                    stl_io::Vertex::new(to_stl_vector(a)),
                    stl_io::Vertex::new(to_stl_vector(b)),
                    stl_io::Vertex::new(to_stl_vector(c)),
                ],
            })
            .collect()
    }
}

impl SolidEncoder for StlWriter {
    fn extension(&self) -> &'static str {
        "stl"
    }

    fn encode(&self, model: &SolidModel) -> Result<Vec<u8>, IoError> {
        let mesh = self.mesh(model);
        let mut out = Vec::with_capacity(84 + 50 * mesh.len());
        stl_io::write_stl(&mut out, mesh.iter()).map_err(IoError::Mesh)?;
        debug!(solids = model.len(), facets = mesh.len(), "STL 编码完成");
        Ok(out)
    }
}

fn to_stl_vector(vector: DVec3) -> [f32; 3] {
    vector.as_vec3().to_array()
}

/// 长方体六个面的角点编号（bit0 = x, bit1 = y, bit2 = z 取最大值），
/// 自外侧看为逆时针，法向朝外。
const CUBOID_FACES: [[usize; 4]; 6] = [
    [0, 2, 3, 1],
    [4, 5, 7, 6],
    [0, 1, 5, 4],
    [2, 6, 7, 3],
    [0, 4, 6, 2],
    [1, 3, 7, 5],
];

fn cuboid_triangles(min: DVec3, max: DVec3, out: &mut Vec<Triangle>) {
    let corner = |index: usize| {
        DVec3::new(
            if index & 1 != 0 { max.x } else { min.x },
            if index & 2 != 0 { max.y } else { min.y },
            if index & 4 != 0 { max.z } else { min.z },
        )
    };
    for [a, b, c, d] in CUBOID_FACES.map(|face| face.map(&corner)) {
        out.push([a, b, c]);
        out.push([a, c, d]);
    }
}

fn cylinder_triangles(
    base: DVec3,
    radius: f64,
    height: f64,
    sections: usize,
    out: &mut Vec<Triangle>,
) {
    let top = base + DVec3::new(0.0, 0.0, height);
    let rim = |index: usize, center: DVec3| {
        let angle = TAU * index as f64 / sections as f64;
        center + DVec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
    };
    for index in 0..sections {
        let next = (index + 1) % sections;
        let (b0, b1) = (rim(index, base), rim(next, base));
        let (t0, t1) = (rim(index, top), rim(next, top));
        out.push([b0, b1, t1]);
        out.push([b0, t1, t0]);
        out.push([base, b1, b0]);
        out.push([top, t0, t1]);
    }
}
