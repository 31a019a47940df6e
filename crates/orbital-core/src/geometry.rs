//! Static meshes: the raymarch proxy cube and the cursor sphere.

use crate::uniforms::{CubeVertex, LineVertex};
use std::f32::consts::{PI, TAU};

const CUBE_CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5],
    [0.5, -0.5, -0.5],
    [0.5, 0.5, -0.5],
    [-0.5, 0.5, -0.5],
    [-0.5, -0.5, 0.5],
    [0.5, -0.5, 0.5],
    [0.5, 0.5, 0.5],
    [-0.5, 0.5, 0.5],
];

// Two triangles per face, counter-clockwise seen from outside.
const CUBE_INDICES: [u16; 36] = [
    4, 5, 6, 4, 6, 7, // +z
    1, 0, 3, 1, 3, 2, // -z
    5, 1, 2, 5, 2, 6, // +x
    0, 4, 7, 0, 7, 3, // -x
    7, 6, 2, 7, 2, 3, // +y
    0, 1, 5, 0, 5, 4, // -y
];

/// Unit cube `[-0.5, 0.5]³` as a 36-vertex triangle list.
pub fn unit_cube_triangles() -> Vec<CubeVertex> {
    CUBE_INDICES
        .iter()
        .map(|&i| CubeVertex {
            position: CUBE_CORNERS[i as usize],
        })
        .collect()
}

/// Latitude/longitude wireframe sphere of the given radius as a line list.
pub fn wireframe_sphere_lines(radius: f32, segments: u32, color: [f32; 4]) -> Vec<LineVertex> {
    let segments = segments.max(3);
    let rings = (segments / 2).max(2);
    let mut out = Vec::new();
    let point = |theta: f32, phi: f32| {
        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        LineVertex {
            position: [radius * st * cp, radius * ct, radius * st * sp],
            color,
        }
    };

    // latitude circles
    for ring in 1..rings {
        let theta = PI * ring as f32 / rings as f32;
        for s in 0..segments {
            let a = TAU * s as f32 / segments as f32;
            let b = TAU * (s + 1) as f32 / segments as f32;
            out.push(point(theta, a));
            out.push(point(theta, b));
        }
    }
    // meridians
    for s in 0..segments {
        let phi = TAU * s as f32 / segments as f32;
        for ring in 0..rings {
            let a = PI * ring as f32 / rings as f32;
            let b = PI * (ring + 1) as f32 / rings as f32;
            out.push(point(a, phi));
            out.push(point(b, phi));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_faces_wind_outward() {
        let verts = unit_cube_triangles();
        assert_eq!(verts.len(), 36);
        for tri in verts.chunks(3) {
            let a = Vec3::from(tri[0].position);
            let b = Vec3::from(tri[1].position);
            let c = Vec3::from(tri[2].position);
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let lines = wireframe_sphere_lines(0.5, 12, [1.0; 4]);
        assert_eq!(lines.len() % 2, 0);
        for v in &lines {
            assert!((Vec3::from(v.position).length() - 0.5).abs() < 1e-5);
        }
    }
}
