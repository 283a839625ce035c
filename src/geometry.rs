use std::f32::consts::{PI, TAU};

/// Indexed triangle mesh with interleaved-ready position and normal streams.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u16>,
}

impl Mesh {
    fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) {
        self.positions.extend_from_slice(&position);
        self.normals.extend_from_slice(&normal);
    }
}

pub const SPHERE_WIDTH_SEGMENTS: u16 = 32;
pub const SPHERE_HEIGHT_SEGMENTS: u16 = 16;

/// Latitude/longitude sphere centred on the origin.
pub fn uv_sphere(radius: f32, width_segments: u16, height_segments: u16) -> Mesh {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut mesh = Mesh::default();

    for iy in 0..=height_segments {
        let v = f32::from(iy) / f32::from(height_segments);
        let theta = v * PI;
        for ix in 0..=width_segments {
            let u = f32::from(ix) / f32::from(width_segments);
            let phi = u * TAU;
            let normal = [-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin()];
            let position = [normal[0] * radius, normal[1] * radius, normal[2] * radius];
            mesh.push_vertex(position, normal);
        }
    }

    let row = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

/// Axis-aligned box centred on the origin, one quad per face so normals stay flat.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Mesh {
    let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
    // (normal, u axis, v axis) per face, wound counter-clockwise seen from outside.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];
    let half = [hx, hy, hz];
    let mut mesh = Mesh::default();

    for (face, (normal, u, v)) in faces.iter().enumerate() {
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position: [f32; 3] =
                std::array::from_fn(|axis| (normal[axis] + su * u[axis] + sv * v[axis]) * half[axis]);
            mesh.push_vertex(position, *normal);
        }
        let base = face as u16 * 4;
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_count(mesh: &Mesh) -> usize {
        mesh.positions.len() / 3
    }

    fn length(v: &[f32]) -> f32 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn sphere_vertices_sit_on_the_radius() {
        let mesh = uv_sphere(0.8, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS);

        assert_eq!(vertex_count(&mesh), 33 * 17);
        for (position, normal) in mesh.positions.chunks(3).zip(mesh.normals.chunks(3)) {
            assert!((length(position) - 0.8).abs() < 1e-4);
            assert!((length(normal) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_indices_skip_degenerate_pole_triangles() {
        let mesh = uv_sphere(1.0, 8, 4);

        // Poles contribute one triangle per segment, middle rows two.
        assert_eq!(mesh.indices.len(), (8 + 8 * 2 * 2 + 8) * 3);
        let count = vertex_count(&mesh) as u16;
        assert!(mesh.indices.iter().all(|index| *index < count));
    }

    #[test]
    fn box_has_flat_faces_within_extent() {
        let mesh = cuboid(4.0, 2.5, 0.2);

        assert_eq!(vertex_count(&mesh), 24);
        assert_eq!(mesh.indices.len(), 36);
        for position in mesh.positions.chunks(3) {
            assert!((position[0].abs() - 2.0).abs() < 1e-6);
            assert!((position[1].abs() - 1.25).abs() < 1e-6);
            assert!((position[2].abs() - 0.1).abs() < 1e-6);
        }
        for normal in mesh.normals.chunks(3) {
            assert!((length(normal) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn box_faces_wind_outward() {
        let mesh = cuboid(1.0, 1.0, 1.0);

        for triangle in mesh.indices.chunks(3) {
            let p = |i: u16| {
                let i = usize::from(i) * 3;
                [mesh.positions[i], mesh.positions[i + 1], mesh.positions[i + 2]]
            };
            let (a, b, c) = (p(triangle[0]), p(triangle[1]), p(triangle[2]));
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cross = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let n = usize::from(triangle[0]) * 3;
            let normal = &mesh.normals[n..n + 3];
            let dot = cross[0] * normal[0] + cross[1] * normal[1] + cross[2] * normal[2];
            assert!(dot > 0.0);
        }
    }
}
