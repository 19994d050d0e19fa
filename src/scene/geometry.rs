//! Triangle-mesh primitives for the board and its parts.
//!
//! Everything is built on the CPU once and uploaded as-is. Y is up; the
//! board's top face sits at y = 0.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec2, Vec3};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb { min: Vec3::splat(f32::INFINITY), max: Vec3::splat(f32::NEG_INFINITY) };

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self { min: center - size * 0.5, max: center + size * 0.5 }
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn union(self, other: Aabb) -> Aabb {
        Aabb { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    pub fn grown(self, margin: Vec3) -> Aabb {
        Aabb { min: self.min - margin, max: self.max + margin }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// True when `other` lies strictly inside `self` on every axis.
    pub fn strictly_contains(&self, other: &Aabb) -> bool {
        self.min.cmplt(other.min).all() && self.max.cmpgt(other.max).all()
    }
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn push(&mut self, p: Vec3, n: Vec3, uv: Vec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(p.to_array());
        self.normals.push(n.to_array());
        self.uvs.push(uv.to_array());
        index
    }

    fn quad(&mut self, corners: [Vec3; 4], n: Vec3) {
        let uvs = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)];
        let i: Vec<u32> = corners.iter().zip(uvs).map(|(c, uv)| self.push(*c, n, uv)).collect();
        self.indices.extend_from_slice(&[i[0], i[1], i[2], i[0], i[2], i[3]]);
    }

    /// Appends `other`, rebasing its indices.
    pub fn append(&mut self, other: &Mesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    pub fn transformed(&self, m: Mat4) -> Mesh {
        let normal_m = m.inverse().transpose();
        Mesh {
            positions: self.positions.iter().map(|p| m.transform_point3(Vec3::from(*p)).to_array()).collect(),
            normals: self
                .normals
                .iter()
                .map(|n| normal_m.transform_vector3(Vec3::from(*n)).normalize_or_zero().to_array())
                .collect(),
            uvs: self.uvs.clone(),
            indices: self.indices.clone(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.positions
            .iter()
            .fold(Aabb::EMPTY, |b, p| Aabb { min: b.min.min(Vec3::from(*p)), max: b.max.max(Vec3::from(*p)) })
    }
}

/// Box centred on the origin.
pub fn cuboid(size: Vec3) -> Mesh {
    let h = size * 0.5;
    let mut m = Mesh::default();
    let v = |x: f32, y: f32, z: f32| Vec3::new(x * h.x, y * h.y, z * h.z);
    m.quad([v(-1., -1., 1.), v(1., -1., 1.), v(1., 1., 1.), v(-1., 1., 1.)], Vec3::Z);
    m.quad([v(1., -1., -1.), v(-1., -1., -1.), v(-1., 1., -1.), v(1., 1., -1.)], Vec3::NEG_Z);
    m.quad([v(1., -1., 1.), v(1., -1., -1.), v(1., 1., -1.), v(1., 1., 1.)], Vec3::X);
    m.quad([v(-1., -1., -1.), v(-1., -1., 1.), v(-1., 1., 1.), v(-1., 1., -1.)], Vec3::NEG_X);
    m.quad([v(-1., 1., 1.), v(1., 1., 1.), v(1., 1., -1.), v(-1., 1., -1.)], Vec3::Y);
    m.quad([v(-1., -1., -1.), v(1., -1., -1.), v(1., -1., 1.), v(-1., -1., 1.)], Vec3::NEG_Y);
    m
}

/// Upright capped cylinder centred on the origin.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut m = Mesh::default();
    let hy = height * 0.5;
    for s in 0..segments {
        let a0 = TAU * s as f32 / segments as f32;
        let a1 = TAU * (s + 1) as f32 / segments as f32;
        let (d0, d1) = (Vec3::new(a0.cos(), 0.0, a0.sin()), Vec3::new(a1.cos(), 0.0, a1.sin()));
        let i0 = m.push(d0 * radius - Vec3::Y * hy, d0, Vec2::new(s as f32 / segments as f32, 0.0));
        let i1 = m.push(d1 * radius - Vec3::Y * hy, d1, Vec2::new((s + 1) as f32 / segments as f32, 0.0));
        let i2 = m.push(d1 * radius + Vec3::Y * hy, d1, Vec2::new((s + 1) as f32 / segments as f32, 1.0));
        let i3 = m.push(d0 * radius + Vec3::Y * hy, d0, Vec2::new(s as f32 / segments as f32, 1.0));
        m.indices.extend_from_slice(&[i0, i2, i1, i0, i3, i2]);
    }
    m.append(&disc(radius, segments).transformed(Mat4::from_translation(Vec3::Y * hy)));
    m.append(&disc(radius, segments).transformed(Mat4::from_translation(-Vec3::Y * hy) * Mat4::from_rotation_x(PI)));
    m
}

/// Flat disc in the XZ plane facing +Y.
pub fn disc(radius: f32, segments: u32) -> Mesh {
    ring(0.0, radius, segments)
}

/// Flat annulus in the XZ plane facing +Y. An inner radius of zero gives
/// a disc.
pub fn ring(inner: f32, outer: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut m = Mesh::default();
    for s in 0..=segments {
        let a = TAU * s as f32 / segments as f32;
        let d = Vec3::new(a.cos(), 0.0, a.sin());
        let uv = |r: f32| Vec2::new(0.5 + d.x * r * 0.5 / outer, 0.5 + d.z * r * 0.5 / outer);
        m.push(d * inner, Vec3::Y, uv(inner));
        m.push(d * outer, Vec3::Y, uv(outer));
    }
    for s in 0..segments {
        let i = s * 2;
        m.indices.extend_from_slice(&[i, i + 3, i + 1, i, i + 2, i + 3]);
    }
    m
}

/// UV sphere centred on the origin.
pub fn sphere(radius: f32, sectors: u32, stacks: u32) -> Mesh {
    let (sectors, stacks) = (sectors.max(3), stacks.max(2));
    let mut m = Mesh::default();
    for st in 0..=stacks {
        let phi = PI * st as f32 / stacks as f32;
        for se in 0..=sectors {
            let theta = TAU * se as f32 / sectors as f32;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            m.push(n * radius, n, Vec2::new(se as f32 / sectors as f32, st as f32 / stacks as f32));
        }
    }
    let row = sectors + 1;
    for st in 0..stacks {
        for se in 0..sectors {
            let a = st * row + se;
            let b = a + row;
            m.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    m
}

/// Flat strip of constant `width` along an XZ polyline at height `y`.
pub fn ribbon(points: &[[f32; 2]], width: f32, y: f32) -> Mesh {
    let mut m = Mesh::default();
    let hw = width * 0.5;
    for pair in points.windows(2) {
        let a = Vec3::new(pair[0][0], y, pair[0][1]);
        let b = Vec3::new(pair[1][0], y, pair[1][1]);
        let along = (b - a).normalize_or_zero();
        if along == Vec3::ZERO {
            continue;
        }
        let side = along.cross(Vec3::Y) * hw;
        // Extend each segment by half the width so corners join cleanly.
        let (a, b) = (a - along * hw, b + along * hw);
        m.quad([a - side, b - side, b + side, a + side], Vec3::Y);
    }
    m
}

/// Rounded rectangle outline (x, z) traced counter-clockwise, with
/// quadratic corner arcs sampled `curve_segments` times.
pub fn rounded_rect_outline(width: f32, depth: f32, radius: f32, curve_segments: u32) -> Vec<Vec2> {
    let (x, y, w, h) = (-width / 2.0, -depth / 2.0, width, depth);
    let r = radius.min(w / 2.0).min(h / 2.0);
    let n = curve_segments.max(1);
    let quad = |p0: Vec2, c: Vec2, p1: Vec2, out: &mut Vec<Vec2>| {
        for i in 1..=n {
            let t = i as f32 / n as f32;
            let u = 1.0 - t;
            out.push(p0 * u * u + c * 2.0 * u * t + p1 * t * t);
        }
    };
    let mut pts = vec![Vec2::new(x + r, y)];
    pts.push(Vec2::new(x + w - r, y));
    quad(Vec2::new(x + w - r, y), Vec2::new(x + w, y), Vec2::new(x + w, y + r), &mut pts);
    pts.push(Vec2::new(x + w, y + h - r));
    quad(Vec2::new(x + w, y + h - r), Vec2::new(x + w, y + h), Vec2::new(x + w - r, y + h), &mut pts);
    pts.push(Vec2::new(x + r, y + h));
    quad(Vec2::new(x + r, y + h), Vec2::new(x, y + h), Vec2::new(x, y + h - r), &mut pts);
    pts.push(Vec2::new(x, y + r));
    quad(Vec2::new(x, y + r), Vec2::new(x, y), Vec2::new(x + r, y), &mut pts);
    // The last arc ends where we started.
    pts.pop();
    pts
}

/// Rounded rectangle extruded downwards from y = 0 by `thickness`. The
/// top face carries board UVs spanning the full rectangle.
pub fn rounded_slab(width: f32, depth: f32, radius: f32, thickness: f32, curve_segments: u32) -> Mesh {
    let outline = rounded_rect_outline(width, depth, radius, curve_segments);
    let uv = |p: Vec2| Vec2::new(p.x / width + 0.5, p.y / depth + 0.5);
    let mut m = Mesh::default();

    // The outline is convex, so a centre fan covers each cap.
    for (y, normal) in [(0.0, Vec3::Y), (-thickness, Vec3::NEG_Y)] {
        let centre = m.push(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5));
        let first = m.positions.len() as u32;
        for p in &outline {
            m.push(Vec3::new(p.x, y, p.y), normal, uv(*p));
        }
        let count = outline.len() as u32;
        for i in 0..count {
            let (a, b) = (first + i, first + (i + 1) % count);
            m.indices.extend_from_slice(&[centre, a, b]);
        }
    }

    for (i, p) in outline.iter().enumerate() {
        let q = outline[(i + 1) % outline.len()];
        let edge = q - *p;
        let n = Vec3::new(edge.y, 0.0, -edge.x).normalize_or_zero();
        m.quad(
            [
                Vec3::new(p.x, -thickness, p.y),
                Vec3::new(q.x, -thickness, q.y),
                Vec3::new(q.x, 0.0, q.y),
                Vec3::new(p.x, 0.0, p.y),
            ],
            n,
        );
    }
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed(m: &Mesh) -> bool {
        m.indices.len() % 3 == 0
            && m.indices.iter().all(|i| (*i as usize) < m.vertex_count())
            && m.normals.len() == m.vertex_count()
            && m.uvs.len() == m.vertex_count()
    }

    #[test]
    fn primitives_are_well_formed() {
        for m in [
            cuboid(Vec3::ONE),
            cylinder(0.5, 1.0, 12),
            disc(1.0, 8),
            ring(0.5, 1.0, 8),
            sphere(1.0, 8, 6),
            ribbon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]], 0.1, 0.0),
            rounded_slab(14.0, 14.0, 1.0, 0.2, 16),
        ] {
            assert!(well_formed(&m));
            assert!(!m.indices.is_empty());
        }
    }

    #[test]
    fn cuboid_bounds_match_size() {
        let b = cuboid(Vec3::new(1.4, 0.15, 1.4)).bounds();
        assert!((b.max - Vec3::new(0.7, 0.075, 0.7)).length() < 1e-6);
        assert!((b.min + Vec3::new(0.7, 0.075, 0.7)).length() < 1e-6);
    }

    #[test]
    fn slab_top_is_at_zero_and_fits_the_board() {
        let b = rounded_slab(14.0, 14.0, 1.0, 0.2, 16).bounds();
        assert!((b.max.y - 0.0).abs() < 1e-6);
        assert!((b.min.y + 0.2).abs() < 1e-6);
        assert!((b.max.x - 7.0).abs() < 1e-4 && (b.min.z + 7.0).abs() < 1e-4);
    }

    #[test]
    fn rounded_corners_cut_the_square_corner() {
        let outline = rounded_rect_outline(14.0, 14.0, 1.0, 16);
        assert!(outline.iter().all(|p| p.x.abs() <= 7.0 + 1e-5 && p.y.abs() <= 7.0 + 1e-5));
        assert!(!outline.iter().any(|p| (p.x.abs() - 7.0).abs() < 1e-5 && (p.y.abs() - 7.0).abs() < 1e-5));
    }

    #[test]
    fn degenerate_ribbon_segments_are_skipped() {
        let m = ribbon(&[[0.0, 0.0], [0.0, 0.0]], 0.1, 0.0);
        assert!(m.indices.is_empty());
    }

    #[test]
    fn transform_moves_bounds() {
        let m = cuboid(Vec3::ONE).transformed(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));
        assert!((m.bounds().center() - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn aabb_containment() {
        let inner = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        assert!(inner.grown(Vec3::splat(0.1)).strictly_contains(&inner));
        assert!(!inner.strictly_contains(&inner));
        assert!(Aabb::EMPTY.is_empty());
    }
}
