//! Canned part recipes, one per component kind, plus the decorative
//! fillers that are not interactive.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};

use super::color::rgb_or_grey;
use super::geometry::{cuboid, cylinder, disc, sphere, Aabb, Mesh};
use crate::placement::ComponentType;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    /// Skip lighting entirely.
    pub unlit: bool,
    pub opacity: f32,
    /// Sample the board texture instead of `color`.
    pub textured: bool,
}

impl Material {
    pub fn standard(hex: &str, metalness: f32, roughness: f32) -> Self {
        Self { color: rgb_or_grey(hex), metalness, roughness, unlit: false, opacity: 1.0, textured: false }
    }

    pub fn basic(hex: &str) -> Self {
        Self { unlit: true, ..Self::standard(hex, 0.0, 1.0) }
    }

    pub fn translucent(hex: &str, opacity: f32) -> Self {
        Self { opacity, ..Self::basic(hex) }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// One mesh with its material, already placed in component space.
#[derive(Debug, Clone)]
pub struct Part {
    pub mesh: Mesh,
    pub material: Material,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub parts: Vec<Part>,
    /// Highlight slab shown above the part while hovered.
    pub glow: Part,
    /// Invisible pick volume, larger than the visible parts.
    pub hit_box: Aabb,
}

impl Recipe {
    pub fn visible_bounds(&self) -> Aabb {
        self.parts.iter().fold(Aabb::EMPTY, |b, p| b.union(p.mesh.bounds()))
    }
}

const GLOW: &str = "#00ff88";
const PIN: &str = "#e6b87d";

fn at(mesh: Mesh, x: f32, y: f32, z: f32) -> Mesh {
    mesh.transformed(Mat4::from_translation(Vec3::new(x, y, z)))
}

fn part(mesh: Mesh, material: Material) -> Part {
    Part { mesh, material }
}

fn pin(size: Vec3, x: f32, y: f32, z: f32) -> Part {
    part(at(cuboid(size), x, y, z), Material::standard(PIN, 0.9, 0.2))
}

fn lead(radius: f32, height: f32, x: f32, y: f32, z: f32) -> Part {
    part(at(cylinder(radius, height, 8), x, y, z), Material::standard(PIN, 0.9, 0.2))
}

fn glow_box(w: f32, y: f32, d: f32, opacity: f32) -> Part {
    part(at(cuboid(Vec3::new(w, 0.02, d)), 0.0, y, 0.0), Material::translucent(GLOW, opacity))
}

fn glow_disc(r: f32, y: f32, segments: u32) -> Part {
    part(at(cylinder(r, 0.02, segments), 0.0, y, 0.0), Material::translucent(GLOW, 0.45))
}

/// Extra room around each kind's visible bounds for the pick volume.
/// Small parts get proportionally more so they stay easy to hit.
pub fn hit_padding(kind: ComponentType) -> Vec3 {
    match kind {
        ComponentType::Mcu => Vec3::new(0.15, 0.2, 0.15),
        ComponentType::Vrm => Vec3::new(0.2, 0.2, 0.2),
        ComponentType::Osc => Vec3::new(0.25, 0.25, 0.25),
        ComponentType::Com => Vec3::new(0.2, 0.2, 0.2),
        ComponentType::Mem => Vec3::new(0.15, 0.2, 0.15),
        ComponentType::Uart => Vec3::new(0.3, 0.25, 0.3),
        ComponentType::Cap => Vec3::new(0.3, 0.25, 0.3),
        ComponentType::Led => Vec3::new(0.25, 0.25, 0.25),
        ComponentType::Swd => Vec3::new(0.25, 0.25, 0.25),
    }
}

pub fn recipe(kind: ComponentType) -> Recipe {
    let (parts, glow) = match kind {
        ComponentType::Mcu => {
            let mut parts = vec![
                part(cuboid(Vec3::new(1.4, 0.15, 1.4)), Material::standard("#2a2a2a", 0.7, 0.3)),
                part(at(disc(0.06, 16), -0.6, 0.08, -0.6), Material::basic("#ffffff")),
            ];
            // Eight gull-wing pins per side.
            for i in 0..32 {
                let offset = (i % 8) as f32 * 0.16 - 0.56;
                let (x, z, yaw) = match i / 8 {
                    0 => (-0.75, offset, 0.0),
                    1 => (offset, -0.75, FRAC_PI_2),
                    2 => (0.75, offset, PI),
                    _ => (offset, 0.75, -FRAC_PI_2),
                };
                let m = cuboid(Vec3::new(0.06, 0.06, 0.02))
                    .transformed(Mat4::from_translation(Vec3::new(x, -0.02, z)) * Mat4::from_rotation_y(yaw));
                parts.push(part(m, Material::standard(PIN, 0.95, 0.1)));
            }
            (parts, glow_box(1.6, 0.2, 1.6, 0.5))
        }
        ComponentType::Vrm => {
            let inductor = Material::standard("#5a5a5a", 0.6, 0.5);
            let cap = Material::standard("#2a2a2a", 0.3, 0.4);
            let parts = vec![
                part(cuboid(Vec3::new(0.8, 0.15, 0.6)), Material::standard("#2d2d3f", 0.5, 0.4)),
                part(at(cylinder(0.15, 0.3, 20), -0.4, 0.15, 0.2), inductor),
                part(at(cylinder(0.15, 0.3, 20), 0.4, 0.15, 0.2), inductor),
                part(at(cylinder(0.08, 0.2, 16), -0.3, 0.1, -0.3), cap),
                part(at(cylinder(0.08, 0.2, 16), 0.3, 0.1, -0.3), cap),
            ];
            (parts, glow_box(1.1, 0.35, 0.9, 0.4))
        }
        ComponentType::Osc => {
            let parts = vec![
                part(cylinder(0.25, 0.3, 24), Material::standard("#d0d0d0", 0.95, 0.15)),
                part(at(disc(0.15, 24), 0.0, 0.16, 0.0), Material::basic("#ffffff")),
                lead(0.025, 0.12, -0.2, -0.12, 0.0),
                lead(0.025, 0.12, 0.2, -0.12, 0.0),
            ];
            (parts, glow_disc(0.3, 0.4, 24))
        }
        ComponentType::Com => {
            let mut parts = vec![part(cuboid(Vec3::new(0.8, 0.15, 1.0)), Material::standard("#2d3f2d", 0.5, 0.4))];
            for i in 0..12 {
                let offset = (i % 3) as f32 * 0.28 - 0.28;
                let (x, z) = match i / 3 {
                    0 => (-0.45, offset),
                    1 => (offset, -0.55),
                    2 => (0.45, offset),
                    _ => (offset, 0.55),
                };
                parts.push(pin(Vec3::new(0.05, 0.06, 0.05), x, -0.02, z));
            }
            (parts, glow_box(1.0, 0.25, 1.2, 0.4))
        }
        ComponentType::Mem => {
            let mut parts = vec![
                part(cuboid(Vec3::new(1.3, 0.12, 0.8)), Material::standard("#3d3d2a", 0.5, 0.4)),
                part(at(cuboid(Vec3::new(0.12, 0.13, 0.2)), -0.55, 0.0, 0.0), Material::standard("#2a4d38", 0.0, 1.0)),
            ];
            for i in 0..20 {
                let x = (i as f32 - 9.5) * 0.1;
                parts.push(pin(Vec3::new(0.03, 0.05, 0.1), x, -0.02, -0.45));
                parts.push(pin(Vec3::new(0.03, 0.05, 0.1), x, -0.02, 0.45));
            }
            (parts, glow_box(1.5, 0.2, 1.0, 0.4))
        }
        ComponentType::Uart => {
            let mut parts = vec![
                part(cuboid(Vec3::new(0.5, 0.3, 0.25)), Material::standard("#2a2a2a", 0.0, 0.5)),
                part(at(cuboid(Vec3::new(0.4, 0.12, 0.15)), 0.0, 0.2, 0.0), Material::standard("#1a1a1a", 0.0, 1.0)),
            ];
            for i in 0..4 {
                let m = at(cylinder(0.02, 0.12, 8), (i as f32 - 1.5) * 0.1, 0.3, 0.0);
                parts.push(part(m, Material::standard("#ffd700", 1.0, 0.1)));
            }
            (parts, glow_box(0.6, 0.45, 0.35, 0.4))
        }
        ComponentType::Cap => {
            let parts = vec![
                part(cylinder(0.15, 0.35, 18), Material::standard("#2a2a2a", 0.4, 0.3)),
                part(at(disc(0.08, 16), 0.0, 0.18, 0.0), Material::basic("#a00000")),
                // Polarity stripe down the side of the can.
                part(at(cuboid(Vec3::new(0.01, 0.3, 0.05)), 0.15, 0.0, 0.0), Material::basic("#d0d0d0")),
                lead(0.018, 0.08, -0.06, -0.2, 0.0),
                lead(0.018, 0.08, 0.06, -0.2, 0.0),
            ];
            (parts, glow_disc(0.18, 0.3, 18))
        }
        ComponentType::Led => {
            let mut parts = Vec::new();
            for (i, lens) in ["#00ff88", "#00ccff", "#ffaa00"].into_iter().enumerate() {
                let x = (i as f32 - 1.0) * 0.3;
                parts.push(part(at(cuboid(Vec3::new(0.2, 0.06, 0.2)), x, 0.0, 0.0), Material::standard("#d8d8d8", 0.2, 0.5)));
                parts.push(part(at(sphere(0.08, 12, 8), x, 0.07, 0.0), Material::translucent(lens, 0.9)));
            }
            (parts, glow_box(1.0, 0.25, 0.4, 0.4))
        }
        ComponentType::Swd => {
            let mut parts = vec![part(cuboid(Vec3::new(0.7, 0.2, 0.35)), Material::standard("#1a1a1a", 0.1, 0.7))];
            // 2x5 header at 0.127 pitch.
            for i in 0..10 {
                let x = ((i % 5) as f32 - 2.0) * 0.127;
                let z = if i < 5 { -0.064 } else { 0.064 };
                let m = at(cuboid(Vec3::new(0.03, 0.14, 0.03)), x, 0.13, z);
                parts.push(part(m, Material::standard("#ffd700", 1.0, 0.1)));
            }
            (parts, glow_box(0.9, 0.35, 0.5, 0.4))
        }
    };
    let visible = parts.iter().fold(Aabb::EMPTY, |b, p| b.union(p.mesh.bounds()));
    let hit_box = visible.grown(hit_padding(kind));
    Recipe { parts, glow, hit_box }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorKind {
    ChipSmall,
    ResistorArray,
    CapSmd,
}

pub struct Decor {
    pub kind: DecorKind,
    pub position: [f32; 3],
    pub yaw: f32,
}

pub static DECOR: [Decor; 11] = [
    Decor { kind: DecorKind::ChipSmall, position: [-2.0, 0.08, -5.0], yaw: 0.5 },
    Decor { kind: DecorKind::ChipSmall, position: [-1.0, 0.08, -5.5], yaw: 0.0 },
    Decor { kind: DecorKind::ResistorArray, position: [1.5, 0.05, -3.0], yaw: 0.0 },
    Decor { kind: DecorKind::ResistorArray, position: [1.5, 0.05, -3.5], yaw: 0.0 },
    Decor { kind: DecorKind::CapSmd, position: [-5.5, 0.08, 0.0], yaw: FRAC_PI_2 },
    Decor { kind: DecorKind::CapSmd, position: [-5.8, 0.08, 0.0], yaw: FRAC_PI_2 },
    Decor { kind: DecorKind::CapSmd, position: [-5.5, 0.08, 0.5], yaw: FRAC_PI_2 },
    Decor { kind: DecorKind::ChipSmall, position: [5.5, 0.08, 1.0], yaw: PI / 4.0 },
    Decor { kind: DecorKind::ResistorArray, position: [0.0, 0.05, 5.5], yaw: 0.0 },
    Decor { kind: DecorKind::CapSmd, position: [-0.5, 0.08, 5.5], yaw: 0.0 },
    Decor { kind: DecorKind::CapSmd, position: [0.5, 0.08, 5.5], yaw: 0.0 },
];

pub fn decor_parts(kind: DecorKind) -> Vec<Part> {
    match kind {
        DecorKind::ChipSmall => {
            let mut parts = vec![part(cuboid(Vec3::new(0.6, 0.1, 0.4)), Material::standard("#222222", 0.6, 0.3))];
            for i in 0..4 {
                let x = (i as f32 - 1.5) * 0.12;
                for z in [0.22, -0.22] {
                    parts.push(part(at(cuboid(Vec3::new(0.04, 0.04, 0.1)), x, -0.02, z), Material::standard("#cccccc", 0.8, 0.2)));
                }
            }
            parts
        }
        DecorKind::ResistorArray => {
            let mut parts = vec![part(cuboid(Vec3::new(0.8, 0.08, 0.3)), Material::standard("#111111", 0.0, 0.5))];
            for i in 0..4 {
                let x = (i as f32 - 1.5) * 0.18;
                parts.push(part(at(cuboid(Vec3::new(0.1, 0.01, 0.2)), x, 0.041, 0.0), Material::standard("#dddddd", 0.0, 1.0)));
            }
            parts
        }
        DecorKind::CapSmd => vec![
            part(cuboid(Vec3::new(0.3, 0.15, 0.15)), Material::standard("#8e6d48", 0.0, 0.3)),
            part(at(cuboid(Vec3::new(0.06, 0.155, 0.155)), -0.12, 0.0, 0.0), Material::standard("#cccccc", 0.6, 0.5)),
            part(at(cuboid(Vec3::new(0.06, 0.155, 0.155)), 0.12, 0.0, 0.0), Material::standard("#cccccc", 0.6, 0.5)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_recipe_with_a_padded_hit_box() {
        for kind in ComponentType::ALL {
            let r = recipe(kind);
            assert!(!r.parts.is_empty(), "{kind} has no parts");
            assert!(r.hit_box.strictly_contains(&r.visible_bounds()), "{kind} hit box is not padded");
        }
    }

    #[test]
    fn kinds_have_distinct_silhouettes() {
        let counts: Vec<usize> = ComponentType::ALL.iter().map(|k| recipe(*k).parts.len()).collect();
        assert_eq!(counts[0], 34, "MCU body, dot and 32 pins");
        assert_eq!(recipe(ComponentType::Mem).parts.len(), 42);
    }

    #[test]
    fn glow_is_translucent() {
        for kind in ComponentType::ALL {
            assert!(recipe(kind).glow.material.is_transparent());
        }
    }

    #[test]
    fn decor_kinds_build() {
        for d in &DECOR {
            assert!(!decor_parts(d.kind).is_empty());
        }
    }
}
