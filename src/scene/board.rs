//! The static part of the scene: slab, copper, vias, mounting holes,
//! decorative parts and the floor grid. Built once, never picked.

use glam::{Mat4, Quat, Vec3};

use super::geometry::{cylinder, disc, ribbon, ring, rounded_slab, Mesh};
use super::recipes::{decor_parts, Material, Part, DECOR};
use super::traces::{NETS, TRACE_HEIGHT, VIAS};

pub const BOARD_SIZE: f32 = 14.0;
pub const BOARD_RADIUS: f32 = 1.0;
pub const BOARD_THICKNESS: f32 = 0.2;

const HOLE_OFFSET: f32 = 6.5;
const FLOOR_Y: f32 = -0.2;
const FLOOR_EXTENT: f32 = 20.0;
const FLOOR_STEP: f32 = 2.0;

fn placed(mesh: Mesh, x: f32, y: f32, z: f32) -> Mesh {
    mesh.transformed(Mat4::from_translation(Vec3::new(x, y, z)))
}

fn slab() -> Part {
    Part {
        mesh: rounded_slab(BOARD_SIZE, BOARD_SIZE, BOARD_RADIUS, BOARD_THICKNESS, 16),
        material: Material { textured: true, ..Material::standard("#1a3d28", 0.1, 0.8) },
    }
}

fn copper() -> Vec<Part> {
    NETS.iter()
        .map(|net| Part {
            mesh: ribbon(net.points, net.width, TRACE_HEIGHT),
            material: Material::standard(net.color, 0.8, 0.3),
        })
        .collect()
}

fn vias() -> Vec<Part> {
    let mut pads = Mesh::default();
    let mut drills = Mesh::default();
    for [x, z] in VIAS {
        pads.append(&placed(ring(0.04, 0.08, 16), x, TRACE_HEIGHT + 0.005, z));
        drills.append(&placed(disc(0.04, 12), x, TRACE_HEIGHT + 0.004, z));
    }
    vec![
        Part { mesh: pads, material: Material::standard("#c9a25f", 0.9, 0.2) },
        Part { mesh: drills, material: Material::basic("#050505") },
    ]
}

fn mounting_holes() -> Vec<Part> {
    let mut plating = Mesh::default();
    let mut bores = Mesh::default();
    for (sx, sz) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        let (x, z) = (sx * HOLE_OFFSET, sz * HOLE_OFFSET);
        plating.append(&placed(ring(0.15, 0.3, 24), x, 0.005, z));
        bores.append(&placed(cylinder(0.15, BOARD_THICKNESS + 0.01, 24), x, -BOARD_THICKNESS / 2.0, z));
    }
    vec![
        Part { mesh: plating, material: Material::standard("#c9a25f", 0.9, 0.25) },
        Part { mesh: bores, material: Material::basic("#0b0b0b") },
    ]
}

fn decorations() -> Vec<Part> {
    DECOR
        .iter()
        .flat_map(|d| {
            let m = Mat4::from_rotation_translation(Quat::from_rotation_y(d.yaw), Vec3::from(d.position));
            decor_parts(d.kind)
                .into_iter()
                .map(move |p| Part { mesh: p.mesh.transformed(m), material: p.material })
        })
        .collect()
}

fn floor_grid() -> Part {
    let mut lines = Mesh::default();
    let steps = (FLOOR_EXTENT * 2.0 / FLOOR_STEP) as i32;
    for i in 0..=steps {
        let t = -FLOOR_EXTENT + i as f32 * FLOOR_STEP;
        lines.append(&ribbon(&[[t, -FLOOR_EXTENT], [t, FLOOR_EXTENT]], 0.02, FLOOR_Y));
        lines.append(&ribbon(&[[-FLOOR_EXTENT, t], [FLOOR_EXTENT, t]], 0.02, FLOOR_Y));
    }
    Part { mesh: lines, material: Material::translucent("#00ff88", 0.08) }
}

/// Everything that does not move, board first.
pub fn static_parts() -> Vec<Part> {
    let mut parts = vec![slab()];
    parts.extend(copper());
    parts.extend(vias());
    parts.extend(mounting_holes());
    parts.extend(decorations());
    parts.push(floor_grid());
    parts
}
