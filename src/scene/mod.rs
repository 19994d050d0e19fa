//! The 3D board scene as plain data.
//!
//! [`SceneModel`] owns every mesh once in a catalog and describes each
//! frame as a list of [`Draw`] calls. The WebGL layer uploads the catalog
//! and replays the draws; nothing here touches the browser.

pub mod animation;
pub mod board;
pub mod camera;
pub mod color;
pub mod geometry;
pub mod painter;
pub mod picking;
pub mod recipes;
pub mod traces;

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::config::SiteConfig;
use crate::placement::{Placement, PlacementId, PLACEMENTS};
use animation::HoverLift;
use geometry::{sphere, Aabb};
use picking::{pick, Ray, Target};
use recipes::{recipe, Material, Part};
use traces::{signal_dots, SignalDot};

/// Index into [`SceneModel::catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draw {
    pub mesh: MeshId,
    pub world: Mat4,
    /// Multiplies the material's own opacity.
    pub fade: f32,
}

/// One interactive placement on the board.
#[derive(Debug, Clone)]
pub struct ComponentNode {
    pub placement: &'static Placement,
    pub base: Mat4,
    pub parts: Vec<MeshId>,
    pub glow: MeshId,
    pub hit_box: Aabb,
    pub lift: HoverLift,
}

impl ComponentNode {
    pub fn world(&self) -> Mat4 {
        Mat4::from_translation(Vec3::Y * self.lift.offset) * self.base
    }
}

pub fn placement_matrix(p: &Placement) -> Mat4 {
    let [rx, ry, rz] = p.rotation;
    Mat4::from_scale_rotation_translation(
        Vec3::from(p.scale),
        Quat::from_euler(EulerRot::XYZ, rx, ry, rz),
        Vec3::from(p.position),
    )
}

pub struct SceneModel {
    catalog: Vec<Part>,
    statics: Vec<MeshId>,
    pub components: Vec<ComponentNode>,
    dots: Vec<SignalDot>,
    dot_mesh: MeshId,
    pub elapsed: f32,
}

impl SceneModel {
    pub fn new(config: &SiteConfig) -> Self {
        let mut catalog = Vec::new();
        let mut add = |part: Part| {
            catalog.push(part);
            MeshId(catalog.len() - 1)
        };

        let statics = board::static_parts().into_iter().map(&mut add).collect();

        let components = PLACEMENTS
            .iter()
            .map(|placement| {
                let r = recipe(placement.kind);
                let hit_box = r.hit_box;
                ComponentNode {
                    placement,
                    base: placement_matrix(placement),
                    parts: r.parts.into_iter().map(&mut add).collect(),
                    glow: add(r.glow),
                    hit_box,
                    lift: HoverLift::new(config.hover_lift, config.hover_smoothing),
                }
            })
            .collect();

        let dot_mesh = add(Part { mesh: sphere(0.05, 12, 8), material: Material::basic("#00ff88") });

        log::debug!("scene built: {} meshes", catalog.len());
        Self { catalog, statics, components, dots: signal_dots(), dot_mesh, elapsed: 0.0 }
    }

    pub fn catalog(&self) -> &[Part] {
        &self.catalog
    }

    pub fn material(&self, id: MeshId) -> &Material {
        &self.catalog[id.0].material
    }

    /// Advances lifts and the signal clock by `dt` seconds.
    pub fn tick(&mut self, dt: f32, hovered: Option<PlacementId>) {
        self.elapsed += dt;
        for c in &mut self.components {
            c.lift.step(hovered == Some(c.placement.id));
        }
    }

    /// Draw calls for the current state, opaque first, translucent after.
    pub fn frame(&self) -> Vec<Draw> {
        let mut draws: Vec<Draw> =
            self.statics.iter().map(|&mesh| Draw { mesh, world: Mat4::IDENTITY, fade: 1.0 }).collect();
        for c in &self.components {
            let world = c.world();
            draws.extend(c.parts.iter().map(|&mesh| Draw { mesh, world, fade: 1.0 }));
            let glow = c.lift.glow();
            if glow > 0.01 {
                draws.push(Draw { mesh: c.glow, world, fade: glow });
            }
        }
        for dot in &self.dots {
            let world = Mat4::from_translation(dot.position(self.elapsed));
            draws.push(Draw { mesh: self.dot_mesh, world, fade: 1.0 });
        }
        // Stable, so translucent draws keep their build order.
        draws.sort_by_key(|d| self.material(d.mesh).is_transparent());
        draws
    }

    pub fn pick(&self, ray: &Ray) -> Option<PlacementId> {
        pick(
            ray,
            self.components.iter().map(|c| Target { key: c.placement.id, world: c.world(), hit_box: &c.hit_box }),
        )
    }

    /// World point just above a component, where its tooltip hangs.
    pub fn tooltip_anchor(&self, id: &str) -> Option<Vec3> {
        let c = self.components.iter().find(|c| c.placement.id == id)?;
        let top = Vec3::new(c.hit_box.center().x, c.hit_box.max.y, c.hit_box.center().z);
        Some(c.world().transform_point3(top) + Vec3::Y * 0.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::camera::OrbitCamera;

    fn model() -> SceneModel {
        SceneModel::new(&SiteConfig::default())
    }

    #[test]
    fn one_node_per_placement() {
        let m = model();
        assert_eq!(m.components.len(), PLACEMENTS.len());
        assert!(m.catalog().len() > m.components.len());
    }

    #[test]
    fn translucent_draws_come_last() {
        let mut m = model();
        for _ in 0..30 {
            m.tick(0.016, Some("mcu"));
        }
        let draws = m.frame();
        let first_translucent = draws.iter().position(|d| m.material(d.mesh).is_transparent()).unwrap();
        assert!(draws[first_translucent..].iter().all(|d| m.material(d.mesh).is_transparent()));
    }

    #[test]
    fn glow_only_while_lifted() {
        let mut m = model();
        let mcu_glow = m.components[0].glow;
        assert!(!m.frame().iter().any(|d| d.mesh == mcu_glow));
        m.tick(0.016, Some("mcu"));
        assert!(m.frame().iter().any(|d| d.mesh == mcu_glow));
    }

    #[test]
    fn hover_lifts_only_the_hovered_part() {
        let mut m = model();
        for _ in 0..100 {
            m.tick(0.016, Some("osc"));
        }
        for c in &m.components {
            if c.placement.id == "osc" {
                assert!((c.lift.offset - 0.2).abs() < 1e-3);
            } else {
                assert_eq!(c.lift.offset, 0.0);
            }
        }
    }

    #[test]
    fn every_placement_is_pickable_from_the_start_view() {
        let m = model();
        let cam = OrbitCamera::new(&SiteConfig::default().camera, 16.0 / 9.0);
        let (w, h) = (1600.0, 900.0);
        for c in &m.components {
            let centre = c.world().transform_point3(c.hit_box.center());
            let px = cam.project(centre, w, h).unwrap();
            let ray = cam.ray(px.x, px.y, w, h);
            assert_eq!(m.pick(&ray), Some(c.placement.id), "{}", c.placement.id);
        }
    }

    #[test]
    fn empty_board_picks_nothing() {
        let m = model();
        let ray = Ray { origin: Vec3::new(-6.5, 10.0, 6.5), dir: Vec3::NEG_Y };
        assert_eq!(m.pick(&ray), None);
    }

    #[test]
    fn tooltip_floats_above_the_part() {
        let m = model();
        let anchor = m.tooltip_anchor("mcu").unwrap();
        assert!(anchor.y > 0.4);
        assert!(m.tooltip_anchor("nope").is_none());
    }
}
