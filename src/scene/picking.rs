//! Ray picking against the padded hit boxes of placed components.

use glam::{Mat4, Vec3};

use crate::scene::geometry::Aabb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// The same ray expressed in the space `inverse` maps into. The
    /// direction is not renormalised, so `t` values stay comparable
    /// with world space.
    pub fn transformed(&self, inverse: &Mat4) -> Ray {
        Ray { origin: inverse.transform_point3(self.origin), dir: inverse.transform_vector3(self.dir) }
    }
}

/// Slab test. Returns the entry distance, or zero when the origin is
/// inside the box.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    if aabb.is_empty() {
        return None;
    }
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.dir[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);
        if d.abs() < 1e-12 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}

/// Something that can be picked: a local-space box and its world matrix.
pub struct Target<'a, K> {
    pub key: K,
    pub world: Mat4,
    pub hit_box: &'a Aabb,
}

/// Nearest target along the ray.
pub fn pick<'a, K: Copy>(ray: &Ray, targets: impl IntoIterator<Item = Target<'a, K>>) -> Option<K> {
    targets
        .into_iter()
        .filter_map(|t| {
            let local = ray.transformed(&t.world.inverse());
            ray_aabb(&local, t.hit_box).map(|d| (d, t.key))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn unit_box() -> Aabb {
        Aabb::from_center_size(Vec3::ZERO, Vec3::ONE)
    }

    fn down_at(x: f32, z: f32) -> Ray {
        Ray { origin: Vec3::new(x, 10.0, z), dir: Vec3::NEG_Y }
    }

    #[test]
    fn slab_hits_and_misses() {
        let b = unit_box();
        assert_eq!(ray_aabb(&down_at(0.0, 0.0), &b), Some(9.5));
        assert_eq!(ray_aabb(&down_at(0.6, 0.0), &b), None);
        let away = Ray { origin: Vec3::new(0.0, 10.0, 0.0), dir: Vec3::Y };
        assert_eq!(ray_aabb(&away, &b), None);
        let inside = Ray { origin: Vec3::ZERO, dir: Vec3::X };
        assert_eq!(ray_aabb(&inside, &b), Some(0.0));
    }

    #[test]
    fn axis_parallel_ray_outside_a_slab_misses() {
        let r = Ray { origin: Vec3::new(0.0, 2.0, -5.0), dir: Vec3::Z };
        assert_eq!(ray_aabb(&r, &unit_box()), None);
    }

    #[test]
    fn nearest_target_wins() {
        let b = unit_box();
        let targets = [
            Target { key: "low", world: Mat4::from_translation(Vec3::new(0.0, 0.0, 0.0)), hit_box: &b },
            Target { key: "high", world: Mat4::from_translation(Vec3::new(0.0, 3.0, 0.0)), hit_box: &b },
        ];
        assert_eq!(pick(&down_at(0.0, 0.0), targets), Some("high"));
    }

    #[test]
    fn world_transform_is_respected() {
        let b = Aabb::from_center_size(Vec3::ZERO, Vec3::new(4.0, 1.0, 0.5));
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(0.5),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::new(5.0, 0.0, 0.0),
        );
        // Rotated a quarter turn and halved: long side now runs along z, 2 units.
        let hit = |x, z| pick(&down_at(x, z), [Target { key: 1, world, hit_box: &b }]);
        assert_eq!(hit(5.0, 0.9), Some(1));
        assert_eq!(hit(5.0, 1.1), None);
        assert_eq!(hit(5.2, 0.0), None);
    }
}
