//! Orbit camera with clamped distance and polar angle.
//!
//! Input accumulates into pending deltas; [`OrbitCamera::update`] applies
//! a damped share of them each frame, so drags glide to a stop.

use std::f32::consts::TAU;

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::config::CameraConfig;
use crate::scene::picking::Ray;

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Angle around +Y, zero looking down -Z.
    pub azimuth: f32,
    /// Angle from +Y.
    pub polar: f32,
    pub fov_y: f32,
    pub aspect: f32,
    limits: CameraConfig,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_pan: Vec3,
    pending_zoom: f32,
}

const NEAR: f32 = 0.1;
const FAR: f32 = 200.0;
const SETTLED: f32 = 1e-5;

impl OrbitCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let eye = Vec3::from(config.position);
        let radius = eye.length().max(f32::EPSILON);
        let mut cam = Self {
            target: Vec3::ZERO,
            radius,
            azimuth: eye.x.atan2(eye.z),
            polar: (eye.y / radius).clamp(-1.0, 1.0).acos(),
            fov_y: config.fov_deg.to_radians(),
            aspect,
            limits: config.clone(),
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_pan: Vec3::ZERO,
            pending_zoom: 1.0,
        };
        cam.clamp();
        cam
    }

    fn clamp(&mut self) {
        self.radius = self.radius.clamp(self.limits.min_distance, self.limits.max_distance);
        self.polar = self.polar.clamp(self.limits.min_polar, self.limits.max_polar);
    }

    pub fn eye(&self) -> Vec3 {
        let s = self.polar.sin();
        self.target + Vec3::new(s * self.azimuth.sin(), self.polar.cos(), s * self.azimuth.cos()) * self.radius
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect.max(1e-6), NEAR, FAR)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Drag by `delta` pixels in a viewport `height` pixels tall. A drag
    /// across the full height turns one revolution.
    pub fn rotate(&mut self, delta: Vec2, height: f32) {
        let h = height.max(1.0);
        self.pending_azimuth -= TAU * delta.x / h;
        self.pending_polar -= TAU * delta.y / h;
    }

    /// Slide the target in the view plane, scaled so the point under the
    /// cursor follows it.
    pub fn pan(&mut self, delta: Vec2, height: f32) {
        let per_pixel = 2.0 * self.radius * (self.fov_y * 0.5).tan() / height.max(1.0);
        let view = self.view();
        let right = view.row(0).xyz();
        let up = view.row(1).xyz();
        self.pending_pan += (-right * delta.x + up * delta.y) * per_pixel;
    }

    /// Wheel zoom; positive `delta_y` zooms out like a browser scroll.
    pub fn zoom(&mut self, delta_y: f32) {
        let steps = (delta_y / 100.0).clamp(-5.0, 5.0);
        self.pending_zoom *= 0.95_f32.powf(-steps);
    }

    /// Applies a damped share of pending input. Returns true while the
    /// camera is still moving.
    pub fn update(&mut self) -> bool {
        let k = self.limits.damping.clamp(0.0, 1.0);
        self.azimuth += self.pending_azimuth * k;
        self.polar += self.pending_polar * k;
        self.target += self.pending_pan * k;
        self.radius *= self.pending_zoom.powf(k);
        self.pending_azimuth *= 1.0 - k;
        self.pending_polar *= 1.0 - k;
        self.pending_pan *= 1.0 - k;
        self.pending_zoom = self.pending_zoom.powf(1.0 - k);
        self.clamp();
        self.pending_azimuth.abs() > SETTLED
            || self.pending_polar.abs() > SETTLED
            || self.pending_pan.length_squared() > SETTLED
            || (self.pending_zoom - 1.0).abs() > SETTLED
    }

    /// World-space ray through pixel (x, y) of a `width`×`height` viewport.
    pub fn ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let ndc = Vec2::new(x / width.max(1.0) * 2.0 - 1.0, 1.0 - y / height.max(1.0) * 2.0);
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(ndc.extend(-1.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray { origin: near, dir: (far - near).normalize_or_zero() }
    }

    /// Pixel position of a world point, or `None` behind the camera.
    pub fn project(&self, world: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        Some(Vec2::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(&CameraConfig::default(), 16.0 / 9.0)
    }

    fn settle(cam: &mut OrbitCamera) {
        for _ in 0..1000 {
            if !cam.update() {
                break;
            }
        }
    }

    #[test]
    fn starts_at_the_configured_eye() {
        let cam = camera();
        assert!((cam.eye() - Vec3::new(0.0, 11.0, 13.0)).length() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = camera();
        for _ in 0..50 {
            cam.zoom(-500.0);
        }
        settle(&mut cam);
        assert!((cam.radius - 7.0).abs() < 1e-4);
        for _ in 0..50 {
            cam.zoom(500.0);
        }
        settle(&mut cam);
        assert!((cam.radius - 22.0).abs() < 1e-4);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut cam = camera();
        cam.rotate(Vec2::new(0.0, -5000.0), 800.0);
        settle(&mut cam);
        assert!(cam.polar <= std::f32::consts::PI / 2.05 + 1e-6);
        cam.rotate(Vec2::new(0.0, 5000.0), 800.0);
        settle(&mut cam);
        assert!(cam.polar >= 0.1 - 1e-6);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let mut cam = camera();
        let start = cam.azimuth;
        cam.rotate(Vec2::new(100.0, 0.0), 800.0);
        assert!(cam.update());
        let after_one = cam.azimuth - start;
        settle(&mut cam);
        let total = cam.azimuth - start;
        assert!(after_one.abs() < total.abs());
        assert!((total + TAU * 100.0 / 800.0).abs() < 1e-3);
    }

    #[test]
    fn centre_ray_hits_the_target() {
        let cam = camera();
        let ray = cam.ray(800.0, 450.0, 1600.0, 900.0);
        let to_target = (cam.target - ray.origin).normalize();
        assert!(ray.dir.dot(to_target) > 0.9999);
    }

    #[test]
    fn projection_inverts_the_ray() {
        let cam = camera();
        let px = cam.project(Vec3::new(2.0, 0.0, 1.0), 1600.0, 900.0).unwrap();
        let ray = cam.ray(px.x, px.y, 1600.0, 900.0);
        let to_point = (Vec3::new(2.0, 0.0, 1.0) - ray.origin).normalize();
        assert!(ray.dir.dot(to_point) > 0.9999);
    }

    #[test]
    fn pan_moves_the_target_only() {
        let mut cam = camera();
        let radius = cam.radius;
        cam.pan(Vec2::new(50.0, 0.0), 900.0);
        settle(&mut cam);
        assert!(cam.target.length() > 0.1);
        assert!((cam.radius - radius).abs() < 1e-4);
    }
}
