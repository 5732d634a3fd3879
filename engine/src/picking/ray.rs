//! Rays and Pick Camera
//!
//! Turns a normalized screen position into a world-space ray and intersects
//! that ray with boxes, extruded cell outlines and horizontal planes.

use glam::{Mat4, Vec2, Vec3};

/// A half-line in world space. `direction` is always normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Builds the ray under an NDC position (x, y in `-1..=1`, y up).
    ///
    /// The near and far clip points are unprojected through the inverse
    /// view-projection; the ray starts at the camera position and passes
    /// through both.
    pub fn from_ndc(camera: &PickCamera, ndc: Vec2) -> Self {
        let inv = camera.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Self::new(camera.position, far - near)
    }

    /// Distance along the ray to the box `[min, max]`, if it is hit.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        ray_aabb_intersect(self.origin, self.direction, min, max)
    }

    /// Distance along the ray to an extruded convex outline, if it is hit.
    pub fn intersect_prism(&self, base: Vec3, outline: &[Vec2], height: f32) -> Option<f32> {
        ray_prism_intersect(self.origin, self.direction, base, outline, height)
    }

    /// Intersection with the horizontal plane `y = height`.
    ///
    /// Returns `None` when the ray runs parallel to the plane or the plane
    /// lies behind the origin.
    pub fn intersect_plane_y(&self, height: f32) -> Option<Vec3> {
        if self.direction.y.abs() < 1e-4 {
            return None;
        }
        let t = (height - self.origin.y) / self.direction.y;
        if t < 0.0 {
            return None;
        }
        Some(self.at(t))
    }
}

/// Slab-method ray/box test.
///
/// Returns the nearest non-negative `t`. A ray that starts inside the box
/// reports the exit distance.
pub fn ray_aabb_intersect(origin: Vec3, dir: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = |d: f32| if d.abs() > 1e-10 { 1.0 / d } else { f32::MAX * d.signum() };
    let inv_dir = Vec3::new(inv(dir.x), inv(dir.y), inv(dir.z));

    let t1 = (min - origin) * inv_dir;
    let t2 = (max - origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        Some(if t_min >= 0.0 { t_min } else { t_max })
    } else {
        None
    }
}

/// Ray against a convex outline (X/Z offsets from `base`) extruded from
/// `base.y` up to `base.y + height`.
///
/// Same slab clipping as [`ray_aabb_intersect`], with one slab per outline
/// edge instead of per axis. Neighboring cells share edges, so a point on
/// the board falls inside exactly one outline, unlike their bounding boxes.
pub fn ray_prism_intersect(
    origin: Vec3,
    dir: Vec3,
    base: Vec3,
    outline: &[Vec2],
    height: f32,
) -> Option<f32> {
    if outline.len() < 3 || dir == Vec3::ZERO {
        return None;
    }

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    // Points on the ray satisfy `t * den <= num` inside each half-space
    let mut clip = |num: f32, den: f32| -> bool {
        if den.abs() < 1e-10 {
            return num >= 0.0;
        }
        let t = num / den;
        if den > 0.0 {
            t_max = t_max.min(t);
        } else {
            t_min = t_min.max(t);
        }
        true
    };

    if !clip(base.y + height - origin.y, dir.y) || !clip(origin.y - base.y, -dir.y) {
        return None;
    }

    let center = outline.iter().copied().sum::<Vec2>() / outline.len() as f32;
    let rel = Vec2::new(origin.x - base.x, origin.z - base.z);
    let dir_xz = Vec2::new(dir.x, dir.z);
    for (i, &a) in outline.iter().enumerate() {
        let b = outline[(i + 1) % outline.len()];
        let edge = b - a;
        let mut normal = Vec2::new(edge.y, -edge.x);
        if normal.dot((a + b) * 0.5 - center) < 0.0 {
            normal = -normal;
        }
        if !clip(normal.dot(a - rel), normal.dot(dir_xz)) {
            return None;
        }
    }

    if t_max >= t_min && t_max >= 0.0 {
        Some(if t_min >= 0.0 { t_min } else { t_max })
    } else {
        None
    }
}

/// Perspective camera parameters used for picking.
///
/// Right-handed, Y up, depth `0..1` (glam's `perspective_rh`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PickCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 100.0, 100.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 50f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: 5000.0,
        }
    }
}

impl PickCamera {
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            ..Self::default()
        }
    }

    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn view(&self) -> Mat4 {
        let forward = (self.target - self.position).normalize_or_zero();
        // look_at_rh degenerates when up is parallel to the view direction
        let up = if forward.cross(self.up).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            self.up
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Ray through an NDC position.
    pub fn ray(&self, ndc: Vec2) -> Ray {
        Ray::from_ndc(self, ndc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = PickCamera::looking_at(Vec3::new(0.0, 50.0, 50.0), Vec3::ZERO);
        let ray = camera.ray(Vec2::ZERO);
        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!((ray.direction - expected).length() < EPS);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn test_top_down_camera() {
        let camera = PickCamera::looking_at(Vec3::new(0.0, 100.0, 0.0), Vec3::ZERO);
        let ray = camera.ray(Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Y).length() < EPS);

        let hit = ray.intersect_plane_y(0.0).unwrap();
        assert!(hit.length() < EPS);
    }

    #[test]
    fn test_plane_behind_or_parallel() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(ray.intersect_plane_y(0.0).is_none());

        let flat = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(flat.intersect_plane_y(0.0).is_none());
    }

    #[test]
    fn test_aabb_hit_and_miss() {
        let ray = Ray::new(Vec3::new(-10.0, 0.5, 0.5), Vec3::X);
        let t = ray.intersect_aabb(Vec3::ZERO, Vec3::ONE).unwrap();
        assert!((t - 10.0).abs() < EPS);

        let miss = Ray::new(Vec3::new(-10.0, 5.0, 0.5), Vec3::X);
        assert!(miss.intersect_aabb(Vec3::ZERO, Vec3::ONE).is_none());
    }

    #[test]
    fn test_aabb_from_inside() {
        let ray = Ray::new(Vec3::splat(0.5), Vec3::X);
        let t = ray.intersect_aabb(Vec3::ZERO, Vec3::ONE).unwrap();
        assert!((t - 0.5).abs() < EPS);
    }

    fn hexagon(radius: f32) -> Vec<Vec2> {
        crate::cell::CellShape::Hex.outline(radius, 1.0)
    }

    #[test]
    fn test_prism_top_hit() {
        let ray = Ray::new(Vec3::new(2.0, 20.0, 1.0), Vec3::NEG_Y);
        let t = ray.intersect_prism(Vec3::ZERO, &hexagon(10.0), 4.0).unwrap();
        assert!((t - 16.0).abs() < EPS);
    }

    #[test]
    fn test_prism_misses_bounding_box_corner() {
        // Inside the hexagon's bounding box, outside the hexagon itself
        let ray = Ray::new(Vec3::new(8.0, 20.0, 8.0), Vec3::NEG_Y);
        assert!(ray.intersect_aabb(Vec3::new(-10.0, 0.0, -8.66), Vec3::new(10.0, 4.0, 8.66)).is_some());
        assert!(ray.intersect_prism(Vec3::ZERO, &hexagon(10.0), 4.0).is_none());
    }

    #[test]
    fn test_prism_side_hit() {
        let ray = Ray::new(Vec3::new(-30.0, 2.0, 0.0), Vec3::X);
        let t = ray.intersect_prism(Vec3::ZERO, &hexagon(10.0), 4.0).unwrap();
        assert!((t - 20.0).abs() < EPS);

        let above = Ray::new(Vec3::new(-30.0, 5.0, 0.0), Vec3::X);
        assert!(above.intersect_prism(Vec3::ZERO, &hexagon(10.0), 4.0).is_none());
    }

    #[test]
    fn test_prism_offset_base_and_inside() {
        let base = Vec3::new(15.0, 3.0, 8.660254);
        let ray = Ray::new(base + Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let t = ray.intersect_prism(base, &hexagon(10.0), 4.0).unwrap();
        assert!((t - 1.0).abs() < EPS);

        let behind = Ray::new(base + Vec3::new(0.0, 10.0, 0.0), Vec3::Y);
        assert!(behind.intersect_prism(base, &hexagon(10.0), 4.0).is_none());
    }

    #[test]
    fn test_aabb_behind() {
        let ray = Ray::new(Vec3::new(5.0, 0.5, 0.5), Vec3::X);
        assert!(ray.intersect_aabb(Vec3::ZERO, Vec3::ONE).is_none());
    }
}
