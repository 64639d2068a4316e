//! Camera boundary: world-to-screen projection and the orbit control that a
//! cube gesture suspends.

use glam::{Mat4, Quat, Vec2, Vec3};

/// Maps world points to normalized screen space (x right, y up, both in
/// `[-1, 1]` across the viewport).
pub trait Projector {
    fn project(&self, world: Vec3) -> Vec2;
}

/// The orbiting camera controller, paused while the user drags on the cube.
pub trait OrbitControl {
    fn suspend(&mut self);
    fn resume(&mut self);
}

/// Converts a pixel position (origin top-left, y down) to normalized screen
/// coordinates.
pub fn pixel_to_ndc(pixel: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        pixel.x / viewport.x * 2.0 - 1.0,
        1.0 - pixel.y / viewport.y * 2.0,
    )
}

/// A world ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

/// A fixed view-projection matrix (OpenGL clip conventions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewProjection {
    pub matrix: Mat4,
}

impl ViewProjection {
    pub fn new(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// The ray through a point in normalized screen space, from the near
    /// plane towards the far plane.
    pub fn ray(&self, ndc: Vec2) -> Option<Ray> {
        let inverse = self.matrix.inverse();
        let near = inverse.project_point3(ndc.extend(-1.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        let direction = (far - near).try_normalize()?;
        near.is_finite().then_some(Ray {
            origin: near,
            direction,
        })
    }
}

impl Projector for ViewProjection {
    fn project(&self, world: Vec3) -> Vec2 {
        self.matrix.project_point3(world).truncate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lens {
    Perspective { fov_y: f32 },
    /// Visible height in world units.
    Orthographic { height: f32 },
}

/// A look-at camera orbiting a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub lens: Lens,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    orbit_enabled: bool,
}

impl Camera {
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            eye,
            target,
            up,
            lens: Lens::Perspective {
                fov_y: std::f32::consts::FRAC_PI_4,
            },
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
            orbit_enabled: true,
        }
    }

    pub fn with_lens(mut self, lens: Lens) -> Self {
        self.lens = lens;
        self
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.lens {
            Lens::Perspective { fov_y } => {
                Mat4::perspective_rh_gl(fov_y, self.aspect, self.near, self.far)
            }
            Lens::Orthographic { height } => {
                let half_h = height / 2.0;
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        }
    }

    pub fn view_projection(&self) -> ViewProjection {
        ViewProjection::new(self.projection_matrix() * self.view_matrix())
    }

    pub fn is_orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    /// Swings the eye around the target: `yaw` about the up vector, `pitch`
    /// about the camera's right vector. Ignored while suspended.
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        if !self.orbit_enabled {
            return;
        }
        let offset = self.eye - self.target;
        let right = offset.cross(self.up).normalize_or_zero();
        let rotation = Quat::from_axis_angle(self.up.normalize_or_zero(), yaw)
            * Quat::from_axis_angle(right, pitch);
        let swung = rotation * offset;
        // keep away from the poles where look_at degenerates
        if swung.normalize_or_zero().dot(self.up.normalize_or_zero()).abs() < 0.99 {
            self.eye = self.target + swung;
        }
    }
}

impl Projector for Camera {
    fn project(&self, world: Vec3) -> Vec2 {
        self.view_projection().project(world)
    }
}

impl OrbitControl for Camera {
    fn suspend(&mut self) {
        self.orbit_enabled = false;
    }

    fn resume(&mut self) {
        self.orbit_enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthographic_lens() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y)
            .with_lens(Lens::Orthographic { height: 4.0 });
        // no perspective shrink: depth does not change the projection
        for depth in [0.0, -3.0] {
            let projected = camera.project(Vec3::new(1.0, 0.0, depth));
            assert!(projected.abs_diff_eq(Vec2::new(0.5, 0.0), 1e-5));
        }

        let ray = camera.view_projection().ray(Vec2::new(0.5, 0.5));
        assert!(ray.is_some_and(|ray| {
            ray.direction.abs_diff_eq(Vec3::NEG_Z, 1e-4)
                && ray.origin.truncate().abs_diff_eq(Vec2::new(1.0, 1.0), 1e-4)
        }));
    }

    #[test]
    fn test_target_projects_to_centre() {
        let camera = Camera::look_at(Vec3::new(4.0, 5.0, 6.0), Vec3::ZERO, Vec3::Y);
        assert!(camera.project(Vec3::ZERO).abs_diff_eq(Vec2::ZERO, 1e-5));
    }

    #[test]
    fn test_screen_axes_front_view() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y);
        let origin = camera.project(Vec3::ZERO);
        assert!(camera.project(Vec3::X).x > origin.x);
        assert!(camera.project(Vec3::Y).y > origin.y);
    }

    #[test]
    fn test_ray_through_centre_hits_target() {
        let eye = Vec3::new(3.0, 3.0, 3.0);
        let camera = Camera::look_at(eye, Vec3::ZERO, Vec3::Y);
        let ray = camera.view_projection().ray(Vec2::ZERO);
        let expected = (-eye).normalize();
        assert!(ray.is_some_and(|ray| ray.direction.abs_diff_eq(expected, 1e-4)));
    }

    #[test]
    fn test_pixel_to_ndc() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(pixel_to_ndc(Vec2::new(400.0, 300.0), viewport), Vec2::ZERO);
        assert_eq!(pixel_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_suspended_orbit_does_not_move() {
        let mut camera = Camera::look_at(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y);
        camera.suspend();
        camera.orbit(0.5, 0.2);
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 6.0));
        camera.resume();
        camera.orbit(0.5, 0.0);
        assert_ne!(camera.eye, Vec3::new(0.0, 0.0, 6.0));
        assert!((camera.eye.length() - 6.0).abs() < 1e-4);
    }
}
