//! First person camera
//!
//! The camera looks along a direction given by yaw (around Y) and pitch.
//! Horizontal movement stays in the XZ plane no matter where the camera
//! looks, so looking down does not make "forward" dive into the floor.

use firecell_math::{mat4, Mat4, Vec3};

/// Default vertical field of view in degrees
pub const FOV_DEGREES: f32 = 60.0;
pub const NEAR_PLANE: f32 = 0.05;
pub const FAR_PLANE: f32 = 500.0;
/// Default movement speed in cells per second
pub const MOVING_SPEED: f32 = 15.0;

/// Pitch limit, just short of straight up/down
const MAX_PITCH: f32 = 89.0 * std::f32::consts::PI / 180.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Cells per second
    pub move_speed: f32,
    aspect_ratio: f32,
    yaw: f32,
    pitch: f32,
}

impl Camera {
    /// Camera at `position` looking down -Z
    pub fn new(position: Vec3, aspect_ratio: f32) -> Self {
        Self {
            position,
            fov: FOV_DEGREES,
            near: NEAR_PLANE,
            far: FAR_PLANE,
            move_speed: MOVING_SPEED,
            aspect_ratio,
            yaw: -std::f32::consts::FRAC_PI_2,
            pitch: 0.0,
        }
    }

    /// Camera placed outside a room of `space_size`, looking at its centre
    pub fn framing(space_size: Vec3, aspect_ratio: f32) -> Self {
        let centre = space_size * 0.5;
        let distance = space_size.x.max(space_size.y).max(space_size.z) * 1.5;
        let mut camera = Self::new(
            Vec3::new(centre.x, centre.y + distance * 0.5, centre.z + distance),
            aspect_ratio,
        );
        camera.look_at(centre);
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Unit vector the camera looks along
    pub fn direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
    }

    /// Mouse look, angles in radians
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Turn towards `target`
    pub fn look_at(&mut self, target: Vec3) {
        let d = target - self.position;
        if d.length_squared() == 0.0 {
            return;
        }
        let horizontal = (d.x * d.x + d.z * d.z).sqrt();
        self.yaw = d.z.atan2(d.x);
        self.pitch = d.y.atan2(horizontal).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Move along the view direction projected onto the XZ plane
    ///
    /// Negative `dt` moves backwards.
    pub fn move_forward(&mut self, dt: f32) {
        self.position += self.horizontal_direction() * (dt * self.move_speed);
    }

    /// Strafe perpendicular to the view direction, in the XZ plane
    pub fn move_right(&mut self, dt: f32) {
        let right = self.horizontal_direction().cross(Vec3::Y).normalized();
        self.position += right * (dt * self.move_speed);
    }

    pub fn move_up(&mut self, dt: f32) {
        self.position += Vec3::Y * (dt * self.move_speed);
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.position + self.direction(), Vec3::Y)
    }

    pub fn perspective_matrix(&self) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
    }

    fn horizontal_direction(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }
}
