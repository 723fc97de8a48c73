//! Model transform with a lazily rebuilt matrix

use firecell_math::{mat4, Mat4, Vec3};

/// Position, Euler rotation (radians, applied X then Y then Z) and scale
///
/// The model matrix is `T * Rx * Ry * Rz * S` and is only rebuilt after
/// one of the components changed.
#[derive(Debug, Clone)]
pub struct Transformation {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
    cached: Option<Mat4>,
}

impl Default for Transformation {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0))
    }
}

impl Transformation {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
            cached: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.cached = None;
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.cached = None;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.cached = None;
    }

    /// Whether the next [`model_matrix`](Self::model_matrix) call rebuilds
    pub fn is_dirty(&self) -> bool {
        self.cached.is_none()
    }

    pub fn model_matrix(&mut self) -> Mat4 {
        if let Some(m) = self.cached {
            return m;
        }
        let m = [
            mat4::rotation_x(self.rotation.x),
            mat4::rotation_y(self.rotation.y),
            mat4::rotation_z(self.rotation.z),
            mat4::scaling(self.scale),
        ]
        .into_iter()
        .fold(mat4::translation(self.position), mat4::mul);
        self.cached = Some(m);
        m
    }

    pub fn transform_point(&mut self, point: Vec3) -> Vec3 {
        mat4::transform_point(self.model_matrix(), point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_is_identity() {
        let mut t = Transformation::default();
        assert_eq!(t.model_matrix(), mat4::IDENTITY);
    }

    #[test]
    fn test_scale_rotate_translate_order() {
        let mut t = Transformation::new(
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -FRAC_PI_2),
            Vec3::new(2.0, 2.0, 2.0),
        );
        let p = t.transform_point(Vec3::new(1.0, 1.0, 0.0));
        assert!(p.distance(Vec3::new(3.0, -2.0, 1.0)) < 1e-5, "{:?}", p);
    }

    #[test]
    fn test_matrix_cached_until_changed() {
        let mut t = Transformation::default();
        assert!(t.is_dirty());
        t.model_matrix();
        assert!(!t.is_dirty());

        t.set_position(Vec3::new(0.0, 5.0, 0.0));
        assert!(t.is_dirty());
        assert_eq!(t.model_matrix()[3][1], 5.0);
        assert!(!t.is_dirty());
    }
}
