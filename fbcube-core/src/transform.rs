/// 3D rotation and translation of mesh vertices
use nalgebra::{Matrix4, Point3, Vector3};

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Accumulate a per-tick increment
    pub fn advance(&mut self, step: &RotationState) {
        self.rotate(step.x, step.y, step.z);
    }

    pub fn negated(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Pure point transforms; inputs are never modified
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // X is applied first, then Y, then Z
        rz * ry * rx
    }

    /// The matrix that undoes [`Transform::rotation_matrix`]
    pub fn inverse_rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let inverse = rotation.negated();
        let rx = Matrix4::new_rotation(Vector3::new(inverse.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, inverse.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, inverse.z));

        rx * ry * rz
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Rotate a copy of `point` about X, then Y, then Z
    pub fn rotate(point: &Point3<f32>, rotation: &RotationState) -> Point3<f32> {
        Self::rotation_matrix(rotation).transform_point(point)
    }

    /// Apply the negated angles in Z, Y, X order
    pub fn inverse_rotate(point: &Point3<f32>, rotation: &RotationState) -> Point3<f32> {
        Self::inverse_rotation_matrix(rotation).transform_point(point)
    }

    pub fn translate(point: &Point3<f32>, dx: f32, dy: f32, dz: f32) -> Point3<f32> {
        Self::translation_matrix(dx, dy, dz).transform_point(point)
    }
}
