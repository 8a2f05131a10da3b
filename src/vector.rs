use std::ops::{Add, AddAssign, Div, Mul, Sub};

use macroquad::prelude::Vec3;

/// A plain 3D vector. Every operation returns a new value and leaves its operands alone.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Vector3D {
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) z: f32,
}

impl Vector3D {
    pub(crate) const fn new(x: f32, y: f32, z: f32) -> Vector3D {
        Vector3D { x, y, z }
    }

    pub(crate) const fn zero() -> Vector3D {
        Vector3D::new(0.0, 0.0, 0.0)
    }

    pub(crate) fn add(self, other: Vector3D) -> Vector3D {
        Vector3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub(crate) fn sub(self, other: Vector3D) -> Vector3D {
        Vector3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub(crate) fn scale(self, s: f32) -> Vector3D {
        Vector3D::new(self.x * s, self.y * s, self.z * s)
    }

    pub(crate) fn dot(self, other: Vector3D) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean norm. Callers dividing by this must check for zero first.
    pub(crate) fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Norm of the (x, y) pair only, the depth component is ignored
    pub(crate) fn horizontal_length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Default for Vector3D {
    fn default() -> Self {
        Vector3D::zero()
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, other: Vector3D) -> Vector3D {
        Vector3D::add(self, other)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, other: Vector3D) -> Vector3D {
        Vector3D::sub(self, other)
    }
}

impl Mul<f32> for Vector3D {
    type Output = Vector3D;

    fn mul(self, s: f32) -> Vector3D {
        self.scale(s)
    }
}

impl Div<f32> for Vector3D {
    type Output = Vector3D;

    fn div(self, s: f32) -> Vector3D {
        Vector3D::new(self.x / s, self.y / s, self.z / s)
    }
}

impl AddAssign for Vector3D {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl From<Vector3D> for Vec3 {
    fn from(v: Vector3D) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adding_zero_is_identity() {
        let u = Vector3D::new(1.5, -2.0, 7.25);
        assert_eq!(u.add(Vector3D::zero()), u);
        assert_eq!(u + Vector3D::zero(), u);
    }

    #[test]
    fn test_subtracting_self_is_zero() {
        let u = Vector3D::new(3.0, 4.0, -12.0);
        assert_eq!(u.sub(u), Vector3D::zero());
        assert_eq!(Vector3D::zero().length(), 0.0);
    }

    #[test]
    fn test_length_is_euclidean() {
        assert_eq!(Vector3D::new(3.0, 4.0, 12.0).length(), 13.0);
        assert_eq!(Vector3D::new(3.0, 4.0, 12.0).horizontal_length(), 5.0);
    }

    #[test]
    fn test_operations_leave_operands_untouched() {
        let u = Vector3D::new(1.0, 2.0, 3.0);
        let v = Vector3D::new(4.0, 5.0, 6.0);
        let sum = u + v;
        let scaled = u * 2.0;
        assert_eq!(u, Vector3D::new(1.0, 2.0, 3.0));
        assert_eq!(v, Vector3D::new(4.0, 5.0, 6.0));
        assert_eq!(sum, Vector3D::new(5.0, 7.0, 9.0));
        assert_eq!(scaled, Vector3D::new(2.0, 4.0, 6.0));
        assert_eq!(u.dot(v), 32.0);
    }

    #[test]
    fn test_assign_operators() {
        let mut u = Vector3D::new(1.0, 1.0, 1.0);
        u += Vector3D::new(1.0, 2.0, 3.0);
        assert_eq!(u, Vector3D::new(2.0, 3.0, 4.0));
        assert_eq!(u - Vector3D::new(2.0, 3.0, 4.0), Vector3D::zero());
        assert_eq!(Vector3D::new(2.0, 4.0, 8.0) / 2.0, Vector3D::new(1.0, 2.0, 4.0));
    }
}
