//! 3x3 rotation matrix.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat3 * Vec`
//! - Per-axis rotations are right-handed, angles are in **degrees**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Euler order
//! [`Mat3::from_euler_degrees`] builds `Rz * Rx * Ry`: yaw about Y is applied
//! first, then pitch about X, then roll about Z. [`Mat3::to_euler_degrees`]
//! is its inverse.

use std::ops::Mul;

use super::vec3::Vec3;

/// Threshold on `|sin(pitch)|` above which the decomposition is treated as
/// gimbal-locked.
const GIMBAL_LOCK: f32 = 1.0 - 1e-6;

/// Returns `(sin, cos)` of an angle in degrees, exact for quarter turns.
pub fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let turn = degrees.rem_euclid(360.0);
    if turn == 0.0 {
        (0.0, 1.0)
    } else if turn == 90.0 {
        (1.0, 0.0)
    } else if turn == 180.0 {
        (0.0, -1.0)
    } else if turn == 270.0 {
        (-1.0, 0.0)
    } else {
        turn.to_radians().sin_cos()
    }
}

/// 3x3 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    data: [[f32; 3]; 3],
}

impl Mat3 {
    pub fn new(data: [[f32; 3]; 3]) -> Self {
        Mat3 { data }
    }

    pub fn identity() -> Self {
        Mat3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Creates a rotation matrix around the X axis.
    pub fn rotation_x(degrees: f32) -> Self {
        let (s, c) = sin_cos_degrees(degrees);
        Mat3::new([[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]])
    }

    /// Creates a rotation matrix around the Y axis.
    pub fn rotation_y(degrees: f32) -> Self {
        let (s, c) = sin_cos_degrees(degrees);
        Mat3::new([[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]])
    }

    /// Creates a rotation matrix around the Z axis.
    pub fn rotation_z(degrees: f32) -> Self {
        let (s, c) = sin_cos_degrees(degrees);
        Mat3::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Builds the fixed-order rotation `Rz * Rx * Ry` from `(x, y, z)` degrees.
    pub fn from_euler_degrees(angles: Vec3) -> Self {
        Mat3::rotation_z(angles.z) * Mat3::rotation_x(angles.x) * Mat3::rotation_y(angles.y)
    }

    /// Decomposes a rotation matrix into the angles accepted by
    /// [`Mat3::from_euler_degrees`].
    ///
    /// For `Rz(c) * Rx(a) * Ry(b)`:
    ///
    /// ```text
    /// m[2][1] =  sin(a)
    /// m[2][0] = -cos(a) sin(b)    m[2][2] = cos(a) cos(b)
    /// m[0][1] = -sin(c) cos(a)    m[1][1] = cos(c) cos(a)
    /// ```
    ///
    /// When `cos(a)` vanishes, Y and Z rotate about the same view axis and only
    /// `c + b` (pitch +90°) or `c - b` (pitch -90°) survives. The canonical
    /// answer then puts all of it in Z and returns Y = 0.
    pub fn to_euler_degrees(&self) -> Vec3 {
        let m = &self.data;
        let sin_a = m[2][1].clamp(-1.0, 1.0);

        if sin_a.abs() < GIMBAL_LOCK {
            let a = sin_a.asin();
            let b = (-m[2][0]).atan2(m[2][2]);
            let c = (-m[0][1]).atan2(m[1][1]);
            Vec3::new(a.to_degrees(), b.to_degrees(), c.to_degrees())
        } else {
            let a = if sin_a > 0.0 { 90.0 } else { -90.0 };
            let c = m[1][0].atan2(m[0][0]);
            Vec3::new(a, 0.0, c.to_degrees())
        }
    }

    /// Returns the transpose, which is also the inverse of a rotation.
    pub fn transpose(&self) -> Self {
        let m = &self.data;
        Mat3::new([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix multiplication: Mat3 * Mat3.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat3> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Self::Output {
        let mut result = [[0.0f32; 3]; 3];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col];
            }
        }

        Mat3::new(result)
    }
}

/// Transform a vector: Mat3 * Vec3 (column vector).
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        Vec3::new(
            self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z,
            self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z,
            self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z,
        )
    }
}
