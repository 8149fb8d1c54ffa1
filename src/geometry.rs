//! Fundamental geometric types for frame scenes.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Members shorter than this are treated as coincident endpoints.
pub const MIN_MEMBER_LENGTH: f64 = 1.0e-9;

/// Position or direction in three dimensional space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// Component along the global X axis.
    pub x: f64,
    /// Component along the global Y axis.
    pub y: f64,
    /// Component along the global Z axis.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    /// Create a [`Vec3`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a [`Vec3`] whose components are all NaN.
    ///
    /// Used for nodes kept under
    /// [`NodeValidation::Propagate`](crate::NodeValidation::Propagate).
    #[must_use]
    pub const fn nan() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN)
    }

    /// Convert into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Euclidean length, without overflow for large finite components.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Point halfway between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Vec3) -> Vec3 {
        let start = self.to_vector();
        Vec3::from(start + (other.to_vector() - start) * 0.5)
    }

    /// True when every component is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Vector3<f64>> for Vec3 {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Vec3> for Vector3<f64> {
    fn from(value: Vec3) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Vec3`] instances.
///
/// # Examples
/// ```
/// use framescene::vec3;
///
/// let corner = vec3(1.0, 0.0, -5.0);
/// assert_eq!(corner.z, -5.0);
/// ```
#[must_use]
pub const fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Rotation from a primitive's local frame into world space, stored as a unit
/// quaternion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Imaginary `i` component.
    pub x: f64,
    /// Imaginary `j` component.
    pub y: f64,
    /// Imaginary `k` component.
    pub z: f64,
    /// Real component.
    pub w: f64,
}

impl Orientation {
    /// No rotation.
    pub const IDENTITY: Orientation = Orientation {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Rotation of `angle` radians about one of the world axes.
    #[must_use]
    pub fn about_axis(axis: Axis, angle: f64) -> Self {
        UnitQuaternion::from_axis_angle(&axis.unit(), angle).into()
    }

    /// Orientation that lays a primitive's local Y axis along `direction`.
    ///
    /// The primitive is first turned so its local +Z faces along `direction`
    /// (a look-at with world +Y as up), then given a fixed quarter turn about
    /// its local X axis. Returns `None` when `direction` is too short or not
    /// finite to define a heading.
    ///
    /// # Examples
    /// ```
    /// use approx::assert_relative_eq;
    /// use framescene::{vec3, Orientation};
    ///
    /// let orientation = Orientation::along(vec3(0.0, 0.0, 4.0)).expect("non-zero direction");
    /// let axis = orientation.long_axis();
    /// assert_relative_eq!(axis.z, 1.0, epsilon = 1.0e-12);
    /// ```
    #[must_use]
    pub fn along(direction: Vec3) -> Option<Self> {
        let dir = direction.to_vector();
        let length = direction.length();
        if !length.is_finite() || length <= MIN_MEMBER_LENGTH {
            return None;
        }
        let forward = dir / length;
        let mut up = Vector3::y();
        // Looking straight up or down leaves the look-at basis undefined.
        if up.cross(&forward).norm() <= MIN_MEMBER_LENGTH {
            up = Vector3::new(0.0, 0.0, -forward.y.signum());
        }
        let look = UnitQuaternion::face_towards(&forward, &up);
        let quarter_turn = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), FRAC_PI_2);
        Some((look * quarter_turn).into())
    }

    /// Convert into an algebraic unit quaternion.
    #[must_use]
    pub fn to_unit_quaternion(self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
            self.w, self.x, self.y, self.z,
        ))
    }

    /// Rotate a local-space vector into world space.
    #[must_use]
    pub fn rotate(self, local: Vec3) -> Vec3 {
        Vec3::from(self.to_unit_quaternion() * local.to_vector())
    }

    /// World direction of the primitive's local Y axis.
    #[must_use]
    pub fn long_axis(self) -> Vec3 {
        self.rotate(vec3(0.0, 1.0, 0.0))
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<UnitQuaternion<f64>> for Orientation {
    fn from(value: UnitQuaternion<f64>) -> Self {
        Self {
            x: value.i,
            y: value.j,
            z: value.k,
            w: value.w,
        }
    }
}

/// One of the three world axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Unit vector along the axis.
    #[must_use]
    pub fn unit_vector(self) -> Vec3 {
        match self {
            Axis::X => vec3(1.0, 0.0, 0.0),
            Axis::Y => vec3(0.0, 1.0, 0.0),
            Axis::Z => vec3(0.0, 0.0, 1.0),
        }
    }

    /// The axis as a normalized nalgebra vector.
    fn unit(self) -> nalgebra::Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}
