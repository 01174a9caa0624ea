//! Rigid spatial transforms.
//!
//! A [`SpatialTransform`] maps coordinates from a child frame into its
//! parent frame: `p_parent = R * p_child + t`. Placements of joints and
//! geometries (`oMi`, `oMg`, reference placements) are all expressed with
//! this type.

use std::fmt;
use std::ops::Mul;

use nalgebra::{Matrix3, Matrix4, Point3, Quaternion, Rotation3, UnitQuaternion, Vector3};
use rand::Rng;

use crate::{Result, SimError, ToleranceConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum deviation of `RᵀR` from identity accepted when building a
/// transform from a raw matrix.
const ORTHONORMAL_TOLERANCE: f64 = 1e-6;

/// Rigid transform: rotation followed by translation.
///
/// # Example
///
/// ```
/// use sim_types::SpatialTransform;
/// use nalgebra::{Matrix4, Point3, Vector3};
///
/// let identity = SpatialTransform::identity();
/// assert_eq!(identity.homogeneous(), Matrix4::identity());
///
/// let shift = SpatialTransform::from_translation(Vector3::new(1.0, 2.0, 3.0));
/// let p = shift.transform_point(&Point3::origin());
/// assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpatialTransform {
    /// Orthonormal rotation (child axes expressed in the parent frame).
    pub rotation: Rotation3<f64>,
    /// Position of the child origin in the parent frame.
    pub translation: Vector3<f64>,
}

impl Default for SpatialTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl SpatialTransform {
    /// Identity rotation, zero translation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Create a transform from a rotation and a translation.
    #[must_use]
    pub const fn new(rotation: Rotation3<f64>, translation: Vector3<f64>) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Pure translation.
    #[must_use]
    pub fn from_translation(translation: Vector3<f64>) -> Self {
        Self {
            rotation: Rotation3::identity(),
            translation,
        }
    }

    /// Pure rotation.
    #[must_use]
    pub fn from_rotation(rotation: Rotation3<f64>) -> Self {
        Self {
            rotation,
            translation: Vector3::zeros(),
        }
    }

    /// Build a transform from a raw 3×3 matrix and a translation.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NonFinite`] if any entry is `NaN`/`Inf`, and
    /// [`SimError::NotOrthonormal`] if `rotation` is not a proper rotation.
    pub fn from_matrix_parts(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Result<Self> {
        if !rotation.iter().chain(translation.iter()).all(|x| x.is_finite()) {
            return Err(SimError::NonFinite);
        }

        let deviation = (rotation.transpose() * rotation - Matrix3::identity()).amax();
        let determinant = rotation.determinant();
        if deviation > ORTHONORMAL_TOLERANCE || (determinant - 1.0).abs() > ORTHONORMAL_TOLERANCE
        {
            return Err(SimError::NotOrthonormal {
                deviation,
                determinant,
            });
        }

        Ok(Self {
            rotation: Rotation3::from_matrix_unchecked(rotation),
            translation,
        })
    }

    /// Build a transform from a 4×4 homogeneous matrix `[[R, t], [0, 0, 0, 1]]`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidHomogeneous`] if the bottom row is not
    /// `[0, 0, 0, 1]`, otherwise the errors of [`Self::from_matrix_parts`].
    pub fn from_homogeneous(m: &Matrix4<f64>) -> Result<Self> {
        let row = [m[(3, 0)], m[(3, 1)], m[(3, 2)], m[(3, 3)]];
        let expected = [0.0, 0.0, 0.0, 1.0];
        if row
            .iter()
            .zip(expected.iter())
            .any(|(a, b)| !((a - b).abs() <= f64::EPSILON))
        {
            return Err(SimError::InvalidHomogeneous { row });
        }

        Self::from_matrix_parts(
            m.fixed_view::<3, 3>(0, 0).into_owned(),
            m.fixed_view::<3, 1>(0, 3).into_owned(),
        )
    }

    /// Random transform using the thread-local RNG.
    ///
    /// See [`Self::random_with`].
    #[must_use]
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Random transform drawn from `rng`.
    ///
    /// The rotation is uniformly distributed over SO(3) (Shoemake's
    /// subgroup algorithm on unit quaternions); each translation component is
    /// uniform in `[-1, 1]`.
    #[must_use]
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let u1: f64 = rng.r#gen();
        let u2: f64 = rng.r#gen();
        let u3: f64 = rng.r#gen();

        let (s1, s2) = ((1.0 - u1).sqrt(), u1.sqrt());
        let (a, b) = (std::f64::consts::TAU * u2, std::f64::consts::TAU * u3);
        let q = Quaternion::new(s2 * b.cos(), s1 * a.sin(), s1 * a.cos(), s2 * b.sin());

        let translation = Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );

        Self {
            rotation: UnitQuaternion::from_quaternion(q).to_rotation_matrix(),
            translation,
        }
    }

    /// 4×4 homogeneous matrix `[[R, t], [0, 0, 0, 1]]`.
    #[must_use]
    pub fn homogeneous(&self) -> Matrix4<f64> {
        let mut m = Matrix4::identity();
        m.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(self.rotation.matrix());
        m.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.translation);
        m
    }

    /// Compose two transforms: `self * other`.
    ///
    /// If `self` is `parent_M_child` and `other` is `child_M_grandchild`, the
    /// result is `parent_M_grandchild`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation: self.rotation * other.rotation,
            translation: self.translation + self.rotation * other.translation,
        }
    }

    /// Inverse transform.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let inv_rotation = self.rotation.inverse();
        Self {
            rotation: inv_rotation,
            translation: -(inv_rotation * self.translation),
        }
    }

    /// Map a point from the child frame to the parent frame.
    #[must_use]
    pub fn transform_point(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.rotation * p.coords + self.translation)
    }

    /// Map a vector from the child frame to the parent frame (rotation only).
    #[must_use]
    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.rotation * v
    }

    /// Re-orthonormalize the rotation after long chains of compositions.
    pub fn renormalize(&mut self) {
        self.rotation.renormalize();
    }

    /// Elementwise comparison of the homogeneous matrices within `tol`.
    #[must_use]
    pub fn is_approx(&self, other: &Self, tol: &ToleranceConfig) -> bool {
        let a = self.homogeneous();
        let b = other.homogeneous();
        a.iter().zip(b.iter()).all(|(x, y)| tol.is_close(*x, *y))
    }

    /// Whether the transform is free of `NaN` and `Inf`.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rotation.matrix().iter().all(|x| x.is_finite())
            && self.translation.iter().all(|x| x.is_finite())
    }
}

impl Mul for SpatialTransform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(&rhs)
    }
}

impl Mul<&SpatialTransform> for &SpatialTransform {
    type Output = SpatialTransform;

    fn mul(self, rhs: &SpatialTransform) -> SpatialTransform {
        self.compose(rhs)
    }
}

impl fmt::Display for SpatialTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R ={}t = {}",
            self.rotation.matrix(),
            self.translation.transpose()
        )
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::unreadable_literal
)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn is_orthonormal(r: &Rotation3<f64>) -> bool {
        let m = r.matrix();
        (m.transpose() * m - Matrix3::identity()).amax() < 1e-12
            && (m.determinant() - 1.0).abs() < 1e-12
    }

    #[test]
    fn test_identity_homogeneous() {
        assert_eq!(SpatialTransform::identity().homogeneous(), Matrix4::identity());
        assert_eq!(SpatialTransform::default(), SpatialTransform::identity());
    }

    #[test]
    fn test_homogeneous_layout() {
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let t = SpatialTransform::new(rot, Vector3::new(1.0, 2.0, 3.0));
        let h = t.homogeneous();

        assert_relative_eq!(h[(0, 3)], 1.0);
        assert_relative_eq!(h[(1, 3)], 2.0);
        assert_relative_eq!(h[(2, 3)], 3.0);
        assert_relative_eq!(h[(3, 3)], 1.0);
        assert_relative_eq!(h[(3, 0)], 0.0);
        assert_relative_eq!(h[(1, 0)], 1.0, epsilon = 1e-12);
        assert_relative_eq!(h[(0, 1)], -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_random_is_orthonormal() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let t = SpatialTransform::random_with(&mut rng);
            assert!(is_orthonormal(&t.rotation));
            assert!(t.translation.iter().all(|x| (-1.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn test_identity_composition() {
        let mut rng = StdRng::seed_from_u64(11);
        let tol = ToleranceConfig::default();
        for _ in 0..20 {
            let t = SpatialTransform::random_with(&mut rng);
            assert!((SpatialTransform::identity() * t).is_approx(&t, &tol));
            assert!((t * SpatialTransform::identity()).is_approx(&t, &tol));
        }
    }

    #[test]
    fn test_compose_matches_matrix_product() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = SpatialTransform::random_with(&mut rng);
        let b = SpatialTransform::random_with(&mut rng);
        let ab = &a * &b;
        let expected = a.homogeneous() * b.homogeneous();
        assert_relative_eq!(ab.homogeneous(), expected, epsilon = 1e-12);
        assert!(is_orthonormal(&ab.rotation));
    }

    #[test]
    fn test_inverse() {
        let mut rng = StdRng::seed_from_u64(5);
        let t = SpatialTransform::random_with(&mut rng);
        let round = t * t.inverse();
        assert!(round.is_approx(&SpatialTransform::identity(), &ToleranceConfig::strict()));
    }

    #[test]
    fn test_from_homogeneous_round_trip() {
        let mut rng = StdRng::seed_from_u64(13);
        let t = SpatialTransform::random_with(&mut rng);
        let back = SpatialTransform::from_homogeneous(&t.homogeneous()).unwrap();
        assert!(back.is_approx(&t, &ToleranceConfig::strict()));
    }

    #[test]
    fn test_from_homogeneous_rejects_bad_input() {
        let mut m = Matrix4::identity();
        m[(3, 2)] = 0.5;
        assert!(matches!(
            SpatialTransform::from_homogeneous(&m),
            Err(SimError::InvalidHomogeneous { .. })
        ));

        let mut m = Matrix4::identity();
        m[(0, 0)] = 2.0;
        assert!(matches!(
            SpatialTransform::from_homogeneous(&m),
            Err(SimError::NotOrthonormal { .. })
        ));

        // Reflection: orthogonal but det = -1.
        let reflect = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, -1.0));
        assert!(SpatialTransform::from_matrix_parts(reflect, Vector3::zeros()).is_err());

        let nan = Vector3::new(f64::NAN, 0.0, 0.0);
        assert_eq!(
            SpatialTransform::from_matrix_parts(Matrix3::identity(), nan),
            Err(SimError::NonFinite)
        );
    }

    #[test]
    fn test_transform_point_and_vector() {
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), std::f64::consts::FRAC_PI_2);
        let t = SpatialTransform::new(rot, Vector3::new(0.0, 0.0, 1.0));

        let p = t.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 1.0), epsilon = 1e-12);

        let v = t.transform_vector(&Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_is_approx_detects_difference() {
        let tol = ToleranceConfig::default();
        let a = SpatialTransform::identity();
        let b = SpatialTransform::from_translation(Vector3::new(1e-3, 0.0, 0.0));
        assert!(!a.is_approx(&b, &tol));
        assert!(a.is_approx(&b, &ToleranceConfig::new(0.0, 1e-2)));
    }

    #[test]
    fn test_renormalize_keeps_rotation() {
        let mut rng = StdRng::seed_from_u64(17);
        let step = SpatialTransform::random_with(&mut rng);
        let mut acc = SpatialTransform::identity();
        for _ in 0..1000 {
            acc = acc * step;
        }
        acc.renormalize();
        assert!(is_orthonormal(&acc.rotation));
        assert!(acc.is_finite());
    }
}
