// Copyright contributors to the EPR Spin Simulator project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::f64::consts::TAU;
use std::fmt::{Display, Formatter};

use num_complex::Complex64;

use crate::spinor::Spinor;

/// Smallest magnitude we accept before declaring a vector unnormalizable.
const MIN_MAGNITUDE: f64 = 1e-12;

/// Orientation of a Stern-Gerlach-style measurement apparatus,
/// stored as a unit vector in R^3.
///
/// Immutable once constructed. Angles are accepted in degrees at the
/// boundary and wrapped onto the sphere rather than rejected; the
/// `theta`/`phi` accessors always report the canonical ranges
/// theta in [0, pi] and phi in [0, 2pi).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DirectionError {
    ZeroMagnitude { magnitude: f64 },
}

impl Display for DirectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroMagnitude { magnitude } => write!(
                f,
                "cannot normalize direction vector with magnitude {magnitude:e}"
            ),
        }
    }
}

impl std::error::Error for DirectionError {}

impl Direction {
    pub const Z: Direction = Direction {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };
    pub const X: Direction = Direction {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const Y: Direction = Direction {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Build a direction from polar angles given in degrees.
    ///
    /// Any real angles are accepted; values outside the canonical
    /// ranges wrap onto the sphere (e.g. theta = 240 is the same
    /// direction as theta = 120 with phi shifted by 180).
    pub fn from_angles(theta_deg: f64, phi_deg: f64) -> Self {
        let theta = theta_deg.to_radians();
        let phi = phi_deg.to_radians();
        Direction {
            x: theta.sin() * phi.cos(),
            y: theta.sin() * phi.sin(),
            z: theta.cos(),
        }
    }

    /// Normalize a Cartesian vector into a direction.
    pub fn from_cartesian(x: f64, y: f64, z: f64) -> Result<Self, DirectionError> {
        let magnitude = (x * x + y * y + z * z).sqrt();
        if magnitude < MIN_MAGNITUDE {
            return Err(DirectionError::ZeroMagnitude { magnitude });
        }
        Ok(Direction {
            x: x / magnitude,
            y: y / magnitude,
            z: z / magnitude,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Polar angle in radians, in [0, pi].
    pub fn theta(&self) -> f64 {
        self.z.clamp(-1.0, 1.0).acos()
    }

    /// Azimuthal angle in radians, in [0, 2pi).
    pub fn phi(&self) -> f64 {
        let phi = self.y.atan2(self.x);
        if phi < 0.0 { phi + TAU } else { phi }
    }

    /// The antipodal direction.
    pub fn opposite(&self) -> Self {
        Direction {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Angle between two directions in radians, in [0, pi].
    ///
    /// The dot product is clamped so antiparallel inputs never
    /// produce NaN from rounding past -1.
    pub fn angle_between(&self, other: &Self) -> f64 {
        self.dot(other).clamp(-1.0, 1.0).acos()
    }

    /// The spin-up eigenstate along this direction,
    /// `[cos(theta/2), e^{i phi} sin(theta/2)]` in the {up, down} basis.
    ///
    /// The down eigenstate is `self.opposite().spinor()`; the two are
    /// orthogonal (up to a physically irrelevant global phase).
    pub fn spinor(&self) -> Spinor {
        let half_theta = self.theta() / 2.0;
        let phi = self.phi();
        Spinor::new(
            Complex64::new(half_theta.cos(), 0.0),
            Complex64::from_polar(half_theta.sin(), phi),
        )
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn axes_from_angles() {
        let z = Direction::from_angles(0.0, 0.0);
        assert!((z.z() - 1.0).abs() < TOL);
        assert!(z.x().abs() < TOL);

        let x = Direction::from_angles(90.0, 0.0);
        assert!((x.x() - 1.0).abs() < TOL);
        assert!(x.z().abs() < TOL);

        let y = Direction::from_angles(90.0, 90.0);
        assert!((y.y() - 1.0).abs() < TOL);
    }

    #[test]
    fn angles_wrap_onto_sphere() {
        // theta = 240 is theta = 120 on the far side of the z-axis
        let wrapped = Direction::from_angles(240.0, 0.0);
        let unwrapped = Direction::from_angles(120.0, 180.0);
        assert!(wrapped.angle_between(&unwrapped) < 1e-9);
        assert!(wrapped.theta() <= PI);
        assert!((0.0..TAU).contains(&wrapped.phi()));
    }

    #[test]
    fn cartesian_normalizes() {
        let dir = Direction::from_cartesian(0.0, 0.0, 5.0).unwrap();
        assert!((dir.z() - 1.0).abs() < TOL);
        let dir = Direction::from_cartesian(1.0, 1.0, 1.0).unwrap();
        let norm = (dir.x().powi(2) + dir.y().powi(2) + dir.z().powi(2)).sqrt();
        assert!((norm - 1.0).abs() < TOL);
    }

    #[test]
    fn zero_magnitude_is_rejected() {
        let err = Direction::from_cartesian(0.0, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, DirectionError::ZeroMagnitude { .. }));
    }

    #[test]
    fn angle_between_boundaries() {
        let dir = Direction::from_angles(37.0, 12.0);
        assert!(dir.angle_between(&dir) < TOL);
        assert!((dir.angle_between(&dir.opposite()) - PI).abs() < TOL);

        assert!((Direction::Z.angle_between(&Direction::X) - FRAC_PI_2).abs() < TOL);
    }

    #[test]
    fn spinor_eigenstates_are_orthogonal() {
        for (theta, phi) in [(0.0, 0.0), (90.0, 0.0), (63.0, 201.0), (180.0, 45.0)] {
            let dir = Direction::from_angles(theta, phi);
            let up = dir.spinor();
            let down = dir.opposite().spinor();
            assert!((up.norm() - 1.0).abs() < 1e-9);
            assert!(up.inner(&down).norm() < 1e-9);
        }
    }
}
