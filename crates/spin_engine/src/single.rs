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

use num_complex::Complex64;
use rand::Rng;

use spin_common::{Direction, Outcome, Spinor};

use crate::{NORM_TOLERANCE, StateError};

/// Pure state of a single spin-1/2 system in the fixed {up, down} basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinState {
    amplitudes: Spinor,
}

/// Result of a single-spin measurement: the sampled outcome and the
/// post-collapse state.
///
/// Collapse is modeled as a value returned to the caller rather than a
/// mutation of the measured state, so reusing the pre-measurement state
/// across independent trials cannot alias with a collapsed one. Thread
/// `collapsed` into the next `measure` call to simulate sequential
/// measurements of one physical spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub outcome: Outcome,
    pub collapsed: SpinState,
}

impl SpinState {
    /// The basis state |u>.
    pub fn up() -> Self {
        Self {
            amplitudes: Spinor::new(Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)),
        }
    }

    /// The basis state |d>.
    pub fn down() -> Self {
        Self {
            amplitudes: Spinor::new(Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)),
        }
    }

    /// The spin-up eigenstate along `direction`.
    pub fn along(direction: &Direction) -> Self {
        Self {
            amplitudes: direction.spinor(),
        }
    }

    /// Build a state from explicit amplitudes, validating normalization.
    pub fn from_amplitudes(up: Complex64, down: Complex64) -> Result<Self, StateError> {
        let amplitudes = Spinor::new(up, down);
        let norm = amplitudes.norm();
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(StateError::NotNormalized { norm });
        }
        Ok(Self { amplitudes })
    }

    pub fn amplitudes(&self) -> &Spinor {
        &self.amplitudes
    }

    /// Probabilities of reading up and down along `apparatus`.
    ///
    /// Equals `(cos^2(delta/2), sin^2(delta/2))` where delta is the
    /// angle between the state's Bloch vector and the apparatus; the
    /// pair always sums to exactly 1.
    pub fn probabilities(&self, apparatus: &Direction) -> (f64, f64) {
        let p_up = apparatus
            .spinor()
            .inner(&self.amplitudes)
            .norm_sqr()
            .clamp(0.0, 1.0);
        (p_up, 1.0 - p_up)
    }

    /// Measure the spin along `apparatus`, drawing one uniform sample
    /// from `rng`.
    ///
    /// The returned `collapsed` state is the apparatus eigenstate
    /// matching the outcome; measuring it again along the same axis
    /// reproduces the outcome with probability 1.
    pub fn measure(&self, apparatus: &Direction, rng: &mut impl Rng) -> Measurement {
        let (p_up, _) = self.probabilities(apparatus);
        let draw: f64 = rng.random();
        if draw < p_up {
            Measurement {
                outcome: Outcome::Up,
                collapsed: Self::along(apparatus),
            }
        } else {
            Measurement {
                outcome: Outcome::Down,
                collapsed: Self::along(&apparatus.opposite()),
            }
        }
    }

    /// Bloch polar angle of the state, in [0, pi].
    pub fn theta(&self) -> f64 {
        2.0 * self.amplitudes.up.norm().clamp(0.0, 1.0).acos()
    }

    /// Bloch azimuthal angle of the state, in [0, 2pi).
    ///
    /// This is the phase of the down amplitude relative to the up
    /// amplitude; 0 when either amplitude vanishes.
    pub fn phi(&self) -> f64 {
        let relative = self.amplitudes.down * self.amplitudes.up.conj();
        if relative.norm() < 1e-12 {
            return 0.0;
        }
        let phi = relative.arg();
        if phi < 0.0 { phi + TAU } else { phi }
    }

    /// Expectation values `(<sigma_x>, <sigma_y>, <sigma_z>)`.
    pub fn bloch_vector(&self) -> [f64; 3] {
        let cross = self.amplitudes.up.conj() * self.amplitudes.down;
        [
            2.0 * cross.re,
            2.0 * cross.im,
            self.amplitudes.up.norm_sqr() - self.amplitudes.down.norm_sqr(),
        ]
    }
}
