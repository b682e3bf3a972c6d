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

//! Measurement engines for one- and two-spin systems.
//!
//! Measurements are instantaneous projective collapses. Every sampling
//! call takes an injected random source; nothing here touches a global
//! generator, so a run is reproducible from a single seed.

use std::fmt::{Display, Formatter};

pub mod single;
pub use single::{Measurement, SpinState};

pub mod pair;
pub use pair::{JointProbabilities, PairKind, TwoSpinState};

/// Tolerance for amplitude-vector normalization checks.
pub const NORM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateError {
    /// A supplied amplitude vector is not normalized. There is no
    /// silent renormalization; the caller gets the offending norm back.
    NotNormalized { norm: f64 },
    /// A parameterized kind was requested through the closed-form
    /// entangled constructor.
    NotEntangled { kind: PairKind },
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotNormalized { norm } => {
                write!(f, "amplitude vector has norm {norm}, expected 1")
            }
            Self::NotEntangled { kind } => {
                write!(
                    f,
                    "{kind:?} is parameterized by single-spin states and has no closed-form amplitudes"
                )
            }
        }
    }
}

impl std::error::Error for StateError {}
