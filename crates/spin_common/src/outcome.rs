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

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Result of measuring a single spin along an apparatus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Up,
    Down,
}

impl Outcome {
    /// The +1/-1 convention used when forming correlation coefficients.
    pub fn sign(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub fn invert(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Pair of outcomes from a joint two-spin measurement.
///
/// The canonical basis order is {UU, UD, DU, DD}; `basis_index`
/// and `ALL` follow it, which keeps inverse-CDF sampling
/// deterministic for a fixed random stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointOutcome {
    pub first: Outcome,
    pub second: Outcome,
}

impl JointOutcome {
    pub const UU: JointOutcome = JointOutcome {
        first: Outcome::Up,
        second: Outcome::Up,
    };
    pub const UD: JointOutcome = JointOutcome {
        first: Outcome::Up,
        second: Outcome::Down,
    };
    pub const DU: JointOutcome = JointOutcome {
        first: Outcome::Down,
        second: Outcome::Up,
    };
    pub const DD: JointOutcome = JointOutcome {
        first: Outcome::Down,
        second: Outcome::Down,
    };

    /// All joint outcomes in canonical order.
    pub const ALL: [JointOutcome; 4] = [Self::UU, Self::UD, Self::DU, Self::DD];

    pub fn basis_index(self) -> usize {
        match (self.first, self.second) {
            (Outcome::Up, Outcome::Up) => 0,
            (Outcome::Up, Outcome::Down) => 1,
            (Outcome::Down, Outcome::Up) => 2,
            (Outcome::Down, Outcome::Down) => 3,
        }
    }

    /// Whether both apparatuses read the same outcome.
    pub fn equal(self) -> bool {
        self.first == self.second
    }

    /// Flip the second apparatus' label, leaving the first untouched.
    pub fn invert_second(self) -> Self {
        JointOutcome {
            first: self.first,
            second: self.second.invert(),
        }
    }
}

impl Display for JointOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
