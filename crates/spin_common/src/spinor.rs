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

use num_complex::Complex64;

/// Two-component complex amplitude vector in the fixed {up, down} basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinor {
    pub up: Complex64,
    pub down: Complex64,
}

impl Spinor {
    pub fn new(up: Complex64, down: Complex64) -> Self {
        Spinor { up, down }
    }

    /// Hermitian inner product `<self|other>`.
    pub fn inner(&self, other: &Spinor) -> Complex64 {
        self.up.conj() * other.up + self.down.conj() * other.down
    }

    pub fn norm_sqr(&self) -> f64 {
        self.up.norm_sqr() + self.down.norm_sqr()
    }

    pub fn norm(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Kronecker product with another spinor, in the joint basis
    /// order {uu, ud, du, dd}.
    pub fn kron(&self, other: &Spinor) -> [Complex64; 4] {
        [
            self.up * other.up,
            self.up * other.down,
            self.down * other.up,
            self.down * other.down,
        ]
    }
}

impl Display for Spinor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.6}, {:.6}]", self.up, self.down)
    }
}
