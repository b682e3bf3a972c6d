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

//! Shared definitions for the spin simulator crates: apparatus
//! directions, spinor arithmetic and measurement outcomes.

pub mod direction;
pub use direction::{Direction, DirectionError};

pub mod spinor;
pub use spinor::Spinor;

pub mod outcome;
pub use outcome::{JointOutcome, Outcome};
