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

use spin_common::JointOutcome;

/// Running aggregate over a sequence of joint-measurement trials.
///
/// Owned by the caller, updated strictly sequentially, and cheap to
/// snapshot at any point during a run (it is `Copy`). Reset between
/// independent experiment runs by replacing it with `default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialStatistics {
    counts: [u64; 4],
    axis_trials: u64,
    same_axis: u64,
    same_axis_equal: u64,
}

impl TrialStatistics {
    /// Record one trial outcome (fixed-orientation mode).
    pub fn record(&mut self, outcome: JointOutcome) {
        self.counts[outcome.basis_index()] += 1;
    }

    /// Record one trial outcome together with the axis each apparatus
    /// selected (random-orientation mode).
    pub fn record_with_axes(&mut self, outcome: JointOutcome, first_axis: usize, second_axis: usize) {
        self.record(outcome);
        self.axis_trials += 1;
        if first_axis == second_axis {
            self.same_axis += 1;
            if outcome.equal() {
                self.same_axis_equal += 1;
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn count(&self, outcome: JointOutcome) -> u64 {
        self.counts[outcome.basis_index()]
    }

    /// Trials where both apparatuses read the same label.
    pub fn equal_count(&self) -> u64 {
        self.count(JointOutcome::UU) + self.count(JointOutcome::DD)
    }

    /// Trials where the apparatuses read opposite labels.
    pub fn opposite_count(&self) -> u64 {
        self.count(JointOutcome::UD) + self.count(JointOutcome::DU)
    }

    /// Empirical probability of one joint outcome; 0 before any trial
    /// has been recorded.
    pub fn probability(&self, outcome: JointOutcome) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(outcome) as f64 / total as f64
    }

    /// Empirical correlation coefficient
    /// `E = (N_equal - N_opposite) / N_total`, in [-1, 1].
    ///
    /// 0 before any trial has been recorded; the experiment runner
    /// rejects zero-trial configurations, so a populated accumulator
    /// always backs this value in practice.
    pub fn correlation(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.equal_count() as f64 - self.opposite_count() as f64) / total as f64
    }

    /// Fraction of randomized trials where both apparatuses selected
    /// the same axis. Converges to 1/3 with three canonical axes.
    pub fn same_axis_fraction(&self) -> f64 {
        if self.axis_trials == 0 {
            return 0.0;
        }
        self.same_axis as f64 / self.axis_trials as f64
    }

    /// Among same-axis trials, the fraction where the labels agreed.
    pub fn same_axis_agreement(&self) -> f64 {
        if self.same_axis == 0 {
            return 0.0;
        }
        self.same_axis_equal as f64 / self.same_axis as f64
    }
}
