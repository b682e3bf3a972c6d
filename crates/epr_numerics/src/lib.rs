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

//! EPR correlation engine: repeated independent joint measurements of
//! a two-spin state, outcome accumulation, and the CHSH combination
//! used to demonstrate Bell-inequality violation.

use std::fmt::{Display, Formatter};

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use spin_common::Direction;
use spin_engine::TwoSpinState;

pub mod statistics;
pub use statistics::TrialStatistics;

/// How the apparatus orientations are chosen each trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrientationMode {
    /// Both directions fixed for the whole run.
    Fixed { dir1: Direction, dir2: Direction },
    /// Each apparatus independently picks one of its three canonical
    /// axes uniformly per trial, so both pick the same axis with
    /// probability exactly 1/3.
    Random {
        axes1: [Direction; 3],
        axes2: [Direction; 3],
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentConfig {
    pub orientation: OrientationMode,
    /// Flip the second apparatus' outcome label before counting.
    /// Display convention only: for the singlet it turns perfect
    /// anti-correlation at equal settings into perfect agreement.
    /// Sampling is unaffected.
    pub invert: bool,
    pub n_trials: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    /// The engine never runs zero trials; this is a configuration
    /// error at the boundary, not a runtime fault.
    NoTrials,
}

impl Display for ExperimentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTrials => write!(f, "experiment requires at least one trial"),
        }
    }
}

impl std::error::Error for ExperimentError {}

/// The three measurement axes of one apparatus, spaced 120 degrees
/// apart in the polar angle around a base orientation.
pub fn canonical_axes(theta_deg: f64, phi_deg: f64) -> [Direction; 3] {
    [
        Direction::from_angles(theta_deg + 240.0, phi_deg),
        Direction::from_angles(theta_deg, phi_deg),
        Direction::from_angles(theta_deg + 120.0, phi_deg),
    ]
}

/// Run `config.n_trials` independent joint measurements of `state` and
/// accumulate the outcome counts.
///
/// Every trial redraws from the original state: the experiment models a
/// source emitting one freshly prepared pair per trial, not sequential
/// collapse of a single pair.
pub fn run_experiment(
    config: &ExperimentConfig,
    state: &TwoSpinState,
    rng: &mut impl Rng,
) -> Result<TrialStatistics, ExperimentError> {
    if config.n_trials == 0 {
        return Err(ExperimentError::NoTrials);
    }
    let mut stats = TrialStatistics::default();
    for _ in 0..config.n_trials {
        run_trial(config, state, rng, &mut stats);
    }
    Ok(stats)
}

/// Snapshot of the running statistics after `trial` trials.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrialSnapshot {
    pub trial: u64,
    pub uu: u64,
    pub ud: u64,
    pub du: u64,
    pub dd: u64,
    pub correlation: f64,
    pub same_axis_fraction: f64,
}

impl TrialSnapshot {
    fn new(trial: u64, stats: &TrialStatistics) -> Self {
        use spin_common::JointOutcome;
        Self {
            trial,
            uu: stats.count(JointOutcome::UU),
            ud: stats.count(JointOutcome::UD),
            du: stats.count(JointOutcome::DU),
            dd: stats.count(JointOutcome::DD),
            correlation: stats.correlation(),
            same_axis_fraction: stats.same_axis_fraction(),
        }
    }
}

/// Like [`run_experiment`], but yield a statistics snapshot every
/// `report_every` trials (and always after the final trial) for
/// live-updating displays.
pub fn run_streaming<'a, R: Rng>(
    config: &'a ExperimentConfig,
    state: &'a TwoSpinState,
    rng: &'a mut R,
    report_every: u64,
) -> Result<impl Iterator<Item = TrialSnapshot> + 'a, ExperimentError> {
    if config.n_trials == 0 {
        return Err(ExperimentError::NoTrials);
    }
    let report_every = report_every.max(1);
    let mut stats = TrialStatistics::default();
    Ok((1..=config.n_trials).filter_map(move |trial| {
        run_trial(config, state, rng, &mut stats);
        if trial % report_every == 0 || trial == config.n_trials {
            Some(TrialSnapshot::new(trial, &stats))
        } else {
            None
        }
    }))
}

fn run_trial(
    config: &ExperimentConfig,
    state: &TwoSpinState,
    rng: &mut impl Rng,
    stats: &mut TrialStatistics,
) {
    match &config.orientation {
        OrientationMode::Fixed { dir1, dir2 } => {
            let mut outcome = state.measure_joint(dir1, dir2, rng);
            if config.invert {
                outcome = outcome.invert_second();
            }
            stats.record(outcome);
        }
        OrientationMode::Random { axes1, axes2 } => {
            let first_axis = rng.random_range(0..3);
            let second_axis = rng.random_range(0..3);
            let mut outcome = state.measure_joint(&axes1[first_axis], &axes2[second_axis], rng);
            if config.invert {
                outcome = outcome.invert_second();
            }
            trace!("axes ({first_axis}, {second_axis}) -> {outcome}");
            stats.record_with_axes(outcome, first_axis, second_axis);
        }
    }
}

/// CHSH combination `|E(a,b) - E(a,c) + E(a',b) + E(a',c)|`.
///
/// Any local-hidden-variable model is bounded by 2; singlet statistics
/// exceed the bound for suitable angle choices.
pub fn chsh(e_ab: f64, e_ac: f64, e_a2b: f64, e_a2c: f64) -> f64 {
    (e_ab - e_ac + e_a2b + e_a2c).abs()
}

/// The classical CHSH bound.
pub const CHSH_BOUND: f64 = 2.0;
