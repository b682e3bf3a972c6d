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

use std::f64::consts::FRAC_1_SQRT_2;

use log::trace;
use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};

use spin_common::{Direction, JointOutcome, Spinor};

use crate::{NORM_TOLERANCE, SpinState, StateError};

/// The recognized two-spin state families.
///
/// A closed enum rather than a kind string: every constructor matches
/// exhaustively, so an unrecognized state cannot fall through to
/// undefined amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairKind {
    /// Unentangled product of two independent single-spin states.
    Product,
    /// `(|ud> - |du>) / sqrt(2)`
    Singlet,
    /// `(|ud> + |du>) / sqrt(2)`
    TripletI,
    /// `(|uu> + |dd>) / sqrt(2)`
    TripletII,
    /// `(|uu> - |dd>) / sqrt(2)`
    TripletIII,
}

/// State of a two-spin system: four complex amplitudes over the joint
/// basis {uu, ud, du, dd}, tagged with the family it was built from.
///
/// A joint measurement conceptually collapses the pair onto the sampled
/// product basis state, but each experimental trial uses a fresh pair,
/// so [`TwoSpinState::measure_joint`] resamples from the original
/// amplitudes instead of mutating them. That is the only collapse
/// semantics valid for repeated-trial statistics; sequential
/// measurement of one physical pair is not modeled here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSpinState {
    kind: PairKind,
    amplitudes: [Complex64; 4],
}

/// Joint outcome probabilities for one configuration of the two
/// apparatuses, in canonical basis order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointProbabilities {
    pub uu: f64,
    pub ud: f64,
    pub du: f64,
    pub dd: f64,
}

impl JointProbabilities {
    pub fn get(&self, outcome: JointOutcome) -> f64 {
        match outcome.basis_index() {
            0 => self.uu,
            1 => self.ud,
            2 => self.du,
            _ => self.dd,
        }
    }

    /// Iterate outcomes with their probabilities in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (JointOutcome, f64)> + '_ {
        JointOutcome::ALL
            .into_iter()
            .map(move |outcome| (outcome, self.get(outcome)))
    }

    pub fn sum(&self) -> f64 {
        self.uu + self.ud + self.du + self.dd
    }

    /// Probability of the first spin reading up, summed over the
    /// second spin's outcomes.
    pub fn marginal_up_first(&self) -> f64 {
        self.uu + self.ud
    }

    /// Probability of the second spin reading up, summed over the
    /// first spin's outcomes.
    pub fn marginal_up_second(&self) -> f64 {
        self.uu + self.du
    }
}

impl TwoSpinState {
    /// Build one of the four maximally entangled states from its
    /// closed-form amplitudes.
    ///
    /// `PairKind::Product` is parameterized by two single-spin states
    /// and is rejected here; use [`TwoSpinState::product`].
    pub fn entangled(kind: PairKind) -> Result<Self, StateError> {
        let r = Complex64::new(FRAC_1_SQRT_2, 0.0);
        let z = Complex64::new(0.0, 0.0);
        let amplitudes = match kind {
            PairKind::Singlet => [z, r, -r, z],
            PairKind::TripletI => [z, r, r, z],
            PairKind::TripletII => [r, z, z, r],
            PairKind::TripletIII => [r, z, z, -r],
            PairKind::Product => return Err(StateError::NotEntangled { kind }),
        };
        Ok(Self { kind, amplitudes })
    }

    /// Product state of two independently prepared spins.
    pub fn product(first: &SpinState, second: &SpinState) -> Self {
        Self {
            kind: PairKind::Product,
            amplitudes: first.amplitudes().kron(second.amplitudes()),
        }
    }

    /// Build a state from explicit joint amplitudes in the
    /// {uu, ud, du, dd} order, validating normalization.
    ///
    /// This admits partially entangled states such as
    /// `sqrt(0.6)|ud> - sqrt(0.4)|du>`; the result is tagged
    /// [`PairKind::Product`] since it belongs to none of the four
    /// maximally entangled families.
    pub fn from_amplitudes(amplitudes: [Complex64; 4]) -> Result<Self, StateError> {
        let norm_sqr: f64 = amplitudes.iter().map(|amp| amp.norm_sqr()).sum();
        let norm = norm_sqr.sqrt();
        if (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(StateError::NotNormalized { norm });
        }
        Ok(Self {
            kind: PairKind::Product,
            amplitudes,
        })
    }

    pub fn kind(&self) -> PairKind {
        self.kind
    }

    pub fn amplitudes(&self) -> &[Complex64; 4] {
        &self.amplitudes
    }

    /// Joint outcome probabilities for apparatuses oriented along
    /// `dir1` and `dir2`.
    ///
    /// Each probability is the squared projection of the state onto the
    /// corresponding product of apparatus eigenstates. Those four
    /// products form an orthonormal basis of the joint space, so the
    /// probabilities are non-negative and sum to 1.
    pub fn joint_probabilities(&self, dir1: &Direction, dir2: &Direction) -> JointProbabilities {
        let up1 = dir1.spinor();
        let down1 = dir1.opposite().spinor();
        let up2 = dir2.spinor();
        let down2 = dir2.opposite().spinor();

        JointProbabilities {
            uu: self.projection(&up1, &up2),
            ud: self.projection(&up1, &down2),
            du: self.projection(&down1, &up2),
            dd: self.projection(&down1, &down2),
        }
    }

    /// `|<e1 (x) e2 | psi>|^2`
    fn projection(&self, first: &Spinor, second: &Spinor) -> f64 {
        let basis = first.kron(second);
        let amplitude: Complex64 = basis
            .iter()
            .zip(self.amplitudes.iter())
            .map(|(b, psi)| b.conj() * psi)
            .sum();
        amplitude.norm_sqr().clamp(0.0, 1.0)
    }

    /// Perform one joint measurement, drawing a single uniform sample
    /// from `rng` and selecting the outcome by inverse CDF over the
    /// canonical order {UU, UD, DU, DD}.
    ///
    /// The state is not mutated: every call is an independent trial on
    /// a fresh pair prepared in the same state.
    pub fn measure_joint(
        &self,
        dir1: &Direction,
        dir2: &Direction,
        rng: &mut impl Rng,
    ) -> JointOutcome {
        let probabilities = self.joint_probabilities(dir1, dir2);
        let draw: f64 = rng.random();

        let mut cumulative = 0.0;
        for (outcome, probability) in probabilities.iter() {
            cumulative += probability;
            if draw < cumulative {
                trace!("joint draw {draw:.6} -> {outcome}");
                return outcome;
            }
        }
        // Rounding can leave the cumulative sum a few ulps below 1.
        JointOutcome::DD
    }

    /// Exact quantum expectation of the product of the two +1/-1
    /// readings, `E(dir1, dir2)`.
    ///
    /// For the singlet this equals `-cos` of the relative angle; it is
    /// the value the empirical correlation coefficient converges to.
    pub fn expectation(&self, dir1: &Direction, dir2: &Direction) -> f64 {
        self.joint_probabilities(dir1, dir2)
            .iter()
            .map(|(outcome, probability)| {
                f64::from(outcome.first.sign() * outcome.second.sign()) * probability
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const TOL: f64 = 1e-9;

    const ENTANGLED: [PairKind; 4] = [
        PairKind::Singlet,
        PairKind::TripletI,
        PairKind::TripletII,
        PairKind::TripletIII,
    ];

    fn directions() -> Vec<Direction> {
        [
            (0.0, 0.0),
            (45.0, 0.0),
            (90.0, 0.0),
            (90.0, 90.0),
            (120.0, 210.0),
            (180.0, 0.0),
        ]
        .into_iter()
        .map(|(theta, phi)| Direction::from_angles(theta, phi))
        .collect()
    }

    #[test]
    fn entangled_amplitudes() {
        let singlet = TwoSpinState::entangled(PairKind::Singlet).unwrap();
        assert!((singlet.amplitudes()[1].re - FRAC_1_SQRT_2).abs() < TOL);
        assert!((singlet.amplitudes()[2].re + FRAC_1_SQRT_2).abs() < TOL);

        let triplet_ii = TwoSpinState::entangled(PairKind::TripletII).unwrap();
        assert!((triplet_ii.amplitudes()[0].re - FRAC_1_SQRT_2).abs() < TOL);
        assert!((triplet_ii.amplitudes()[3].re - FRAC_1_SQRT_2).abs() < TOL);

        for kind in ENTANGLED {
            let state = TwoSpinState::entangled(kind).unwrap();
            let norm_sqr: f64 = state.amplitudes().iter().map(|a| a.norm_sqr()).sum();
            assert!((norm_sqr - 1.0).abs() < TOL);
        }
    }

    #[test]
    fn product_kind_has_no_closed_form() {
        let err = TwoSpinState::entangled(PairKind::Product).unwrap_err();
        assert_eq!(
            err,
            StateError::NotEntangled {
                kind: PairKind::Product
            }
        );
    }

    #[test]
    fn partially_entangled_amplitudes_are_accepted() {
        let z = Complex64::new(0.0, 0.0);
        let state = TwoSpinState::from_amplitudes([
            z,
            Complex64::new(0.6_f64.sqrt(), 0.0),
            Complex64::new(-(0.4_f64.sqrt()), 0.0),
            z,
        ])
        .unwrap();
        let probabilities = state.joint_probabilities(&Direction::Z, &Direction::Z);
        assert!((probabilities.ud - 0.6).abs() < TOL);
        assert!((probabilities.du - 0.4).abs() < TOL);
    }

    #[test]
    fn unnormalized_amplitudes_are_rejected() {
        let z = Complex64::new(0.0, 0.0);
        let err =
            TwoSpinState::from_amplitudes([Complex64::new(0.9, 0.0), z, z, z]).unwrap_err();
        assert!(matches!(err, StateError::NotNormalized { .. }));
    }

    #[test]
    fn joint_probabilities_sum_to_one_for_all_kinds() {
        let dirs = directions();
        let mut states: Vec<TwoSpinState> = ENTANGLED
            .into_iter()
            .map(|kind| TwoSpinState::entangled(kind).unwrap())
            .collect();
        states.push(TwoSpinState::product(
            &SpinState::along(&Direction::from_angles(70.0, 10.0)),
            &SpinState::down(),
        ));

        for state in &states {
            for dir1 in &dirs {
                for dir2 in &dirs {
                    let probabilities = state.joint_probabilities(dir1, dir2);
                    assert!((probabilities.sum() - 1.0).abs() < TOL);
                    for (_, p) in probabilities.iter() {
                        assert!((0.0..=1.0).contains(&p));
                    }
                }
            }
        }
    }

    #[test]
    fn singlet_closed_form_in_relative_angle() {
        let singlet = TwoSpinState::entangled(PairKind::Singlet).unwrap();
        let dir1 = Direction::from_angles(20.0, 45.0);
        for (theta, phi) in [(20.0, 45.0), (50.0, 45.0), (110.0, 225.0), (160.0, 80.0)] {
            let dir2 = Direction::from_angles(theta, phi);
            let relative = dir1.angle_between(&dir2);
            let probabilities = singlet.joint_probabilities(&dir1, &dir2);

            let p_equal = probabilities.uu + probabilities.dd;
            let p_opposite = probabilities.ud + probabilities.du;
            assert!((p_equal - (relative / 2.0).sin().powi(2)).abs() < TOL);
            assert!((p_opposite - (relative / 2.0).cos().powi(2)).abs() < TOL);
        }
    }

    #[test]
    fn no_signaling_marginals() {
        let dirs = directions();
        for kind in ENTANGLED {
            let state = TwoSpinState::entangled(kind).unwrap();
            for dir1 in &dirs {
                for dir2 in &dirs {
                    let probabilities = state.joint_probabilities(dir1, dir2);
                    // The remote setting must never leak into the
                    // local marginal.
                    assert!((probabilities.marginal_up_first() - 0.5).abs() < TOL);
                    assert!((probabilities.marginal_up_second() - 0.5).abs() < TOL);
                }
            }
        }
    }

    #[test]
    fn product_marginals_match_single_spin_engine() {
        let spin1 = SpinState::along(&Direction::from_angles(35.0, 100.0));
        let spin2 = SpinState::along(&Direction::from_angles(140.0, 280.0));
        let state = TwoSpinState::product(&spin1, &spin2);

        let dir1 = Direction::from_angles(80.0, 30.0);
        let dir2 = Direction::from_angles(10.0, 300.0);
        let probabilities = state.joint_probabilities(&dir1, &dir2);

        let (p1_up, _) = spin1.probabilities(&dir1);
        let (p2_up, _) = spin2.probabilities(&dir2);
        assert!((probabilities.marginal_up_first() - p1_up).abs() < TOL);
        assert!((probabilities.marginal_up_second() - p2_up).abs() < TOL);
        // Independent spins factorize.
        assert!((probabilities.uu - p1_up * p2_up).abs() < TOL);
    }

    #[test]
    fn singlet_expectation_is_minus_cosine() {
        let singlet = TwoSpinState::entangled(PairKind::Singlet).unwrap();
        let dir1 = Direction::from_angles(15.0, 60.0);
        for (theta, phi) in [(15.0, 60.0), (75.0, 60.0), (100.0, 330.0)] {
            let dir2 = Direction::from_angles(theta, phi);
            let expected = -dir1.angle_between(&dir2).cos();
            assert!((singlet.expectation(&dir1, &dir2) - expected).abs() < TOL);
        }
    }

    #[test]
    fn aligned_singlet_always_disagrees() {
        let singlet = TwoSpinState::entangled(PairKind::Singlet).unwrap();
        let dir = Direction::from_angles(42.0, 10.0);
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..1000 {
            let outcome = singlet.measure_joint(&dir, &dir, &mut rng);
            assert!(!outcome.equal());
        }
    }

    #[test]
    fn joint_sampling_matches_probabilities() {
        let state = TwoSpinState::entangled(PairKind::TripletII).unwrap();
        let dir1 = Direction::from_angles(0.0, 0.0);
        let dir2 = Direction::from_angles(60.0, 0.0);
        let probabilities = state.joint_probabilities(&dir1, &dir2);

        let mut rng = StdRng::seed_from_u64(23);
        let trials = 50_000;
        let mut counts = [0u64; 4];
        for _ in 0..trials {
            counts[state.measure_joint(&dir1, &dir2, &mut rng).basis_index()] += 1;
        }

        for (outcome, probability) in probabilities.iter() {
            let empirical = counts[outcome.basis_index()] as f64 / trials as f64;
            assert!(
                (empirical - probability).abs() < 0.01,
                "{outcome}: empirical {empirical} vs exact {probability}"
            );
        }
    }
}
