//! Challenge content generation.
//!
//! Every randomly chosen piece of challenge content (app gesture, math
//! operands, object target) comes from one seedable generator so that
//! property tests can run deterministically.

use std::fmt;

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};

use super::StepKind;

/// Objects the user may be asked to show to the camera.
pub const OBJECT_TARGETS: [&str; 7] = [
    "toothbrush",
    "cup",
    "book",
    "keys",
    "phone",
    "bottle",
    "wallet",
];

/// A rock-paper-scissors gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
}

impl Gesture {
    /// Outcome of playing `self` against `opponent`.
    pub fn play_against(self, opponent: Gesture) -> RoundOutcome {
        use Gesture::*;
        match (self, opponent) {
            (a, b) if a == b => RoundOutcome::Draw,
            (Rock, Scissors) | (Paper, Rock) | (Scissors, Paper) => RoundOutcome::Win,
            _ => RoundOutcome::Lose,
        }
    }

    /// The gesture that beats `self`.
    pub fn loses_to(self) -> Gesture {
        match self {
            Gesture::Rock => Gesture::Paper,
            Gesture::Paper => Gesture::Scissors,
            Gesture::Scissors => Gesture::Rock,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Gesture::Rock => "rock",
            Gesture::Paper => "paper",
            Gesture::Scissors => "scissors",
        };
        f.write_str(s)
    }
}

/// Result of one rock-paper-scissors round, from the user's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundOutcome {
    Win,
    Lose,
    Draw,
}

/// Operators used in generated math problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathOp {
    Add,
    Sub,
    Mul,
}

impl fmt::Display for MathOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MathOp::Add => "+",
            MathOp::Sub => "-",
            MathOp::Mul => "×",
        };
        f.write_str(s)
    }
}

/// A two-operand arithmetic problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathProblem {
    pub lhs: i64,
    pub rhs: i64,
    pub op: MathOp,
}

impl MathProblem {
    pub fn answer(&self) -> i64 {
        match self.op {
            MathOp::Add => self.lhs + self.rhs,
            MathOp::Sub => self.lhs - self.rhs,
            MathOp::Mul => self.lhs * self.rhs,
        }
    }

    pub fn check(&self, answer: i64) -> bool {
        answer == self.answer()
    }
}

impl fmt::Display for MathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

/// The generated content backing one challenge step attempt.
///
/// Regenerated in full whenever a verification attempt fails, so a retry
/// always sees a fresh instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum StepContent {
    Rps { app_gesture: Gesture },
    Object { target: &'static str },
    Math { problem: MathProblem },
    Face,
}

/// Seedable source of challenge content.
pub struct ContentGenerator {
    rng: Mcg128Xsl64,
}

impl ContentGenerator {
    /// Entropy-seeded generator for normal operation.
    pub fn new() -> Self {
        Self {
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    /// Fixed-seed generator for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mcg128Xsl64::seed_from_u64(seed),
        }
    }

    /// Uniformly random app gesture.
    pub fn gesture(&mut self) -> Gesture {
        match self.rng.gen_range(0..3) {
            0 => Gesture::Rock,
            1 => Gesture::Paper,
            _ => Gesture::Scissors,
        }
    }

    /// Random arithmetic problem with intuitive operand ranges.
    ///
    /// Subtraction operands are constrained so the result is always
    /// positive.
    pub fn math_problem(&mut self) -> MathProblem {
        let op = match self.rng.gen_range(0..3) {
            0 => MathOp::Add,
            1 => MathOp::Sub,
            _ => MathOp::Mul,
        };
        let (lhs, rhs) = match op {
            MathOp::Mul => (self.rng.gen_range(2..=10), self.rng.gen_range(2..=10)),
            MathOp::Sub => {
                let lhs = self.rng.gen_range(10..=29);
                let rhs = self.rng.gen_range(1..lhs);
                (lhs, rhs)
            }
            MathOp::Add => (self.rng.gen_range(1..=50), self.rng.gen_range(1..=50)),
        };
        MathProblem { lhs, rhs, op }
    }

    /// Random target from the fixed object list.
    pub fn object_target(&mut self) -> &'static str {
        OBJECT_TARGETS[self.rng.gen_range(0..OBJECT_TARGETS.len())]
    }

    /// Fresh content for a step attempt.
    pub fn content_for(&mut self, step: StepKind) -> StepContent {
        match step {
            StepKind::Rps => StepContent::Rps {
                app_gesture: self.gesture(),
            },
            StepKind::Object => StepContent::Object {
                target: self.object_target(),
            },
            StepKind::Math => StepContent::Math {
                problem: self.math_problem(),
            },
            StepKind::Face => StepContent::Face,
        }
    }
}

impl Default for ContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn win_lose_draw_table() {
        use Gesture::*;
        assert_eq!(Rock.play_against(Scissors), RoundOutcome::Win);
        assert_eq!(Paper.play_against(Rock), RoundOutcome::Win);
        assert_eq!(Scissors.play_against(Paper), RoundOutcome::Win);
        assert_eq!(Scissors.play_against(Rock), RoundOutcome::Lose);
        assert_eq!(Rock.play_against(Rock), RoundOutcome::Draw);
    }

    #[test]
    fn loses_to_always_wins() {
        for g in [Gesture::Rock, Gesture::Paper, Gesture::Scissors] {
            assert_eq!(g.loses_to().play_against(g), RoundOutcome::Win);
        }
    }

    #[test]
    fn seeded_generator_is_deterministic() {
        let mut a = ContentGenerator::seeded(7);
        let mut b = ContentGenerator::seeded(7);
        for _ in 0..16 {
            assert_eq!(a.math_problem(), b.math_problem());
            assert_eq!(a.gesture(), b.gesture());
            assert_eq!(a.object_target(), b.object_target());
        }
    }

    #[test]
    fn object_target_comes_from_fixed_list() {
        let mut gen = ContentGenerator::seeded(42);
        for _ in 0..32 {
            assert!(OBJECT_TARGETS.contains(&gen.object_target()));
        }
    }

    proptest! {
        #[test]
        fn math_problems_stay_intuitive(seed in any::<u64>()) {
            let mut gen = ContentGenerator::seeded(seed);
            for _ in 0..32 {
                let p = gen.math_problem();
                prop_assert!(p.answer() >= 0, "answer went negative: {p}");
                match p.op {
                    MathOp::Mul => {
                        prop_assert!((2..=10).contains(&p.lhs));
                        prop_assert!((2..=10).contains(&p.rhs));
                    }
                    MathOp::Sub => {
                        prop_assert!((10..=29).contains(&p.lhs));
                        prop_assert!(p.rhs >= 1 && p.rhs < p.lhs);
                    }
                    MathOp::Add => {
                        prop_assert!((1..=50).contains(&p.lhs));
                        prop_assert!((1..=50).contains(&p.rhs));
                    }
                }
                prop_assert!(p.check(p.answer()));
                prop_assert!(!p.check(p.answer() + 1));
            }
        }
    }
}
