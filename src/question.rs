use itertools::Itertools;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fmt;
use std::ops::RangeInclusive;

/// Number of answer buttons shown for every question
pub const OPTION_COUNT: usize = 4;

const OPERAND_RANGE: RangeInclusive<i32> = 1..=10;
const DISTRACTOR_RANGE: RangeInclusive<i32> = 1..=20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Operator {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Sub,
    #[strum(to_string = "*")]
    Mul,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];

    pub fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
        }
    }
}

/// One arithmetic prompt and its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub operand_a: i32,
    pub operand_b: i32,
    pub operator: Operator,
    pub correct_answer: i32,
}

impl Question {
    pub fn new(operand_a: i32, operand_b: i32, operator: Operator) -> Self {
        Self {
            operand_a,
            operand_b,
            operator,
            correct_answer: operator.apply(operand_a, operand_b),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "What is {} {} {}?",
            self.operand_a, self.operator, self.operand_b
        )
    }
}

/// The four distinct candidate answers for a question, in display order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionSet(Vec<i32>);

impl OptionSet {
    pub fn values(&self) -> &[i32] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<i32> {
        self.0.get(index).copied()
    }

    pub fn contains(&self, value: i32) -> bool {
        self.0.contains(&value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Draws questions and distractors from a single random stream
#[derive(Debug)]
pub struct QuestionGenerator {
    rng: StdRng,
}

impl QuestionGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible stream, used by `--seed` and tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw the next question: operands from 1..=10 and a uniformly chosen operator
    pub fn next_question(&mut self) -> Question {
        let operand_a = self.rng.gen_range(OPERAND_RANGE);
        let operand_b = self.rng.gen_range(OPERAND_RANGE);
        let operator = Operator::ALL[self.rng.gen_range(0..Operator::ALL.len())];
        Question::new(operand_a, operand_b, operator)
    }

    /// Correct answer plus distractors from 1..=20, redrawn until four distinct values exist.
    ///
    /// Display order is ascending after de-duplication, so the position of the
    /// correct answer carries no information.
    pub fn options(&mut self, correct_answer: i32) -> OptionSet {
        let mut drawn = vec![correct_answer];
        drawn.extend((1..OPTION_COUNT).map(|_| self.rng.gen_range(DISTRACTOR_RANGE)));

        while drawn.iter().unique().count() < OPTION_COUNT {
            drawn.push(self.rng.gen_range(DISTRACTOR_RANGE));
        }

        OptionSet(drawn.into_iter().unique().sorted().collect())
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}
