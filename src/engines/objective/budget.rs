use std::cell::Cell;
use std::rc::Rc;

/// Remaining-evaluation counter.
///
/// Clones refer to the same counter: the training set hands one clone to each
/// of its objective functions so they draw from a single pool, while each
/// testing objective function gets a counter of its own.
#[derive(Debug, Clone)]
pub struct EvaluationBudget {
    remaining: Rc<Cell<i64>>,
}

impl EvaluationBudget {
    pub(crate) fn new(allowance: i64) -> Self {
        Self {
            remaining: Rc::new(Cell::new(allowance)),
        }
    }

    pub fn remaining(&self) -> i64 {
        self.remaining.get()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() <= 0
    }

    /// Takes one evaluation and returns what is left afterwards.
    pub(crate) fn consume_one(&self) -> i64 {
        let left = self.remaining.get() - 1;
        self.remaining.set(left);
        left
    }

    /// Whether both handles draw from the same pool.
    pub fn is_shared_with(&self, other: &EvaluationBudget) -> bool {
        Rc::ptr_eq(&self.remaining, &other.remaining)
    }
}
