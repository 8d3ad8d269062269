use super::budget::EvaluationBudget;
use crate::error::{CbbocError, Result};
use crate::problem::ProblemInstance;
use crate::types::{InstanceResult, Phase};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

/// Reported for an objective function that never accepted an evaluation.
pub const NO_BEST: InstanceResult = InstanceResult {
    remaining_evaluations: 0,
    remaining_evaluations_when_best_reached: -1,
    best_value: -1.0,
};

/// Best value seen so far and the remaining budget right after reaching it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestRecord {
    pub remaining_evaluations: i64,
    pub value: f64,
}

/// Why an objective function refused an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetSignal {
    EvaluationsExceeded,
    TimeExceeded,
}

impl From<BudgetSignal> for CbbocError {
    fn from(signal: BudgetSignal) -> Self {
        match signal {
            BudgetSignal::EvaluationsExceeded => CbbocError::EvaluationsExceeded,
            BudgetSignal::TimeExceeded => CbbocError::TimeExceeded,
        }
    }
}

/// A problem instance guarded by an evaluation budget and a phase deadline.
///
/// Only the competition arms the deadline. An objective function outside its
/// phase has no deadline and refuses every evaluation with `TimeExceeded`.
///
/// Competitors only ever see `&ObjectiveFn`; evaluation bookkeeping lives in
/// cells.
pub struct ObjectiveFn {
    instance: Rc<ProblemInstance>,
    phase: Phase,
    budget: EvaluationBudget,
    deadline: Option<Instant>,
    best: Cell<Option<BestRecord>>,
    signal: Cell<Option<BudgetSignal>>,
}

impl ObjectiveFn {
    pub(crate) fn new(
        instance: Rc<ProblemInstance>,
        phase: Phase,
        budget: EvaluationBudget,
    ) -> Self {
        Self {
            instance,
            phase,
            budget,
            deadline: None,
            best: Cell::new(None),
            signal: Cell::new(None),
        }
    }

    pub fn num_genes(&self) -> usize {
        self.instance.num_genes()
    }

    pub fn remaining_evaluations(&self) -> i64 {
        self.budget.remaining()
    }

    pub fn best(&self) -> Option<BestRecord> {
        self.best.get()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    pub fn budget(&self) -> &EvaluationBudget {
        &self.budget
    }

    /// First exhaustion signal this objective function raised, if any.
    pub fn signal(&self) -> Option<BudgetSignal> {
        self.signal.get()
    }

    /// Evaluates `candidate` if time and budget allow, tracking the best value.
    pub fn value(&self, candidate: &[bool]) -> Result<f64> {
        let now_past_deadline = match self.deadline {
            Some(deadline) => Instant::now() > deadline,
            None => true,
        };
        if now_past_deadline {
            return Err(self.raise(BudgetSignal::TimeExceeded));
        }

        if self.budget.is_exhausted() {
            return Err(self.raise(BudgetSignal::EvaluationsExceeded));
        }

        let value = self.instance.value(candidate)?;
        let remaining = self.budget.consume_one();

        // Maximising; ties keep the earlier record.
        let improved = match self.best.get() {
            Some(best) => value > best.value,
            None => true,
        };
        if improved {
            self.best.set(Some(BestRecord {
                remaining_evaluations: remaining,
                value,
            }));
        }

        Ok(value)
    }

    fn raise(&self, signal: BudgetSignal) -> CbbocError {
        if self.signal.get().is_none() {
            self.signal.set(Some(signal));
        }
        signal.into()
    }

    pub(crate) fn arm(&mut self, deadline: Instant) {
        self.deadline = Some(deadline);
    }

    pub(crate) fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn result(&self) -> InstanceResult {
        match self.best.get() {
            Some(best) => InstanceResult {
                remaining_evaluations: self.remaining_evaluations(),
                remaining_evaluations_when_best_reached: best.remaining_evaluations,
                best_value: best.value,
            },
            None => InstanceResult {
                remaining_evaluations: self.remaining_evaluations(),
                ..NO_BEST
            },
        }
    }
}

impl fmt::Debug for ObjectiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectiveFn")
            .field("num_genes", &self.num_genes())
            .field("phase", &self.phase)
            .field("remaining_evaluations", &self.remaining_evaluations())
            .field("best", &self.best.get())
            .field("signal", &self.signal.get())
            .finish()
    }
}
