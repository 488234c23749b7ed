// Step traces: the immutable execution history of one algorithm run

/// One self-contained snapshot of algorithm state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<P> {
    /// Zero-based position of this step within its trace
    pub ordinal: usize,
    /// What happened in this transition, in words a learner can follow
    pub description: String,
    /// Algorithm-specific state (pointers, collections, partial results)
    pub payload: P,
}

/// Ordered, finite sequence of steps produced by a single compile
///
/// A trace is never mutated after [`TraceBuilder::finish`]; it only hands
/// out shared references to its steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTrace<P> {
    steps: Vec<Step<P>>,
}

impl<P> StepTrace<P> {
    /// Get a step by its ordinal
    pub fn get(&self, ordinal: usize) -> Option<&Step<P>> {
        self.steps.get(ordinal)
    }

    /// Get the number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The terminal step, if any step was emitted
    pub fn last(&self) -> Option<&Step<P>> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<P>> {
        self.steps.iter()
    }

    pub fn steps(&self) -> &[Step<P>] {
        &self.steps
    }

    /// Resolve a playback position to the step it displays
    ///
    /// Returns `None` for [`Position::NotStarted`](crate::playback::Position).
    pub fn at(&self, position: crate::playback::Position) -> Option<&Step<P>> {
        position.step_ordinal().and_then(|ordinal| self.get(ordinal))
    }
}

impl<'a, P> IntoIterator for &'a StepTrace<P> {
    type Item = &'a Step<P>;
    type IntoIter = std::slice::Iter<'a, Step<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Accumulates steps while a compiler runs, numbering them in order
#[derive(Debug)]
pub struct TraceBuilder<P> {
    steps: Vec<Step<P>>,
}

impl<P> TraceBuilder<P> {
    pub fn new() -> Self {
        TraceBuilder { steps: Vec::new() }
    }

    /// Append a step; its ordinal is the number of steps recorded so far
    pub fn push(&mut self, description: impl Into<String>, payload: P) {
        let ordinal = self.steps.len();
        self.steps.push(Step {
            ordinal,
            description: description.into(),
            payload,
        });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Seal the trace
    pub fn finish(self) -> StepTrace<P> {
        StepTrace { steps: self.steps }
    }
}

impl<P> Default for TraceBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}
