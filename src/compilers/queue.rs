//! Replay of an enqueue/dequeue log against an initially empty FIFO queue

use super::{format_values, Compile};
use crate::errors::InputError;
use crate::trace::{StepTrace, TraceBuilder};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOp {
    Enqueue(i64),
    Dequeue,
}

impl fmt::Display for QueueOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueOp::Enqueue(value) => write!(f, "enqueue {}", value),
            QueueOp::Dequeue => write!(f, "dequeue"),
        }
    }
}

impl FromStr for QueueOp {
    type Err = InputError;

    /// Accepts `enqueue 5`, `enqueue:5`, `push 5`, `dequeue` and `pop`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.splitn(2, |c: char| c.is_whitespace() || c == ':');
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next().map(str::trim);

        match (verb.as_str(), arg) {
            ("enqueue" | "push", Some(value)) => value
                .parse()
                .map(QueueOp::Enqueue)
                .map_err(|_| InputError::InvalidOperation(trimmed.to_string())),
            ("dequeue" | "pop", None) => Ok(QueueOp::Dequeue),
            _ => Err(InputError::InvalidOperation(trimmed.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueInput {
    ops: Vec<QueueOp>,
}

impl QueueInput {
    pub fn new(ops: Vec<QueueOp>) -> Result<Self, InputError> {
        Ok(QueueInput { ops })
    }

    pub fn ops(&self) -> &[QueueOp] {
        &self.ops
    }
}

/// What an operation produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOutcome {
    Enqueued(i64),
    /// `position` is the absolute offset of the removed front element, i.e.
    /// how many elements were dequeued before it
    Dequeued { value: i64, position: usize },
    /// Dequeue attempted on an empty queue
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStep {
    pub op: QueueOp,
    pub outcome: QueueOutcome,
    /// Contents after the operation, front first
    pub queue: Vec<i64>,
}

impl QueueStep {
    /// Value handed back to the caller, only for a successful dequeue
    pub fn returned(&self) -> Option<i64> {
        match self.outcome {
            QueueOutcome::Dequeued { value, .. } => Some(value),
            _ => None,
        }
    }
}

impl Compile for QueueInput {
    type Payload = QueueStep;

    fn compile(&self) -> StepTrace<QueueStep> {
        let mut builder = TraceBuilder::new();
        let mut queue: VecDeque<i64> = VecDeque::new();
        let mut head = 0usize;

        for &op in &self.ops {
            let (outcome, description) = match op {
                QueueOp::Enqueue(value) => {
                    queue.push_back(value);
                    (
                        QueueOutcome::Enqueued(value),
                        format!("Enqueue {value} at the back"),
                    )
                }
                QueueOp::Dequeue => match queue.pop_front() {
                    Some(value) => {
                        let position = head;
                        head += 1;
                        (
                            QueueOutcome::Dequeued { value, position },
                            format!("Dequeue returns {value} from the front"),
                        )
                    }
                    None => (
                        QueueOutcome::Empty,
                        "Dequeue on an empty queue returns nothing".to_string(),
                    ),
                },
            };

            let contents: Vec<i64> = queue.iter().copied().collect();
            builder.push(
                format!("{description}, queue is now {}", format_values(&contents)),
                QueueStep {
                    op,
                    outcome,
                    queue: contents,
                },
            );
        }

        tracing::debug!(ops = self.ops.len(), steps = builder.len(), "compiled queue trace");
        builder.finish()
    }
}
