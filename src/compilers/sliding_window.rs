//! Sliding-window maximum with a monotonic deque
//!
//! The deque holds indices whose values strictly decrease from front to back,
//! so the front is always the maximum of the current window. Every primitive
//! deque mutation becomes its own step, and every step carries full copies
//! of the deque and of the results recorded so far.

use super::{format_values, Compile};
use crate::errors::InputError;
use crate::trace::{StepTrace, TraceBuilder};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindowInput {
    values: Vec<i64>,
    window: usize,
}

impl SlidingWindowInput {
    /// `window` must satisfy `1 <= window <= values.len()`
    pub fn new(values: Vec<i64>, window: usize) -> Result<Self, InputError> {
        if window == 0 {
            return Err(InputError::EmptyWindow);
        }
        if window > values.len() {
            return Err(InputError::WindowTooLarge {
                window,
                len: values.len(),
            });
        }
        Ok(SlidingWindowInput { values, window })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

/// The deque mutation a step records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DequeAction {
    /// Front index slid out of the window
    RemoveFront(usize),
    /// Back index can never be a maximum again
    RemoveBack(usize),
    AddBack(usize),
    /// Window is full; its maximum was appended to the results
    RecordMax(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidingWindowStep {
    pub action: DequeAction,
    /// Index being processed
    pub current: usize,
    /// Inclusive window bounds
    pub window_start: usize,
    pub window_end: usize,
    /// Deque contents front to back, as indices into the input
    pub deque: Vec<usize>,
    pub result: Vec<i64>,
}

impl Compile for SlidingWindowInput {
    type Payload = SlidingWindowStep;

    fn compile(&self) -> StepTrace<SlidingWindowStep> {
        let values = &self.values;
        let k = self.window;
        let mut builder = TraceBuilder::new();
        let mut deque: VecDeque<usize> = VecDeque::new();
        let mut result: Vec<i64> = Vec::new();

        for (i, &value) in values.iter().enumerate() {
            let window_start = (i + 1).saturating_sub(k);
            let snapshot = |action: DequeAction, deque: &VecDeque<usize>, result: &Vec<i64>| {
                SlidingWindowStep {
                    action,
                    current: i,
                    window_start,
                    window_end: i,
                    deque: deque.iter().copied().collect(),
                    result: result.clone(),
                }
            };

            while let Some(&front) = deque.front() {
                if front >= window_start {
                    break;
                }
                deque.pop_front();
                builder.push(
                    format!(
                        "Index {front} left the window [{window_start}, {i}], \
                         remove it from the front"
                    ),
                    snapshot(DequeAction::RemoveFront(front), &deque, &result),
                );
            }

            while let Some(&back) = deque.back() {
                if values[back] > value {
                    break;
                }
                deque.pop_back();
                builder.push(
                    format!(
                        "arr[{back}] = {} <= arr[{i}] = {value}, remove index {back} from the back",
                        values[back]
                    ),
                    snapshot(DequeAction::RemoveBack(back), &deque, &result),
                );
            }

            deque.push_back(i);
            builder.push(
                format!("Add index {i} (value {value}) to the back"),
                snapshot(DequeAction::AddBack(i), &deque, &result),
            );

            if i + 1 >= k {
                if let Some(&front) = deque.front() {
                    let max = values[front];
                    result.push(max);
                    builder.push(
                        format!(
                            "Window [{window_start}, {i}] max is arr[{front}] = {max}, results {}",
                            format_values(&result)
                        ),
                        snapshot(DequeAction::RecordMax(max), &deque, &result),
                    );
                }
            }
        }

        tracing::debug!(
            len = values.len(),
            window = k,
            steps = builder.len(),
            "compiled sliding window trace"
        );
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(values: &[i64], window: usize) -> StepTrace<SlidingWindowStep> {
        SlidingWindowInput::new(values.to_vec(), window)
            .expect("valid input")
            .compile()
    }

    #[test]
    fn test_classic_example() {
        let trace = compile(&[1, 3, -1, -3, 5, 3, 6, 7], 3);
        let last_record = trace
            .iter()
            .rev()
            .find(|s| matches!(s.payload.action, DequeAction::RecordMax(_)))
            .unwrap();
        assert_eq!(last_record.payload.result, vec![3, 3, 5, 5, 6, 7]);
    }

    #[test]
    fn test_deque_stays_strictly_decreasing() {
        let values = [4, 2, 12, 3, 8, 8, 1, 9];
        let trace = compile(&values, 3);
        for step in &trace {
            let deque_values: Vec<i64> = step.payload.deque.iter().map(|&i| values[i]).collect();
            assert!(
                deque_values.windows(2).all(|w| w[0] > w[1]),
                "step {} has deque {:?}",
                step.ordinal,
                deque_values
            );
        }
    }

    #[test]
    fn test_step_sequence_for_small_input() {
        let trace = compile(&[1, 3], 1);
        let actions: Vec<DequeAction> = trace.iter().map(|s| s.payload.action).collect();
        assert_eq!(
            actions,
            vec![
                DequeAction::AddBack(0),
                DequeAction::RecordMax(1),
                DequeAction::RemoveFront(0),
                DequeAction::AddBack(1),
                DequeAction::RecordMax(3),
            ]
        );
    }

    #[test]
    fn test_equal_values_are_evicted() {
        let trace = compile(&[5, 5], 2);
        let actions: Vec<DequeAction> = trace.iter().map(|s| s.payload.action).collect();
        assert_eq!(
            actions,
            vec![
                DequeAction::AddBack(0),
                DequeAction::RemoveBack(0),
                DequeAction::AddBack(1),
                DequeAction::RecordMax(5),
            ]
        );
    }

    #[test]
    fn test_rejects_bad_window() {
        assert_eq!(
            SlidingWindowInput::new(vec![1, 2], 0),
            Err(InputError::EmptyWindow)
        );
        assert_eq!(
            SlidingWindowInput::new(vec![1, 2], 3),
            Err(InputError::WindowTooLarge { window: 3, len: 2 })
        );
    }
}
