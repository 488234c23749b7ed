//! Iterative binary search over a sorted sequence
//!
//! Each iteration emits one comparison step. A match adds one final step with
//! `found == true`; an exhausted search simply ends after its last
//! comparison, so the absence of a found step is the failure signal.

use super::Compile;
use crate::errors::InputError;
use crate::trace::{StepTrace, TraceBuilder};
use rustc_hash::FxHashSet;
use std::cmp::Ordering;

/// Sorted values and the target to look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySearchInput {
    values: Vec<i64>,
    target: i64,
}

impl BinarySearchInput {
    /// Rejects sequences that are not sorted in non-decreasing order
    pub fn new(values: Vec<i64>, target: i64) -> Result<Self, InputError> {
        if let Some(index) = values.windows(2).position(|pair| pair[0] > pair[1]) {
            return Err(InputError::Unsorted {
                index,
                previous: values[index],
                next: values[index + 1],
            });
        }
        Ok(BinarySearchInput { values, target })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn target(&self) -> i64 {
        self.target
    }
}

/// Search window state at one iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySearchStep {
    pub left: usize,
    /// Inclusive upper bound of the window
    pub right: usize,
    pub mid: usize,
    pub mid_value: i64,
    pub found: bool,
    /// Indices already ruled out, cumulative over the whole run
    pub eliminated: FxHashSet<usize>,
}

impl Compile for BinarySearchInput {
    type Payload = BinarySearchStep;

    fn compile(&self) -> StepTrace<BinarySearchStep> {
        let values = &self.values;
        let target = self.target;
        let mut builder = TraceBuilder::new();
        let mut eliminated = FxHashSet::default();

        // Signed bounds: `right` drops to -1 when the target is below every value
        let mut left: isize = 0;
        let mut right: isize = values.len() as isize - 1;

        while left <= right {
            let mid = ((left + right) / 2) as usize;
            let mid_value = values[mid];
            let (lo, hi) = (left as usize, right as usize);

            let ordering = mid_value.cmp(&target);
            let description = match ordering {
                Ordering::Equal => format!(
                    "Window [{lo}, {hi}]: arr[{mid}] = {mid_value} equals target {target}"
                ),
                Ordering::Less => format!(
                    "Window [{lo}, {hi}]: arr[{mid}] = {mid_value} < {target}, search right half"
                ),
                Ordering::Greater => format!(
                    "Window [{lo}, {hi}]: arr[{mid}] = {mid_value} > {target}, search left half"
                ),
            };

            builder.push(
                description,
                BinarySearchStep {
                    left: lo,
                    right: hi,
                    mid,
                    mid_value,
                    found: false,
                    eliminated: eliminated.clone(),
                },
            );

            match ordering {
                Ordering::Equal => {
                    builder.push(
                        format!("Found target {target} at index {mid}"),
                        BinarySearchStep {
                            left: lo,
                            right: hi,
                            mid,
                            mid_value,
                            found: true,
                            eliminated: eliminated.clone(),
                        },
                    );
                    break;
                }
                Ordering::Less => {
                    eliminated.extend(lo..=mid);
                    left = mid as isize + 1;
                }
                Ordering::Greater => {
                    eliminated.extend(mid..=hi);
                    right = mid as isize - 1;
                }
            }
        }

        tracing::debug!(
            len = values.len(),
            needle = target,
            steps = builder.len(),
            "compiled binary search trace"
        );
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(values: &[i64], target: i64) -> StepTrace<BinarySearchStep> {
        BinarySearchInput::new(values.to_vec(), target)
            .expect("valid input")
            .compile()
    }

    #[test]
    fn test_finds_target() {
        let trace = compile(&[2, 5, 8, 12, 16, 23, 38, 56, 72, 91], 23);
        let mids: Vec<usize> = trace.iter().map(|s| s.payload.mid).collect();
        assert_eq!(mids, vec![4, 7, 5, 5]);

        let last = trace.last().unwrap();
        assert!(last.payload.found);
        assert_eq!(last.payload.mid_value, 23);
        // Only the final step is flagged
        assert_eq!(trace.iter().filter(|s| s.payload.found).count(), 1);
    }

    #[test]
    fn test_eliminated_is_cumulative() {
        let trace = compile(&[2, 5, 8, 12, 16, 23, 38, 56, 72, 91], 23);
        assert!(trace.get(0).unwrap().payload.eliminated.is_empty());

        let second = &trace.get(1).unwrap().payload.eliminated;
        assert_eq!(second.len(), 5);
        assert!((0..=4).all(|i| second.contains(&i)));

        let third = &trace.get(2).unwrap().payload.eliminated;
        assert_eq!(third.len(), 8);
        assert!(!third.contains(&5));
    }

    #[test]
    fn test_missing_target_has_no_found_step() {
        let trace = compile(&[1, 3, 5, 7], 4);
        assert!(!trace.is_empty());
        assert!(trace.iter().all(|s| !s.payload.found));
    }

    #[test]
    fn test_target_below_all_values() {
        let trace = compile(&[10, 20, 30], 1);
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.last().unwrap().payload.mid, 0);
    }

    #[test]
    fn test_empty_input_yields_empty_trace() {
        assert!(compile(&[], 3).is_empty());
    }

    #[test]
    fn test_rejects_unsorted() {
        let err = BinarySearchInput::new(vec![1, 4, 2], 2).unwrap_err();
        assert_eq!(
            err,
            InputError::Unsorted {
                index: 1,
                previous: 4,
                next: 2
            }
        );
    }
}
