//! Classic O(n²) selection sort
//!
//! A swap step shows the array as it was before the swap; the step after it
//! shows the swap applied.

use super::{format_values, Compile};
use crate::errors::InputError;
use crate::trace::{StepTrace, TraceBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSortInput {
    values: Vec<i64>,
}

impl SelectionSortInput {
    pub fn new(values: Vec<i64>) -> Result<Self, InputError> {
        Ok(SelectionSortInput { values })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAction {
    Start,
    /// Outer pass `i` begins scanning for the minimum
    PassStart,
    /// Inner loop compares `arr[j]` with the current minimum
    Compare,
    /// `arr[j]` became the new candidate minimum
    NewMin,
    /// `arr[i]` and `arr[min]` are about to be exchanged
    Swap,
    Sorted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSortStep {
    pub action: SortAction,
    pub array: Vec<i64>,
    /// Outer pass index
    pub i: Option<usize>,
    /// Inner scan index
    pub j: Option<usize>,
    /// Index of the smallest value seen so far in this pass
    pub min_index: Option<usize>,
    /// Length of the sorted prefix
    pub sorted_len: usize,
}

impl Compile for SelectionSortInput {
    type Payload = SelectionSortStep;

    fn compile(&self) -> StepTrace<SelectionSortStep> {
        let mut array = self.values.clone();
        let n = array.len();
        let mut builder = TraceBuilder::new();

        builder.push(
            format!("Start selection sort on {}", format_values(&array)),
            SelectionSortStep {
                action: SortAction::Start,
                array: array.clone(),
                i: None,
                j: None,
                min_index: None,
                sorted_len: 0,
            },
        );

        for i in 0..n.saturating_sub(1) {
            let mut min_index = i;
            builder.push(
                format!("Pass {}: scanning for minimum from index {i}", i + 1),
                SelectionSortStep {
                    action: SortAction::PassStart,
                    array: array.clone(),
                    i: Some(i),
                    j: None,
                    min_index: Some(min_index),
                    sorted_len: i,
                },
            );

            for j in (i + 1)..n {
                builder.push(
                    format!(
                        "Compare arr[{j}] = {} with current minimum arr[{min_index}] = {}",
                        array[j], array[min_index]
                    ),
                    SelectionSortStep {
                        action: SortAction::Compare,
                        array: array.clone(),
                        i: Some(i),
                        j: Some(j),
                        min_index: Some(min_index),
                        sorted_len: i,
                    },
                );

                if array[j] < array[min_index] {
                    min_index = j;
                    builder.push(
                        format!("New minimum {} found at index {j}", array[j]),
                        SelectionSortStep {
                            action: SortAction::NewMin,
                            array: array.clone(),
                            i: Some(i),
                            j: Some(j),
                            min_index: Some(min_index),
                            sorted_len: i,
                        },
                    );
                }
            }

            if min_index != i {
                builder.push(
                    format!(
                        "Swap arr[{i}] = {} with arr[{min_index}] = {}",
                        array[i], array[min_index]
                    ),
                    SelectionSortStep {
                        action: SortAction::Swap,
                        array: array.clone(),
                        i: Some(i),
                        j: None,
                        min_index: Some(min_index),
                        sorted_len: i,
                    },
                );
                array.swap(i, min_index);
            }
        }

        builder.push(
            format!("Array is sorted: {}", format_values(&array)),
            SelectionSortStep {
                action: SortAction::Sorted,
                array,
                i: None,
                j: None,
                min_index: None,
                sorted_len: n,
            },
        );

        tracing::debug!(len = n, steps = builder.len(), "compiled selection sort trace");
        builder.finish()
    }
}
