//! Registry binding each algorithm kind to its compiled trace
//!
//! The front-end holds one [`Visualization`] and one
//! [`PlaybackSession`](crate::playback::PlaybackSession) sized by
//! [`Visualization::len`]; nothing else about the algorithm leaks into the
//! playback engine.

use crate::compilers::binary_search::{BinarySearchInput, BinarySearchStep};
use crate::compilers::palindrome::{PalindromeInput, PalindromeStep};
use crate::compilers::queue::{QueueInput, QueueStep};
use crate::compilers::selection_sort::{SelectionSortInput, SelectionSortStep};
use crate::compilers::sliding_window::{SlidingWindowInput, SlidingWindowStep};
use crate::compilers::{format_values, Compile};
use crate::playback::Position;
use crate::trace::StepTrace;

/// A fixed algorithm input, one variant per visualization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmInput {
    BinarySearch(BinarySearchInput),
    SlidingWindow(SlidingWindowInput),
    Palindrome(PalindromeInput),
    SelectionSort(SelectionSortInput),
    Queue(QueueInput),
}

/// An input together with the trace compiled from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visualization {
    BinarySearch {
        input: BinarySearchInput,
        trace: StepTrace<BinarySearchStep>,
    },
    SlidingWindow {
        input: SlidingWindowInput,
        trace: StepTrace<SlidingWindowStep>,
    },
    Palindrome {
        input: PalindromeInput,
        trace: StepTrace<PalindromeStep>,
    },
    SelectionSort {
        input: SelectionSortInput,
        trace: StepTrace<SelectionSortStep>,
    },
    Queue {
        input: QueueInput,
        trace: StepTrace<QueueStep>,
    },
}

impl Visualization {
    /// Compile the trace for `input`, once
    pub fn compile(input: AlgorithmInput) -> Self {
        match input {
            AlgorithmInput::BinarySearch(input) => {
                let trace = input.compile();
                Visualization::BinarySearch { input, trace }
            }
            AlgorithmInput::SlidingWindow(input) => {
                let trace = input.compile();
                Visualization::SlidingWindow { input, trace }
            }
            AlgorithmInput::Palindrome(input) => {
                let trace = input.compile();
                Visualization::Palindrome { input, trace }
            }
            AlgorithmInput::SelectionSort(input) => {
                let trace = input.compile();
                Visualization::SelectionSort { input, trace }
            }
            AlgorithmInput::Queue(input) => {
                let trace = input.compile();
                Visualization::Queue { input, trace }
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Visualization::BinarySearch { .. } => "Binary Search",
            Visualization::SlidingWindow { .. } => "Sliding Window Maximum",
            Visualization::Palindrome { .. } => "Two-Pointer Palindrome",
            Visualization::SelectionSort { .. } => "Selection Sort",
            Visualization::Queue { .. } => "Queue Operations",
        }
    }

    /// One-line summary of the fixed input
    pub fn input_summary(&self) -> String {
        match self {
            Visualization::BinarySearch { input, .. } => format!(
                "{} target {}",
                format_values(input.values()),
                input.target()
            ),
            Visualization::SlidingWindow { input, .. } => {
                format!("{} window {}", format_values(input.values()), input.window())
            }
            Visualization::Palindrome { input, .. } => format!("\"{}\"", input.text()),
            Visualization::SelectionSort { input, .. } => format_values(input.values()),
            Visualization::Queue { input, .. } => {
                let ops: Vec<String> = input.ops().iter().map(|op| op.to_string()).collect();
                ops.join(", ")
            }
        }
    }

    /// Number of steps in the compiled trace
    pub fn len(&self) -> usize {
        match self {
            Visualization::BinarySearch { trace, .. } => trace.len(),
            Visualization::SlidingWindow { trace, .. } => trace.len(),
            Visualization::Palindrome { trace, .. } => trace.len(),
            Visualization::SelectionSort { trace, .. } => trace.len(),
            Visualization::Queue { trace, .. } => trace.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Descriptions of every step, in order
    pub fn descriptions(&self) -> Vec<&str> {
        fn collect<P>(trace: &StepTrace<P>) -> Vec<&str> {
            trace.iter().map(|s| s.description.as_str()).collect()
        }
        match self {
            Visualization::BinarySearch { trace, .. } => collect(trace),
            Visualization::SlidingWindow { trace, .. } => collect(trace),
            Visualization::Palindrome { trace, .. } => collect(trace),
            Visualization::SelectionSort { trace, .. } => collect(trace),
            Visualization::Queue { trace, .. } => collect(trace),
        }
    }

    /// Description shown at `position`; `None` before the first step
    pub fn description_at(&self, position: Position) -> Option<&str> {
        fn at<P>(trace: &StepTrace<P>, position: Position) -> Option<&str> {
            trace.at(position).map(|s| s.description.as_str())
        }
        match self {
            Visualization::BinarySearch { trace, .. } => at(trace, position),
            Visualization::SlidingWindow { trace, .. } => at(trace, position),
            Visualization::Palindrome { trace, .. } => at(trace, position),
            Visualization::SelectionSort { trace, .. } => at(trace, position),
            Visualization::Queue { trace, .. } => at(trace, position),
        }
    }

    /// Verdict line for the terminal position, if the algorithm has one
    pub fn outcome(&self) -> Option<String> {
        match self {
            Visualization::BinarySearch { input, trace } => {
                Some(match trace.last().filter(|s| s.payload.found) {
                    Some(step) => format!("Found {} at index {}", input.target(), step.payload.mid),
                    None => format!("{} is not in the array", input.target()),
                })
            }
            Visualization::SlidingWindow { trace, .. } => trace
                .last()
                .map(|s| format!("Window maximums: {}", format_values(&s.payload.result))),
            Visualization::Palindrome { input, trace } => {
                let verdict = crate::compilers::palindrome::verdict(trace);
                Some(format!(
                    "\"{}\" {} a palindrome",
                    input.text(),
                    if verdict { "is" } else { "is not" }
                ))
            }
            Visualization::SelectionSort { trace, .. } => trace
                .last()
                .map(|s| format!("Sorted: {}", format_values(&s.payload.array))),
            Visualization::Queue { trace, .. } => trace
                .last()
                .map(|s| format!("Final queue: {}", format_values(&s.payload.queue))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_exposes_trace_length() {
        let input = PalindromeInput::new("level").unwrap();
        let viz = Visualization::compile(AlgorithmInput::Palindrome(input));
        assert_eq!(viz.len(), 3);
        assert_eq!(viz.title(), "Two-Pointer Palindrome");
        assert_eq!(viz.description_at(Position::NotStarted), None);
        assert!(viz
            .description_at(Position::AtStep(2))
            .unwrap()
            .contains("centre"));
        assert_eq!(viz.description_at(Position::AtStep(3)), None);
        assert_eq!(viz.outcome().unwrap(), "\"level\" is a palindrome");
    }

    #[test]
    fn test_binary_search_outcome_when_missing() {
        let input = BinarySearchInput::new(vec![1, 2, 3], 9).unwrap();
        let viz = Visualization::compile(AlgorithmInput::BinarySearch(input));
        assert_eq!(viz.outcome().unwrap(), "9 is not in the array");
        assert_eq!(viz.input_summary(), "[1, 2, 3] target 9");
    }
}
