//! Step-trace compilers, one per algorithm family
//!
//! Each compiler pre-executes its algorithm over a fixed, validated input and
//! records every state transition as a [`Step`](crate::trace::Step):
//!
//! - [`binary_search`]: narrowing `left`/`right` window toward a target
//! - [`sliding_window`]: monotonic deque tracking each window's maximum
//! - [`palindrome`]: two pointers converging on the centre of a string
//! - [`selection_sort`]: passes, comparisons, candidate minimums and swaps
//! - [`queue`]: replay of an enqueue/dequeue log against a FIFO queue
//!
//! # Contract
//!
//! Compiling is deterministic and total: the same input always yields a
//! structurally identical trace whose length depends only on the input. Input
//! validation happens in each input type's `new`, so [`Compile::compile`]
//! cannot fail.

pub mod binary_search;
pub mod palindrome;
pub mod queue;
pub mod selection_sort;
pub mod sliding_window;

use crate::trace::StepTrace;

/// A validated algorithm input that can be pre-executed into a trace
pub trait Compile {
    /// Algorithm-specific state carried by every step
    type Payload;

    /// Run the algorithm to completion, recording every step
    fn compile(&self) -> StepTrace<Self::Payload>;
}

/// Format a sequence of values as `[a, b, c]`
pub(crate) fn format_values<T: std::fmt::Display>(values: &[T]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
