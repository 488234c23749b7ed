//! Two-pointer palindrome check
//!
//! The pointers walk inward from both ends and every pair is compared, even
//! after a mismatch, so a string of `L` characters always yields `ceil(L/2)`
//! steps. Whether the whole string is a palindrome is a property of the
//! complete trace, see [`verdict`].

use super::Compile;
use crate::errors::InputError;
use crate::trace::{StepTrace, TraceBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PalindromeInput {
    chars: Vec<char>,
}

impl PalindromeInput {
    /// Every string is a valid input; the `Result` keeps the constructor
    /// shape shared with the other inputs.
    pub fn new(text: &str) -> Result<Self, InputError> {
        Ok(PalindromeInput {
            chars: text.chars().collect(),
        })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

/// One compared pair of characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PalindromeStep {
    pub left: usize,
    pub right: usize,
    pub left_char: char,
    pub right_char: char,
    /// Both pointers meet on the middle character of an odd-length string
    pub is_center: bool,
    pub matches: bool,
}

impl Compile for PalindromeInput {
    type Payload = PalindromeStep;

    fn compile(&self) -> StepTrace<PalindromeStep> {
        let chars = &self.chars;
        let mut builder = TraceBuilder::new();

        if !chars.is_empty() {
            let (mut left, mut right) = (0usize, chars.len() - 1);
            while left <= right {
                let (left_char, right_char) = (chars[left], chars[right]);
                let is_center = left == right;
                let matches = left_char == right_char;

                let description = if is_center {
                    format!("Pointers meet at index {left} on the centre character '{left_char}'")
                } else if matches {
                    format!("s[{left}] = '{left_char}' matches s[{right}] = '{right_char}'")
                } else {
                    format!("s[{left}] = '{left_char}' does not match s[{right}] = '{right_char}'")
                };

                builder.push(
                    description,
                    PalindromeStep {
                        left,
                        right,
                        left_char,
                        right_char,
                        is_center,
                        matches,
                    },
                );

                if right == 0 {
                    break;
                }
                left += 1;
                right -= 1;
            }
        }

        tracing::debug!(
            len = chars.len(),
            steps = builder.len(),
            "compiled palindrome trace"
        );
        builder.finish()
    }
}

/// Whether every compared pair in the trace matched
pub fn verdict(trace: &StepTrace<PalindromeStep>) -> bool {
    trace.iter().all(|step| step.payload.matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(text: &str) -> StepTrace<PalindromeStep> {
        PalindromeInput::new(text).unwrap().compile()
    }

    #[test]
    fn test_racecar() {
        let trace = compile("racecar");
        assert_eq!(trace.len(), 4);

        let last = trace.last().unwrap().payload;
        assert!(last.is_center);
        assert_eq!(last.left, 3);
        assert_eq!(last.left_char, 'e');
        assert!(trace.iter().take(3).all(|s| !s.payload.is_center));
        assert!(verdict(&trace));
    }

    #[test]
    fn test_even_length_has_no_center() {
        let trace = compile("abba");
        assert_eq!(trace.len(), 2);
        assert!(trace.iter().all(|s| !s.payload.is_center));
        assert!(verdict(&trace));
    }

    #[test]
    fn test_mismatch_does_not_stop_the_scan() {
        let trace = compile("abcdea");
        assert_eq!(trace.len(), 3);
        assert!(trace.get(0).unwrap().payload.matches);
        assert!(!trace.get(1).unwrap().payload.matches);
        assert!(trace.get(1).unwrap().description.contains("does not match"));
        assert!(!verdict(&trace));
    }

    #[test]
    fn test_single_and_empty() {
        let trace = compile("x");
        assert_eq!(trace.len(), 1);
        assert!(trace.get(0).unwrap().payload.is_center);

        assert!(compile("").is_empty());
    }
}
