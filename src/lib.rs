//! # Introduction
//!
//! stepviz animates classic algorithms for a learner. Each algorithm is
//! pre-executed over a fixed input into an immutable trace of state
//! snapshots, and a single playback engine lets the learner play, pause,
//! step, scrub and change speed through that trace in a terminal UI built
//! with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Input → Compiler → StepTrace → PlaybackSession → TUI
//! ```
//!
//! 1. [`compilers`] — binary search, sliding-window maximum, two-pointer
//!    palindrome, selection sort and queue replay, each producing a
//!    [`trace::StepTrace`].
//! 2. [`trace`] — the [`trace::Step`] snapshot type and the sealed trace.
//! 3. [`playback`] — the [`playback::PlaybackSession`] state machine with its
//!    single owned auto-advance timer.
//! 4. [`visualization`] — binds an algorithm input to its compiled trace.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use stepviz::compilers::Compile;
//! use stepviz::compilers::palindrome::PalindromeInput;
//! use stepviz::playback::PlaybackSession;
//!
//! let trace = PalindromeInput::new("racecar").unwrap().compile();
//! let mut session = PlaybackSession::new(trace.len());
//! session.seek(trace.len());
//! assert!(trace.at(session.position()).unwrap().payload.is_center);
//! ```

pub mod compilers;
pub mod errors;
pub mod playback;
pub mod trace;
pub mod ui;
pub mod visualization;
