//! Playback control over a compiled step trace
//!
//! One [`PlaybackSession`] drives any visualization: it only knows the trace
//! length `N` and keeps `current_index` in `0..=N`, where index `0` is the
//! pristine "not started" position and index `i > 0` shows step `i - 1`.
//!
//! # Timer discipline
//!
//! Auto-play is a single owned [`Timer`] deadline. Every entry point that can
//! move the position or change the playing state takes the timer out first,
//! mutates, and re-arms only if the session is still playing. `is_playing` is
//! exactly "a timer is armed", so a second timer cannot exist. Dropping the
//! session drops the timer with it.
//!
//! Nothing blocks: the owning event loop calls [`PlaybackSession::tick`] and
//! the session advances once the deadline has passed.

pub mod clock;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use timer::Timer;

use crate::errors::PlaybackError;
use std::time::Duration;

/// Interval between auto-advance ticks at speed 1.0
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(1000);

/// Upper bound on the effective tick interval at very low speeds
pub const MAX_INTERVAL: Duration = Duration::from_secs(3600);

/// What the viewer currently sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    NotStarted,
    /// Step with this ordinal has been taken and is displayed
    AtStep(usize),
}

impl Position {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Position::NotStarted,
            i => Position::AtStep(i - 1),
        }
    }

    pub fn step_ordinal(self) -> Option<usize> {
        match self {
            Position::NotStarted => None,
            Position::AtStep(ordinal) => Some(ordinal),
        }
    }
}

/// Session tuning supplied by the embedding front-end
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub base_interval: Duration,
    pub speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            base_interval: DEFAULT_BASE_INTERVAL,
            speed: 1.0,
        }
    }
}

fn validate_speed(speed: f64) -> Result<f64, PlaybackError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(PlaybackError::InvalidSpeed(speed))
    }
}

/// Viewer-side playback state bound to one trace
#[derive(Debug)]
pub struct PlaybackSession<C: Clock = SystemClock> {
    len: usize,
    current_index: usize,
    speed: f64,
    base_interval: Duration,
    timer: Option<Timer>,
    clock: C,
}

impl PlaybackSession<SystemClock> {
    /// Paused session at the start of a trace of `len` steps, default tuning
    pub fn new(len: usize) -> Self {
        PlaybackSession {
            len,
            current_index: 0,
            speed: 1.0,
            base_interval: DEFAULT_BASE_INTERVAL,
            timer: None,
            clock: SystemClock,
        }
    }
}

impl<C: Clock> PlaybackSession<C> {
    pub fn with_clock(len: usize, config: PlaybackConfig, clock: C) -> Result<Self, PlaybackError> {
        Ok(PlaybackSession {
            len,
            current_index: 0,
            speed: validate_speed(config.speed)?,
            base_interval: config.base_interval,
            timer: None,
            clock,
        })
    }

    // ========== Control surface ==========

    /// Start auto-advancing; does nothing if already playing or the trace is empty
    ///
    /// Never moves the position. Played from the terminal position, the first
    /// tick finds nowhere to go and the session pauses again.
    pub fn play(&mut self) {
        if self.len == 0 || self.timer.is_some() {
            return;
        }
        self.arm();
        tracing::debug!(index = self.current_index, speed = self.speed, "playback started");
    }

    pub fn pause(&mut self) {
        if self.timer.take().is_some() {
            tracing::debug!(index = self.current_index, "playback paused");
        }
    }

    /// Play if paused, pause if playing
    pub fn toggle(&mut self) {
        if self.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn step_forward(&mut self) {
        self.mutate(|s| s.current_index = (s.current_index + 1).min(s.len));
    }

    pub fn step_backward(&mut self) {
        self.mutate(|s| s.current_index = s.current_index.saturating_sub(1));
    }

    /// Jump straight to `index`, clamped into `0..=len`
    pub fn seek(&mut self, index: usize) {
        self.mutate(|s| s.current_index = index.min(s.len));
    }

    /// Change the speed multiplier; a running timer restarts with the new period
    pub fn set_speed(&mut self, multiplier: f64) -> Result<(), PlaybackError> {
        let speed = validate_speed(multiplier)?;
        self.mutate(|s| s.speed = speed);
        tracing::debug!(speed, "playback speed changed");
        Ok(())
    }

    pub fn reset(&mut self) {
        self.timer = None;
        self.current_index = 0;
        tracing::debug!("playback reset");
    }

    /// Fire the timer if its deadline has passed
    ///
    /// Returns whether the position advanced. Called from the owning event
    /// loop; at most one step is taken per call.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        match self.timer {
            Some(timer) if timer.is_due(now) => {
                let before = self.current_index;
                self.step_forward();
                tracing::trace!(index = self.current_index, "auto-advance");
                self.current_index != before
            }
            _ => false,
        }
    }

    // ========== Read-only state ==========

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn position(&self) -> Position {
        Position::from_index(self.current_index)
    }

    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Length of the bound trace
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the terminal position has been reached
    pub fn is_finished(&self) -> bool {
        self.current_index == self.len
    }

    /// Period of the auto-advance timer at the current speed
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.base_interval.as_secs_f64() / self.speed)
            .unwrap_or(MAX_INTERVAL)
            .min(MAX_INTERVAL)
    }

    /// Deadline of the armed timer, if playing
    pub fn next_tick(&self) -> Option<std::time::Instant> {
        self.timer.map(|t| t.due())
    }

    // ========== Internals ==========

    /// Cancel, apply `change`, then re-arm if still playing
    ///
    /// Any change that lands on the terminal position while playing leaves
    /// the session paused, whether it came from a tick, a step or a seek.
    fn mutate(&mut self, change: impl FnOnce(&mut Self)) {
        let was_playing = self.timer.take().is_some();
        change(self);
        if was_playing {
            if self.current_index < self.len {
                self.arm();
            } else {
                tracing::debug!(
                    index = self.current_index,
                    "reached end of trace, pausing"
                );
            }
        }
    }

    fn arm(&mut self) {
        self.timer = Some(Timer::arm(self.clock.now(), self.interval()));
    }
}

impl<C: Clock> Drop for PlaybackSession<C> {
    fn drop(&mut self) {
        if self.timer.take().is_some() {
            tracing::trace!("session dropped while playing, timer cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(len: usize) -> (PlaybackSession<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let session = PlaybackSession::with_clock(len, PlaybackConfig::default(), clock.clone())
            .expect("default config is valid");
        (session, clock)
    }

    #[test]
    fn test_initial_state() {
        let session = PlaybackSession::new(5);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.position(), Position::NotStarted);
        assert!(!session.is_playing());
        assert_eq!(session.speed(), 1.0);
        assert_eq!(session.interval(), DEFAULT_BASE_INTERVAL);
    }

    #[test]
    fn test_position_mapping() {
        assert_eq!(Position::from_index(0), Position::NotStarted);
        assert_eq!(Position::from_index(3), Position::AtStep(2));
        assert_eq!(Position::AtStep(2).step_ordinal(), Some(2));
    }

    #[test]
    fn test_tick_advances_once_per_interval() {
        let (mut session, clock) = session(3);
        session.play();

        clock.advance(Duration::from_millis(999));
        assert!(!session.tick());
        assert_eq!(session.current_index(), 0);

        clock.advance(Duration::from_millis(1));
        assert!(session.tick());
        assert!(!session.tick());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_auto_pause_at_end() {
        let (mut session, clock) = session(2);
        session.play();
        for _ in 0..5 {
            clock.advance(DEFAULT_BASE_INTERVAL);
            session.tick();
        }
        assert_eq!(session.current_index(), 2);
        assert!(!session.is_playing());
        assert!(session.is_finished());
    }

    #[test]
    fn test_play_at_end_keeps_position() {
        let (mut session, clock) = session(4);
        session.seek(4);
        session.play();
        assert_eq!(session.current_index(), 4);
        assert!(session.is_playing());

        clock.advance(DEFAULT_BASE_INTERVAL);
        assert!(!session.tick());
        assert_eq!(session.current_index(), 4);
        assert!(!session.is_playing());
    }

    #[test]
    fn test_empty_trace_is_inert() {
        let (mut session, clock) = session(0);
        session.play();
        assert!(!session.is_playing());
        session.step_forward();
        session.seek(10);
        clock.advance(DEFAULT_BASE_INTERVAL);
        assert!(!session.tick());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_step_backward_keeps_playing() {
        let (mut session, _clock) = session(5);
        session.seek(3);
        session.play();
        session.step_backward();
        assert_eq!(session.current_index(), 2);
        assert!(session.is_playing());
    }

    #[test]
    fn test_seek_restarts_timer_period() {
        let (mut session, clock) = session(5);
        session.play();
        clock.advance(Duration::from_millis(600));
        session.seek(2);
        clock.advance(Duration::from_millis(600));
        assert!(!session.tick());
        clock.advance(Duration::from_millis(400));
        assert!(session.tick());
        assert_eq!(session.current_index(), 3);
    }

    #[test]
    fn test_set_speed() {
        let (mut session, clock) = session(5);
        session.play();
        session.set_speed(4.0).unwrap();
        assert_eq!(session.interval(), Duration::from_millis(250));

        clock.advance(Duration::from_millis(250));
        assert!(session.tick());

        assert_eq!(session.set_speed(0.0), Err(PlaybackError::InvalidSpeed(0.0)));
        assert!(session.set_speed(-2.0).is_err());
        assert!(session.set_speed(f64::NAN).is_err());
        assert_eq!(session.speed(), 4.0);
        assert!(session.is_playing());
    }

    #[test]
    fn test_reset() {
        let (mut session, _clock) = session(5);
        session.seek(3);
        session.play();
        session.reset();
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_playing());
    }

    #[test]
    fn test_rejects_invalid_initial_speed() {
        let config = PlaybackConfig {
            speed: 0.0,
            ..PlaybackConfig::default()
        };
        assert!(PlaybackSession::with_clock(3, config, ManualClock::new()).is_err());
    }
}
