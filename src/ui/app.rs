//! Main TUI application state and logic

use crate::playback::{Clock, PlaybackSession, SystemClock};
use crate::visualization::Visualization;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Speed multipliers cycled through with `+` / `-`
pub const SPEED_PRESETS: [f64; 6] = [0.25, 0.5, 1.0, 1.5, 2.0, 4.0];

/// How long the event loop waits for input before re-checking the timer
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Visualization,
    Trace,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Visualization => FocusedPane::Trace,
            FocusedPane::Trace => FocusedPane::Visualization,
        }
    }
}

/// The main application state
pub struct App<C: Clock = SystemClock> {
    /// Compiled visualization (read only)
    pub visualization: Visualization,

    /// Playback state over the visualization's trace
    pub session: PlaybackSession<C>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Scroll offset of the trace pane
    pub trace_scroll: usize,

    /// Whether the trace pane keeps the current step in view.
    /// Cleared by manual scrolling, restored by any playback action.
    pub follow_current: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl<C: Clock> App<C> {
    /// Create a new app over a compiled visualization and its session
    pub fn new(visualization: Visualization, session: PlaybackSession<C>) -> Self {
        App {
            visualization,
            session,
            focused_pane: FocusedPane::Visualization,
            trace_scroll: 0,
            follow_current: true,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.on_tick();

            // Use poll with timeout to allow auto-play to work
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Let the session fire its timer and update the status line
    pub fn on_tick(&mut self) {
        let was_playing = self.session.is_playing();
        if self.session.tick() {
            self.status_message = "Playing...".to_string();
            self.follow_current = true;
        }
        if was_playing && !self.session.is_playing() {
            self.status_message = "Playback complete".to_string();
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Main area plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        super::panes::render_visualization_pane(
            frame,
            columns[0],
            &self.visualization,
            self.session.position(),
            self.session.is_finished(),
            self.focused_pane == FocusedPane::Visualization,
        );

        let descriptions = self.visualization.descriptions();
        super::panes::render_trace_pane(
            frame,
            columns[1],
            &descriptions,
            self.session.current_index(),
            self.focused_pane == FocusedPane::Trace,
            &mut self.trace_scroll,
            self.follow_current,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.session.current_index(),
            self.session.len(),
            self.session.is_playing(),
            self.session.speed(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            // Number keys jump forward N steps
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let before = self.session.current_index();
                self.session.seek(before + n);
                self.status_message = format!(
                    "Stepped forward {} step(s)",
                    self.session.current_index() - before
                );
                self.follow_current = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                if self.session.current_index() == 0 {
                    self.status_message = "Already at the beginning".to_string();
                } else {
                    self.session.step_backward();
                    self.status_message = "Stepped backward".to_string();
                }
                self.follow_current = true;
            }
            KeyCode::Right => {
                if self.session.is_finished() {
                    self.status_message = "Already at the end".to_string();
                } else {
                    self.session.step_forward();
                    self.status_message = "Stepped forward".to_string();
                }
                self.follow_current = true;
            }
            KeyCode::Up => {
                if self.focused_pane == FocusedPane::Trace {
                    self.follow_current = false;
                    self.trace_scroll = self.trace_scroll.saturating_sub(1);
                }
            }
            KeyCode::Down => {
                if self.focused_pane == FocusedPane::Trace {
                    self.follow_current = false;
                    self.trace_scroll = self.trace_scroll.saturating_add(1);
                }
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    // Replay from the start once the end has been reached
                    if self.session.is_finished() && !self.session.is_playing() {
                        self.session.reset();
                    }
                    self.session.toggle();
                    self.status_message = if self.session.is_playing() {
                        "Playing...".to_string()
                    } else if self.session.is_empty() {
                        "Nothing to play".to_string()
                    } else {
                        "Paused".to_string()
                    };
                    self.follow_current = true;
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(true),
            KeyCode::Char('-') | KeyCode::Char('_') => self.change_speed(false),
            KeyCode::Enter | KeyCode::End => {
                self.session.seek(self.session.len());
                self.status_message = "Jumped to end".to_string();
                self.follow_current = true;
            }
            KeyCode::Backspace | KeyCode::Home => {
                self.session.reset();
                self.trace_scroll = 0;
                self.status_message = "Jumped to start".to_string();
                self.follow_current = true;
            }
            _ => {}
        }
    }

    /// Move to the next faster or slower speed preset
    fn change_speed(&mut self, faster: bool) {
        let current = self.session.speed();
        let next = if faster {
            SPEED_PRESETS.iter().copied().find(|&s| s > current)
        } else {
            SPEED_PRESETS.iter().rev().copied().find(|&s| s < current)
        };

        match next {
            Some(speed) => match self.session.set_speed(speed) {
                Ok(()) => self.status_message = format!("Speed {}x", speed),
                Err(e) => self.status_message = format!("Error: {}", e),
            },
            None => {
                self.status_message = format!("Speed already at {}x", current);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilers::queue::{QueueInput, QueueOp};
    use crate::playback::{ManualClock, PlaybackConfig};
    use crate::visualization::AlgorithmInput;
    use crossterm::event::KeyModifiers;

    fn app() -> (App<ManualClock>, ManualClock) {
        let input = QueueInput::new(vec![
            QueueOp::Enqueue(1),
            QueueOp::Enqueue(2),
            QueueOp::Dequeue,
        ])
        .unwrap();
        let viz = Visualization::compile(AlgorithmInput::Queue(input));
        let clock = ManualClock::new();
        let session =
            PlaybackSession::with_clock(viz.len(), PlaybackConfig::default(), clock.clone())
                .unwrap();
        (App::new(viz, session), clock)
    }

    fn press(app: &mut App<ManualClock>, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_arrow_keys_step() {
        let (mut app, _clock) = app();
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session.current_index(), 2);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.status_message, "Stepped backward");
    }

    #[test]
    fn test_digit_jump_is_clamped() {
        let (mut app, _clock) = app();
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.session.current_index(), 3);
        assert_eq!(app.status_message, "Stepped forward 3 step(s)");
    }

    #[test]
    fn test_space_plays_until_complete() {
        let (mut app, clock) = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.session.is_playing());

        for _ in 0..3 {
            clock.advance(crate::playback::DEFAULT_BASE_INTERVAL);
            app.on_tick();
        }
        assert!(app.session.is_finished());
        assert!(!app.session.is_playing());
        assert_eq!(app.status_message, "Playback complete");
    }

    #[test]
    fn test_space_at_end_replays_from_start() {
        let (mut app, clock) = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.session.is_finished());

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.current_index(), 0);
        assert!(app.session.is_playing());

        clock.advance(crate::playback::DEFAULT_BASE_INTERVAL);
        app.on_tick();
        assert_eq!(app.session.current_index(), 1);
    }

    #[test]
    fn test_speed_presets() {
        let (mut app, _clock) = app();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.session.speed(), 1.5);
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.session.speed(), 0.5);
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.session.speed(), 0.25);
        assert_eq!(app.status_message, "Speed already at 0.25x");
    }

    #[test]
    fn test_home_resets() {
        let (mut app, _clock) = app();
        press(&mut app, KeyCode::End);
        assert!(app.session.is_finished());
        press(&mut app, KeyCode::Home);
        assert_eq!(app.session.current_index(), 0);
    }
}
