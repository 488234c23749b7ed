//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, speed presets
//! - **[`panes`]** — stateless render functions for each visible pane (visualization,
//!   trace list, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a compiled
//! [`Visualization`] and a [`PlaybackSession`], then call [`App::run`] to start the
//! event loop. The UI only reads the trace and drives the session through its
//! control surface.
//!
//! [`Visualization`]: crate::visualization::Visualization
//! [`PlaybackSession`]: crate::playback::PlaybackSession
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
