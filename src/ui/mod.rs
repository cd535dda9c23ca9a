//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! An explorer for one parse: the source with error markers, the AST
//! outline, and the diagnostics list side by side.
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`panes`]**: stateless render functions for each visible pane
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`ParseOutcome`] and call [`App::run`] to start the event loop.
//!
//! [`ParseOutcome`]: crate::parser::parse::ParseOutcome
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
