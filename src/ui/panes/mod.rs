//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with syntax highlighting and error markers
//! - [`ast`]: Outline of the parsed program
//! - [`diagnostics`]: Parse errors, one per failed function
//! - [`status`]: Status bar with keybindings and a parse summary
//!
//! Each pane module exports a single stateless `render_*` function; scroll
//! offsets live in [`App`](crate::ui::App) and are clamped while rendering.

pub mod ast;
pub mod diagnostics;
pub mod source;
pub mod status;

pub use ast::render_ast_pane;
pub use diagnostics::render_diagnostics_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
