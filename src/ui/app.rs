//! Main TUI application state and logic

use crate::parser::parse::ParseOutcome;
use crate::printer::{outline, OutlineLine};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Ast,
    Diagnostics,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> ast -> diagnostics)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Ast => FocusedPane::Source,
            FocusedPane::Diagnostics => FocusedPane::Ast,
        }
    }
}

/// The main application state
pub struct App {
    /// Parse result being explored
    pub outcome: ParseOutcome,

    /// The source text that was parsed
    pub source_code: String,

    /// Flattened AST, computed once
    pub outline: Vec<OutlineLine>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub ast_scroll: usize,
    pub diagnostics_scroll: usize,

    /// Index of the selected diagnostic
    pub selected_diagnostic: usize,

    /// Whether the source pane follows the selected diagnostic
    pub follow_selection: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for a finished parse of `source_code`
    pub fn new(outcome: ParseOutcome, source_code: String) -> Self {
        let outline = outline(&outcome.program);
        let status_message = if outcome.is_ok() {
            String::from("Parsed cleanly")
        } else {
            String::from("Parsed with errors")
        };
        App {
            outline,
            source_code,
            focused_pane: FocusedPane::Source,
            source_scroll: 0,
            ast_scroll: 0,
            diagnostics_scroll: 0,
            selected_diagnostic: 0,
            follow_selection: !outcome.is_ok(),
            should_quit: false,
            status_message,
            outcome,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// 1-based source lines that carry a diagnostic
    fn error_lines(&self) -> Vec<usize> {
        self.outcome
            .diagnostics
            .iter()
            .map(|d| d.location.line)
            .collect()
    }

    fn selected_line(&self) -> Option<usize> {
        if !self.follow_selection {
            return None;
        }
        self.outcome
            .diagnostics
            .get(self.selected_diagnostic)
            .map(|d| d.location.line)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let error_lines = self.error_lines();
        let selected_line = self.selected_line();

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            &error_lines,
            selected_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            &self.outcome.diagnostics,
            self.selected_diagnostic,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        super::panes::render_ast_pane(
            frame,
            columns[1],
            &self.outline,
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.outcome.program.functions.len(),
            self.outcome.diagnostics.len(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Char('n') => self.select_diagnostic(1),
            KeyCode::Char('p') => self.select_diagnostic(-1),
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    self.follow_selection = false;
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Ast => {
                    self.ast_scroll = self.ast_scroll.saturating_sub(1);
                }
                FocusedPane::Diagnostics => self.select_diagnostic(-1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    self.follow_selection = false;
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Ast => {
                    self.ast_scroll = self.ast_scroll.saturating_add(1);
                }
                FocusedPane::Diagnostics => self.select_diagnostic(1),
            },
            KeyCode::Home => match self.focused_pane {
                FocusedPane::Source => {
                    self.follow_selection = false;
                    self.source_scroll = 0;
                }
                FocusedPane::Ast => self.ast_scroll = 0,
                FocusedPane::Diagnostics => self.select_diagnostic(isize::MIN),
            },
            KeyCode::End => match self.focused_pane {
                // clamped while rendering
                FocusedPane::Source => {
                    self.follow_selection = false;
                    self.source_scroll = usize::MAX;
                }
                FocusedPane::Ast => self.ast_scroll = usize::MAX,
                FocusedPane::Diagnostics => self.select_diagnostic(isize::MAX),
            },
            _ => {}
        }
    }

    /// Move the diagnostic selection by `delta`, clamped to the list
    fn select_diagnostic(&mut self, delta: isize) {
        let count = self.outcome.diagnostics.len();
        if count == 0 {
            self.status_message = "No diagnostics".to_string();
            return;
        }

        let target = self.selected_diagnostic.saturating_add_signed(delta);
        self.selected_diagnostic = target.min(count - 1);
        self.follow_selection = true;
        self.status_message = format!("Diagnostic {}/{}", self.selected_diagnostic + 1, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn app(source: &str) -> App {
        let outcome = Parser::new(source).parse_program();
        App::new(outcome, source.to_string())
    }

    #[test]
    fn test_focus_cycle() {
        let mut focus = FocusedPane::Source;
        for _ in 0..3 {
            focus = focus.next();
        }
        assert_eq!(focus, FocusedPane::Source);
        assert_eq!(FocusedPane::Source.prev(), FocusedPane::Diagnostics);
    }

    #[test]
    fn test_diagnostic_selection_is_clamped() {
        let mut app = app("FUNC a() x = 1\nFUNC b() RETURN 1\nFUNC c() RETURN\n");
        let count = app.outcome.diagnostics.len();
        assert!(count >= 2);

        app.select_diagnostic(isize::MAX);
        assert_eq!(app.selected_diagnostic, count - 1);
        app.select_diagnostic(-1);
        assert_eq!(app.selected_diagnostic, count - 2);
        app.select_diagnostic(isize::MIN);
        assert_eq!(app.selected_diagnostic, 0);
        assert_eq!(app.selected_line(), Some(1));
    }

    #[test]
    fn test_clean_parse_has_no_selection() {
        let mut app = app("FUNC main() RETURN 0");
        assert_eq!(app.selected_line(), None);
        assert_eq!(app.outline.len(), 2);

        app.select_diagnostic(1);
        assert_eq!(app.status_message, "No diagnostics");
    }

    #[test]
    fn test_quit_key() {
        let mut app = app("FUNC main() RETURN 0");
        app.handle_key_event(KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
