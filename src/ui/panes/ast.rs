//! AST outline pane

use crate::printer::OutlineLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Style for an outline label, keyed on its leading word
fn label_style(label: &str) -> Style {
    let head = label.split_whitespace().next().unwrap_or("");
    match head {
        "FUNC" => Style::default()
            .fg(DEFAULT_THEME.function)
            .add_modifier(Modifier::BOLD),
        "Block" | "THEN" | "ELSE" => Style::default().fg(DEFAULT_THEME.structure),
        "IF" | "WHILE" | "RETURN" | "PRINT" | "CONTINUE" | "VAR" => {
            Style::default().fg(DEFAULT_THEME.keyword)
        }
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Render the AST outline pane
pub fn render_ast_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[OutlineLine],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" AST ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if outline.is_empty() {
        let paragraph = Paragraph::new("(no functions parsed)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if outline.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(outline.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let lines: Vec<Line> = outline
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| {
            let guide = "│ ".repeat(line.depth);
            Line::from(vec![
                Span::styled(guide, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(line.label.clone(), label_style(&line.label)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
