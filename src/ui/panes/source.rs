//! Source code pane rendering with syntax highlighting
//!
//! qualm programs are dense, often a single line, so instead of a current
//! line this pane highlights the one character under the cursor.
//!
//! # Features
//!
//! - Highlighting for string literals, numbers and control-flow characters
//! - Cursor and error character indicators
//! - Line numbering, with the cursor's line kept at a fixed visual row

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source: &'a [char],
    pub position: usize,
    /// Position of the character that raised the halting error, when the
    /// last step is shown
    pub error_position: Option<usize>,
}

/// Line and column (both 0-based) of `position`
pub fn line_and_column(source: &[char], position: usize) -> (usize, usize) {
    let before = &source[..position.min(source.len())];
    let line = before.iter().filter(|&&c| c == '\n').count();
    let column = before.iter().rev().take_while(|&&c| c != '\n').count();
    (line, column)
}

/// Base style of every character, tracking string literals across lines
fn highlight_source_code(source: &[char]) -> Vec<Style> {
    let mut styles = Vec::with_capacity(source.len());
    let mut in_string = false;
    let mut escaped = false;

    for &c in source {
        let style = if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == ':' {
                in_string = false;
            }
            Style::default().fg(DEFAULT_THEME.string)
        } else {
            match c {
                '\'' => {
                    in_string = true;
                    Style::default().fg(DEFAULT_THEME.string)
                }
                '0'..='9' | '-' => Style::default().fg(DEFAULT_THEME.number),
                '{' | '}' => Style::default()
                    .fg(DEFAULT_THEME.primary)
                    .add_modifier(Modifier::BOLD),
                '(' | ')' | '~' => Style::default().fg(DEFAULT_THEME.function),
                'w' | 's' | '>' | '<' => Style::default().fg(DEFAULT_THEME.register),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            }
        };
        styles.push(style);
    }
    styles
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let styles = highlight_source_code(data.source);
    let cursor_style = Style::default()
        .bg(DEFAULT_THEME.secondary)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);
    let error_style = Style::default()
        .bg(DEFAULT_THEME.error)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    // Split into lines, remembering each line's start position
    let mut lines: Vec<(usize, &[char])> = Vec::new();
    let mut start = 0;
    for (i, &c) in data.source.iter().enumerate() {
        if c == '\n' {
            lines.push((start, &data.source[start..i]));
            start = i + 1;
        }
    }
    lines.push((start, &data.source[start..]));

    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    // Keep the cursor's line at the target visual row
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    let highlighted = data.error_position.unwrap_or(data.position);
    let (current_line, _) = line_and_column(data.source, highlighted);
    scroll_state.offset = current_line.saturating_sub(target_row);
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, &(line_start, chars))| {
            let is_current = idx == current_line;
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment) // Line numbers
            };

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            for (offset, &c) in chars.iter().enumerate() {
                let pos = line_start + offset;
                let style = if Some(pos) == data.error_position {
                    error_style
                } else if pos == data.position && data.error_position.is_none() {
                    cursor_style
                } else {
                    styles[pos]
                };
                let shown = if c == '\t' { ' ' } else { c };
                spans.push(Span::styled(shown.to_string(), style));
            }

            // The cursor can sit on the newline that ends this line
            let line_end = line_start + chars.len();
            if highlighted == line_end && data.source.get(line_end) == Some(&'\n') {
                let style = if data.error_position.is_some() {
                    error_style
                } else {
                    cursor_style
                };
                spans.push(Span::styled(" ", style));
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
