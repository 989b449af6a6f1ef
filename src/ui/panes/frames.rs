//! Control-flow pane rendering
//!
//! Shows the active loop frames (innermost first), the pending function
//! returns, and every function definition seen so far. Positions are shown
//! as `line:column`, 1-based, matching the source pane's line numbers.

use super::source::line_and_column;
use crate::memory::stack::{CallFrame, LoopFrame};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the frames pane
pub struct FramesScrollState {
    pub offset: usize,
}

/// Data needed to render the frames pane
pub struct FramesRenderData<'a> {
    pub source: &'a [char],
    pub loops: &'a [LoopFrame],
    pub calls: &'a [CallFrame],
    pub functions: &'a [usize],
}

fn format_position(source: &[char], position: Option<usize>) -> String {
    match position {
        Some(position) => {
            let (line, column) = line_and_column(source, position);
            format!("{}:{}", line + 1, column + 1)
        }
        None => "?".to_string(),
    }
}

fn heading(text: &str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    )))
}

fn empty(text: &str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(DEFAULT_THEME.comment),
    )))
}

/// Render the frames pane
pub fn render_frames_pane(
    frame: &mut Frame,
    area: Rect,
    data: FramesRenderData,
    is_focused: bool,
    scroll_state: &mut FramesScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Frames ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default().fg(DEFAULT_THEME.fg);

    let mut all_items = vec![heading("Loops")];
    if data.loops.is_empty() {
        all_items.push(empty("(none)"));
    }
    for lp in data.loops.iter().rev() {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled("  { ", Style::default().fg(DEFAULT_THEME.primary)),
            Span::styled("cond ", label),
            Span::styled(format_position(data.source, Some(lp.condition)), value),
            Span::styled("  body ", label),
            Span::styled(format_position(data.source, lp.body), value),
            Span::styled("  end ", label),
            Span::styled(format_position(data.source, lp.end), value),
        ])));
    }

    all_items.push(heading("Calls"));
    if data.calls.is_empty() {
        all_items.push(empty("(none)"));
    }
    for call in data.calls.iter().rev() {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled("  ~ ", Style::default().fg(DEFAULT_THEME.function)),
            Span::styled("return to ", label),
            Span::styled(
                format_position(data.source, Some(call.return_position)),
                value,
            ),
            Span::styled(
                format!("  ({} saved loop(s))", call.saved_loops.len()),
                label,
            ),
        ])));
    }

    all_items.push(heading("Functions"));
    if data.functions.is_empty() {
        all_items.push(empty("(none)"));
    }
    for &entry in data.functions {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled("  ( ", Style::default().fg(DEFAULT_THEME.function)),
            Span::styled(format!("{:<6}", entry), Style::default().fg(DEFAULT_THEME.number)),
            Span::styled("at ", label),
            Span::styled(format_position(data.source, Some(entry)), value),
        ])));
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    if total_items > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_items - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_position() {
        let source: Vec<char> = "v1\n{1=1{}".chars().collect();
        assert_eq!(format_position(&source, Some(3)), "2:1");
        assert_eq!(format_position(&source, Some(0)), "1:1");
        assert_eq!(format_position(&source, None), "?");
    }
}
