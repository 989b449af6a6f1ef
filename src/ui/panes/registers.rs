//! Register pane rendering: the working register and every written slot

use crate::memory::{slots::SlotFile, value::Value};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the register pane
pub struct RegisterScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the register pane
pub struct RegisterRenderData<'a> {
    pub register: &'a Value,
    pub slots: &'a SlotFile,
}

/// Style a value by its kind
pub fn format_value_styled(value: &Value) -> Span<'static> {
    let color = match value {
        Value::Number(_) => DEFAULT_THEME.number,
        Value::Text(_) => DEFAULT_THEME.string,
        Value::List(_) => DEFAULT_THEME.fg,
        Value::Resource(_) => DEFAULT_THEME.function,
    };
    Span::styled(value.repr(), Style::default().fg(color))
}

fn value_line(label: String, label_style: Style, value: &Value) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, label_style),
        Span::styled(
            format!("{:<9}", value.type_name()),
            Style::default().fg(DEFAULT_THEME.type_name),
        ),
        format_value_styled(value),
    ])
}

/// Render the register pane
pub fn render_register_pane(
    frame: &mut Frame,
    area: Rect,
    data: RegisterRenderData,
    is_focused: bool,
    scroll_state: &mut RegisterScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Registers ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items = vec![ListItem::new(value_line(
        format!("{:>6}  ", "w"),
        Style::default()
            .fg(DEFAULT_THEME.register)
            .add_modifier(Modifier::BOLD),
        data.register,
    ))];

    let slots = data.slots.sorted();
    if slots.is_empty() {
        all_items.push(ListItem::new(Line::from(Span::styled(
            "  (no slots written)",
            Style::default().fg(DEFAULT_THEME.comment),
        ))));
    }
    for (id, value) in slots {
        all_items.push(ListItem::new(value_line(
            format!("{:>6}  ", id),
            Style::default().fg(DEFAULT_THEME.comment),
            value,
        )));
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Follow newly written slots, otherwise keep the user's scroll position
    if total_items > scroll_state.prev_item_count && total_items > visible_height {
        scroll_state.offset = total_items - visible_height;
    }
    scroll_state.prev_item_count = total_items;

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
