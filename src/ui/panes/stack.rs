//! Stack pane rendering with call frames and their bindings
//!
//! Each frame is a header line followed by one line per binding:
//!
//! ```text
//! ▸ Frame 0 │ main()
//!   scores_list []cap=5 @3f20 = [1 2 999 4 5]
//!   slice       []cap=3 @3f20 = [999 4]
//! ```
//!
//! Slices carry a short tag of their backing storage, so views that alias
//! each other show the same tag.

use crate::memory::{stack::Stack, value::Value};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Short storage tag shown next to slices
fn storage_tag(storage: u64) -> String {
    format!("@{:04x}", storage & 0xffff)
}

/// Format a value with styled spans
fn value_spans(value: &Value) -> Vec<Span<'static>> {
    match value {
        Value::Int(n) => vec![Span::styled(
            n.to_string(),
            Style::default().fg(DEFAULT_THEME.number),
        )],
        Value::Bool(b) => vec![Span::styled(
            b.to_string(),
            Style::default().fg(DEFAULT_THEME.boolean),
        )],
        Value::Str(s) => vec![Span::styled(
            format!("{:?}", s),
            Style::default().fg(DEFAULT_THEME.string),
        )],
        Value::Nil => vec![Span::styled(
            "<nil>",
            Style::default().fg(DEFAULT_THEME.comment),
        )],
        Value::Ref(inner) => {
            let mut spans = vec![Span::styled("&", Style::default().fg(DEFAULT_THEME.secondary))];
            spans.extend(value_spans(inner));
            spans
        }
        // Composite values read better in their printed form
        other => vec![Span::styled(
            other.to_string(),
            Style::default().fg(DEFAULT_THEME.fg),
        )],
    }
}

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    stack: &Stack,
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
        .title(" Call Stack ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut all_items = Vec::new();

    if stack.frames().is_empty() {
        all_items.push(ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)));
    }

    for (depth, stack_frame) in stack.frames().iter().enumerate() {
        all_items.push(ListItem::new(Line::from(vec![
            Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
            Span::styled(
                format!("Frame {} ", depth),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled("│ ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                format!("{}()", stack_frame.function_name),
                Style::default()
                    .fg(DEFAULT_THEME.function)
                    .add_modifier(Modifier::BOLD),
            ),
        ])));

        let name_width = stack_frame
            .locals()
            .iter()
            .map(|var| var.name.len())
            .max()
            .unwrap_or(0);

        for var in stack_frame.locals() {
            let mut spans = vec![
                Span::raw("  "),
                Span::styled(
                    format!("{:<width$} ", var.name, width = name_width),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled(
                    var.value.type_label(),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
            ];
            if let Value::Slice { storage, .. } = &var.value {
                spans.push(Span::styled(
                    format!(" {}", storage_tag(*storage)),
                    Style::default().fg(DEFAULT_THEME.primary),
                ));
            }
            spans.push(Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)));
            spans.extend(value_spans(&var.value));
            all_items.push(ListItem::new(Line::from(spans)));
        }

        all_items.push(ListItem::new(""));
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliasing_views_share_a_tag() {
        assert_eq!(storage_tag(0x7f3a_0001_3f20), "@3f20");
        assert_eq!(storage_tag(0x12), "@0012");
    }

    #[test]
    fn references_are_prefixed() {
        let spans = value_spans(&Value::Int(18000).by_ref());
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "&18000");
    }
}
