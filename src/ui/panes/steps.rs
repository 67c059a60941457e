//! Steps pane rendering
//!
//! Lists the caption of every checkpoint the lesson recorded, marks the
//! current one with an arrow and a highlighted background, and keeps it in
//! view while stepping.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the steps pane.
///
/// `scroll_offset` is the first visible step; it is pulled along so that
/// `current` stays visible.
pub fn render_steps_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    captions: &[&str],
    current: usize,
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
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if current < *scroll_offset {
        *scroll_offset = current;
    } else if current >= *scroll_offset + visible_height {
        *scroll_offset = current + 1 - visible_height;
    }
    let max_scroll = captions.len().saturating_sub(visible_height);
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let number_width = captions.len().to_string().len();
    let items: Vec<ListItem> = captions
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(index, caption)| {
            let is_current = index == current;
            let marker = if is_current { "▶ " } else { "  " };
            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(
                    format!("{:>width$} ", index + 1, width = number_width),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(
                    caption.to_string(),
                    if is_current {
                        Style::default()
                            .fg(DEFAULT_THEME.fg)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(DEFAULT_THEME.comment)
                    },
                ),
            ]);
            let item = ListItem::new(line);
            if is_current {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
