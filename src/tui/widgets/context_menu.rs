//! Context menu popup.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState};

use crate::tui::state::MenuItem;
use crate::tui::style::Styles;

/// Renders the actions menu for a marker, centered on screen.
pub fn render_context_menu(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[MenuItem],
    selected: usize,
) {
    let labels: Vec<String> = items.iter().map(MenuItem::label).collect();
    let content_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let popup_width = (content_width + 6)
        .max(title.chars().count() as u16 + 4)
        .clamp(24, 70)
        .min(area.width);
    let popup_height = (items.len() as u16 + 2).min(area.height);

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(area.x + popup_x, area.y + popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let list_items: Vec<ListItem> = labels
        .into_iter()
        .map(|label| ListItem::new(Line::from(Span::raw(label))))
        .collect();
    let list = List::new(list_items)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Styles::selected())
        .highlight_symbol("› ");

    let mut list_state = ListState::default();
    list_state.select(Some(selected.min(items.len().saturating_sub(1))));
    frame.render_stateful_widget(list, popup_area, &mut list_state);
}
