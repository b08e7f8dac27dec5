use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, Focus};

pub struct TagPanelWidget;

impl TagPanelWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Tags;

        let border_style = if is_focused {
            Style::default().fg(theme.border_focused)
        } else {
            Style::default().fg(theme.border)
        };

        let block = Block::default()
            .title(format!(" Tags ({}) ", app.selection.len()))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.panel_bg));

        let mut items: Vec<ListItem> = Vec::new();
        let mut cursor_row = None;
        let mut tag_index = 0;

        for category in &app.taxonomy {
            items.push(ListItem::new(Line::from(Span::styled(
                category.name.clone(),
                Style::default()
                    .fg(theme.dim_text)
                    .add_modifier(Modifier::BOLD),
            ))));

            for tag in &category.tags {
                let is_selected = app.selection.contains(tag);
                let is_cursor = tag_index == app.tag_cursor;
                if is_cursor {
                    cursor_row = Some(items.len());
                }

                // Priority: cursor > selected > plain
                let style = if is_cursor && is_focused {
                    Style::default()
                        .fg(theme.text)
                        .bg(theme.highlight)
                        .add_modifier(Modifier::BOLD)
                } else if is_selected {
                    Style::default().fg(theme.tag_selected)
                } else {
                    Style::default().fg(theme.text)
                };

                let marker = if is_selected { " ✓ " } else { "   " };

                items.push(ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.tag_selected)),
                    Span::styled(tag.clone(), style),
                ])));
                tag_index += 1;
            }
        }

        let list = List::new(items).block(block);

        let mut state = ListState::default();
        state.select(cursor_row);

        frame.render_stateful_widget(list, area, &mut state);
    }
}
