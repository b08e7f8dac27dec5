use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use snapnews_core::Phase;

use super::truncate_to_width;
use crate::app::{App, Focus};

pub struct NewsCardsWidget;

impl NewsCardsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Articles;

        let border_style = if is_focused {
            Style::default().fg(theme.border_focused)
        } else {
            Style::default().fg(theme.border)
        };

        let articles = app.displayed_articles();
        let title = if articles.is_empty() {
            " Latest News ".to_string()
        } else {
            format!(" Latest News ({}/{}) ", articles.len(), app.session.articles().len())
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.panel_bg));

        if articles.is_empty() {
            let message = match app.session.phase() {
                Phase::Fetching => format!("{} Fetching news...", app.spinner()),
                _ if app.session.generation() > 0 => "No news found.".to_string(),
                _ => "Select tags on the left and press f to fetch news.".to_string(),
            };
            let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(theme.meta)))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        // Borders plus one column of padding on each side
        let width = area.width.saturating_sub(4) as usize;

        let items: Vec<ListItem> = articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let is_cursor = i == app.selected_article && is_focused;

                let title_style = if is_cursor {
                    Style::default()
                        .fg(theme.text)
                        .bg(theme.highlight)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.headline).add_modifier(Modifier::BOLD)
                };

                let source = if article.source.is_empty() {
                    "unknown source"
                } else {
                    article.source.as_str()
                };

                let mut lines = vec![Line::from(Span::styled(
                    truncate_to_width(article.display_title(), width),
                    title_style,
                ))];
                if !article.description.is_empty() {
                    lines.push(Line::from(Span::styled(
                        truncate_to_width(&article.description, width),
                        Style::default().fg(theme.text),
                    )));
                }
                lines.push(Line::from(vec![
                    Span::styled(format!("[{}]", source), Style::default().fg(theme.source)),
                    Span::raw(" "),
                    Span::styled(article.published_date(), Style::default().fg(theme.meta)),
                ]));
                lines.push(Line::raw(""));

                ListItem::new(Text::from(lines))
            })
            .collect();

        let list = List::new(items).block(block);

        let mut state = ListState::default();
        state.select(Some(app.selected_article));

        frame.render_stateful_widget(list, area, &mut state);
    }
}
