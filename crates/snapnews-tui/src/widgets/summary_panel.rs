use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use snapnews_core::Phase;

use crate::app::{App, Focus};

pub struct SummaryPanelWidget;

impl SummaryPanelWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Summary;
        let is_streaming = app.session.phase() == Phase::Summarizing;

        let border_style = if is_focused {
            Style::default().fg(theme.border_focused)
        } else {
            Style::default().fg(theme.border)
        };

        let title = if is_streaming {
            format!(" AI Summary {} ", app.spinner())
        } else {
            " AI Summary ".to_string()
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.panel_bg));

        let summary = app.session.summary();

        let paragraph = if summary.is_empty() {
            let hint = if is_streaming {
                "Generating summary..."
            } else {
                ""
            };
            Paragraph::new(Span::styled(hint, Style::default().fg(theme.meta)))
        } else {
            let style = if app.session.summary_failed() {
                Style::default().fg(theme.error)
            } else {
                Style::default().fg(theme.text)
            };
            Paragraph::new(summary).style(style)
        };

        let paragraph = paragraph
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.summary_scroll, 0));

        frame.render_widget(paragraph, area);
    }
}
