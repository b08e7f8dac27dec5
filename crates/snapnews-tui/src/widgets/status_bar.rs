use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use snapnews_core::Phase;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Help => "HELP",
            Mode::Normal => match app.session.phase() {
                Phase::Idle => "IDLE",
                Phase::Fetching => "FETCHING",
                Phase::Summarizing => "SUMMARIZING",
            },
        };

        let focus_str = match app.focus {
            Focus::Tags => "Tags",
            Focus::Articles => "News",
            Focus::Summary => "Summary",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} | {}", mode_str, msg)
        } else {
            format!(
                " {} | {} | Tags: {} | Articles: {}",
                mode_str,
                focus_str,
                app.selection.len(),
                app.session.articles().len()
            )
        };

        let help_hint = app.key_hint();
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.text).bg(theme.status_bg),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.status_bg)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.dim_text).bg(theme.status_bg),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
