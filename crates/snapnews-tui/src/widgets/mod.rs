mod help;
mod news_cards;
mod status_bar;
mod summary_panel;
mod tag_panel;

pub use help::HelpWidget;
pub use news_cards::NewsCardsWidget;
pub use status_bar::StatusBarWidget;
pub use summary_panel::SummaryPanelWidget;
pub use tag_panel::TagPanelWidget;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate to a display width (CJK aware), appending an ellipsis when cut
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
