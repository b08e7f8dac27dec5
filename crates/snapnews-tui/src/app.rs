
use snapnews_core::news::Article;
use snapnews_core::session::{DashboardSession, FetchTicket, Phase, SummaryTicket};
use snapnews_core::tags::{TagCategory, TagSelection};
use snapnews_core::AppConfig;

use crate::theme::Theme;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Current focus panel in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tags,
    Articles,
    Summary,
}

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal browsing mode
    Normal,
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    pub theme: Theme,
    /// Tag taxonomy in display order
    pub taxonomy: Vec<TagCategory>,
    /// Tags the next fetch will search for
    pub selection: TagSelection,
    /// Cursor over the flattened tag list
    pub tag_cursor: usize,
    /// Currently selected news card
    pub selected_article: usize,
    /// Scroll offset of the summary panel
    pub summary_scroll: u16,
    /// Fetch / summary state machine
    pub session: DashboardSession,
    pub focus: Focus,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    spinner_frame: usize,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let taxonomy = config.tags.clone();
        let session = DashboardSession::new(config.ui.display_limit);
        Self {
            theme: Theme::default(),
            taxonomy,
            selection: TagSelection::new(),
            tag_cursor: 0,
            selected_article: 0,
            summary_scroll: 0,
            session,
            focus: Focus::Tags,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            spinner_frame: 0,
        }
    }

    /// All tags flattened in taxonomy order
    pub fn tag_list(&self) -> Vec<&str> {
        self.taxonomy
            .iter()
            .flat_map(|c| c.tags.iter().map(String::as_str))
            .collect()
    }

    /// Tag under the cursor
    pub fn current_tag(&self) -> Option<&str> {
        self.tag_list().get(self.tag_cursor).copied()
    }

    /// News cards currently shown
    pub fn displayed_articles(&self) -> &[Article] {
        self.session.displayed_articles()
    }

    /// Get the currently selected article
    pub fn current_article(&self) -> Option<&Article> {
        self.displayed_articles().get(self.selected_article)
    }

    /// Move focus to the next panel (right)
    pub fn focus_right(&mut self) {
        self.focus = match self.focus {
            Focus::Tags => Focus::Articles,
            Focus::Articles => Focus::Summary,
            Focus::Summary => Focus::Summary,
        };
    }

    /// Move focus to the previous panel (left)
    pub fn focus_left(&mut self) {
        self.focus = match self.focus {
            Focus::Tags => Focus::Tags,
            Focus::Articles => Focus::Tags,
            Focus::Summary => Focus::Articles,
        };
    }

    /// Cycle focus through all panels
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Tags => Focus::Articles,
            Focus::Articles => Focus::Summary,
            Focus::Summary => Focus::Tags,
        };
    }

    /// Move selection down in the current panel
    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Tags => {
                let count = self.tag_list().len();
                if count > 0 && self.tag_cursor < count - 1 {
                    self.tag_cursor += 1;
                }
            }
            Focus::Articles => {
                let count = self.displayed_articles().len();
                if count > 0 && self.selected_article < count - 1 {
                    self.selected_article += 1;
                }
            }
            Focus::Summary => {
                self.summary_scroll = self.summary_scroll.saturating_add(1);
            }
        }
    }

    /// Move selection up in the current panel
    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Tags => self.tag_cursor = self.tag_cursor.saturating_sub(1),
            Focus::Articles => self.selected_article = self.selected_article.saturating_sub(1),
            Focus::Summary => self.summary_scroll = self.summary_scroll.saturating_sub(1),
        }
    }

    /// Toggle the tag under the cursor
    pub fn toggle_current_tag(&mut self) {
        if let Some(tag) = self.current_tag().map(str::to_string) {
            self.selection.toggle(&tag);
            self.set_status(format!("{} tags selected", self.selection.len()));
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.set_status("Selection cleared");
    }

    /// Whether a fetch may start now
    pub fn can_fetch(&self) -> bool {
        !self.selection.is_empty() && self.session.phase() != Phase::Fetching
    }

    /// Enter the fetching phase, or explain why not
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.selection.is_empty() {
            self.set_status("Select at least one tag first");
            return None;
        }
        match self.session.begin_fetch() {
            Ok(ticket) => {
                self.set_status(format!(
                    "Fetching news for {} tags...",
                    self.selection.len()
                ));
                Some(ticket)
            }
            Err(_) => {
                self.set_status("Fetch already in progress...");
                None
            }
        }
    }

    /// Apply fetched articles; returns the summary to start, if any
    pub fn apply_fetch(&mut self, ticket: FetchTicket, articles: Vec<Article>) -> Option<SummaryTicket> {
        let count = articles.len();
        let summary = self.session.complete_fetch(ticket, articles);

        if self.session.generation() == ticket.generation() {
            tracing::info!("Fetch {} returned {} articles", ticket.generation(), count);
            self.selected_article = 0;
            self.summary_scroll = 0;
            if count == 0 {
                self.set_status("No news found");
            } else {
                self.set_status(format!("Fetched {} articles, summarizing...", count));
            }
        }

        summary
    }

    /// Append a summary fragment
    pub fn apply_fragment(&mut self, generation: u64, text: &str) {
        self.session.append_fragment(generation, text);
    }

    /// Mark a summary generation as done
    pub fn finish_summary(&mut self, generation: u64) {
        if self.session.finish_summary(generation) {
            tracing::debug!(
                "Summary {} done, failed: {}",
                generation,
                self.session.summary_failed()
            );
            if self.session.summary_failed() {
                self.set_status("Summary failed");
            } else {
                self.set_status("Summary ready");
            }
        }
    }

    /// Key hint for the status bar; `f` is only offered when a fetch can start
    pub fn key_hint(&self) -> &'static str {
        if self.can_fetch() {
            " q:quit space:tag f:fetch o:open ?:help "
        } else {
            " q:quit space:tag o:open ?:help "
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Advance the loading spinner while a request is in flight
    pub fn tick_spinner(&mut self) {
        if self.session.phase() != Phase::Idle {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }
}
