use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use snapnews_core::news::Article;
use snapnews_core::session::FetchTicket;

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

/// Result of a background fetch
pub struct FetchResult {
    pub ticket: FetchTicket,
    pub articles: Vec<Article>,
}

/// Progress of a background summary generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryEvent {
    /// Next piece of summary text
    Fragment { generation: u64, text: String },
    /// The stream ended, normally or after its error fragment
    Done { generation: u64 },
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Tick event for periodic updates
    Tick,
}
