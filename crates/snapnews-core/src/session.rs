use crate::ai::{is_error_fragment, MAX_SUMMARY_ARTICLES};
use crate::news::Article;
use crate::{Error, Result};

/// Dashboard phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request in flight
    Idle,
    /// Search request in flight
    Fetching,
    /// Summary of the current article list is streaming
    Summarizing,
}

/// Issued by [`DashboardSession::begin_fetch`], redeemed by `complete_fetch`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    /// A summary was streaming and has been invalidated
    pub cancelled_summary: bool,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Identifies the summary generation the caller should start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTicket {
    generation: u64,
}

impl SummaryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Session state: `Idle -> Fetching -> Summarizing -> Idle`.
///
/// Every fetch starts a new generation. Fragments and completions tagged
/// with an older generation are ignored, so at most one summary feeds the
/// accumulator at a time.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    phase: Phase,
    generation: u64,
    articles: Vec<Article>,
    summary: String,
    /// The current generation ended with its error fragment
    failed: bool,
    display_limit: usize,
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new(MAX_SUMMARY_ARTICLES)
    }
}

impl DashboardSession {
    pub fn new(display_limit: usize) -> Self {
        Self {
            phase: Phase::Idle,
            generation: 0,
            articles: Vec::new(),
            summary: String::new(),
            failed: false,
            display_limit: display_limit.clamp(1, MAX_SUMMARY_ARTICLES),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A freshly fetched list is still waiting for its summary to finish
    pub fn needs_refresh(&self) -> bool {
        self.phase == Phase::Summarizing
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Articles shown as cards
    pub fn displayed_articles(&self) -> &[Article] {
        &self.articles[..self.articles.len().min(self.display_limit)]
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The summary ended with the terminal error fragment
    pub fn summary_failed(&self) -> bool {
        self.failed
    }

    /// Enter `Fetching`.
    ///
    /// From `Summarizing` this cancels the running summary: its generation
    /// becomes stale and the ticket reports `cancelled_summary`.
    pub fn begin_fetch(&mut self) -> Result<FetchTicket> {
        let cancelled_summary = match self.phase {
            Phase::Fetching => {
                return Err(Error::InvalidTransition(
                    "a fetch is already in progress".to_string(),
                ))
            }
            Phase::Summarizing => true,
            Phase::Idle => false,
        };

        if cancelled_summary {
            tracing::info!("Cancelling summary generation {}", self.generation);
        }

        self.generation += 1;
        self.phase = Phase::Fetching;

        Ok(FetchTicket {
            generation: self.generation,
            cancelled_summary,
        })
    }

    /// Store fetched articles and reset the summary.
    ///
    /// Returns the ticket for the summary to stream, or `None` when the list
    /// is empty or the ticket is stale.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        articles: Vec<Article>,
    ) -> Option<SummaryTicket> {
        if self.phase != Phase::Fetching || ticket.generation != self.generation {
            tracing::debug!("Ignoring stale fetch result {}", ticket.generation);
            return None;
        }

        self.articles = articles;
        self.summary.clear();
        self.failed = false;

        if self.articles.is_empty() {
            self.phase = Phase::Idle;
            None
        } else {
            self.phase = Phase::Summarizing;
            Some(SummaryTicket {
                generation: self.generation,
            })
        }
    }

    /// Append a fragment from the given generation. Returns false if it was stale.
    pub fn append_fragment(&mut self, generation: u64, fragment: &str) -> bool {
        if !self.is_current_summary(generation) {
            return false;
        }
        if is_error_fragment(fragment) {
            tracing::warn!("Summary generation {} failed", generation);
            self.failed = true;
        }
        self.summary.push_str(fragment);
        true
    }

    /// Leave `Summarizing`. Returns true exactly once per generation.
    pub fn finish_summary(&mut self, generation: u64) -> bool {
        if !self.is_current_summary(generation) {
            return false;
        }
        tracing::debug!(
            "Summary generation {} finished, {} bytes",
            generation,
            self.summary.len()
        );
        self.phase = Phase::Idle;
        true
    }

    fn is_current_summary(&self, generation: u64) -> bool {
        self.phase == Phase::Summarizing && generation == self.generation
    }
}
