mod prompt;
pub mod providers;
mod summarizer;

pub use prompt::{build_summary_prompt, summary_articles, MAX_SUMMARY_ARTICLES, SYSTEM_PROMPT};
pub use summarizer::{is_error_fragment, SummaryGenerator, SummaryStream, SUMMARY_ERROR_PREFIX};
