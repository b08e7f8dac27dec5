pub mod fetch;
pub mod run;
pub mod summarize;
pub mod tags;
