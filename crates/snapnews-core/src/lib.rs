pub mod ai;
pub mod components;
pub mod config;
pub mod error;
pub mod news;
pub mod session;
pub mod tags;

pub use components::Components;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use news::{Article, NewsFetcher};
pub use session::{DashboardSession, Phase};
