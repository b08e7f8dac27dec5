use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use snapnews_core::session::SummaryTicket;
use snapnews_core::Components;
use snapnews_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler, FetchResult, SummaryEvent},
    input::{handle_key_event, Action},
    widgets::{HelpWidget, NewsCardsWidget, StatusBarWidget, SummaryPanelWidget, TagPanelWidget},
};

/// Channels and the in-flight summary task shared by the event loop
struct Background {
    fetch_tx: mpsc::UnboundedSender<FetchResult>,
    summary_tx: mpsc::UnboundedSender<SummaryEvent>,
    summary_task: Option<JoinHandle<()>>,
}

impl Background {
    /// Abort the running summary consumer, which drops its stream
    fn cancel_summary(&mut self) {
        if let Some(task) = self.summary_task.take() {
            task.abort();
        }
    }
}

pub async fn run(components: Arc<Components>) -> Result<()> {
    let config = components.config().clone();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("SnapNews"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    let result = event_loop(&mut terminal, &mut app, &event_handler, &components).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    components: &Arc<Components>,
) -> Result<()> {
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();
    let (summary_tx, mut summary_rx) = mpsc::unbounded_channel::<SummaryEvent>();
    let mut background = Background {
        fetch_tx,
        summary_tx,
        summary_task: None,
    };

    loop {
        // Process any completed fetches (non-blocking)
        while let Ok(result) = fetch_rx.try_recv() {
            handle_fetch_result(app, result, components, &mut background);
        }

        // Append streamed summary text (non-blocking)
        while let Ok(event) = summary_rx.try_recv() {
            match event {
                SummaryEvent::Fragment { generation, text } => app.apply_fragment(generation, &text),
                SummaryEvent::Done { generation } => app.finish_summary(generation),
            }
        }

        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            // Three-column layout with 2:5:3 ratio
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Ratio(2, 10), // Tags
                    Constraint::Ratio(5, 10), // News cards
                    Constraint::Ratio(3, 10), // Summary
                ])
                .split(main_layout[0]);

            TagPanelWidget::render(frame, columns[0], app);
            NewsCardsWidget::render(frame, columns[1], app);
            SummaryPanelWidget::render(frame, columns[2], app);
            StatusBarWidget::render(frame, main_layout[1], app);

            if app.mode == Mode::Help {
                HelpWidget::render(frame, &app.theme);
            }
        })?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    handle_action(app, action, components, &mut background);
                }
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => app.tick_spinner(),
            }
        }

        if app.should_quit {
            break;
        }
    }

    background.cancel_summary();
    Ok(())
}

fn handle_action(app: &mut App, action: Action, components: &Arc<Components>, background: &mut Background) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::FocusLeft => app.focus_left(),
        Action::FocusRight => app.focus_right(),
        Action::FocusNext => app.focus_next(),
        Action::MoveUp => app.move_up(),
        Action::MoveDown => app.move_down(),
        Action::ToggleTag => app.toggle_current_tag(),
        Action::ClearSelection => app.clear_selection(),
        Action::Fetch => start_fetch(app, components, background),
        Action::OpenInBrowser => {
            let url = app.current_article().map(|a| a.url.clone()).unwrap_or_default();
            if url.is_empty() {
                app.set_status("No link for this article");
            } else if let Err(e) = open::that(&url) {
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status("Opened in browser");
            }
        }
        Action::ShowHelp => app.mode = Mode::Help,
        Action::ExitMode => {
            app.mode = Mode::Normal;
            app.clear_status();
        }
        Action::None => {}
    }
}

/// Spawn the search request; a running summary is cancelled first
fn start_fetch(app: &mut App, components: &Arc<Components>, background: &mut Background) {
    let Some(ticket) = app.begin_fetch() else {
        return;
    };

    if ticket.cancelled_summary {
        background.cancel_summary();
    }

    let fetcher = match components.fetcher() {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!("Fetcher unavailable: {}", e);
            // Report an empty result so the session leaves Fetching
            let _ = background.fetch_tx.send(FetchResult {
                ticket,
                articles: Vec::new(),
            });
            return;
        }
    };

    let tags = app.selection.as_slice().to_vec();
    let tx = background.fetch_tx.clone();

    tracing::debug!("Fetching news for tags: {:?}", tags);

    tokio::spawn(async move {
        let articles = fetcher.fetch_default(&tags).await;
        let _ = tx.send(FetchResult { ticket, articles });
    });
}

fn handle_fetch_result(
    app: &mut App,
    result: FetchResult,
    components: &Arc<Components>,
    background: &mut Background,
) {
    let FetchResult { ticket, articles } = result;

    if let Some(summary) = app.apply_fetch(ticket, articles) {
        start_summary(app, summary, components, background);
    }
}

/// Spawn the task that forwards summary fragments to the UI
fn start_summary(
    app: &mut App,
    ticket: SummaryTicket,
    components: &Arc<Components>,
    background: &mut Background,
) {
    background.cancel_summary();

    let generation = ticket.generation();
    let tx = background.summary_tx.clone();

    let summarizer = match components.summarizer() {
        Ok(summarizer) => summarizer,
        Err(e) => {
            tracing::error!("Summary generator unavailable: {}", e);
            app.apply_fragment(
                generation,
                &format!("{}{}", snapnews_core::ai::SUMMARY_ERROR_PREFIX, e),
            );
            app.finish_summary(generation);
            return;
        }
    };

    let mut stream = summarizer.generate(app.session.articles());

    background.summary_task = Some(tokio::spawn(async move {
        while let Some(text) = stream.next().await {
            if tx.send(SummaryEvent::Fragment { generation, text }).is_err() {
                return;
            }
        }
        let _ = tx.send(SummaryEvent::Done { generation });
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapnews_core::news::Article;
    use snapnews_core::{AppConfig, Phase};
    use tokio::sync::oneshot;

    fn background() -> (
        Background,
        mpsc::UnboundedReceiver<FetchResult>,
        mpsc::UnboundedReceiver<SummaryEvent>,
    ) {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let (summary_tx, summary_rx) = mpsc::unbounded_channel();
        let background = Background {
            fetch_tx,
            summary_tx,
            summary_task: None,
        };
        (background, fetch_rx, summary_rx)
    }

    /// No credentials, so neither component can be built
    fn components() -> Arc<Components> {
        Arc::new(Components::new(Arc::new(AppConfig::default())))
    }

    fn articles(count: usize) -> Vec<Article> {
        (0..count)
            .map(|i| Article {
                title: format!("title {}", i),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_unavailable_summarizer_writes_error_and_finishes() {
        let components = components();
        let (mut background, _fetch_rx, _summary_rx) = background();
        let mut app = App::new(components.config());
        app.toggle_current_tag();
        let ticket = app.begin_fetch().unwrap();

        handle_fetch_result(
            &mut app,
            FetchResult {
                ticket,
                articles: articles(3),
            },
            &components,
            &mut background,
        );

        assert_eq!(app.session.phase(), Phase::Idle);
        assert!(app.session.summary().starts_with("Error generating summary: "));
        assert!(app.session.summary_failed());
        assert!(background.summary_task.is_none());
    }

    #[tokio::test]
    async fn test_refetch_aborts_running_summary_task() {
        let components = components();
        let (mut background, mut fetch_rx, _summary_rx) = background();
        let mut app = App::new(components.config());
        app.toggle_current_tag();

        let ticket = app.begin_fetch().unwrap();
        assert!(app.apply_fetch(ticket, articles(2)).is_some());
        assert_eq!(app.session.phase(), Phase::Summarizing);

        // Stand-in consumer that never finishes on its own
        let (alive_tx, alive_rx) = oneshot::channel::<()>();
        background.summary_task = Some(tokio::spawn(async move {
            let _alive = alive_tx;
            futures::future::pending::<()>().await;
        }));

        start_fetch(&mut app, &components, &mut background);

        assert!(background.summary_task.is_none());
        // The sender is dropped with the aborted task
        assert!(alive_rx.await.is_err());

        // The fetcher cannot be built, so an empty result comes back
        let result = fetch_rx.recv().await.unwrap();
        assert!(result.articles.is_empty());
        handle_fetch_result(&mut app, result, &components, &mut background);
        assert_eq!(app.session.phase(), Phase::Idle);
        assert_eq!(app.status_message.as_deref(), Some("No news found"));
    }
}
