use std::io::Write;

use anyhow::Result;
use futures::StreamExt;

use snapnews_core::ai::summary_articles;
use snapnews_core::tags::TagSelection;
use snapnews_core::Components;

pub async fn run(components: &Components, tags: &[String]) -> Result<()> {
    let selection: TagSelection = tags.iter().collect();
    let fetcher = components.fetcher()?;
    let summarizer = components.summarizer()?;

    let articles = fetcher.fetch_default(selection.as_slice()).await;
    if articles.is_empty() {
        println!("No news found for: {}", selection.as_slice().join(", "));
        return Ok(());
    }

    let included = summary_articles(&articles);
    println!("Summarizing {} of {} articles:\n", included.len(), articles.len());
    for article in included {
        println!("  - {}", article.display_title());
    }
    println!();

    let mut stdout = std::io::stdout();
    let mut stream = summarizer.generate(&articles);
    while let Some(fragment) = stream.next().await {
        write!(stdout, "{}", fragment)?;
        stdout.flush()?;
    }
    println!();

    Ok(())
}
