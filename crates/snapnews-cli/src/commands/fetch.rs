use anyhow::Result;

use snapnews_core::tags::TagSelection;
use snapnews_core::Components;

pub async fn run(components: &Components, tags: &[String], limit: Option<usize>, json: bool) -> Result<()> {
    let selection: TagSelection = tags.iter().collect();
    let limit = limit.unwrap_or(components.config().news.page_size);
    let fetcher = components.fetcher()?;

    // Surface the failure here instead of the silent empty list the UI gets
    let articles = fetcher.try_fetch(selection.as_slice(), limit).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    if articles.is_empty() {
        println!("No news found for: {}", selection.as_slice().join(", "));
        return Ok(());
    }

    println!("{} articles:\n", articles.len());

    for article in &articles {
        println!("  {}", article.display_title());
        if !article.description.is_empty() {
            println!("    {}", article.description);
        }
        let source = if article.source.is_empty() { "unknown source" } else { article.source.as_str() };
        println!("    [{}] {}", source, article.published_date());
        if !article.url.is_empty() {
            println!("    {}", article.url);
        }
        println!();
    }

    Ok(())
}
