use crate::news::Article;

/// Articles beyond this count never reach the prompt
pub const MAX_SUMMARY_ARTICLES: usize = 8;

/// System persona for the daily summary
pub const SYSTEM_PROMPT: &str = "你是一个专业的新闻分析师，请对今日新闻进行简明扼要的总结。
关注以下几个方面：
1. 主要新闻事件
2. 重要趋势
3. 值得关注的发展

要求：
- 简明扼要
- 突出重点
- 客观中立
";

/// The slice of articles that gets summarized
pub fn summary_articles(articles: &[Article]) -> &[Article] {
    &articles[..articles.len().min(MAX_SUMMARY_ARTICLES)]
}

/// Build the user prompt for at most [`MAX_SUMMARY_ARTICLES`] articles
pub fn build_summary_prompt(articles: &[Article]) -> String {
    let included = summary_articles(articles);

    let news_text = included
        .iter()
        .map(|article| {
            format!(
                "标题: {}\n描述: {}\n来源: {}",
                article.title, article.description, article.source
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("请对以下{}条新闻进行总结：\n\n{}", included.len(), news_text)
}
