use crate::types::NewsItem;
use chrono::{DateTime, Utc};

/// Topic and brand terms, English and Chinese mixed on purpose: the default
/// feed set publishes in both languages.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "agent",
    "ai agent",
    "llm",
    "gpt",
    "claude",
    "gemini",
    "langchain",
    "autogpt",
    "chatgpt",
    "copilot",
    "大模型",
    "智能体",
    "ai助手",
    "人工智能",
    "anthropic",
    "openai",
    "机器人",
    "自动化",
];

/// Case-insensitive substring matcher over title + summary. The keyword
/// set is injectable so callers can swap in their own list; the default
/// behaves exactly like a plain substring scan.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
        }
    }

    pub fn is_relevant(&self, item: &NewsItem) -> bool {
        let text = format!("{} {}", item.title, item.summary).to_lowercase();
        self.keywords.iter().any(|kw| text.contains(kw.as_str()))
    }
}

impl Default for KeywordFilter {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORDS.iter().copied())
    }
}

/// Items published at or after the cutoff pass. Undated entries were
/// stamped with the ingestion time upstream, so they always land inside
/// the window; that bias is intended.
pub fn within_window(item: &NewsItem, cutoff: DateTime<Utc>) -> bool {
    item.published >= cutoff
}
