use ai_news_digest::compose::compose_batches;
use ai_news_digest::filter::KeywordFilter;
use ai_news_digest::pipeline::aggregate;
use ai_news_digest::traits::NewsSource;
use ai_news_digest::types::RawEntry;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Source double returning a fixed entry list.
struct StaticSource {
    name: String,
    entries: Vec<RawEntry>,
}

impl StaticSource {
    fn new(name: &str, entries: Vec<RawEntry>) -> Box<dyn NewsSource> {
        Box::new(Self {
            name: name.to_string(),
            entries,
        })
    }
}

#[async_trait]
impl NewsSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(&self) -> Vec<RawEntry> {
        self.entries.clone()
    }
}

fn run_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
}

fn entry(title: &str, link: &str, hours_ago: i64) -> RawEntry {
    RawEntry {
        title: Some(title.to_string()),
        link: Some(link.to_string()),
        published: Some(run_time() - Duration::hours(hours_ago)),
        ..Default::default()
    }
}

#[tokio::test]
async fn window_and_relevance_filters_conjoin() {
    // L1 is fresh and relevant, L2 is too old, L3 is fresh and relevant,
    // the weather item is fresh but off-topic.
    let sources = vec![StaticSource::new(
        "A",
        vec![
            entry("GPT benchmark results", "https://a.example/l1", 1),
            entry("GPT archive post", "https://a.example/l2", 30),
            entry("Claude agent toolkit", "https://a.example/l3", 2),
            entry("Weather balloon drifts", "https://a.example/l4", 1),
        ],
    )];

    let corpus = aggregate(&sources, &KeywordFilter::default(), 24, run_time()).await;

    let links: Vec<&str> = corpus.iter().map(|i| i.link.as_str()).collect();
    assert_eq!(links, vec!["https://a.example/l1", "https://a.example/l3"]);
}

#[tokio::test]
async fn corpus_is_ranked_newest_first() {
    let sources = vec![StaticSource::new(
        "A",
        vec![
            entry("LLM story old", "https://a.example/old", 10),
            entry("LLM story new", "https://a.example/new", 1),
            entry("LLM story mid", "https://a.example/mid", 5),
        ],
    )];

    let corpus = aggregate(&sources, &KeywordFilter::default(), 24, run_time()).await;

    let links: Vec<&str> = corpus.iter().map(|i| i.link.as_str()).collect();
    assert_eq!(
        links,
        vec![
            "https://a.example/new",
            "https://a.example/mid",
            "https://a.example/old"
        ]
    );
}

#[tokio::test]
async fn duplicate_link_across_sources_keeps_first_seen() {
    let shared = "https://shared.example/story";
    let sources = vec![
        StaticSource::new("First Feed", vec![entry("OpenAI raises funding", shared, 3)]),
        StaticSource::new(
            "Second Feed",
            vec![entry("OpenAI announces funding round", shared, 2)],
        ),
    ];

    let corpus = aggregate(&sources, &KeywordFilter::default(), 24, run_time()).await;

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].source, "First Feed");
    assert_eq!(corpus[0].title, "OpenAI raises funding");
}

#[tokio::test]
async fn undated_entries_count_as_fresh() {
    let undated = RawEntry {
        title: Some("ChatGPT plugin ecosystem grows".to_string()),
        link: Some("https://a.example/undated".to_string()),
        ..Default::default()
    };
    let sources = vec![StaticSource::new("A", vec![undated])];

    let corpus = aggregate(&sources, &KeywordFilter::default(), 24, run_time()).await;

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].published, run_time());
}

#[tokio::test]
async fn linkless_entries_are_skipped_without_aborting_the_source() {
    let broken = RawEntry {
        title: Some("LLM item without a link".to_string()),
        ..Default::default()
    };
    let sources = vec![StaticSource::new(
        "A",
        vec![broken, entry("LLM item with link", "https://a.example/ok", 1)],
    )];

    let corpus = aggregate(&sources, &KeywordFilter::default(), 24, run_time()).await;

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].link, "https://a.example/ok");
}

#[tokio::test]
async fn empty_source_does_not_abort_others() {
    let sources = vec![
        StaticSource::new("Broken Feed", Vec::new()),
        StaticSource::new("Live Feed", vec![entry("Gemini update", "https://b.example/1", 1)]),
    ];

    let corpus = aggregate(&sources, &KeywordFilter::default(), 24, run_time()).await;

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus[0].source, "Live Feed");
}

#[tokio::test]
async fn twelve_items_fill_two_batches_of_five() {
    let entries: Vec<RawEntry> = (0..12)
        .map(|n| {
            entry(
                &format!("LLM story {}", n),
                &format!("https://a.example/{}", n),
                n as i64 % 12,
            )
        })
        .collect();
    let sources = vec![StaticSource::new("A", entries)];

    let corpus = aggregate(&sources, &KeywordFilter::default(), 24, run_time()).await;
    assert_eq!(corpus.len(), 12);

    let posts = compose_batches(&corpus, 10, 5, run_time());
    assert_eq!(posts.len(), 2);

    // No item shows up in two batches.
    for n in 0..12 {
        let link = format!("https://a.example/{}\"", n);
        let appearances = posts.iter().filter(|p| p.body.contains(&link)).count();
        assert!(appearances <= 1, "item {} appears {} times", n, appearances);
    }
}
