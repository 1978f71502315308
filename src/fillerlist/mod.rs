//! Canon episode lists scraped from AnimeFillerList.
//!
//! A show page lists its episodes in one block per classification. Each
//! block's links carry either a single episode number or a range; this
//! module fetches the page, pulls the tokens out of the requested blocks
//! and runs them through the episode parser.

mod client;

pub use client::FillerListClient;

use crate::canon::{CanonCategory, CategorizedEpisodes, InclusionFilter};
use crate::episodes::parse_section;
use crate::error::ScraperError;
use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

/// Runs of characters that cannot appear in a show slug.
static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Invalid NON_SLUG_CHARS"));

/// CSS selectors for each canon block.
struct Selectors {
    manga: Selector,
    mixed: Selector,
    anime: Selector,
}

impl Selectors {
    fn new() -> Self {
        Self {
            manga: Selector::parse("div.manga_canon span.Episodes a").unwrap(),
            // The class name contains a slash, so match it as a whole word.
            mixed: Selector::parse(r#"div[class~="mixed_canon/filler"] span.Episodes a"#)
                .unwrap(),
            anime: Selector::parse("div.anime_canon span.Episodes a").unwrap(),
        }
    }

    fn for_category(&self, category: CanonCategory) -> &Selector {
        match category {
            CanonCategory::Manga => &self.manga,
            CanonCategory::Mixed => &self.mixed,
            CanonCategory::Anime => &self.anime,
        }
    }
}

static SELECTORS: LazyLock<Selectors> = LazyLock::new(Selectors::new);

/// Where show pages come from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns the human-readable name of this source.
    fn name(&self) -> &'static str;

    /// Fetches the raw HTML page for a show slug.
    async fn fetch(&self, slug: &str) -> Result<String, ScraperError>;
}

/// Converts a configured show title into the site's slug form.
///
/// `"One Piece"` becomes `one-piece`; a title that already is a slug is
/// returned unchanged. Long vowels from romanized Japanese are folded
/// (`"Shippūden"` becomes `shippuden`); any other non-ASCII character acts
/// as a separator.
pub fn slugify(title: &str) -> String {
    let lowered: String = title.trim().to_lowercase().chars().map(fold_long_vowel).collect();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

fn fold_long_vowel(c: char) -> char {
    match c {
        'ā' | 'â' => 'a',
        'ē' | 'ê' => 'e',
        'ī' | 'î' => 'i',
        'ō' | 'ô' => 'o',
        'ū' | 'û' => 'u',
        other => other,
    }
}

/// Returns the trimmed, non-empty link texts of one canon block, in page
/// order.
pub fn extract_section_tokens(doc: &Html, category: CanonCategory) -> Vec<String> {
    doc.select(SELECTORS.for_category(category))
        .map(|elem| elem.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Parses the requested canon blocks of a show page.
///
/// Warnings are logged once per block rather than per token.
pub fn categorize_document(html: &str, filter: &InclusionFilter) -> CategorizedEpisodes {
    let doc = Html::parse_document(html);
    let mut categorized = CategorizedEpisodes::default();

    for category in filter.categories() {
        let tokens = extract_section_tokens(&doc, category);
        let parsed = parse_section(&tokens);

        if !parsed.warnings.is_empty() {
            let listed: Vec<String> = parsed.warnings.iter().map(|w| w.to_string()).collect();
            debug!(
                category = category.as_str(),
                "parse warnings: [{}]",
                listed.join(", ")
            );
            categorized.warnings.push((category, parsed.warnings));
        }

        *categorized.get_mut(category) = parsed.episodes;
    }

    categorized
}

/// Fetches and categorizes canon episodes for shows.
pub struct Categorizer<'a> {
    source: &'a dyn DocumentSource,
}

impl<'a> Categorizer<'a> {
    pub fn new(source: &'a dyn DocumentSource) -> Self {
        Self { source }
    }

    /// Fetches one show page and parses the categories `filter` selects.
    ///
    /// A failed fetch is returned as an error; nothing is parsed from a
    /// partial result.
    pub async fn categorize(
        &self,
        title: &str,
        filter: &InclusionFilter,
    ) -> Result<CategorizedEpisodes, ScraperError> {
        let slug = slugify(title);
        if filter.fell_back() {
            debug!(
                title = %slug,
                "no valid canon types specified, defaulting to all"
            );
        }

        debug!(title = %slug, source = self.source.name(), "fetching canon list");
        let html = self.source.fetch(&slug).await?;
        let categorized = categorize_document(&html, filter);

        for category in filter.categories() {
            debug!(
                title = %slug,
                category = category.as_str(),
                count = categorized.get(category).len(),
                "canon episodes"
            );
        }

        Ok(categorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::instrument::WithSubscriber;

    const SHOW_PAGE: &str = r#"
        <html><body>
        <div class="manga_canon">
            <span class="Label">Manga Canon Episodes:</span>
            <span class="Episodes"><a href="/1">1-3</a>, <a href="/5">5</a>, <a href="/5">5</a>, <a href="/x">abc</a></span>
        </div>
        <div class="mixed_canon/filler">
            <span class="Episodes"><a href="/4">4</a>, <a href="/6">6-7</a></span>
        </div>
        <div class="filler">
            <span class="Episodes"><a href="/9">9</a></span>
        </div>
        <div class="anime_canon">
            <span class="Episodes"><a href="/8">8</a>, <a href="/0">0</a>, <a href="/y">a-b</a></span>
        </div>
        </body></html>
    "#;

    struct StaticSource {
        html: Option<&'static str>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticSource {
        fn new(html: Option<&'static str>) -> Self {
            Self {
                html,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DocumentSource for StaticSource {
        fn name(&self) -> &'static str {
            "Static"
        }

        async fn fetch(&self, slug: &str) -> Result<String, ScraperError> {
            self.requested.lock().unwrap().push(slug.to_string());
            self.html
                .map(str::to_string)
                .ok_or_else(|| ScraperError::Status {
                    url: format!("https://example.invalid/shows/{}/", slug),
                    status: 404,
                })
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("One Piece"), "one-piece");
        assert_eq!(slugify("naruto-shippuden"), "naruto-shippuden");
        assert_eq!(slugify("  Hunter x Hunter (2011) "), "hunter-x-hunter-2011");
        assert_eq!(slugify("Naruto Shippūden"), "naruto-shippuden");
        assert_eq!(slugify("Dragon Ball Z: Kai"), "dragon-ball-z-kai");
        assert_eq!(slugify("Kōkaku Kidōtai"), "kokaku-kidotai");
    }

    #[test]
    fn test_extract_section_tokens() {
        let doc = Html::parse_document(SHOW_PAGE);
        assert_eq!(
            extract_section_tokens(&doc, CanonCategory::Manga),
            vec!["1-3", "5", "5", "abc"]
        );
        assert_eq!(
            extract_section_tokens(&doc, CanonCategory::Mixed),
            vec!["4", "6-7"]
        );
        assert!(extract_section_tokens(&Html::parse_document("<p></p>"), CanonCategory::Anime).is_empty());
    }

    #[test]
    fn test_categorize_all() {
        let categorized = categorize_document(SHOW_PAGE, &InclusionFilter::all());
        assert_eq!(categorized.manga.as_slice(), &[1, 2, 3, 5]);
        assert_eq!(categorized.mixed.as_slice(), &[4, 6, 7]);
        assert_eq!(categorized.anime.as_slice(), &[8]);
        assert_eq!(categorized.warning_count(), 2);
        assert_eq!(categorized.warnings[0].0, CanonCategory::Manga);
        assert_eq!(categorized.warnings[0].1[0].to_string(), "single 'abc'");
        assert_eq!(categorized.warnings[1].0, CanonCategory::Anime);
        assert_eq!(categorized.warnings[1].1[0].to_string(), "range 'a-b'");
    }

    #[test]
    fn test_unrequested_categories_are_empty() {
        let filter = InclusionFilter::from_config(&["mixed"]);
        let categorized = categorize_document(SHOW_PAGE, &filter);
        assert!(categorized.manga.is_empty());
        assert!(categorized.anime.is_empty());
        assert_eq!(categorized.mixed.as_slice(), &[4, 6, 7]);
        assert_eq!(categorized.warning_count(), 0);
    }

    #[test]
    fn test_page_without_blocks() {
        let categorized = categorize_document("<html></html>", &InclusionFilter::all());
        for category in CanonCategory::ALL {
            assert!(categorized.get(category).is_empty());
        }
    }

    #[tokio::test]
    async fn test_categorizer_fetches_once_by_slug() {
        let source = StaticSource::new(Some(SHOW_PAGE));
        let categorizer = Categorizer::new(&source);

        let categorized = categorizer
            .categorize("One Piece", &InclusionFilter::from_config(&["manga"]))
            .await
            .unwrap();

        assert_eq!(categorized.manga.as_slice(), &[1, 2, 3, 5]);
        assert_eq!(*source.requested.lock().unwrap(), vec!["one-piece"]);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_fallback_and_parse_warnings_stay_below_warn() {
        let source = StaticSource::new(Some(SHOW_PAGE));
        let categorizer = Categorizer::new(&source);
        let filter = InclusionFilter::from_config(&["filler"]);

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();

        let categorized = categorizer
            .categorize("one-piece", &filter)
            .with_subscriber(subscriber)
            .await
            .unwrap();

        assert!(filter.fell_back());
        assert_eq!(categorized.warning_count(), 2);
        assert!(captured.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_categorizer_propagates_fetch_failure() {
        let source = StaticSource::new(None);
        let categorizer = Categorizer::new(&source);

        let err = categorizer
            .categorize("missing-show", &InclusionFilter::all())
            .await
            .unwrap_err();
        assert!(matches!(err, ScraperError::Status { status: 404, .. }));
    }
}
