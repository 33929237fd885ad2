use std::time::Duration;

use bgate_protocol::{BookEntry, RangeQuery, VerseRecord};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::{CorpusError, Result};
use crate::Corpus;

pub const BASE_URL: &str = "https://www.biblegateway.com";

const USER_AGENT: &str = concat!("bgate/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(30);

macro_rules! selector {
    ($css:literal) => {
        Lazy::new(|| Selector::parse($css).expect("static selector"))
    };
}

static PASSAGE: Lazy<Selector> = selector!(".passage-table");
static DISPLAY_TEXT: Lazy<Selector> = selector!(".dropdown-display-text");
static LINE: Lazy<Selector> = selector!(".text");
static VERSE_MARKER: Lazy<Selector> = selector!(".versenum, .chapternum");
static NOT_VERSE_TEXT: Lazy<Selector> = selector!(".versenum, .chapternum, .crossreference, .footnote");
static BOOKLIST_LINK: Lazy<Selector> = selector!(".publisher-info-bottom a");
static BOOK_ROW: Lazy<Selector> = selector!(".infotable tr .book-name");
static CHAPTER_COUNT: Lazy<Selector> = selector!(".num-chapters");
static NOT_BOOK_NAME: Lazy<Selector> = selector!(".num-chapters, svg");

/// The passage web service, one translation at a time.
pub struct RemoteCorpus {
    client: Client,
    base_url: String,
    translation: String,
}

impl RemoteCorpus {
    pub fn new(translation: &str) -> Result<Self> {
        Self::with_base_url(BASE_URL, translation)
    }

    pub fn with_base_url(base_url: &str, translation: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            translation: translation.to_string(),
        })
    }

    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// Fetches and parses the passage page for a free-form search string.
    pub fn passage(&self, search: &str) -> Result<Vec<VerseRecord>> {
        let html = self.fetch_passage(search)?;
        parse_passage(&html)
    }

    fn fetch_passage(&self, search: &str) -> Result<String> {
        let url = format!("{}/passage/", self.base_url);
        self.get(&url, &[("search", search), ("version", self.translation.as_str())])
    }

    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String> {
        debug!(url, ?query, "GET");
        let response = self.client.get(url).query(query).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(CorpusError::Status(status.as_u16()));
        }
        Ok(response.text()?)
    }
}

impl Corpus for RemoteCorpus {
    fn query(&self, range: &RangeQuery) -> Result<Vec<VerseRecord>> {
        self.passage(&range.to_string())
    }

    /// The service has no book-list endpoint: the translation's info page is
    /// linked from the footer of any passage page.
    fn booklist(&self) -> Result<Vec<BookEntry>> {
        let page = self.fetch_passage("Genesis 1")?;
        let href = parse_booklist_link(&page)?;

        let url = if href.starts_with("http") {
            href
        } else {
            format!("{}{}", self.base_url, href)
        };
        let info = self.get(&url, &[])?;
        parse_booklist(&info)
    }
}

/// Concatenated text of `element`, skipping any text inside a descendant
/// that matches `skip`.
fn text_without(element: ElementRef<'_>, skip: &Selector) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| skip.matches(&ancestor));
        if !hidden {
            text.push_str(fragment);
        }
    }
    text
}

fn is_heading(line: ElementRef<'_>) -> bool {
    line.parent()
        .and_then(ElementRef::wrap)
        .map(|parent| matches!(parent.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
        .unwrap_or(false)
}

/// Chapter and verse from a line class such as `text John-3-16`.
fn line_location(line: ElementRef<'_>) -> Option<(u32, u32)> {
    line.value().classes().find_map(|class| {
        let mut parts = class.rsplitn(3, '-');
        let verse = parts.next()?.parse().ok()?;
        let chapter = parts.next()?.parse().ok()?;
        parts.next()?;
        Some((chapter, verse))
    })
}

/// Turns a passage page into verse records.
///
/// Headings become the title of the verse that follows them. A line that
/// carries a verse or chapter number starts part 1 of that verse; any other
/// line continues the previous verse as the next part.
pub fn parse_passage(html: &str) -> Result<Vec<VerseRecord>> {
    let document = Html::parse_document(html);
    let mut verses = Vec::new();

    for passage in document.select(&PASSAGE) {
        let display = passage
            .select(&DISPLAY_TEXT)
            .next()
            .map(|e| e.text().collect::<String>())
            .ok_or_else(|| CorpusError::MalformedPage("passage has no reference header".into()))?;
        let words: Vec<&str> = display.split_whitespace().collect();
        let book = match words.split_last() {
            Some((_, name)) if !name.is_empty() => name.join(" "),
            _ => return Err(CorpusError::MalformedPage(format!("unexpected reference header {display:?}"))),
        };

        let mut title: Option<String> = None;
        let mut part = 0;

        for line in passage.select(&LINE) {
            let text = text_without(line, &NOT_VERSE_TEXT).trim().to_string();

            if is_heading(line) {
                title = Some(text);
                continue;
            }

            let (chapter, verse) = line_location(line).ok_or_else(|| {
                let class = line.value().attr("class").unwrap_or_default();
                CorpusError::MalformedPage(format!("unexpected line class {class:?}"))
            })?;

            part = if line.select(&VERSE_MARKER).next().is_some() { 1 } else { part + 1 };

            verses.push(VerseRecord {
                book: book.clone(),
                chapter,
                verse,
                part,
                text,
                title: title.take(),
            });
        }
    }

    if verses.is_empty() {
        warn!("passage page contained no verses");
    }
    Ok(verses)
}

/// Href of the translation info page linked from a passage page footer.
pub fn parse_booklist_link(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    document
        .select(&BOOKLIST_LINK)
        .next()
        .and_then(|link| link.value().attr("href"))
        .map(str::to_string)
        .ok_or_else(|| CorpusError::MalformedPage("no book list link".into()))
}

pub fn parse_booklist(html: &str) -> Result<Vec<BookEntry>> {
    let document = Html::parse_document(html);
    let mut books = Vec::new();

    for row in document.select(&BOOK_ROW) {
        let count = row
            .select(&CHAPTER_COUNT)
            .next()
            .map(|e| e.text().collect::<String>())
            .unwrap_or_default();
        let chapters = count
            .trim()
            .parse()
            .map_err(|_| CorpusError::MalformedPage(format!("bad chapter count {count:?}")))?;

        let name = text_without(row, &NOT_BOOK_NAME).trim().to_string();
        books.push(BookEntry { name, chapters });
    }

    Ok(books)
}
