use anyhow::{bail, Result};
use bgate_corpus::Corpus;
use bgate_protocol::VerseRecord;
use tracing::debug;

use super::open_corpus;
use crate::navigate::{next_chapter, previous_chapter};
use crate::reader::Reader;
use crate::render::{render, Layout};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Stay,
    Next,
    Previous,
}

pub struct ReadOpts {
    pub step: Step,
    pub json: bool,
    pub interactive: bool,
    pub color: bool,
}

pub fn run(settings: &Settings, words: &[String], opts: &ReadOpts) -> Result<()> {
    let query = words.join(" ");
    if query.trim().is_empty() {
        bail!("no passage given, try `bgate john 3:16`");
    }

    let corpus = open_corpus(settings)?;
    let (query, verses) = fetch(corpus.as_ref(), &query, opts.step)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&verses)?);
        return Ok(());
    }

    let layout = Layout {
        width: settings.width,
        padding: settings.padding,
        wrap: settings.wrap,
        color: opts.color,
    };

    if opts.interactive {
        let reader = Reader::new(corpus.as_ref(), query, verses, layout);
        let terminal = ratatui::init();
        let result = reader.run(terminal);
        ratatui::restore();
        return result;
    }

    if verses.is_empty() {
        println!("No results found for {query:?}");
        return Ok(());
    }

    for line in render(&verses, &layout) {
        println!("{line}");
    }
    Ok(())
}

/// Runs `query`, then moves one chapter on or back if asked. Returns the
/// query that produced the verses.
fn fetch(corpus: &dyn Corpus, query: &str, step: Step) -> Result<(String, Vec<VerseRecord>)> {
    let verses = corpus.query_text(query)?;

    let target = match (step, verses.first(), verses.last()) {
        (Step::Next, _, Some(last)) => next_chapter(&corpus.booklist()?, last)?,
        (Step::Previous, Some(first), _) => previous_chapter(&corpus.booklist()?, first)?,
        _ => return Ok((query.to_string(), verses)),
    };

    let query = target.query();
    debug!(%query, "moved to adjacent chapter");
    let verses = corpus.query_text(&query)?;
    Ok((query, verses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bgate_corpus::LocalCorpus;
    use bgate_protocol::Book;

    fn record(chapter: u32, verse: u32, text: &str) -> VerseRecord {
        VerseRecord {
            book: String::new(),
            chapter,
            verse,
            part: 1,
            text: text.to_string(),
            title: None,
        }
    }

    fn corpus() -> LocalCorpus {
        let mut corpus = LocalCorpus::open_in_memory().unwrap();
        corpus
            .insert_verses(Book::ThirdJohn, &[record(1, 1, "The elder to the beloved Gaius")])
            .unwrap();
        corpus
            .insert_verses(Book::Jude, &[record(1, 1, "Jude, a servant"), record(1, 25, "Amen.")])
            .unwrap();
        corpus
    }

    #[test]
    fn test_stay() {
        let (query, verses) = fetch(&corpus(), "jude 1:25", Step::Stay).unwrap();
        assert_eq!(query, "jude 1:25");
        assert_eq!(verses.len(), 1);
        assert_eq!(verses[0].text, "Amen.");
    }

    #[test]
    fn test_next_and_previous() {
        let (query, verses) = fetch(&corpus(), "3 jn 1", Step::Next).unwrap();
        assert_eq!(query, "Jude 1");
        assert_eq!(verses.len(), 2);

        // Wraps around the stored book list
        let (query, _) = fetch(&corpus(), "3 jn 1", Step::Previous).unwrap();
        assert_eq!(query, "Jude 1");
        let (query, verses) = fetch(&corpus(), "jude 1", Step::Next).unwrap();
        assert_eq!(query, "3 John 1");
        assert_eq!(verses[0].book, "3 John");
    }

    #[test]
    fn test_no_results_does_not_navigate() {
        let (query, verses) = fetch(&corpus(), "gen 1", Step::Next).unwrap();
        assert_eq!(query, "gen 1");
        assert!(verses.is_empty());
    }

    #[test]
    fn test_query_errors_propagate() {
        assert!(fetch(&corpus(), "xyz 1", Step::Stay).is_err());
    }
}
