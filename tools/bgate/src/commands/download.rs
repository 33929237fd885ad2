use anyhow::{bail, Context, Result};
use bgate_corpus::{translation_path, Corpus, LocalCorpus, RemoteCorpus};
use bgate_protocol::{Book, RangeQuery, Reference};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::settings::Settings;

pub fn run(settings: &Settings) -> Result<()> {
    let translation = settings.translation.as_str();
    let remote = RemoteCorpus::new(translation)?;
    let path = translation_path(&settings.data_dir, translation);

    let rows = download(&remote, &path, Duration::from_millis(settings.delay_ms))
        .with_context(|| format!("failed to download {translation}"))?;
    info!(translation, rows, path = %path.display(), "download complete");
    Ok(())
}

/// Copies every chapter `source` lists into a fresh cache at `path`.
///
/// Books are stored under their canonical names and in canonical order,
/// which is the order spans are later resolved in. The cache is built as
/// `<path>.part` and only replaces `path` once every chapter is stored.
pub fn download(source: &dyn Corpus, path: &Path, delay: Duration) -> Result<usize> {
    let mut books: Vec<(Book, u32)> = Vec::new();
    for entry in source.booklist()? {
        match bgate_parser::resolve_name(&entry.name) {
            Some(book) => books.push((book, entry.chapters)),
            None => warn!(book = %entry.name, "skipping book with no canonical name"),
        }
    }
    if books.is_empty() {
        bail!("no books found");
    }
    books.sort_by_key(|(book, _)| book.index());

    let partial = path.with_extension("sql.part");
    let mut rows = 0;
    {
        let mut local = LocalCorpus::create(&partial)?;
        for &(book, chapters) in &books {
            println!("Downloading {book}...");
            for chapter in 1..=chapters {
                let verses = source.query(&RangeQuery::Point(Reference::chapter(book, chapter)))?;
                let stored = local.insert_verses(book, &verses)?;
                debug!(%book, chapter, stored, "stored chapter");
                rows += stored;
                thread::sleep(delay);
            }
        }
    }

    fs::rename(&partial, path)
        .with_context(|| format!("failed to move download into {}", path.display()))?;
    Ok(rows)
}
