use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bgate_protocol::{Book, BookEntry, RangeQuery, Reference, VerseRecord};
use rusqlite::{params, Connection, Row};
use tracing::debug;

use crate::error::{CorpusError, Result};
use crate::Corpus;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS verses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        book TEXT NOT NULL,
        chapter INTEGER NOT NULL,
        number INTEGER NOT NULL,
        part INTEGER NOT NULL,
        text TEXT NOT NULL,
        title TEXT
    );
    CREATE INDEX IF NOT EXISTS verses_location ON verses (book, chapter, number);
";

const SELECT_VERSES: &str = "SELECT book, chapter, number, part, text, title FROM verses";

/// `?3 IS NULL` lets one statement serve whole-chapter and single-verse points.
const POINT_FILTER: &str = "
    WHERE book = ?1 AND chapter = ?2 AND (?3 IS NULL OR number = ?3)
    ORDER BY id";

/// Rows between the first row of the start reference and the last row of the
/// end reference, by insertion id. Either bound missing yields no rows.
const SPAN_FILTER: &str = "
    WHERE id >= (SELECT MIN(id) FROM verses
                 WHERE book = ?1 AND chapter = ?2 AND (?3 IS NULL OR number = ?3))
      AND id <= (SELECT MAX(id) FROM verses
                 WHERE book = ?4 AND chapter = ?5 AND (?6 IS NULL OR number = ?6))
    ORDER BY id";

/// Where a downloaded translation lives: `<dir>/<TRANSLATION>.sql`.
pub fn translation_path(dir: &Path, translation: &str) -> PathBuf {
    dir.join(format!("{translation}.sql"))
}

pub fn has_translation(dir: &Path, translation: &str) -> bool {
    translation_path(dir, translation).is_file()
}

/// A downloaded translation stored in SQLite.
///
/// Row ids are assigned in insertion order, and `download` inserts in
/// canonical reading order, so the id is the canonical sequence position.
pub struct LocalCorpus {
    conn: Connection,
}

impl LocalCorpus {
    /// Opens an existing cache. Unlike `Connection::open` this never creates
    /// an empty database for a translation that was not downloaded.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CorpusError::TranslationNotFound(path.display().to_string()));
        }
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Starts a fresh cache at `path`, discarding any previous one.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        match fs::remove_file(path) {
            Ok(()) => debug!(path = %path.display(), "removed previous cache"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let corpus = Self { conn: Connection::open(path)? };
        corpus.init_schema()?;
        Ok(corpus)
    }

    pub fn open_in_memory() -> Result<Self> {
        let corpus = Self { conn: Connection::open_in_memory()? };
        corpus.init_schema()?;
        Ok(corpus)
    }

    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Appends one chapter's worth of records under `book` in a single
    /// transaction. Rows are stored under the canonical name, whatever name
    /// the records carry, so queries always find them.
    pub fn insert_verses(&mut self, book: Book, verses: &[VerseRecord]) -> Result<usize> {
        let book = book.name();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO verses (book, chapter, number, part, text, title)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for verse in verses {
                stmt.execute(params![
                    book,
                    verse.chapter,
                    verse.verse,
                    verse.part,
                    verse.text,
                    verse.title
                ])?;
            }
        }
        tx.commit()?;
        Ok(verses.len())
    }

    fn select(&self, filter: &str, params: impl rusqlite::Params) -> Result<Vec<VerseRecord>> {
        let sql = format!("{SELECT_VERSES} {filter}");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params, read_verse)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}

fn read_verse(row: &Row<'_>) -> rusqlite::Result<VerseRecord> {
    Ok(VerseRecord {
        book: row.get(0)?,
        chapter: row.get(1)?,
        verse: row.get(2)?,
        part: row.get(3)?,
        text: row.get(4)?,
        title: row.get(5)?,
    })
}

fn bind(reference: &Reference) -> (&'static str, u32, Option<u32>) {
    (reference.book.name(), reference.chapter, reference.verse)
}

impl Corpus for LocalCorpus {
    fn query(&self, range: &RangeQuery) -> Result<Vec<VerseRecord>> {
        debug!(%range, "local query");
        match range {
            RangeQuery::Point(reference) => {
                let (book, chapter, verse) = bind(reference);
                self.select(POINT_FILTER, params![book, chapter, verse])
            }
            RangeQuery::Span { start, end } => {
                let (start_book, start_chapter, start_verse) = bind(start);
                let (end_book, end_chapter, end_verse) = bind(end);
                self.select(
                    SPAN_FILTER,
                    params![start_book, start_chapter, start_verse, end_book, end_chapter, end_verse],
                )
            }
        }
    }

    fn booklist(&self) -> Result<Vec<BookEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT book, MAX(chapter) FROM verses GROUP BY book ORDER BY MIN(id)",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(BookEntry {
                name: row.get(0)?,
                chapters: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
