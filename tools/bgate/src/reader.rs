//! Full-screen pager over a passage: scrolling, padding, chapter paging and
//! an in-reader search prompt.

use anyhow::{bail, Result};
use bgate_corpus::Corpus;
use bgate_protocol::{BookEntry, VerseRecord};
use ratatui::{
    DefaultTerminal,
    buffer::Buffer,
    crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
    widgets::{Paragraph, Widget},
};
use tracing::debug;

use crate::navigate::{next_chapter, previous_chapter};
use crate::render;

const PROMPT: Color = Color::Rgb(0xFF, 0xB3, 0x47);
const HELP: &str = "j/k scroll  n/p chapter  +/- padding  / search  q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Reading,
    Searching(String),
}

pub struct Reader<'c> {
    corpus: &'c dyn Corpus,
    query: String,
    verses: Vec<VerseRecord>,
    books: Option<Vec<BookEntry>>,
    layout: render::Layout,
    lines: Vec<String>,
    scroll: usize,
    /// Rows available to the passage, the footer excluded.
    height: usize,
    mode: Mode,
    status: Option<String>,
    exit: bool,
}

impl<'c> Reader<'c> {
    pub fn new(corpus: &'c dyn Corpus, query: String, verses: Vec<VerseRecord>, layout: render::Layout) -> Self {
        let mut reader = Self {
            corpus,
            query,
            verses,
            books: None,
            // Styling is done by the terminal backend, not escape codes
            layout: render::Layout { color: false, ..layout },
            lines: Vec::new(),
            scroll: 0,
            height: 0,
            mode: Mode::Reading,
            status: None,
            exit: false,
        };
        reader.relayout();
        reader
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        while !self.exit {
            terminal.draw(|frame| {
                self.resize(frame.area());
                frame.render_widget(&self, frame.area());
            })?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn handle_events(&mut self) -> Result<()> {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => {}
        }
        Ok(())
    }

    /// Takes the page size from the drawing area. The last row is the footer.
    fn resize(&mut self, area: Rect) {
        let width = usize::from(area.width);
        let height = usize::from(area.height.saturating_sub(1));
        if width != self.layout.width || height != self.height {
            self.layout.width = width;
            self.height = height;
            self.relayout();
        }
    }

    fn relayout(&mut self) {
        self.lines = render::render(&self.verses, &self.layout);
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.exit = true;
            return;
        }
        self.status = None;

        if let Mode::Searching(input) = &mut self.mode {
            match key.code {
                KeyCode::Esc => self.mode = Mode::Reading,
                KeyCode::Enter => {
                    let query = std::mem::take(input);
                    self.mode = Mode::Reading;
                    if !query.trim().is_empty() {
                        let result = self.open(&query);
                        self.report(result);
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            KeyCode::Char('k') | KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('g') | KeyCode::Home => self.scroll = 0,
            KeyCode::Char('G') | KeyCode::End => self.scroll = self.max_scroll(),
            KeyCode::Char('+') => {
                self.layout.padding += 1;
                self.relayout();
            }
            KeyCode::Char('-') => {
                self.layout.padding = self.layout.padding.saturating_sub(1);
                self.relayout();
            }
            KeyCode::Char('n') => {
                let result = self.turn_page(true);
                self.report(result);
            }
            KeyCode::Char('p') => {
                let result = self.turn_page(false);
                self.report(result);
            }
            KeyCode::Char('/') => self.mode = Mode::Searching(String::new()),
            _ => {}
        }
    }

    fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.status = Some(e.to_string());
        }
    }

    fn open(&mut self, query: &str) -> Result<()> {
        let verses = self.corpus.query_text(query)?;
        debug!(%query, verses = verses.len(), "opened passage");
        self.query = query.to_string();
        self.verses = verses;
        self.scroll = 0;
        self.relayout();
        Ok(())
    }

    fn turn_page(&mut self, forward: bool) -> Result<()> {
        if self.books.is_none() {
            self.books = Some(self.corpus.booklist()?);
        }
        let books = self.books.as_deref().unwrap_or_default();

        let target = match (forward, self.verses.first(), self.verses.last()) {
            (true, _, Some(last)) => next_chapter(books, last)?,
            (false, Some(first), _) => previous_chapter(books, first)?,
            _ => bail!("no passage to turn from"),
        };
        self.open(&target.query())
    }

    fn footer(&self) -> Line<'_> {
        match (&self.mode, &self.status) {
            (Mode::Searching(input), _) => Line::from(vec!["/".fg(PROMPT), input.as_str().into()]),
            (Mode::Reading, Some(status)) => Line::raw(status.as_str()).red(),
            (Mode::Reading, None) => Line::raw(format!("{}  {HELP}", self.query)).dim(),
        }
    }
}

impl Widget for &Reader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let [body_area, footer_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        if self.verses.is_empty() {
            Line::raw(format!("No results found for {:?}", self.query)).render(body_area, buf);
        } else {
            let visible: Vec<Line> = self
                .lines
                .iter()
                .skip(self.scroll)
                .take(usize::from(body_area.height))
                .map(|line| Line::raw(line.as_str()))
                .collect();
            Paragraph::new(visible).render(body_area, buf);
        }

        self.footer().render(footer_area, buf);
    }
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
            .insert_verses(Book::ThirdJohn, &[record(1, 1, "The elder to Gaius")])
            .unwrap();
        let jude: Vec<VerseRecord> = ["Jude, a servant", "May mercy", "Beloved", "For certain people", "Now I want", "And the angels"]
            .into_iter()
            .enumerate()
            .map(|(i, text)| record(1, i as u32 + 1, text))
            .collect();
        corpus.insert_verses(Book::Jude, &jude).unwrap();
        corpus
    }

    fn layout() -> render::Layout {
        render::Layout { width: 80, padding: 0, wrap: false, color: true }
    }

    /// A reader opened on `query` with a 30x5 screen.
    fn reader<'c>(corpus: &'c LocalCorpus, query: &str) -> Reader<'c> {
        let verses = corpus.query_text(query).unwrap();
        let mut reader = Reader::new(corpus, query.to_string(), verses, layout());
        reader.resize(Rect::new(0, 0, 30, 5));
        reader
    }

    fn press(reader: &mut Reader<'_>, keys: &str) {
        for c in keys.chars() {
            reader.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn press_code(reader: &mut Reader<'_>, code: KeyCode) {
        reader.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn rows(reader: &Reader<'_>) -> Vec<String> {
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        reader.render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>().trim_end().to_string())
            .collect()
    }

    #[test]
    fn test_scroll_keys() {
        let corpus = corpus();
        let mut reader = reader(&corpus, "jude 1");

        // Chapter header plus six verses on four passage rows
        assert_eq!(reader.lines.len(), 7);
        assert_eq!(reader.max_scroll(), 3);

        press(&mut reader, "j");
        assert_eq!(reader.scroll, 1);
        press(&mut reader, "kk");
        assert_eq!(reader.scroll, 0);
        press(&mut reader, "G");
        assert_eq!(reader.scroll, 3);
        press(&mut reader, "j");
        assert_eq!(reader.scroll, 3);
        press(&mut reader, "g");
        assert_eq!(reader.scroll, 0);
    }

    #[test]
    fn test_width_follows_the_screen() {
        let corpus = corpus();
        let mut reader = reader(&corpus, "jude 1");
        assert_eq!(reader.layout.width, 30);
        assert!(!reader.layout.color);

        reader.resize(Rect::new(0, 0, 10, 5));
        assert_eq!(reader.layout.width, 10);
        assert!(reader.lines.iter().any(|line| line.starts_with("    ")));
    }

    #[test]
    fn test_padding_keys() {
        let corpus = corpus();
        let mut reader = reader(&corpus, "jude 1");

        press(&mut reader, "++");
        assert_eq!(reader.layout.padding, 2);
        assert_eq!(reader.lines[1], "  1 Jude, a servant");

        press(&mut reader, "---");
        assert_eq!(reader.layout.padding, 0);
        assert_eq!(reader.lines[1], "1 Jude, a servant");
    }

    #[test]
    fn test_chapter_paging() {
        let corpus = corpus();
        let mut reader = reader(&corpus, "3 jn 1");

        press(&mut reader, "G");
        press(&mut reader, "n");
        assert_eq!(reader.query, "Jude 1");
        assert_eq!(reader.verses[0].book, "Jude");
        assert_eq!(reader.scroll, 0);

        // Wraps around the stored book list
        press(&mut reader, "n");
        assert_eq!(reader.query, "3 John 1");
        press(&mut reader, "p");
        assert_eq!(reader.query, "Jude 1");
        assert_eq!(reader.status, None);
    }

    #[test]
    fn test_search() {
        let corpus = corpus();
        let mut reader = reader(&corpus, "jude 1");

        // 1. Enter runs the typed query
        press(&mut reader, "/3 jm");
        press_code(&mut reader, KeyCode::Backspace);
        press(&mut reader, "n 1");
        assert_eq!(reader.mode, Mode::Searching("3 jn 1".to_string()));
        press_code(&mut reader, KeyCode::Enter);
        assert_eq!(reader.mode, Mode::Reading);
        assert_eq!(reader.query, "3 jn 1");
        assert_eq!(reader.verses.len(), 1);

        // 2. Esc abandons the prompt
        press(&mut reader, "/jude");
        press_code(&mut reader, KeyCode::Esc);
        assert_eq!(reader.mode, Mode::Reading);
        assert_eq!(reader.query, "3 jn 1");
        assert!(!reader.exit);
    }

    #[test]
    fn test_bad_search_keeps_the_passage() {
        let corpus = corpus();
        let mut reader = reader(&corpus, "jude 1");

        press(&mut reader, "/xyz 1");
        press_code(&mut reader, KeyCode::Enter);
        assert!(reader.status.is_some());
        assert_eq!(reader.query, "jude 1");
        assert_eq!(reader.verses.len(), 6);

        // The next key clears the message
        press(&mut reader, "j");
        assert_eq!(reader.status, None);
    }

    #[test]
    fn test_quit_keys() {
        let corpus = corpus();
        let mut reader = reader(&corpus, "jude 1");
        press(&mut reader, "q");
        assert!(reader.exit);

        let mut reader = self::reader(&corpus, "jude 1");
        reader.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(reader.exit);
    }

    #[test]
    fn test_draw() {
        let corpus = corpus();
        let mut reader = reader(&corpus, "jude 1");
        press(&mut reader, "j");

        let rows = rows(&reader);
        assert_eq!(rows[0], "1 Jude, a servant");
        assert_eq!(rows[3], "4 For certain people");
        assert!(rows[4].starts_with("jude 1"));

        press(&mut reader, "/gen");
        assert_eq!(self::rows(&reader)[4], "/gen");
    }

    #[test]
    fn test_draw_no_results() {
        let corpus = corpus();
        let reader = reader(&corpus, "gen 1");
        assert_eq!(rows(&reader)[0], "No results found for \"gen 1\"");

        let mut reader = reader;
        press(&mut reader, "n");
        assert!(reader.status.is_some());
    }
}
