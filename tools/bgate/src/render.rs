use bgate_protocol::VerseRecord;
use colored::Colorize;

const CONTINUATION_INDENT: &str = "    ";

/// How a passage is laid out on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Total columns available, padding included.
    pub width: usize,
    /// Blank columns on each side.
    pub padding: usize,
    /// Run consecutive verses together into one paragraph.
    pub wrap: bool,
    pub color: bool,
}

impl Layout {
    fn text_width(&self) -> usize {
        self.width.saturating_sub(2 * self.padding).max(1)
    }
}

/// Lays a passage out as printable lines.
///
/// Titles and chapter headers get a line of their own. In wrap mode, verses
/// that start cleanly are joined into a paragraph; a title, a new chapter or
/// a continuation part ends it. Otherwise each verse is its own paragraph
/// and its wrapped lines are indented.
pub fn render(verses: &[VerseRecord], layout: &Layout) -> Vec<String> {
    let width = layout.text_width();
    let indent = if layout.wrap { "" } else { CONTINUATION_INDENT };
    let mut lines = Vec::new();

    let mut i = 0;
    while i < verses.len() {
        let verse = &verses[i];

        if let Some(title) = &verse.title {
            lines.push(styled_title(title, layout.color));
        }
        if starts_chapter(verse) {
            lines.push(chapter_header(verse, layout.color));
        }

        let mut paragraph = if verse.is_first_part() {
            numbered(verse)
        } else {
            format!("{CONTINUATION_INDENT}{}", verse.text)
        };

        if layout.wrap && verse.is_first_part() {
            while let Some(next) = verses.get(i + 1) {
                if next.has_title() || !next.is_first_part() || starts_chapter(next) {
                    break;
                }
                paragraph.push(' ');
                paragraph.push_str(&numbered(next));
                i += 1;
            }
        }

        lines.extend(wrap_words(&paragraph, width, indent));
        i += 1;
    }

    let pad = " ".repeat(layout.padding);
    lines.into_iter().map(|line| format!("{pad}{line}")).collect()
}

fn starts_chapter(verse: &VerseRecord) -> bool {
    verse.verse == 1 && verse.is_first_part()
}

fn numbered(verse: &VerseRecord) -> String {
    format!("{} {}", verse.verse, verse.text)
}

fn styled_title(title: &str, color: bool) -> String {
    if color {
        title.bold().to_string()
    } else {
        title.to_string()
    }
}

fn chapter_header(verse: &VerseRecord, color: bool) -> String {
    let header = format!(" {}: {} ", verse.book, verse.chapter);
    if color {
        header.bold().reversed().to_string()
    } else {
        header
    }
}

/// Greedy word wrap on single spaces. Lines after the first are prefixed
/// with `indent`, which counts against their width. A word longer than the
/// line gets a line to itself rather than being split.
pub fn wrap_words(text: &str, width: usize, indent: &str) -> Vec<String> {
    let indent_width = indent.chars().count();
    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut used = 0;

    for word in text.split(' ') {
        let size = word.chars().count();
        let room = if lines.is_empty() {
            width
        } else {
            width.saturating_sub(indent_width)
        };

        if !current.is_empty() && used + size > room {
            lines.push(finish_line(&current, indent, !lines.is_empty()));
            current.clear();
            used = 0;
        }

        used += size + 1;
        current.push(word);
    }

    lines.push(finish_line(&current, indent, !lines.is_empty()));
    lines
}

fn finish_line(words: &[&str], indent: &str, indented: bool) -> String {
    let line = words.join(" ");
    if indented {
        format!("{indent}{line}")
    } else {
        line
    }
}
