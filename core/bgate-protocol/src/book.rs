use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

macro_rules! define_books {
    ($($variant:ident => $name:expr),+ $(,)?) => {
        /// A book of the Protestant canon. Variants are declared in canonical
        /// reading order, so the discriminant is the book's canonical position.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
        #[repr(u8)]
        pub enum Book {
            $($variant),+
        }

        impl Book {
            /// Every book, in canonical order.
            pub const ALL: &'static [Book] = &[$(Book::$variant),+];

            /// Canonical display name, e.g. `"1 John"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Book::$variant => $name),+
                }
            }
        }
    };
}

define_books! {
    Genesis => "Genesis",
    Exodus => "Exodus",
    Leviticus => "Leviticus",
    Numbers => "Numbers",
    Deuteronomy => "Deuteronomy",
    Joshua => "Joshua",
    Judges => "Judges",
    Ruth => "Ruth",
    FirstSamuel => "1 Samuel",
    SecondSamuel => "2 Samuel",
    FirstKings => "1 Kings",
    SecondKings => "2 Kings",
    FirstChronicles => "1 Chronicles",
    SecondChronicles => "2 Chronicles",
    Ezra => "Ezra",
    Nehemiah => "Nehemiah",
    Esther => "Esther",
    Job => "Job",
    Psalms => "Psalms",
    Proverbs => "Proverbs",
    Ecclesiastes => "Ecclesiastes",
    SongOfSolomon => "Song of Solomon",
    Isaiah => "Isaiah",
    Jeremiah => "Jeremiah",
    Lamentations => "Lamentations",
    Ezekiel => "Ezekiel",
    Daniel => "Daniel",
    Hosea => "Hosea",
    Joel => "Joel",
    Amos => "Amos",
    Obadiah => "Obadiah",
    Jonah => "Jonah",
    Micah => "Micah",
    Nahum => "Nahum",
    Habakkuk => "Habakkuk",
    Zephaniah => "Zephaniah",
    Haggai => "Haggai",
    Zechariah => "Zechariah",
    Malachi => "Malachi",
    Matthew => "Matthew",
    Mark => "Mark",
    Luke => "Luke",
    John => "John",
    Acts => "Acts",
    Romans => "Romans",
    FirstCorinthians => "1 Corinthians",
    SecondCorinthians => "2 Corinthians",
    Galatians => "Galatians",
    Ephesians => "Ephesians",
    Philippians => "Philippians",
    Colossians => "Colossians",
    FirstThessalonians => "1 Thessalonians",
    SecondThessalonians => "2 Thessalonians",
    FirstTimothy => "1 Timothy",
    SecondTimothy => "2 Timothy",
    Titus => "Titus",
    Philemon => "Philemon",
    Hebrews => "Hebrews",
    James => "James",
    FirstPeter => "1 Peter",
    SecondPeter => "2 Peter",
    FirstJohn => "1 John",
    SecondJohn => "2 John",
    ThirdJohn => "3 John",
    Jude => "Jude",
    Revelation => "Revelation",
}

impl Book {
    /// 0-based canonical position (Genesis = 0, Revelation = 65).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Reverse lookup by canonical name. Exact, case-sensitive match.
    pub fn from_name(name: &str) -> Option<Book> {
        Book::ALL.iter().copied().find(|book| book.name() == name)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
