use bgate_protocol::Book;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Normalized spellings per book. Keys are lower-case with every space
/// removed, matching how the tokenizer splits and how the parser rejoins
/// numbered and multi-word names ("1 John" -> "1john").
static SPELLINGS: &[(Book, &[&str])] = &[
    (Book::Genesis, &["genesis", "gen", "ge", "gn"]),
    (Book::Exodus, &["exodus", "exod", "exo", "ex"]),
    (Book::Leviticus, &["leviticus", "lev", "le", "lv"]),
    (Book::Numbers, &["numbers", "num", "nu", "nm", "nb"]),
    (Book::Deuteronomy, &["deuteronomy", "deut", "de", "dt"]),
    (Book::Joshua, &["joshua", "josh", "jos", "jsh"]),
    (Book::Judges, &["judges", "judg", "jdg", "jg", "jdgs"]),
    (Book::Ruth, &["ruth", "rth", "ru"]),
    (
        Book::FirstSamuel,
        &[
            "1samuel", "1sam", "1sa", "1sm", "isamuel", "isam", "firstsamuel", "firstsam",
            "1stsamuel", "1stsam",
        ],
    ),
    (
        Book::SecondSamuel,
        &[
            "2samuel", "2sam", "2sa", "2sm", "iisamuel", "iisam", "secondsamuel",
            "secondsam", "2ndsamuel", "2ndsam",
        ],
    ),
    (
        Book::FirstKings,
        &[
            "1kings", "1kgs", "1ki", "1kin", "ikings", "ikgs", "ikin", "firstkings",
            "firstkgs", "firstkin", "1stkings", "1stkgs", "1stkin",
        ],
    ),
    (
        Book::SecondKings,
        &[
            "2kings", "2kgs", "2ki", "2kin", "iikings", "iikgs", "iikin", "secondkings",
            "secondkgs", "secondkin", "2ndkings", "2ndkgs", "2ndkin",
        ],
    ),
    (
        Book::FirstChronicles,
        &[
            "1chronicles", "1chron", "1chr", "1ch", "ichronicles", "ichron", "ichr",
            "firstchronicles", "firstchron", "firstchr", "1stchronicles", "1stchron",
            "1stchr",
        ],
    ),
    (
        Book::SecondChronicles,
        &[
            "2chronicles", "2chron", "2chr", "2ch", "iichronicles", "iichron", "iichr",
            "secondchronicles", "secondchron", "secondchr", "2ndchronicles", "2ndchron",
            "2ndchr",
        ],
    ),
    (Book::Ezra, &["ezra", "ezr"]),
    (Book::Nehemiah, &["nehemiah", "neh", "ne"]),
    (Book::Esther, &["esther", "esth", "est", "es"]),
    (Book::Job, &["job", "jb"]),
    (Book::Psalms, &["psalms", "psalm", "pslm", "psa", "psm", "pss", "ps"]),
    (Book::Proverbs, &["proverbs", "proverb", "prov", "pro", "prv", "pr"]),
    (
        Book::Ecclesiastes,
        &[
            "ecclesiastes", "eccles", "eccle", "eccl", "ecc", "ec", "qoh", "qoheleth",
        ],
    ),
    (
        Book::SongOfSolomon,
        &[
            "songofsolomon", "songofsongs", "song", "sos", "so", "canticles",
            "canticleofcanticles",
        ],
    ),
    (Book::Isaiah, &["isaiah", "isa", "is"]),
    (Book::Jeremiah, &["jeremiah", "jer", "je", "jr"]),
    (Book::Lamentations, &["lamentations", "lam", "la"]),
    (Book::Ezekiel, &["ezekiel", "ezek", "eze", "ezk"]),
    (Book::Daniel, &["daniel", "dan", "da", "dn"]),
    (Book::Hosea, &["hosea", "hos", "ho"]),
    (Book::Joel, &["joel", "jl"]),
    (Book::Amos, &["amos", "am"]),
    (Book::Obadiah, &["obadiah", "obad", "ob"]),
    (Book::Jonah, &["jonah", "jnh", "jon"]),
    (Book::Micah, &["micah", "mic", "mc"]),
    (Book::Nahum, &["nahum", "nah", "na"]),
    (Book::Habakkuk, &["habakkuk", "hab", "hb"]),
    (Book::Zephaniah, &["zephaniah", "zeph", "zep", "zp"]),
    (Book::Haggai, &["haggai", "hag", "hg"]),
    (Book::Zechariah, &["zechariah", "zech", "zec", "zc"]),
    (Book::Malachi, &["malachi", "mal", "ml"]),
    (Book::Matthew, &["matthew", "matt", "mat", "mt"]),
    (Book::Mark, &["mark", "mrk", "mar", "mk", "mr"]),
    (Book::Luke, &["luke", "luk", "lk"]),
    (Book::John, &["john", "joh", "jhn", "jn"]),
    (Book::Acts, &["acts", "act", "ac"]),
    (Book::Romans, &["romans", "rom", "ro", "rm"]),
    (
        Book::FirstCorinthians,
        &[
            "1corinthians", "1cor", "1co", "icorinthians", "icor", "firstcorinthians",
            "firstcor", "1stcorinthians", "1stcor",
        ],
    ),
    (
        Book::SecondCorinthians,
        &[
            "2corinthians", "2cor", "2co", "iicorinthians", "iicor", "secondcorinthians",
            "secondcor", "2ndcorinthians", "2ndcor",
        ],
    ),
    (Book::Galatians, &["galatians", "gal", "ga"]),
    (Book::Ephesians, &["ephesians", "eph", "ephes"]),
    (Book::Philippians, &["philippians", "phil", "php", "pp"]),
    (Book::Colossians, &["colossians", "col", "co"]),
    (
        Book::FirstThessalonians,
        &[
            "1thessalonians", "1thess", "1thes", "1th", "ithessalonians", "ithess", "ithes",
            "firstthessalonians", "firstthess", "firstthes", "1stthessalonians", "1stthess",
            "1stthes",
        ],
    ),
    (
        Book::SecondThessalonians,
        &[
            "2thessalonians", "2thess", "2thes", "2th", "iithessalonians", "iithess",
            "iithes", "secondthessalonians", "secondthess", "secondthes",
            "2ndthessalonians", "2ndthess", "2ndthes",
        ],
    ),
    (
        Book::FirstTimothy,
        &[
            "1timothy", "1tim", "1ti", "itimothy", "itim", "firsttimothy", "firsttim",
            "1sttimothy", "1sttim",
        ],
    ),
    (
        Book::SecondTimothy,
        &[
            "2timothy", "2tim", "2ti", "iitimothy", "iitim", "secondtimothy", "secondtim",
            "2ndtimothy", "2ndtim",
        ],
    ),
    (Book::Titus, &["titus", "tit", "ti"]),
    (Book::Philemon, &["philemon", "philem", "phm", "pm"]),
    (Book::Hebrews, &["hebrews", "heb"]),
    (Book::James, &["james", "jas", "jm"]),
    (
        Book::FirstPeter,
        &[
            "1peter", "1pet", "1pe", "1pt", "ipeter", "ipet", "firstpeter", "firstpet",
            "1stpeter", "1stpet",
        ],
    ),
    (
        Book::SecondPeter,
        &[
            "2peter", "2pet", "2pe", "2pt", "iipeter", "iipet", "secondpeter", "secondpet",
            "2ndpeter", "2ndpet",
        ],
    ),
    (
        Book::FirstJohn,
        &[
            "1john", "1joh", "1jhn", "1jn", "1jo", "ijohn", "ijoh", "ijhn", "firstjohn",
            "firstjoh", "firstjhn", "1stjohn", "1stjoh", "1stjhn",
        ],
    ),
    (
        Book::SecondJohn,
        &[
            "2john", "2joh", "2jhn", "2jn", "2jo", "iijohn", "iijoh", "iijhn", "secondjohn",
            "secondjoh", "secondjhn", "2ndjohn", "2ndjoh", "2ndjhn",
        ],
    ),
    (
        Book::ThirdJohn,
        &[
            "3john", "3joh", "3jhn", "3jn", "3jo", "iiijohn", "iiijoh", "iiijhn",
            "thirdjohn", "thirdjoh", "thirdjhn", "3rdjohn", "3rdjoh", "3rdjhn",
        ],
    ),
    (Book::Jude, &["jude", "jud", "jd"]),
    (Book::Revelation, &["revelation", "revelations", "rev", "re", "rv", "apocalypse"]),
];

static INDEX: Lazy<HashMap<&'static str, Book>> = Lazy::new(|| {
    SPELLINGS
        .iter()
        .flat_map(|(book, keys)| keys.iter().map(move |key| (*key, *book)))
        .collect()
});

/// Resolves a normalized spelling to its canonical book.
pub fn lookup(key: &str) -> Option<Book> {
    INDEX.get(key).copied()
}

/// Resolves a book name as a translation's book list spells it ("Song of
/// Songs", "Psalm", "I Samuel") to the canonical book. The canonical name
/// wins; anything else goes through the spelling table.
pub fn resolve_name(name: &str) -> Option<Book> {
    Book::from_name(name).or_else(|| {
        let key: String = name.to_lowercase().split_whitespace().collect();
        lookup(&key)
    })
}
