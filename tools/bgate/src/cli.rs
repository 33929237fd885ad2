use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::Overrides;

#[derive(Parser)]
#[command(name = "bgate", author, version, about = "Read scripture passages in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Passage to read, e.g. `john 3:16-18` or `1 jn 1`
    pub query: Vec<String>,

    /// Translation to read from (ESV, NIV, KJV, ...)
    #[arg(short, long, global = true)]
    pub translation: Option<String>,

    /// Horizontal padding in columns
    #[arg(short, long, global = true)]
    pub padding: Option<usize>,

    /// Run verses together into paragraphs
    #[arg(short, long)]
    pub wrap: bool,

    /// Output width in columns (defaults to the terminal width)
    #[arg(long)]
    pub width: Option<usize>,

    /// Read the chapter after the one the query ends in
    #[arg(short, long, conflicts_with = "previous")]
    pub next: bool,

    /// Read the chapter before the one the query starts in
    #[arg(long)]
    pub previous: bool,

    /// Print verse records as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,

    /// Open the passage in a scrollable reader
    #[arg(short, long, conflicts_with = "json")]
    pub interactive: bool,

    /// Path to config file (defaults to ~/.config/bgate/config.json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the books of a translation and their chapter counts
    List {
        /// Only show books whose name contains this text (case insensitive)
        #[arg(short, long, default_value = "")]
        filter: String,
    },

    /// Download a translation for offline use
    Download {
        /// Milliseconds to wait between requests
        #[arg(short, long)]
        delay: Option<u64>,
    },
}

impl Cli {
    pub fn color(&self) -> bool {
        !(self.no_color || std::env::var_os("NO_COLOR").is_some())
    }

    /// Command-line values that take precedence over config and environment.
    pub fn overrides(&self) -> Overrides {
        let delay_ms = match &self.command {
            Some(Commands::Download { delay }) => *delay,
            _ => None,
        };

        Overrides {
            translation: self.translation.clone(),
            padding: self.padding,
            wrap: self.wrap.then_some(true),
            width: self.width,
            delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_words_and_flags() {
        let cli = Cli::try_parse_from(["bgate", "-t", "NIV", "--wrap", "1", "john", "3:16"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.query, vec!["1", "john", "3:16"]);

        let overrides = cli.overrides();
        assert_eq!(overrides.translation.as_deref(), Some("NIV"));
        assert_eq!(overrides.wrap, Some(true));
        assert_eq!(overrides.padding, None);
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["bgate", "list", "--filter", "john", "-p", "2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { ref filter }) if filter == "john"));
        assert_eq!(cli.overrides().padding, Some(2));

        let cli = Cli::try_parse_from(["bgate", "download", "-t", "KJV", "--delay", "250"]).unwrap();
        assert_eq!(cli.overrides().delay_ms, Some(250));
        assert_eq!(cli.overrides().translation.as_deref(), Some("KJV"));
    }

    #[test]
    fn test_next_conflicts_with_previous() {
        assert!(Cli::try_parse_from(["bgate", "--next", "--previous", "john", "3"]).is_err());
    }

    #[test]
    fn test_interactive_flag() {
        let cli = Cli::try_parse_from(["bgate", "-i", "jude", "1"]).unwrap();
        assert!(cli.interactive);
        assert_eq!(cli.query, vec!["jude", "1"]);

        assert!(Cli::try_parse_from(["bgate", "--interactive", "--json", "jude"]).is_err());
    }
}
