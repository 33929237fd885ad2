pub mod download;
pub mod list;
pub mod read;

use anyhow::Result;
use bgate_corpus::{has_translation, translation_path, Corpus, LocalCorpus, RemoteCorpus};
use tracing::{debug, info};

use crate::settings::Settings;

/// The downloaded copy of the translation when there is one, otherwise the
/// passage web service.
pub fn open_corpus(settings: &Settings) -> Result<Box<dyn Corpus>> {
    let translation = settings.translation.as_str();

    if has_translation(&settings.data_dir, translation) {
        let path = translation_path(&settings.data_dir, translation);
        debug!(path = %path.display(), "using local corpus");
        return Ok(Box::new(LocalCorpus::open(&path)?));
    }

    info!(translation, "no local copy, using remote corpus");
    Ok(Box::new(RemoteCorpus::new(translation)?))
}
