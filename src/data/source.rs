use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::DataError;
use super::loader::load_file;
use super::model::Dataset;

/// Something that can hand out the process-wide dataset.
///
/// The UI state owns a boxed source instead of reaching for a global, so the
/// filter and metric code can run against in-memory datasets.
pub trait DatasetSource {
    /// Return the dataset, loading it on first use.
    fn load(&self) -> Result<Arc<Dataset>, DataError>;

    /// Forget any cached dataset; the next `load` re-reads the source.
    fn refresh(&self);

    /// Human-readable origin, shown in the top bar.
    fn describe(&self) -> String;
}

/// Loads a file once and reuses the parsed dataset until refreshed.
pub struct CachedFileSource {
    path: PathBuf,
    cache: RefCell<Option<Arc<Dataset>>>,
}

impl CachedFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: RefCell::new(None),
        }
    }
}

impl DatasetSource for CachedFileSource {
    fn load(&self) -> Result<Arc<Dataset>, DataError> {
        if let Some(ds) = self.cache.borrow().as_ref() {
            log::debug!("Reusing cached dataset from {}", self.path.display());
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_file(&self.path)?);
        *self.cache.borrow_mut() = Some(Arc::clone(&ds));
        Ok(ds)
    }

    fn refresh(&self) {
        if self.cache.borrow_mut().take().is_some() {
            log::info!("Dropped cached dataset for {}", self.path.display());
        }
    }

    fn describe(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn caches_until_refresh() {
        let dir = std::env::temp_dir().join("season_dashboard_source_tests");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("games.csv");
        fs::write(
            &path,
            "year_id,fran_id,date_game,is_playoffs,game_result\n2015,Celtics,2014-10-29,0,W\n",
        )
        .unwrap();

        let source = CachedFileSource::new(&path);
        let first = source.load().unwrap();
        // Changing the file does not affect the cached copy.
        fs::write(
            &path,
            "year_id,fran_id,date_game,is_playoffs,game_result\n2015,Celtics,2014-10-29,0,W\n2015,Celtics,2014-10-30,0,L\n",
        )
        .unwrap();
        let second = source.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);

        source.refresh();
        let third = source.load().unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.len(), 2);
        assert_eq!(source.describe(), "games.csv");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let path = std::env::temp_dir().join("season_dashboard_missing_source.csv");
        let _ = fs::remove_file(&path);
        let source = CachedFileSource::new(&path);
        assert!(matches!(source.load(), Err(DataError::DataUnavailable { .. })));
        assert!(source.cache.borrow().is_none());
    }
}
