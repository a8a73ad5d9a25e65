use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use spin_core::{Store, StoreError};
use tracing::debug;

/// One JSON file per key under a directory, replaced atomically on write.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(key)))
    }

    fn write_atomic(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create store dir: {}", self.dir.display()))?;
        let path = self.path_for(key);
        let mut tmp = path.clone();
        tmp.set_extension("json.tmp");
        {
            let mut f =
                fs::File::create(&tmp).with_context(|| format!("create tmp: {}", tmp.display()))?;
            f.write_all(value.as_bytes())?;
            f.flush()?;
        }
        fs::rename(&tmp, &path).with_context(|| format!("persist {} to {}", key, path.display()))?;
        Ok(())
    }
}

fn sanitize(key: &str) -> String {
    let mut s = key
        .trim()
        .replace(['<', '>', ':', '"', '/', '\\', '|', '?', '*', '.'], "_");
    if s.is_empty() {
        s = "default".to_string();
    }
    s
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        debug!(target: "tui", "read {} bytes from {}", data.len(), path.display());
        Ok(Some(data))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write_atomic(key, value)
            .map_err(|e| StoreError::Unavailable(format!("{:#}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use spin_core::{History, Persisted, Phase, Pocket, Session, HISTORY_KEY};

    #[test]
    fn missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert!(store.get("history").unwrap().is_none());
    }

    #[test]
    fn writes_create_the_directory_and_replace_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.set("history", "[1]").unwrap();
        store.set("history", "[2,1]").unwrap();
        assert_eq!(store.get("history").unwrap().as_deref(), Some("[2,1]"));
        let on_disk = fs::read_to_string(dir.path().join("nested/history.json")).unwrap();
        assert_eq!(on_disk, "[2,1]");
        assert!(!dir.path().join("nested/history.json.tmp").exists());
    }

    #[test]
    fn keys_cannot_escape_the_directory() {
        assert_eq!(sanitize("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize("  "), "default");
    }

    #[test]
    fn history_survives_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = History::new();
        h.add(Pocket::new(32).unwrap());
        h.add(Pocket::new(15).unwrap());
        {
            let store: Arc<dyn Store> = Arc::new(FileStore::new(dir.path()));
            Persisted::new(store, "history").save(&h).unwrap();
        }
        let store: Arc<dyn Store> = Arc::new(FileStore::new(dir.path()));
        let back: History = Persisted::new(store, "history").load_or(History::new());
        assert_eq!(back, h);
    }

    #[test]
    fn unwritable_location_reports_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let store = FileStore::new(blocker.join("sub"));
        assert!(matches!(
            store.set("history", "[]"),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn unreadable_snapshot_starts_an_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("history.json"), [0xff, 0xfe, 0x5b]).unwrap();
        let store = Arc::new(FileStore::new(dir.path()));
        assert!(matches!(store.get(HISTORY_KEY), Err(StoreError::Io(_))));

        let s: Arc<dyn Store> = store.clone();
        let mut session = Session::new(s);
        session.wait_ready();
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.history().map(|h| h.len()), Some(0));

        session.submit_text("4").unwrap();
        assert_eq!(store.get(HISTORY_KEY).unwrap().as_deref(), Some("[4]"));
    }
}
