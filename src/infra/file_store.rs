use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::services::KeyValueStore;

pub const STATE_FILE_NAME: &str = "view_state.json";

type Entries = BTreeMap<String, String>;

/// Key-value pairs kept as one JSON object on disk.
///
/// Every write re-reads the file so values set by another process survive;
/// a file that no longer parses is replaced.
pub struct FileStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn in_directory(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_entries(&self) -> AppResult<Entries> {
        match fs::read_to_string(&self.file_path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Entries::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Persistence(format!(
                    "invalid state file {}: {err}",
                    self.file_path.display()
                ))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(err) => Err(self.io_failure("read", err)),
        }
    }

    /// Writes a sibling temporary file and renames it over the state file, so
    /// readers see either the old or the new contents.
    fn write_entries(&self, entries: &Entries) -> AppResult<()> {
        let parent = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|err| self.io_failure("create directory for", err))?;
        let data = serde_json::to_string_pretty(entries)
            .map_err(|err| AppError::Persistence(format!("failed to encode state: {err}")))?;

        let mut staged =
            NamedTempFile::new_in(parent).map_err(|err| self.io_failure("stage", err))?;
        staged
            .write_all(data.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| self.io_failure("write", err))?;
        staged
            .persist(&self.file_path)
            .map_err(|err| self.io_failure("replace", err.error))?;
        debug!(path = %self.file_path.display(), "saved view state");
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Entries)) -> AppResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::Persistence("state file lock poisoned".to_string()))?;
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(AppError::Persistence(reason)) if self.file_path.is_file() => {
                warn!(%reason, "replacing unreadable view state");
                Entries::new()
            }
            Err(err) => return Err(err),
        };
        apply(&mut entries);
        self.write_entries(&entries)
    }

    fn io_failure(&self, action: &str, err: std::io::Error) -> AppError {
        AppError::Persistence(format!(
            "failed to {action} {}: {err}",
            self.file_path.display()
        ))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_directory(dir.path());
        assert_eq!(store.get("groupingOption").unwrap(), None);
    }

    #[test]
    fn persists_values_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("kanban");

        FileStore::in_directory(&nested)
            .set("groupingOption", "team")
            .unwrap();

        let reopened = FileStore::in_directory(&nested);
        assert_eq!(
            reopened.get("groupingOption").unwrap().as_deref(),
            Some("team")
        );
    }

    #[test]
    fn overwrites_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_directory(dir.path());
        store.set("sortingOption", "priority").unwrap();
        store.set("sortingOption", "title").unwrap();
        store.set("groupingOption", "user").unwrap();
        assert_eq!(store.get("sortingOption").unwrap().as_deref(), Some("title"));

        store.remove("sortingOption").unwrap();
        assert_eq!(store.get("sortingOption").unwrap(), None);
        assert_eq!(store.get("groupingOption").unwrap().as_deref(), Some("user"));
    }

    #[test]
    fn unwritable_location_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = FileStore::in_directory(&blocker);
        let err = store.set("groupingOption", "status").unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[test]
    fn corrupt_file_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_directory(dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(
            store.get("groupingOption"),
            Err(AppError::Persistence(_))
        ));
    }

    #[test]
    fn writes_leave_no_staging_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_directory(dir.path());
        store.set("groupingOption", "team").unwrap();
        store.set("sortingOption", "title").unwrap();

        let names = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(names, vec![STATE_FILE_NAME.to_string()]);

        let contents = fs::read_to_string(store.path()).unwrap();
        let entries: Entries = serde_json::from_str(&contents).unwrap();
        assert_eq!(entries.get("groupingOption").map(String::as_str), Some("team"));
    }

    #[test]
    fn writing_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::in_directory(dir.path());
        fs::write(store.path(), "{ not json").unwrap();

        store.set("sortingOption", "title").unwrap();
        assert_eq!(store.get("sortingOption").unwrap().as_deref(), Some("title"));
    }
}
