use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use crate::domain::FileMetadata;
use crate::error::Result;
use crate::repo::{MetadataStore, StoreParams};

/// JSON array on disk, rewritten whole through a temp file on every change.
pub struct FsMetadataStore {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    guard: Mutex<()>,
}

impl FsMetadataStore {
    pub fn new(params: StoreParams) -> Result<Self> {
        if let Some(parent) = params.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path: params.path,
            guard: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<FileMetadata>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, entries: &[FileMetadata]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn locked<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let _g = self
            .guard
            .lock()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        f()
    }
}

impl MetadataStore for FsMetadataStore {
    fn append(&self, entries: &[FileMetadata]) -> Result<()> {
        self.locked(|| {
            let mut all = self.load()?;
            all.extend_from_slice(entries);
            self.save(&all)
        })
    }

    fn list(&self) -> Result<Vec<FileMetadata>> {
        self.locked(|| self.load())
    }

    fn delete_by_date(&self, date: &str) -> Result<usize> {
        self.locked(|| {
            let mut all = self.load()?;
            let before = all.len();
            all.retain(|e| e.date != date);
            let removed = before - all.len();
            if removed > 0 {
                self.save(&all)?;
            }
            Ok(removed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(original: &str, date: &str) -> FileMetadata {
        FileMetadata {
            name: format!("Oct 07, 3:45 PM | Ana | {original}"),
            original_name: original.to_string(),
            date: date.to_string(),
            size: 10,
            uploaded_by: "Ana".to_string(),
            employee_id: None,
        }
    }

    fn store(dir: &tempfile::TempDir) -> FsMetadataStore {
        FsMetadataStore::new(StoreParams {
            path: dir.path().join("nested").join("uploads.json"),
        })
        .unwrap()
    }

    #[test]
    fn missing_file_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(&dir).list().unwrap().is_empty());
    }

    #[test]
    fn append_never_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        s.append(&[meta("a.csv", "t1")]).unwrap();
        s.append(&[meta("b.csv", "t2"), meta("c.csv", "t2")]).unwrap();

        let reopened = store(&dir);
        let names: Vec<_> = reopened
            .list()
            .unwrap()
            .into_iter()
            .map(|m| m.original_name)
            .collect();
        assert_eq!(names, ["a.csv", "b.csv", "c.csv"]);
    }

    #[test]
    fn delete_removes_every_entry_with_the_date() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        s.append(&[meta("a.csv", "t1"), meta("b.csv", "t2"), meta("c.csv", "t2")])
            .unwrap();
        assert_eq!(s.delete_by_date("t2").unwrap(), 2);
        assert_eq!(s.delete_by_date("nope").unwrap(), 0);
        assert_eq!(s.list().unwrap(), [meta("a.csv", "t1")]);
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        fs::write(s.path(), "{oops").unwrap();
        assert!(matches!(
            s.list(),
            Err(crate::error::IngestError::Format(_))
        ));
    }
}
