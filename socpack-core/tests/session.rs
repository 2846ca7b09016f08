mod common;

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use common::*;
use socpack_core::error::{IngestError, Result};
use socpack_core::repo::{MetadataStore, StoreParams};
use socpack_core::repo_factory::{Backend, open_store};
use socpack_core::{FileMetadata, IngestOptions, UploadSession, list_uploads};

#[test]
fn rejects_non_zip_names_before_reading() {
    let session = UploadSession::new(IngestOptions::default(), None);
    let err = session.submit("shipments.csv", b"whatever").unwrap_err();
    assert!(matches!(err, IngestError::NotZip { .. }));
    assert_eq!(err.to_string(), "Please upload a ZIP file.");
    assert!(session.current().unwrap().is_none());
}

#[test]
fn failed_upload_keeps_previous_dataset() {
    let session = UploadSession::new(IngestOptions::default(), None);
    let good = build_zip(&[("a.csv", &file_a())]);
    let first = session.submit("batch-1.zip", &good).unwrap();
    assert_eq!(first.total_kept, 5);

    let empty = build_zip(&[("readme.txt", "nothing here")]);
    let err = session.submit("batch-2.zip", &empty).unwrap_err();
    assert_eq!(err.to_string(), "No CSV files found in the ZIP archive");
    assert!(matches!(
        session.submit("batch-3.zip", b"garbage"),
        Err(IngestError::InvalidArchive(_))
    ));

    let current = session.current().unwrap().unwrap();
    assert!(Arc::ptr_eq(&current, &first));

    let next = build_zip(&[("b.csv", &file_b())]);
    session.submit("batch-4.zip", &next).unwrap();
    assert_eq!(session.current().unwrap().unwrap().total_kept, 1);

    session.clear().unwrap();
    assert!(session.current().unwrap().is_none());
}

/// Parks the first append until the test lets it go.
struct GateStore {
    entered: Mutex<Option<mpsc::Sender<()>>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl MetadataStore for GateStore {
    fn append(&self, _: &[FileMetadata]) -> Result<()> {
        if let Some(tx) = self.entered.lock().unwrap().take() {
            tx.send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
        Ok(())
    }
    fn list(&self) -> Result<Vec<FileMetadata>> {
        Ok(Vec::new())
    }
    fn delete_by_date(&self, _: &str) -> Result<usize> {
        Ok(0)
    }
}

#[test]
fn second_upload_is_rejected_while_first_runs() {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let store: Arc<dyn MetadataStore> = Arc::new(GateStore {
        entered: Mutex::new(Some(entered_tx)),
        release: Mutex::new(release_rx),
    });
    let session = Arc::new(UploadSession::new(IngestOptions::default(), Some(store)));

    let zip = build_zip(&[("a.csv", &file_a())]);
    let worker = {
        let session = Arc::clone(&session);
        let zip = zip.clone();
        thread::spawn(move || session.submit("first.zip", &zip).map(|d| d.total_kept))
    };

    entered_rx.recv().unwrap();
    assert!(matches!(
        session.submit("second.zip", &zip),
        Err(IngestError::UploadInProgress)
    ));
    assert!(session.current().unwrap().is_none());

    release_tx.send(()).unwrap();
    assert_eq!(worker.join().unwrap().unwrap(), 5);
    assert_eq!(session.current().unwrap().unwrap().total_kept, 5);

    // slot is free again
    assert!(session.submit("third.zip", &zip).is_ok());
}

#[test]
fn fs_store_backs_the_upload_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(
        Backend::Fs,
        StoreParams {
            path: dir.path().join("uploads.json"),
        },
    )
    .unwrap();
    let session = UploadSession::new(IngestOptions::default(), Some(Arc::clone(&store)));

    let zip = build_zip(&[("a.csv", &file_a()), ("b.csv", &file_b())]);
    session.submit("day.zip", &zip).unwrap();

    let history = list_uploads(store.as_ref()).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].name.ends_with(" | Unknown User | a.csv"));

    let key = history[0].date.clone();
    assert_eq!(store.delete_by_date(&key).unwrap(), 2);
    assert!(list_uploads(store.as_ref()).unwrap().is_empty());
}
