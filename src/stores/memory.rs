//! In-memory stores used by the simulator test suites.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use object_store::ObjectStore;
use object_store::memory::InMemory;
use object_store::path::Path;

use super::{LakeFile, LakeStore, ObjectLakeStore};

/// [`LakeStore`] backed by [`InMemory`], with read-back helpers for
/// asserting on committed artifacts.
pub struct MemoryLakeStore {
    store: Arc<InMemory>,
    directory: Path,
    inner: ObjectLakeStore,
}

impl MemoryLakeStore {
    pub fn new(directory: &str) -> Self {
        let store = Arc::new(InMemory::new());
        let directory = Path::from(directory);
        let inner = ObjectLakeStore::new(Arc::clone(&store) as Arc<dyn ObjectStore>, directory.clone());
        Self {
            store,
            directory,
            inner,
        }
    }

    /// Committed artifacts under the store's directory as `(name, bytes)`,
    /// in name order.
    pub async fn artifacts(&self) -> Vec<(String, Bytes)> {
        let listing = self
            .store
            .list_with_delimiter(Some(&self.directory))
            .await
            .unwrap();

        let mut artifacts = Vec::new();
        for meta in listing.objects {
            let bytes = self
                .store
                .get(&meta.location)
                .await
                .unwrap()
                .bytes()
                .await
                .unwrap();
            let name = meta.location.filename().unwrap().to_string();
            artifacts.push((name, bytes));
        }
        artifacts.sort_by(|a, b| a.0.cmp(&b.0));
        artifacts
    }
}

#[async_trait]
impl LakeStore for MemoryLakeStore {
    async fn create(&self, name: &str) -> Result<Box<dyn LakeFile>, object_store::Error> {
        self.inner.create(name).await
    }
}

/// Wraps another store and fails the commit of selected creations, counted
/// from zero in creation order. Exercises the skip-on-upload-failure path.
pub struct FailingLakeStore<S> {
    inner: S,
    fail_indices: HashSet<usize>,
    created: AtomicUsize,
}

impl<S: LakeStore> FailingLakeStore<S> {
    pub fn new(inner: S, fail_indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            inner,
            fail_indices: fail_indices.into_iter().collect(),
            created: AtomicUsize::new(0),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S: LakeStore> LakeStore for FailingLakeStore<S> {
    async fn create(&self, name: &str) -> Result<Box<dyn LakeFile>, object_store::Error> {
        let index = self.created.fetch_add(1, Ordering::SeqCst);
        let file = self.inner.create(name).await?;
        if self.fail_indices.contains(&index) {
            Ok(Box::new(FailingFile))
        } else {
            Ok(file)
        }
    }
}

struct FailingFile;

#[async_trait]
impl LakeFile for FailingFile {
    async fn write(&mut self, _bytes: Bytes) -> Result<(), object_store::Error> {
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), object_store::Error> {
        Err(object_store::Error::Generic {
            store: "memory",
            source: "injected commit failure".to_string().into(),
        })
    }
}
