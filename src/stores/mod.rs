//! Remote store capability surface.
//!
//! The simulator only ever needs three things from a store: create a file,
//! write bytes to it, and commit it. Keeping that surface as a pair of object
//! traits lets the run loop drive an in-memory store in tests and the Azure
//! backend in production through the same code path.

pub mod azure;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};

pub use azure::AzureLakeStore;
pub use memory::MemoryLakeStore;

/// A file-granular view of a hierarchical store.
#[async_trait]
pub trait LakeStore: Send + Sync {
    /// Begin a new file under the store's directory. The file is not visible
    /// to readers until its handle is committed.
    async fn create(&self, name: &str) -> Result<Box<dyn LakeFile>, object_store::Error>;
}

/// An uncommitted remote file.
#[async_trait]
pub trait LakeFile: Send {
    async fn write(&mut self, bytes: Bytes) -> Result<(), object_store::Error>;
    async fn commit(self: Box<Self>) -> Result<(), object_store::Error>;
}

/// [`LakeStore`] over any [`ObjectStore`], scoped to one directory.
pub struct ObjectLakeStore {
    store: Arc<dyn ObjectStore>,
    directory: Path,
}

impl ObjectLakeStore {
    pub fn new(store: Arc<dyn ObjectStore>, directory: Path) -> Self {
        Self { store, directory }
    }
}

#[async_trait]
impl LakeStore for ObjectLakeStore {
    async fn create(&self, name: &str) -> Result<Box<dyn LakeFile>, object_store::Error> {
        Ok(Box::new(StagedFile {
            store: Arc::clone(&self.store),
            path: self.directory.child(name),
            buf: Vec::new(),
        }))
    }
}

/// Stages written bytes locally and publishes them with a single atomic `put`
/// on commit, so an interrupted upload never leaves a partial artifact.
struct StagedFile {
    store: Arc<dyn ObjectStore>,
    path: Path,
    buf: Vec<u8>,
}

#[async_trait]
impl LakeFile for StagedFile {
    async fn write(&mut self, bytes: Bytes) -> Result<(), object_store::Error> {
        self.buf.extend_from_slice(&bytes);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), object_store::Error> {
        let Self { store, path, buf } = *self;
        store.put(&path, PutPayload::from(buf)).await?;
        Ok(())
    }
}
