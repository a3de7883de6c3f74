//! Azure Data Lake Gen2 backend.

use std::sync::Arc;

use async_trait::async_trait;
use object_store::ObjectStore;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::path::Path;

use super::{LakeFile, LakeStore, ObjectLakeStore};
use crate::error::{FeedError, Result};

/// An authenticated handle on `<account>/<container>`, scoped to one
/// directory.
pub struct AzureLakeStore {
    inner: ObjectLakeStore,
}

impl AzureLakeStore {
    /// Build a client and probe the target directory listing.
    ///
    /// The builder validates credentials lazily, but an unreachable endpoint
    /// or bad key must abort the run before any upload is attempted, so the
    /// probe forces one round trip here.
    pub async fn connect(
        account: &str,
        access_key: &str,
        container: &str,
        directory: &str,
    ) -> Result<Self> {
        let store = MicrosoftAzureBuilder::new()
            .with_account(account)
            .with_access_key(access_key)
            .with_container_name(container)
            .build()
            .map_err(|source| FeedError::Connection { source })?;

        let directory = Path::from(directory);
        store
            .list_with_delimiter(Some(&directory))
            .await
            .map_err(|source| FeedError::Connection { source })?;

        Ok(Self {
            inner: ObjectLakeStore::new(Arc::new(store), directory),
        })
    }
}

#[async_trait]
impl LakeStore for AzureLakeStore {
    async fn create(&self, name: &str) -> Result<Box<dyn LakeFile>, object_store::Error> {
        self.inner.create(name).await
    }
}
