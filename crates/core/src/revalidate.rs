use std::sync::{Arc, Mutex};

/// Marks cached renders of a dashboard route as stale.
#[async_trait::async_trait]
pub trait Revalidator: Send + Sync {
    async fn revalidate_path(&self, path: &str);
}

#[async_trait::async_trait]
impl<T: Revalidator + ?Sized> Revalidator for Arc<T> {
    async fn revalidate_path(&self, path: &str) {
        (**self).revalidate_path(path).await
    }
}

/// Revalidator for callers without a route cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRevalidator;

#[async_trait::async_trait]
impl Revalidator for NoopRevalidator {
    async fn revalidate_path(&self, path: &str) {
        tracing::trace!(path = path, "Revalidation skipped, no route cache");
    }
}

/// Records every revalidated path in call order.
#[derive(Debug, Default)]
pub struct RecordingRevalidator {
    paths: Mutex<Vec<String>>,
}

impl RecordingRevalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.paths().len()
    }
}

#[async_trait::async_trait]
impl Revalidator for RecordingRevalidator {
    async fn revalidate_path(&self, path: &str) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(path.to_string());
        }
    }
}
