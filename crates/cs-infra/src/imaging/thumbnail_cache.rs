use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::Result;
use cs_core::ports::{GeneratedThumbnail, ThumbnailGeneratorPort};
use cs_core::{ClipboardEntry, EntryId};
use tokio::sync::Mutex;
use tracing::debug;

/// Thumbnails of image entries, keyed by entry id.
///
/// Thumbnails are produced lazily on first request and live outside the
/// entry itself. Call [`ThumbnailCache::retain`] with the ids still in the
/// history to drop thumbnails of evicted or deleted entries.
pub struct ThumbnailCache {
    generator: Arc<dyn ThumbnailGeneratorPort>,
    entries: Mutex<HashMap<EntryId, Arc<GeneratedThumbnail>>>,
}

impl ThumbnailCache {
    pub fn new(generator: Arc<dyn ThumbnailGeneratorPort>) -> Self {
        Self {
            generator,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Thumbnail for `entry`, generating it on a miss.
    ///
    /// Returns `Ok(None)` for entries that carry no image.
    pub async fn get_or_generate(
        &self,
        entry: &ClipboardEntry,
    ) -> Result<Option<Arc<GeneratedThumbnail>>> {
        let Some(image_data) = entry.image_data() else {
            return Ok(None);
        };

        if let Some(hit) = self.entries.lock().await.get(entry.id()) {
            return Ok(Some(hit.clone()));
        }

        // Generated without holding the lock; a concurrent miss for the same
        // id produces an identical thumbnail.
        let generated = Arc::new(self.generator.generate_thumbnail(image_data).await?);
        debug!(
            entry_id = %entry.id(),
            width = generated.thumbnail.width,
            height = generated.thumbnail.height,
            "Generated thumbnail"
        );

        let mut entries = self.entries.lock().await;
        let stored = entries
            .entry(entry.id().clone())
            .or_insert(generated)
            .clone();
        Ok(Some(stored))
    }

    /// Drop every cached thumbnail whose id is not in `live_ids`.
    pub async fn retain<'a>(&self, live_ids: impl IntoIterator<Item = &'a EntryId>) {
        let live: HashSet<&EntryId> = live_ids.into_iter().collect();
        self.entries.lock().await.retain(|id, _| live.contains(id));
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{encode_png, InfraThumbnailGenerator};
    use bytes::Bytes;
    use chrono::Utc;
    use cs_core::ports::ImageDimensions;
    use cs_core::ContentHash;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGenerator {
        inner: InfraThumbnailGenerator,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ThumbnailGeneratorPort for CountingGenerator {
        async fn generate_thumbnail(&self, image_bytes: &[u8]) -> Result<GeneratedThumbnail> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.generate_thumbnail(image_bytes).await
        }
    }

    fn image_entry(width: u32, height: u32, seed: u8) -> ClipboardEntry {
        ClipboardEntry::image(
            Bytes::from(encode_png(width, height)),
            ContentHash([seed; 32]),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_get_or_generate_caches_by_entry_id() {
        let generator = Arc::new(CountingGenerator {
            inner: InfraThumbnailGenerator::new(16),
            calls: AtomicUsize::new(0),
        });
        let cache = ThumbnailCache::new(generator.clone());
        let entry = image_entry(64, 32, 1);

        let first = cache.get_or_generate(&entry).await.unwrap().unwrap();
        let second = cache.get_or_generate(&entry).await.unwrap().unwrap();

        assert_eq!(first.thumbnail, ImageDimensions { width: 16, height: 8 });
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_generate_skips_non_image_entries() {
        let cache = ThumbnailCache::new(Arc::new(InfraThumbnailGenerator::new(16)));
        let entry = ClipboardEntry::text("hello", Utc::now(), Default::default());

        assert!(cache.get_or_generate(&entry).await.unwrap().is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_retain_prunes_removed_entries() {
        let cache = ThumbnailCache::new(Arc::new(InfraThumbnailGenerator::new(16)));
        let kept = image_entry(8, 8, 1);
        let dropped = image_entry(8, 8, 2);
        cache.get_or_generate(&kept).await.unwrap();
        cache.get_or_generate(&dropped).await.unwrap();
        assert_eq!(cache.len().await, 2);

        cache.retain([kept.id()]).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache.entries.lock().await.contains_key(kept.id()));
    }
}
