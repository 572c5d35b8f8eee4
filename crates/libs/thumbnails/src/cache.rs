use crate::photo::render_photo_thumbnail;
use color_eyre::eyre::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Produces the derived raster for one source image.
///
/// The production codec decodes and re-encodes through the `image` stack;
/// tests swap in fakes to count or fail generation.
pub trait ThumbnailCodec: Send + Sync {
    fn render(&self, source: &Path, target: &Path, max_dimension: u32) -> Result<()>;
}

/// Codec backed by `image` + `fast_image_resize`.
#[derive(Debug, Default)]
pub struct ImageCodec;

impl ThumbnailCodec for ImageCodec {
    fn render(&self, source: &Path, target: &Path, max_dimension: u32) -> Result<()> {
        render_photo_thumbnail(source, target, max_dimension)
    }
}

/// Existence-gated thumbnail cache.
///
/// A thumbnail's identity is a pure function of the source file name, so a
/// cache hit is a single `exists` check with no source I/O and no
/// allocation beyond the joined path. Item ids are freshly generated per
/// upload and never collide, which is what makes name-keying safe.
#[derive(Clone)]
pub struct ThumbnailCache {
    thumbnail_folder: PathBuf,
    max_dimension: u32,
    codec: Arc<dyn ThumbnailCodec>,
}

impl ThumbnailCache {
    #[must_use]
    pub fn new(
        thumbnail_folder: PathBuf,
        max_dimension: u32,
        codec: Arc<dyn ThumbnailCodec>,
    ) -> Self {
        Self {
            thumbnail_folder,
            max_dimension,
            codec,
        }
    }

    /// Target path for a source file name. Pure mapping, no I/O.
    #[must_use]
    pub fn thumb_path(&self, file_name: &str) -> PathBuf {
        self.thumbnail_folder.join(file_name)
    }

    /// The reference handed to clients, relative to the static file root.
    #[must_use]
    pub fn relative_ref(file_name: &str) -> String {
        format!("thumbs/{file_name}")
    }

    /// Ensures a derivative exists for `source` and returns its reference.
    ///
    /// Generation failures are soft: the caller gets `None` and decides how
    /// the surrounding operation degrades. Calling this twice for the same
    /// source is safe; the second call is a pure cache hit.
    pub fn ensure(&self, source: &Path) -> Option<String> {
        let file_name = source.file_name()?.to_string_lossy().into_owned();
        let target = self.thumb_path(&file_name);
        if target.exists() {
            return Some(Self::relative_ref(&file_name));
        }
        match self.codec.render(source, &target, self.max_dimension) {
            Ok(()) => Some(Self::relative_ref(&file_name)),
            Err(error) => {
                warn!("Cannot create thumbnail for {file_name}: {error:?}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Writes an empty target and counts how often it was asked to render.
    struct CountingCodec {
        calls: AtomicUsize,
    }

    impl CountingCodec {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl ThumbnailCodec for CountingCodec {
        fn render(&self, _source: &Path, target: &Path, _max_dimension: u32) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            fs::create_dir_all(target.parent().expect("target has a parent"))?;
            fs::write(target, b"")?;
            Ok(())
        }
    }

    struct FailingCodec;

    impl ThumbnailCodec for FailingCodec {
        fn render(&self, _source: &Path, _target: &Path, _max_dimension: u32) -> Result<()> {
            Err(eyre!("decode failed"))
        }
    }

    #[test]
    fn second_ensure_is_a_pure_cache_hit() {
        let dir = TempDir::new().expect("temp dir");
        let codec = CountingCodec::new();
        let cache = ThumbnailCache::new(dir.path().join("thumbs"), 400, codec.clone());
        let source = dir.path().join("abc123.jpg");

        let first = cache.ensure(&source);
        let second = cache.ensure(&source);

        assert_eq!(first.as_deref(), Some("thumbs/abc123.jpg"));
        assert_eq!(first, second);
        assert_eq!(codec.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn render_failure_is_soft() {
        let dir = TempDir::new().expect("temp dir");
        let cache = ThumbnailCache::new(dir.path().join("thumbs"), 400, Arc::new(FailingCodec));

        assert_eq!(cache.ensure(&dir.path().join("broken.png")), None);
        assert!(!dir.path().join("thumbs").join("broken.png").exists());
    }

    #[test]
    fn thumb_path_is_derived_from_the_file_name_alone() {
        let cache = ThumbnailCache::new(PathBuf::from("/srv/thumbs"), 400, CountingCodec::new());

        assert_eq!(
            cache.thumb_path("p1.jpg"),
            PathBuf::from("/srv/thumbs/p1.jpg")
        );
        assert_eq!(ThumbnailCache::relative_ref("p1.jpg"), "thumbs/p1.jpg");
    }
}
