use image::imageops::FilterType;
use image::GenericImageView;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::state::data::ImagePreview;

/// Largest accepted image file, in bytes (400 KiB)
pub const MAX_IMAGE_BYTES: u64 = 400 * 1024;

/// Longest edge of a generated preview, in pixels
const PREVIEW_EDGE: u32 = 256;

/// Why a single file was excluded from a batch
#[derive(Error, Debug)]
pub enum PreviewError {
    /// File exceeds the per-image size limit
    #[error("{file}: {len} bytes exceeds the {MAX_IMAGE_BYTES} byte limit")]
    TooLarge { file: String, len: u64 },

    /// File could not be read from disk
    #[error("{file}: {source}")]
    Unreadable {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// File contents are not a decodable image
    #[error("{file}: {source}")]
    Undecodable {
        file: String,
        #[source]
        source: image::ImageError,
    },
}

/// Result of loading one batch of candidate files
///
/// Per-file failures degrade to counts; the form decides what, if
/// anything, to tell the user about them.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Files that passed the size gate and decoded
    pub previews: Vec<ImagePreview>,
    /// Files excluded for exceeding the size limit
    pub oversized: usize,
    /// Files excluded because they could not be read or decoded
    pub failed: usize,
}

/// Load a batch of candidate files into previews
///
/// Decoding is CPU-bound, so the work runs on a blocking task and the
/// outcome comes back to the UI as a message.
pub async fn load_batch(paths: Vec<PathBuf>) -> BatchOutcome {
    match tokio::task::spawn_blocking(move || load_batch_blocking(paths)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("preview loading task failed: {e}");
            BatchOutcome::default()
        }
    }
}

/// Blocking implementation of batch loading
fn load_batch_blocking(paths: Vec<PathBuf>) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for path in paths {
        match load_preview(&path) {
            Ok(preview) => {
                tracing::debug!(file = %preview.file_name, "loaded image preview");
                outcome.previews.push(preview);
            }
            Err(err @ PreviewError::TooLarge { .. }) => {
                tracing::warn!("excluded image: {err}");
                outcome.oversized += 1;
            }
            Err(err) => {
                tracing::warn!("excluded image: {err}");
                outcome.failed += 1;
            }
        }
    }

    outcome
}

/// Load a single file into a preview
///
/// The size gate uses file metadata so oversized files are rejected
/// without reading their contents.
fn load_preview(path: &Path) -> Result<ImagePreview, PreviewError> {
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let metadata = fs::metadata(path).map_err(|source| PreviewError::Unreadable {
        file: file_name.clone(),
        source,
    })?;

    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(PreviewError::TooLarge {
            file: file_name,
            len: metadata.len(),
        });
    }

    let bytes = fs::read(path).map_err(|source| PreviewError::Unreadable {
        file: file_name.clone(),
        source,
    })?;

    let decoded = image::load_from_memory(&bytes).map_err(|source| PreviewError::Undecodable {
        file: file_name.clone(),
        source,
    })?;

    // Downscale for display; never upscale small images
    let (source_width, source_height) = decoded.dimensions();
    let preview = if source_width > PREVIEW_EDGE || source_height > PREVIEW_EDGE {
        decoded.resize(PREVIEW_EDGE, PREVIEW_EDGE, FilterType::Lanczos3)
    } else {
        decoded
    };

    let rgba = preview.to_rgba8();
    let (width, height) = rgba.dimensions();
    let handle = iced::widget::image::Handle::from_rgba(width, height, rgba.into_raw());

    Ok(ImagePreview {
        file_name,
        path: path.to_path_buf(),
        bytes,
        handle,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Write a small valid PNG and return its path
    fn write_png(dir: &TempDir, name: &str, edge: u32) -> PathBuf {
        let path = dir.path().join(name);
        let img = image::RgbaImage::from_pixel(edge, edge, image::Rgba([10, 120, 90, 255]));
        img.save(&path).unwrap();
        path
    }

    /// Write a file larger than the size limit and return its path
    fn write_oversized(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, vec![0u8; (MAX_IMAGE_BYTES + 1024) as usize]).unwrap();
        path
    }

    #[test]
    fn test_valid_image_loads_with_original_bytes() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "small.png", 8);

        let preview = load_preview(&path).unwrap();

        assert_eq!(preview.file_name, "small.png");
        assert_eq!(preview.bytes, fs::read(&path).unwrap());
        assert_eq!((preview.width, preview.height), (8, 8));
    }

    #[test]
    fn test_large_image_is_downscaled_to_preview_edge() {
        let dir = TempDir::new().unwrap();
        let path = write_png(&dir, "wide.png", 300);

        let preview = load_preview(&path).unwrap();

        assert!(preview.width <= PREVIEW_EDGE);
        assert!(preview.height <= PREVIEW_EDGE);
    }

    #[test]
    fn test_oversized_file_is_rejected_before_decode() {
        let dir = TempDir::new().unwrap();
        let path = write_oversized(&dir, "big.png");

        match load_preview(&path) {
            Err(PreviewError::TooLarge { file, len }) => {
                assert_eq!(file, "big.png");
                assert!(len > MAX_IMAGE_BYTES);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.png");

        assert!(matches!(
            load_preview(&path),
            Err(PreviewError::Unreadable { .. })
        ));
    }

    #[test]
    fn test_garbage_file_is_undecodable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.png");
        fs::write(&path, b"not an image").unwrap();

        assert!(matches!(
            load_preview(&path),
            Err(PreviewError::Undecodable { .. })
        ));
    }

    #[test]
    fn test_batch_partitions_survivors_and_rejections() {
        let dir = TempDir::new().unwrap();
        let good = write_png(&dir, "good.png", 8);
        let big = write_oversized(&dir, "big.png");

        let outcome = load_batch_blocking(vec![good, big]);

        assert_eq!(outcome.previews.len(), 1);
        assert_eq!(outcome.previews[0].file_name, "good.png");
        assert_eq!(outcome.oversized, 1);
        assert_eq!(outcome.failed, 0);
    }
}
