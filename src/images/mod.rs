/// Image intake module
///
/// This module handles:
/// - Loading dropped or picked files off the UI thread
/// - Enforcing the per-file size limit
/// - Decoding and downscaling accepted images for preview display

pub mod loader;

pub use loader::{load_batch, BatchOutcome, MAX_IMAGE_BYTES};
