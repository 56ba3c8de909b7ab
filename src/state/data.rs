/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the form state and the UI / submission layers.

use chrono::NaiveDate;
use iced::widget::image::Handle;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::path::PathBuf;

/// An image the user attached to the draft
///
/// Holds the original file bytes (the blob handed to the sink on submit)
/// and a decoded, downscaled handle for on-screen display. Dropping a
/// preview releases both; replacing the draft's batch drops the old one.
#[derive(Debug, Clone)]
pub struct ImagePreview {
    /// Filename only (e.g., "podium.jpg")
    pub file_name: String,
    /// Full path to the source file
    pub path: PathBuf,
    /// Original file contents, at most 400 KiB
    pub bytes: Vec<u8>,
    /// Downscaled RGBA pixels ready for the image widget
    pub handle: Handle,
    /// Preview width in pixels
    pub width: u32,
    /// Preview height in pixels
    pub height: u32,
}

impl Drop for ImagePreview {
    fn drop(&mut self) {
        tracing::trace!(file = %self.file_name, "released image preview");
    }
}

/// A completed draft as handed to the submission sink
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AchievementRecord {
    pub description: String,
    pub venue: String,
    pub date: NaiveDate,
    pub images: Vec<ImageBlob>,
}

impl AchievementRecord {
    /// Convert to a JSON string for diagnostic output
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One submitted image: the original file contents plus its name
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlob {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl From<&ImagePreview> for ImageBlob {
    fn from(preview: &ImagePreview) -> Self {
        ImageBlob {
            file_name: preview.file_name.clone(),
            bytes: preview.bytes.clone(),
        }
    }
}

// Serialized as name + byte count: the JSON line is a diagnostic, not a
// transport format for hundreds of kilobytes of pixel data.
impl Serialize for ImageBlob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ImageBlob", 2)?;
        state.serialize_field("file_name", &self.file_name)?;
        state.serialize_field("byte_len", &self.bytes.len())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview(name: &str) -> ImagePreview {
        ImagePreview {
            file_name: name.to_string(),
            path: PathBuf::from(name),
            bytes: vec![0u8; 16],
            handle: Handle::from_rgba(1, 1, vec![0u8; 4]),
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_record_json_summarizes_blobs() {
        let record = AchievementRecord {
            description: "Regional finals, first place".to_string(),
            venue: "City Arena".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 12).unwrap(),
            images: vec![ImageBlob::from(&preview("podium.jpg"))],
        };

        let json = record.to_json().unwrap();

        assert!(json.contains("\"venue\":\"City Arena\""));
        assert!(json.contains("\"date\":\"2024-06-12\""));
        assert!(json.contains("\"file_name\":\"podium.jpg\""));
        // Byte count instead of the raw contents
        assert!(json.contains("\"byte_len\":16"));
        assert!(!json.contains("[0,0,0"));
    }
}
