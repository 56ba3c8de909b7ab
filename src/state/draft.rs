/// The in-progress achievement record
///
/// This struct is the form's only mutable state. All mutation goes
/// through the operations below; the UI layer never touches the fields
/// directly, so the invariants (at most two images, each within the size
/// limit) hold by construction.

use chrono::NaiveDate;

use crate::images::BatchOutcome;
use crate::sink::SubmissionSink;
use crate::state::data::{AchievementRecord, ImageBlob, ImagePreview};

/// Maximum number of images attached to one achievement
pub const MAX_IMAGES: usize = 2;

const TOO_MANY_IMAGES: &str = "You can only upload up to 2 images.";
const IMAGE_TOO_LARGE: &str = "Each image must be less than 400KB.";
const IMAGES_UNREADABLE: &str = "Could not read the selected images.";
const MISSING_FIELDS: &str = "Please fill out all fields and upload images.";

/// An unsaved achievement being assembled in the form
#[derive(Debug, Default)]
pub struct AchievementDraft {
    images: Vec<ImagePreview>,
    description: String,
    venue: String,
    date: Option<NaiveDate>,
    error: Option<String>,
}

impl AchievementDraft {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self) -> &[ImagePreview] {
        &self.images
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Current validation message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    pub fn set_venue(&mut self, venue: String) {
        self.venue = venue;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = Some(date);
    }

    /// Gate an incoming file batch on its size
    ///
    /// A batch larger than [`MAX_IMAGES`] is rejected wholesale: the
    /// attached images stay as they are and the user is told the limit.
    /// Returns whether the batch should be loaded at all.
    pub fn admit_batch(&mut self, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        if count > MAX_IMAGES {
            self.error = Some(TOO_MANY_IMAGES.to_string());
            return false;
        }
        true
    }

    /// Apply the outcome of loading an admitted batch
    ///
    /// If anything survived, the surviving set replaces the current
    /// attachments wholesale (the previous previews are released) and any
    /// stale error is cleared. If nothing survived, the attachments stay
    /// untouched and the dominant rejection reason is surfaced.
    pub fn apply_batch(&mut self, batch: BatchOutcome) {
        debug_assert!(batch.previews.len() <= MAX_IMAGES);

        if !batch.previews.is_empty() {
            // Assignment drops the previous batch, releasing its previews
            self.images = batch.previews;
            self.error = None;
        } else if batch.oversized > 0 {
            self.error = Some(IMAGE_TOO_LARGE.to_string());
        } else if batch.failed > 0 {
            self.error = Some(IMAGES_UNREADABLE.to_string());
        }
    }

    /// Validate the draft and hand it to the sink
    ///
    /// Returns true if the record was accepted. On validation failure no
    /// partial submission happens; on sink failure the reason lands in
    /// the error slot and the draft stays intact for another attempt.
    pub fn submit(&mut self, sink: &mut dyn SubmissionSink) -> bool {
        let date = match self.date {
            Some(date) if self.is_complete() => date,
            _ => {
                self.error = Some(MISSING_FIELDS.to_string());
                return false;
            }
        };

        let record = AchievementRecord {
            description: self.description.clone(),
            venue: self.venue.clone(),
            date,
            images: self.images.iter().map(ImageBlob::from).collect(),
        };

        match sink.submit_draft(&record) {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(err) => {
                tracing::warn!(sink = sink.name(), "submission failed: {err}");
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// All required fields present and at least one image attached
    fn is_complete(&self) -> bool {
        !self.description.is_empty()
            && !self.venue.is_empty()
            && self.date.is_some()
            && !self.images.is_empty()
    }
}
