use chrono::NaiveDate;
use iced::widget::{button, column, container, text, text_editor, text_input, Column};
use iced::{Element, Length, Task};
use iced_aw::date_picker::Date;
use iced_aw::helpers::date_picker;
use rfd::FileDialog;
use std::path::PathBuf;

use crate::images::{self, BatchOutcome};
use crate::sink::SubmissionSink;
use crate::state::draft::{AchievementDraft, MAX_IMAGES};
use crate::ui::dropzone;

/// Extensions offered by the file dialog; drops are not pre-filtered,
/// undecodable files are excluded at load time instead
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// The achievement form screen
///
/// Owns the draft plus the widget-level state that does not belong in
/// it: the editor buffer, the date-picker overlay flag, and the
/// in-flight drop batch being reassembled from window events.
pub struct FormPage {
    draft: AchievementDraft,
    description_editor: text_editor::Content,
    date_field: Date,
    show_date_picker: bool,
    /// Files reported hovering over the window, i.e. the expected batch size
    hovered_files: usize,
    /// Dropped paths collected until the batch is complete
    pending_drop: Vec<PathBuf>,
    sink: Box<dyn SubmissionSink>,
}

/// Form events
#[derive(Debug, Clone)]
pub enum Message {
    /// An edit in the description editor
    DescriptionEdited(text_editor::Action),
    /// The venue input changed
    VenueChanged(String),
    /// User opened the date picker
    ChooseDate,
    /// User dismissed the date picker
    CancelDate,
    /// User confirmed a date
    DatePicked(Date),
    /// User clicked the drop region
    PickImages,
    /// A file is hovering over the window
    FileHovered(PathBuf),
    /// Hovering files left without dropping
    FilesHoveredLeft,
    /// A file was dropped on the window
    FileDropped(PathBuf),
    /// Background loading of a batch finished
    BatchLoaded(BatchOutcome),
    /// User clicked submit
    Submit,
}

impl FormPage {
    /// Create an empty form that submits to the given sink
    pub fn new(sink: Box<dyn SubmissionSink>) -> Self {
        FormPage {
            draft: AchievementDraft::new(),
            description_editor: text_editor::Content::new(),
            date_field: Date::today(),
            show_date_picker: false,
            hovered_files: 0,
            pending_drop: Vec::new(),
            sink,
        }
    }

    /// Handle form messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DescriptionEdited(action) => {
                self.description_editor.perform(action);
                self.draft.set_description(editor_text(&self.description_editor));
                Task::none()
            }
            Message::VenueChanged(venue) => {
                self.draft.set_venue(venue);
                Task::none()
            }
            Message::ChooseDate => {
                self.show_date_picker = true;
                Task::none()
            }
            Message::CancelDate => {
                self.show_date_picker = false;
                Task::none()
            }
            Message::DatePicked(date) => {
                self.show_date_picker = false;
                self.date_field = date;
                self.draft.set_date(NaiveDate::from(date));
                Task::none()
            }
            Message::PickImages => {
                // Synchronous native dialog; the event loop is blocked
                // only while it is open
                let picked = FileDialog::new()
                    .set_title(&format!("Select up to {MAX_IMAGES} images"))
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_files();

                match picked {
                    Some(paths) => self.ingest_batch(paths),
                    None => Task::none(),
                }
            }
            Message::FileHovered(_) => {
                self.hovered_files += 1;
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.hovered_files = 0;
                Task::none()
            }
            Message::FileDropped(path) => {
                // The window reports one event per dropped file with no
                // end-of-batch marker; the hover count tells us how many
                // to expect. Platforms that skip hover events degrade to
                // per-file batches.
                self.pending_drop.push(path);
                let expected = self.hovered_files.max(1);
                if self.pending_drop.len() >= expected {
                    self.hovered_files = 0;
                    let batch = std::mem::take(&mut self.pending_drop);
                    return self.ingest_batch(batch);
                }
                Task::none()
            }
            Message::BatchLoaded(outcome) => {
                self.draft.apply_batch(outcome);
                Task::none()
            }
            Message::Submit => {
                if self.draft.submit(self.sink.as_mut()) {
                    tracing::debug!("draft accepted by sink");
                }
                Task::none()
            }
        }
    }

    /// Gate a candidate batch and start loading it in the background
    fn ingest_batch(&mut self, paths: Vec<PathBuf>) -> Task<Message> {
        if !self.draft.admit_batch(paths.len()) {
            return Task::none();
        }
        Task::perform(images::load_batch(paths), Message::BatchLoaded)
    }

    /// Build the form
    pub fn view(&self) -> Element<'_, Message> {
        let title = container(text("Achievements").size(28)).center_x(Length::Fill);

        let description = labeled(
            "Description",
            text_editor(&self.description_editor)
                .placeholder("Description")
                .on_action(Message::DescriptionEdited)
                .height(Length::Fixed(120.0)),
        );

        let venue = labeled(
            "Venue",
            text_input("Venue", self.draft.venue())
                .on_input(Message::VenueChanged)
                .padding(10),
        );

        let date_button = button(text(self.date_label()))
            .on_press(Message::ChooseDate)
            .padding(10);
        let date = labeled(
            "Date",
            date_picker(
                self.show_date_picker,
                self.date_field,
                date_button,
                Message::CancelDate,
                Message::DatePicked,
            ),
        );

        let submit = button("Submit").on_press(Message::Submit).padding(10);

        let mut content = column![title].spacing(16).padding(32).max_width(720);

        if let Some(message) = self.draft.error() {
            content = content.push(text(message.to_string()).style(text::danger));
        }

        content
            .push(dropzone::view(self.draft.images()))
            .push(description)
            .push(venue)
            .push(date)
            .push(submit)
            .into()
    }

    /// Label for the date button: the chosen date, or a prompt
    fn date_label(&self) -> String {
        match self.draft.date() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => "Pick a date".to_string(),
        }
    }
}

/// A caption above a form field
fn labeled<'a>(
    label: &'a str,
    field: impl Into<Element<'a, Message>>,
) -> Column<'a, Message> {
    column![text(label), field.into()].spacing(6)
}

/// Text of the editor buffer without the trailing newline the editor
/// always reports, so an untouched buffer counts as empty
fn editor_text(content: &text_editor::Content) -> String {
    let mut text = content.text();
    if text.ends_with('\n') {
        text.pop();
    }
    text
}
