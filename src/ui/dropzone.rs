use iced::widget::{column, container, image, mouse_area, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::state::data::ImagePreview;
use crate::ui::form::Message;

/// Displayed edge of a preview thumbnail, in logical pixels
const PREVIEW_DISPLAY_PX: f32 = 128.0;

/// The drop/click region with its preview thumbnails
///
/// The whole region is clickable and opens the native file dialog; file
/// drops land here too, via the window events the shell forwards.
pub fn view(previews: &[ImagePreview]) -> Element<'_, Message> {
    let mut content = column![text(
        "Drag & drop your images here, or click to select them."
    )]
    .spacing(12)
    .align_x(Alignment::Center);

    if !previews.is_empty() {
        let thumbnails = previews.iter().fold(row![].spacing(12), |thumbs, preview| {
            thumbs.push(
                image(preview.handle.clone())
                    .width(Length::Fixed(PREVIEW_DISPLAY_PX))
                    .height(Length::Fixed(PREVIEW_DISPLAY_PX))
                    .content_fit(ContentFit::Cover),
            )
        });
        content = content.push(thumbnails);
    }

    mouse_area(
        container(content)
            .style(container::bordered_box)
            .padding(24)
            .center_x(Length::Fill),
    )
    .on_press(Message::PickImages)
    .into()
}
