use iced::event::{self, Event};
use iced::theme::Palette;
use iced::{color, window, Element, Size, Subscription, Task, Theme};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod images;
pub mod router;
pub mod sink;
pub mod state;
pub mod ui;

use router::Route;
use sink::DiagnosticSink;
use ui::form::{self, FormPage};

/// Main application state
struct AchievementEntry {
    /// Screen currently mounted by the shell
    route: Route,
    /// The achievement form, the only screen today
    form: FormPage,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// A message for the form screen
    Form(form::Message),
}

impl AchievementEntry {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Single-page shell: mount the home route
        let route = Route::parse("/").unwrap_or_default();
        tracing::info!(route = route.path(), "achievement entry initialized");

        let form = FormPage::new(Box::new(DiagnosticSink));

        (AchievementEntry { route, form }, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Form(message) => match self.route {
                Route::Home => self.form.update(message).map(Message::Form),
            },
        }
    }

    /// Build the user interface for the mounted route
    fn view(&self) -> Element<'_, Message> {
        match self.route {
            Route::Home => self.form.view().map(Message::Form),
        }
    }

    /// Forward window file-drop events to the form
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(path)) => {
                Some(Message::Form(form::Message::FileHovered(path)))
            }
            Event::Window(window::Event::FileDropped(path)) => {
                Some(Message::Form(form::Message::FileDropped(path)))
            }
            Event::Window(window::Event::FilesHoveredLeft) => {
                Some(Message::Form(form::Message::FilesHoveredLeft))
            }
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::custom(
            "Achievements".to_string(),
            Palette {
                background: color!(0xfafafa),
                text: color!(0x1f2933),
                primary: color!(0x006d5b),
                success: color!(0x2e7d32),
                danger: color!(0xc62828),
            },
        )
    }
}

fn main() -> iced::Result {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "achievement_entry=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    iced::application(
        "Achievements",
        AchievementEntry::update,
        AchievementEntry::view,
    )
    .subscription(AchievementEntry::subscription)
    .theme(AchievementEntry::theme)
    .window_size(Size::new(760.0, 900.0))
    .centered()
    .run_with(AchievementEntry::new)
}
