use std::path::PathBuf;

use codejournal_lib::{Controller, Repository, View};
use iced::{
    Color, Element, Event, Length, Subscription, Task, Theme, application, event,
    widget::{button, center, column, container, mouse_area, opaque, row, space, stack, text},
    window,
};
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::{Action, delete_modal, entries, entry_form, header, home, login},
    config::GuiConfig,
};

pub mod components;
pub mod config;

fn main() -> iced::Result {
    // Human friendly panicking in release mode
    human_panic::setup_panic!();

    // Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
    }

    application(App::new, App::update, App::view)
        .theme(App::theme)
        .title(App::title)
        .subscription(App::subscription)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    Header(header::Message),
    Home(home::Message),
    Entries(entries::Message),
    EntryForm(entry_form::Message),
    Login(login::Message),
    DeleteModal(delete_modal::Message),
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    ErrorDismissed,
}

struct App {
    title: String,
    cfg: GuiConfig,
    controller: Controller,
    notes: entry_form::Notes,
    /// Last failure reported by the controller
    error: Option<String>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let cfg = GuiConfig::load();

        let (repo, error) = match Repository::new() {
            Ok(repo) => (repo, None),
            Err(e) => {
                error!("Failed to open the journal: {e}");
                (
                    Repository::in_memory(),
                    Some(format!("{e}. Entries will not be saved.")),
                )
            }
        };

        let controller = Controller::new(repo).with_dark_mode(cfg.dark_mode);

        (
            Self {
                title: "Code Journal".into(),
                cfg,
                controller,
                notes: entry_form::Notes::default(),
                error,
            },
            Task::none(),
        )
    }

    // Update application state based on messages passed by view()
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.dispatch(message);
        // Opening, saving or deleting an entry replaces the notes under the editor
        self.notes.sync(&self.controller.form().notes);
        task
    }

    fn dispatch(&mut self, message: Message) -> Task<Message> {
        let controller = &mut self.controller;

        match message {
            // Redirect messages to relevant child components
            Message::Header(msg) => {
                let toggled = matches!(msg, header::Message::DarkModeToggled);
                let action = header::update(controller, msg);
                if toggled {
                    self.save_dark_mode();
                }
                self.handle(action, Message::Header)
            }
            Message::Home(msg) => {
                let action = home::update(controller, msg);
                self.handle(action, Message::Home)
            }
            Message::Entries(msg) => {
                let action = entries::update(controller, msg);
                self.handle(action, Message::Entries)
            }
            Message::EntryForm(msg) => {
                let action = entry_form::update(controller, &mut self.notes, msg);
                self.handle(action, Message::EntryForm)
            }
            Message::Login(msg) => {
                let action = login::update(controller, msg);
                self.handle(action, Message::Login)
            }
            Message::DeleteModal(msg) => {
                let action = delete_modal::update(controller, msg);
                self.handle(action, Message::DeleteModal)
            }
            // Dropping only makes sense while the form is open
            Message::FileHovered => {
                if controller.view() == View::EntryForm {
                    controller.set_dragging(true);
                }
                Task::none()
            }
            Message::FilesHoveredLeft => {
                controller.set_dragging(false);
                Task::none()
            }
            Message::FileDropped(path) => {
                if controller.view() == View::EntryForm {
                    let result = controller.drop_image(&path);
                    self.handle(Action::from_result(result), Message::EntryForm)
                } else {
                    Task::none()
                }
            }
            Message::ErrorDismissed => {
                self.error = None;
                Task::none()
            }
        }
    }

    // Render the application and pass along messages from components to update()
    pub fn view(&self) -> Element<'_, Message> {
        let controller = &self.controller;

        let page = match controller.view() {
            View::Home => home::view(controller).map(Message::Home),
            View::Entries => entries::view(controller).map(Message::Entries),
            View::EntryForm => entry_form::view(controller, &self.notes).map(Message::EntryForm),
            View::Login => login::view(controller).map(Message::Login),
        };

        let mut content = column![header::view(controller).map(Message::Header)];

        if let Some(error) = &self.error {
            content = content.push(
                container(
                    row![
                        text(error),
                        space::horizontal(),
                        button("Dismiss")
                            .style(button::text)
                            .on_press(Message::ErrorDismissed),
                    ]
                    .padding(8),
                )
                .width(Length::Fill)
                .style(container::bordered_box),
            );
        }

        let content = content.push(page).height(Length::Fill);

        if controller.show_delete_modal() {
            modal(content, delete_modal::view().map(Message::DeleteModal), None)
        } else {
            content.into()
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn theme(&self) -> Theme {
        config::theme(self.controller.dark_mode())
    }

    fn handle<M>(&mut self, action: Action<M>, wrap: fn(M) -> Message) -> Task<Message>
    where
        M: Send + 'static,
    {
        match action {
            Action::None => Task::none(),
            Action::Run(task) => task.map(wrap),
            Action::Failed(e) => {
                warn!("{e}");
                self.error = Some(e);
                Task::none()
            }
        }
    }

    fn save_dark_mode(&mut self) {
        self.cfg.dark_mode = self.controller.dark_mode();
        if let Err(e) = self.cfg.save() {
            warn!("Failed to save GUI configuration: {e}");
        }
    }
}

pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_click_outside: Option<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let mouse_area = mouse_area(center(opaque(content)).style(|_theme| {
        container::Style {
            background: Some(
                Color {
                    a: 0.8,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        }
    }));

    stack![
        base.into(),
        opaque(if let Some(msg) = on_click_outside {
            mouse_area.on_press(msg)
        } else {
            mouse_area
        })
    ]
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
