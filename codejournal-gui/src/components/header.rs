use codejournal_lib::{Controller, View};
use iced::{
    Element, Length,
    widget::{button, container, row, space, text},
};

use crate::components::Action;

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(View),
    DarkModeToggled,
}

pub fn update(controller: &mut Controller, message: Message) -> Action<Message> {
    match message {
        Message::Navigate(view) => controller.navigate(view),
        Message::DarkModeToggled => controller.toggle_dark_mode(),
    }

    Action::None
}

pub fn view(controller: &Controller) -> Element<'_, Message> {
    let nav = |label: &'static str, view: View| {
        let style = if controller.view() == view {
            button::primary
        } else {
            button::subtle
        };

        button(label)
            .style(style)
            .on_press(Message::Navigate(view))
    };

    let toggle_label = if controller.dark_mode() {
        "Light mode"
    } else {
        "Dark mode"
    };

    container(
        row![
            text("CJ").size(24),
            text("Code Journal").size(20),
            space::horizontal(),
            nav("Home", View::Home),
            nav("Entries", View::Entries),
            nav("Login", View::Login),
            button(toggle_label)
                .style(button::secondary)
                .on_press(Message::DarkModeToggled),
        ]
        .spacing(12),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}
