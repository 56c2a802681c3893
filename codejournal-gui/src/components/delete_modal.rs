use codejournal_lib::Controller;
use iced::{
    Element,
    widget::{button, column, container, row, space, text},
};

use crate::components::Action;

#[derive(Debug, Clone)]
pub enum Message {
    CancelPressed,
    ConfirmPressed,
}

pub fn update(controller: &mut Controller, message: Message) -> Action<Message> {
    match message {
        Message::CancelPressed => {
            controller.cancel_delete();
            Action::None
        }
        Message::ConfirmPressed => Action::from_result(controller.confirm_delete()),
    }
}

pub fn view<'a>() -> Element<'a, Message> {
    container(
        column![
            text("Are you sure you want to delete this entry?"),
            space::vertical(),
            row![
                space::horizontal(),
                button("Cancel")
                    .style(button::secondary)
                    .on_press(Message::CancelPressed),
                button("Confirm")
                    .style(button::danger)
                    .on_press(Message::ConfirmPressed),
            ]
            .spacing(8),
        ]
        .spacing(16),
    )
    .padding(20)
    .width(360)
    .height(160)
    .style(container::rounded_box)
    .into()
}
