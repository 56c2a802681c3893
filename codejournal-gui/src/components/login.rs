use codejournal_lib::Controller;
use iced::{
    Element,
    widget::{button, center, column, container, row, text, text_input},
};

use crate::components::Action;

// There is no account system behind this view; every way out of it just navigates.
#[derive(Debug, Clone)]
pub enum Message {
    ContinueWithGooglePressed,
    ContinuePressed,
    SignUpPressed,
}

pub fn update(controller: &mut Controller, message: Message) -> Action<Message> {
    match message {
        Message::ContinueWithGooglePressed | Message::ContinuePressed => {
            controller.login_continue()
        }
        Message::SignUpPressed => controller.login_sign_up(),
    }

    Action::None
}

pub fn view(_controller: &Controller) -> Element<'_, Message> {
    center(
        container(
            column![
                text("Sign in to Code Journal").size(24),
                text("Welcome back! Please sign in to continue."),
                button("G  Continue with Google").on_press(Message::ContinueWithGooglePressed),
                text("or"),
                text("Email address"),
                text_input("you@example.com", ""),
                button("Continue")
                    .style(button::primary)
                    .on_press(Message::ContinuePressed),
                row![
                    text("Don't have an account? "),
                    button("Sign up")
                        .style(button::text)
                        .on_press(Message::SignUpPressed),
                ],
            ]
            .spacing(12),
        )
        .padding(24)
        .width(400)
        .style(container::rounded_box),
    )
    .into()
}
