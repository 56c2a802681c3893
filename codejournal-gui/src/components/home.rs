use codejournal_lib::{Controller, controller::SLIDES};
use iced::{
    Element, Length,
    widget::{Row, button, column, container, row, scrollable, space, text},
};

use crate::components::Action;

const FEATURES: [(&str, &str); 4] = [
    (
        "Create entries",
        "Quickly add new blog-style posts with a title, image, and notes about what you learned or built.",
    ),
    (
        "Read your journal",
        "Browse your previous entries in a clean, card-based layout to revisit old ideas and patterns.",
    ),
    (
        "Update posts",
        "Edit any entry when you learn a better approach or want to add more context to your notes.",
    ),
    (
        "Delete entries",
        "Clean up your journal by removing entries that you no longer need, with a safety confirmation step.",
    ),
];

#[derive(Debug, Clone)]
pub enum Message {
    StartNewEntry,
    ViewEntries,
    NextSlide,
    PrevSlide,
    SlideSelected(usize),
}

pub fn update(controller: &mut Controller, message: Message) -> Action<Message> {
    match message {
        Message::StartNewEntry => controller.start_new_entry(),
        Message::ViewEntries => controller.view_entries(),
        Message::NextSlide => controller.next_slide(),
        Message::PrevSlide => controller.prev_slide(),
        Message::SlideSelected(index) => controller.select_slide(index),
    }

    Action::None
}

pub fn view(controller: &Controller) -> Element<'_, Message> {
    let hero = column![
        text("Welcome to Code Journal"),
        text("A simple place to track your coding ideas, experiments, and progress.").size(32),
        text(
            "Create blog-style entries for bugs you solved, concepts you learned, or projects \
             you're building. Come back later to review and refine."
        ),
        row![
            button("Start a new entry")
                .style(button::primary)
                .on_press(Message::StartNewEntry),
            button("View your entries")
                .style(button::secondary)
                .on_press(Message::ViewEntries),
        ]
        .spacing(8),
    ]
    .spacing(12)
    .width(Length::FillPortion(1));

    let features = Row::with_children(FEATURES.iter().map(|(heading, body)| {
        container(column![text(*heading).size(18), text(*body)].spacing(6))
            .padding(12)
            .width(Length::FillPortion(1))
            .style(container::rounded_box)
            .into()
    }))
    .spacing(12);

    scrollable(
        column![
            row![hero, carousel(controller)].spacing(24),
            text("What you can do").size(24),
            text("Code Journal is built around a simple, powerful set of features:"),
            features,
        ]
        .spacing(16)
        .padding(20),
    )
    .into()
}

fn carousel(controller: &Controller) -> Element<'_, Message> {
    let carousel = controller.carousel();
    let slide = carousel.slide();

    let dots = Row::with_children((0..SLIDES.len()).map(|index| {
        let style = if index == carousel.index() {
            button::primary
        } else {
            button::subtle
        };

        button(text(if index == carousel.index() { "●" } else { "○" }))
            .style(style)
            .on_press(Message::SlideSelected(index))
            .into()
    }))
    .spacing(4);

    container(
        column![
            text(slide.image_url),
            text(slide.title).size(20),
            text(slide.text),
            row![
                button("‹").on_press(Message::PrevSlide),
                space::horizontal(),
                dots,
                space::horizontal(),
                button("›").on_press(Message::NextSlide),
            ],
        ]
        .spacing(8),
    )
    .padding(16)
    .width(Length::FillPortion(1))
    .style(container::rounded_box)
    .into()
}
