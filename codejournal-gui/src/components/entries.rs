use codejournal_lib::{Controller, Entry, EntryId};
use iced::{
    Element, Length,
    widget::{Column, button, column, container, row, scrollable, space, text},
};

use crate::components::{Action, photo_label};

#[derive(Debug, Clone)]
pub enum Message {
    NewEntry,
    Edit(EntryId),
}

pub fn update(controller: &mut Controller, message: Message) -> Action<Message> {
    match message {
        Message::NewEntry => controller.start_new_entry(),
        Message::Edit(id) => controller.start_edit(id),
    }

    Action::None
}

pub fn view(controller: &Controller) -> Element<'_, Message> {
    let header = row![
        text("Your Entries").size(28),
        space::horizontal(),
        button("New Entry")
            .style(button::primary)
            .on_press(Message::NewEntry),
    ];

    let body: Element<'_, Message> = if controller.entries().is_empty() {
        text("No entries yet.").into()
    } else {
        scrollable(
            Column::with_children(controller.entries().iter().map(entry_card)).spacing(12),
        )
        .height(Length::Fill)
        .into()
    };

    column![header, body].spacing(16).padding(20).into()
}

// Generate a card that represents an Entry
fn entry_card(entry: &Entry) -> Element<'_, Message> {
    container(
        column![
            row![
                text(&entry.title).size(20),
                space::horizontal(),
                button("Edit")
                    .style(button::subtle)
                    .on_press(Message::Edit(entry.entry_id)),
            ],
            text(photo_label(&entry.photo_url)).size(12),
            text(&entry.notes),
        ]
        .spacing(6),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}
