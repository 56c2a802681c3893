use std::path::PathBuf;

use codejournal_lib::Controller;
use iced::{
    Element, Length, Task,
    widget::{button, column, container, row, space, text, text_editor, text_input},
};
use rfd::AsyncFileDialog;

use crate::components::{Action, photo_label};

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "avif"];

/// Editor state for the notes field. The controller owns the text, this keeps the cursor and
/// selection between frames.
#[derive(Debug, Default)]
pub struct Notes {
    content: text_editor::Content,
    /// The notes the editor last agreed on with the controller
    synced: String,
}

impl Notes {
    /// Reload the editor if the controller's notes changed without going through it.
    pub fn sync(&mut self, notes: &str) {
        if self.synced != notes {
            self.content = text_editor::Content::with_text(notes);
            self.synced = notes.to_owned();
        }
    }

    fn perform(&mut self, action: text_editor::Action) -> Option<String> {
        let is_edit = action.is_edit();
        self.content.perform(action);

        is_edit.then(|| {
            self.synced = self.content.text();
            self.synced.clone()
        })
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    TitleChanged(String),
    PhotoUrlChanged(String),
    NotesEdited(text_editor::Action),
    ChooseImagePressed,
    ImagePicked(Option<PathBuf>),
    DeletePressed,
    SavePressed,
}

pub fn update(controller: &mut Controller, notes: &mut Notes, message: Message) -> Action<Message> {
    match message {
        Message::TitleChanged(title) => {
            controller.set_title(title);
            Action::None
        }
        Message::PhotoUrlChanged(url) => {
            controller.set_photo_url(url);
            Action::None
        }
        Message::NotesEdited(action) => {
            if let Some(text) = notes.perform(action) {
                controller.set_notes(text);
            }
            Action::None
        }
        Message::ChooseImagePressed => Action::Run(Task::perform(
            async {
                AsyncFileDialog::new()
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::ImagePicked,
        )),
        Message::ImagePicked(path) => match path {
            Some(path) => Action::from_result(controller.import_image(&path)),
            None => Action::None,
        },
        Message::DeletePressed => {
            controller.request_delete();
            Action::None
        }
        Message::SavePressed => Action::from_result(controller.submit()),
    }
}

pub fn view<'a>(controller: &'a Controller, notes: &'a Notes) -> Element<'a, Message> {
    let form = controller.form();

    let photo: Element<'_, Message> = if form.photo_url.is_empty() {
        text("No image yet").into()
    } else {
        text(photo_label(&form.photo_url)).into()
    };

    let drop_style = if controller.dragging() {
        container::rounded_box
    } else {
        container::bordered_box
    };
    let drop_hint = if controller.dragging() {
        "Drop the image to use it"
    } else {
        "Drag & drop an image here,"
    };

    let dropzone = container(
        column![
            text(drop_hint),
            text("or paste a URL in the field."),
            photo,
            button("Choose image…").on_press(Message::ChooseImagePressed),
        ]
        .spacing(8),
    )
    .padding(16)
    .width(Length::FillPortion(1))
    .style(drop_style);

    let fields = column![
        text("Title"),
        text_input("", &form.title).on_input(Message::TitleChanged),
        text("Photo URL"),
        text_input("", &form.photo_url).on_input(Message::PhotoUrlChanged),
    ]
    .spacing(8)
    .width(Length::FillPortion(1));

    let delete_button: Element<'_, Message> = if controller.is_editing() {
        button("Delete Entry")
            .style(button::danger)
            .on_press(Message::DeletePressed)
            .into()
    } else {
        space::horizontal().into()
    };

    column![
        text(controller.form_heading()).size(28),
        row![dropzone, fields].spacing(16),
        text("Notes"),
        text_editor(&notes.content)
            .on_action(Message::NotesEdited)
            .height(Length::Fixed(200.0)),
        row![
            delete_button,
            space::horizontal(),
            button("SAVE")
                .style(button::primary)
                .on_press_maybe(form.is_valid().then_some(Message::SavePressed)),
        ],
    ]
    .spacing(12)
    .padding(20)
    .into()
}
