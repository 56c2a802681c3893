use codejournal_lib::image;
use iced::Task;

pub mod delete_modal;
pub mod entries;
pub mod entry_form;
pub mod header;
pub mod home;
pub mod login;

/// Action used for communicating with the parent component
#[derive(Debug)]
pub enum Action<M> {
    None,
    Run(Task<M>),
    Failed(String),
}

impl<M> Action<M> {
    /// Report the outcome of a controller call that has no follow-up work.
    pub fn from_result<T, E: ToString>(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => Action::None,
            Err(e) => Action::Failed(e.to_string()),
        }
    }
}

/// What to show in place of an entry's photo. Inline images are summarised rather than dumped.
pub fn photo_label(photo_url: &str) -> String {
    if image::is_data_url(photo_url) {
        let mime = photo_url
            .trim_start_matches("data:")
            .split(';')
            .next()
            .unwrap_or_default();
        format!("Embedded {mime}")
    } else {
        photo_url.into()
    }
}
