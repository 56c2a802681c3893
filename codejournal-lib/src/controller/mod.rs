//! UI state for the journal and the transitions between views.
//!
//! The [`Controller`] is the only thing front ends mutate. Presentation code reads its getters
//! and calls one transition method per user action; the controller talks to the
//! [`Repository`] and keeps an in-memory snapshot of the entries in display order.

use std::path::Path;

use getset::{CopyGetters, Getters};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::debug;

use crate::{
    image,
    repository::{self, Entry, EntryId, Repository},
};

mod form;
mod hero;

pub use form::{EntryForm, FormError, FormField};
pub use hero::{Carousel, SLIDES, Slide};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Repository(#[from] repository::Error),
    #[error(transparent)]
    Image(#[from] image::Error),
}

/// The mutually exclusive screens of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum View {
    #[default]
    Home,
    Entries,
    EntryForm,
    Login,
}

#[derive(Debug, Getters, CopyGetters)]
pub struct Controller {
    repo: Repository,
    #[getset(get_copy = "pub")]
    view: View,
    /// Newest first
    #[getset(get = "pub")]
    entries: Vec<Entry>,
    #[getset(get = "pub")]
    form: EntryForm,
    /// The entry the form is editing, if any
    #[getset(get_copy = "pub")]
    editing: Option<EntryId>,
    #[getset(get_copy = "pub")]
    show_delete_modal: bool,
    #[getset(get_copy = "pub")]
    dark_mode: bool,
    /// A file is being dragged over the window
    #[getset(get_copy = "pub")]
    dragging: bool,
    #[getset(get_copy = "pub")]
    carousel: Carousel,
}

impl Controller {
    pub fn new(repo: Repository) -> Self {
        let mut entries = repo.entries();
        entries.reverse();

        Self {
            repo,
            view: View::default(),
            entries,
            form: EntryForm::default(),
            editing: None,
            show_delete_modal: false,
            dark_mode: false,
            dragging: false,
            carousel: Carousel::default(),
        }
    }

    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn form_heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Entry"
        } else {
            "New Entry"
        }
    }

    // Navigation

    /// Header navigation. Leaves any entry that was being edited, along with its delete prompt.
    pub fn navigate(&mut self, view: View) {
        debug!("Navigating to {view}");
        self.view = view;
        self.editing = None;
        self.show_delete_modal = false;
    }

    /// Show the entry list without touching the form.
    pub fn view_entries(&mut self) {
        self.view = View::Entries;
    }

    /// Open an empty form for a new entry.
    pub fn start_new_entry(&mut self) {
        self.form.clear();
        self.editing = None;
        self.show_delete_modal = false;
        self.view = View::EntryForm;
    }

    /// Open the form pre-filled with entry `id`. Unknown identifiers are ignored.
    pub fn start_edit(&mut self, id: EntryId) {
        let Some(entry) = self.entries.iter().find(|e| e.entry_id == id) else {
            debug!("Cannot edit missing entry {id}");
            return;
        };

        self.form = EntryForm::from_entry(entry);
        self.editing = Some(id);
        self.view = View::EntryForm;
    }

    /// Both sign in buttons pretend the login succeeded.
    pub fn login_continue(&mut self) {
        self.view = View::Entries;
    }

    pub fn login_sign_up(&mut self) {
        self.view = View::EntryForm;
    }

    // Form

    pub fn set_title(&mut self, title: String) {
        self.form.title = title;
    }

    pub fn set_photo_url(&mut self, photo_url: String) {
        self.form.photo_url = photo_url;
    }

    pub fn set_notes(&mut self, notes: String) {
        self.form.notes = notes;
    }

    /// Save the form as a new entry or as an update of the entry being edited, then return to
    /// the entry list. Nothing changes if a required field is blank.
    pub fn submit(&mut self) -> Result<Entry> {
        let unsaved = self.form.validate()?;

        let saved = match self.editing {
            None => {
                let saved = self.repo.add_entry(unsaved)?;
                self.entries.insert(0, saved.clone());
                saved
            }
            Some(entry_id) => {
                let updated = Entry {
                    entry_id,
                    title: unsaved.title,
                    photo_url: unsaved.photo_url,
                    notes: unsaved.notes,
                };
                self.repo.update_entry(&updated)?;
                if let Some(existing) = self.entries.iter_mut().find(|e| e.entry_id == entry_id) {
                    existing.clone_from(&updated);
                }
                self.editing = None;
                updated
            }
        };

        self.form.clear();
        self.view = View::Entries;

        Ok(saved)
    }

    // Deletion

    /// Ask for confirmation before deleting the entry being edited.
    pub fn request_delete(&mut self) {
        if self.is_editing() {
            self.show_delete_modal = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.show_delete_modal = false;
    }

    /// Delete the entry being edited and return to the entry list.
    pub fn confirm_delete(&mut self) -> Result<()> {
        let Some(entry_id) = self.editing else {
            return Ok(());
        };

        self.repo.remove_entry(entry_id)?;
        self.entries.retain(|e| e.entry_id != entry_id);

        self.editing = None;
        self.show_delete_modal = false;
        self.form.clear();
        self.view = View::Entries;

        Ok(())
    }

    // Appearance

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    pub fn next_slide(&mut self) {
        self.carousel.next();
    }

    pub fn prev_slide(&mut self) {
        self.carousel.prev();
    }

    pub fn select_slide(&mut self, index: usize) {
        self.carousel.select(index);
    }

    // Images

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Use the image at `path` as the photo. Returns `false` and leaves the form alone if the
    /// file isn't an image.
    pub fn import_image(&mut self, path: &Path) -> Result<bool> {
        match image::data_url(path)? {
            Some(url) => {
                self.form.photo_url = url;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// A file was dropped onto the window.
    pub fn drop_image(&mut self, path: &Path) -> Result<bool> {
        self.dragging = false;
        self.import_image(path)
    }

    /// Re-read the entries from storage, keeping the rest of the state.
    pub fn reload(&mut self) {
        let mut entries = self.repo.entries();
        entries.reverse();
        self.entries = entries;
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::tempdir;

    use super::*;
    use crate::repository::UnsavedEntry;

    fn fill(controller: &mut Controller, title: &str) {
        controller.set_title(title.into());
        controller.set_photo_url("https://example.com/p.png".into());
        controller.set_notes("notes".into());
    }

    fn titles(controller: &Controller) -> Vec<&str> {
        controller
            .entries()
            .iter()
            .map(|e| e.title.as_str())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let controller = Controller::new(Repository::in_memory());

        assert_eq!(controller.view(), View::Home);
        assert!(controller.entries().is_empty());
        assert!(!controller.show_delete_modal());
        assert_eq!(controller.form_heading(), "New Entry");
    }

    #[test]
    fn test_loads_newest_first() {
        let repo = Repository::in_memory();
        repo.add_entry(UnsavedEntry::new("old", "p", "n")).unwrap();
        repo.add_entry(UnsavedEntry::new("new", "p", "n")).unwrap();

        let controller = Controller::new(repo);

        assert_eq!(titles(&controller), ["new", "old"]);
    }

    #[test]
    fn test_create() {
        let repo = Repository::in_memory();
        let mut controller = Controller::new(repo.clone());

        controller.start_new_entry();
        assert_eq!(controller.view(), View::EntryForm);

        fill(&mut controller, "first");
        let first = controller.submit().unwrap();
        controller.start_new_entry();
        fill(&mut controller, "second");
        controller.submit().unwrap();

        assert_eq!(first.entry_id, 1);
        assert_eq!(controller.view(), View::Entries);
        assert_eq!(controller.form(), &EntryForm::default());
        assert_eq!(titles(&controller), ["second", "first"]);
        assert_eq!(repo.entries().len(), 2);
    }

    #[test]
    fn test_submit_invalid() {
        let repo = Repository::in_memory();
        let mut controller = Controller::new(repo.clone());

        controller.start_new_entry();
        controller.set_title("only a title".into());

        let err = controller.submit().unwrap_err();

        assert!(matches!(
            err,
            Error::Form(FormError { ref missing }) if missing == &[FormField::PhotoUrl, FormField::Notes]
        ));
        assert_eq!(controller.view(), View::EntryForm);
        assert_eq!(controller.form().title, "only a title");
        assert!(repo.entries().is_empty());
    }

    #[test]
    fn test_edit() {
        let repo = Repository::in_memory();
        repo.add_entry(UnsavedEntry::new("a", "p", "n")).unwrap();
        let b = repo.add_entry(UnsavedEntry::new("b", "p2", "n2")).unwrap();
        let mut controller = Controller::new(repo.clone());

        controller.start_edit(b.entry_id);

        assert_eq!(controller.view(), View::EntryForm);
        assert_eq!(controller.editing(), Some(b.entry_id));
        assert_eq!(controller.form_heading(), "Edit Entry");
        assert_eq!(controller.form(), &EntryForm::from_entry(&b));

        controller.set_title("b, revised".into());
        let updated = controller.submit().unwrap();

        assert_eq!(updated.entry_id, b.entry_id);
        assert_eq!(controller.editing(), None);
        assert_eq!(controller.view(), View::Entries);
        assert_eq!(titles(&controller), ["b, revised", "a"]);
        assert_eq!(repo.entry(b.entry_id).unwrap().title, "b, revised");
        assert_eq!(repo.entries().len(), 2);
    }

    #[test]
    fn test_edit_missing() {
        let mut controller = Controller::new(Repository::in_memory());

        controller.start_edit(99);

        assert_eq!(controller.view(), View::Home);
        assert_eq!(controller.editing(), None);
    }

    #[test]
    fn test_new_entry_clears_edit() {
        let repo = Repository::in_memory();
        let a = repo.add_entry(UnsavedEntry::new("a", "p", "n")).unwrap();
        let mut controller = Controller::new(repo);

        controller.start_edit(a.entry_id);
        controller.start_new_entry();

        assert_eq!(controller.editing(), None);
        assert_eq!(controller.form(), &EntryForm::default());
        assert_eq!(controller.form_heading(), "New Entry");
    }

    #[test]
    fn test_navigate_clears_target() {
        let repo = Repository::in_memory();
        let a = repo.add_entry(UnsavedEntry::new("a", "p", "n")).unwrap();
        let mut controller = Controller::new(repo);

        controller.start_edit(a.entry_id);
        controller.navigate(View::Login);

        assert_eq!(controller.view(), View::Login);
        assert_eq!(controller.editing(), None);

        controller.login_continue();
        assert_eq!(controller.view(), View::Entries);

        controller.login_sign_up();
        assert_eq!(controller.view(), View::EntryForm);
    }

    #[test]
    fn test_delete_flow() {
        let repo = Repository::in_memory();
        let a = repo.add_entry(UnsavedEntry::new("a", "p", "n")).unwrap();
        repo.add_entry(UnsavedEntry::new("b", "p", "n")).unwrap();
        let mut controller = Controller::new(repo.clone());

        controller.start_edit(a.entry_id);
        controller.request_delete();
        assert!(controller.show_delete_modal());
        assert_eq!(controller.view(), View::EntryForm);

        controller.cancel_delete();
        assert!(!controller.show_delete_modal());
        assert_eq!(controller.editing(), Some(a.entry_id));

        controller.request_delete();
        controller.confirm_delete().unwrap();

        assert!(!controller.show_delete_modal());
        assert_eq!(controller.view(), View::Entries);
        assert_eq!(controller.editing(), None);
        assert_eq!(titles(&controller), ["b"]);
        assert_eq!(repo.entry(a.entry_id), None);
    }

    #[test]
    fn test_leaving_form_closes_delete_prompt() {
        let repo = Repository::in_memory();
        let a = repo.add_entry(UnsavedEntry::new("a", "p", "n")).unwrap();
        let mut controller = Controller::new(repo.clone());

        controller.start_edit(a.entry_id);
        controller.request_delete();
        controller.navigate(View::Home);

        assert!(!controller.show_delete_modal());
        assert_eq!(controller.editing(), None);

        controller.start_edit(a.entry_id);
        controller.request_delete();
        controller.start_new_entry();

        assert!(!controller.show_delete_modal());
        assert_eq!(repo.entries().len(), 1);
    }

    #[test]
    fn test_delete_requires_target() {
        let repo = Repository::in_memory();
        repo.add_entry(UnsavedEntry::new("a", "p", "n")).unwrap();
        let mut controller = Controller::new(repo.clone());

        controller.start_new_entry();
        controller.request_delete();
        assert!(!controller.show_delete_modal());

        controller.confirm_delete().unwrap();
        assert_eq!(repo.entries().len(), 1);
        assert_eq!(controller.view(), View::EntryForm);
    }

    #[test]
    fn test_multiline_notes() {
        let repo = Repository::in_memory();
        let mut controller = Controller::new(repo.clone());

        controller.start_new_entry();
        controller.set_title("t".into());
        controller.set_photo_url("p".into());
        controller.set_notes("line one\n\nline three".into());
        let entry = controller.submit().unwrap();

        assert_eq!(repo.entry(entry.entry_id).unwrap().notes, "line one\n\nline three");
    }

    #[test]
    fn test_appearance() {
        let mut controller = Controller::new(Repository::in_memory()).with_dark_mode(true);

        controller.toggle_dark_mode();
        assert!(!controller.dark_mode());

        controller.prev_slide();
        assert_eq!(controller.carousel().index(), 2);
        controller.next_slide();
        controller.select_slide(1);
        assert_eq!(controller.carousel().index(), 1);
    }

    #[test]
    fn test_drop_image() {
        let dir = tempdir().unwrap();
        let image = dir.path().join("shot.png");
        let text = dir.path().join("notes.txt");
        fs::write(&image, [0x89, b'P', b'N', b'G']).unwrap();
        fs::write(&text, "hello").unwrap();

        let mut controller = Controller::new(Repository::in_memory());
        controller.start_new_entry();
        controller.set_photo_url("https://example.com/old.png".into());

        controller.set_dragging(true);
        assert!(!controller.drop_image(&text).unwrap());
        assert!(!controller.dragging());
        assert_eq!(controller.form().photo_url, "https://example.com/old.png");

        controller.set_dragging(true);
        assert!(controller.drop_image(&image).unwrap());
        assert!(!controller.dragging());
        assert!(controller.form().photo_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_view_names() {
        assert_eq!(View::EntryForm.to_string(), "entry-form");
        assert_eq!("login".parse::<View>().unwrap(), View::Login);
    }

    #[test]
    fn test_reload() {
        let repo = Repository::in_memory();
        let mut controller = Controller::new(repo.clone());

        repo.add_entry(UnsavedEntry::new("external", "p", "n"))
            .unwrap();
        assert!(controller.entries().is_empty());

        controller.reload();
        assert_eq!(titles(&controller), ["external"]);
    }
}
