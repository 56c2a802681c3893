use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::repository::{Entry, UnsavedEntry};

/// One of the required inputs of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum FormField {
    #[strum(to_string = "title")]
    Title,
    #[strum(to_string = "photo URL")]
    PhotoUrl,
    #[strum(to_string = "notes")]
    Notes,
}

/// The form was submitted with required fields left blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required fields: {}", join(.missing))]
pub struct FormError {
    pub missing: Vec<FormField>,
}

fn join(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Current contents of the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub title: String,
    pub photo_url: String,
    pub notes: String,
}

impl EntryForm {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            photo_url: entry.photo_url.clone(),
            notes: entry.notes.clone(),
        }
    }

    /// Reset every field
    pub fn clear(&mut self) {
        self.title.clear();
        self.photo_url.clear();
        self.notes.clear();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::PhotoUrl => &self.photo_url,
            FormField::Notes => &self.notes,
        }
    }

    /// Fields that are empty or only whitespace.
    pub fn missing(&self) -> Vec<FormField> {
        FormField::iter()
            .filter(|f| self.field(*f).trim().is_empty())
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn validate(&self) -> Result<UnsavedEntry, FormError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(FormError { missing });
        }

        Ok(UnsavedEntry {
            title: self.title.clone(),
            photo_url: self.photo_url.clone(),
            notes: self.notes.clone(),
        })
    }
}

impl From<UnsavedEntry> for EntryForm {
    fn from(unsaved: UnsavedEntry) -> Self {
        Self {
            title: unsaved.title,
            photo_url: unsaved.photo_url,
            notes: unsaved.notes,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        let form = EntryForm {
            title: "Traits".into(),
            photo_url: "https://example.com/t.png".into(),
            notes: "Blanket impls".into(),
        };

        assert_eq!(
            form.validate().unwrap(),
            UnsavedEntry::new("Traits", "https://example.com/t.png", "Blanket impls")
        );
    }

    #[test]
    fn test_validate_missing() {
        let form = EntryForm {
            title: "   ".into(),
            photo_url: "p".into(),
            notes: String::new(),
        };

        let err = form.validate().unwrap_err();

        assert_eq!(err.missing, vec![FormField::Title, FormField::Notes]);
        assert_eq!(err.to_string(), "Missing required fields: title, notes");
    }

    #[test]
    fn test_from_entry_and_clear() {
        let entry = Entry {
            entry_id: 7,
            title: "t".into(),
            photo_url: "p".into(),
            notes: "n".into(),
        };

        let mut form = EntryForm::from_entry(&entry);
        assert_eq!(form.validate().unwrap(), entry.unsaved());

        form.clear();
        assert_eq!(form, EntryForm::default());
        assert!(!form.is_valid());
    }
}
