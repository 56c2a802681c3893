use std::fmt::{self, Display, Formatter};

use clap::Subcommand;
use codejournal_lib::{
    Entry, EntryId, Repository, UnsavedEntry,
    controller::{EntryForm, FormError},
    repository,
};
use colored::Colorize;
use sysexits::ExitCode;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List entries, newest first
    List,
    /// Print a single entry
    Show { id: EntryId },
    /// Add a new entry
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        photo_url: String,
        #[arg(short, long)]
        notes: String,
    },
    /// Change some fields of an existing entry
    Edit {
        id: EntryId,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        photo_url: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete an entry
    Remove { id: EntryId },
}

#[derive(Debug)]
pub enum Failure {
    NotFound(EntryId),
    NothingToEdit,
    Invalid(FormError),
    Journal(codejournal_lib::Error),
}

impl Failure {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Failure::NotFound(_) => ExitCode::DataErr,
            Failure::NothingToEdit | Failure::Invalid(_) => ExitCode::Usage,
            Failure::Journal(_) => ExitCode::IoErr,
        }
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Failure::NotFound(id) => write!(f, "No entry with id {id}"),
            Failure::NothingToEdit => {
                write!(f, "Nothing to change, pass --title, --photo-url or --notes")
            }
            Failure::Invalid(e) => write!(f, "{e}"),
            Failure::Journal(e) => write!(f, "{e}"),
        }
    }
}

impl From<FormError> for Failure {
    fn from(e: FormError) -> Self {
        Failure::Invalid(e)
    }
}

impl From<repository::Error> for Failure {
    fn from(e: repository::Error) -> Self {
        Failure::Journal(e.into())
    }
}

pub fn handle(repo: &Repository, cmd: &Command) -> Result<(), Failure> {
    match cmd {
        Command::List => {
            let entries = repo.entries();
            if entries.is_empty() {
                println!("{}", "No entries yet.".dimmed());
            }
            for entry in entries.iter().rev() {
                println!("{} {}", format!("#{}", entry.entry_id).cyan(), entry.title.bold());
            }
        }
        Command::Show { id } => {
            let entry = repo.entry(*id).ok_or(Failure::NotFound(*id))?;
            print_entry(&entry);
        }
        Command::Add {
            title,
            photo_url,
            notes,
        } => {
            // Same presence rules as the entry form
            let unsaved = EntryForm::from(UnsavedEntry::new(title, photo_url, notes)).validate()?;

            let entry = repo.add_entry(unsaved)?;
            println!("{} {}", "Added".green(), entry);
        }
        Command::Edit {
            id,
            title,
            photo_url,
            notes,
        } => {
            if title.is_none() && photo_url.is_none() && notes.is_none() {
                return Err(Failure::NothingToEdit);
            }

            let mut entry = repo.entry(*id).ok_or(Failure::NotFound(*id))?;
            if let Some(title) = title {
                entry.title.clone_from(title);
            }
            if let Some(photo_url) = photo_url {
                entry.photo_url.clone_from(photo_url);
            }
            if let Some(notes) = notes {
                entry.notes.clone_from(notes);
            }
            EntryForm::from_entry(&entry).validate()?;

            if !repo.update_entry(&entry)? {
                return Err(Failure::NotFound(*id));
            }
            println!("{} {}", "Updated".green(), entry);
        }
        Command::Remove { id } => {
            if !repo.remove_entry(*id)? {
                return Err(Failure::NotFound(*id));
            }
            println!("{} #{id}", "Removed".green());
        }
    }

    Ok(())
}

fn print_entry(entry: &Entry) {
    println!("{}", entry.to_string().bold());
    println!("{} {}", "Photo:".dimmed(), entry.photo_url);
    println!();
    println!("{}", entry.notes);
}

#[cfg(test)]
mod test {
    use super::*;

    fn add(repo: &Repository, title: &str) {
        handle(
            repo,
            &Command::Add {
                title: title.into(),
                photo_url: "https://example.com/p.png".into(),
                notes: "notes".into(),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_add_and_show() {
        let repo = Repository::in_memory();

        add(&repo, "first");

        assert_eq!(repo.entry(1).unwrap().title, "first");
        handle(&repo, &Command::Show { id: 1 }).unwrap();
        handle(&repo, &Command::List).unwrap();
    }

    #[test]
    fn test_add_blank() {
        let repo = Repository::in_memory();

        let failure = handle(
            &repo,
            &Command::Add {
                title: " ".into(),
                photo_url: "p".into(),
                notes: "n".into(),
            },
        )
        .unwrap_err();

        assert!(matches!(failure, Failure::Invalid(_)));
        assert!(matches!(failure.exit_code(), ExitCode::Usage));
        assert!(repo.entries().is_empty());
    }

    #[test]
    fn test_edit_some_fields() {
        let repo = Repository::in_memory();
        add(&repo, "first");

        handle(
            &repo,
            &Command::Edit {
                id: 1,
                title: Some("renamed".into()),
                photo_url: None,
                notes: None,
            },
        )
        .unwrap();

        let entry = repo.entry(1).unwrap();
        assert_eq!(entry.title, "renamed");
        assert_eq!(entry.notes, "notes");
    }

    #[test]
    fn test_edit_nothing() {
        let repo = Repository::in_memory();
        add(&repo, "first");

        let failure = handle(
            &repo,
            &Command::Edit {
                id: 1,
                title: None,
                photo_url: None,
                notes: None,
            },
        )
        .unwrap_err();

        assert!(matches!(failure, Failure::NothingToEdit));
    }

    #[test]
    fn test_missing_ids() {
        let repo = Repository::in_memory();
        add(&repo, "first");

        handle(&repo, &Command::Remove { id: 1 }).unwrap();

        for cmd in [
            Command::Show { id: 1 },
            Command::Remove { id: 1 },
            Command::Edit {
                id: 1,
                title: Some("x".into()),
                photo_url: None,
                notes: None,
            },
        ] {
            let failure = handle(&repo, &cmd).unwrap_err();
            assert!(matches!(failure, Failure::NotFound(1)));
            assert!(matches!(failure.exit_code(), ExitCode::DataErr));
        }
    }
}
