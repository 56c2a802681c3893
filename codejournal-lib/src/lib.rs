//! Core library for Code Journal.
//!
//! Holds the persisted entry collection, the storage backends it lives in and
//! the view controller shared by the GUI and CLI front ends.

use thiserror::Error;

pub mod controller;
pub mod fs;
pub mod image;
pub mod repository;
pub mod storage;

pub use controller::{Controller, View};
pub use repository::{Entry, EntryId, Repository, UnsavedEntry};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Repository(#[from] repository::Error),
    #[error(transparent)]
    Storage(#[from] storage::Error),
    #[error(transparent)]
    Controller(#[from] controller::Error),
    #[error(transparent)]
    Image(#[from] image::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] repository::config::Error),
}
