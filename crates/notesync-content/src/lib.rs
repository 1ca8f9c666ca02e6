//! Conversion between local text files and note markup
//!
//! Local notes are plain text or markdown; remote notes are stored as an
//! ENML-style XHTML document. This crate provides the [`Transcoder`] seam used
//! by the reconciliation engine and [`NoteMarkup`], its default implementation.

pub mod error;
pub mod format;
pub mod markup;
pub mod sanitize;

pub use error::{Error, Result};
pub use format::Format;
pub use markup::{NoteMarkup, Transcoder};
pub use sanitize::strip_control_chars;
