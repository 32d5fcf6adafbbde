//! Document model types.
//!
//! This module defines the intermediate representation that bridges
//! parsing and rendering. A [`Document`] is an ordered list of body
//! [`Block`]s; the renderer never needs to see the source file.

mod block;
mod document;
mod paragraph;
mod table;
mod transcript;

pub use block::Block;
pub use document::{Document, Metadata};
pub use paragraph::Paragraph;
pub use table::{Table, TableRow};
pub use transcript::{ChatMessage, Transcript};
