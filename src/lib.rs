//! Applies partial updates from an updated (remote) HTML [***Document***](https://developer.mozilla.org/en-US/docs/Web/API/Document) onto a live one.
//!
//! Elements are matched by an identifier attribute (`data-update-id` by default) and, per identifier,
//! an [`UpdatePolicy`] decides which attributes to copy and whether to replace inner or outer markup.
//!
//! See [`DocumentUpdater`] for the Rust API and [`js::HtmlDocumentUpdater`] for the [***JavaScript***](https://developer.mozilla.org/en-US/docs/Web/JavaScript) one.

#![doc(html_root_url = "https://docs.rs/html-document-updater/0.1.0")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod collect;
pub mod element_map;
pub mod error;
pub mod identifier;
pub mod input;
pub mod js;
pub mod options;
pub mod updater;

pub use collect::collect_elements;
pub use error::{Error, Result};
pub use identifier::format_update_identifier;
pub use input::DocumentInput;
pub use options::{Options, UpdatePolicy, Updates};
pub use updater::{DocumentUpdater, UpdateReport};
