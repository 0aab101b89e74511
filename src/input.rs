use crate::error::{Error, Result};
use tracing::{instrument, trace};
use web_sys::{Document, DomParser, SupportedType};

/// Either an already parsed [***Document***](https://developer.mozilla.org/en-US/docs/Web/API/Document) or HTML markup to parse into one.
#[derive(Debug, Clone)]
pub enum DocumentInput {
	Document(Document),
	Markup(String),
}

impl DocumentInput {
	/// Resolves this input into a [`Document`], parsing markup as `text/html` via [***DOMParser***](https://developer.mozilla.org/en-US/docs/Web/API/DOMParser).
	///
	/// # Errors
	///
	/// Iff the `DOMParser` can't be constructed or refuses the markup.
	pub fn into_document(self) -> Result<Document> {
		match self {
			DocumentInput::Document(document) => Ok(document),
			DocumentInput::Markup(markup) => parse_html(&markup),
		}
	}
}

impl From<Document> for DocumentInput {
	fn from(document: Document) -> Self {
		Self::Document(document)
	}
}

impl From<String> for DocumentInput {
	fn from(markup: String) -> Self {
		Self::Markup(markup)
	}
}

impl From<&str> for DocumentInput {
	fn from(markup: &str) -> Self {
		Self::Markup(markup.to_owned())
	}
}

/// Parses `markup` into a new, inert [`Document`].
///
/// # Errors
///
/// Iff the `DOMParser` can't be constructed or refuses the markup.
#[instrument(skip(markup), fields(len = markup.len()))]
pub fn parse_html(markup: &str) -> Result<Document> {
	let parser = DomParser::new().map_err(Error::dom("new DOMParser()"))?;
	let document = parser
		.parse_from_string(markup, SupportedType::TextHtml)
		.map_err(Error::dom("DOMParser.parseFromString"))?;
	trace!("Parsed HTML document.");
	Ok(document)
}
