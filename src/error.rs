use core::fmt::{self, Display, Formatter};
use wasm_bindgen::{JsCast, JsValue};

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Identifies one of the two documents an [`DocumentUpdater`](`crate::DocumentUpdater`) works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which {
	/// The live document that is being updated.
	HtmlDocument,
	/// The (remote) document that supplies the new content.
	UpdatedHtmlDocument,
}
impl Display for Which {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Which::HtmlDocument => "htmlDocument",
			Which::UpdatedHtmlDocument => "updatedHtmlDocument",
		})
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("No valid {field:?} passed to HTMLDocumentUpdater: {reason}")]
	InvalidConfiguration { field: String, reason: String },

	#[error("{field:?} must be either a string or a `Document`")]
	InvalidDocumentInput { field: String },

	#[error("\"{0}\" must be set before updating")]
	DocumentNotSet(Which),

	#[error("The element with update identifier {identifier:?} does not exist in both documents")]
	UnmatchedElement { identifier: String },

	#[error("No update policy found for the element with update identifier {identifier:?}")]
	MissingUpdatePolicy { identifier: String },

	#[error("{operation} failed: {message}")]
	Dom { operation: &'static str, message: String },
}

impl Error {
	pub fn invalid_configuration(field: impl Into<String>, reason: impl Display) -> Self {
		Self::InvalidConfiguration {
			field: field.into(),
			reason: reason.to_string(),
		}
	}

	/// Creates an adapter that wraps a thrown [***JavaScript***](https://developer.mozilla.org/en-US/docs/Web/JavaScript) value for use with [`Result::map_err`].
	pub fn dom(operation: &'static str) -> impl FnOnce(JsValue) -> Self {
		move |thrown| Self::Dom {
			operation,
			message: describe_thrown(&thrown),
		}
	}

	/// A stable name for this kind of error, used as `name` of thrown [***Error***](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Error)s.
	#[must_use]
	pub fn kind(&self) -> &'static str {
		match self {
			Error::InvalidConfiguration { .. } => "InvalidConfiguration",
			Error::InvalidDocumentInput { .. } => "InvalidDocumentInput",
			Error::DocumentNotSet(_) => "DocumentNotSet",
			Error::UnmatchedElement { .. } => "UnmatchedElement",
			Error::MissingUpdatePolicy { .. } => "MissingUpdatePolicy",
			Error::Dom { .. } => "DomError",
		}
	}
}

fn describe_thrown(thrown: &JsValue) -> String {
	if let Some(error) = thrown.dyn_ref::<js_sys::Error>() {
		format!("{}: {}", String::from(error.name()), String::from(error.message()))
	} else if let Some(string) = thrown.as_string() {
		string
	} else {
		format!("{:?}", thrown)
	}
}

impl From<Error> for JsValue {
	fn from(error: Error) -> Self {
		let js_error = js_sys::Error::new(&error.to_string());
		js_error.set_name(error.kind());
		js_error.into()
	}
}
