//! Statically typed configuration of a [`DocumentUpdater`](`crate::DocumentUpdater`).
//!
//! All types here deserialize from the same camel-cased JSON shape the [***JavaScript***](https://developer.mozilla.org/en-US/docs/Web/JavaScript) facade accepts.
//! Missing fields fall back to their defaults at every nesting level.

use crate::{
	error::{Error, Result},
	identifier::is_normalized,
};
use core::iter::FromIterator;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The attribute used to key elements if none is configured.
pub const DEFAULT_UPDATE_IDENTIFIER: &str = "data-update-id";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
	/// If `true`, unmatched elements and missing update policies abort the update instead of being skipped.
	pub strict_checking: bool,
	pub attributes: AttributeOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributeOptions {
	/// Name of the attribute that marks and keys updatable elements.
	pub update_identifier: String,
}
impl Default for AttributeOptions {
	fn default() -> Self {
		Self {
			update_identifier: DEFAULT_UPDATE_IDENTIFIER.to_owned(),
		}
	}
}

impl Options {
	#[must_use]
	pub fn strict() -> Self {
		Self {
			strict_checking: true,
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_update_identifier(mut self, attribute: impl Into<String>) -> Self {
		self.attributes.update_identifier = attribute.into();
		self
	}

	/// Parses options from a JSON object, merging them over the defaults.
	///
	/// # Errors
	///
	/// Iff `json` is not an object of the expected shape or fails [`Options::validate`].
	pub fn from_json(json: &str) -> Result<Self> {
		let options: Self = serde_json::from_str(json).map_err(|error| Error::invalid_configuration("options", error))?;
		options.validate()?;
		Ok(options)
	}

	/// # Errors
	///
	/// Iff the update identifier attribute name is empty.
	pub fn validate(&self) -> Result<()> {
		if self.attributes.update_identifier.is_empty() {
			return Err(Error::invalid_configuration("options", "`attributes.updateIdentifier` must not be empty"));
		}
		Ok(())
	}
}

/// What to copy from a matched element of the updated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatePolicy {
	/// Attributes to copy in order. Attributes missing on the source element are removed from the target element.
	pub attributes: Vec<String>,
	#[serde(rename = "innerHTML")]
	pub inner_html: bool,
	/// Takes precedence over [`inner_html`](`UpdatePolicy::inner_html`).
	#[serde(rename = "outerHTML")]
	pub outer_html: bool,
}

/// Which markup of an element to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
	Inner,
	Outer,
}

impl UpdatePolicy {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_attributes<I>(mut self, attributes: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		self.attributes.extend(attributes.into_iter().map(Into::into));
		self
	}

	#[must_use]
	pub fn with_inner_html(mut self) -> Self {
		self.inner_html = true;
		self
	}

	#[must_use]
	pub fn with_outer_html(mut self) -> Self {
		self.outer_html = true;
		self
	}

	/// The markup replacement to apply, if any.
	#[must_use]
	pub fn markup(&self) -> Option<Markup> {
		if self.outer_html {
			Some(Markup::Outer)
		} else if self.inner_html {
			Some(Markup::Inner)
		} else {
			None
		}
	}

	/// Whether applying this policy can't change anything.
	#[must_use]
	pub fn is_noop(&self) -> bool {
		self.attributes.is_empty() && self.markup().is_none()
	}
}

/// [`UpdatePolicy`]s by normalized update identifier, e.g. `"mainHeading"` for `data-update-id="main-heading"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Updates(HashMap<String, UpdatePolicy>);
impl Updates {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses update policies from a JSON object.
	///
	/// # Errors
	///
	/// Iff `json` is not an object mapping keys to policy objects.
	pub fn from_json(json: &str) -> Result<Self> {
		serde_json::from_str(json).map_err(|error| Error::invalid_configuration("updates", error))
	}

	pub fn insert(&mut self, key: impl Into<String>, policy: UpdatePolicy) -> Option<UpdatePolicy> {
		self.0.insert(key.into(), policy)
	}

	#[must_use]
	pub fn with(mut self, key: impl Into<String>, policy: UpdatePolicy) -> Self {
		self.insert(key, policy);
		self
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&UpdatePolicy> {
		self.0.get(key)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &UpdatePolicy)> + '_ {
		self.0.iter().map(|(key, policy)| (key.as_str(), policy))
	}

	/// Warns about keys that can never match because they aren't normalized.
	pub(crate) fn warn_unnormalized_keys(&self) {
		for key in self.0.keys().filter(|key| !is_normalized(key)) {
			warn!("Update policy key {:?} is not in normalized (camelCase) form and will never match an element.", key);
		}
	}
}
impl<K: Into<String>> FromIterator<(K, UpdatePolicy)> for Updates {
	fn from_iter<T: IntoIterator<Item = (K, UpdatePolicy)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(key, policy)| (key.into(), policy)).collect())
	}
}
