use crate::{
	collect::collect_elements,
	element_map::ElementMap,
	error::{Error, Result, Which},
	input::DocumentInput,
	options::{Markup, Options, UpdatePolicy, Updates},
};
use tracing::{debug, info, instrument, trace, trace_span};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// Copies attributes and markup from elements of an updated (remote) [***Document***](https://developer.mozilla.org/en-US/docs/Web/API/Document)
/// onto the elements with the same update identifier in a live one.
///
/// Elements are matched through the attribute named by [`AttributeOptions::update_identifier`](`crate::options::AttributeOptions::update_identifier`)
/// (`data-update-id` by default), and [`Updates`] determines what is copied for each of them.
///
/// An instance is meant to be kept around and reused: Replace the updated document and call [`update`](`DocumentUpdater::update`) again for each new version.
///
/// # Strict Checking
///
/// Without [`Options::strict_checking`], elements without an [`UpdatePolicy`] or without a counterpart in the updated document are skipped.
///
/// With it, each [`update`](`DocumentUpdater::update`) validates all elements before changing anything and fails on the first such element instead,
/// leaving both documents untouched.
#[derive(Debug, Default)]
pub struct DocumentUpdater {
	options: Options,
	html_document: Option<Document>,
	updated_html_document: Option<Document>,
	updates: Updates,
	elements_in_html_document: ElementMap,
	elements_in_updated_html_document: ElementMap,
}

/// Counts of what a single [`DocumentUpdater::update`] pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
	/// Elements an [`UpdatePolicy`] was applied to.
	pub updated: usize,
	pub skipped_missing_policy: usize,
	pub skipped_unmatched: usize,
	pub attributes_set: usize,
	pub attributes_removed: usize,
	pub markup_replaced: usize,
}

enum Resolution<'a> {
	MissingPolicy,
	Noop,
	Unmatched,
	Apply(&'a UpdatePolicy, &'a Element),
}

impl DocumentUpdater {
	#[must_use]
	pub fn new(options: Options) -> Self {
		Self { options, ..Self::default() }
	}

	#[must_use]
	pub fn options(&self) -> &Options {
		&self.options
	}

	/// # Errors
	///
	/// Iff `options` fail [`Options::validate`], in which case the current options are kept.
	pub fn set_options(&mut self, options: Options) -> Result<()> {
		options.validate()?;
		self.options = options;
		Ok(())
	}

	#[must_use]
	pub fn html_document(&self) -> Option<&Document> {
		self.html_document.as_ref()
	}

	/// Sets the live document to update.
	///
	/// # Errors
	///
	/// Iff `document` is markup that can't be parsed.
	pub fn set_html_document(&mut self, document: impl Into<DocumentInput>) -> Result<()> {
		self.html_document = Some(document.into().into_document()?);
		Ok(())
	}

	#[must_use]
	pub fn updated_html_document(&self) -> Option<&Document> {
		self.updated_html_document.as_ref()
	}

	/// Sets the updated (remote) document to take new content from.
	///
	/// # Errors
	///
	/// Iff `document` is markup that can't be parsed.
	pub fn set_updated_html_document(&mut self, document: impl Into<DocumentInput>) -> Result<()> {
		self.updated_html_document = Some(document.into().into_document()?);
		Ok(())
	}

	#[must_use]
	pub fn updates(&self) -> &Updates {
		&self.updates
	}

	pub fn set_updates(&mut self, updates: Updates) {
		updates.warn_unnormalized_keys();
		self.updates = updates;
	}

	/// Elements of the live document found by the last [`update`](`DocumentUpdater::update`).
	#[must_use]
	pub fn elements_in_html_document(&self) -> &ElementMap {
		&self.elements_in_html_document
	}

	/// Elements of the updated document found by the last [`update`](`DocumentUpdater::update`).
	#[must_use]
	pub fn elements_in_updated_html_document(&self) -> &ElementMap {
		&self.elements_in_updated_html_document
	}

	/// Collects the identified elements of both documents and applies [`Updates`] to the live one.
	///
	/// Running this again without changes to the updated document has no further effect.
	///
	/// # Errors
	///
	/// - [`Error::DocumentNotSet`] if either document is missing.
	/// - With [strict checking](`DocumentUpdater`#strict-checking), [`Error::MissingUpdatePolicy`] or [`Error::UnmatchedElement`]
	///   naming the first offending identifier. Nothing is changed in that case.
	/// - [`Error::Dom`] if the browser rejects a change. Earlier changes are **not** rolled back.
	#[instrument(skip(self), fields(strict = self.options.strict_checking))]
	pub fn update(&mut self) -> Result<UpdateReport> {
		self.collect_elements()?;

		if self.options.strict_checking {
			for (identifier, _) in &self.elements_in_html_document {
				self.resolve(identifier)?;
			}
		}

		let mut report = UpdateReport::default();
		for (identifier, element) in &self.elements_in_html_document {
			let (policy, updated_element) = match self.resolve(identifier)? {
				Resolution::MissingPolicy => {
					debug!("No update policy for {:?}. Skipping.", identifier);
					report.skipped_missing_policy += 1;
					continue;
				}
				Resolution::Noop => continue,
				Resolution::Unmatched => {
					debug!("No element {:?} in the updated document. Skipping.", identifier);
					report.skipped_unmatched += 1;
					continue;
				}
				Resolution::Apply(policy, updated_element) => (policy, updated_element),
			};

			let span = trace_span!("Updating element", identifier);
			let _enter = span.enter();

			if !policy.attributes.is_empty() {
				let (set, removed) = update_attributes(element, updated_element, &policy.attributes)?;
				report.attributes_set += set;
				report.attributes_removed += removed;
			}
			if let Some(markup) = policy.markup() {
				replace_markup(element, updated_element, markup)?;
				report.markup_replaced += 1;
			}
			report.updated += 1;
		}

		info!(
			"Updated {} element(s); skipped {} without policy and {} unmatched.",
			report.updated, report.skipped_missing_policy, report.skipped_unmatched
		);
		Ok(report)
	}

	fn collect_elements(&mut self) -> Result<()> {
		let attribute = &self.options.attributes.update_identifier;
		let html_document = self.html_document.as_ref().ok_or(Error::DocumentNotSet(Which::HtmlDocument))?;
		let updated_html_document = self.updated_html_document.as_ref().ok_or(Error::DocumentNotSet(Which::UpdatedHtmlDocument))?;

		self.elements_in_html_document = collect_elements(html_document, attribute)?;
		self.elements_in_updated_html_document = collect_elements(updated_html_document, attribute)?;
		Ok(())
	}

	fn resolve(&self, identifier: &str) -> Result<Resolution<'_>> {
		let strict = self.options.strict_checking;
		let policy = match self.updates.get(identifier) {
			Some(policy) => policy,
			None if strict => {
				return Err(Error::MissingUpdatePolicy {
					identifier: identifier.to_owned(),
				})
			}
			None => return Ok(Resolution::MissingPolicy),
		};
		if policy.is_noop() {
			return Ok(Resolution::Noop);
		}
		match self.elements_in_updated_html_document.get(identifier) {
			Some(updated_element) => Ok(Resolution::Apply(policy, updated_element)),
			None if strict => Err(Error::UnmatchedElement {
				identifier: identifier.to_owned(),
			}),
			None => Ok(Resolution::Unmatched),
		}
	}
}

/// Copies each of `attributes` from `source` to `target`, removing those `source` doesn't have.
///
/// Returns how many attributes were set and removed.
///
/// # Errors
///
/// Iff an attribute name is rejected by the browser.
pub fn update_attributes(target: &Element, source: &Element, attributes: &[String]) -> Result<(usize, usize)> {
	let (mut set, mut removed) = (0, 0);
	for name in attributes {
		match source.get_attribute(name) {
			Some(value) => {
				if cfg!(feature = "dangerous-logging") {
					trace!("Setting {}={:?}", name, value);
				} else {
					trace!("Setting {}", name);
				}
				target.set_attribute(name, &value).map_err(Error::dom("Element.setAttribute"))?;
				set += 1;
			}
			None => {
				trace!("Removing {}", name);
				target.remove_attribute(name).map_err(Error::dom("Element.removeAttribute"))?;
				removed += 1;
			}
		}
	}
	Ok((set, removed))
}

/// Replaces the inner or outer markup of `target` with that of `source`.
///
/// # Errors
///
/// Iff `markup` is [`Markup::Outer`] and `target` is a document's root element, which can't be replaced this way.
pub fn replace_markup(target: &Element, source: &Element, markup: Markup) -> Result<()> {
	match markup {
		Markup::Inner => {
			trace!("Replacing innerHTML");
			target.set_inner_html(&source.inner_html());
		}
		Markup::Outer => {
			if target.parent_node().map_or(false, |parent| parent.dyn_ref::<Document>().is_some()) {
				return Err(Error::Dom {
					operation: "Element.outerHTML",
					message: format!("Can't replace the root element <{}>.", target.tag_name().to_ascii_lowercase()),
				});
			}
			trace!("Replacing outerHTML");
			target.set_outer_html(&source.outer_html());
		}
	}
	Ok(())
}
