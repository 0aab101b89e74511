//! [***JavaScript***](https://developer.mozilla.org/en-US/docs/Web/JavaScript) bindings.
//!
//! ```js
//! const updater = new HTMLDocumentUpdater({
//!   options: { strictChecking: false, attributes: { updateIdentifier: 'data-update-id' } },
//!   htmlDocument: document,
//!   updates: {
//!     body: { attributes: ['id', 'class'] },
//!     mainHeading: { attributes: ['data-test'], innerHTML: true },
//!   },
//! });
//!
//! updater.updatedHtmlDocument = await (await fetch(location.href)).text();
//! updater.update();
//! ```

use crate::{
	element_map::ElementMap,
	error::{Error, Result},
	identifier,
	input::DocumentInput,
	options::{Options, Updates},
	updater::DocumentUpdater,
};
use js_sys::{Array, Map, Reflect, JSON};
use tracing::debug;
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
use web_sys::Document;

#[wasm_bindgen(js_name = HTMLDocumentUpdater)]
#[derive(Debug)]
pub struct HtmlDocumentUpdater {
	inner: DocumentUpdater,
}

#[wasm_bindgen(js_class = HTMLDocumentUpdater)]
impl HtmlDocumentUpdater {
	/// Accepts an optional configuration object with the keys `options`, `htmlDocument`, `updatedHtmlDocument` and `updates`.
	///
	/// # Errors
	///
	/// Throws an `InvalidConfiguration` or `InvalidDocumentInput` `Error` for values of the wrong type.
	#[wasm_bindgen(constructor)]
	pub fn new(config: JsValue) -> Result<HtmlDocumentUpdater, JsValue> {
		Ok(Self {
			inner: updater_from_config(&config)?,
		})
	}

	/// The effective options, with defaults filled in.
	///
	/// # Errors
	///
	/// Never in practice, as the options are always serializable.
	#[wasm_bindgen(getter)]
	pub fn options(&self) -> Result<JsValue, JsValue> {
		let json = serde_json::to_string(self.inner.options()).map_err(|error| Error::invalid_configuration("options", error))?;
		JSON::parse(&json)
	}

	/// # Errors
	///
	/// Throws an `InvalidConfiguration` `Error` unless `options` is an object of the expected shape.
	#[wasm_bindgen(setter)]
	pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
		Ok(self.inner.set_options(options_from_js(&options)?)?)
	}

	#[wasm_bindgen(getter = htmlDocument)]
	pub fn html_document(&self) -> Option<Document> {
		self.inner.html_document().cloned()
	}

	/// # Errors
	///
	/// Throws an `InvalidDocumentInput` `Error` unless `document` is a string or `Document`.
	#[wasm_bindgen(setter = htmlDocument)]
	pub fn set_html_document(&mut self, document: JsValue) -> Result<(), JsValue> {
		Ok(self.inner.set_html_document(document_input_from_js(document, "htmlDocument")?)?)
	}

	#[wasm_bindgen(getter = updatedHtmlDocument)]
	pub fn updated_html_document(&self) -> Option<Document> {
		self.inner.updated_html_document().cloned()
	}

	/// # Errors
	///
	/// Throws an `InvalidDocumentInput` `Error` unless `document` is a string or `Document`.
	#[wasm_bindgen(setter = updatedHtmlDocument)]
	pub fn set_updated_html_document(&mut self, document: JsValue) -> Result<(), JsValue> {
		Ok(self.inner.set_updated_html_document(document_input_from_js(document, "updatedHtmlDocument")?)?)
	}

	/// # Errors
	///
	/// Never in practice, as the update policies are always serializable.
	#[wasm_bindgen(getter)]
	pub fn updates(&self) -> Result<JsValue, JsValue> {
		let json = serde_json::to_string(self.inner.updates()).map_err(|error| Error::invalid_configuration("updates", error))?;
		JSON::parse(&json)
	}

	/// # Errors
	///
	/// Throws an `InvalidConfiguration` `Error` unless `updates` is an object of policy objects.
	#[wasm_bindgen(setter)]
	pub fn set_updates(&mut self, updates: JsValue) -> Result<(), JsValue> {
		self.inner.set_updates(updates_from_js(&updates)?);
		Ok(())
	}

	/// Elements of the live document found by the last `update()`, as a `Map` from update identifier to `Element`.
	#[wasm_bindgen(getter = elementsInHtmlDocument)]
	pub fn elements_in_html_document(&self) -> Map {
		to_js_map(self.inner.elements_in_html_document())
	}

	/// Elements of the updated document found by the last `update()`, as a `Map` from update identifier to `Element`.
	#[wasm_bindgen(getter = elementsInUpdatedHtmlDocument)]
	pub fn elements_in_updated_html_document(&self) -> Map {
		to_js_map(self.inner.elements_in_updated_html_document())
	}

	/// See [`format_update_identifier`](`crate::identifier::format_update_identifier`).
	#[wasm_bindgen(js_name = formatUpdateIdentifier)]
	#[must_use]
	pub fn format_update_identifier(&self, raw: &str) -> String {
		identifier::format_update_identifier(raw)
	}

	/// Runs one update pass. See [`DocumentUpdater::update`].
	///
	/// # Errors
	///
	/// Throws `DocumentNotSet`, `MissingUpdatePolicy`, `UnmatchedElement` or `DomError` `Error`s.
	pub fn update(&mut self) -> Result<(), JsValue> {
		self.inner.update()?;
		Ok(())
	}
}

/// Normalizes a raw update identifier like `"main-heading"` into its key `"mainHeading"`.
#[wasm_bindgen(js_name = formatUpdateIdentifier)]
#[must_use]
pub fn format_update_identifier(raw: &str) -> String {
	identifier::format_update_identifier(raw)
}

fn to_js_map(elements: &ElementMap) -> Map {
	let map = Map::new();
	for (identifier, element) in elements {
		map.set(&JsValue::from_str(identifier), element);
	}
	map
}

fn updater_from_config(config: &JsValue) -> Result<DocumentUpdater> {
	let mut updater = DocumentUpdater::default();
	if config.is_undefined() {
		debug!("Created HTMLDocumentUpdater without configuration.");
		return Ok(updater);
	}
	expect_object(config, "config")?;

	if let Some(options) = field(config, "options")? {
		updater.set_options(options_from_js(&options)?)?;
	}
	if let Some(document) = field(config, "htmlDocument")? {
		updater.set_html_document(document_input_from_js(document, "htmlDocument")?)?;
	}
	if let Some(document) = field(config, "updatedHtmlDocument")? {
		updater.set_updated_html_document(document_input_from_js(document, "updatedHtmlDocument")?)?;
	}
	if let Some(updates) = field(config, "updates")? {
		updater.set_updates(updates_from_js(&updates)?);
	}
	Ok(updater)
}

/// Like `name in object`.
fn field(object: &JsValue, name: &str) -> Result<Option<JsValue>> {
	let key = JsValue::from_str(name);
	let reflect_error = |error: JsValue| Error::invalid_configuration(name, format!("{:?}", error));
	if Reflect::has(object, &key).map_err(reflect_error)? {
		Reflect::get(object, &key).map(Some).map_err(reflect_error)
	} else {
		Ok(None)
	}
}

fn expect_object(value: &JsValue, name: &str) -> Result<()> {
	if value.is_object() && !Array::is_array(value) {
		Ok(())
	} else {
		Err(Error::invalid_configuration(name, format!("expected an object but found {:?}", value)))
	}
}

fn to_json(value: &JsValue, name: &str) -> Result<String> {
	expect_object(value, name)?;
	JSON::stringify(value)
		.map(String::from)
		.map_err(|error| Error::invalid_configuration(name, format!("{:?}", error)))
}

fn options_from_js(options: &JsValue) -> Result<Options> {
	Options::from_json(&to_json(options, "options")?)
}

fn updates_from_js(updates: &JsValue) -> Result<Updates> {
	Updates::from_json(&to_json(updates, "updates")?)
}

fn document_input_from_js(value: JsValue, name: &str) -> Result<DocumentInput> {
	if let Some(markup) = value.as_string() {
		return Ok(DocumentInput::Markup(markup));
	}
	value
		.dyn_into::<Document>()
		.map(DocumentInput::Document)
		.map_err(|_| Error::InvalidDocumentInput { field: name.to_owned() })
}
