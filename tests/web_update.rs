#![cfg(target_arch = "wasm32")]

use html_document_updater::{error::Which, input::parse_html, options::Markup, updater::replace_markup, DocumentUpdater, Error, Options, UpdatePolicy, UpdateReport, Updates};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

mod web_logging_;

fn document(markup: &str) -> Document {
	parse_html(markup).unwrap()
}

fn element(document: &Document, identifier: &str) -> Element {
	document
		.query_selector(&format!("[data-update-id={:?}]", identifier))
		.unwrap()
		.unwrap_or_else(|| panic!("No element {:?}", identifier))
}

fn updater(options: Options, html_document: &str, updated_html_document: &str, updates: Updates) -> DocumentUpdater {
	web_logging_::init();

	let mut updater = DocumentUpdater::new(options);
	updater.set_html_document(html_document).unwrap();
	updater.set_updated_html_document(updated_html_document).unwrap();
	updater.set_updates(updates);
	updater
}

#[wasm_bindgen_test]
fn copies_attributes() {
	let mut updater = updater(
		Options::default(),
		r#"<body data-update-id="body" id="old" class="old"></body>"#,
		r#"<body data-update-id="body" id="new" class="new"></body>"#,
		Updates::new().with("body", UpdatePolicy::new().with_attributes(vec!["id", "class"])),
	);

	let report = updater.update().unwrap();

	let body = element(updater.html_document().unwrap(), "body");
	assert_eq!(body.get_attribute("id").as_deref(), Some("new"));
	assert_eq!(body.get_attribute("class").as_deref(), Some("new"));
	assert_eq!(report.updated, 1);
	assert_eq!(report.attributes_set, 2);
	assert_eq!(report.attributes_removed, 0);
}

#[wasm_bindgen_test]
fn removes_attributes_missing_in_source() {
	let mut updater = updater(
		Options::default(),
		r#"<div data-update-id="box" foo="x" bar="y"></div>"#,
		r#"<div data-update-id="box"></div>"#,
		Updates::new().with("box", UpdatePolicy::new().with_attributes(vec!["foo"])),
	);

	let report = updater.update().unwrap();

	let target = element(updater.html_document().unwrap(), "box");
	assert!(!target.has_attribute("foo"));
	assert_eq!(target.get_attribute("bar").as_deref(), Some("y"));
	assert_eq!(report.attributes_removed, 1);
}

#[wasm_bindgen_test]
fn replaces_inner_html() {
	let mut updater = updater(
		Options::default(),
		r#"<h1 data-update-id="main-heading" data-test="old" class="keep">Hello World</h1>"#,
		r#"<h1 data-update-id="main-heading" data-test="new" class="drop">Hello <em>again</em></h1>"#,
		Updates::new().with("mainHeading", UpdatePolicy::new().with_attributes(vec!["data-test"]).with_inner_html()),
	);

	updater.update().unwrap();

	let heading = element(updater.html_document().unwrap(), "main-heading");
	assert_eq!(heading.inner_html(), "Hello <em>again</em>");
	assert_eq!(heading.get_attribute("data-test").as_deref(), Some("new"));
	assert_eq!(heading.get_attribute("class").as_deref(), Some("keep"));
}

#[wasm_bindgen_test]
fn outer_html_takes_precedence() {
	let mut updater = updater(
		Options::default(),
		r#"<main><div data-update-id="box" class="old"><p>old</p></div></main>"#,
		r#"<main><section data-update-id="box" class="new"><p>new</p></section></main>"#,
		Updates::new().with("box", UpdatePolicy::new().with_inner_html().with_outer_html()),
	);
	let old = element(updater.html_document().unwrap(), "box");

	let report = updater.update().unwrap();

	let replaced = element(updater.html_document().unwrap(), "box");
	assert_eq!(replaced.tag_name(), "SECTION");
	assert_eq!(replaced.get_attribute("class").as_deref(), Some("new"));
	assert_eq!(replaced.inner_html(), "<p>new</p>");
	assert!(old.parent_node().is_none());
	assert_eq!(report.markup_replaced, 1);
}

#[wasm_bindgen_test]
fn outer_html_of_root_element_fails() {
	let html_document = document(r#"<html data-update-id="root"><body></body></html>"#);
	let updated_html_document = document(r#"<html data-update-id="root"><body>new</body></html>"#);

	let error = replace_markup(
		&html_document.document_element().unwrap(),
		&updated_html_document.document_element().unwrap(),
		Markup::Outer,
	)
	.unwrap_err();
	assert!(matches!(error, Error::Dom { .. }), "{:?}", error);
}

#[wasm_bindgen_test]
fn outer_html_in_fragment_is_replaced() {
	let html_document = document("");
	let fragment = html_document.create_document_fragment();
	let target = html_document.create_element("p").unwrap();
	target.set_inner_html("old");
	fragment.append_child(&target).unwrap();
	let source = document("<p>new</p>").query_selector("p").unwrap().unwrap();

	replace_markup(&target, &source, Markup::Outer).unwrap();

	assert!(target.parent_node().is_none());
	assert_eq!(fragment.text_content().as_deref(), Some("new"));
}

#[wasm_bindgen_test]
fn dom_errors_keep_earlier_changes() {
	let mut updater = updater(
		Options::default(),
		r#"<html data-update-id="root" lang="de"><body><p data-update-id="later">old</p></body></html>"#,
		r#"<html data-update-id="root" lang="en"><body><p data-update-id="later">new</p></body></html>"#,
		Updates::new()
			.with("root", UpdatePolicy::new().with_attributes(vec!["lang"]).with_outer_html())
			.with("later", UpdatePolicy::new().with_inner_html()),
	);

	match updater.update() {
		Err(Error::Dom { operation, .. }) => assert_eq!(operation, "Element.outerHTML"),
		other => panic!("Expected `Dom` but got {:?}", other),
	}
	let html_document = updater.html_document().unwrap();
	assert_eq!(element(html_document, "root").get_attribute("lang").as_deref(), Some("en"));
	assert_eq!(element(html_document, "later").inner_html(), "old");
}

#[wasm_bindgen_test]
fn skips_missing_policy() {
	let mut updater = updater(
		Options::default(),
		r#"<div data-update-id="known" class="a"></div><p data-update-id="other" class="a">old</p>"#,
		r#"<div data-update-id="known" class="b"></div><p data-update-id="other" class="b">new</p>"#,
		Updates::new().with("known", UpdatePolicy::new().with_attributes(vec!["class"])),
	);

	let report = updater.update().unwrap();

	let html_document = updater.html_document().unwrap();
	assert_eq!(element(html_document, "known").get_attribute("class").as_deref(), Some("b"));
	let other = element(html_document, "other");
	assert_eq!(other.get_attribute("class").as_deref(), Some("a"));
	assert_eq!(other.inner_html(), "old");
	assert_eq!(report.skipped_missing_policy, 1);
}

#[wasm_bindgen_test]
fn strict_missing_policy_changes_nothing() {
	let mut updater = updater(
		Options::strict(),
		r#"<div data-update-id="first" class="a"></div><div data-update-id="second" class="a"></div>"#,
		r#"<div data-update-id="first" class="b"></div><div data-update-id="second" class="b"></div>"#,
		Updates::new().with("first", UpdatePolicy::new().with_attributes(vec!["class"])),
	);

	match updater.update() {
		Err(Error::MissingUpdatePolicy { identifier }) => assert_eq!(identifier, "second"),
		other => panic!("Expected `MissingUpdatePolicy` but got {:?}", other),
	}
	assert_eq!(element(updater.html_document().unwrap(), "first").get_attribute("class").as_deref(), Some("a"));
}

#[wasm_bindgen_test]
fn skips_unmatched() {
	let mut updater = updater(
		Options::default(),
		r#"<div data-update-id="gone" class="a">old</div>"#,
		r#"<div class="b">new</div>"#,
		Updates::new().with("gone", UpdatePolicy::new().with_attributes(vec!["class"]).with_inner_html()),
	);

	let report = updater.update().unwrap();

	let gone = element(updater.html_document().unwrap(), "gone");
	assert_eq!(gone.get_attribute("class").as_deref(), Some("a"));
	assert_eq!(gone.inner_html(), "old");
	assert_eq!(report.skipped_unmatched, 1);
	assert_eq!(report.updated, 0);
}

#[wasm_bindgen_test]
fn strict_unmatched_changes_nothing() {
	let mut updater = updater(
		Options::strict(),
		r#"<div data-update-id="first" class="a"></div><div data-update-id="second" class="a"></div>"#,
		r#"<div data-update-id="first" class="b"></div>"#,
		Updates::new()
			.with("first", UpdatePolicy::new().with_attributes(vec!["class"]))
			.with("second", UpdatePolicy::new().with_inner_html()),
	);

	match updater.update() {
		Err(Error::UnmatchedElement { identifier }) => assert_eq!(identifier, "second"),
		other => panic!("Expected `UnmatchedElement` but got {:?}", other),
	}
	assert_eq!(element(updater.html_document().unwrap(), "first").get_attribute("class").as_deref(), Some("a"));
}

#[wasm_bindgen_test]
fn strict_ignores_unmatched_noop_policy() {
	let mut updater = updater(
		Options::strict(),
		r#"<div data-update-id="placeholder"></div>"#,
		"<div></div>",
		Updates::new().with("placeholder", UpdatePolicy::new()),
	);

	assert_eq!(updater.update().unwrap().updated, 0);
}

#[wasm_bindgen_test]
fn second_pass_changes_nothing() {
	let mut updater = updater(
		Options::default(),
		r#"<body data-update-id="body" class="old"><h1 data-update-id="main-heading">Old</h1><div data-update-id="box">old</div></body>"#,
		r#"<body data-update-id="body" class="new"><h1 data-update-id="main-heading">New <b>!</b></h1><section data-update-id="box">new</section></body>"#,
		Updates::new()
			.with("body", UpdatePolicy::new().with_attributes(vec!["class", "missing"]))
			.with("mainHeading", UpdatePolicy::new().with_inner_html())
			.with("box", UpdatePolicy::new().with_outer_html()),
	);

	let first = updater.update().unwrap();
	let after_first = updater.html_document().unwrap().document_element().unwrap().outer_html();
	let second = updater.update().unwrap();
	let after_second = updater.html_document().unwrap().document_element().unwrap().outer_html();

	assert_eq!(after_first, after_second);
	assert_eq!(first, second);
}

#[wasm_bindgen_test]
fn reusable_with_new_updated_document() {
	let mut updater = updater(
		Options::default(),
		r#"<span data-update-id="counter">0</span>"#,
		r#"<span data-update-id="counter">1</span>"#,
		Updates::new().with("counter", UpdatePolicy::new().with_inner_html()),
	);

	updater.update().unwrap();
	assert_eq!(element(updater.html_document().unwrap(), "counter").inner_html(), "1");

	updater.set_updated_html_document(r#"<span data-update-id="counter">2</span>"#).unwrap();
	updater.update().unwrap();
	assert_eq!(element(updater.html_document().unwrap(), "counter").inner_html(), "2");
}

#[wasm_bindgen_test]
fn policy_keys_must_be_normalized() {
	let mut updater = updater(
		Options::default(),
		r#"<h1 data-update-id="main-heading">old</h1>"#,
		r#"<h1 data-update-id="main-heading">new</h1>"#,
		Updates::new().with("main-heading", UpdatePolicy::new().with_inner_html()),
	);

	let report = updater.update().unwrap();

	assert_eq!(report.skipped_missing_policy, 1);
	assert_eq!(element(updater.html_document().unwrap(), "main-heading").inner_html(), "old");
}

#[wasm_bindgen_test]
fn custom_update_identifier() {
	let mut updater = updater(
		Options::default().with_update_identifier("data-sync"),
		r#"<p data-sync="status" data-update-id="ignored">old</p>"#,
		r#"<p data-sync="status">new</p>"#,
		Updates::new().with("status", UpdatePolicy::new().with_inner_html()),
	);

	let report = updater.update().unwrap();

	assert_eq!(report.updated, 1);
	assert_eq!(updater.elements_in_html_document().len(), 1);
	assert!(updater.elements_in_html_document().contains_key("status"));
	assert_eq!(element(updater.html_document().unwrap(), "ignored").inner_html(), "new");
}

#[wasm_bindgen_test]
fn documents_must_be_set() {
	let mut updater = DocumentUpdater::default();
	assert!(matches!(updater.update(), Err(Error::DocumentNotSet(Which::HtmlDocument))));

	updater.set_html_document("<p></p>").unwrap();
	assert!(matches!(updater.update(), Err(Error::DocumentNotSet(Which::UpdatedHtmlDocument))));

	updater.set_updated_html_document(document("<p></p>")).unwrap();
	assert_eq!(updater.update().unwrap(), UpdateReport::default());
}

#[wasm_bindgen_test]
fn rejects_empty_update_identifier() {
	let mut updater = DocumentUpdater::default();
	assert!(matches!(
		updater.set_options(Options::default().with_update_identifier("")),
		Err(Error::InvalidConfiguration { .. })
	));
	assert_eq!(updater.options(), &Options::default());
}

#[wasm_bindgen_test]
fn updates_live_document() {
	web_logging_::init();

	let live = window().unwrap().document().unwrap();
	let body = live.body().unwrap();
	body.set_inner_html(r#"<output data-update-id="live-status" value="idle">Idle</output>"#);

	let mut updater = DocumentUpdater::default();
	updater.set_html_document(live.clone()).unwrap();
	updater.set_updated_html_document(r#"<output data-update-id="live-status" value="busy">Busy</output>"#).unwrap();
	updater.set_updates(Updates::new().with("liveStatus", UpdatePolicy::new().with_attributes(vec!["value"]).with_inner_html()));
	updater.update().unwrap();

	let status = element(&live, "live-status");
	assert_eq!(status.get_attribute("value").as_deref(), Some("busy"));
	assert_eq!(status.inner_html(), "Busy");

	body.set_inner_html("");
}
