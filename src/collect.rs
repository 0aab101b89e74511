use crate::{
	element_map::ElementMap,
	error::{Error, Result},
	identifier::format_update_identifier,
};
use tracing::{instrument, trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

/// Collects all elements in `document` that carry the `attribute`, keyed by their [normalized](`format_update_identifier`) identifiers.
///
/// Elements are visited in document order. If two elements share an identifier, the later one replaces the earlier one
/// (but the key keeps its first position). Elements with an empty identifier are ignored.
///
/// # Errors
///
/// Iff the attribute selector is rejected by the document.
#[instrument(skip(document))]
pub fn collect_elements(document: &Document, attribute: &str) -> Result<ElementMap> {
	let selector = format!("[{}]", web_sys::css::escape(attribute));
	let node_list = document.query_selector_all(&selector).map_err(Error::dom("querySelectorAll"))?;
	let elements = load_elements(&node_list, attribute);
	trace!("Collected {} element(s) from {} match(es).", elements.len(), node_list.length());
	Ok(elements)
}

fn load_elements(node_list: &NodeList, attribute: &str) -> ElementMap {
	let mut elements = ElementMap::with_capacity(node_list.length() as usize);
	for i in 0..node_list.length() {
		let element = match node_list.item(i).map(|node| node.dyn_into::<Element>()) {
			Some(Ok(element)) => element,
			Some(Err(node)) => {
				warn!("Expected `web_sys::Element` in selector matches but found {:?}. Skipping.", node);
				continue;
			}
			None => continue,
		};

		let raw = match element.get_attribute(attribute) {
			Some(raw) => raw,
			None => continue,
		};
		let identifier = format_update_identifier(&raw);
		if identifier.is_empty() {
			trace!("Ignoring element with empty update identifier.");
			continue;
		}

		if elements.insert(identifier, element).is_some() {
			warn!("Duplicate update identifier {:?}. The later element replaces the earlier one.", raw);
		}
	}
	elements
}
