use core::{borrow::Borrow, hash::Hash, iter::FusedIterator, mem, slice};
use hashbrown::{hash_map::Entry, HashMap};
use web_sys::Element;

/// Insertion-ordered mapping from normalized update identifiers to [`web_sys::Element`]s.
///
/// Re-inserting a key replaces its element but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct ElementMap {
	index: HashMap<String, usize>,
	entries: Vec<(String, Element)>,
}
impl ElementMap {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			index: HashMap::with_capacity(capacity),
			entries: Vec::with_capacity(capacity),
		}
	}

	/// Inserts `element` under `key`, returning the element it replaced, if any.
	pub fn insert(&mut self, key: String, element: Element) -> Option<Element> {
		match self.index.entry(key) {
			Entry::Occupied(occupied) => Some(mem::replace(&mut self.entries[*occupied.get()].1, element)),
			Entry::Vacant(vacant) => {
				self.entries.push((vacant.key().clone(), element));
				vacant.insert(self.entries.len() - 1);
				None
			}
		}
	}

	#[must_use]
	pub fn get<Q: ?Sized>(&self, key: &Q) -> Option<&Element>
	where
		String: Borrow<Q>,
		Q: Eq + Hash,
	{
		self.index.get(key).map(|&i| &self.entries[i].1)
	}

	#[must_use]
	pub fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
	where
		String: Borrow<Q>,
		Q: Eq + Hash,
	{
		self.index.contains_key(key)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over the entries in order of first insertion.
	pub fn iter(&self) -> Iter<'_> {
		Iter(self.entries.iter())
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.iter().map(|(key, _)| key.as_str())
	}
}

impl<'a> IntoIterator for &'a ElementMap {
	type Item = (&'a str, &'a Element);
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

pub struct Iter<'a>(slice::Iter<'a, (String, Element)>);
impl<'a> Iterator for Iter<'a> {
	type Item = (&'a str, &'a Element);

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|(key, element)| (key.as_str(), element))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}
}
impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}
