//! Helper methods for extracting data from search results.
use ldap3::SearchEntry;

use crate::error::Error;

/// An extension trait for [`SearchEntry`] that provides convenience methods
/// for extracting data.
pub trait SearchEntryExt {
	/// Get the first value of an attribute. Will return `None` if attribute
	/// value is not valid UTF-8.
	fn attr_first(&self, attr: &str) -> Option<&str>;

	/// Get the first value of an attribute the entry is required to carry.
	fn attr_required(&self, attr: &str) -> Result<&str, Error> {
		self.attr_first(attr).ok_or_else(|| Error::MissingAttribute(attr.to_owned()))
	}
}

impl SearchEntryExt for SearchEntry {
	fn attr_first(&self, attr: &str) -> Option<&str> {
		let attr = self.attrs.get(attr)?;
		attr.first().map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use ldap3::SearchEntry;

	use super::SearchEntryExt;
	use crate::error::Error;

	#[test]
	fn attr_first() {
		let entry = SearchEntry {
			dn: String::from("dontcare"),
			attrs: [(
				String::from("sn"),
				vec![String::from("Doe"), String::from("Smith")],
			)]
			.into_iter()
			.collect(),
			bin_attrs: HashMap::default(),
		};
		assert_eq!(
			entry.attr_first("attribute_does_not_exist"),
			None,
			"Undefined attributes should return None"
		);
		assert_eq!(entry.attr_first("sn"), Some("Doe"), "Should return the first value");
		assert!(
			matches!(entry.attr_required("givenName"), Err(Error::MissingAttribute(attr)) if attr == "givenName"),
			"Required attributes should name themselves when missing"
		);
	}
}
