use indexmap::IndexMap;

use crate::model::XmlElement;

/// One flattened report: a mapping from synthesized column name to leaf
/// text, in the order keys were first recorded.
pub type FlatRecord = IndexMap<String, String>;

/// Flattens a parsed document into a fresh record.
///
/// Column names are the underscore join of the tag names from the root's
/// direct child down to the leaf, so every key starts with `_`. The root's
/// own tag never appears in a key.
pub fn flatten_document(root: &XmlElement) -> FlatRecord {
    let mut record = FlatRecord::new();
    flatten_into(root, "", &mut record);
    record
}

/// Merges the subtree below `element` into the caller-supplied accumulator.
///
/// For every direct child the synthesized key is `prefix + "_" + tag`. A
/// child with non-empty trimmed text records it under that key; a later
/// write to the same key silently overwrites the earlier value while the
/// key keeps its original position. Recursion continues into every child
/// whether or not it carried text, so elements with both text and children
/// contribute both.
pub fn flatten_into(element: &XmlElement, prefix: &str, record: &mut FlatRecord) {
    for child in &element.children {
        let key = format!("{prefix}_{}", child.tag);
        if let Some(text) = child.trimmed_text() {
            record.insert(key.clone(), text.to_string());
        }
        flatten_into(child, &key, record);
    }
}
