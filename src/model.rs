/// A single element of a parsed XML document. Trees of these are scoped to
/// the flattening pass of one input file and discarded afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    /// Tag name of the element.
    pub tag: String,
    /// Accumulated character data of the element itself.
    pub text: String,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates an element with the provided tag and no content.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Returns the element's text with surrounding whitespace removed.
    /// Whitespace-only content is treated as absent.
    pub fn trimmed_text(&self) -> Option<&str> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// A rectangular table of string cells that will be materialised as an
/// Excel sheet. Column order is significant.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Returns the left-to-right position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}
