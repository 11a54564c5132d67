use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape;
use quick_xml::events::Event;

use crate::error::{Result, ToolError};
use crate::model::XmlElement;

/// Reads and parses one report file into an element tree.
pub fn read_document(path: &Path) -> Result<XmlElement> {
    let source = fs::read_to_string(path)?;
    parse_document(&source)
}

/// Parses an XML document into an element tree.
///
/// Character data and resolved predefined entities accumulate on the
/// enclosing element's text. Empty elements are expanded so `<A/>` and
/// `<A></A>` build the same tree. Content after the root element's close
/// is ignored.
pub fn parse_document(source: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().expand_empty_elements = true;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let tag = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                stack.push(XmlElement::new(tag));
            }
            Event::Text(text) => {
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&String::from_utf8_lossy(&text.into_inner()));
                }
            }
            Event::GeneralRef(entity) => {
                if let Some(element) = stack.last_mut() {
                    let name = String::from_utf8_lossy(&entity.into_inner()).into_owned();
                    if let Some(resolved) = escape::resolve_predefined_entity(&name) {
                        element.text.push_str(resolved);
                    }
                }
            }
            Event::CData(data) => {
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| ToolError::InvalidDocument("unbalanced end tag".to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None if root.is_none() => root = Some(element),
                    None => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    root.ok_or_else(|| ToolError::InvalidDocument("document has no root element".to_string()))
}
