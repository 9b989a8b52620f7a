//! Owned XML element tree.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Error, Result};

/// An XML element with its attributes, leading text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name of the element.
    pub tag: String,
    /// Attributes as key-value pairs, in document order.
    pub attributes: Vec<(String, String)>,
    /// Character data before the first child element, if any.
    pub text: Option<String>,
    /// Child elements.
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Look up an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over this element and all of its descendants in document order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Iterate over the descendants of this element, excluding itself.
    pub fn descendants(&self) -> impl Iterator<Item = &Element> {
        self.iter().skip(1)
    }

    /// First descendant named `tag`, never this element itself.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.descendants().find(|e| e.tag == tag)
    }

    /// All descendants named `tag`, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.tag == tag)
    }

    /// Direct children named `tag`.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |e| e.tag == tag)
    }
}

/// Pre-order iterator over an element subtree.
pub struct Iter<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// Parse XML text into an element tree.
///
/// Declarations, comments and processing instructions are skipped. Entity
/// references in text and attribute values are resolved.
pub fn parse_document(xml: &str) -> Result<Element> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| Error::Xml {
            position: reader.error_position() as u64,
            message: e.to_string(),
        })?;

        match event {
            Event::Start(e) => {
                let node = start_element(&e, &reader)?;
                if stack.is_empty() && root.is_some() {
                    return Err(xml_error(&reader, "multiple root elements"));
                }
                stack.push(node);
            }
            Event::Empty(e) => {
                // Self-closing element
                let node = start_element(&e, &reader)?;
                attach(node, &mut stack, &mut root, &reader)?;
            }
            Event::End(_) => {
                if let Some(node) = stack.pop() {
                    attach(node, &mut stack, &mut root, &reader)?;
                }
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|e| xml_error(&reader, &e.to_string()))?;
                push_text(&mut stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut stack, &text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(&reader, &format!("unclosed element <{}>", open.tag)));
    }

    root.ok_or_else(|| Error::Format("no root element found in XML".to_string()))
}

fn start_element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut node = Element::new(tag);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| xml_error(reader, &err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| xml_error(reader, &err.to_string()))?
            .into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

fn attach(
    node: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    reader: &Reader<&[u8]>,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(xml_error(reader, "multiple root elements"));
    } else {
        *root = Some(node);
    }
    Ok(())
}

/// Text only counts while the element has no children yet.
fn push_text(stack: &mut [Element], text: &str) {
    if let Some(node) = stack.last_mut() {
        if node.children.is_empty() {
            node.text.get_or_insert_with(String::new).push_str(text);
        }
    }
}

fn xml_error(reader: &Reader<&[u8]>, message: &str) -> Error {
    Error::Xml {
        position: reader.buffer_position() as u64,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let root = parse_document(r#"<Root version="1.0"/>"#).unwrap();
        assert_eq!(root.tag, "Root");
        assert_eq!(root.attr("version"), Some("1.0"));
        assert!(root.children.is_empty());
        assert_eq!(root.text, None);
    }

    #[test]
    fn test_parse_with_declaration_and_comments() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- exported -->
<PathOfBuilding2>
    <Build level="1"/>
</PathOfBuilding2>"#;
        let root = parse_document(xml).unwrap();
        assert_eq!(root.tag, "PathOfBuilding2");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].attr("level"), Some("1"));
    }

    #[test]
    fn test_text_before_first_child_only() {
        let root = parse_document("<Item>lead<ModRange/>tail</Item>").unwrap();
        assert_eq!(root.text.as_deref(), Some("lead"));
    }

    #[test]
    fn test_entities_are_unescaped() {
        let root = parse_document(r#"<A name="a &amp; b">x &lt; y</A>"#).unwrap();
        assert_eq!(root.attr("name"), Some("a & b"));
        assert_eq!(root.text.as_deref(), Some("x < y"));
    }

    #[test]
    fn test_cdata_is_text() {
        let root = parse_document("<A><![CDATA[<raw>]]></A>").unwrap();
        assert_eq!(root.text.as_deref(), Some("<raw>"));
    }

    #[test]
    fn test_document_order_traversal() {
        let root = parse_document("<A><B><C/></B><D/><C/></A>").unwrap();
        let tags: Vec<_> = root.iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, ["A", "B", "C", "D", "C"]);
        assert_eq!(root.find_all("C").count(), 2);
        assert!(root.find("A").is_none());
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(parse_document(""), Err(Error::Format(_))));
    }

    #[test]
    fn test_unclosed_element() {
        assert!(parse_document("<A><B></B>").is_err());
    }

    #[test]
    fn test_mismatched_end_tag() {
        assert!(matches!(parse_document("<A></B>"), Err(Error::Xml { .. })));
    }

    #[test]
    fn test_multiple_roots() {
        assert!(matches!(parse_document("<A/><B/>"), Err(Error::Xml { .. })));
    }
}
