//! Streaming markup events.
//!
//! [`MarkupHandler`] is the seam between a document tokenizer and the converter; [`drive`] feeds
//! a handler from a `roxmltree` document in document order.

use std::borrow::Cow;

use crate::error::Result;

const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute<'a> {
    /// Qualified name, e.g. `fill`, `xml:id` or `xlink:href`.
    pub name: Cow<'a, str>,
    pub value: &'a str,
}

impl<'a> XmlAttribute<'a> {
    pub fn new(name: &'a str, value: &'a str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            value,
        }
    }
}

pub trait MarkupHandler {
    fn element_start(
        &mut self,
        name: &str,
        namespace: Option<&str>,
        attributes: &[XmlAttribute<'_>],
    ) -> Result<()>;

    fn element_end(&mut self, name: &str, namespace: Option<&str>) -> Result<()>;

    /// Character data; whitespace-only runs are never delivered.
    fn text_content(&mut self, text: &str, is_cdata: bool) -> Result<()>;
}

fn parse_document(text: &str) -> Result<roxmltree::Document<'_>> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    Ok(roxmltree::Document::parse_with_options(text, options)?)
}

fn qualified_name<'a>(attr: &roxmltree::Attribute<'a, '_>) -> Cow<'a, str> {
    match attr.namespace() {
        Some(XML_NS) => Cow::Owned(format!("xml:{}", attr.name())),
        Some(XLINK_NS) => Cow::Owned(format!("xlink:{}", attr.name())),
        _ => Cow::Borrowed(attr.name()),
    }
}

/// Parses `text` and replays it into `handler` as start/end/text events.
pub fn drive<H: MarkupHandler + ?Sized>(text: &str, handler: &mut H) -> Result<()> {
    let doc = parse_document(text)?;
    replay(doc.root_element(), handler)
}

fn replay<H: MarkupHandler + ?Sized>(
    node: roxmltree::Node<'_, '_>,
    handler: &mut H,
) -> Result<()> {
    let tag = node.tag_name();
    let attributes: Vec<XmlAttribute<'_>> = node
        .attributes()
        .map(|attr| XmlAttribute {
            name: qualified_name(&attr),
            value: attr.value(),
        })
        .collect();
    handler.element_start(tag.name(), tag.namespace(), &attributes)?;
    for child in node.children() {
        if child.is_element() {
            replay(child, handler)?;
        } else if child.is_text() {
            if let Some(text) = child.text() {
                if !text.trim().is_empty() {
                    handler.text_content(text, false)?;
                }
            }
        }
    }
    handler.element_end(tag.name(), tag.namespace())
}
