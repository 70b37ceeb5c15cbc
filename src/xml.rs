//! Minimal element tree for BeerXML documents.
//!
//! BeerXML carries all data in element text, so attributes are ignored on
//! read and never written. Leaf text is kept verbatim; whitespace-only text
//! in an element that has children is indentation and is dropped.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::FermentableError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Appends `child` and returns a reference to it.
    pub fn push(&mut self, child: XmlElement) -> &mut XmlElement {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn push_text_child(&mut self, name: &str, text: impl Into<String>) {
        self.children.push(XmlElement::with_text(name, text));
    }

    /// Tag names compare ASCII case-insensitively.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is_named(name))
    }

    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.is_named(name))
    }

    /// Parse a document and return its root element.
    pub fn parse(input: &str) -> Result<XmlElement, FermentableError> {
        let mut reader = Reader::from_str(input);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    if root.is_some() {
                        return Err(FermentableError::Format(
                            "more than one root element".to_string(),
                        ));
                    }
                    stack.push(XmlElement::new(element_name(&start)?));
                }
                Event::Empty(start) => {
                    let element = XmlElement::new(element_name(&start)?);
                    close_element(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let mut element = stack.pop().ok_or_else(|| {
                        FermentableError::Format("unexpected closing tag".to_string())
                    })?;
                    if !element.children.is_empty() && element.text.trim().is_empty() {
                        element.text.clear();
                    }
                    close_element(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let value = text.unescape()?;
                    append_text(&mut stack, &value)?;
                }
                Event::CData(data) => {
                    let value = String::from_utf8(data.into_inner().into_owned()).map_err(|e| {
                        FermentableError::Format(format!("CDATA is not valid UTF-8: {}", e))
                    })?;
                    append_text(&mut stack, &value)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(FermentableError::Format(format!(
                "unterminated element <{}>",
                open.name
            )));
        }

        root.ok_or_else(|| FermentableError::Format("document has no root element".to_string()))
    }

    /// Serialize as a standalone document with an XML declaration.
    pub fn to_xml_string(&self) -> Result<String, FermentableError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut writer, self)?;

        String::from_utf8(writer.into_inner())
            .map_err(|e| FermentableError::Format(format!("writer produced invalid UTF-8: {}", e)))
    }
}

fn element_name(start: &BytesStart<'_>) -> Result<String, FermentableError> {
    std::str::from_utf8(start.name().as_ref())
        .map(str::to_string)
        .map_err(|e| FermentableError::Format(format!("tag name is not valid UTF-8: {}", e)))
}

fn close_element(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), FermentableError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(FermentableError::Format(
            "more than one root element".to_string(),
        )),
    }
}

fn append_text(stack: &mut [XmlElement], value: &str) -> Result<(), FermentableError> {
    match stack.last_mut() {
        Some(element) => {
            element.text.push_str(value);
            Ok(())
        }
        None if value.trim().is_empty() => Ok(()),
        None => Err(FermentableError::Format(format!(
            "text outside of the root element: {:?}",
            value
        ))),
    }
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &XmlElement,
) -> Result<(), FermentableError> {
    let name = element.name.as_str();
    if element.children.is_empty() && element.text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new(name)))?;
    if !element.text.is_empty() {
        writer.write_event(Event::Text(BytesText::new(&element.text)))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
