//! XML to JSON conversion for provider responses
//!
//! Produces the same shape as the common `xml2js` settings used by web
//! frontends (`explicitArray: false`, `ignoreAttrs: true`):
//!
//! - namespace prefixes are dropped from element names
//! - attributes are ignored
//! - a text-only element becomes a string, an empty element becomes `""`
//! - an element with children becomes an object; non-blank text mixed with
//!   children is kept under [`TEXT_KEY`]
//! - a repeated sibling name becomes an array only when it occurs more than
//!   once
//! - the root element is the single top-level key

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::error::XmlError;

/// Key holding text that sits next to child elements
pub const TEXT_KEY: &str = "_";

/// Deepest element nesting accepted, root included
pub const MAX_DEPTH: usize = 128;

/// An element being assembled while its content is read
struct Frame {
    name: String,
    children: Map<String, Value>,
    has_children: bool,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Map::new(),
            has_children: false,
            text: String::new(),
        }
    }

    fn add_child(&mut self, name: String, value: Value) {
        self.has_children = true;
        match self.children.get_mut(&name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }

    fn into_value(self) -> (String, Value) {
        if !self.has_children {
            return (self.name, Value::String(self.text));
        }
        let mut children = self.children;
        if !self.text.trim().is_empty() {
            children.insert(TEXT_KEY.to_string(), Value::String(self.text));
        }
        (self.name, Value::Object(children))
    }
}

fn local_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.local_name().as_ref()).into_owned()
}

/// Attach a finished element to its parent, or make it the document root
fn close_frame(
    frame: Frame,
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
) -> Result<(), XmlError> {
    let (name, value) = frame.into_value();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => {
            if root.is_some() {
                return Err(XmlError::MultipleRoots);
            }
            *root = Some((name, value));
        }
    }
    Ok(())
}

fn append_text(stack: &mut [Frame], text: &str) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(frame) => {
            frame.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(XmlError::TextOutsideRoot),
    }
}

/// Convert an XML document into a JSON tree
pub fn xml_to_json(xml: &str) -> Result<Value, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(XmlError::Syntax {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })
            }
        };

        match event {
            Event::Start(start) => {
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::MultipleRoots);
                }
                if stack.len() >= MAX_DEPTH {
                    return Err(XmlError::TooDeep { limit: MAX_DEPTH });
                }
                stack.push(Frame::new(local_name(&start)));
            }
            Event::Empty(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(XmlError::TooDeep { limit: MAX_DEPTH });
                }
                let frame = Frame::new(local_name(&start));
                close_frame(frame, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or(XmlError::UnbalancedEnd {
                    position: reader.buffer_position() as u64,
                })?;
                close_frame(frame, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| XmlError::Syntax {
                    position: reader.buffer_position() as u64,
                    message: e.to_string(),
                })?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                append_text(&mut stack, &text)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::UnexpectedEof { open: open.name });
    }

    let (name, value) = root.ok_or(XmlError::EmptyDocument)?;
    let mut document = Map::new();
    document.insert(name, value);
    Ok(Value::Object(document))
}

/// Walk a converted document along a path of element names
pub fn find_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| node.get(*key))
}

/// True when a converted element carries nothing: missing, null or blank text
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Text content of a converted element
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map.get(TEXT_KEY).and_then(text_of),
        Value::Array(items) => items.first().and_then(text_of),
        _ => None,
    }
}

/// Extract the reason of a SOAP Fault carried in the envelope body.
///
/// Understands both SOAP 1.2 (`Reason/Text`) and SOAP 1.1 (`faultstring`).
pub fn soap_fault_reason(document: &Value) -> Option<String> {
    let fault = find_path(document, &["Envelope", "Body", "Fault"])?;
    let reason = find_path(fault, &["Reason", "Text"])
        .or_else(|| fault.get("faultstring"))
        .and_then(text_of)
        .filter(|s| !s.trim().is_empty());
    Some(reason.unwrap_or_else(|| "SOAP fault".to_string()))
}
