//! Typed markup tree built from KML text.
//!
//! Children are always stored as `tag -> Vec<MarkupElement>`, so a single
//! `<Placemark>` and a run of them are read the same way.

use std::borrow::Cow;
use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{KmzError, KmzResult};

/// One element of a parsed markup document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: BTreeMap<String, Vec<MarkupElement>>,
    text: Option<String>,
}

impl MarkupElement {
    /// Local tag name (namespace prefix removed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Text and CDATA content, unescaped.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// All children with the given tag, in document order.
    pub fn children(&self, name: &str) -> &[MarkupElement] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First child with the given tag.
    pub fn child(&self, name: &str) -> Option<&MarkupElement> {
        self.children(name).first()
    }

    /// Trimmed text of the first child with the given tag.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .and_then(MarkupElement::text)
            .map(str::trim)
    }

    /// Follow the first child at each step of `path`.
    pub fn path(&self, path: &[&str]) -> Option<&MarkupElement> {
        path.iter()
            .try_fold(self, |element, name| element.child(name))
    }

    /// Iterate over every child grouping as `(tag, elements)`.
    pub fn child_groups(&self) -> impl Iterator<Item = (&str, &[MarkupElement])> {
        self.children
            .iter()
            .map(|(name, elements)| (name.as_str(), elements.as_slice()))
    }

    /// Every element below this one with the given tag, depth-first.
    pub fn descendants(&self, name: &str) -> Vec<&MarkupElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a MarkupElement>) {
        for (_, group) in self.child_groups() {
            for child in group {
                if child.name == name {
                    found.push(child);
                }
                child.collect_descendants(name, found);
            }
        }
    }

    /// Adjacent text and CDATA chunks are joined with a single space.
    fn push_text(&mut self, chunk: &str) {
        if chunk.is_empty() {
            return;
        }
        match &mut self.text {
            Some(text) => {
                text.push(' ');
                text.push_str(chunk);
            }
            None => self.text = Some(chunk.to_string()),
        }
    }
}

/// Parse markup text into its root element.
///
/// Any well-formedness error aborts the parse; no partial tree is returned.
pub fn parse_markup(text: &str) -> KmzResult<MarkupElement> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);
    reader.check_end_names(true);

    let mut stack: Vec<MarkupElement> = Vec::new();
    let mut root: Option<MarkupElement> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(open_element(&e, position)?),
            Ok(Event::Empty(e)) => {
                let element = open_element(&e, position)?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Ok(Event::End(e)) => {
                let element = stack.pop().ok_or_else(|| {
                    KmzError::malformed(
                        position,
                        format!(
                            "Unexpected closing tag </{}>",
                            String::from_utf8_lossy(e.local_name().as_ref())
                        ),
                    )
                })?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Ok(Event::Text(t)) => {
                if let Some(current) = stack.last_mut() {
                    let chunk = t
                        .unescape()
                        .unwrap_or_else(|_| String::from_utf8_lossy(&t).into_owned().into());
                    current.push_text(&chunk);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(current) = stack.last_mut() {
                    let chunk = std::str::from_utf8(&c)
                        .map_err(|e| KmzError::malformed(position, format!("CDATA: {}", e)))?;
                    current.push_text(chunk.trim());
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(KmzError::malformed(reader.buffer_position(), e.to_string())),
        }
    }

    if let Some(open) = stack.last() {
        return Err(KmzError::malformed(
            text.len(),
            format!("Unclosed element <{}>", open.name),
        ));
    }

    root.ok_or_else(|| KmzError::malformed(0, "Document has no root element"))
}

fn open_element(start: &BytesStart<'_>, position: usize) -> KmzResult<MarkupElement> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| KmzError::malformed(position, e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .unwrap_or_else(|_| Cow::Owned(String::from_utf8_lossy(&attr.value).into_owned()))
            .into_owned();
        attributes.push((key, value));
    }

    Ok(MarkupElement {
        name,
        attributes,
        ..Default::default()
    })
}

fn attach(
    stack: &mut [MarkupElement],
    root: &mut Option<MarkupElement>,
    element: MarkupElement,
    position: usize,
) -> KmzResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent
                .children
                .entry(element.name.clone())
                .or_default()
                .push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(KmzError::malformed(position, "Multiple root elements")),
    }
}
