//! Minimal element tree over `quick-xml` events.
//!
//! Start tags, comments, text and everything else are kept in their raw form,
//! so writing an unmodified tree reproduces the input byte for byte.

use std::io::{Cursor, Write};

use quick_xml::{
    Reader, Writer,
    escape::{escape, unescape},
    events::{BytesStart, BytesText, Event},
};

use crate::{error::XmlError, xml::attr};

/// Parsed document: the root element plus whatever surrounds it.
#[derive(Debug, Clone)]
pub struct Document {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

/// Element node.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    /// Raw start-tag content: name followed by attributes, still escaped.
    content: String,
    children: Vec<Node>,
    /// End tag as written in the source, `None` for a self-closing element.
    end: Option<String>,
}

/// Child of an element.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    /// Text, references, CDATA, comments and processing instructions.
    Other(Event<'static>),
    /// Markup copied verbatim from the source.
    Raw(String),
}

impl Document {
    /// Parse document text.
    ///
    /// A leading byte order mark is dropped. Exactly one root element is
    /// required; only whitespace, comments and processing instructions may
    /// surround it.
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = Reader::from_str(text);

        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let offset = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(source) => {
                    return Err(XmlError::Syntax {
                        position: reader.error_position(),
                        source,
                    });
                }
            };

            let raw = text.get(offset..reader.buffer_position() as usize);

            match event {
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(XmlError::OutsideRoot {
                            position: reader.buffer_position(),
                        });
                    }
                    stack.push(Element::open(&start)?);
                }
                Event::Empty(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(XmlError::OutsideRoot {
                            position: reader.buffer_position(),
                        });
                    }
                    attach(&mut stack, &mut root, Element::open(&start)?);
                }
                Event::End(end) => {
                    let Some(mut element) = stack.pop() else {
                        return Err(XmlError::UnexpectedEnd {
                            name: String::from_utf8_lossy(&end).into_owned(),
                        });
                    };
                    element.end = Some(match raw {
                        Some(raw) => raw.to_string(),
                        None => format!("</{}>", std::str::from_utf8(&end)?),
                    });
                    attach(&mut stack, &mut root, element);
                }
                Event::Eof => break,
                Event::DocType(doctype) if stack.is_empty() => {
                    let node = match raw {
                        Some(raw) => Node::Raw(raw.to_string()),
                        None => Node::Other(Event::DocType(doctype.into_owned())),
                    };
                    if root.is_none() {
                        prolog.push(node);
                    } else {
                        epilog.push(node);
                    }
                }
                other => match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Other(other.into_owned())),
                    None => {
                        if !is_prolog_event(&other) {
                            return Err(XmlError::OutsideRoot {
                                position: reader.buffer_position(),
                            });
                        }
                        let node = Node::Other(other.into_owned());
                        if root.is_none() {
                            prolog.push(node);
                        } else {
                            epilog.push(node);
                        }
                    }
                },
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed { name: open.name });
        }
        let root = root.ok_or(XmlError::MissingRoot)?;

        Ok(Document {
            prolog,
            root,
            epilog,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serialize the tree back to text.
    pub fn to_xml_string(&self) -> Result<String, XmlError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        for node in &self.prolog {
            node.write(&mut writer)?;
        }
        self.root.write(&mut writer)?;
        for node in &self.epilog {
            node.write(&mut writer)?;
        }

        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| XmlError::Utf8(e.utf8_error()))
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn is_prolog_event(event: &Event<'_>) -> bool {
    match event {
        Event::Text(text) => text.iter().all(u8::is_ascii_whitespace),
        Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => true,
        _ => false,
    }
}

impl Element {
    fn open(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        Ok(Element {
            name: std::str::from_utf8(start.name().as_ref())?.to_string(),
            content: std::str::from_utf8(start)?.to_string(),
            children: Vec::new(),
            end: None,
        })
    }

    /// Tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Other(_) | Node::Raw(_) => None,
        })
    }

    /// First direct child element named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Mutable access to the first direct child element named `name`.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// First element named `name` in document order, this element included.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.elements().find_map(|e| e.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(e) => e.find_mut(name),
            Node::Other(_) | Node::Raw(_) => None,
        })
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        attr::value_range(&self.content, name).is_some()
    }

    /// Unescaped value of attribute `name`.
    ///
    /// A value with a broken entity reference is returned as written.
    pub fn attribute(&self, name: &str) -> Option<String> {
        let raw = attr::raw_value(&self.content, name)?;
        Some(
            unescape(raw)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| raw.to_string()),
        )
    }

    /// Overwrite an existing attribute. Returns `false` when the attribute
    /// is absent; attributes are never added.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match attr::replace_value(&self.content, name, &escape(value)) {
            Some(content) => {
                self.content = content;
                true
            }
            None => false,
        }
    }

    /// Concatenated text of all descendants, entity references resolved.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Element(e) => e.collect_text(out),
                Node::Other(Event::Text(text)) => {
                    let raw = String::from_utf8_lossy(text);
                    match unescape(&raw) {
                        Ok(v) => out.push_str(&v),
                        Err(_) => out.push_str(&raw),
                    }
                }
                Node::Other(Event::CData(data)) => out.push_str(&String::from_utf8_lossy(data)),
                Node::Other(Event::GeneralRef(reference)) => {
                    let raw = format!("&{};", String::from_utf8_lossy(reference));
                    match unescape(&raw) {
                        Ok(v) => out.push_str(&v),
                        Err(_) => out.push_str(&raw),
                    }
                }
                Node::Other(_) | Node::Raw(_) => {}
            }
        }
    }

    /// Replace all children with a single text node.
    pub fn set_text_content(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children
                .push(Node::Other(Event::Text(BytesText::new(text).into_owned())));
        }
        if self.end.is_none() {
            self.end = Some(format!("</{}>", self.name));
        }
    }

    fn write(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<(), XmlError> {
        let start = BytesStart::from_content(self.content.as_str(), self.name.len());
        match &self.end {
            None => writer.write_event(Event::Empty(start))?,
            Some(end) => {
                writer.write_event(Event::Start(start))?;
                for child in &self.children {
                    child.write(writer)?;
                }
                writer.get_mut().write_all(end.as_bytes())?;
            }
        }
        Ok(())
    }
}

impl Node {
    fn write(&self, writer: &mut Writer<Cursor<Vec<u8>>>) -> Result<(), XmlError> {
        match self {
            Node::Element(e) => e.write(writer)?,
            Node::Other(event) => writer.write_event(event.clone())?,
            Node::Raw(raw) => writer.get_mut().write_all(raw.as_bytes())?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- game settings -->
<Settings>
  <version value="27" />
  <graphics>
    <Tessellation value="2"/>
    <Tessellation value="3"/>
  </graphics>
  <VideoCardDescription>NVIDIA &amp; Co</VideoCardDescription>
</Settings>
"#;

    #[test]
    fn test_round_trip_is_byte_identical() {
        let doc = Document::parse(DOC).unwrap();
        assert_eq!(doc.to_xml_string().unwrap(), DOC);

        for text in [
            "<?xml version=\"1.0\"?>\n<S><g><a value=\"1\"/></g ></S>",
            "<!DOCTYPE  S>\n<S><a value=\"1\" ></a\n></S>",
        ] {
            let doc = Document::parse(text).unwrap();
            assert_eq!(doc.to_xml_string().unwrap(), text);
        }
    }

    #[test]
    fn test_navigation() {
        let doc = Document::parse(DOC).unwrap();
        let root = doc.root();
        assert_eq!(root.name(), "Settings");
        assert_eq!(
            root.elements().map(Element::name).collect::<Vec<_>>(),
            ["version", "graphics", "VideoCardDescription"]
        );

        let tess = root.child("graphics").and_then(|g| g.child("Tessellation"));
        assert_eq!(tess.and_then(|t| t.attribute("value")).as_deref(), Some("2"));

        let hw = root.find("VideoCardDescription").unwrap();
        assert_eq!(hw.text_content(), "NVIDIA & Co");
        assert!(root.find("Missing").is_none());
    }

    #[test]
    fn test_set_attribute_touches_only_value() {
        let mut doc = Document::parse(DOC).unwrap();
        let version = doc.root_mut().child_mut("version").unwrap();
        assert!(version.set_attribute("value", "28"));
        assert!(!version.set_attribute("missing", "1"));

        let expected = DOC.replace(r#"<version value="27" />"#, r#"<version value="28" />"#);
        assert_eq!(doc.to_xml_string().unwrap(), expected);
    }

    #[test]
    fn test_set_attribute_escapes() {
        let mut doc = Document::parse(r#"<a><b value="x"/></a>"#).unwrap();
        doc.root_mut()
            .child_mut("b")
            .unwrap()
            .set_attribute("value", "<\"&\">");
        assert_eq!(
            doc.root().child("b").unwrap().attribute("value").as_deref(),
            Some("<\"&\">")
        );
    }

    #[test]
    fn test_set_text_content() {
        let mut doc = Document::parse("<a><VideoCardDescription/></a>").unwrap();
        doc.root_mut()
            .find_mut("VideoCardDescription")
            .unwrap()
            .set_text_content("AMD <RX>");
        assert_eq!(
            doc.to_xml_string().unwrap(),
            "<a><VideoCardDescription>AMD &lt;RX&gt;</VideoCardDescription></a>"
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Document::parse(""), Err(XmlError::MissingRoot)));
        assert!(matches!(
            Document::parse("<a></a><b/>"),
            Err(XmlError::OutsideRoot { .. })
        ));
        assert!(matches!(
            Document::parse("text<a/>"),
            Err(XmlError::OutsideRoot { .. })
        ));
        assert!(Document::parse("<a><b></a>").is_err());
        assert!(Document::parse("<a>").is_err());
    }

    #[test]
    fn test_byte_order_mark_is_dropped() {
        let doc = Document::parse("\u{feff}<a/>").unwrap();
        assert_eq!(doc.to_xml_string().unwrap(), "<a/>");
    }
}
