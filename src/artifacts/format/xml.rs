//! Canonical XML re-serialization
//!
//! Documents that differ only in insignificant whitespace, empty-element style
//! or namespace prefix spelling are rewritten into the same byte stream, so a
//! line diff of two canonical forms shows only meaningful changes.
//!
//! ## Layout rules
//!
//! - every start tag begins a new line, indented one unit per open ancestor
//! - an element with no content collapses to `<x/>`, whatever the source used
//! - an element whose first content is text keeps that text inline: `<n>42</n>`
//! - character data is trimmed; whitespace-only text counts as no content
//! - comments and processing instructions get their own line unless they follow
//!   inline text
//! - the output ends with exactly one newline
//!
//! ## Namespaces
//!
//! Every `xmlns`/`xmlns:p` declaration records an alias for its namespace URI.
//! Qualified names are rendered with the most recently declared alias for their
//! URI rather than with the prefix written in the source. The alias table lives
//! for the whole document and is never unwound when an element closes.

use crate::artifacts::format::charset;
use crate::errors::CanonicalizeError;
use quick_xml::Reader;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

pub const DEFAULT_INDENT: &str = "  ";

const XML_PREFIX: &str = "xml";
const XMLNS: &str = "xmlns";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlCanonicalizer {
    indent: String,
}

impl Default for XmlCanonicalizer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT)
    }
}

impl XmlCanonicalizer {
    pub fn new(indent: impl Into<String>) -> Self {
        XmlCanonicalizer {
            indent: indent.into(),
        }
    }

    /// Decode raw bytes (honouring BOM and declared charset), then canonicalize
    pub fn canonicalize_bytes(&self, bytes: &[u8]) -> Result<String, CanonicalizeError> {
        let text = charset::decode_document(bytes)?;
        self.canonicalize(&text)
    }

    pub fn canonicalize(&self, input: &str) -> Result<String, CanonicalizeError> {
        let mut reader = Reader::from_str(input);
        let mut serializer = Serializer::new(&self.indent);

        loop {
            let event = reader
                .read_event()
                .map_err(|e| syntax_error(&reader, e))?;

            match event {
                Event::Decl(decl) => {
                    let declaration = charset::relabel_as_utf8(utf8(&reader, &decl)?);
                    serializer.processing_instruction(&declaration);
                }
                Event::PI(pi) => serializer.processing_instruction(utf8(&reader, &pi)?),
                Event::DocType(doctype) => serializer.doctype(utf8(&reader, &doctype)?),
                Event::Start(start) => {
                    let element = parse_start(&reader, &start)?;
                    serializer.start_element(element);
                }
                Event::Empty(start) => {
                    let element = parse_start(&reader, &start)?;
                    serializer.start_element(element);
                    serializer.end_element();
                }
                Event::End(_) => serializer.end_element(),
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| syntax_error(&reader, e))?;
                    serializer.text(&text);
                }
                Event::CData(cdata) => serializer.text(utf8(&reader, &cdata)?),
                Event::Comment(comment) => serializer.comment(utf8(&reader, &comment)?),
                Event::Eof => break,
            }
        }

        serializer.finish()
    }
}

/// Position of the serializer relative to the most recent start tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineState {
    /// Nothing is pending; the next token starts on a fresh line
    Idle,
    /// A start tag was written without its closing `>`
    StartTagOpen,
    /// Text follows on the current line; end tags stay inline
    InlineContent,
}

#[derive(Debug)]
struct StartElement {
    name: String,
    attributes: Vec<(String, String)>,
}

#[derive(Debug)]
struct Serializer<'i> {
    output: String,
    indent: &'i str,
    state: LineState,
    open_elements: Vec<String>,
    scopes: Vec<Vec<(String, String)>>,
    aliases: HashMap<String, String>,
}

impl<'i> Serializer<'i> {
    fn new(indent: &'i str) -> Self {
        Serializer {
            output: String::new(),
            indent,
            state: LineState::Idle,
            open_elements: Vec::new(),
            scopes: Vec::new(),
            aliases: HashMap::new(),
        }
    }

    fn level(&self) -> usize {
        self.open_elements.len()
    }

    fn new_line(&mut self) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        for _ in 0..self.level() {
            self.output.push_str(self.indent);
        }
    }

    fn close_start_tag(&mut self) {
        if self.state == LineState::StartTagOpen {
            self.output.push('>');
            self.state = LineState::InlineContent;
        }
    }

    fn processing_instruction(&mut self, raw: &str) {
        self.close_start_tag();
        self.new_line();

        self.output.push_str("<?");
        self.output.push_str(&collapse_unquoted_whitespace(raw));
        self.output.push_str("?>");

        self.state = LineState::Idle;
    }

    fn doctype(&mut self, raw: &str) {
        self.close_start_tag();
        self.new_line();
        self.output.push_str("<!DOCTYPE ");
        self.output.push_str(raw.trim());
        self.output.push('>');
        self.state = LineState::Idle;
    }

    fn start_element(&mut self, element: StartElement) {
        self.close_start_tag();
        self.new_line();

        let declarations = element
            .attributes
            .iter()
            .filter_map(|(key, value)| {
                namespace_declaration(key).map(|alias| (alias.to_string(), value.clone()))
            })
            .collect::<Vec<_>>();
        self.scopes.push(declarations);

        let mut attributes = String::new();
        for (key, value) in &element.attributes {
            if let Some(alias) = namespace_declaration(key) {
                self.aliases.insert(value.clone(), alias.to_string());
            }
            attributes.push(' ');
            attributes.push_str(&self.render_name(key, false));
            attributes.push_str("=\"");
            attributes.push_str(&escape(value.as_str()));
            attributes.push('"');
        }

        let name = self.render_name(&element.name, true);
        self.output.push('<');
        self.output.push_str(&name);
        self.output.push_str(&attributes);

        self.open_elements.push(name);
        self.state = LineState::StartTagOpen;
    }

    fn end_element(&mut self) {
        let Some(name) = self.open_elements.pop() else {
            return;
        };

        match self.state {
            LineState::StartTagOpen => self.output.push_str("/>"),
            LineState::InlineContent => {
                self.output.push_str("</");
                self.output.push_str(&name);
                self.output.push('>');
            }
            LineState::Idle => {
                self.new_line();
                self.output.push_str("</");
                self.output.push_str(&name);
                self.output.push('>');
            }
        }

        self.scopes.pop();
        self.state = LineState::Idle;
    }

    fn text(&mut self, raw: &str) {
        let text = raw.trim();
        if text.is_empty() {
            return;
        }

        self.close_start_tag();
        self.output.push_str(&partial_escape(text));
        self.state = LineState::InlineContent;
    }

    fn comment(&mut self, raw: &str) {
        match self.state {
            LineState::StartTagOpen => {
                self.output.push('>');
                self.new_line();
                self.state = LineState::Idle;
            }
            LineState::InlineContent => {}
            LineState::Idle => self.new_line(),
        }

        self.output.push_str("<!--");
        self.output.push_str(raw);
        self.output.push_str("-->");
    }

    fn finish(mut self) -> Result<String, CanonicalizeError> {
        if !self.open_elements.is_empty() {
            return Err(CanonicalizeError::Unbalanced {
                open: self.open_elements.len(),
            });
        }

        self.output.push('\n');
        Ok(self.output)
    }

    fn lookup_namespace(&self, prefix: &str) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|scope| scope.iter().rev())
            .find(|(alias, _)| alias == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    fn render_name(&self, qname: &str, is_element: bool) -> String {
        let (prefix, local) = match qname.split_once(':') {
            Some((prefix, local)) => (Some(prefix), local),
            None => (None, qname),
        };

        let uri = match prefix {
            Some(XML_PREFIX) | Some(XMLNS) => None,
            None if local == XMLNS => None,
            Some(prefix) => self.lookup_namespace(prefix),
            None if is_element => self.lookup_namespace(""),
            None => None,
        };

        // attributes never pick up the default namespace
        match uri.and_then(|uri| self.aliases.get(uri)) {
            Some(alias) if alias.is_empty() && is_element => local.to_string(),
            Some(alias) if alias.is_empty() => qname.to_string(),
            Some(alias) => format!("{alias}:{local}"),
            None => qname.to_string(),
        }
    }
}

/// Whitespace runs outside quoted values become one space
fn collapse_unquoted_whitespace(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut quote = None;
    let mut pending_space = false;

    for c in raw.trim().chars() {
        match quote {
            Some(open) => {
                output.push(c);
                if c == open {
                    quote = None;
                }
            }
            None if c.is_whitespace() => pending_space = true,
            None => {
                if pending_space {
                    output.push(' ');
                    pending_space = false;
                }
                if c == '"' || c == '\'' {
                    quote = Some(c);
                }
                output.push(c);
            }
        }
    }

    output
}

/// `xmlns` declares the default namespace (alias ""), `xmlns:p` declares `p`
fn namespace_declaration(key: &str) -> Option<&str> {
    if key == XMLNS {
        return Some("");
    }

    key.strip_prefix("xmlns:")
}

fn parse_start(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<StartElement, CanonicalizeError> {
    let name = utf8(reader, start.name().as_ref())?.to_string();

    let attributes = start
        .attributes()
        .map(|attribute| {
            let attribute = attribute.map_err(|e| syntax_error(reader, e))?;
            let key = utf8(reader, attribute.key.as_ref())?.to_string();
            let value = attribute
                .unescape_value()
                .map_err(|e| syntax_error(reader, e))?
                .into_owned();
            Ok((key, value))
        })
        .collect::<Result<Vec<_>, CanonicalizeError>>()?;

    Ok(StartElement { name, attributes })
}

fn utf8<'b>(reader: &Reader<&[u8]>, bytes: &'b [u8]) -> Result<&'b str, CanonicalizeError> {
    std::str::from_utf8(bytes).map_err(|e| syntax_error(reader, e))
}

fn syntax_error(reader: &Reader<&[u8]>, error: impl std::fmt::Display) -> CanonicalizeError {
    CanonicalizeError::Syntax {
        position: reader.buffer_position() as u64,
        message: error.to_string(),
    }
}
