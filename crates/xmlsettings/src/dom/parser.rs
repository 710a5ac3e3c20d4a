//! Markup parser building a [`Document`]

use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::error::{Error, ErrorKind, Result, Span};
use crate::lexer::Scanner;

/// Default nesting limit for elements
pub const DEFAULT_MAX_DEPTH: u16 = 256;

/// Markup parser
#[derive(Debug)]
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    max_depth: u16,
}

impl<'a> Parser<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self::with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    /// Parser with an element nesting limit (0 means unlimited)
    pub const fn with_max_depth(input: &'a [u8], max_depth: u16) -> Self {
        Self {
            scanner: Scanner::new(input),
            max_depth,
        }
    }

    /// Parse a complete document
    ///
    /// Top-level elements become children of the document node. The prolog,
    /// comments and processing instructions are skipped.
    pub fn parse(mut self) -> Result<Document> {
        let mut doc = Document::new();
        let root = doc.root();

        loop {
            self.scanner.skip_whitespace();
            if self.scanner.is_eof() {
                break;
            }
            if self.scanner.starts_with(b"<?") {
                self.skip_until(b"?>")?;
            } else if self.scanner.starts_with(b"<!--") {
                self.skip_until(b"-->")?;
            } else if self.scanner.starts_with(b"<!") {
                self.skip_doctype()?;
            } else if self.scanner.current() == Some(b'<') {
                self.parse_element(&mut doc, root)?;
            } else {
                return Err(self.error_here(ErrorKind::InvalidToken, "text outside of an element"));
            }
        }

        if doc.children(root).next().is_none() {
            return Err(Error::at(ErrorKind::NoDocumentElement, self.scanner.position()));
        }
        Ok(doc)
    }

    /// Parse one element and everything nested in it
    ///
    /// Open elements are tracked on an explicit stack, so nesting depth is
    /// bounded by memory rather than by the call stack.
    fn parse_element(&mut self, doc: &mut Document, parent: NodeId) -> Result<()> {
        let mut open: Vec<(NodeId, String)> = Vec::new();
        self.parse_start_tag(doc, parent, &mut open)?;

        while let Some(id) = open.last().map(|(id, _)| *id) {
            if self.scanner.starts_with(b"</") {
                self.scanner.advance_by(2);
                let close_pos = self.scanner.position();
                let close_name = self.parse_name()?;
                let Some((_, name)) = open.pop() else {
                    break;
                };
                if close_name != name {
                    return Err(Error::at(
                        ErrorKind::MismatchedTag {
                            expected: name,
                            found: close_name,
                        },
                        close_pos,
                    ));
                }
                self.scanner.skip_whitespace();
                self.expect_byte(b'>')?;
            } else if self.scanner.starts_with(b"<!--") {
                self.skip_until(b"-->")?;
            } else if self.scanner.starts_with(b"<![CDATA[") {
                self.scanner.advance_by(9);
                let text = self.take_until(b"]]>")?;
                doc.push_text(id, text);
            } else if self.scanner.starts_with(b"<?") {
                self.skip_until(b"?>")?;
            } else if self.scanner.current() == Some(b'<') {
                self.parse_start_tag(doc, id, &mut open)?;
            } else if self.scanner.is_eof() {
                let name = open.last().map_or("", |(_, name)| name.as_str());
                return Err(Error::with_message(
                    ErrorKind::UnexpectedEof,
                    Span::at(self.scanner.position()),
                    format!("unterminated element <{name}>"),
                ));
            } else if let Some(text) = self.parse_text()? {
                doc.push_text(id, text);
            }
        }
        Ok(())
    }

    /// Parse `<name attrs>` or `<name attrs/>` under `parent`
    ///
    /// Elements left open are pushed onto `open`.
    fn parse_start_tag(
        &mut self,
        doc: &mut Document,
        parent: NodeId,
        open: &mut Vec<(NodeId, String)>,
    ) -> Result<()> {
        let depth = open.len() + 1;
        if self.max_depth > 0 && depth > usize::from(self.max_depth) {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.max_depth,
                },
                self.scanner.position(),
            ));
        }

        self.expect_byte(b'<')?;
        if self.scanner.current() == Some(b'/') {
            return Err(self.error_here(ErrorKind::InvalidToken, "unexpected closing tag"));
        }

        let name = self.parse_name()?;
        let Some(id) = doc.append_child(parent, &name) else {
            return Err(self.error_here(ErrorKind::InvalidToken, "detached parent"));
        };
        self.parse_attributes(doc, id)?;

        if self.scanner.consume(b'/') {
            return self.expect_byte(b'>');
        }
        self.expect_byte(b'>')?;
        open.push((id, name));
        Ok(())
    }

    fn parse_attributes(&mut self, doc: &mut Document, id: NodeId) -> Result<()> {
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.current() {
                Some(b'/' | b'>') => return Ok(()),
                Some(_) => {}
                None => return Err(Error::at(ErrorKind::UnexpectedEof, self.scanner.position())),
            }

            let name_pos = self.scanner.position();
            let name = self.parse_name()?;
            self.scanner.skip_whitespace();
            self.expect_byte(b'=')?;
            self.scanner.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if doc.attribute(id, &name).is_some() {
                return Err(Error::at(ErrorKind::DuplicateAttribute { name }, name_pos));
            }
            doc.append_attribute(id, &name, value);
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.scanner.current() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => {
                return Err(self.error_here(ErrorKind::InvalidToken, "expected quoted attribute value"))
            }
        };
        self.scanner.advance();

        let start = self.scanner.pos();
        let start_pos = self.scanner.position();
        while let Some(b) = self.scanner.current() {
            if b == quote {
                let raw = self.scanner.slice_from(start);
                self.scanner.advance();
                return decode_entities(bytes_to_str(raw, start_pos)?, start_pos);
            }
            self.scanner.advance();
        }

        Err(Error::with_message(
            ErrorKind::UnexpectedEof,
            Span::at(self.scanner.position()),
            "unterminated attribute value",
        ))
    }

    fn parse_text(&mut self) -> Result<Option<String>> {
        let start = self.scanner.pos();
        let start_pos = self.scanner.position();
        while let Some(b) = self.scanner.current() {
            if b == b'<' {
                break;
            }
            self.scanner.advance();
        }

        let raw = bytes_to_str(self.scanner.slice_from(start), start_pos)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        decode_entities(raw, start_pos).map(Some)
    }

    fn parse_name(&mut self) -> Result<String> {
        let start_pos = self.scanner.position();
        let start = self.scanner.pos();

        match self.scanner.current() {
            Some(first) if is_name_start(first) => self.scanner.advance(),
            Some(_) => return Err(Error::at(ErrorKind::InvalidToken, start_pos)),
            None => return Err(Error::at(ErrorKind::UnexpectedEof, start_pos)),
        }
        while let Some(b) = self.scanner.current() {
            if is_name_char(b) {
                self.scanner.advance();
            } else {
                break;
            }
        }

        bytes_to_str(self.scanner.slice_from(start), start_pos).map(str::to_string)
    }

    fn skip_doctype(&mut self) -> Result<()> {
        // an internal subset may itself contain '>'
        let mut bracket_depth = 0usize;
        while let Some(b) = self.scanner.current() {
            self.scanner.advance();
            match b {
                b'[' => bracket_depth += 1,
                b']' => bracket_depth = bracket_depth.saturating_sub(1),
                b'>' if bracket_depth == 0 => return Ok(()),
                _ => {}
            }
        }
        Err(self.error_here(ErrorKind::UnexpectedEof, "unterminated declaration"))
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        self.take_until(pattern).map(drop)
    }

    /// Consume up to and including `pattern`, returning the bytes before it
    fn take_until(&mut self, pattern: &[u8]) -> Result<String> {
        let start = self.scanner.pos();
        let start_pos = self.scanner.position();
        while !self.scanner.is_eof() {
            if self.scanner.starts_with(pattern) {
                let text = bytes_to_str(self.scanner.slice_from(start), start_pos)?.to_string();
                self.scanner.advance_by(pattern.len());
                return Ok(text);
            }
            self.scanner.advance();
        }
        Err(self.error_here(ErrorKind::UnexpectedEof, "unterminated markup"))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.scanner.consume(expected) {
            Ok(())
        } else if self.scanner.is_eof() {
            Err(Error::at(ErrorKind::UnexpectedEof, self.scanner.position()))
        } else {
            Err(self.error_here(
                ErrorKind::InvalidToken,
                &format!("expected '{}'", char::from(expected)),
            ))
        }
    }

    fn error_here(&self, kind: ErrorKind, message: &str) -> Error {
        Error::with_message(kind, Span::at(self.scanner.position()), message)
    }
}

fn bytes_to_str(bytes: &[u8], pos: crate::error::Pos) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| Error::at(ErrorKind::InvalidUtf8, pos))
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_entities(input: &str, pos: crate::error::Pos) -> Result<String> {
    if !input.contains('&') {
        return Ok(input.to_string());
    }

    let mut result = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        let (before, after) = rest.split_at(amp);
        result.push_str(before);

        let Some(end) = after.find(';') else {
            return Err(Error::at(ErrorKind::InvalidEntity, pos));
        };
        let entity = after.get(1..end).unwrap_or_default();
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => decode_numeric_entity(entity),
        };
        match decoded {
            Some(ch) => result.push(ch),
            None => return Err(Error::at(ErrorKind::InvalidEntity, pos)),
        }
        rest = after.get(end + 1..).unwrap_or_default();
    }
    result.push_str(rest);
    Ok(result)
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
