use std::io::Cursor;
use std::str::FromStr;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};
use rust_decimal::Decimal;

use crate::core::AfipError;

pub type XmlResult = Result<String, AfipError>;

fn xml_io(e: std::io::Error) -> AfipError {
    AfipError::Encoding(format!("XML write error: {e}"))
}

pub struct XmlWriter {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    pub fn new() -> Result<Self, AfipError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_io)?;
        Ok(Self { writer })
    }

    pub fn into_string(self) -> XmlResult {
        let buf = self.writer.into_inner().into_inner();
        String::from_utf8(buf).map_err(|e| AfipError::Encoding(format!("XML UTF-8 error: {e}")))
    }

    pub fn start_element(&mut self, name: &str) -> Result<&mut Self, AfipError> {
        self.writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn start_element_with_attrs(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> Result<&mut Self, AfipError> {
        let mut elem = BytesStart::new(name);
        for (k, v) in attrs {
            elem.push_attribute((*k, *v));
        }
        self.writer
            .write_event(Event::Start(elem))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn empty_element(&mut self, name: &str) -> Result<&mut Self, AfipError> {
        self.writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn end_element(&mut self, name: &str) -> Result<&mut Self, AfipError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_io)?;
        Ok(self)
    }

    pub fn text_element(&mut self, name: &str, text: &str) -> Result<&mut Self, AfipError> {
        self.start_element(name)?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_io)?;
        self.end_element(name)
    }

    pub fn decimal_element(&mut self, name: &str, value: Decimal) -> Result<&mut Self, AfipError> {
        self.text_element(name, &format_decimal(value))
    }
}

/// Format a Decimal for XML output: at least 2 decimal places, trailing
/// zeros beyond that stripped, no precision lost.
pub fn format_decimal(d: Decimal) -> String {
    let s = d.normalize().to_string();
    if let Some(dot_pos) = s.find('.') {
        let decimals = s.len() - dot_pos - 1;
        if decimals < 2 {
            format!("{s}{}", "0".repeat(2 - decimals))
        } else {
            s
        }
    } else {
        format!("{s}.00")
    }
}

/// Parse a numeric leaf; blank text means zero.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, AfipError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| AfipError::format(field, raw))
}

/// An element that opens a scope of interest, matched by namespace URI and
/// local name.
pub struct Anchor {
    pub namespace: &'static str,
    pub local: &'static str,
}

/// Receives the elements found below an [`Anchor`].
///
/// `rel` is the path of local names starting at the anchor itself, so the
/// anchor element is `[anchor]`, its direct child `[anchor, child]`, etc.
pub trait ScopedHandler {
    fn open(&mut self, _anchor: usize, _rel: &[&str]) {}
    fn close(&mut self, anchor: usize, rel: &[&str], text: &str);
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn is_bound_to(ns: &ResolveResult, uri: &str) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(bound)) if *bound == uri.as_bytes())
}

fn rel(path: &[String], depth: usize) -> Vec<&str> {
    path[depth..].iter().map(String::as_str).collect()
}

fn match_anchor(anchors: &[Anchor], seen: &[bool], ns: &ResolveResult, name: &str) -> Option<usize> {
    anchors
        .iter()
        .enumerate()
        .position(|(i, a)| !seen[i] && a.local == name && is_bound_to(ns, a.namespace))
}

/// Stream `xml` and report every element inside the first occurrence of each
/// anchor to `handler`. Elements outside any anchor are skipped; anchors do
/// not nest.
pub fn walk<H: ScopedHandler>(xml: &str, anchors: &[Anchor], handler: &mut H) -> Result<(), AfipError> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut seen = vec![false; anchors.len()];
    // (anchor index, depth of the anchor element in `path`)
    let mut active: Option<(usize, usize)> = None;
    let mut text = String::new();

    loop {
        match reader.read_resolved_event() {
            Ok((ns, Event::Start(e))) => {
                let name = local_name(e.local_name().as_ref());
                if active.is_none() {
                    if let Some(i) = match_anchor(anchors, &seen, &ns, &name) {
                        seen[i] = true;
                        active = Some((i, path.len()));
                    }
                }
                path.push(name);
                text.clear();
                if let Some((i, depth)) = active {
                    handler.open(i, &rel(&path, depth));
                }
            }
            Ok((ns, Event::Empty(e))) => {
                let name = local_name(e.local_name().as_ref());
                let mut opened_here = false;
                if active.is_none() {
                    if let Some(i) = match_anchor(anchors, &seen, &ns, &name) {
                        seen[i] = true;
                        active = Some((i, path.len()));
                        opened_here = true;
                    }
                }
                path.push(name);
                if let Some((i, depth)) = active {
                    let r = rel(&path, depth);
                    handler.open(i, &r);
                    handler.close(i, &r, "");
                }
                path.pop();
                if opened_here {
                    active = None;
                }
            }
            Ok((_, Event::Text(e))) => {
                let unescaped = e
                    .unescape()
                    .map_err(|err| AfipError::Parse(format!("invalid text content: {err}")))?;
                text.push_str(&unescaped);
            }
            Ok((_, Event::CData(e))) => {
                let raw = std::str::from_utf8(&e)
                    .map_err(|err| AfipError::Parse(format!("invalid CDATA content: {err}")))?;
                text.push_str(raw);
            }
            Ok((_, Event::End(_))) => {
                if let Some((i, depth)) = active {
                    handler.close(i, &rel(&path, depth), text.trim());
                    if path.len() == depth + 1 {
                        active = None;
                    }
                }
                path.pop();
                text.clear();
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(AfipError::Parse(e.to_string())),
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(AfipError::Parse(format!(
            "unexpected end of document inside <{open}>"
        )));
    }
    Ok(())
}
