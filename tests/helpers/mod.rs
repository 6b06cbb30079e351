//! A recording handler shared by the integration tests, plus short
//! constructors for expected events.

#![allow(dead_code)]

use srcfacts::handler::Handler;
use srcfacts::name::QName;
use srcfacts::reader::Reader;
use srcfacts::Result;

/// An owned copy of one handler event, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ev {
    StartDocument(i32),
    /// version, encoding, standalone, depth
    XmlDecl(String, Option<String>, Option<String>, i32),
    /// qname, prefix, local name, depth
    Start(String, String, String, i32),
    End(String, String, String, i32),
    /// qname, prefix, local name, value, depth
    Attr(String, String, String, String, i32),
    /// prefix (None for the default namespace), uri, depth
    Ns(Option<String>, String, i32),
    Chars(String, i32),
    Comment(String, i32),
    CData(String, i32),
    /// target, data, depth
    Pi(String, String, i32),
    EndDocument(i32),
}

fn owned(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parts(name: QName) -> (String, String, String) {
    let (local, prefix) = name.decompose();
    (
        owned(name.as_bytes()),
        prefix.map(|p| owned(p.as_bytes())).unwrap_or_default(),
        owned(local.as_bytes()),
    )
}

#[derive(Default)]
pub struct Recorder {
    pub events: Vec<Ev>,
}

impl Handler for Recorder {
    fn start_document(&mut self, depth: i32) {
        self.events.push(Ev::StartDocument(depth));
    }

    fn xml_declaration(
        &mut self,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
        depth: i32,
    ) {
        self.events.push(Ev::XmlDecl(
            owned(version),
            encoding.map(owned),
            standalone.map(owned),
            depth,
        ));
    }

    fn start_tag(&mut self, name: QName, depth: i32) {
        let (qname, prefix, local) = parts(name);
        self.events.push(Ev::Start(qname, prefix, local, depth));
    }

    fn end_tag(&mut self, name: QName, depth: i32) {
        let (qname, prefix, local) = parts(name);
        self.events.push(Ev::End(qname, prefix, local, depth));
    }

    fn attribute(&mut self, name: QName, value: &[u8], depth: i32) {
        let (qname, prefix, local) = parts(name);
        self.events
            .push(Ev::Attr(qname, prefix, local, owned(value), depth));
    }

    fn namespace_decl(&mut self, prefix: Option<&[u8]>, uri: &[u8], depth: i32) {
        self.events
            .push(Ev::Ns(prefix.map(owned), owned(uri), depth));
    }

    fn characters(&mut self, text: &[u8], depth: i32) {
        self.events.push(Ev::Chars(owned(text), depth));
    }

    fn comment(&mut self, text: &[u8], depth: i32) {
        self.events.push(Ev::Comment(owned(text), depth));
    }

    fn cdata(&mut self, text: &[u8], depth: i32) {
        self.events.push(Ev::CData(owned(text), depth));
    }

    fn processing_instruction(&mut self, target: &[u8], data: &[u8], depth: i32) {
        self.events.push(Ev::Pi(owned(target), owned(data), depth));
    }

    fn end_document(&mut self, depth: i32) {
        self.events.push(Ev::EndDocument(depth));
    }
}

/// Parses `input` with a small buffer so refills actually happen.
pub fn parse(input: &[u8]) -> Result<Vec<Ev>> {
    parse_with_capacity(input, 4096)
}

pub fn parse_with_capacity(input: &[u8], capacity: usize) -> Result<Vec<Ev>> {
    let mut recorder = Recorder::default();
    let mut reader = Reader::with_capacity(input, capacity);
    reader.parse(&mut recorder)?;
    Ok(recorder.events)
}

// Short constructors so expected sequences read like the scenarios they
// check.

pub fn decl(version: &str, encoding: Option<&str>, standalone: Option<&str>, depth: i32) -> Ev {
    Ev::XmlDecl(
        version.into(),
        encoding.map(Into::into),
        standalone.map(Into::into),
        depth,
    )
}

pub fn start(qname: &str, prefix: &str, local: &str, depth: i32) -> Ev {
    Ev::Start(qname.into(), prefix.into(), local.into(), depth)
}

pub fn end(qname: &str, prefix: &str, local: &str, depth: i32) -> Ev {
    Ev::End(qname.into(), prefix.into(), local.into(), depth)
}

pub fn attr(qname: &str, prefix: &str, local: &str, value: &str, depth: i32) -> Ev {
    Ev::Attr(
        qname.into(),
        prefix.into(),
        local.into(),
        value.into(),
        depth,
    )
}

pub fn ns(prefix: Option<&str>, uri: &str, depth: i32) -> Ev {
    Ev::Ns(prefix.map(Into::into), uri.into(), depth)
}

pub fn chars(text: &str, depth: i32) -> Ev {
    Ev::Chars(text.into(), depth)
}

pub fn comment(text: &str, depth: i32) -> Ev {
    Ev::Comment(text.into(), depth)
}

pub fn cdata(text: &str, depth: i32) -> Ev {
    Ev::CData(text.into(), depth)
}

pub fn pi(target: &str, data: &str, depth: i32) -> Ev {
    Ev::Pi(target.into(), data.into(), depth)
}
