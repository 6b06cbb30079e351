//! The capability set a [`Reader`] requires of its consumer.
//!
//! Two interchangeable bindings are provided: implement [`Handler`] on your
//! own type, or register per-event closures on a [`Callbacks`] value. In
//! both cases an event with no implementation is silently ignored.
//!
//! [`Reader`]: crate::reader::Reader

use crate::name::QName;

/// Receiver of the lexical events produced by a [`Reader`].
///
/// All methods have empty default bodies, so an implementation only needs
/// to provide the events it cares about.
///
/// Every slice argument borrows from the reader's buffer and is invalidated
/// when the method returns; copy anything that must be retained. `depth` is
/// the number of currently open elements at the point of the event:
/// character, attribute and namespace events carry the depth of their
/// enclosing element, start tags the depth before the element opens, and
/// end tags the depth after it closes.
///
/// [`Reader`]: crate::reader::Reader
#[allow(unused_variables)]
pub trait Handler {
    /// Called once, before any other event.
    fn start_document(&mut self, depth: i32) {}

    /// The `<?xml version=… ?>` declaration. `encoding` and `standalone`
    /// are present only if the declaration carries them.
    fn xml_declaration(
        &mut self,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
        depth: i32,
    ) {
    }

    /// An element start tag. Attribute and namespace events for the same
    /// tag follow in textual order.
    fn start_tag(&mut self, name: QName, depth: i32) {}

    /// An element end tag, real (`</name>`) or synthesized for a
    /// self-closing `/>`.
    fn end_tag(&mut self, name: QName, depth: i32) {}

    /// An attribute of the most recent start tag. Entity references inside
    /// `value` are passed through verbatim.
    fn attribute(&mut self, name: QName, value: &[u8], depth: i32) {}

    /// An `xmlns` declaration of the most recent start tag. `prefix` is
    /// `None` for a default namespace declaration.
    fn namespace_decl(&mut self, prefix: Option<&[u8]>, uri: &[u8], depth: i32) {}

    /// A run of character data, or a single decoded `<`, `>` or `&` from an
    /// entity reference. Entity events pass the statics of the [`reader`]
    /// module, so their origin can be recovered by pointer identity.
    ///
    /// [`reader`]: crate::reader
    fn characters(&mut self, text: &[u8], depth: i32) {}

    /// One part of a comment body. A body spanning a buffer refill arrives
    /// as several consecutive events whose concatenation is the full body.
    fn comment(&mut self, text: &[u8], depth: i32) {}

    /// One part of a CDATA body, with the same continuation contract as
    /// [`comment`](Self::comment).
    fn cdata(&mut self, text: &[u8], depth: i32) {}

    /// A `<?target data?>` processing instruction.
    fn processing_instruction(&mut self, target: &[u8], data: &[u8], depth: i32) {}

    /// Called once, after the last event.
    fn end_document(&mut self, depth: i32) {}
}

/// A [`Handler`] assembled from individually registered closures.
///
/// Events without a registered closure are silently ignored.
///
/// # Example
///
/// ```rust
/// use srcfacts::handler::Callbacks;
/// use srcfacts::reader::Reader;
///
/// let mut tags = 0;
/// let mut handler = Callbacks::new();
/// handler.on_start_tag(|_name, _depth| tags += 1);
///
/// let mut reader = Reader::from_reader(&b"<a><b/></a>"[..]);
/// reader.parse(&mut handler).unwrap();
/// drop(handler);
/// assert_eq!(tags, 2);
/// ```
#[derive(Default)]
pub struct Callbacks<'cb> {
    start_document: Option<Box<dyn FnMut(i32) + 'cb>>,
    xml_declaration: Option<Box<dyn FnMut(&[u8], Option<&[u8]>, Option<&[u8]>, i32) + 'cb>>,
    start_tag: Option<Box<dyn FnMut(QName, i32) + 'cb>>,
    end_tag: Option<Box<dyn FnMut(QName, i32) + 'cb>>,
    attribute: Option<Box<dyn FnMut(QName, &[u8], i32) + 'cb>>,
    namespace_decl: Option<Box<dyn FnMut(Option<&[u8]>, &[u8], i32) + 'cb>>,
    characters: Option<Box<dyn FnMut(&[u8], i32) + 'cb>>,
    comment: Option<Box<dyn FnMut(&[u8], i32) + 'cb>>,
    cdata: Option<Box<dyn FnMut(&[u8], i32) + 'cb>>,
    processing_instruction: Option<Box<dyn FnMut(&[u8], &[u8], i32) + 'cb>>,
    end_document: Option<Box<dyn FnMut(i32) + 'cb>>,
}

impl<'cb> Callbacks<'cb> {
    /// Creates a handler with no callbacks registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the [`start_document`](Handler::start_document) callback.
    pub fn on_start_document(&mut self, f: impl FnMut(i32) + 'cb) {
        self.start_document = Some(Box::new(f));
    }

    /// Registers the [`xml_declaration`](Handler::xml_declaration) callback.
    pub fn on_xml_declaration(
        &mut self,
        f: impl FnMut(&[u8], Option<&[u8]>, Option<&[u8]>, i32) + 'cb,
    ) {
        self.xml_declaration = Some(Box::new(f));
    }

    /// Registers the [`start_tag`](Handler::start_tag) callback.
    pub fn on_start_tag(&mut self, f: impl FnMut(QName, i32) + 'cb) {
        self.start_tag = Some(Box::new(f));
    }

    /// Registers the [`end_tag`](Handler::end_tag) callback.
    pub fn on_end_tag(&mut self, f: impl FnMut(QName, i32) + 'cb) {
        self.end_tag = Some(Box::new(f));
    }

    /// Registers the [`attribute`](Handler::attribute) callback.
    pub fn on_attribute(&mut self, f: impl FnMut(QName, &[u8], i32) + 'cb) {
        self.attribute = Some(Box::new(f));
    }

    /// Registers the [`namespace_decl`](Handler::namespace_decl) callback.
    pub fn on_namespace_decl(&mut self, f: impl FnMut(Option<&[u8]>, &[u8], i32) + 'cb) {
        self.namespace_decl = Some(Box::new(f));
    }

    /// Registers the [`characters`](Handler::characters) callback.
    pub fn on_characters(&mut self, f: impl FnMut(&[u8], i32) + 'cb) {
        self.characters = Some(Box::new(f));
    }

    /// Registers the [`comment`](Handler::comment) callback.
    pub fn on_comment(&mut self, f: impl FnMut(&[u8], i32) + 'cb) {
        self.comment = Some(Box::new(f));
    }

    /// Registers the [`cdata`](Handler::cdata) callback.
    pub fn on_cdata(&mut self, f: impl FnMut(&[u8], i32) + 'cb) {
        self.cdata = Some(Box::new(f));
    }

    /// Registers the
    /// [`processing_instruction`](Handler::processing_instruction) callback.
    pub fn on_processing_instruction(&mut self, f: impl FnMut(&[u8], &[u8], i32) + 'cb) {
        self.processing_instruction = Some(Box::new(f));
    }

    /// Registers the [`end_document`](Handler::end_document) callback.
    pub fn on_end_document(&mut self, f: impl FnMut(i32) + 'cb) {
        self.end_document = Some(Box::new(f));
    }
}

impl Handler for Callbacks<'_> {
    fn start_document(&mut self, depth: i32) {
        if let Some(f) = &mut self.start_document {
            f(depth);
        }
    }

    fn xml_declaration(
        &mut self,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
        depth: i32,
    ) {
        if let Some(f) = &mut self.xml_declaration {
            f(version, encoding, standalone, depth);
        }
    }

    fn start_tag(&mut self, name: QName, depth: i32) {
        if let Some(f) = &mut self.start_tag {
            f(name, depth);
        }
    }

    fn end_tag(&mut self, name: QName, depth: i32) {
        if let Some(f) = &mut self.end_tag {
            f(name, depth);
        }
    }

    fn attribute(&mut self, name: QName, value: &[u8], depth: i32) {
        if let Some(f) = &mut self.attribute {
            f(name, value, depth);
        }
    }

    fn namespace_decl(&mut self, prefix: Option<&[u8]>, uri: &[u8], depth: i32) {
        if let Some(f) = &mut self.namespace_decl {
            f(prefix, uri, depth);
        }
    }

    fn characters(&mut self, text: &[u8], depth: i32) {
        if let Some(f) = &mut self.characters {
            f(text, depth);
        }
    }

    fn comment(&mut self, text: &[u8], depth: i32) {
        if let Some(f) = &mut self.comment {
            f(text, depth);
        }
    }

    fn cdata(&mut self, text: &[u8], depth: i32) {
        if let Some(f) = &mut self.cdata {
            f(text, depth);
        }
    }

    fn processing_instruction(&mut self, target: &[u8], data: &[u8], depth: i32) {
        if let Some(f) = &mut self.processing_instruction {
            f(target, data, depth);
        }
    }

    fn end_document(&mut self, depth: i32) {
        if let Some(f) = &mut self.end_document {
            f(depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// A handler with no methods implemented compiles and ignores events.
    struct Inert;
    impl Handler for Inert {}

    #[test]
    fn default_methods_are_noops() {
        let mut h = Inert;
        h.start_document(0);
        h.start_tag(QName(b"unit"), 0);
        h.characters(b"int x;", 1);
        h.end_tag(QName(b"unit"), 0);
        h.end_document(0);
    }

    #[test]
    fn unregistered_callbacks_are_ignored() {
        let mut h = Callbacks::new();
        h.start_tag(QName(b"unit"), 0);
        h.characters(b"x", 1);
        h.end_document(0);
    }

    #[test]
    fn registered_callbacks_fire() {
        let starts = Cell::new(0);
        let chars = Cell::new(0usize);

        let mut h = Callbacks::new();
        h.on_start_tag(|_, _| starts.set(starts.get() + 1));
        h.on_characters(|text, _| chars.set(chars.get() + text.len()));

        h.start_tag(QName(b"a"), 0);
        h.start_tag(QName(b"b"), 1);
        h.characters(b"xyz", 2);
        h.end_tag(QName(b"b"), 1);

        assert_eq!(starts.get(), 2);
        assert_eq!(chars.get(), 3);
    }
}
