//! Streaming event reader: the classifier, the driver loop and one lexer
//! per XML production.
//!
//! The reader is a synchronous forward pass over a refillable byte buffer.
//! The driver keeps a small lookahead at the cursor, picks the next
//! production with an ordered list of predicates, runs its lexer and pushes
//! the resulting event into the [`Handler`]. Names and values are borrowed
//! straight out of the buffer; the only owned state is the name of the
//! currently open start tag, kept so that a self-closing `/>` can emit its
//! synthetic end tag even if attribute parsing refilled the buffer in
//! between.

mod buffer;

use std::io::Read;

use memchr::{memchr, memchr2, memmem};

use crate::errors::{Construct, Error, IllFormedError, Result};
use crate::handler::Handler;
use crate::name::{name_len, QName};
use buffer::{Buffer, DEFAULT_CAPACITY};

/// The character content passed to [`Handler::characters`] for an `&lt;`
/// entity reference.
///
/// Entity events always pass exactly this static, never a buffer slice, so
/// a handler can recognize an entity-sourced `<` by comparing data pointers
/// with [`std::ptr::eq`]. Entity references are never merged into adjacent
/// character runs.
pub static ENTITY_LT: &[u8] = b"<";

/// The `&gt;` counterpart of [`ENTITY_LT`].
pub static ENTITY_GT: &[u8] = b">";

/// The content passed for `&amp;`, and for a bare `&` that introduces none
/// of the recognized references.
pub static ENTITY_AMP: &[u8] = b"&";

const XML_DECL_START: &[u8] = b"<?xml ";
const PI_END: &[u8] = b"?>";
const COMMENT_START: &[u8] = b"<!--";
const COMMENT_END: &[u8] = b"-->";
const CDATA_START: &[u8] = b"<![CDATA[";
const CDATA_END: &[u8] = b"]]>";

/// Lookahead the classifier needs before dispatching: enough bytes to test
/// its longest prefix, `<![CDATA[`.
const LOOKAHEAD: usize = CDATA_START.len();

/// When fewer bytes than this remain, a start tag is only lexed after its
/// closing `>` has been located in the window. Start tags of realistic
/// documents fit well within this reserve.
const START_TAG_RESERVE: usize = 200;

/// The end tag counterpart of [`START_TAG_RESERVE`].
const END_TAG_RESERVE: usize = 100;

/// A byte is XML whitespace if it is a blank, new line, carriage return or
/// tab.
#[inline]
pub(crate) const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\r' | b'\n' | b'\t')
}

/// Streaming XML reader tuned for the srcML dialect.
///
/// Bytes flow from any [`Read`] source through a fixed-capacity buffer;
/// lexical events are pushed into a [`Handler`] with all names and values
/// borrowed from that buffer. A reader parses a single document; create a
/// new one for the next stream.
///
/// The first error is fatal: the last successfully delivered event is the
/// final event and the reader must be discarded.
///
/// # Examples
///
/// ```
/// use srcfacts::handler::Handler;
/// use srcfacts::name::QName;
/// use srcfacts::reader::Reader;
///
/// #[derive(Default)]
/// struct Depths(Vec<i32>);
///
/// impl Handler for Depths {
///     fn start_tag(&mut self, _name: QName, depth: i32) {
///         self.0.push(depth);
///     }
/// }
///
/// let mut handler = Depths::default();
/// let mut reader = Reader::from_reader(&b"<unit><block><expr/></block></unit>"[..]);
/// reader.parse(&mut handler).unwrap();
/// assert_eq!(handler.0, [0, 1, 2]);
/// ```
pub struct Reader<R> {
    source: R,
    buffer: Buffer,
    depth: i32,
    in_tag: bool,
    in_comment: bool,
    in_cdata: bool,
    /// Qualified name of the open start tag. Owned, not a buffer slice:
    /// attribute parsing may refill before the `/>` is seen.
    open_name: Vec<u8>,
}

impl<R: Read> Reader<R> {
    /// Creates a reader with the default 1 MiB buffer.
    pub fn from_reader(source: R) -> Self {
        Self::with_capacity(source, DEFAULT_CAPACITY)
    }

    /// Creates a reader with the given buffer capacity, clamped to at least
    /// 4096 bytes.
    ///
    /// The buffer must be able to hold any single start tag, end tag,
    /// declaration or processing instruction of the input. Comment and
    /// CDATA bodies may be arbitrarily long; they are delivered in parts.
    pub fn with_capacity(source: R, capacity: usize) -> Self {
        Self {
            source,
            buffer: Buffer::with_capacity(capacity),
            depth: 0,
            in_tag: false,
            in_comment: false,
            in_cdata: false,
            open_name: Vec::new(),
        }
    }

    /// Cumulative number of bytes read from the input so far.
    pub fn total_bytes(&self) -> u64 {
        self.buffer.total()
    }

    /// Runs the document through `handler`, start to finish.
    ///
    /// Emits `start_document`, then the events of the stream in textual
    /// order, then `end_document`. Returns the first error encountered; no
    /// event is delivered for a partially lexed production.
    pub fn parse<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        handler.start_document(self.depth);
        loop {
            if self.buffer.len() < LOOKAHEAD && !self.buffer.exhausted() {
                self.buffer.refill(&mut self.source)?;
                continue;
            }
            if self.buffer.is_empty() {
                if self.in_comment {
                    return Err(Error::UnexpectedEof(Construct::Comment));
                }
                if self.in_cdata {
                    return Err(Error::UnexpectedEof(Construct::CData));
                }
                break;
            }
            // Ordered dispatch: `in_tag` shadows every non-attribute
            // production, the continuation flags shadow markup starts, and
            // the `<`-family prefixes are tested longest first.
            if self.in_tag && self.at_namespace() {
                self.namespace_decl(handler)?;
            } else if self.in_tag {
                self.attribute(handler)?;
            } else if self.in_comment || self.starts_with(COMMENT_START) {
                self.comment(handler);
            } else if self.in_cdata || self.starts_with(CDATA_START) {
                self.cdata(handler);
            } else if self.starts_with(XML_DECL_START) {
                self.xml_declaration(handler)?;
            } else if self.starts_with(b"<?") {
                self.processing_instruction(handler)?;
            } else if self.starts_with(b"</") {
                self.end_tag(handler)?;
            } else if self.starts_with(b"<") {
                self.start_tag(handler)?;
            } else if self.depth == 0 {
                self.skip_outside_root()?;
            } else if self.buffer.window()[0] == b'&' {
                self.char_entity(handler);
            } else {
                self.char_run(handler);
            }
        }
        handler.end_document(self.depth);
        Ok(())
    }

    #[inline]
    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.buffer.window().starts_with(prefix)
    }

    /// `xmlns=` or `xmlns:` at the cursor, inside an open tag.
    fn at_namespace(&self) -> bool {
        let window = self.buffer.window();
        window.starts_with(b"xmlns") && matches!(window.get(5), Some(&b':') | Some(&b'='))
    }

    /// First two bytes of the window, if present.
    #[inline]
    fn peek2(&self) -> (Option<u8>, Option<u8>) {
        let window = self.buffer.window();
        (window.first().copied(), window.get(1).copied())
    }

    /// Consumes leading whitespace and returns how many bytes were skipped.
    fn skip_whitespace(&mut self) -> usize {
        let skipped = self
            .buffer
            .window()
            .iter()
            .position(|&b| !is_whitespace(b))
            .unwrap_or(self.buffer.len());
        self.buffer.advance(skipped);
        skipped
    }

    /// Ensures `byte` occurs in the window, refilling once if it does not.
    /// Returns its offset relative to the cursor.
    fn locate_byte(&mut self, byte: u8, construct: Construct) -> Result<usize> {
        if let Some(pos) = memchr(byte, self.buffer.window()) {
            return Ok(pos);
        }
        self.buffer.refill(&mut self.source)?;
        memchr(byte, self.buffer.window()).ok_or(Error::Incomplete(construct))
    }

    /// Ensures `needle` occurs in the window, refilling once if it does
    /// not. Returns its offset relative to the cursor.
    fn locate_seq(&mut self, needle: &[u8], construct: Construct) -> Result<usize> {
        if let Some(pos) = memmem::find(self.buffer.window(), needle) {
            return Ok(pos);
        }
        self.buffer.refill(&mut self.source)?;
        memmem::find(self.buffer.window(), needle).ok_or(Error::Incomplete(construct))
    }

    /// Element start tag: `<name`, optionally followed by attributes.
    ///
    /// Emits the start tag event, then consumes a directly following `>` or
    /// `/>`; otherwise switches the reader into attribute mode. A `/>` here
    /// emits the synthetic end tag at the same depth as the start tag.
    fn start_tag<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        if self.buffer.len() < START_TAG_RESERVE {
            self.locate_byte(b'>', Construct::StartTag)?;
        }
        self.buffer.advance(1);

        let window = self.buffer.window();
        if window.first() == Some(&b':') {
            return Err(IllFormedError::LeadingColon(Construct::StartTag).into());
        }
        let name_end = qualified_name_len(window);
        if name_end == 0 {
            return Err(IllFormedError::EmptyName(Construct::StartTag).into());
        }
        if name_end == window.len() {
            return Err(Error::Incomplete(Construct::StartTag));
        }
        self.open_name.clear();
        self.open_name.extend_from_slice(&window[..name_end]);

        let depth = self.depth;
        handler.start_tag(QName(&window[..name_end]), depth);
        self.buffer.advance(name_end);

        if self.buffer.window().first() != Some(&b'>') {
            self.skip_whitespace();
        }
        match self.peek2() {
            (Some(b'>'), _) => {
                self.buffer.advance(1);
                self.depth += 1;
            }
            (Some(b'/'), Some(b'>')) => {
                self.buffer.advance(2);
                handler.end_tag(QName(&self.open_name), depth);
            }
            _ => self.in_tag = true,
        }
        Ok(())
    }

    /// Element end tag: `</name>`. The emitted depth is the depth after the
    /// element closes.
    fn end_tag<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        if self.buffer.len() < END_TAG_RESERVE {
            self.locate_byte(b'>', Construct::EndTag)?;
        }
        self.buffer.advance(2);

        let window = self.buffer.window();
        if window.first() == Some(&b':') {
            return Err(IllFormedError::LeadingColon(Construct::EndTag).into());
        }
        let name_end = qualified_name_len(window);
        if name_end == 0 {
            return Err(IllFormedError::EmptyName(Construct::EndTag).into());
        }
        let mut pos = name_end;
        while window.get(pos).map_or(false, |&b| is_whitespace(b)) {
            pos += 1;
        }
        match window.get(pos) {
            Some(&b'>') => {}
            Some(_) => return Err(IllFormedError::MissingTagEnd(Construct::EndTag).into()),
            None => return Err(Error::Incomplete(Construct::EndTag)),
        }
        if self.depth == 0 {
            return Err(IllFormedError::UnmatchedEndTag.into());
        }
        self.depth -= 1;
        handler.end_tag(QName(&window[..name_end]), self.depth);
        self.buffer.advance(pos + 1);
        Ok(())
    }

    /// An attribute inside an open tag, or whatever in-tag leftovers a
    /// refill put at the cursor: stray whitespace is consumed and the
    /// classifier looks again, closing punctuation is handed to
    /// [`close_tag`](Self::close_tag).
    fn attribute<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        let element_depth = self.depth + 1;
        match self.peek2() {
            (Some(b'>'), _) | (Some(b'/'), Some(b'>')) => {
                self.close_tag(handler);
                return Ok(());
            }
            (Some(b'/'), _) => {
                return Err(IllFormedError::MissingTagEnd(Construct::StartTag).into());
            }
            (Some(b), _) if is_whitespace(b) => {
                self.skip_whitespace();
                return Ok(());
            }
            (Some(b':'), _) => {
                return Err(IllFormedError::LeadingColon(Construct::Attribute).into());
            }
            _ => {}
        }

        let window = self.buffer.window();
        let name_end = qualified_name_len(window);
        if name_end == 0 {
            return Err(IllFormedError::EmptyName(Construct::Attribute).into());
        }
        if name_end == window.len() {
            return Err(Error::Incomplete(Construct::Attribute));
        }
        let mut pos = name_end;
        while window.get(pos).map_or(false, |&b| is_whitespace(b)) {
            pos += 1;
        }
        match window.get(pos) {
            Some(&b'=') => pos += 1,
            Some(_) => {
                return Err(IllFormedError::MissingEquals(lossy(&window[..name_end])).into())
            }
            None => return Err(Error::Incomplete(Construct::Attribute)),
        }
        while window.get(pos).map_or(false, |&b| is_whitespace(b)) {
            pos += 1;
        }
        let delimiter = match window.get(pos) {
            Some(&d) if d == b'"' || d == b'\'' => d,
            _ => return Err(IllFormedError::MissingDelimiter(lossy(&window[..name_end])).into()),
        };
        pos += 1;
        let value_end = match memchr(delimiter, &window[pos..]) {
            Some(i) => pos + i,
            None => {
                return Err(IllFormedError::MissingDelimiter(lossy(&window[..name_end])).into())
            }
        };
        handler.attribute(
            QName(&window[..name_end]),
            &window[pos..value_end],
            element_depth,
        );
        self.buffer.advance(value_end + 1);
        self.close_tag(handler);
        Ok(())
    }

    /// `xmlns="uri"` or `xmlns:prefix="uri"` inside an open tag.
    fn namespace_decl<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        let element_depth = self.depth + 1;
        self.buffer.advance(5);

        let window = self.buffer.window();
        let name_end = match memchr(b'=', window) {
            Some(i) => i,
            None => return Err(Error::Incomplete(Construct::Namespace)),
        };
        let prefix = if window.first() == Some(&b':') {
            Some(&window[1..name_end])
        } else {
            None
        };
        let mut pos = name_end + 1;
        while window.get(pos).map_or(false, |&b| is_whitespace(b)) {
            pos += 1;
        }
        let delimiter = match window.get(pos) {
            Some(&d) if d == b'"' || d == b'\'' => d,
            _ => return Err(IllFormedError::MissingDelimiter("xmlns".to_string()).into()),
        };
        pos += 1;
        let value_end = match memchr(delimiter, &window[pos..]) {
            Some(i) => pos + i,
            None => return Err(Error::Incomplete(Construct::Namespace)),
        };
        handler.namespace_decl(prefix, &window[pos..value_end], element_depth);
        self.buffer.advance(value_end + 1);
        self.close_tag(handler);
        Ok(())
    }

    /// Shared closing step of the attribute and namespace productions: skip
    /// trailing whitespace, then consume `>` (depth grows) or `/>` (depth
    /// unchanged, synthetic end tag from the remembered name). Anything
    /// else means another attribute follows and the loop continues.
    fn close_tag<H: Handler>(&mut self, handler: &mut H) {
        self.skip_whitespace();
        match self.peek2() {
            (Some(b'>'), _) => {
                self.buffer.advance(1);
                self.in_tag = false;
                self.depth += 1;
            }
            (Some(b'/'), Some(b'>')) => {
                self.buffer.advance(2);
                self.in_tag = false;
                handler.end_tag(QName(&self.open_name), self.depth);
            }
            _ => {}
        }
    }

    /// `<?xml version="…" [encoding="…"] [standalone="…"]?>`.
    ///
    /// `version` must come first; `encoding` and `standalone` are optional
    /// but ordered. The terminator is located before lexing begins.
    fn xml_declaration<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        let gt = self.locate_byte(b'>', Construct::XmlDecl)?;
        let window = self.buffer.window();
        let tag = &window[..gt];
        if tag.last() != Some(&b'?') {
            return Err(IllFormedError::MissingTagEnd(Construct::XmlDecl).into());
        }
        // Between `<?xml ` and the final `?`.
        let body = &tag[XML_DECL_START.len()..tag.len() - 1];

        let mut pos = 0;
        skip_ws(body, &mut pos);
        if pos >= body.len() {
            return Err(IllFormedError::MissingVersion.into());
        }
        let (name, version) = quoted_pair(body, &mut pos)?;
        if name != b"version" {
            return Err(IllFormedError::MissingVersion.into());
        }

        let mut encoding = None;
        let mut standalone = None;
        skip_ws(body, &mut pos);
        while pos < body.len() {
            let (name, value) = quoted_pair(body, &mut pos)?;
            if name == b"encoding" && encoding.is_none() && standalone.is_none() {
                encoding = Some(value);
            } else if name == b"standalone" && standalone.is_none() {
                standalone = Some(value);
            } else {
                return Err(IllFormedError::InvalidDeclAttribute(lossy(name)).into());
            }
            skip_ws(body, &mut pos);
        }
        handler.xml_declaration(version, encoding, standalone, self.depth);
        self.buffer.advance(gt + 1);
        Ok(())
    }

    /// `<?target data?>`. The terminator is located before lexing begins.
    fn processing_instruction<H: Handler>(&mut self, handler: &mut H) -> Result<()> {
        let end = self.locate_seq(PI_END, Construct::ProcessingInstruction)?;
        if end < 2 {
            return Err(IllFormedError::EmptyName(Construct::ProcessingInstruction).into());
        }
        let window = self.buffer.window();
        let tag = &window[2..end];
        let target_end = name_len(tag);
        if target_end == 0 {
            return Err(IllFormedError::EmptyName(Construct::ProcessingInstruction).into());
        }
        let mut pos = target_end;
        skip_ws(tag, &mut pos);
        handler.processing_instruction(&tag[..target_end], &tag[pos..], self.depth);
        self.buffer.advance(end + PI_END.len());
        Ok(())
    }

    /// One part of a comment body. A body longer than the window is emitted
    /// in several parts, one per driver iteration, with a refill in
    /// between and nothing else.
    fn comment<H: Handler>(&mut self, handler: &mut H) {
        if !self.in_comment {
            self.buffer.advance(COMMENT_START.len());
        }
        let window = self.buffer.window();
        match memmem::find(window, COMMENT_END) {
            Some(end) => {
                self.in_comment = false;
                handler.comment(&window[..end], self.depth);
                self.buffer.advance(end + COMMENT_END.len());
            }
            None => {
                self.in_comment = true;
                // Unless the stream is done, hold back enough bytes that a
                // closer split by the next refill is still recognized.
                let hold = if self.buffer.exhausted() {
                    0
                } else {
                    (COMMENT_END.len() - 1).min(window.len())
                };
                let body_len = window.len() - hold;
                if body_len > 0 {
                    handler.comment(&window[..body_len], self.depth);
                }
                self.buffer.advance(body_len);
            }
        }
    }

    /// One part of a CDATA body; same continuation contract as
    /// [`comment`](Self::comment).
    fn cdata<H: Handler>(&mut self, handler: &mut H) {
        if !self.in_cdata {
            self.buffer.advance(CDATA_START.len());
        }
        let window = self.buffer.window();
        match memmem::find(window, CDATA_END) {
            Some(end) => {
                self.in_cdata = false;
                handler.cdata(&window[..end], self.depth);
                self.buffer.advance(end + CDATA_END.len());
            }
            None => {
                self.in_cdata = true;
                let hold = if self.buffer.exhausted() {
                    0
                } else {
                    (CDATA_END.len() - 1).min(window.len())
                };
                let body_len = window.len() - hold;
                if body_len > 0 {
                    handler.cdata(&window[..body_len], self.depth);
                }
                self.buffer.advance(body_len);
            }
        }
    }

    /// A character entity reference. `&lt;`, `&gt;` and `&amp;` become the
    /// corresponding interned single-byte static; any other `&` passes
    /// through as a single `&`.
    fn char_entity<H: Handler>(&mut self, handler: &mut H) {
        let (text, len) = {
            let window = self.buffer.window();
            if window.starts_with(b"&lt;") {
                (ENTITY_LT, 4)
            } else if window.starts_with(b"&gt;") {
                (ENTITY_GT, 4)
            } else if window.starts_with(b"&amp;") {
                (ENTITY_AMP, 5)
            } else {
                (ENTITY_AMP, 1)
            }
        };
        handler.characters(text, self.depth);
        self.buffer.advance(len);
    }

    /// The maximal run of character data before the next `<` or `&`.
    fn char_run<H: Handler>(&mut self, handler: &mut H) {
        let window = self.buffer.window();
        let end = memchr2(b'<', b'&', window).unwrap_or(window.len());
        handler.characters(&window[..end], self.depth);
        self.buffer.advance(end);
    }

    /// Whitespace between top-level productions is skipped without an
    /// event; anything else outside the root element is an error.
    fn skip_outside_root(&mut self) -> Result<()> {
        if self.skip_whitespace() == 0 {
            return Err(IllFormedError::ContentOutsideRoot.into());
        }
        Ok(())
    }
}

/// Length of a possibly prefixed name at the start of `bytes`: a run of
/// name characters, optionally split once by `:`.
fn qualified_name_len(bytes: &[u8]) -> usize {
    let local = name_len(bytes);
    match bytes.get(local) {
        Some(&b':') => local + 1 + name_len(&bytes[local + 1..]),
        _ => local,
    }
}

/// Parses a `name="value"` pair at `pos`, advancing past the closing
/// quote. Whitespace may surround the `=`; either quote character
/// delimits the value.
fn quoted_pair<'b>(body: &'b [u8], pos: &mut usize) -> Result<(&'b [u8], &'b [u8])> {
    let rest = &body[*pos..];
    let eq = match memchr(b'=', rest) {
        Some(i) => i,
        None => return Err(IllFormedError::MissingEquals(lossy(rest)).into()),
    };
    let name_end = rest[..eq]
        .iter()
        .rposition(|&b| !is_whitespace(b))
        .map_or(0, |i| i + 1);
    let name = &rest[..name_end];
    let mut v = eq + 1;
    while rest.get(v).map_or(false, |&b| is_whitespace(b)) {
        v += 1;
    }
    let delimiter = match rest.get(v) {
        Some(&d) if d == b'"' || d == b'\'' => d,
        _ => return Err(IllFormedError::MissingDelimiter(lossy(name)).into()),
    };
    v += 1;
    let value_end = match memchr(delimiter, &rest[v..]) {
        Some(i) => v + i,
        None => return Err(IllFormedError::MissingDelimiter(lossy(name)).into()),
    };
    let value = &rest[v..value_end];
    *pos += value_end + 1;
    Ok((name, value))
}

fn skip_ws(body: &[u8], pos: &mut usize) {
    while body.get(*pos).map_or(false, |&b| is_whitespace(b)) {
        *pos += 1;
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::IllFormedError;
    use crate::handler::Handler;
    use pretty_assertions::assert_eq;

    #[test]
    fn qualified_names() {
        assert_eq!(qualified_name_len(b"unit "), 4);
        assert_eq!(qualified_name_len(b"cpp:directive>"), 13);
        assert_eq!(qualified_name_len(b">"), 0);
        // Only the first colon separates; a second one ends the name.
        assert_eq!(qualified_name_len(b"a:b:c"), 3);
    }

    #[test]
    fn quoted_pairs() {
        let body = br#"version="1.0" encoding='utf-8'"#;
        let mut pos = 0;
        let (name, value) = quoted_pair(body, &mut pos).unwrap();
        assert_eq!(name, b"version");
        assert_eq!(value, b"1.0");
        skip_ws(body, &mut pos);
        let (name, value) = quoted_pair(body, &mut pos).unwrap();
        assert_eq!(name, b"encoding");
        assert_eq!(value, b"utf-8");
        assert_eq!(pos, body.len());
    }

    #[test]
    fn quoted_pair_with_spaced_equals() {
        let body = br#"version = "1.1""#;
        let mut pos = 0;
        let (name, value) = quoted_pair(body, &mut pos).unwrap();
        assert_eq!(name, b"version");
        assert_eq!(value, b"1.1");
    }

    #[test]
    fn quoted_pair_errors() {
        let mut pos = 0;
        match quoted_pair(b"version", &mut pos) {
            Err(Error::IllFormed(IllFormedError::MissingEquals(_))) => {}
            other => panic!("expected missing '=', got {:?}", other),
        }
        let mut pos = 0;
        match quoted_pair(b"version=1.0", &mut pos) {
            Err(Error::IllFormed(IllFormedError::MissingDelimiter(name))) => {
                assert_eq!(name, "version");
            }
            other => panic!("expected missing delimiter, got {:?}", other),
        }
        let mut pos = 0;
        match quoted_pair(b"version=\"1.0", &mut pos) {
            Err(Error::IllFormed(IllFormedError::MissingDelimiter(_))) => {}
            other => panic!("expected missing delimiter, got {:?}", other),
        }
    }

    #[derive(Default)]
    struct Entities {
        kinds: Vec<&'static str>,
    }

    impl Handler for Entities {
        fn characters(&mut self, text: &[u8], _depth: i32) {
            let kind = if std::ptr::eq(text.as_ptr(), ENTITY_LT.as_ptr()) {
                "lt"
            } else if std::ptr::eq(text.as_ptr(), ENTITY_GT.as_ptr()) {
                "gt"
            } else if std::ptr::eq(text.as_ptr(), ENTITY_AMP.as_ptr()) {
                "amp"
            } else {
                "text"
            };
            self.kinds.push(kind);
        }
    }

    #[test]
    fn entity_references_are_pointer_identifiable() {
        let mut handler = Entities::default();
        let mut reader = Reader::with_capacity(&b"<a>x&lt;&gt;&amp;&x;y</a>"[..], 4096);
        reader.parse(&mut handler).unwrap();
        assert_eq!(handler.kinds, ["text", "lt", "gt", "amp", "amp", "text"]);
    }

    #[test]
    fn literal_gt_is_not_an_entity() {
        let mut handler = Entities::default();
        let mut reader = Reader::with_capacity(&b"<a>b>c</a>"[..], 4096);
        reader.parse(&mut handler).unwrap();
        assert_eq!(handler.kinds, ["text"]);
    }

    #[test]
    fn total_bytes_counts_the_whole_input() {
        let input = b"<?xml version=\"1.0\"?>\n<unit>text</unit>\n";
        let mut reader = Reader::with_capacity(&input[..], 4096);
        reader.parse(&mut crate::handler::Callbacks::new()).unwrap();
        assert_eq!(reader.total_bytes(), input.len() as u64);
    }
}
