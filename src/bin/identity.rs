//! An identity transformation of XML: reads a document from standard input
//! and writes the equivalent XML to standard output.
//!
//! Entity-sourced `<`, `>` and `&` characters are written back as `&lt;`,
//! `&gt;` and `&amp;`; attribute values are normalized to double quotes and
//! self-closing tags are expanded. The reparsed output produces the same
//! event sequence as the input.

use std::io::{self, BufWriter, Write};
use std::process;
use std::ptr;

use srcfacts::handler::Handler;
use srcfacts::name::QName;
use srcfacts::reader::{Reader, ENTITY_AMP, ENTITY_GT, ENTITY_LT};

/// Markup whose closing token has not been written yet.
///
/// A start tag stays open across its attribute and namespace events; a
/// comment or CDATA section stays open across the parts of a body that the
/// reader delivers in several events.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    OpenTag,
    Comment,
    CData,
}

/// Writes events back out as markup, closing pending constructs lazily.
struct Identity<W: Write> {
    out: W,
    pending: Pending,
    error: Option<io::Error>,
}

impl<W: Write> Identity<W> {
    fn new(out: W) -> Self {
        Self {
            out,
            pending: Pending::None,
            error: None,
        }
    }

    /// Runs `f` against the output unless a previous write failed; the
    /// first error is kept and surfaced by [`finish`](Self::finish).
    fn emit(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if self.error.is_none() {
            if let Err(e) = f(&mut self.out) {
                self.error = Some(e);
            }
        }
    }

    fn close_pending(&mut self) {
        let closer: &[u8] = match self.pending {
            Pending::OpenTag => b">",
            Pending::Comment => b"-->",
            Pending::CData => b"]]>",
            Pending::None => return,
        };
        self.pending = Pending::None;
        self.emit(|out| out.write_all(closer));
    }

    fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }
}

impl<W: Write> Handler for Identity<W> {
    fn xml_declaration(
        &mut self,
        version: &[u8],
        encoding: Option<&[u8]>,
        standalone: Option<&[u8]>,
        _depth: i32,
    ) {
        self.close_pending();
        self.emit(|out| {
            out.write_all(b"<?xml version=\"")?;
            out.write_all(version)?;
            out.write_all(b"\"")?;
            if let Some(encoding) = encoding {
                out.write_all(b" encoding=\"")?;
                out.write_all(encoding)?;
                out.write_all(b"\"")?;
            }
            if let Some(standalone) = standalone {
                out.write_all(b" standalone=\"")?;
                out.write_all(standalone)?;
                out.write_all(b"\"")?;
            }
            out.write_all(b"?>\n")
        });
    }

    fn start_tag(&mut self, name: QName, _depth: i32) {
        self.close_pending();
        self.emit(|out| {
            out.write_all(b"<")?;
            out.write_all(name.as_bytes())
        });
        self.pending = Pending::OpenTag;
    }

    fn end_tag(&mut self, name: QName, _depth: i32) {
        self.close_pending();
        self.emit(|out| {
            out.write_all(b"</")?;
            out.write_all(name.as_bytes())?;
            out.write_all(b">")
        });
    }

    fn attribute(&mut self, name: QName, value: &[u8], _depth: i32) {
        self.emit(|out| {
            out.write_all(b" ")?;
            out.write_all(name.as_bytes())?;
            out.write_all(b"=\"")?;
            out.write_all(value)?;
            out.write_all(b"\"")
        });
    }

    fn namespace_decl(&mut self, prefix: Option<&[u8]>, uri: &[u8], _depth: i32) {
        self.emit(|out| {
            out.write_all(b" xmlns")?;
            if let Some(prefix) = prefix {
                out.write_all(b":")?;
                out.write_all(prefix)?;
            }
            out.write_all(b"=\"")?;
            out.write_all(uri)?;
            out.write_all(b"\"")
        });
    }

    fn characters(&mut self, text: &[u8], _depth: i32) {
        self.close_pending();
        let text: &[u8] = if ptr::eq(text.as_ptr(), ENTITY_LT.as_ptr()) {
            b"&lt;"
        } else if ptr::eq(text.as_ptr(), ENTITY_GT.as_ptr()) {
            b"&gt;"
        } else if ptr::eq(text.as_ptr(), ENTITY_AMP.as_ptr()) {
            b"&amp;"
        } else {
            text
        };
        self.emit(|out| out.write_all(text));
    }

    fn comment(&mut self, text: &[u8], _depth: i32) {
        if self.pending != Pending::Comment {
            self.close_pending();
            self.emit(|out| out.write_all(b"<!--"));
            self.pending = Pending::Comment;
        }
        self.emit(|out| out.write_all(text));
    }

    fn cdata(&mut self, text: &[u8], _depth: i32) {
        if self.pending != Pending::CData {
            self.close_pending();
            self.emit(|out| out.write_all(b"<![CDATA["));
            self.pending = Pending::CData;
        }
        self.emit(|out| out.write_all(text));
    }

    fn processing_instruction(&mut self, target: &[u8], data: &[u8], _depth: i32) {
        self.close_pending();
        self.emit(|out| {
            out.write_all(b"<?")?;
            out.write_all(target)?;
            out.write_all(b" ")?;
            out.write_all(data)?;
            out.write_all(b"?>")
        });
    }

    fn end_document(&mut self, _depth: i32) {
        self.close_pending();
        self.emit(|out| out.write_all(b"\n"));
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut handler = Identity::new(BufWriter::new(stdout.lock()));
    let mut reader = Reader::from_reader(stdin.lock());
    reader.parse(&mut handler)?;
    handler.finish()?;
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("parser error: {}", error);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transform(input: &[u8]) -> Vec<u8> {
        let mut handler = Identity::new(Vec::new());
        let mut reader = Reader::with_capacity(input, 4096);
        reader.parse(&mut handler).unwrap();
        assert!(handler.error.is_none());
        handler.out
    }

    #[test]
    fn reproduces_plain_markup() {
        let input = &b"<?xml version=\"1.0\"?>\n<unit><name>main</name></unit>\n"[..];
        assert_eq!(transform(input), input);
    }

    #[test]
    fn expands_self_closing_tags() {
        assert_eq!(transform(b"<unit><expr/></unit>"), b"<unit><expr></expr></unit>\n");
    }

    #[test]
    fn escapes_entity_sourced_characters() {
        assert_eq!(transform(b"<a>x&lt;y&amp;z</a>"), b"<a>x&lt;y&amp;z</a>\n");
    }

    #[test]
    fn normalizes_attribute_quotes() {
        assert_eq!(
            transform(b"<a n:x='1' xmlns:n='u'></a>"),
            b"<a n:x=\"1\" xmlns:n=\"u\"></a>\n"
        );
    }

    #[test]
    fn merges_split_comment_bodies() {
        // A comment body larger than the buffer arrives as several events;
        // the output must still contain a single comment.
        let mut input = Vec::from(&b"<unit><!--"[..]);
        input.extend(std::iter::repeat(b'c').take(9000));
        input.extend_from_slice(b"--><block>a&amp;b</block></unit>");

        let once = transform(&input);
        assert_eq!(once.iter().filter(|&&b| b == b'!').count(), 1);

        // The transformation is a fixed point from the first pass on.
        let twice = transform(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn writes_declaration_attributes_in_order() {
        assert_eq!(
            transform(b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?><r/>"),
            b"<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<r></r>\n"
        );
    }
}
