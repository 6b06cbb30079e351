//! Produces a report with various measures of source code in the srcML
//! format, read from standard input.
//!
//! Output is a Markdown table with the measures and the event tallies;
//! performance statistics go to standard error.

use std::io;
use std::process;
use std::ptr;
use std::time::Instant;

use memchr::memchr_iter;

use srcfacts::handler::Handler;
use srcfacts::name::QName;
use srcfacts::reader::{Reader, ENTITY_AMP, ENTITY_GT, ENTITY_LT};

/// `true` for the single-byte slices the reader emits for entity
/// references; such events count as one byte of text and never contain a
/// newline.
fn is_entity(text: &[u8]) -> bool {
    ptr::eq(text.as_ptr(), ENTITY_LT.as_ptr())
        || ptr::eq(text.as_ptr(), ENTITY_GT.as_ptr())
        || ptr::eq(text.as_ptr(), ENTITY_AMP.as_ptr())
}

#[derive(Default)]
struct EventCounts {
    xml_declarations: u64,
    start_tags: u64,
    end_tags: u64,
    character_sections: u64,
    attributes: u64,
    namespaces: u64,
    comments: u64,
    cdata_sections: u64,
    processing_instructions: u64,
}

/// Accumulates the srcML measures of the document.
#[derive(Default)]
struct SrcFacts {
    events: EventCounts,
    url: Option<Vec<u8>>,
    text_size: u64,
    loc: u64,
    units: u64,
    classes: u64,
    functions: u64,
    declarations: u64,
    expressions: u64,
    comments: u64,
    returns: u64,
    string_literals: u64,
    line_comments: u64,
    /// A `unit` inside the root unit makes the document an archive.
    is_archive: bool,
    /// The open tag is a `literal` element; decided by its `type` attribute.
    literal_tag: bool,
    /// The open tag is a `comment` element; decided by its `type` attribute.
    comment_tag: bool,
}

impl Handler for SrcFacts {
    fn xml_declaration(
        &mut self,
        _version: &[u8],
        _encoding: Option<&[u8]>,
        _standalone: Option<&[u8]>,
        _depth: i32,
    ) {
        self.events.xml_declarations += 1;
    }

    fn start_tag(&mut self, name: QName, depth: i32) {
        self.events.start_tags += 1;
        self.literal_tag = false;
        self.comment_tag = false;
        let local = name.local_name();
        let local = local.as_bytes();
        if local == b"expr" {
            self.expressions += 1;
        } else if local == b"decl" {
            self.declarations += 1;
        } else if local == b"comment" {
            self.comments += 1;
            self.comment_tag = true;
        } else if local == b"function" {
            self.functions += 1;
        } else if local == b"unit" {
            self.units += 1;
            if depth == 1 {
                self.is_archive = true;
            }
        } else if local == b"class" {
            self.classes += 1;
        } else if local == b"return" {
            self.returns += 1;
        } else if local == b"literal" {
            self.literal_tag = true;
        }
    }

    fn end_tag(&mut self, _name: QName, _depth: i32) {
        self.events.end_tags += 1;
    }

    fn attribute(&mut self, name: QName, value: &[u8], _depth: i32) {
        self.events.attributes += 1;
        let local = name.local_name();
        let local = local.as_bytes();
        if local == b"url" {
            self.url = Some(value.to_vec());
        }
        if self.literal_tag && local == b"type" && value == b"string" {
            self.string_literals += 1;
        } else if self.comment_tag && local == b"type" && value == b"line" {
            self.line_comments += 1;
        }
        self.literal_tag = false;
        self.comment_tag = false;
    }

    fn namespace_decl(&mut self, _prefix: Option<&[u8]>, _uri: &[u8], _depth: i32) {
        self.events.namespaces += 1;
    }

    fn characters(&mut self, text: &[u8], _depth: i32) {
        self.events.character_sections += 1;
        if is_entity(text) {
            self.text_size += 1;
        } else {
            self.loc += memchr_iter(b'\n', text).count() as u64;
            self.text_size += text.len() as u64;
        }
    }

    fn comment(&mut self, _text: &[u8], _depth: i32) {
        self.events.comments += 1;
    }

    fn cdata(&mut self, text: &[u8], _depth: i32) {
        self.events.cdata_sections += 1;
        self.loc += memchr_iter(b'\n', text).count() as u64;
        self.text_size += text.len() as u64;
    }

    fn processing_instruction(&mut self, _target: &[u8], _data: &[u8], _depth: i32) {
        self.events.processing_instructions += 1;
    }
}

/// Width of the value column, scaled to the magnitude of the byte count.
fn value_width(total_bytes: u64) -> usize {
    let digits = ((total_bytes as f64).log10() * 1.3 + 1.0) as usize;
    digits.max(5)
}

fn report(facts: &SrcFacts, total_bytes: u64) {
    let files = facts.units.saturating_sub(if facts.is_archive { 1 } else { 0 });
    let url = match &facts.url {
        Some(url) => String::from_utf8_lossy(url).into_owned(),
        None => String::new(),
    };
    let width = value_width(total_bytes);

    println!("# srcfacts: {}", url);
    println!("| Measure                 | {:>width$} |", "Value", width = width);
    println!("|:------------------------|-{:->width$}:|", "", width = width);
    println!("| srcML bytes             | {:>width$} |", total_bytes, width = width);
    println!("| Characters              | {:>width$} |", facts.text_size, width = width);
    println!("| Files                   | {:>width$} |", files, width = width);
    println!("| LOC                     | {:>width$} |", facts.loc, width = width);
    println!("| Classes                 | {:>width$} |", facts.classes, width = width);
    println!("| Functions               | {:>width$} |", facts.functions, width = width);
    println!("| Declarations            | {:>width$} |", facts.declarations, width = width);
    println!("| Expressions             | {:>width$} |", facts.expressions, width = width);
    println!("| Comments                | {:>width$} |", facts.comments, width = width);
    println!("| Returns                 | {:>width$} |", facts.returns, width = width);
    println!("| String literals         | {:>width$} |", facts.string_literals, width = width);
    println!("| Line comments           | {:>width$} |", facts.line_comments, width = width);
    println!();
    let events = &facts.events;
    println!("| Event                   | {:>width$} |", "Count", width = width);
    println!("|:------------------------|-{:->width$}:|", "", width = width);
    println!("| XML declaration         | {:>width$} |", events.xml_declarations, width = width);
    println!("| Element start tag       | {:>width$} |", events.start_tags, width = width);
    println!("| Element end tag         | {:>width$} |", events.end_tags, width = width);
    println!("| Character section       | {:>width$} |", events.character_sections, width = width);
    println!("| Attribute               | {:>width$} |", events.attributes, width = width);
    println!("| XML namespace           | {:>width$} |", events.namespaces, width = width);
    println!("| XML comment             | {:>width$} |", events.comments, width = width);
    println!("| CDATA                   | {:>width$} |", events.cdata_sections, width = width);
    println!("| Processing instruction  | {:>width$} |", events.processing_instructions, width = width);
}

fn run() -> srcfacts::Result<()> {
    let start = Instant::now();
    let stdin = io::stdin();

    let mut facts = SrcFacts::default();
    let mut reader = Reader::from_reader(stdin.lock());
    reader.parse(&mut facts)?;

    let elapsed = start.elapsed().as_secs_f64();
    report(&facts, reader.total_bytes());

    let mloc_per_sec = if elapsed > 0.0 {
        facts.loc as f64 / elapsed / 1_000_000.0
    } else {
        0.0
    };
    eprintln!();
    eprintln!("{:.3} sec", elapsed);
    eprintln!("{:.3} MLOC/sec", mloc_per_sec);
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("parser error: {}", error);
        process::exit(1);
    }
}
