//! Streaming SAX-style reader for large srcML documents.
//!
//! ## Description
//!
//! srcML wraps source code in XML: hundreds of megabytes of deeply nested
//! elements, attributes and character data. This crate reads such documents
//! as a forward-only stream of lexical events pushed into a [`Handler`],
//! borrowing every name and value directly out of an internal refillable
//! byte buffer. No DOM is built and no allocation happens per event.
//!
//! Two handler bindings are available and interchangeable at the call site:
//!
//! - implement [`Handler`] on your own type (all methods default to no-ops,
//!   so only the events you care about need a body);
//! - register individual closures on a [`Callbacks`] value.
//!
//! ## Example
//!
//! ```rust
//! use srcfacts::handler::Callbacks;
//! use srcfacts::reader::Reader;
//!
//! let xml = &br#"<unit language="C++"><name>main</name></unit>"#[..];
//!
//! let mut starts = 0;
//! let mut text = Vec::new();
//! {
//!     let mut handler = Callbacks::new();
//!     handler.on_start_tag(|_name, _depth| starts += 1);
//!     handler.on_characters(|chars, _depth| text.extend_from_slice(chars));
//!
//!     let mut reader = Reader::from_reader(xml);
//!     reader.parse(&mut handler).unwrap();
//! }
//! assert_eq!(starts, 2);
//! assert_eq!(text, b"main");
//! ```
//!
//! ## Slice lifetimes
//!
//! Every slice a handler receives points into the reader's buffer and is
//! valid only until the handler returns; the borrow checker enforces this.
//! Copy whatever must outlive the event. The reader never refills the
//! buffer while such a borrow is live.
//!
//! ## Errors
//!
//! The first error is fatal. The reader performs only the local checks the
//! lexer needs; it is not a validating parser, does not read DTDs and does
//! not apply namespace scoping rules.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod errors;
pub mod handler;
pub mod name;
pub mod reader;

mod utils;

// reexports
pub use crate::errors::{Error, Result};
pub use crate::handler::{Callbacks, Handler};
pub use crate::name::QName;
pub use crate::reader::Reader;
