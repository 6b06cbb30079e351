//! Error management module.

use std::fmt;
use std::io;

/// The production the reader was lexing when an error was raised.
///
/// Used in diagnostics only; the reader aborts on the first error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Construct {
    /// The `<?xml …?>` declaration.
    XmlDecl,
    /// A `<?target data?>` processing instruction.
    ProcessingInstruction,
    /// An element start tag.
    StartTag,
    /// An element end tag.
    EndTag,
    /// A `<!-- … -->` comment.
    Comment,
    /// A `<![CDATA[ … ]]>` section.
    CData,
    /// An `xmlns` or `xmlns:prefix` declaration inside a start tag.
    Namespace,
    /// An attribute inside a start tag.
    Attribute,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::XmlDecl => f.write_str("XML declaration"),
            Self::ProcessingInstruction => f.write_str("processing instruction"),
            Self::StartTag => f.write_str("start tag"),
            Self::EndTag => f.write_str("end tag"),
            Self::Comment => f.write_str("XML comment"),
            Self::CData => f.write_str("CDATA section"),
            Self::Namespace => f.write_str("namespace declaration"),
            Self::Attribute => f.write_str("attribute"),
        }
    }
}

/// A locally detectable violation of the XML grammar.
///
/// These checks are the ones the lexer needs to make progress; they are not
/// well-formedness validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllFormedError {
    /// An element, attribute or target name was empty.
    EmptyName(Construct),
    /// A name began with `:`.
    LeadingColon(Construct),
    /// The named attribute was not followed by `=`.
    MissingEquals(String),
    /// The value of the named attribute was not delimited by `"` or `'`.
    MissingDelimiter(String),
    /// The first attribute of the XML declaration was not `version`.
    MissingVersion,
    /// An unknown or out-of-order attribute in the XML declaration.
    InvalidDeclAttribute(String),
    /// An end tag was found with no element open.
    UnmatchedEndTag,
    /// Non-whitespace character data outside the root element.
    ContentOutsideRoot,
    /// The `>` closing the construct was not where the grammar requires it.
    MissingTagEnd(Construct),
}

impl fmt::Display for IllFormedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EmptyName(c) => write!(f, "invalid {} name", c),
            Self::LeadingColon(c) => write!(f, "{} name begins with ':'", c),
            Self::MissingEquals(name) => write!(f, "attribute {} missing '='", name),
            Self::MissingDelimiter(name) => write!(f, "attribute {} missing delimiter", name),
            Self::MissingVersion => {
                f.write_str("missing required first attribute version in XML declaration")
            }
            Self::InvalidDeclAttribute(name) => {
                write!(f, "invalid attribute {} in XML declaration", name)
            }
            Self::UnmatchedEndTag => f.write_str("end tag without matching start tag"),
            Self::ContentOutsideRoot => {
                f.write_str("character content outside the root element")
            }
            Self::MissingTagEnd(c) => write!(f, "expected '>' to close {}", c),
        }
    }
}

/// The error type used by this crate.
///
/// All errors are fatal: the last successfully emitted event is the final
/// event, and the reader must be discarded.
#[derive(Debug)]
pub enum Error {
    /// An error originating from reading the input stream.
    Io(io::Error),
    /// An opener was seen but its terminator was not found within the
    /// buffered window, even after one refill.
    Incomplete(Construct),
    /// The markup violates the grammar at the point of the error.
    IllFormed(IllFormedError),
    /// The input ended inside a comment or CDATA section.
    UnexpectedEof(Construct),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Incomplete(c) => write!(f, "incomplete {}", c),
            Self::IllFormed(e) => write!(f, "{}", e),
            Self::UnexpectedEof(c) => write!(f, "unexpected end of input inside {}", c),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    #[inline]
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<IllFormedError> for Error {
    #[inline]
    fn from(error: IllFormedError) -> Self {
        Self::IllFormed(error)
    }
}

/// A specialized `Result` type where the error is hard-wired to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            Error::Incomplete(Construct::StartTag).to_string(),
            "incomplete start tag"
        );
        assert_eq!(
            Error::UnexpectedEof(Construct::Comment).to_string(),
            "unexpected end of input inside XML comment"
        );
        assert_eq!(
            Error::IllFormed(IllFormedError::MissingEquals("id".to_string())).to_string(),
            "attribute id missing '='"
        );
    }
}
