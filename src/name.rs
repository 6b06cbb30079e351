//! Qualified names of elements and attributes, and the name-character mask
//! the lexer scans them with.

use std::fmt;

use memchr::memchr;

use crate::utils::write_byte_string;

/// Bit set over the 128 ASCII codepoints marking the bytes that may appear
/// in an element or attribute name: letters, digits, `.`, `-` and `_`.
///
/// The colon is deliberately not a name character; it is the prefix
/// separator and is handled outside this mask. Bytes >= 128 are treated as
/// non-name bytes, which srcML documents do not need in practice.
const NAME_MASK: u128 = name_mask();

const fn name_mask() -> u128 {
    let mut mask = 0u128;
    let mut b = 0u8;
    while b < 128 {
        if b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_' {
            mask |= 1u128 << b;
        }
        b += 1;
    }
    mask
}

/// Returns `true` if `b` can appear in an element or attribute name.
#[inline]
pub(crate) const fn is_name_byte(b: u8) -> bool {
    b < 128 && (NAME_MASK >> b) & 1 != 0
}

/// Length of the name-character run at the start of `bytes`.
#[inline]
pub(crate) fn name_len(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|&b| !is_name_byte(b))
        .unwrap_or(bytes.len())
}

/// A [qualified name] of an element or an attribute, as written in the
/// document, including any `prefix:` portion.
///
/// Borrows from the reader's buffer (or, for a synthetic end tag, from the
/// reader's owned copy of the open tag name) and is valid only for the
/// duration of the handler call that received it.
///
/// [qualified name]: https://www.w3.org/TR/xml-names11/#dt-qualname
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct QName<'a>(pub &'a [u8]);

impl<'a> QName<'a> {
    /// Returns the name as it is written in the document.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Returns the local part of the name: everything after the `:`, or the
    /// whole name if it has no prefix.
    pub fn local_name(&self) -> LocalName<'a> {
        match self.index() {
            Some(i) => LocalName(&self.0[i + 1..]),
            None => LocalName(self.0),
        }
    }

    /// Returns the namespace prefix, or `None` if the name has none.
    pub fn prefix(&self) -> Option<Prefix<'a>> {
        self.index().map(|i| Prefix(&self.0[..i]))
    }

    /// Splits the name into its local part and its optional prefix.
    #[inline]
    pub fn decompose(&self) -> (LocalName<'a>, Option<Prefix<'a>>) {
        match self.index() {
            Some(i) => (LocalName(&self.0[i + 1..]), Some(Prefix(&self.0[..i]))),
            None => (LocalName(self.0), None),
        }
    }

    #[inline]
    fn index(&self) -> Option<usize> {
        memchr(b':', self.0)
    }
}

impl fmt::Debug for QName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "QName(")?;
        write_byte_string(f, self.0)?;
        write!(f, ")")
    }
}

/// The [local part] of a qualified name.
///
/// [local part]: https://www.w3.org/TR/xml-names11/#dt-localname
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LocalName<'a>(&'a [u8]);

impl<'a> LocalName<'a> {
    /// Returns the local name as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }
}

impl fmt::Debug for LocalName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LocalName(")?;
        write_byte_string(f, self.0)?;
        write!(f, ")")
    }
}

/// The [namespace prefix] of a qualified name: everything before the `:`.
///
/// [namespace prefix]: https://www.w3.org/TR/xml-names11/#dt-prefix
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Prefix<'a>(&'a [u8]);

impl<'a> Prefix<'a> {
    /// Returns the prefix as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }
}

impl fmt::Debug for Prefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Prefix(")?;
        write_byte_string(f, self.0)?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_accepts_name_bytes() {
        for b in b'a'..=b'z' {
            assert!(is_name_byte(b));
        }
        for b in b'A'..=b'Z' {
            assert!(is_name_byte(b));
        }
        for b in b'0'..=b'9' {
            assert!(is_name_byte(b));
        }
        assert!(is_name_byte(b'.'));
        assert!(is_name_byte(b'-'));
        assert!(is_name_byte(b'_'));
    }

    #[test]
    fn mask_rejects_delimiters() {
        for &b in b": =\"'<>/&?![]\n\t\r" {
            assert!(!is_name_byte(b), "byte {:?} must not be a name byte", b as char);
        }
        assert!(!is_name_byte(0x80));
        assert!(!is_name_byte(0xFF));
    }

    #[test]
    fn name_run() {
        assert_eq!(name_len(b"unit language"), 4);
        assert_eq!(name_len(b"expr_stmt>"), 9);
        assert_eq!(name_len(b">x"), 0);
        assert_eq!(name_len(b"name"), 4);
    }

    #[test]
    fn unprefixed() {
        let name = QName(b"unit");
        assert_eq!(name.local_name().as_bytes(), b"unit");
        assert_eq!(name.prefix(), None);
        let (local, prefix) = name.decompose();
        assert_eq!(local.as_bytes(), b"unit");
        assert!(prefix.is_none());
    }

    #[test]
    fn prefixed() {
        let name = QName(b"cpp:directive");
        assert_eq!(name.as_bytes(), b"cpp:directive");
        assert_eq!(name.local_name().as_bytes(), b"directive");
        assert_eq!(name.prefix().unwrap().as_bytes(), b"cpp");
    }

    #[test]
    fn empty_local_part() {
        let (local, prefix) = QName(b"p:").decompose();
        assert_eq!(local.as_bytes(), b"");
        assert_eq!(prefix.unwrap().as_bytes(), b"p");
    }
}
