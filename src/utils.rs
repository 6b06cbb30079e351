pub fn write_byte_string(f: &mut std::fmt::Formatter<'_>, byte_string: &[u8]) -> std::fmt::Result {
    write!(f, "\"")?;
    for b in byte_string {
        match *b {
            b'"' => write!(f, "\\\"")?,
            32..=33 | 35..=126 => write!(f, "{}", *b as char)?,
            _ => write!(f, "{:#02X}", b)?,
        }
    }
    write!(f, "\"")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ByteString(Vec<u8>);

    impl std::fmt::Debug for ByteString {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write_byte_string(f, &self.0)
        }
    }

    #[test]
    fn printable() {
        let bytes = ByteString(b"unit language=C++".to_vec());
        assert_eq!(format!("{:?}", bytes), "\"unit language=C++\"".to_owned());
    }

    #[test]
    fn quotes_and_control_bytes() {
        let bytes = ByteString(b"a\"b\n".to_vec());
        assert_eq!(format!("{:?}", bytes), "\"a\\\"b0xA\"".to_owned());
    }
}
