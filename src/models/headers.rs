//! Header Map Module
//!
//! Ordered HTTP header pairs with case-insensitive name lookup, plus the raw
//! wire codec (`Name: Value\r\n`) used for on-disk header artifacts.

// == Headers ==
/// Ordered collection of HTTP header name/value pairs.
///
/// Names compare case-insensitively; duplicates are allowed and insertion
/// order is preserved, matching HTTP wire semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    pairs: Vec<(String, String)>,
}

impl Headers {
    // == Constructor ==
    /// Creates an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Appends a header pair, keeping any existing pairs with the same name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    // == Get ==
    /// Returns the first value stored under `name`, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value stored under `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    // == Iteration ==
    /// Iterates over all pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of header pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no headers are stored.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    // == Wire Codec ==
    /// Encodes the headers in raw HTTP wire format: `Name: Value\r\n` pairs
    /// concatenated.
    pub fn to_raw(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, value) in &self.pairs {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out
    }

    /// Parses raw wire-format bytes back into a header map.
    ///
    /// Names and values are trimmed of surrounding whitespace; lines without
    /// a colon are skipped.
    pub fn from_raw(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        let mut headers = Self::new();
        for line in text.split("\r\n") {
            if line.is_empty() {
                continue;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push(name.trim(), value.trim());
            }
        }
        headers
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.push(name, value);
        }
        headers
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive() {
        let headers = Headers::from_iter([("Content-Type", "text/html")]);
        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
        assert_eq!(headers.get("X-Missing"), None);
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let headers = Headers::from_iter([
            ("Set-Cookie", "a=1"),
            ("Content-Type", "text/html"),
            ("Set-Cookie", "b=2"),
        ]);
        assert_eq!(headers.get("Set-Cookie"), Some("a=1"));
        assert_eq!(headers.get_all("set-cookie"), vec!["a=1", "b=2"]);
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_to_raw_wire_format() {
        let headers = Headers::from_iter([("Content-Type", "text/html"), ("Server", "nginx")]);
        let raw = headers.to_raw();
        assert_eq!(raw, b"Content-Type: text/html\r\nServer: nginx\r\n");
    }

    #[test]
    fn test_from_raw_round_trip() {
        let original = Headers::from_iter([
            ("Content-Type", "text/html; charset=utf-8"),
            ("Set-Cookie", "a=1"),
            ("Set-Cookie", "b=2"),
        ]);
        let parsed = Headers::from_raw(&original.to_raw());
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_from_raw_skips_malformed_lines() {
        let parsed = Headers::from_raw(b"Content-Type: text/html\r\nnot a header\r\n");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get("Content-Type"), Some("text/html"));
    }

    #[test]
    fn test_from_raw_empty_input() {
        let parsed = Headers::from_raw(b"");
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_value_containing_colon() {
        let original = Headers::from_iter([("Location", "http://example.com:8080/path")]);
        let parsed = Headers::from_raw(&original.to_raw());
        assert_eq!(parsed.get("Location"), Some("http://example.com:8080/path"));
    }
}
