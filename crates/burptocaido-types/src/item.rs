/// How a request/response body is carried inside the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyEncoding {
    /// Element text is base64 (`base64="true"` or no attribute).
    #[default]
    Base64,
    /// Element text is the literal payload (`base64="false"`).
    Plain,
}

/// Raw text of a `<request>` or `<response>` element, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Body {
    pub text: String,
    pub encoding: BodyEncoding,
}

impl Body {
    pub fn base64(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            encoding: BodyEncoding::Base64,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            encoding: BodyEncoding::Plain,
        }
    }
}

/// One request/response pair from a Burp Suite history export.
///
/// Lives only while a single record is being converted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    /// Capture time, e.g. `Wed Jun 14 10:22:05 UTC 2023`.
    pub time: String,
    /// Full request URL.
    pub url: String,
    /// Target host name.
    pub host: String,
    /// Target port.
    pub port: u16,
    /// `http` or `https`.
    pub protocol: String,
    /// HTTP method.
    pub method: String,
    /// Request path including the query string.
    pub path: String,
    /// File extension Burp derived from the path (`null` when none).
    pub extension: String,
    /// Full request bytes.
    pub request: Body,
    /// Response status code.
    pub status: u16,
    /// Response length as reported by Burp.
    pub response_length: i64,
    /// Response MIME type as classified by Burp.
    pub mime_type: String,
    /// Full response bytes.
    pub response: Body,
    /// User comment attached in Burp.
    pub comment: String,
}

impl Item {
    /// Only the exact lowercase `https` scheme counts as TLS.
    pub fn is_tls(&self) -> bool {
        self.protocol == "https"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_protocol(protocol: &str) -> Item {
        Item {
            protocol: protocol.to_string(),
            ..Item::default()
        }
    }

    #[test]
    fn test_is_tls_only_for_exact_https() {
        assert!(item_with_protocol("https").is_tls());
        assert!(!item_with_protocol("http").is_tls());
        assert!(!item_with_protocol("HTTPS").is_tls());
        assert!(!item_with_protocol("Https").is_tls());
        assert!(!item_with_protocol("").is_tls());
        assert!(!item_with_protocol(" https").is_tls());
    }

    #[test]
    fn test_body_constructors() {
        assert_eq!(Body::base64("QQ==").encoding, BodyEncoding::Base64);
        assert_eq!(Body::plain("A").encoding, BodyEncoding::Plain);
        assert_eq!(Body::default().encoding, BodyEncoding::Base64);
    }
}
