//! Burp Suite history export generation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::Write;

/// One `<item>` of a generated export.
#[derive(Debug, Clone)]
pub struct ItemFixture {
    pub time: String,
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub method: String,
    pub path: String,
    pub request: Vec<u8>,
    pub status: String,
    pub response: Vec<u8>,
    pub comment: String,
    /// Replaces the encoded request text verbatim when set.
    pub request_text: Option<String>,
    /// Replaces the encoded response text verbatim when set.
    pub response_text: Option<String>,
    /// Replaces the `<responselength>` text verbatim when set.
    pub response_length_text: Option<String>,
}

impl ItemFixture {
    /// A successful `GET` over https.
    pub fn get(host: &str, path: &str) -> Self {
        Self {
            time: "Wed Jun 14 10:22:05 UTC 2023".to_string(),
            host: host.to_string(),
            port: 443,
            protocol: "https".to_string(),
            method: "GET".to_string(),
            path: path.to_string(),
            request: format!("GET {} HTTP/1.1\r\nHost: {}\r\n\r\n", path, host).into_bytes(),
            status: "200".to_string(),
            response: b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello".to_vec(),
            comment: String::new(),
            request_text: None,
            response_text: None,
            response_length_text: None,
        }
    }

    /// A request that never got a response: Burp leaves status, length
    /// and response body empty.
    pub fn without_response(mut self) -> Self {
        self.status = String::new();
        self.response = Vec::new();
        self.response_length_text = Some(String::new());
        self
    }

    pub fn with_protocol(mut self, protocol: &str, port: u16) -> Self {
        self.protocol = protocol.to_string();
        self.port = port;
        self
    }

    pub fn with_time(mut self, time: &str) -> Self {
        self.time = time.to_string();
        self
    }

    pub fn with_response(mut self, response: &[u8]) -> Self {
        self.response = response.to_vec();
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn with_request_text(mut self, text: &str) -> Self {
        self.request_text = Some(text.to_string());
        self
    }

    pub fn with_response_text(mut self, text: &str) -> Self {
        self.response_text = Some(text.to_string());
        self
    }

    /// Text that ends up inside `<request>`.
    pub fn request_base64(&self) -> String {
        self.request_text
            .clone()
            .unwrap_or_else(|| STANDARD.encode(&self.request))
    }

    /// Text that ends up inside `<response>`.
    pub fn response_base64(&self) -> String {
        self.response_text
            .clone()
            .unwrap_or_else(|| STANDARD.encode(&self.response))
    }

    pub fn url(&self) -> String {
        format!("{}://{}:{}{}", self.protocol, self.host, self.port, self.path)
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        let _ = write!(
            xml,
            r#"  <item>
    <time>{time}</time>
    <url><![CDATA[{url}]]></url>
    <host ip="127.0.0.1">{host}</host>
    <port>{port}</port>
    <protocol>{protocol}</protocol>
    <method><![CDATA[{method}]]></method>
    <path><![CDATA[{path}]]></path>
    <extension>null</extension>
    <request base64="true"><![CDATA[{request}]]></request>
    <status>{status}</status>
    <responselength>{length}</responselength>
    <mimetype>HTML</mimetype>
    <response base64="true"><![CDATA[{response}]]></response>
    <comment>{comment}</comment>
  </item>
"#,
            time = self.time,
            url = self.url(),
            host = self.host,
            port = self.port,
            protocol = self.protocol,
            method = self.method,
            path = self.path,
            request = self.request_base64(),
            status = self.status,
            length = self
                .response_length_text
                .clone()
                .unwrap_or_else(|| self.response.len().to_string()),
            response = self.response_base64(),
            comment = self.comment,
        );
        xml
    }
}

/// A whole export document.
#[derive(Debug, Clone, Default)]
pub struct BurpExport {
    items: Vec<ItemFixture>,
}

impl BurpExport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item: ItemFixture) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(&self) -> &[ItemFixture] {
        &self.items
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE items [\n<!ELEMENT items (item*)>\n]>\n<items burpVersion=\"2023.5.2\" exportTime=\"Wed Jun 14 10:30:00 UTC 2023\">\n",
        );
        for item in &self.items {
            xml.push_str(&item.to_xml());
        }
        xml.push_str("</items>\n");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_every_item() {
        let export = BurpExport::new()
            .item(ItemFixture::get("a.example", "/"))
            .item(ItemFixture::get("b.example", "/x"));
        let xml = export.to_xml();

        assert_eq!(xml.matches("<item>").count(), 2);
        assert!(xml.contains("<host ip=\"127.0.0.1\">b.example</host>"));
        assert!(xml.ends_with("</items>\n"));
    }

    #[test]
    fn test_without_response_leaves_numbers_empty() {
        let xml = ItemFixture::get("a.example", "/").without_response().to_xml();
        assert!(xml.contains("<status></status>"));
        assert!(xml.contains("<responselength></responselength>"));
        assert!(xml.contains("<response base64=\"true\"><![CDATA[]]></response>"));
    }

    #[test]
    fn test_text_override_wins() {
        let item = ItemFixture::get("a.example", "/").with_request_text("%%%");
        assert_eq!(item.request_base64(), "%%%");
    }
}
