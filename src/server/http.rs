//! Minimal HTTP/1.1 request parsing and response encoding.
//!
//! Only what the prediction endpoint needs: the request line, a bounded
//! header block that is read and discarded, and JSON responses sent with
//! `Connection: close`.

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::error::{EmosiError, Result};

/// Longest accepted request line or header line, in bytes.
pub const MAX_LINE_LENGTH: usize = 8 * 1024;

/// Most header lines read before the request is rejected.
pub const MAX_HEADERS: usize = 100;

/// A parsed request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    /// Decoded query parameters in order of appearance.
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Parse `METHOD TARGET HTTP/x.y`.
    pub fn parse_request_line(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut parts = line.split(' ');
        let (Some(method), Some(target), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(EmosiError::invalid_argument(format!(
                "Malformed request line: {line:?}"
            )));
        };

        if method.is_empty() || !method.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(EmosiError::invalid_argument(format!(
                "Malformed request method: {method:?}"
            )));
        }
        if !version.starts_with("HTTP/1.") {
            return Err(EmosiError::invalid_argument(format!(
                "Unsupported HTTP version: {version:?}"
            )));
        }
        if !target.starts_with('/') {
            return Err(EmosiError::invalid_argument(format!(
                "Unsupported request target: {target:?}"
            )));
        }

        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)?),
            None => (target, Vec::new()),
        };

        Ok(Self {
            method: method.to_string(),
            path: path.to_string(),
            query,
        })
    }

    /// Value of a query parameter. A repeated parameter yields its last value.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Split and decode an `application/x-www-form-urlencoded` query string.
pub fn parse_query(query: &str) -> Result<Vec<(String, String)>> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((percent_decode(key)?, percent_decode(value)?))
        })
        .collect()
}

/// Decode `%XX` escapes and `+` as space. The result must be UTF-8.
pub fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let high = bytes.get(i + 1).and_then(|b| hex_value(*b));
                let low = bytes.get(i + 2).and_then(|b| hex_value(*b));
                let (Some(high), Some(low)) = (high, low) else {
                    return Err(EmosiError::invalid_argument(format!(
                        "Invalid percent escape in {input:?}"
                    )));
                };
                decoded.push((high << 4) | low);
                i += 2;
            }
            b => decoded.push(b),
        }
        i += 1;
    }

    String::from_utf8(decoded)
        .map_err(|_| EmosiError::invalid_argument(format!("Query is not valid UTF-8: {input:?}")))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Read one line, failing if it exceeds [`MAX_LINE_LENGTH`].
async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R, buf: &mut Vec<u8>) -> Result<usize> {
    buf.clear();
    let n = (&mut *reader)
        .take(MAX_LINE_LENGTH as u64)
        .read_until(b'\n', buf)
        .await?;
    if n == MAX_LINE_LENGTH && buf.last() != Some(&b'\n') {
        return Err(EmosiError::invalid_argument("Request line too long"));
    }
    Ok(n)
}

/// Read a request head. Returns `None` if the peer closed the connection
/// before sending anything.
pub async fn read_request<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<HttpRequest>> {
    let mut buf = Vec::new();
    if read_line(reader, &mut buf).await? == 0 {
        return Ok(None);
    }
    let line = std::str::from_utf8(&buf)
        .map_err(|_| EmosiError::invalid_argument("Request line is not valid UTF-8"))?;
    let request = HttpRequest::parse_request_line(line)?;

    // Headers carry nothing the endpoint uses.
    let mut headers = 0;
    loop {
        let n = read_line(reader, &mut buf).await?;
        if n == 0 || buf == b"\r\n" || buf == b"\n" {
            break;
        }
        headers += 1;
        if headers > MAX_HEADERS {
            return Err(EmosiError::invalid_argument("Too many request headers"));
        }
    }

    Ok(Some(request))
}

/// A JSON response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn json<T: Serialize>(status: u16, body: &T) -> Result<Self> {
        Ok(Self {
            status,
            body: serde_json::to_string(body)?,
        })
    }

    /// A `{"detail": message}` error body.
    pub fn detail(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "detail": message }).to_string(),
        }
    }

    /// Encode status line, headers and body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let head = format!(
            "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            reason_phrase(self.status),
            self.body.len()
        );
        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(self.body.as_bytes());
        bytes
    }
}

pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_line() {
        let request =
            HttpRequest::parse_request_line("GET /predict-teks?text=aku+senang%21 HTTP/1.1\r\n")
                .unwrap();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/predict-teks");
        assert_eq!(request.query_param("text"), Some("aku senang!"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_parse_request_line_errors() {
        for line in [
            "",
            "GET",
            "GET /predict-teks",
            "GET /predict-teks HTTP/1.1 extra",
            "get /predict-teks HTTP/1.1",
            "GET predict-teks HTTP/1.1",
            "GET /predict-teks SPDY/3",
            "GET /predict-teks?text=%zz HTTP/1.1",
        ] {
            assert!(
                HttpRequest::parse_request_line(line).is_err(),
                "expected {line:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("halo+dunia").unwrap(), "halo dunia");
        assert_eq!(percent_decode("a%2Bb%20c").unwrap(), "a+b c");
        assert_eq!(percent_decode("%F0%9F%98%82").unwrap(), "😂");
        assert!(percent_decode("%").is_err());
        assert!(percent_decode("%4").is_err());
        assert!(percent_decode("%FF").is_err());
    }

    #[test]
    fn test_parse_query() {
        let query = parse_query("text=a&&flag&text=b").unwrap();
        assert_eq!(
            query,
            vec![
                ("text".to_string(), "a".to_string()),
                ("flag".to_string(), String::new()),
                ("text".to_string(), "b".to_string()),
            ]
        );
        let request = HttpRequest {
            method: "GET".to_string(),
            path: "/".to_string(),
            query,
        };
        assert_eq!(request.query_param("text"), Some("b"));
    }

    #[tokio::test]
    async fn test_read_request() {
        let raw: &[u8] = b"GET /predict-teks?text=sedih HTTP/1.1\r\nHost: localhost\r\nAccept: */*\r\n\r\n";
        let mut reader = tokio::io::BufReader::new(raw);
        let request = read_request(&mut reader).await.unwrap().unwrap();
        assert_eq!(request.query_param("text"), Some("sedih"));

        let mut empty = tokio::io::BufReader::new(&b""[..]);
        assert!(read_request(&mut empty).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_request_line_too_long() {
        let mut raw = b"GET /predict-teks?text=".to_vec();
        raw.extend(std::iter::repeat_n(b'a', MAX_LINE_LENGTH));
        raw.extend_from_slice(b" HTTP/1.1\r\n\r\n");
        let mut reader = tokio::io::BufReader::new(raw.as_slice());
        assert!(read_request(&mut reader).await.is_err());
    }

    #[test]
    fn test_response_encoding() {
        let response = HttpResponse::detail(404, "Not Found");
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n{\"detail\":\"Not Found\"}"));
        assert!(text.contains(&format!("Content-Length: {}\r\n", response.body.len())));
    }
}
