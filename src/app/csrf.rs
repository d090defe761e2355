use tracing::debug;

use crate::error::MutationError;
use crate::http;

const TOKEN_META_NAME: &str = "csrf-token";

/// A non-empty anti-forgery token, sent as `X-CSRFToken`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(raw: &str) -> Result<Self, MutationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(MutationError::MissingToken);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Explicit token first, then the meta tag of `token_page`, else `MissingToken`.
pub fn resolve_token(
    agent: &ureq::Agent,
    base_url: &str,
    explicit: Option<&str>,
    token_page: Option<&str>,
    cookie: Option<&str>,
) -> Result<CsrfToken, MutationError> {
    if let Some(raw) = explicit.filter(|raw| !raw.trim().is_empty()) {
        return CsrfToken::new(raw);
    }
    let Some(page) = token_page else {
        return Err(MutationError::MissingToken);
    };

    let url = http::join_url(base_url, page);
    debug!(%url, "fetching csrf token page");
    let headers: Vec<(&str, &str)> = cookie.map(|value| ("Cookie", value)).into_iter().collect();
    let reply = http::get_text(agent, &url, &headers).map_err(MutationError::TokenPage)?;
    if !(200..300).contains(&reply.status) {
        return Err(MutationError::TokenPage(format!("HTTP status {}", reply.status)));
    }

    let raw = extract_meta_content(&reply.body, TOKEN_META_NAME).ok_or(MutationError::MissingToken)?;
    CsrfToken::new(&raw)
}

/// Finds `<meta name="{name}" content="...">` in an HTML document.
pub(crate) fn extract_meta_content(html: &str, name: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut from = 0;
    while let Some(offset) = lower[from..].find("<meta") {
        let start = from + offset + "<meta".len();
        let (attributes, consumed) = parse_attributes(&html[start..]);
        let is_target = attributes
            .iter()
            .any(|(key, value)| key == "name" && value.eq_ignore_ascii_case(name));
        if is_target {
            return attributes
                .into_iter()
                .find(|(key, _)| key == "content")
                .map(|(_, value)| value);
        }
        from = start + consumed;
    }
    None
}

/// Walks `key=value` pairs up to the tag's closing `>`, stepping over quoted
/// values whole. Returns the pairs (keys lowercased) and the bytes consumed.
fn parse_attributes(tag: &str) -> (Vec<(String, String)>, usize) {
    let bytes = tag.as_bytes();
    let len = bytes.len();
    let skip_whitespace = |mut pos: usize| {
        while pos < len && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        pos
    };

    let mut attributes = Vec::new();
    let mut pos = 0;
    loop {
        while pos < len && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        if pos >= len || bytes[pos] == b'>' {
            break;
        }

        let key_start = pos;
        while pos < len
            && !bytes[pos].is_ascii_whitespace()
            && !matches!(bytes[pos], b'=' | b'>' | b'/')
        {
            pos += 1;
        }
        let key = tag[key_start..pos].to_ascii_lowercase();

        pos = skip_whitespace(pos);
        let mut value = String::new();
        if pos < len && bytes[pos] == b'=' {
            pos = skip_whitespace(pos + 1);
            if pos < len && matches!(bytes[pos], b'"' | b'\'') {
                let quote = bytes[pos];
                let value_start = pos + 1;
                pos = value_start;
                while pos < len && bytes[pos] != quote {
                    pos += 1;
                }
                value = tag[value_start..pos].to_string();
                pos = (pos + 1).min(len);
            } else {
                let value_start = pos;
                while pos < len && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>' {
                    pos += 1;
                }
                value = tag[value_start..pos].to_string();
            }
        }
        attributes.push((key, value));
    }
    (attributes, pos)
}
