use regex::Regex;

use crate::errors::{SitelensError, SitelensResult};

const URL_PATTERN: &str = r"^(https?)://([^/?#\s]+)([/?#]\S*)?$";

/// Escape text for HTML element content and double- or single-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Serialize a value as JSON that can sit inside an inline `<script>` block.
pub fn json_for_script<T: serde::Serialize>(value: &T) -> SitelensResult<String> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Normalize and check a scan target URL.
///
/// A missing scheme defaults to `https://`. The host must contain a dot and be
/// at least four characters long.
pub fn validate_url(raw: &str) -> SitelensResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SitelensError::invalid_url(raw, "URL cannot be empty"));
    }

    let url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let re = Regex::new(URL_PATTERN).map_err(|e| SitelensError::invalid_url(raw, e.to_string()))?;
    let caps = re
        .captures(&url)
        .ok_or_else(|| SitelensError::invalid_url(raw, "Invalid URL structure"))?;

    let host = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
    if !host.contains('.') || host.len() < 4 {
        return Err(SitelensError::invalid_url(raw, "Invalid domain format"));
    }

    Ok(url)
}

/// `page_size_kb` -> `Page Size Kb`
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

pub fn present_missing(flag: bool) -> &'static str {
    if flag {
        "Present"
    } else {
        "Missing"
    }
}
