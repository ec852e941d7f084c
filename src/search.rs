use anyhow::{Context, Result};

pub const IMAGE_SEARCH_URL: &str = "https://www.google.com/search";

/// Cleans a metadata line into search terms, or `None` if nothing is left.
pub fn search_terms(line: &str) -> Option<String> {
    let terms: String = line
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\\' | ','))
        .collect();
    let terms = terms.trim();
    if terms.is_empty() {
        None
    } else {
        Some(terms.to_string())
    }
}

pub fn image_search_url(terms: &str) -> String {
    format!("{IMAGE_SEARCH_URL}?q={}&tbm=isch", encode_query_value(terms))
}

/// Opens an image search for `line` in the default browser and returns the
/// URL that was opened.
pub fn open_image_search(line: &str) -> Result<Option<String>> {
    let Some(terms) = search_terms(line) else {
        return Ok(None);
    };
    let url = image_search_url(&terms);
    open::that(&url).with_context(|| format!("Unable to open {url}"))?;
    tracing::debug!("Opened {url}");
    Ok(Some(url))
}

// application/x-www-form-urlencoded
fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
