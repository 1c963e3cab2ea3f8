//! Attribute access on raw start-tag content (`name a="1" b='2'`).
//!
//! Working on the raw text instead of rebuilding the tag keeps quoting,
//! spacing and attribute order of a rewritten tag exactly as they were.

use std::ops::Range;

/// Byte range of the (still escaped) value of attribute `name`.
pub(crate) fn value_range(content: &str, name: &str) -> Option<Range<usize>> {
    let bytes = content.as_bytes();
    let len = bytes.len();
    let skip_ws = |mut i: usize| {
        while i < len && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    // tag name
    let mut i = 0;
    while i < len && !bytes[i].is_ascii_whitespace() {
        i += 1;
    }

    loop {
        i = skip_ws(i);
        if i >= len {
            return None;
        }

        let key_start = i;
        while i < len && !bytes[i].is_ascii_whitespace() && bytes[i] != b'=' {
            i += 1;
        }
        let key = &content[key_start..i];

        i = skip_ws(i);
        if i >= len || bytes[i] != b'=' {
            // valueless attribute
            continue;
        }
        i = skip_ws(i + 1);
        if i >= len {
            return None;
        }

        let value = match bytes[i] {
            quote @ (b'"' | b'\'') => {
                let start = i + 1;
                let end = bytes[start..]
                    .iter()
                    .position(|&b| b == quote)
                    .map_or(len, |p| start + p);
                i = (end + 1).min(len);
                start..end
            }
            _ => {
                let start = i;
                while i < len && !bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                start..i
            }
        };

        if key == name {
            return Some(value);
        }
    }
}

/// Raw (escaped) value of attribute `name`.
pub(crate) fn raw_value<'a>(content: &'a str, name: &str) -> Option<&'a str> {
    value_range(content, name).map(|range| &content[range])
}

/// Copy of `content` with the value of `name` replaced by `escaped`.
///
/// Returns `None` when the attribute is absent.
pub(crate) fn replace_value(content: &str, name: &str, escaped: &str) -> Option<String> {
    let range = value_range(content, name)?;
    let mut out = String::with_capacity(content.len() + escaped.len());
    out.push_str(&content[..range.start]);
    out.push_str(escaped);
    out.push_str(&content[range.end..]);
    Some(out)
}
