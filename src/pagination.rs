//! Cursor pagination for list methods
//!
//! Cursors are opaque to clients but are just the stringified offset of the next
//! page. Because the registry never changes after startup, an offset always points
//! at the same item.

use serde_json::Value;

/// One page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// Decode a client supplied cursor into an offset.
///
/// Absent, non-numeric or negative cursors all mean "start from the beginning".
pub fn decode_cursor(cursor: Option<&Value>) -> usize {
    match cursor {
        Some(Value::String(s)) => s.trim().parse::<usize>().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().map(|n| n as usize).unwrap_or(0),
        _ => 0,
    }
}

pub fn encode_cursor(offset: usize) -> String {
    offset.to_string()
}

/// Slice `[offset, offset + page_size)` out of `items`.
///
/// `next_cursor` is set only while more items remain after this page.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, cursor: Option<&Value>) -> Page<T> {
    let start = decode_cursor(cursor).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        next_cursor: (end < items.len()).then(|| encode_cursor(end)),
    }
}
