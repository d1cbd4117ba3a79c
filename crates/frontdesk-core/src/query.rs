//! Query string and form body parsing.
//!
//! Pairs are decoded with standard `application/x-www-form-urlencoded` rules
//! (`+` is a space, percent-escapes are decoded). Keys may carry bracket
//! suffixes that build nested structures:
//!
//! | Query | Result |
//! |-------|--------|
//! | `a=1&a=2` | `{"a": "2"}` (last wins) |
//! | `a[]=1&a[]=2` | `{"a": ["1", "2"]}` |
//! | `a[x]=1&a[y][]=2` | `{"a": {"x": "1", "y": ["2"]}}` |
//!
//! A key whose brackets are not closed is taken literally. A key nested deeper
//! than [`MAX_NESTING_DEPTH`] brackets is dropped.

use serde_json::{Map, Value};

/// Parsed query parameters.
pub type QueryParams = Map<String, Value>;

/// Maximum number of bracket segments accepted in one key.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parse a raw query string (without the leading `?`).
///
/// # Examples
///
/// ```
/// use frontdesk_core::query::parse_query;
///
/// let params = parse_query("userId=321&data[]=test");
/// assert_eq!(params["userId"], "321");
/// assert_eq!(params["data"], serde_json::json!(["test"]));
/// ```
#[must_use]
pub fn parse_query(raw: &str) -> QueryParams {
    let mut params = QueryParams::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        if key.is_empty() {
            continue;
        }
        let Some((base, segments)) = split_key(&key) else {
            tracing::debug!(depth = MAX_NESTING_DEPTH, "dropping over-nested parameter");
            continue;
        };
        if base.is_empty() {
            continue;
        }
        insert(&mut params, base, &segments, Value::String(value.into_owned()));
    }
    params
}

/// Split `a[b][]` into `("a", ["b", ""])`.
///
/// Parsing stops at the first segment without a closing bracket; the key is then
/// treated literally up to that point, with anything left over ignored.
/// Returns `None` when the key has more than [`MAX_NESTING_DEPTH`] segments.
fn split_key(key: &str) -> Option<(&str, Vec<&str>)> {
    let Some(open) = key.find('[') else {
        return Some((key, Vec::new()));
    };
    if !key[open..].contains(']') {
        return Some((key, Vec::new()));
    }

    let base = &key[..open];
    let mut segments = Vec::new();
    let mut rest = &key[open..];
    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            break;
        };
        if segments.len() == MAX_NESTING_DEPTH {
            return None;
        }
        segments.push(&inner[..close]);
        rest = &inner[close + 1..];
    }
    Some((base, segments))
}

/// Insert `value` at `base` followed by the bracket `segments`.
fn insert(params: &mut QueryParams, base: &str, segments: &[&str], value: Value) {
    match segments.split_first() {
        None => {
            params.insert(base.to_owned(), value);
        }
        Some((first, rest)) => {
            let slot = params
                .entry(base.to_owned())
                .or_insert_with(|| empty_container(first));
            insert_nested(slot, first, rest, value);
        }
    }
}

fn empty_container(segment: &str) -> Value {
    if segment.is_empty() {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

/// Descend into `slot` by `segment`, creating containers as needed.
///
/// A scalar already sitting where a container is needed is replaced. An array
/// addressed by a named segment is converted to an object keyed by index.
fn insert_nested(slot: &mut Value, segment: &str, rest: &[&str], value: Value) {
    if !slot.is_array() && !slot.is_object() {
        *slot = empty_container(segment);
    }
    if slot.is_array() && !segment.is_empty() {
        *slot = array_to_object(slot.take());
    }

    let target = match slot {
        Value::Array(items) => {
            items.push(Value::Null);
            let last = items.len() - 1;
            &mut items[last]
        }
        Value::Object(map) => {
            let key = if segment.is_empty() {
                next_index(map).to_string()
            } else {
                segment.to_owned()
            };
            map.entry(key).or_insert(Value::Null)
        }
        _ => return,
    };

    match rest.split_first() {
        None => *target = value,
        Some((next, remaining)) => insert_nested(target, next, remaining, value),
    }
}

/// Convert `[a, b]` into `{"0": a, "1": b}`.
fn array_to_object(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Object(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
        ),
        other => other,
    }
}

/// One past the largest integer key in `map`, or 0.
fn next_index(map: &Map<String, Value>) -> u64 {
    map.keys()
        .filter_map(|k| k.parse::<u64>().ok())
        .max()
        .map_or(0, |max| max + 1)
}
