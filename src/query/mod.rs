// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Path equality filter over records.
//!
//! A path is rooted at the record's document form, `{"name": .., "metadata": {..}}`.
//! The walker descends the borrowed record directly; nothing is serialized
//! until a resolved mapping or sequence has to be rendered for comparison.

pub mod path;

use serde_json::{Map, Number, Value};

use crate::config::{COUNT_SEGMENT, METADATA_KEY, NAME_KEY};
use crate::storage::record::Record;

pub use path::Path;

/// Position reached while walking a record.
#[derive(Clone, Copy, Debug)]
pub enum Cursor<'a> {
    Name(&'a str),
    Map(&'a Map<String, Value>),
    Value(&'a Value),
    /// Length of a sequence, reached through the `#` segment.
    Count(usize),
}

impl<'a> Cursor<'a> {
    /// Moves one segment down. `None` when the segment names nothing here.
    pub fn step(self, segment: &str) -> Option<Cursor<'a>> {
        match self {
            Cursor::Map(map) => map.get(segment).map(Cursor::Value),
            Cursor::Value(Value::Object(map)) => map.get(segment).map(Cursor::Value),
            Cursor::Value(Value::Array(items)) => {
                if segment == COUNT_SEGMENT {
                    return Some(Cursor::Count(items.len()));
                }
                let idx: usize = segment.parse().ok()?;
                items.get(idx).map(Cursor::Value)
            }
            Cursor::Value(_) | Cursor::Name(_) | Cursor::Count(_) => None,
        }
    }

    /// Textual form used for comparison.
    ///
    /// Strings are verbatim, booleans `true`/`false`, numbers in plain
    /// decimal (whole floats without a fraction), null as the empty string,
    /// mappings and sequences as compact JSON.
    pub fn render(&self) -> String {
        match self {
            Cursor::Name(name) => (*name).to_string(),
            Cursor::Count(n) => n.to_string(),
            Cursor::Value(Value::String(s)) => s.clone(),
            Cursor::Value(Value::Null) => String::new(),
            Cursor::Value(Value::Bool(b)) => b.to_string(),
            Cursor::Value(Value::Number(n)) => render_number(n),
            Cursor::Value(value) => value.to_string(),
            Cursor::Map(map) => serde_json::to_string(map).unwrap_or_default(),
        }
    }
}

/// `f64`'s `Display` never uses exponent notation and drops a zero fraction,
/// so `1.0` renders `1` and `1e21` renders all its digits.
fn render_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Resolves `path` against `record`. `None` if any segment is missing.
///
/// The first segment picks a top-level field of the record document.
pub fn resolve<'a>(record: &'a Record, path: &Path) -> Option<Cursor<'a>> {
    let mut segments = path.segments();
    let root = match segments.next()? {
        NAME_KEY => Cursor::Name(&record.name),
        METADATA_KEY => Cursor::Map(&record.metadata),
        _ => return None,
    };
    segments.try_fold(root, |cursor, segment| cursor.step(segment))
}

/// Single-field equality filter, `path == target`.
#[derive(Clone, Debug)]
pub struct Filter {
    path: Path,
    target: String,
}

impl Filter {
    pub fn new(path: &str, target: impl Into<String>) -> Self {
        Self {
            path: Path::parse(path),
            target: target.into(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        resolve(record, &self.path)
            .map(|cursor| cursor.render() == self.target)
            .unwrap_or(false)
    }

    /// Clones every matching record, preserving input order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Returns the records whose value at `path` renders equal to `target`.
pub fn query<'a, I>(records: I, path: &str, target: &str) -> Vec<Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    Filter::new(path, target).apply(records)
}
