//! Path expressions.

use crate::config::{PATH_ESCAPE, PATH_SEPARATOR};

/// A parsed dot-separated path such as `metadata.limits.cpu.value`.
///
/// Parsing never fails; a path that names nothing simply resolves to nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    pub fn parse(expr: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut chars = expr.chars();

        while let Some(c) = chars.next() {
            match c {
                PATH_ESCAPE => match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => current.push(PATH_ESCAPE),
                },
                PATH_SEPARATOR => segments.push(std::mem::take(&mut current)),
                _ => current.push(c),
            }
        }
        segments.push(current);

        Self { segments }
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Number of segments. Always at least one.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl From<&str> for Path {
    fn from(expr: &str) -> Self {
        Path::parse(expr)
    }
}
