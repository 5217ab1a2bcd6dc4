// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Separator between segments of a path expression.
pub const PATH_SEPARATOR: char = '.';

/// Escape character allowing a literal separator inside a key.
pub const PATH_ESCAPE: char = '\\';

/// Segment that resolves to the length of a sequence.
pub const COUNT_SEGMENT: &str = "#";

/// Top-level key of a record document holding its name.
pub const NAME_KEY: &str = "name";

/// Top-level key of a record document holding its metadata.
pub const METADATA_KEY: &str = "metadata";
