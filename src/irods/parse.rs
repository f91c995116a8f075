//! Parsing of the human readable output of `ils` and `imeta ls`.
//!
//! The icommands have no machine readable output mode, so these helpers
//! match line prefixes rather than fixed line or token positions.

/// Collection paths listed by `ils <collection>`.
///
/// `ils` prints the listed collection on the first line, then one line per
/// child. Sub-collections look like `  C- /zone/child`; data objects are
/// bare names and are skipped.
pub fn collections_from_ils(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.trim_start().strip_prefix("C- "))
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
        .collect()
}

/// The uuid of a dataset collection: the third `/`-delimited segment.
///
/// `/jic_archive/abc123` splits into `""`, `"jic_archive"`, `"abc123"`.
pub fn uuid_from_collection_path(path: &str) -> Option<&str> {
    path.split('/').nth(2).filter(|segment| !segment.is_empty())
}

/// The value from `imeta ls -C <collection> <attribute>` output.
///
/// ```text
/// AVUs defined for collection /jic_archive/abc123:
/// attribute: name
/// value: my-data
/// units:
/// ```
///
/// Returns `None` when no AVU is defined.
pub fn avu_value(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.trim_start().strip_prefix("value:"))
        .map(|value| value.trim().to_string())
}
