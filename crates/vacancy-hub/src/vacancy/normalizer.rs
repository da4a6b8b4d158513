const HIGHLIGHT_TAGS: [&str; 2] = ["<highlighttext>", "</highlighttext>"];

/// Strips search-highlight markup and collapses runs of whitespace in
/// snippet text returned by the search API.
pub(crate) fn normalize_snippet(value: &str) -> String {
    let mut cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    for tag in HIGHLIGHT_TAGS {
        cleaned = cleaned.replace(tag, "");
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
