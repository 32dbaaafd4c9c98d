//! Split one input line into ordered field values.

/// Splits `line` into fields.
///
/// With an empty `separators` set, splits on runs of whitespace. Otherwise
/// splits on any character that is whitespace or a member of `separators`,
/// so `" A , B "` with separators `","` yields `["A", "B"]`. Consecutive,
/// leading and trailing separators never produce empty fields.
pub fn split_row(line: &str, separators: &str) -> Vec<String> {
    if separators.is_empty() {
        return line.split_whitespace().map(str::to_string).collect();
    }

    line.split(|c: char| c.is_whitespace() || separators.contains(c))
        .filter(|field| !field.is_empty())
        .map(str::to_string)
        .collect()
}
