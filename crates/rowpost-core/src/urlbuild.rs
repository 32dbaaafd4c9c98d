//! Per-line URL construction: templated, query-append or path-append.
//!
//! The mode is chosen once per run from the static pattern, never per line.
//! Escaping character sets match Go's `net/url`: `a#b+c` becomes `a%23b+c`
//! as a path segment and `a%23b%2Bc` as a query value.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::row::split_row;
use crate::template::{RenderError, TemplateError, UrlTemplate};

/// Query-value escaping: keep unreserved `-_.~`, escape the rest. Space is
/// handled separately (literal here, replaced with `+` after encoding).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b' ');

/// Path-segment escaping: additionally keep `$&+:=@`, escape `/;,?`,
/// space becomes `%20`.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Escapes `value` for use as a query-string value.
pub fn query_escape(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE)
        .to_string()
        .replace(' ', "+")
}

/// Escapes `value` for use as a single path segment.
pub fn path_segment_escape(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Line-to-URL builder, selected once per run by inspecting the pattern.
#[derive(Debug, Clone)]
pub enum UrlBuilder {
    /// Pattern contains `{{`: split each line into fields and render.
    Templated {
        template: UrlTemplate,
        separators: String,
    },
    /// No placeholders, pattern contains `?`: append the query-escaped line.
    QueryAppend { base: String },
    /// No placeholders, no `?`: append the path-escaped line.
    PathAppend { base: String },
}

impl UrlBuilder {
    /// Picks the builder mode for `pattern`. Compiling the template is the
    /// only fallible part; append patterns never fail.
    pub fn from_pattern(pattern: &str, separators: &str) -> Result<UrlBuilder, TemplateError> {
        if pattern.contains("{{") {
            return Ok(UrlBuilder::Templated {
                template: UrlTemplate::parse(pattern)?,
                separators: separators.to_string(),
            });
        }
        if pattern.contains('?') {
            return Ok(UrlBuilder::QueryAppend {
                base: pattern.to_string(),
            });
        }
        Ok(UrlBuilder::PathAppend {
            base: pattern.to_string(),
        })
    }

    /// Builds the request URL for one (already trimmed) input line.
    pub fn build(&self, line: &str) -> Result<String, RenderError> {
        match self {
            UrlBuilder::Templated {
                template,
                separators,
            } => template.render(&split_row(line, separators)),
            UrlBuilder::QueryAppend { base } => Ok(format!("{}{}", base, query_escape(line))),
            UrlBuilder::PathAppend { base } => {
                Ok(format!("{}{}", base, path_segment_escape(line)))
            }
        }
    }
}
