//! URL pattern compiler: `{{<index>}}` placeholders over row fields.
//!
//! A pattern is compiled once per run into an immutable segment list and
//! rendered once per line. Rendering performs no escaping; fields are
//! inserted verbatim.

use thiserror::Error;

/// Compile-time failure of a URL pattern. The offending placeholder text is
/// echoed verbatim so the user can spot it in a long pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// `{{` without a closing `}}` before end of input.
    #[error("placeholder '{placeholder}' isn't terminated")]
    Unterminated { placeholder: String },
    /// Placeholder body is not a non-negative integer (empty, non-numeric,
    /// or containing a nested `{{`).
    #[error("placeholder '{placeholder}' isn't recognized")]
    Unrecognized { placeholder: String },
}

/// Per-line rendering failure: the row has fewer fields than the template
/// references.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("data missing for placeholder {{{{{index}}}}}")]
    MissingField { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(usize),
}

/// A compiled URL pattern: literal text interleaved with zero-based field
/// references.
#[derive(Debug, Clone)]
pub struct UrlTemplate {
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Compiles `pattern` in a single left-to-right scan.
    ///
    /// Only the exact two-character marker `{{` opens a placeholder; a lone
    /// `{` stays literal text. An empty pattern renders to the empty string.
    pub fn parse(pattern: &str) -> Result<UrlTemplate, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = pattern;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let marker = &rest[start..];
            let end = marker.find("}}").ok_or_else(|| TemplateError::Unterminated {
                placeholder: marker.to_string(),
            })?;
            let body = &marker[2..end];
            let index = body
                .trim()
                .parse::<usize>()
                .map_err(|_| TemplateError::Unrecognized {
                    placeholder: format!("{{{{{}}}}}", body),
                })?;
            segments.push(Segment::Field(index));
            rest = &marker[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(UrlTemplate { segments })
    }

    /// Renders the template against `row`, concatenating literal segments
    /// verbatim and resolving field references by index. Extra unused fields
    /// are never an error.
    pub fn render(&self, row: &[String]) -> Result<String, RenderError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(index) => match row.get(*index) {
                    Some(value) => out.push_str(value),
                    None => return Err(RenderError::MissingField { index: *index }),
                },
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn renders_interleaved_placeholders() {
        let template = UrlTemplate::parse("blah{{0}}fooe{{1}}zooe").unwrap();
        assert_eq!(template.render(&row(&["0", "1"])).unwrap(), "blah0fooe1zooe");
        assert_eq!(
            template.render(&row(&["0 1", "1 2"])).unwrap(),
            "blah0 1fooe1 2zooe"
        );
    }

    #[test]
    fn missing_field_names_the_placeholder() {
        let template = UrlTemplate::parse("blah{{0}}fooe{{1}}zooe").unwrap();
        let err = template.render(&row(&["0"])).unwrap_err();
        assert_eq!(err, RenderError::MissingField { index: 1 });
        assert_eq!(err.to_string(), "data missing for placeholder {{1}}");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let template = UrlTemplate::parse("blah{{0}}fooe{{1}}zooe").unwrap();
        assert_eq!(
            template.render(&row(&["0", "1", "2"])).unwrap(),
            "blah0fooe1zooe"
        );
    }

    #[test]
    fn single_braces_stay_literal() {
        let template = UrlTemplate::parse("blah{0}").unwrap();
        assert_eq!(template.render(&row(&["a", "b"])).unwrap(), "blah{0}");
        assert_eq!(template.render(&[]).unwrap(), "blah{0}");

        let template = UrlTemplate::parse("blah { {0}}").unwrap();
        assert_eq!(template.render(&row(&["a", "b"])).unwrap(), "blah { {0}}");
    }

    #[test]
    fn placeholder_body_is_trimmed() {
        let template = UrlTemplate::parse("blah{{ 0 }}fooe").unwrap();
        assert_eq!(template.render(&row(&["a", "b"])).unwrap(), "blahafooe");
    }

    #[test]
    fn empty_pattern_renders_empty() {
        let template = UrlTemplate::parse("").unwrap();
        assert_eq!(template.render(&[]).unwrap(), "");
    }

    #[test]
    fn unterminated_placeholder_echoes_remainder() {
        let err = UrlTemplate::parse("blah{{0").unwrap_err();
        assert_eq!(err.to_string(), "placeholder '{{0' isn't terminated");

        let err = UrlTemplate::parse("blah{{0}").unwrap_err();
        assert_eq!(err.to_string(), "placeholder '{{0}' isn't terminated");
    }

    #[test]
    fn unrecognized_placeholder_echoes_full_text() {
        let err = UrlTemplate::parse("blah{{fooe}}").unwrap_err();
        assert_eq!(err.to_string(), "placeholder '{{fooe}}' isn't recognized");

        let err = UrlTemplate::parse("{{}}").unwrap_err();
        assert_eq!(err.to_string(), "placeholder '{{}}' isn't recognized");

        let err = UrlTemplate::parse("{{a {{ }}").unwrap_err();
        assert_eq!(err.to_string(), "placeholder '{{a {{ }}' isn't recognized");
    }
}
