//! Display templates with a single time placeholder
//!
//! Supported placeholders: `%s`, `%S` (upper-cased), `%1$s`, `%1$S`, plus
//! the escapes `%%` and `%n`. There is exactly one argument, the formatted
//! time, so only one implicit `%s` may appear; `%1$s` may repeat.

use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Value { upper: bool },
}

/// A display template, parsed once when set
#[derive(Debug, Clone)]
pub struct DisplayTemplate {
    source: String,
    parsed: Result<Vec<Segment>, TemplateError>,
}

impl DisplayTemplate {
    /// Parse `source`. A malformed template is kept and reports its error on
    /// every [`apply`](Self::apply).
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let parsed = parse(&source);
        Self { source, parsed }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self) -> bool {
        self.parsed.is_ok()
    }

    /// Substitute `value` into the template
    pub fn apply(&self, value: &str) -> Result<String, TemplateError> {
        let segments = self.parsed.as_ref().map_err(Clone::clone)?;

        let mut out = String::with_capacity(self.source.len() + value.len());
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Value { upper: false } => out.push_str(value),
                Segment::Value { upper: true } => out.push_str(&value.to_uppercase()),
            }
        }
        Ok(out)
    }
}

fn parse(source: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut implicit_used = false;
    let mut chars = source.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }

        let mut index = String::new();
        while let Some(&(_, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            index.push(d);
            chars.next();
        }

        if !index.is_empty() {
            match chars.next() {
                Some((_, '$')) => {}
                Some(_) | None => {
                    // Width and precision are not supported
                    let conversion = index.chars().next().unwrap_or('%');
                    return Err(TemplateError::UnknownConversion { conversion, position });
                }
            }
        }

        let Some((_, conversion)) = chars.next() else {
            return Err(TemplateError::DanglingPercent);
        };

        match conversion {
            '%' if index.is_empty() => literal.push('%'),
            'n' if index.is_empty() => literal.push('\n'),
            's' | 'S' => {
                if index.is_empty() {
                    if implicit_used {
                        return Err(TemplateError::MissingArgument { position });
                    }
                    implicit_used = true;
                } else if index.trim_start_matches('0') != "1" {
                    return Err(TemplateError::ArgumentIndex { index, position });
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Value { upper: conversion == 'S' });
            }
            other => return Err(TemplateError::UnknownConversion { conversion: other, position }),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_single_placeholder() {
        let template = DisplayTemplate::new("Time left: %s");
        assert!(template.is_valid());
        assert_eq!(template.apply("00:05").unwrap(), "Time left: 00:05");
    }

    #[test]
    fn supports_escapes_and_explicit_index() {
        let template = DisplayTemplate::new("%1$s (100%%)%n[%1$s]");
        assert_eq!(template.apply("01:00").unwrap(), "01:00 (100%)\n[01:00]");

        let template = DisplayTemplate::new("T-%S");
        assert_eq!(template.apply("ab").unwrap(), "T-AB");
    }

    #[test]
    fn template_without_placeholder_renders_as_is() {
        let template = DisplayTemplate::new("Hurry!");
        assert_eq!(template.apply("00:01").unwrap(), "Hurry!");
    }

    #[test]
    fn rejects_malformed_templates() {
        assert_eq!(
            DisplayTemplate::new("Time left: %").apply("x"),
            Err(TemplateError::DanglingPercent)
        );
        assert_eq!(
            DisplayTemplate::new("Time left: %d").apply("x"),
            Err(TemplateError::UnknownConversion { conversion: 'd', position: 11 })
        );
        assert_eq!(
            DisplayTemplate::new("%2$s").apply("x"),
            Err(TemplateError::ArgumentIndex { index: "2".to_string(), position: 0 })
        );
        assert_eq!(
            DisplayTemplate::new("%s and %s").apply("x"),
            Err(TemplateError::MissingArgument { position: 7 })
        );
        assert!(!DisplayTemplate::new("%5s").is_valid());
    }
}
