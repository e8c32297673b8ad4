// SPDX-FileCopyrightText: 2026 Memosync Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment extraction errors and semantic validation failures both end up as
//! [`ConfigError`]s. Misspelled sections and keys are underlined in the file
//! they came from, with the closest valid name offered as a fix.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Sections a memosync.toml may contain.
pub const SECTIONS: &[&str] = &["api", "cache", "editor", "logging"];

const SUGGESTION_THRESHOLD: f64 = 0.75;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A `[section]` that memosync does not read.
    #[error("unknown configuration section `[{section}]`")]
    #[diagnostic(
        code(memosync::config::unknown_section),
        help("{}", unknown_help(suggestion.as_deref(), &SECTIONS.join("], ["), "[", "]"))
    )]
    UnknownSection {
        section: String,
        suggestion: Option<String>,
        #[label("memosync has no such section")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key inside a known section that memosync does not read.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(memosync::config::unknown_key),
        help("{}", unknown_help(suggestion.as_deref(), valid_keys, "", ""))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(memosync::config::invalid_type), help("`{key}` expects {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
    },

    /// A value that parsed but cannot be used, such as a zero timeout.
    #[error("invalid value for `{key}`: {message}")]
    #[diagnostic(code(memosync::config::invalid_value), help("{}", value_help(key)))]
    InvalidValue { key: String, message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(memosync::config::other))]
    Other(String),
}

impl ConfigError {
    pub fn invalid_value(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

fn unknown_help(suggestion: Option<&str>, valid: &str, open: &str, close: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{open}{s}{close}`? Valid: {open}{valid}{close}"),
        None => format!("valid: {open}{valid}{close}"),
    }
}

fn value_help(key: &str) -> String {
    match key.split_once('.') {
        Some((section, field)) => format!("fix `{field}` under [{section}] in memosync.toml"),
        None => format!("fix `{key}` in memosync.toml"),
    }
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
///
/// `toml_sources` pairs a file path with its content so unknown names can be
/// underlined in place.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, _) if error.path.is_empty() => {
                let (span, src) = locate(&error, toml_sources, |content| {
                    find_section_offset(content, field)
                });
                ConfigError::UnknownSection {
                    section: field.clone(),
                    suggestion: suggest_key(field, SECTIONS),
                    span: span.map(|offset| SourceSpan::new((offset + 1).into(), field.len())),
                    src,
                }
            }
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate(&error, toml_sources, |content| {
                    find_key_offset(content, &error.path, field)
                });
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span: span.map(|offset| SourceSpan::new(offset.into(), field.len())),
                    src,
                }
            }
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                found: actual.to_string(),
                expected: expected.to_string(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Resolve the file an error came from and run `find` over its content.
fn locate(
    error: &figment::error::Error,
    toml_sources: &[(String, String)],
    find: impl Fn(&str) -> Option<usize>,
) -> (Option<usize>, Option<NamedSource<String>>) {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|source| match source {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings carry no file metadata; fall back to the only source.
    let file = match origin {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    file.and_then(|(path, content)| {
        find(content).map(|offset| (Some(offset), Some(NamedSource::new(path, content.clone()))))
    })
    .unwrap_or((None, None))
}

/// Byte offset of the `[section]` header line.
pub fn find_section_offset(content: &str, section: &str) -> Option<usize> {
    let header = format!("[{section}]");
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        if line.trim_start().starts_with(&header) {
            return Some(offset + indent);
        }
        offset += line.len();
    }
    None
}

/// Byte offset of `field` inside the `[section]` named by `path[0]`.
///
/// Top-level fields are searched from the start of the document.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        Some(section) => {
            let header = find_section_offset(content, section)?;
            header + content[header..].find('\n').map_or(content.len() - header, |n| n + 1)
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            return None;
        }
        if let Some(after) = trimmed.strip_prefix(field)
            && after.trim_start().starts_with('=')
        {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

/// Closest valid name by Jaro-Winkler similarity, if close enough.
pub fn suggest_key(unknown: &str, valid: &[&str]) -> Option<String> {
    valid
        .iter()
        .map(|&name| (name, strsim::jaro_winkler(unknown, name)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name.to_string())
}

/// Render one diagnostic with miette's graphical handler.
pub fn render_to_string(error: &ConfigError) -> String {
    let mut buf = String::new();
    match miette::GraphicalReportHandler::new().render_report(&mut buf, error) {
        Ok(()) => buf,
        Err(_) => format!("Error: {error}\n"),
    }
}

/// Render every diagnostic to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    for error in errors {
        eprint!("{}", render_to_string(error));
    }
}
