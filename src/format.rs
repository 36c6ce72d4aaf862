// ABOUTME: Output formatting for inspect documents and top process tables.
// ABOUTME: Supports indented JSON, JSON lines, and a small `{{.Field}}` template language.

use serde_json::Value;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("template parse error: {0}")]
    Parse(String),

    #[error("template: field {path} not found")]
    MissingField { path: String },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// How a list of inspect documents is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// Indented JSON array (the default).
    Indented,
    /// One compact JSON document per line.
    JsonLines,
    /// Template source, parsed when output is written.
    Template(String),
}

impl Format {
    pub fn new(spec: &str) -> Self {
        match spec {
            "" => Format::Indented,
            "json" | "{{json .}}" => Format::JsonLines,
            template => Format::Template(template.to_string()),
        }
    }

    pub fn write(&self, entries: &[Value], w: &mut dyn Write) -> Result<(), FormatError> {
        match self {
            Format::Indented => {
                serde_json::to_writer_pretty(&mut *w, entries)?;
                writeln!(w)?;
            }
            Format::JsonLines => {
                for entry in entries {
                    serde_json::to_writer(&mut *w, entry)?;
                    writeln!(w)?;
                }
            }
            Format::Template(source) => {
                let template = Template::parse(source)?;
                for entry in entries {
                    let line = template.render(entry)?;
                    writeln!(w, "{line}")?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field { path: Vec<String>, json: bool },
}

/// A parsed output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, FormatError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Text(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| FormatError::Parse(format!("unclosed action in {source:?}")))?;
            segments.push(parse_action(after[..end].trim())?);
            rest = &after[end + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn render(&self, entry: &Value) -> Result<String, FormatError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field { path, json } => {
                    let value = lookup(entry, path)?;
                    if *json {
                        out.push_str(&serde_json::to_string(value)?);
                    } else {
                        out.push_str(&plain(value)?);
                    }
                }
            }
        }
        Ok(out)
    }
}

fn parse_action(action: &str) -> Result<Segment, FormatError> {
    let (json, expr) = match action.strip_prefix("json ") {
        Some(expr) => (true, expr.trim()),
        None => (false, action),
    };

    let Some(path) = expr.strip_prefix('.') else {
        return Err(FormatError::Parse(format!(
            "unsupported action {{{{{action}}}}}"
        )));
    };

    let path: Vec<String> = if path.is_empty() {
        Vec::new()
    } else {
        path.split('.').map(str::to_string).collect()
    };

    if path.iter().any(|p| p.is_empty()) {
        return Err(FormatError::Parse(format!("bad field path in {{{{{action}}}}}")));
    }

    Ok(Segment::Field { path, json })
}

fn lookup<'v>(entry: &'v Value, path: &[String]) -> Result<&'v Value, FormatError> {
    path.iter().try_fold(entry, |value, key| {
        value.get(key.as_str()).ok_or_else(|| FormatError::MissingField {
            path: format!(".{}", path.join(".")),
        })
    })
}

fn plain(value: &Value) -> Result<String, FormatError> {
    Ok(match value {
        Value::String(s) => s.clone(),
        Value::Null => "<nil>".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value)?,
    })
}

/// Render `top` output as space-padded columns.
pub fn write_table(
    titles: &[String],
    rows: &[Vec<String>],
    w: &mut dyn Write,
) -> io::Result<()> {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(titles.len()))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; columns];
    for row in std::iter::once(titles).chain(rows.iter().map(Vec::as_slice)) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    for row in std::iter::once(titles).chain(rows.iter().map(Vec::as_slice)) {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{:<width$}   ", cell, width = widths[i]));
            }
        }
        writeln!(w, "{}", line.trim_end())?;
    }
    Ok(())
}
