//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with a record-by-record
//! human view of transformed results.

use crate::cli::OutputFormat;
use crate::error::Result;
use apishape_core::{Record, Scalar, Value};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for result trees
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a transformed result tree
    fn format_result(&self, value: &Value, use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_result(&self, value: &Value, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_result_human(value, use_color)),
            _ => self.format(value),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(format, use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Switch plain JSON output to pretty-printed JSON
    pub fn prefer_pretty(&mut self) {
        if self.format == OutputFormat::Json {
            self.format = OutputFormat::JsonPretty;
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write a transformed result in the configured format
    pub fn result(&mut self, value: &Value) -> Result<()> {
        if self.verbose > 1 {
            trace!(kind = value.kind(), "Outputting result");
        }
        let formatted = self.format.format_result(value, self.use_color)?;
        self.emit(formatted)
    }

    fn emit(&mut self, formatted: String) -> Result<()> {
        // YAML already ends with a newline
        if formatted.ends_with('\n') {
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }
}

/// Render a result tree one record at a time
fn format_result_human(value: &Value, use_color: bool) -> String {
    match value {
        Value::Sequence(items) => {
            let mut output = header(&format!("{} records", items.len()), use_color);
            for (index, item) in items.iter().enumerate() {
                output.push('\n');
                output.push_str(&header(&format!("[{}]", index), use_color));
                output.push_str(&format_entry(item, 1, use_color));
            }
            output
        }
        other => format_entry(other, 0, use_color),
    }
}

fn header(title: &str, use_color: bool) -> String {
    if use_color {
        format!("{}\n", title.bold())
    } else {
        format!("{}\n", title)
    }
}

fn format_entry(value: &Value, depth: usize, use_color: bool) -> String {
    match value {
        Value::Record(record) => format_record(record, depth, use_color),
        other => format!("{}{}\n", indent(depth), format_value_compact(other)),
    }
}

fn format_record(record: &Record, depth: usize, use_color: bool) -> String {
    let width = record.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let mut output = String::new();

    let paint = |label: String| {
        if use_color {
            label.cyan().to_string()
        } else {
            label
        }
    };

    for (key, value) in record {
        match value {
            Value::Record(nested) if !nested.is_empty() => {
                output.push_str(&format!("{}{}:\n", indent(depth), paint(key.clone())));
                output.push_str(&format_record(nested, depth + 1, use_color));
            }
            other => {
                let label = paint(format!("{:width$}", key, width = width));
                output.push_str(&format!(
                    "{}{}  {}\n",
                    indent(depth),
                    label,
                    format_value_compact(other)
                ));
            }
        }
    }

    output
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

/// Format a value in a compact, human-readable way
fn format_value_compact(value: &Value) -> String {
    match value {
        Value::Scalar(Scalar::String(s)) => format!("\"{}\"", s),
        Value::Scalar(scalar) => Value::Scalar(scalar.clone()).to_string(),
        Value::Sequence(items) => {
            if items.len() <= 3 {
                format!(
                    "[{}]",
                    items
                        .iter()
                        .map(format_value_compact)
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            } else {
                format!("[{} items]", items.len())
            }
        }
        Value::Record(record) => {
            if record.len() <= 2 {
                let items: Vec<String> = record
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, format_value_compact(v)))
                    .collect();
                format!("{{{}}}", items.join(", "))
            } else {
                format!("{{{} fields}}", record.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    include!("output/tests.rs");
}
