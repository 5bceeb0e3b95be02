/*!

Plain-text rendering of a [`ServiceReport`].

Each nesting level is indented by two more spaces, and every object's
own block ends with a blank line before its children or next sibling.

*/

use std::fmt;
use std::io::{self, Write};

use chrono::{Local, TimeZone};

use crate::report::{CollectionReport, ItemReport, SecretReport, ServiceReport};
use crate::store::SecretValue;

#[derive(Clone, Copy)]
struct Indent(usize);

impl Indent {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}", "", width = self.0 * 2)
    }
}

pub fn write_report<W: Write>(out: &mut W, report: &ServiceReport) -> io::Result<()> {
    let fields = Indent(1);
    writeln!(out, "Service")?;
    writeln!(out, "{fields}Path: {}", report.path)?;
    if !report.aliases.is_empty() {
        writeln!(out, "{fields}Aliases:")?;
        for (alias, path) in report.aliases.iter() {
            writeln!(out, "{}{alias}: {path}", fields.next())?;
        }
    }
    if let Some(Err(e)) = &report.collections {
        writeln!(out, "{fields}Error: {e}")?;
    }
    writeln!(out)?;

    if let Some(Ok(collections)) = &report.collections {
        for collection in collections {
            write_collection(out, collection, fields)?;
        }
    }
    Ok(())
}

fn write_collection<W: Write>(
    out: &mut W,
    collection: &CollectionReport,
    indent: Indent,
) -> io::Result<()> {
    let fields = indent.next();
    write_header(out, "Collection", &collection.label, indent)?;
    writeln!(out, "{fields}Path: {}", collection.path)?;
    for alias in &collection.aliases {
        writeln!(out, "{fields}Alias: {alias}")?;
    }
    write_timestamps(out, collection.created, collection.modified, fields)?;
    if let Some(e) = &collection.unlock_error {
        writeln!(out, "{fields}Error: {e}")?;
    }
    match &collection.locked {
        Ok(locked) => writeln!(out, "{fields}Locked: {locked}")?,
        Err(e) => writeln!(out, "{fields}Error: {e}")?,
    }
    if let Some(Err(e)) = &collection.items {
        writeln!(out, "{fields}Error: {e}")?;
    }
    writeln!(out)?;

    if let Some(Ok(items)) = &collection.items {
        for item in items {
            write_item(out, item, fields)?;
        }
    }
    Ok(())
}

fn write_item<W: Write>(out: &mut W, item: &ItemReport, indent: Indent) -> io::Result<()> {
    let fields = indent.next();
    write_header(out, "Item", &item.label, indent)?;
    writeln!(out, "{fields}Path: {}", item.path)?;
    write_timestamps(out, item.created, item.modified, fields)?;

    match &item.attributes {
        Some(Ok(attributes)) if !attributes.is_empty() => {
            writeln!(out, "{fields}Attributes:")?;
            for (key, value) in attributes {
                writeln!(out, "{}\"{key}\" = \"{value}\"", fields.next())?;
            }
        }
        Some(Err(e)) => writeln!(out, "{fields}Error: {e}")?,
        _ => {}
    }

    if let Some(e) = &item.unlock_error {
        writeln!(out, "{fields}Error: {e}")?;
        return writeln!(out);
    }
    match &item.locked {
        Some(Ok(locked)) => writeln!(out, "{fields}Locked: {locked}")?,
        Some(Err(e)) => writeln!(out, "{fields}Error: {e}")?,
        None => {}
    }

    match &item.secret {
        Some(Ok(SecretReport::Value(value))) => write_secret(out, value, fields)?,
        Some(Ok(SecretReport::Missing)) => writeln!(out, "{fields}Error: secret is null")?,
        Some(Err(e)) => writeln!(out, "{fields}Error: {e}")?,
        None => {}
    }
    writeln!(out)
}

fn write_secret<W: Write>(out: &mut W, value: &SecretValue, indent: Indent) -> io::Result<()> {
    let fields = indent.next();
    writeln!(out, "{indent}Secret:")?;
    writeln!(out, "{fields}Type: {}", value.content_type)?;
    match value.text() {
        Some(text) => writeln!(out, "{fields}Value: \"{text}\""),
        None => writeln!(out, "{fields}Value: {{ {} }} (hex)", hex(&value.payload)),
    }
}

fn write_header<W: Write>(
    out: &mut W,
    kind: &str,
    label: &crate::errors::Result<String>,
    indent: Indent,
) -> io::Result<()> {
    match label {
        Ok(label) => writeln!(out, "{indent}{kind}: \"{label}\""),
        Err(e) => {
            writeln!(out, "{indent}{kind}:")?;
            writeln!(out, "{}Error: {e}", indent.next())
        }
    }
}

fn write_timestamps<W: Write>(
    out: &mut W,
    created: Option<u64>,
    modified: Option<u64>,
    indent: Indent,
) -> io::Result<()> {
    if let Some(created) = created {
        writeln!(out, "{indent}Created: {}", format_timestamp(created))?;
    }
    if let Some(modified) = modified {
        writeln!(out, "{indent}Modified: {}", format_timestamp(modified))?;
    }
    Ok(())
}

/// Seconds since the epoch as local `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|s| Local.timestamp_opt(s, 0).single())
        .map(|t| t.format("%F %T").to_string())
        .unwrap_or_else(|| seconds.to_string())
}

/// Two lowercase hex digits per byte, no separators.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
