//! Text export of cycle-free output.
//!
//! The host-side collaborator: writes pretty JSON to any writer or to a file. Values are made
//! cycle-free before anything is written; flat maps and trees are already safe.

use crate::config::WalkConfig;
use crate::cycle::make_cycle_free;
use crate::error::Result;
use crate::value::Value;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Default indentation of exported text.
pub const DEFAULT_INDENT: usize = 2;

/// Writes `data` as pretty JSON indented by `indent` spaces.
pub fn write_text<T: Serialize + ?Sized, W: Write>(data: &T, indent: usize, writer: W) -> Result<()> {
    let pad = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&pad);
    let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
    data.serialize(&mut ser)?;
    Ok(())
}

/// Renders `data` as a pretty JSON string.
pub fn render_text<T: Serialize + ?Sized>(data: &T, indent: usize) -> Result<String> {
    let mut buf = Vec::new();
    write_text(data, indent, &mut buf)?;
    String::from_utf8(buf).map_err(|e| crate::NestError::Internal(e.to_string()))
}

/// Makes `value` cycle-free and writes it as pretty JSON.
pub fn export_as_text<W: Write>(
    value: &Value,
    indent: usize,
    config: WalkConfig,
    mut writer: W,
) -> Result<()> {
    let tree = make_cycle_free(value, config)?;
    write_text(&tree, indent, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Makes `value` cycle-free and writes it to `path`, truncating the file.
pub fn export_to_file<P: AsRef<Path>>(
    path: P,
    value: &Value,
    indent: usize,
    config: WalkConfig,
) -> Result<()> {
    let path = path.as_ref();
    let writer = BufWriter::new(File::create(path)?);
    export_as_text(value, indent, config, writer)?;
    tracing::debug!(path = %path.display(), "exported cycle-free text");
    Ok(())
}
