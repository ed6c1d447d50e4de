//! Canonical JSON emission
//!
//! Documents are pretty-printed with two-space indentation and no trailing
//! newline. `<`, `>`, `&`, U+2028 and U+2029 inside strings are written as
//! `\u` escapes so output stays byte-compatible with documents produced by
//! earlier releases of the tool.

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tfschema_extractor_common::{ExtractorError, ResourceProviderSchema, Result};

/// Pretty formatter that also escapes HTML-significant characters
pub struct HtmlSafeFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl HtmlSafeFormatter<'_> {
    pub fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Default for HtmlSafeFormatter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for HtmlSafeFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            let escape = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..index].as_bytes())?;
            writer.write_all(escape.as_bytes())?;
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serialize any value in the canonical layout
pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, HtmlSafeFormatter::new());
    value.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Serialize any value in the canonical layout, as a string
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = to_json_bytes(value)?;
    // The serializer only ever writes UTF-8.
    String::from_utf8(bytes)
        .map_err(|e| ExtractorError::Parse(format!("Serializer produced invalid UTF-8: {}", e)))
}

/// Write a document to `<output_dir>/<name>.json`
///
/// The document is serialized fully before the file is created, so a
/// serialization failure never leaves a file behind. A write that fails after
/// the file was created removes the partial file.
pub fn write_to_directory(document: &ResourceProviderSchema, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(format!("{}.json", document.name));

    fs::create_dir_all(output_dir).map_err(|source| ExtractorError::Emit {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let bytes = to_json_bytes(document)?;

    if let Err(source) = write_file(&path, &bytes) {
        return Err(ExtractorError::Emit { path, source });
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote schema document");
    Ok(path)
}

/// Create and fill `path`; only a file this call created is removed on failure
fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = File::create(path)?;
    let result = fill_file(file, bytes);
    if result.is_err() {
        let _ = fs::remove_file(path);
    }
    result
}

fn fill_file(file: File, bytes: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    writer.get_ref().sync_all()
}
