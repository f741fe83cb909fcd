use crate::mirror::domain::SyncState;
use crate::shared::Result;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;
use std::io::{self, Write};

/// Compact JSON with `, ` / `: ` separators and `\uXXXX` escapes for
/// everything outside ASCII.
///
/// This is the byte format of the existing mirror history. Re-encoding an
/// unchanged record must reproduce the file exactly so it shows no diff.
#[derive(Debug, Default, Clone, Copy)]
pub struct MirrorJsonFormatter;

impl Formatter for MirrorJsonFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        write_ascii_escaped(writer, fragment)
    }
}

/// Writes `fragment`, escaping non-ASCII characters as UTF-16 `\uXXXX` units
fn write_ascii_escaped<W>(writer: &mut W, fragment: &str) -> io::Result<()>
where
    W: ?Sized + io::Write,
{
    let mut plain_start = 0;
    for (index, ch) in fragment.char_indices() {
        if ch.is_ascii() {
            continue;
        }
        writer.write_all(fragment[plain_start..index].as_bytes())?;
        let mut units = [0u16; 2];
        for unit in ch.encode_utf16(&mut units) {
            write!(writer, "\\u{:04x}", unit)?;
        }
        plain_start = index + ch.len_utf8();
    }
    writer.write_all(fragment[plain_start..].as_bytes())
}

/// Encodes a record document in the mirror's on-disk format
pub fn encode_record(document: &Value) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, MirrorJsonFormatter);
    document.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Encodes `syncdate.json` with four-space indentation
pub fn encode_sync_state(state: &SyncState) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    state.serialize(&mut serializer)?;
    Ok(buffer)
}
