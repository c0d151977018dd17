//! Binary and text serialization of coverage collections.
//!
//! ## Binary format
//!
//! Authoritative and lossless, tagged offsets included. All fields are
//! 8-byte little-endian unsigned integers:
//!
//! ```text
//! u64                      module count
//! per module:
//!   u64                    name byte length
//!   [u8; name length]      raw name bytes (UTF-8, no terminator)
//!   u64                    offset count
//!   [u64; offset count]    offsets, ascending
//! ```
//!
//! There is no magic number or version field; callers track format
//! versioning externally. The reader is bounds-checked throughout: any
//! truncated or over-declared length yields [`CubrirError::Corrupt`].
//!
//! ## Text format
//!
//! Lossy, for human inspection only: one `module+hexoffset` line per
//! covered offset, skipping special-tagged records. Not read back.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

use super::{Coverage, Offset};
use crate::result::{CubrirError, CubrirResult};

/// Serialize `coverage` to `writer` in the binary format.
///
/// Offsets are emitted in ascending numeric order, so equal collections
/// produce byte-identical output.
pub fn write_binary<W: Write>(coverage: &Coverage, writer: &mut W) -> CubrirResult<()> {
    write_u64(writer, coverage.module_count() as u64)?;
    for module in coverage.modules() {
        let name = module.name().as_bytes();
        write_u64(writer, name.len() as u64)?;
        writer.write_all(name)?;
        write_u64(writer, module.len() as u64)?;
        for offset in module.offsets() {
            write_u64(writer, offset.as_u64())?;
        }
    }
    debug!(
        modules = coverage.module_count(),
        offsets = coverage.offset_count(),
        "wrote binary coverage"
    );
    Ok(())
}

/// Deserialize a collection from `reader` in the binary format.
///
/// Fails with [`CubrirError::Corrupt`] if the input ends before the
/// declared lengths are satisfied or a module name is not valid UTF-8.
pub fn read_binary<R: Read>(reader: &mut R) -> CubrirResult<Coverage> {
    let mut coverage = Coverage::new();
    let module_count = read_u64(reader)?;
    for _ in 0..module_count {
        let name_len = read_u64(reader)?;
        let name_bytes = read_bytes(reader, name_len)?;
        let name = String::from_utf8(name_bytes).map_err(|_| CubrirError::Corrupt {
            message: "module name is not valid UTF-8".into(),
        })?;
        let offset_count = read_u64(reader)?;
        let mut offsets = BTreeSet::new();
        for _ in 0..offset_count {
            let _ = offsets.insert(Offset::new(read_u64(reader)?));
        }
        trace!(module = %name, offsets = offsets.len(), "read module record");
        coverage.upsert(&name, offsets);
    }
    Ok(coverage)
}

/// Write `coverage` to the file at `path` in the binary format.
pub fn save_binary(coverage: &Coverage, path: &Path) -> CubrirResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_binary(coverage, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Load a collection from the binary file at `path`.
pub fn load_binary(path: &Path) -> CubrirResult<Coverage> {
    let mut reader = BufReader::new(File::open(path)?);
    read_binary(&mut reader)
}

/// Write `coverage` to `writer` in the text format.
///
/// Special-tagged offsets are skipped; they have no meaningful
/// human-readable form.
pub fn write_text<W: Write>(coverage: &Coverage, writer: &mut W) -> CubrirResult<()> {
    for module in coverage.modules() {
        for offset in module.offsets() {
            if offset.is_special() {
                continue;
            }
            writeln!(writer, "{}+{:x}", module.name(), offset)?;
        }
    }
    Ok(())
}

/// Write `coverage` to the file at `path` in the text format.
pub fn save_text(coverage: &Coverage, path: &Path) -> CubrirResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_text(coverage, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_u64<W: Write>(writer: &mut W, value: u64) -> CubrirResult<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn read_u64<R: Read>(reader: &mut R) -> CubrirResult<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            CubrirError::Corrupt {
                message: "input ended inside a length or offset field".into(),
            }
        } else {
            CubrirError::Io(e)
        }
    })?;
    Ok(u64::from_le_bytes(buf))
}

/// Read exactly `len` bytes. Reads through `Take` so a corrupt multi-gigabyte
/// length fails once the stream runs dry instead of allocating up front.
fn read_bytes<R: Read>(reader: &mut R, len: u64) -> CubrirResult<Vec<u8>> {
    let mut buf = Vec::new();
    let read = reader.by_ref().take(len).read_to_end(&mut buf)?;
    if read as u64 != len {
        return Err(CubrirError::Corrupt {
            message: format!("declared {len} bytes but only {read} remain"),
        });
    }
    Ok(buf)
}
