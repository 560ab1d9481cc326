// Archive writer: named byte payloads in, one zip out

use std::io::{Cursor, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Serialize named payloads into a single deflate zip, preserving entry
/// order.
pub fn write_archive(entries: &[(String, Vec<u8>)]) -> Result<Vec<u8>, String> {
    let cursor = write_archive_to(Cursor::new(Vec::new()), entries)?;
    Ok(cursor.into_inner())
}

/// Same, but into a caller-supplied sink.
pub fn write_archive_to<W: Write + Seek>(
    sink: W,
    entries: &[(String, Vec<u8>)],
) -> Result<W, String> {
    let mut writer = ZipWriter::new(sink);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| format!("Failed to add archive entry '{}': {}", name, e))?;
        writer
            .write_all(bytes)
            .map_err(|e| format!("Failed to write archive entry '{}': {}", name, e))?;
    }

    writer
        .finish()
        .map_err(|e| format!("Failed to finalize archive: {}", e))
}
