//! Per-file size and line probing

use std::path::Path;
use tracing::debug;

/// What a single read of a file yields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileProbe {
    /// Size in bytes as reported by the filesystem
    pub size: u64,
    /// Number of `\n` characters
    pub line_count: usize,
    /// File text, when the file could be read and is valid UTF-8
    pub content: Option<String>,
}

/// Count line terminators; a final line without `\n` is not counted
pub fn count_line_terminators(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Read a file once and report its size, line count and text
///
/// Read errors are not fatal: the probe degrades to a zero line count and no content.
pub fn probe_file(path: &Path) -> FileProbe {
    let size = match std::fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Could not stat file");
            0
        }
    };

    match std::fs::read(path) {
        Ok(bytes) => FileProbe {
            size,
            line_count: count_line_terminators(&bytes),
            content: String::from_utf8(bytes).ok(),
        },
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Could not read file");
            FileProbe {
                size,
                ..FileProbe::default()
            }
        }
    }
}
