//! Single file copy with metadata preservation

use crate::types::SyncError;
use filetime::FileTime;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy `src` over `dest`, preserving permission bits and timestamps
///
/// The destination is written in place: a copy interrupted half way leaves
/// a partial file that the next cycle may or may not repair, depending on
/// the mtime it ended up with.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path; its parent must already exist
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError::Copy)` - any IO failure, with both paths attached
///
/// # Example
/// ```no_run
/// use mirrorloop::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("source.txt"), Path::new("dest.txt"))?;
/// # Ok::<(), mirrorloop::SyncError>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    let copy_error = |source| SyncError::Copy {
        src: src.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    };

    let mut src_file = File::open(src).map_err(copy_error)?;
    let src_metadata = src_file.metadata().map_err(copy_error)?;
    let mut dest_file = File::create(dest).map_err(copy_error)?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer).map_err(copy_error)?;
        if bytes_read == 0 {
            break;
        }

        dest_file
            .write_all(&buffer[..bytes_read])
            .map_err(copy_error)?;
        total_bytes += bytes_read as u64;
    }

    dest_file.flush().map_err(copy_error)?;
    drop(dest_file);

    fs::set_permissions(dest, src_metadata.permissions()).map_err(copy_error)?;

    // Timestamps last, after all writes to the file.
    let atime = FileTime::from_last_access_time(&src_metadata);
    let mtime = FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_times(dest, atime, mtime).map_err(copy_error)?;

    Ok(total_bytes)
}
