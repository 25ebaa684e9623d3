//! Test utilities for the product-sync crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

pub mod canned_http;

pub mod cap_fs {
    //! Capability-safe file reads for tests.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    ///
    /// # Errors
    ///
    /// Returns an error when the path has no file name or cannot be read.
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path must name a file")
        })?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(file_name))
    }
}
