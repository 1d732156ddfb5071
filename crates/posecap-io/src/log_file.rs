use std::{
    fs::{File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::Path,
};

use crate::error::IoError;

/// Append one line to a log file, creating the file if it does not exist yet.
///
/// Create-or-open and seek-to-end are a single `open(2)` with `O_APPEND | O_CREAT`, so there is
/// no window between checking for the file and writing to it. The line, including its trailing
/// newline, is handed to the OS in one `write_all` call.
///
/// # Arguments
///
/// * `path` - The path to the log file.
/// * `line` - The line to append. A newline is added if missing.
///
/// # Example
///
/// ```no_run
/// use posecap_io::log_file::append_line;
///
/// append_line("poses/poses.txt", "1 0 0 0 0 1 0 0 0 0 1 0 0 0 0 1").unwrap();
/// ```
pub fn append_line(path: impl AsRef<Path>, line: &str) -> Result<(), IoError> {
    let mut encoded = String::with_capacity(line.len() + 1);
    encoded.push_str(line.trim_end_matches('\n'));
    encoded.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;
    file.write_all(encoded.as_bytes())?;
    file.flush()?;

    Ok(())
}

/// Read every line of a log file.
///
/// # Arguments
///
/// * `path` - The path to the log file.
///
/// # Returns
///
/// The lines of the file without their trailing newline, in file order.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, IoError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileDoesNotExist(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;

    Ok(lines)
}
