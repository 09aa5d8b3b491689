//! File sink for displayable streams.
//!
//! Writing to a file is a terminal operation like any other reducer: it
//! drains the stream, rendering one element per line.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::Stream;

impl<T: fmt::Display> Stream<T> {
    /// Consumes the stream fully, writing each element's `Display`
    /// rendering as one line of the file at `path`.
    ///
    /// With `append` set, lines are added after the file's existing
    /// contents; otherwise the file is created or truncated first. The
    /// writer is buffered and flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from opening or writing the file.
    ///
    /// # Panics
    ///
    /// Panics if this stream was already consumed.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use rivulet::stream::Stream;
    ///
    /// Stream::range(1, 4, 1).to_file("numbers.txt", false)?;
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn to_file(&self, path: impl AsRef<Path>, append: bool) -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(path)?;
        let mut writer = BufWriter::new(file);
        for element in self.consume("to_file") {
            writeln!(writer, "{element}")?;
        }
        writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("rivulet_sink_{name}_{}", std::process::id()));
        path
    }

    #[rstest]
    fn test_to_file_writes_one_line_per_element() {
        let path = scratch_path("lines");
        Stream::emits([1, 2, 3]).to_file(&path, false).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1\n2\n3\n");
        fs::remove_file(&path).unwrap();
    }

    #[rstest]
    fn test_to_file_truncates_by_default() {
        let path = scratch_path("truncate");
        Stream::emits(["old"]).to_file(&path, false).unwrap();
        Stream::emits(["new"]).to_file(&path, false).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "new\n");
        fs::remove_file(&path).unwrap();
    }

    #[rstest]
    fn test_to_file_appends_when_requested() {
        let path = scratch_path("append");
        Stream::emits([1]).to_file(&path, false).unwrap();
        Stream::emits([2]).to_file(&path, true).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1\n2\n");
        fs::remove_file(&path).unwrap();
    }

    #[rstest]
    fn test_to_file_drains_the_stream() {
        let path = scratch_path("drained");
        let stream = Stream::emits([1, 2]);
        stream.to_file(&path, false).unwrap();
        assert!(stream.is_drained());
        fs::remove_file(&path).unwrap();
    }
}
