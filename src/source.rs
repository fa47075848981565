use std::{
    fs::File,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use crate::{error::HexcompareError, text::file_basename};

pub(crate) trait ByteStream: Read + Seek {}

impl<T: Read + Seek> ByteStream for T {}

/// One side of the comparison: a seekable byte stream with its display name and size.
pub(crate) struct FileSource {
    name: String,
    size: u64,
    stream: Box<dyn ByteStream>,
}

impl FileSource {
    pub(crate) fn open(path: &Path) -> Result<Self, HexcompareError> {
        let file = File::open(path).map_err(|source| HexcompareError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_stream(
            path.display().to_string(),
            BufReader::new(file),
        )?)
    }

    pub(crate) fn from_stream<S>(name: String, mut stream: S) -> io::Result<Self>
    where
        S: ByteStream + 'static,
    {
        let size = stream.seek(SeekFrom::End(0))?;
        stream.seek(SeekFrom::Start(0))?;

        Ok(Self {
            name,
            size,
            stream: Box::new(stream),
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn basename(&self) -> &str {
        file_basename(&self.name)
    }

    pub(crate) fn size(&self) -> u64 {
        self.size
    }

    pub(crate) fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.stream.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Reads until `buffer` is full or the stream is exhausted, returning the byte count.
    ///
    /// A short count is not an error: it marks the end of the file.
    pub(crate) fn read_fill(&mut self, buffer: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buffer.len() {
            match self.stream.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error),
            }
        }

        Ok(filled)
    }

    /// Up to `len` bytes starting at `offset`; shorter near the end of the file.
    pub(crate) fn read_window(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        let available = self.size.saturating_sub(offset).min(len as u64) as usize;
        let mut window = vec![0; available];
        if available == 0 {
            return Ok(window);
        }

        self.seek_to(offset)?;
        let read = self.read_fill(&mut window)?;
        window.truncate(read);
        Ok(window)
    }
}

#[cfg(test)]
pub(crate) fn memory_source(name: &str, bytes: Vec<u8>) -> FileSource {
    FileSource::from_stream(name.to_string(), io::Cursor::new(bytes))
        .expect("in-memory stream should report its size")
}

#[cfg(test)]
mod tests {
    use super::{FileSource, memory_source};
    use crate::error::HexcompareError;
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    fn unique_temp_file_path() -> PathBuf {
        let now_nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("hexcompare-source-test-{now_nanos}.bin"))
    }

    #[test]
    fn open_reports_size_and_name() {
        let path = unique_temp_file_path();
        fs::write(&path, [1u8, 2, 3, 4, 5]).expect("temp file should be writable");

        let mut source = FileSource::open(&path).expect("temp file should open");
        assert_eq!(source.size(), 5);
        assert_eq!(source.name(), path.display().to_string());
        assert_eq!(
            source.read_window(3, 8).expect("window should read"),
            vec![4, 5]
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn open_missing_file_names_the_path() {
        let path = unique_temp_file_path().with_extension("missing");
        let error = FileSource::open(&path).err().expect("missing file should fail");

        assert!(matches!(error, HexcompareError::FileOpen { .. }));
        assert!(error.to_string().contains(&path.display().to_string()));
    }

    #[test]
    fn read_fill_returns_short_count_at_end() {
        let mut source = memory_source("a.bin", vec![9; 10]);
        let mut buffer = [0u8; 4];

        assert_eq!(source.read_fill(&mut buffer).expect("read"), 4);
        assert_eq!(source.read_fill(&mut buffer).expect("read"), 4);
        assert_eq!(source.read_fill(&mut buffer).expect("read"), 2);
        assert_eq!(source.read_fill(&mut buffer).expect("read"), 0);
    }

    #[test]
    fn read_window_past_end_is_empty() {
        let mut source = memory_source("dir/a.bin", vec![1, 2, 3]);

        assert!(source.read_window(3, 16).expect("window").is_empty());
        assert!(source.read_window(100, 16).expect("window").is_empty());
        assert_eq!(source.basename(), "a.bin");
    }
}
