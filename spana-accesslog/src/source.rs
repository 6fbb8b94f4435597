//! Line-oriented log sources.
//!
//! A source is a newline-delimited text file, gunzipped on the fly when the
//! path ends in `.gz` — rotated logs are usually compressed in place and the
//! estimator should consume both forms interchangeably.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;

use crate::error::AccessLogError;

/// Iterator over the lines of one log source.
pub struct LineSource {
    path: PathBuf,
    lines: Lines<BufReader<Box<dyn Read>>>,
}

impl std::fmt::Debug for LineSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl LineSource {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AccessLogError> {
        let path = path.into();
        let file = File::open(&path).map_err(|source| AccessLogError::Open {
            path: path.clone(),
            source,
        })?;
        let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(Self {
            path,
            lines: BufReader::new(reader).lines(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for LineSource {
    type Item = Result<String, AccessLogError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(|line| {
            line.map_err(|source| AccessLogError::Read {
                path: self.path.clone(),
                source,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("spana-source-{}-{name}", std::process::id()))
    }

    #[test]
    fn reads_plain_text_lines() {
        let path = temp_path("plain.log");
        std::fs::write(&path, "first\nsecond\n").unwrap();

        let lines: Vec<String> = LineSource::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn reads_gzip_compressed_lines() {
        let path = temp_path("compressed.log.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b"first\nsecond\n").unwrap();
        encoder.finish().unwrap();

        let lines: Vec<String> = LineSource::open(&path)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LineSource::open("/nonexistent/access.log").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/access.log"));
    }
}
