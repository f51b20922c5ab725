use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::accumulator::AccumulatorSet;
use crate::{DEFAULT_ALGORITHMS, Digests, Error, Registry, Result};

/// Streaming reader that digests data as it passes through.
pub struct MultiDigestReader<R> {
    source:       R,
    accumulators: AccumulatorSet,
    bytes_read:   u64,
}

impl<R: Read> MultiDigestReader<R> {
    /// MD5 and SHA-1.
    pub fn new(source: R) -> Self {
        Self {
            source,
            accumulators: AccumulatorSet::new(DEFAULT_ALGORITHMS),
            bytes_read: 0,
        }
    }

    pub fn with_algorithms<I, S>(source: R, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let algorithms = Registry::global().resolve_all(ids)?;
        Ok(Self {
            source,
            accumulators: AccumulatorSet::new(algorithms),
            bytes_read: 0,
        })
    }

    /// Freeze the digests of everything read so far.
    pub fn finish(mut self) -> Digests {
        self.accumulators.finalize();
        tracing::debug!(bytes = self.bytes_read, "digest reader finished");
        self.accumulators.digests()
    }
}

impl<R> MultiDigestReader<R> {
    pub fn digest_hex(&self, id: &str) -> Result<String> { self.accumulators.hex(id) }

    pub fn digests(&self) -> Digests { self.accumulators.digests() }

    pub fn bytes_read(&self) -> u64 { self.bytes_read }

    pub fn get_ref(&self) -> &R { &self.source }

    pub fn into_inner(self) -> R { self.source }
}

impl<R: Read> Read for MultiDigestReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.source.read(buf)?;
        if n > 0 {
            self.accumulators.update(&buf[..n])?;
            self.bytes_read += n as u64;
        }
        Ok(n)
    }
}

/// Digest everything `reader` yields.
pub fn digest_reader<R, I, S>(reader: R, ids: I) -> Result<Digests>
where
    R: Read,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reader = MultiDigestReader::with_algorithms(reader, ids)?;
    io::copy(&mut reader, &mut io::sink())?;
    Ok(reader.finish())
}

/// Digest the content of the file at `path`.
pub fn digest_file<I, S>(path: impl AsRef<Path>, ids: I) -> Result<Digests>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let read_err = |source: io::Error| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;
    let mut reader = MultiDigestReader::with_algorithms(io::BufReader::new(file), ids)?;
    io::copy(&mut reader, &mut io::sink()).map_err(read_err)?;
    Ok(reader.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_passes_data_through() {
        let mut reader = MultiDigestReader::new(Cursor::new(b"This is a test."));
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer).unwrap();

        assert_eq!(buffer, "This is a test.");
        assert_eq!(reader.bytes_read(), 15);
        assert_eq!(reader.digest_hex("MD5").unwrap(), "120ea8a25e5d487bf68b5f7096440019");

        let digests = reader.finish();
        assert_eq!(digests.hex("SHA-1").unwrap(), "afa6c8b3a2fae95785dc7d9685a57835d703ac88");
    }

    #[test]
    fn test_partial_read_gives_partial_digest() {
        let mut reader = MultiDigestReader::with_algorithms(&b"This is a test."[..], ["MD5"]).unwrap();
        let mut buffer = [0u8; 8];
        reader.read_exact(&mut buffer).unwrap();
        assert_eq!(reader.digest_hex("md5").unwrap(), "8b50059a924637835f2a8973b5b39925");
    }

    #[test]
    fn test_digest_reader_sha256() {
        let digests = digest_reader(&b"hello world"[..], ["SHA-256"]).unwrap();
        assert_eq!(digests.len(), 1);
        assert_eq!(
            digests.hex("SHA-256").unwrap(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_digest_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");
        assert!(matches!(digest_file(&path, ["MD5"]), Err(Error::Read { .. })));
    }

    #[test]
    fn test_unknown_algorithm() {
        assert!(matches!(
            digest_reader(io::empty(), ["MD5", "TIGER"]),
            Err(Error::UnsupportedAlgorithm(id)) if id == "TIGER"
        ));
    }
}
