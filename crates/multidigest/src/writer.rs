use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::accumulator::AccumulatorSet;
use crate::sidecar::SidecarOptions;
use crate::{DEFAULT_ALGORITHMS, Digests, Error, Result, WriterOptions};

/// Writer that forwards bytes to a sink while digesting them with several
/// algorithms at once.
///
/// Digests are updated on every `write`, so [`digest_hex`](Self::digest_hex)
/// reflects all bytes written so far. [`close`](Self::close) freezes the
/// digests and, when a target path was configured, writes one sidecar file per
/// algorithm next to it.
///
/// Closing is idempotent: calls after the first return `Ok(())` and do
/// nothing. `write` and `flush` on a closed writer fail with
/// [`Error::StreamClosed`], wrapped in an [`io::Error`].
///
/// Dropping an unclosed writer writes no sidecars.
pub struct MultiDigestWriter<W> {
    sink:          W,
    target:        Option<PathBuf>,
    sidecar:       SidecarOptions,
    accumulators:  AccumulatorSet,
    bytes_written: u64,
    closed:        bool,
}

impl<W: Write> MultiDigestWriter<W> {
    /// MD5 and SHA-1, no sidecars.
    pub fn new(sink: W) -> Self {
        Self::from_parts(sink, None, AccumulatorSet::new(DEFAULT_ALGORITHMS))
    }

    /// MD5 and SHA-1, sidecars written next to `target` on close.
    pub fn with_target(sink: W, target: impl Into<PathBuf>) -> Self {
        Self::from_parts(sink, Some(target.into()), AccumulatorSet::new(DEFAULT_ALGORITHMS))
    }

    /// Fails with [`Error::UnsupportedAlgorithm`] if any configured id is not
    /// registered.
    pub fn with_options(sink: W, options: WriterOptions) -> Result<Self> {
        let accumulators = AccumulatorSet::new(options.resolve()?);
        let (target, sidecar) = options.into_parts();
        let mut writer = Self::from_parts(sink, target, accumulators);
        writer.sidecar = sidecar;
        Ok(writer)
    }

    fn from_parts(sink: W, target: Option<PathBuf>, accumulators: AccumulatorSet) -> Self {
        Self {
            sink,
            target,
            sidecar: SidecarOptions::default(),
            accumulators,
            bytes_written: 0,
            closed: false,
        }
    }

    /// Flush the sink, freeze every digest and write sidecars if a target
    /// was configured.
    ///
    /// If flushing fails the writer stays open. If a sidecar cannot be
    /// written the writer is already closed, its digests stay readable and
    /// sidecars written before the failure are left in place. Calling `close`
    /// again does not retry; write the sidecars with
    /// [`Digests::persist`] on [`digests`](Self::digests) instead.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.sink.flush()?;
        self.accumulators.finalize();
        self.closed = true;

        tracing::debug!(
            algorithms = self.accumulators.len(),
            bytes = self.bytes_written,
            "digest stream closed"
        );

        if let Some(target) = &self.target {
            self.accumulators.digests().persist(target, &self.sidecar)?;
        }

        Ok(())
    }
}

impl<W> MultiDigestWriter<W> {
    /// Hex digest for `id`: live while open, frozen after close.
    pub fn digest_hex(&self, id: &str) -> Result<String> { self.accumulators.hex(id) }

    pub fn digests(&self) -> Digests { self.accumulators.digests() }

    pub fn bytes_written(&self) -> u64 { self.bytes_written }

    pub fn target(&self) -> Option<&Path> { self.target.as_deref() }

    pub fn is_closed(&self) -> bool { self.closed }

    pub fn get_ref(&self) -> &W { &self.sink }

    /// Give the sink back. Digests and sidecars are unaffected.
    pub fn into_inner(self) -> W { self.sink }

    fn ensure_open(&self) -> Result<()> {
        if self.closed { Err(Error::StreamClosed) } else { Ok(()) }
    }
}

impl<W: Write> Write for MultiDigestWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ensure_open()?;
        let n = self.sink.write(buf)?;
        self.accumulators.update(&buf[..n])?;
        self.bytes_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ensure_open()?;
        self.sink.flush()
    }
}
