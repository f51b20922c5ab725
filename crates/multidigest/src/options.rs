use std::path::PathBuf;

use crate::sidecar::SidecarOptions;
use crate::{DEFAULT_ALGORITHMS, DigestAlgorithm, Registry, Result};

/// Construction options for [`MultiDigestWriter`](crate::MultiDigestWriter).
#[derive(Clone, Debug)]
pub struct WriterOptions {
    algorithms: Vec<String>,
    target:     Option<PathBuf>,
    sidecar:    SidecarOptions,
    registry:   Option<Registry>,
}

impl Default for WriterOptions {
    fn default() -> Self { Self::new() }
}

impl WriterOptions {
    pub fn new() -> Self {
        Self {
            algorithms: DEFAULT_ALGORITHMS.iter().map(|a| a.id().to_string()).collect(),
            target:     None,
            sidecar:    SidecarOptions::default(),
            registry:   None,
        }
    }

    /// Replace the algorithm set.
    pub fn algorithms<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.algorithms = ids.into_iter().map(Into::into).collect();
        self
    }

    /// File next to which sidecars are written on close.
    pub fn target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn sidecar(mut self, sidecar: SidecarOptions) -> Self {
        self.sidecar = sidecar;
        self
    }

    /// Resolve ids against `registry` instead of the process-wide one.
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub(crate) fn resolve(&self) -> Result<Vec<DigestAlgorithm>> {
        self.registry
            .as_ref()
            .unwrap_or_else(|| Registry::global())
            .resolve_all(&self.algorithms)
    }

    pub(crate) fn into_parts(self) -> (Option<PathBuf>, SidecarOptions) {
        (self.target, self.sidecar)
    }
}
