use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::sidecar::{self, SidecarOptions};
use crate::{DigestAlgorithm, Error, Result};

/// Digest values keyed by algorithm, in configuration order.
///
/// Producing a `Digests` has no side effects; writing sidecar files is the
/// separate [`Digests::persist`] step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digests {
    entries: Vec<(DigestAlgorithm, Vec<u8>)>,
}

impl Digests {
    pub(crate) fn from_entries(entries: Vec<(DigestAlgorithm, Vec<u8>)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Result<&[u8]> {
        self.entries
            .iter()
            .find(|(algorithm, _)| algorithm.matches(id))
            .map(|(_, digest)| digest.as_slice())
            .ok_or_else(|| Error::UnsupportedAlgorithm(id.to_string()))
    }

    pub fn hex(&self, id: &str) -> Result<String> { self.get(id).map(hex::encode) }

    pub fn iter(&self) -> impl Iterator<Item = (&DigestAlgorithm, &[u8])> {
        self.entries
            .iter()
            .map(|(algorithm, digest)| (algorithm, digest.as_slice()))
    }

    pub fn algorithms(&self) -> impl Iterator<Item = &DigestAlgorithm> {
        self.entries.iter().map(|(algorithm, _)| algorithm)
    }

    pub fn to_hex_map(&self) -> BTreeMap<&'static str, String> {
        self.entries
            .iter()
            .map(|(algorithm, digest)| (algorithm.id(), hex::encode(digest)))
            .collect()
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Write one sidecar per algorithm next to `target`, in order.
    ///
    /// Stops at the first failure; sidecars already written stay on disk.
    pub fn persist(
        &self,
        target: impl AsRef<Path>,
        options: &SidecarOptions,
    ) -> Result<Vec<PathBuf>> {
        let target = target.as_ref();
        self.entries
            .iter()
            .map(|(algorithm, digest)| {
                sidecar::write_with(target, algorithm, &hex::encode(digest), options)
            })
            .collect()
    }

    /// Check every sidecar of `target` against these digests.
    pub fn verify(&self, target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        for (algorithm, digest) in &self.entries {
            sidecar::verify(target, algorithm, &hex::encode(digest))?;
        }
        Ok(())
    }
}
