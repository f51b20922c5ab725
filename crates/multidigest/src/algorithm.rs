use std::fmt;

use once_cell::sync::Lazy;

use crate::hasher::{DigestHasher, Hasher};
use crate::{Error, Result};

/// A registry entry: algorithm id, sidecar extension and hasher factory.
#[derive(Clone, Copy)]
pub struct DigestAlgorithm {
    id:        &'static str,
    extension: &'static str,
    factory:   fn() -> Box<dyn Hasher>,
}

impl DigestAlgorithm {
    /// # Panics
    ///
    /// Panics if `extension` is empty.
    pub const fn new(
        id: &'static str,
        extension: &'static str,
        factory: fn() -> Box<dyn Hasher>,
    ) -> Self {
        assert!(!extension.is_empty(), "digest extension must not be empty");
        Self {
            id,
            extension,
            factory,
        }
    }

    pub fn id(&self) -> &'static str { self.id }

    /// Suffix appended to a target file name to form its sidecar name.
    pub fn extension(&self) -> &'static str { self.extension }

    /// Fresh incremental state for this algorithm.
    pub fn hasher(&self) -> Box<dyn Hasher> { (self.factory)() }

    pub(crate) fn matches(&self, id: &str) -> bool { self.id.eq_ignore_ascii_case(id) }
}

impl PartialEq for DigestAlgorithm {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.extension == other.extension
    }
}

impl Eq for DigestAlgorithm {}

impl fmt::Debug for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestAlgorithm")
            .field("id", &self.id)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.id) }
}

pub const MD5: DigestAlgorithm = DigestAlgorithm::new("MD5", ".md5", DigestHasher::<md5::Md5>::boxed);

pub const SHA1: DigestAlgorithm =
    DigestAlgorithm::new("SHA-1", ".sha1", DigestHasher::<sha1::Sha1>::boxed);

pub const SHA256: DigestAlgorithm =
    DigestAlgorithm::new("SHA-256", ".sha256", DigestHasher::<sha2::Sha256>::boxed);

pub const SHA512: DigestAlgorithm =
    DigestAlgorithm::new("SHA-512", ".sha512", DigestHasher::<sha2::Sha512>::boxed);

#[cfg(feature = "sha3")]
pub const SHA3_256: DigestAlgorithm =
    DigestAlgorithm::new("SHA3-256", ".sha3-256", DigestHasher::<sha3::Sha3_256>::boxed);

/// Algorithms used when a stream is built without an explicit set.
pub const DEFAULT_ALGORITHMS: [DigestAlgorithm; 2] = [MD5, SHA1];

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::builtin);

/// Lookup table from algorithm id to [`DigestAlgorithm`].
///
/// Ids are matched ASCII case-insensitively. The process-wide table returned
/// by [`Registry::global`] is read-only; extend a copy with
/// [`Registry::register`] and hand it to
/// [`WriterOptions::registry`](crate::WriterOptions::registry).
#[derive(Clone, Debug, Default)]
pub struct Registry {
    algorithms: Vec<DigestAlgorithm>,
}

impl Registry {
    pub fn empty() -> Self { Self::default() }

    pub fn builtin() -> Self {
        let registry = Self::empty()
            .register(MD5)
            .register(SHA1)
            .register(SHA256)
            .register(SHA512);

        #[cfg(feature = "sha3")]
        let registry = registry.register(SHA3_256);

        registry
    }

    pub fn global() -> &'static Registry { &GLOBAL }

    /// Add `algorithm`, replacing any entry with the same id.
    pub fn register(mut self, algorithm: DigestAlgorithm) -> Self {
        match self.algorithms.iter_mut().find(|a| a.matches(algorithm.id)) {
            Some(existing) => *existing = algorithm,
            None => self.algorithms.push(algorithm),
        }
        self
    }

    pub fn resolve(&self, id: &str) -> Result<DigestAlgorithm> {
        self.algorithms
            .iter()
            .find(|a| a.matches(id))
            .copied()
            .ok_or_else(|| Error::UnsupportedAlgorithm(id.to_string()))
    }

    pub fn resolve_all<I, S>(&self, ids: I) -> Result<Vec<DigestAlgorithm>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter().map(|id| self.resolve(id.as_ref())).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DigestAlgorithm> { self.algorithms.iter() }

    pub fn len(&self) -> usize { self.algorithms.len() }

    pub fn is_empty(&self) -> bool { self.algorithms.is_empty() }
}

/// Resolve `id` against the process-wide registry.
pub fn resolve(id: &str) -> Result<DigestAlgorithm> { Registry::global().resolve(id) }
