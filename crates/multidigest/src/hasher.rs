use digest::Digest;

/// Incremental hash state behind a registry entry.
///
/// `peek` returns the digest of everything fed so far without consuming the
/// state, which is what makes live digests observable on an open stream.
pub trait Hasher: Send {
    fn update(&mut self, data: &[u8]);
    fn peek(&self) -> Vec<u8>;
    fn finalize(self: Box<Self>) -> Vec<u8>;
}

/// Adapter from any RustCrypto [`Digest`] to [`Hasher`].
#[derive(Clone, Default)]
pub struct DigestHasher<D>(D);

impl<D: Digest> DigestHasher<D> {
    pub fn new() -> Self { Self(D::new()) }
}

impl<D: Digest + Clone + Send + 'static> DigestHasher<D> {
    /// Factory shape expected by [`crate::DigestAlgorithm::new`].
    pub fn boxed() -> Box<dyn Hasher> { Box::new(Self::new()) }
}

impl<D: Digest + Clone + Send> Hasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) { Digest::update(&mut self.0, data); }

    fn peek(&self) -> Vec<u8> { self.0.clone().finalize().to_vec() }

    fn finalize(self: Box<Self>) -> Vec<u8> { self.0.finalize().to_vec() }
}
