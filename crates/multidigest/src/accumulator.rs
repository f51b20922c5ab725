use crate::hasher::Hasher;
use crate::{DigestAlgorithm, Digests, Error, Result};

enum State {
    Open(Box<dyn Hasher>),
    Finalized(Vec<u8>),
}

/// Incremental hash state for one algorithm.
pub struct DigestAccumulator {
    algorithm: DigestAlgorithm,
    state:     State,
}

impl DigestAccumulator {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            state: State::Open(algorithm.hasher()),
            algorithm,
        }
    }

    pub fn algorithm(&self) -> &DigestAlgorithm { &self.algorithm }

    pub fn is_finalized(&self) -> bool { matches!(self.state, State::Finalized(_)) }

    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.state {
            State::Open(hasher) => {
                hasher.update(data);
                Ok(())
            }
            State::Finalized(_) => Err(Error::StreamClosed),
        }
    }

    /// Freeze the state. Later calls return the same digest.
    pub fn finalize(&mut self) -> &[u8] {
        let digest = match std::mem::replace(&mut self.state, State::Finalized(Vec::new())) {
            State::Open(hasher) => {
                tracing::trace!(algorithm = self.algorithm.id(), "accumulator finalized");
                hasher.finalize()
            }
            State::Finalized(digest) => digest,
        };
        self.state = State::Finalized(digest);
        self.frozen().unwrap_or_default()
    }

    fn frozen(&self) -> Option<&[u8]> {
        match &self.state {
            State::Finalized(digest) => Some(digest),
            State::Open(_) => None,
        }
    }

    /// Digest of everything fed so far, or the frozen digest once finalized.
    pub fn digest(&self) -> Vec<u8> {
        match &self.state {
            State::Open(hasher) => hasher.peek(),
            State::Finalized(digest) => digest.clone(),
        }
    }

    pub fn hex(&self) -> String { hex::encode(self.digest()) }
}

/// One accumulator per configured algorithm, in configuration order.
pub struct AccumulatorSet {
    accumulators: Vec<DigestAccumulator>,
}

impl AccumulatorSet {
    /// Duplicate ids collapse onto the first occurrence.
    pub fn new(algorithms: impl IntoIterator<Item = DigestAlgorithm>) -> Self {
        let mut accumulators: Vec<DigestAccumulator> = Vec::new();
        for algorithm in algorithms {
            if !accumulators.iter().any(|a| a.algorithm.matches(algorithm.id())) {
                accumulators.push(DigestAccumulator::new(algorithm));
            }
        }
        Self { accumulators }
    }

    /// Feed `data` to every accumulator, in order.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return if self.is_finalized() { Err(Error::StreamClosed) } else { Ok(()) };
        }
        for accumulator in &mut self.accumulators {
            accumulator.update(data)?;
        }
        Ok(())
    }

    pub fn finalize(&mut self) {
        for accumulator in &mut self.accumulators {
            accumulator.finalize();
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.accumulators.iter().any(DigestAccumulator::is_finalized)
    }

    pub fn get(&self, id: &str) -> Result<&DigestAccumulator> {
        self.accumulators
            .iter()
            .find(|a| a.algorithm.matches(id))
            .ok_or_else(|| Error::UnsupportedAlgorithm(id.to_string()))
    }

    pub fn hex(&self, id: &str) -> Result<String> { self.get(id).map(DigestAccumulator::hex) }

    pub fn digests(&self) -> Digests {
        Digests::from_entries(
            self.accumulators
                .iter()
                .map(|a| (a.algorithm, a.digest()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &DigestAccumulator> { self.accumulators.iter() }

    pub fn len(&self) -> usize { self.accumulators.len() }

    pub fn is_empty(&self) -> bool { self.accumulators.is_empty() }
}
