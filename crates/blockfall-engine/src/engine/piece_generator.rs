use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;

use crate::{ParsePieceSeedError, PieceKind};

/// Source of the kinds of newly generated pieces.
///
/// The game asks for one kind every time it needs a fresh "next" piece.
pub trait PieceGenerator {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random piece generator.
///
/// Every draw is an independent uniform choice over the seven kinds: there is
/// no bag and no repeat avoidance, so the same kind may come several times in
/// a row.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator as _, PieceSeed, RandomPieceGenerator};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = RandomPieceGenerator::with_seed(seed);
/// let mut b = RandomPieceGenerator::with_seed(seed);
///
/// // Same seed, same pieces.
/// assert_eq!(a.next_kind(), b.next_kind());
/// ```
#[derive(Debug, Clone)]
pub struct RandomPieceGenerator {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for RandomPieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Returns the seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }
}

impl PieceGenerator for RandomPieceGenerator {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Generator cycling through a fixed list of kinds.
///
/// Useful wherever the piece order must be known in advance.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator as _, PieceKind, PieceSequence};
///
/// let mut sequence = PieceSequence::new([PieceKind::I, PieceKind::O]);
/// assert_eq!(sequence.next_kind(), PieceKind::I);
/// assert_eq!(sequence.next_kind(), PieceKind::O);
/// assert_eq!(sequence.next_kind(), PieceKind::I);
/// ```
#[derive(Debug, Clone)]
pub struct PieceSequence {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl PieceSequence {
    /// Creates a sequence repeating `kinds` in order.
    ///
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "piece sequence must not be empty");
        Self { kinds, cursor: 0 }
    }
}

impl PieceGenerator for PieceSequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.cursor];
        self.cursor = (self.cursor + 1) % self.kinds.len();
        kind
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed, written as 32 hexadecimal characters. Using the same seed
/// reproduces the same sequence of pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::new(s));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParsePieceSeedError::new(s))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
