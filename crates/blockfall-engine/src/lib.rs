pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardSizeError {
    #[display("board width {width} is below the minimum of {}", BoardSize::MIN_WIDTH)]
    TooNarrow { width: u16 },
    #[display("board height {height} is below the minimum of {}", BoardSize::MIN_HEIGHT)]
    TooShort { height: u16 },
    #[display("board width {width} is above the maximum of {}", BoardSize::MAX_WIDTH)]
    TooWide { width: u16 },
    #[display("board height {height} is above the maximum of {}", BoardSize::MAX_HEIGHT)]
    TooTall { height: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed: expected 32 hex characters, got {input:?}")]
pub struct ParsePieceSeedError {
    input: String,
}

impl ParsePieceSeedError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}
