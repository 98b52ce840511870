use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

/// Domain failures raised by the store and the scoring helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown sensory label: {0}")]
    UnknownLabel(String),

    #[error("coffee {0} not found")]
    CoffeeNotFound(Uuid),

    #[error("water {0} not found")]
    WaterNotFound(Uuid),

    #[error("shot {0} not found")]
    ShotNotFound(Uuid),

    #[error("tasting {0} not found")]
    TastingNotFound(Uuid),

    #[error("verdict {0} not found")]
    VerdictNotFound(Uuid),

    /// A verdict was moved onto a coffee that already owns one.
    #[error("coffee {0} already has a verdict")]
    DuplicateVerdict(Uuid),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::CoffeeNotFound(_)
                | Error::WaterNotFound(_)
                | Error::ShotNotFound(_)
                | Error::TastingNotFound(_)
                | Error::VerdictNotFound(_)
        )
    }
}
