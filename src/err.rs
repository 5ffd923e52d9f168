use thiserror::Error;

pub type LResult<T> = Result<T, LazyErr>;

#[derive(Error, Debug)]
pub enum LazyErr {
    /// the value was accessed from inside its own producer
    #[error("Reentrant access, the lazy value is already being evaluated")]
    Reentrant,

    /// the strategy claims to be evaluated, but has no value to lend
    #[error("Lazy value was evaluated but holds no value")]
    NoValue,

    #[error("Producer failed: {0:#}")]
    Producer(#[from] anyhow::Error),
}

impl LazyErr {
    pub const fn is_reentrant(&self) -> bool {
        matches!(self, Self::Reentrant)
    }
}
