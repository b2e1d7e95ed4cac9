use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError {
    /// `feed` or `finalize` was called on a stream that was already closed
    #[error("Stream has already been finalized")]
    AlreadyFinalized,
}
