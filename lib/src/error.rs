use thiserror::Error;

/// Failures while building the reduced point set.
#[derive(Debug, Error)]
pub enum Error {
    /// Backing storage for the retained points could not be reserved.
    #[error("not enough memory for {0} points")]
    Alloc(usize),

    /// More pixel-distinct points were retained than the precomputed
    /// capacity allows. The capacity is a hard bound; hitting it is a
    /// sizing bug, not a data error.
    #[error("retained points exceeded the precomputed capacity of {0}")]
    CapacityExceeded(usize),
}
