//! Error types for pipeline construction
//!
//! Configuration problems are reported before any task is spawned, so a
//! misconfigured stage never consumes input.

/// Error returned when a pipeline stage is built with invalid parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// Output buffer capacity must be at least 1
    #[error("invalid output capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
    /// Worker count must be at least 1
    #[error("invalid worker count: {0} (must be at least 1)")]
    InvalidWorkerCount(usize),
}

/// Result type for pipeline construction
pub type FlowResult<T> = Result<T, FlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        assert_eq!(
            FlowError::InvalidCapacity(0).to_string(),
            "invalid output capacity: 0 (must be at least 1)"
        );
        assert_eq!(
            FlowError::InvalidWorkerCount(0).to_string(),
            "invalid worker count: 0 (must be at least 1)"
        );
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(FlowError::InvalidCapacity(0), FlowError::InvalidCapacity(0));
        assert_ne!(
            FlowError::InvalidCapacity(0),
            FlowError::InvalidWorkerCount(0)
        );
    }
}
