use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is not held by the view that was consulted.
    #[error("Segment not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

impl CacheError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type CacheResult<T> = Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = CacheError::NotFound("seg-1".to_string());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Segment not found: seg-1");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CacheError = io.into();
        assert!(!err.is_not_found());
        assert!(matches!(err, CacheError::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied));
    }
}
