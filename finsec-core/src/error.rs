use thiserror::Error;

/// Unified error type for FinSec.
#[derive(Error, Debug)]
pub enum FinsecError {
    #[error("Sample document not found: {0}")]
    SampleNotFound(u32),

    #[error("Data log write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl FinsecError {
    /// Map to HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            FinsecError::SampleNotFound(_) => 404,
            FinsecError::Io(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_not_found_maps_to_404() {
        assert_eq!(FinsecError::SampleNotFound(9).status_code(), 404);
    }

    #[test]
    fn io_error_maps_to_500() {
        let err = FinsecError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn io_error_display_includes_cause() {
        let err = FinsecError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let msg = err.to_string();
        assert!(msg.contains("Data log write failed"), "got: {msg}");
        assert!(msg.contains("denied"), "got: {msg}");
    }
}
