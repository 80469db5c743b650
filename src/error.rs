use thiserror::Error;

/// Failures at the network boundaries of an inspection.
///
/// Inspectors never let these escape to the API layer; each variant is folded
/// into the `error` field of the corresponding result record.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Could not fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid host: {0}")]
    InvalidHost(String),

    #[error("Connection timed out")]
    Timeout,

    #[error("SSL error: {0}")]
    Tls(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Certificate could not be parsed: {0}")]
    Certificate(String),

    #[error("HTTP client could not be built: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_is_fixed() {
        assert_eq!(ScanError::Timeout.to_string(), "Connection timed out");
    }

    #[test]
    fn test_tls_errors_are_prefixed() {
        let err = ScanError::Tls("invalid peer certificate: UnknownIssuer".to_string());
        assert_eq!(
            err.to_string(),
            "SSL error: invalid peer certificate: UnknownIssuer"
        );
    }

    #[test]
    fn test_io_errors_pass_through_unfiltered() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = ScanError::from(io);
        assert_eq!(err.to_string(), "Connection refused");
    }
}
