pub mod audit;
pub mod config;
pub mod error;
pub mod infra;
pub mod routes;
pub mod shared;

pub use audit::{
    check_security_headers, check_ssl_certificate, full_audit, AuditReport,
    CertificateCheckResult, HeaderCheckResult, LiveScanner, Scanner,
};
pub use config::{Config, ScanSettings};
pub use error::ScanError;
