pub mod certificate;
pub mod headers;
pub mod scoring;
pub mod service;
pub mod types;

pub use certificate::check_ssl_certificate;
pub use headers::{check_security_headers, evaluate_headers};
pub use scoring::summarize;
pub use service::{full_audit, LiveScanner, Scanner};
pub use types::*;
