//! Shared utilities used by both inspectors.

pub mod cert_parser;
pub mod target;

pub use cert_parser::{extract_leaf_certificate, parse_leaf_certificate, LeafCertificate};
pub use target::{extract_hostname, normalize_url};
