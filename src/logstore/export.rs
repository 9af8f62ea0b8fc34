//! Signed audit-log export.
//!
//! Serializes the retained log entries to a human-diffable JSON document and
//! signs them with HMAC-SHA256 so a reviewed export can be told apart from a
//! doctored one. The document is deterministic for a given retained set:
//! entries appear in retained order and struct fields serialize in a fixed
//! order.

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::digest::KeyInit;
use sha2::Sha256;

use super::LogEntry;

// Type alias for our HMAC-SHA256.
type HmacSha256 = Hmac<Sha256>;

// A key used to sign export documents. In a real application this key should be protected.
static HMAC_KEY: &[u8] = b"sentinel_export_key";

/// The export artifact: entries in retained order plus a signature over
/// their canonical serialization.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub entries: Vec<LogEntry>,
    /// HMAC signature (hex-encoded) for the entries field.
    pub signature: String,
}

/// Computes an HMAC signature (hex-encoded) for the given data.
fn compute_signature(data: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(HMAC_KEY).unwrap();
    mac.update(data.as_bytes());
    let result = mac.finalize();
    let bytes = result.into_bytes();
    hex::encode(bytes)
}

/// Canonical serialization of the entry list, the exact bytes the signature
/// covers.
fn canonical_entries(entries: &[LogEntry]) -> String {
    // LogEntry derives Serialize with a fixed field order, so this is
    // deterministic for a given retained set.
    serde_json::to_string_pretty(entries).unwrap_or_default()
}

/// Build a signed export document from the retained entries.
pub fn export_document(entries: Vec<LogEntry>) -> ExportDocument {
    let signature = compute_signature(&canonical_entries(&entries));
    ExportDocument { entries, signature }
}

/// Check a document's signature against its own entries.
pub fn verify_document(doc: &ExportDocument) -> bool {
    compute_signature(&canonical_entries(&doc.entries)) == doc.signature
}

impl ExportDocument {
    /// Render the document itself as pretty JSON for file download.
    pub fn render(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
