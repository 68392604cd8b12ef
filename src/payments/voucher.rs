use serde::{Deserialize, Serialize};

use crate::errors::{Result, TrackerError};
use crate::types::PaymentId;

/// folder inside the voucher bucket
pub const VOUCHER_PREFIX: &str = "vouchers";

/// proof-of-payment file submitted with a payment
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl VoucherUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// extension taken from the file name, as stored
    pub fn extension(&self) -> &str {
        self.file_name.rsplit('.').next().unwrap_or("")
    }

    /// object key the voucher is stored under; one voucher per payment
    pub fn storage_path(&self, payment_id: PaymentId) -> String {
        format!("{}/{}.{}", VOUCHER_PREFIX, payment_id, self.extension())
    }
}

/// which voucher files are accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherPolicy {
    pub allowed_content_types: Vec<String>,
    pub max_bytes: u64,
}

impl Default for VoucherPolicy {
    fn default() -> Self {
        Self {
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/jpg".to_string(),
                "application/pdf".to_string(),
            ],
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

impl VoucherPolicy {
    pub fn check(&self, upload: &VoucherUpload) -> Result<()> {
        if !self
            .allowed_content_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&upload.content_type))
        {
            return Err(TrackerError::VoucherRejected {
                message: format!("content type {} not allowed", upload.content_type),
            });
        }
        if upload.bytes.len() as u64 > self.max_bytes {
            return Err(TrackerError::VoucherRejected {
                message: format!(
                    "file is {} bytes, limit is {}",
                    upload.bytes.len(),
                    self.max_bytes
                ),
            });
        }
        Ok(())
    }
}
