//! Request extractors.

mod upload;
mod validated_json;

pub use upload::{read_upload, Upload};
pub use validated_json::{format_validation_errors, ValidatedJson};
