//! Message validation rules.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use beamdrop_core::error::AppError;

/// Maximum allowed raw frame size in bytes.
///
/// Large enough for a maximum-size chunk after base64 expansion plus the
/// JSON envelope.
pub const MAX_FRAME_SIZE: usize = 8 * 1024 * 1024;

/// Validates a raw inbound frame before parsing.
pub fn validate_frame(raw: &str) -> Result<(), AppError> {
    if raw.len() > MAX_FRAME_SIZE {
        return Err(AppError::validation(format!(
            "Frame exceeds maximum size of {MAX_FRAME_SIZE} bytes"
        )));
    }

    if raw.trim().is_empty() {
        return Err(AppError::validation("Empty frame"));
    }

    Ok(())
}

/// Validates a chunk payload: non-empty, well-formed base64, decoded size
/// within the configured limit. Returns the decoded size.
pub fn validate_chunk(chunk: &str, max_bytes: usize) -> Result<usize, AppError> {
    if chunk.is_empty() {
        return Err(AppError::validation("Empty chunk payload"));
    }

    let decoded = BASE64
        .decode(chunk)
        .map_err(|e| AppError::validation(format!("Chunk is not valid base64: {e}")))?;

    if decoded.len() > max_bytes {
        return Err(AppError::validation(format!(
            "Chunk of {} bytes exceeds limit of {} bytes",
            decoded.len(),
            max_bytes
        )));
    }

    Ok(decoded.len())
}
