//! The persisted plugin state: a single 4-byte IEEE-754 float holding the gain.

use super::constants::{GAIN_MAX, GAIN_MIN, STATE_SIZE};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StateError>;

/// Reasons a state blob cannot be restored.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum StateError {
    #[error("State blob too short: {len} bytes (expected 4)")]
    Truncated { len: usize },

    #[error("State blob holds a non-finite gain: {value}")]
    NonFinite { value: f32 },
}

/// Encode a gain value. The byte order is fixed to little-endian so blobs stay portable, it
/// matches the native order of every supported target.
pub fn serialize_gain(gain: f32) -> [u8; STATE_SIZE] {
    gain.to_le_bytes()
}

/// Decode a gain value from a state blob.
///
/// Only the first four bytes are read, trailing data is ignored. Finite values outside of the
/// gain range are clamped into it, everything else that cannot be a gain is rejected.
pub fn deserialize_gain(bytes: &[u8]) -> Result<f32> {
    let Some(raw) = bytes.first_chunk::<STATE_SIZE>() else {
        return Err(StateError::Truncated { len: bytes.len() });
    };

    let value = f32::from_le_bytes(*raw);
    if !value.is_finite() {
        return Err(StateError::NonFinite { value });
    }

    if !(GAIN_MIN..=GAIN_MAX).contains(&value) {
        nih_plug::nih_warn!(
            "Restored gain {} is outside of [{}, {}], clamping",
            value,
            GAIN_MIN,
            GAIN_MAX
        );
        return Ok(value.clamp(GAIN_MIN, GAIN_MAX));
    }

    Ok(value)
}
