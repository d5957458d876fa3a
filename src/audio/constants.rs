/// Gain parameter constants and helper functions
/// Shared by the processor, the plugin parameters and the editor model

/// Parameter identity as exposed to the host
pub const GAIN_PARAM_ID: &str = "gain";
pub const GAIN_PARAM_NAME: &str = "Gain";

/// Gain parameter range (linear multiplier)
pub const GAIN_MIN: f32 = 0.0;
pub const GAIN_MAX: f32 = 2.0;
pub const GAIN_STEP: f32 = 0.01;
pub const GAIN_DEFAULT: f32 = 1.0;

/// Size of the persisted state blob in bytes (one f32)
pub const STATE_SIZE: usize = 4;

/// Plugin reports no reverb/delay tail
pub const TAIL_LENGTH_SECONDS: f64 = 0.0;

/// Editor window layout
pub const EDITOR_WIDTH: u32 = 400;
pub const EDITOR_HEIGHT: u32 = 300;
pub const EDITOR_TITLE: &str = "Simple Gain Plugin";

/// Knob rotation range (300 degrees total rotation)
pub const KNOB_MIN_ANGLE_DEG: f32 = -150.0;
pub const KNOB_MAX_ANGLE_DEG: f32 = 150.0;
pub const KNOB_TOTAL_ROTATION_DEG: f32 = KNOB_MAX_ANGLE_DEG - KNOB_MIN_ANGLE_DEG;

// === HELPER FUNCTIONS ===

/// Convert a gain value to normalized position (0.0 = GAIN_MIN, 1.0 = GAIN_MAX)
pub fn gain_to_normalized(gain: f32) -> f32 {
    ((gain - GAIN_MIN) / (GAIN_MAX - GAIN_MIN)).clamp(0.0, 1.0)
}

/// Convert normalized position back to a gain value
pub fn normalized_to_gain(normalized: f32) -> f32 {
    GAIN_MIN + normalized.clamp(0.0, 1.0) * (GAIN_MAX - GAIN_MIN)
}

/// Round a gain value onto the 0.01 grid and keep it inside the range
pub fn snap_gain(gain: f32) -> f32 {
    let steps = ((gain - GAIN_MIN) / GAIN_STEP).round();
    (GAIN_MIN + steps * GAIN_STEP).clamp(GAIN_MIN, GAIN_MAX)
}

/// Convert a gain value to knob angle
pub fn gain_to_knob_angle(gain: f32) -> f32 {
    KNOB_MIN_ANGLE_DEG + gain_to_normalized(gain) * KNOB_TOTAL_ROTATION_DEG
}

/// Convert knob angle to a gain value
pub fn knob_angle_to_gain(angle_deg: f32) -> f32 {
    normalized_to_gain((angle_deg - KNOB_MIN_ANGLE_DEG) / KNOB_TOTAL_ROTATION_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalized_mapping_covers_range() {
        assert_eq!(gain_to_normalized(GAIN_MIN), 0.0);
        assert_eq!(gain_to_normalized(GAIN_MAX), 1.0);
        assert_eq!(gain_to_normalized(GAIN_DEFAULT), 0.5);
        assert_eq!(normalized_to_gain(0.5), GAIN_DEFAULT);
        assert_eq!(normalized_to_gain(4.0), GAIN_MAX);
    }

    #[test]
    fn snap_rounds_to_step() {
        assert_abs_diff_eq!(snap_gain(0.504), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(snap_gain(0.506), 0.51, epsilon = 1e-6);
        assert_eq!(snap_gain(-1.0), GAIN_MIN);
        assert_eq!(snap_gain(3.0), GAIN_MAX);
    }

    #[test]
    fn knob_angle_round_trip() {
        assert_eq!(gain_to_knob_angle(GAIN_MIN), KNOB_MIN_ANGLE_DEG);
        assert_eq!(gain_to_knob_angle(GAIN_MAX), KNOB_MAX_ANGLE_DEG);
        assert_eq!(gain_to_knob_angle(GAIN_DEFAULT), 0.0);
        assert_abs_diff_eq!(knob_angle_to_gain(75.0), 1.5, epsilon = 1e-6);
    }
}
