use crate::audio::constants::{
    gain_to_knob_angle, knob_angle_to_gain, snap_gain, EDITOR_HEIGHT, EDITOR_TITLE, EDITOR_WIDTH,
    GAIN_MAX, GAIN_MIN, GAIN_PARAM_NAME,
};
use crate::audio::parameter::{GainParameter, ListenerId};
use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Vertical drag distance in pixels that sweeps the knob across the full range
const DRAG_PIXELS_FOR_FULL_RANGE: f32 = 200.0;

/// What the view last painted. The subscription flags notified changes, host automation that
/// bypasses the listeners is caught by comparing against the painted value.
struct DisplayState {
    painted_value: AtomicF32,
    needs_repaint: AtomicBool,
}

/// Presentation model for the gain editor: a title, a "Gain" label, a rotary knob and a value
/// label.
///
/// The editor subscribes to the gain parameter, so automation and state restores show up without
/// reopening it. User gestures go through the same "set and notify" path as the host.
pub struct GainEditor {
    gain: Arc<GainParameter>,
    display: Arc<DisplayState>,
    listener: ListenerId,

    is_dragging: bool,
    drag_start_y: f32,
    drag_start_value: f32,
}

impl GainEditor {
    pub fn new(gain: Arc<GainParameter>) -> Self {
        let display = Arc::new(DisplayState {
            painted_value: AtomicF32::new(gain.value()),
            needs_repaint: AtomicBool::new(true),
        });

        let display_for_listener = display.clone();
        let listener = gain.subscribe(Arc::new(move |_| {
            display_for_listener
                .needs_repaint
                .store(true, Ordering::Release);
        }));

        Self {
            gain,
            display,
            listener,
            is_dragging: false,
            drag_start_y: 0.0,
            drag_start_value: 0.0,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (EDITOR_WIDTH, EDITOR_HEIGHT)
    }

    pub fn title(&self) -> &'static str {
        EDITOR_TITLE
    }

    pub fn label_text(&self) -> &'static str {
        GAIN_PARAM_NAME
    }

    /// The value the knob is showing
    pub fn slider_value(&self) -> f32 {
        self.gain.value()
    }

    pub fn slider_range(&self) -> (f32, f32) {
        (GAIN_MIN, GAIN_MAX)
    }

    /// Two decimals, e.g. `1.00`
    pub fn value_text(&self) -> String {
        format!("{:.2}", self.slider_value())
    }

    /// Shown next to the knob while it's being dragged
    pub fn popup_text(&self) -> String {
        format!("{:.2} Gain", self.slider_value())
    }

    pub fn knob_angle_deg(&self) -> f32 {
        gain_to_knob_angle(self.slider_value())
    }

    /// The knob was moved to `value`. Snaps to the parameter's step and notifies the host.
    pub fn slider_value_changed(&mut self, value: f32) {
        self.gain.set_value_notifying_host(snap_gain(value));
    }

    /// The knob was turned to `angle_deg`, see [`knob_angle_deg()`](Self::knob_angle_deg)
    pub fn knob_angle_changed(&mut self, angle_deg: f32) {
        self.slider_value_changed(knob_angle_to_gain(angle_deg));
    }

    pub fn start_drag(&mut self, y: f32) {
        self.is_dragging = true;
        self.drag_start_y = y;
        self.drag_start_value = self.slider_value();
    }

    /// Dragging up increases the gain
    pub fn drag(&mut self, y: f32) {
        if !self.is_dragging {
            return;
        }

        let delta = (self.drag_start_y - y) / DRAG_PIXELS_FOR_FULL_RANGE * (GAIN_MAX - GAIN_MIN);
        self.slider_value_changed(self.drag_start_value + delta);
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Whether the value changed since the last [`mark_painted()`](Self::mark_painted)
    pub fn needs_repaint(&self) -> bool {
        self.display.needs_repaint.load(Ordering::Acquire)
            || self.display.painted_value.load(Ordering::Relaxed).to_bits()
                != self.gain.value().to_bits()
    }

    pub fn mark_painted(&self) {
        self.display
            .painted_value
            .store(self.gain.value(), Ordering::Relaxed);
        self.display.needs_repaint.store(false, Ordering::Release);
    }
}

impl Drop for GainEditor {
    fn drop(&mut self) {
        self.gain.unsubscribe(self.listener);
    }
}
