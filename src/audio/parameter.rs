use atomic_float::AtomicF32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::constants::{
    gain_to_normalized, GAIN_DEFAULT, GAIN_MAX, GAIN_MIN, GAIN_PARAM_ID, GAIN_PARAM_NAME,
    GAIN_STEP,
};

/// Called with the new plain value whenever the parameter is set through
/// [`GainParameter::set_value_notifying_host()`].
pub type ParameterCallback = Arc<dyn Fn(f32) + Send + Sync>;

/// Identifies one subscription so it can be removed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// The plugin's single automatable gain value.
///
/// The audio thread only ever performs a relaxed atomic load through [`value()`](Self::value).
/// State restores and the editor go through
/// [`set_value_notifying_host()`](Self::set_value_notifying_host), which stores the value and
/// then fans it out to every subscribed listener. The listener list sits behind its own lock
/// that the processing path never touches. Changes the host already knows about arrive through
/// [`set_value_from_host()`](Self::set_value_from_host).
pub struct GainParameter {
    value: AtomicF32,
    listeners: RwLock<Vec<(ListenerId, ParameterCallback)>>,
    next_listener_id: AtomicU64,
}

impl GainParameter {
    pub fn new() -> Self {
        Self {
            value: AtomicF32::new(GAIN_DEFAULT),
            listeners: RwLock::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        GAIN_PARAM_NAME
    }

    pub fn min(&self) -> f32 {
        GAIN_MIN
    }

    pub fn max(&self) -> f32 {
        GAIN_MAX
    }

    pub fn step_size(&self) -> f32 {
        GAIN_STEP
    }

    /// Current plain gain. Lock-free, safe to call from the audio thread.
    #[inline]
    pub fn value(&self) -> f32 {
        self.value.load(Ordering::Relaxed)
    }

    /// Current value mapped to `[0, 1]`.
    pub fn normalized_value(&self) -> f32 {
        gain_to_normalized(self.value())
    }

    /// Store a new plain value and notify every listener.
    ///
    /// NaN is ignored and values outside of `[GAIN_MIN, GAIN_MAX]` are clamped. Values inside
    /// the range are stored bit-for-bit, no step rounding happens here.
    pub fn set_value_notifying_host(&self, new_value: f32) {
        if new_value.is_nan() {
            nih_plug::nih_warn!("Ignoring NaN value for parameter '{}'", GAIN_PARAM_ID);
            return;
        }

        let new_value = new_value.clamp(GAIN_MIN, GAIN_MAX);
        self.value.store(new_value, Ordering::Relaxed);

        // Callbacks run after the guard is released, so they may subscribe, unsubscribe or set
        // the value again
        let callbacks: Vec<ParameterCallback> = match self.listeners.read() {
            Ok(listeners) => listeners.iter().map(|(_, cb)| cb.clone()).collect(),
            Err(poisoned) => poisoned
                .into_inner()
                .iter()
                .map(|(_, cb)| cb.clone())
                .collect(),
        };
        for callback in callbacks {
            callback(new_value);
        }
    }

    /// Store a value that originated from the host itself. Nobody is notified, which keeps this
    /// lock-free and allocation-free for plugin wrappers that apply automation on the audio
    /// thread. Views pick the change up by polling [`value()`](Self::value).
    #[inline]
    pub fn set_value_from_host(&self, new_value: f32) {
        if !new_value.is_nan() {
            self.value
                .store(new_value.clamp(GAIN_MIN, GAIN_MAX), Ordering::Relaxed);
        }
    }

    /// Register a callback for value changes.
    pub fn subscribe(&self, callback: ParameterCallback) -> ListenerId {
        let id = ListenerId(self.next_listener_id.fetch_add(1, Ordering::Relaxed));
        match self.listeners.write() {
            Ok(mut listeners) => listeners.push((id, callback)),
            Err(poisoned) => poisoned.into_inner().push((id, callback)),
        }
        id
    }

    /// Remove a callback. Returns whether it was registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = match self.listeners.write() {
            Ok(listeners) => listeners,
            Err(poisoned) => poisoned.into_inner(),
        };
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        match self.listeners.read() {
            Ok(listeners) => listeners.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl Default for GainParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GainParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GainParameter")
            .field("id", &GAIN_PARAM_ID)
            .field("value", &self.value())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    #[test]
    fn defaults_to_unity_gain() {
        let param = GainParameter::new();
        assert_eq!(param.value(), 1.0);
        assert_eq!(param.name(), "Gain");
        assert_eq!((param.min(), param.max()), (0.0, 2.0));
        assert_eq!(param.step_size(), 0.01);
        assert_eq!(param.normalized_value(), 0.5);
    }

    #[test]
    fn set_notifies_all_listeners() {
        let param = GainParameter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));

        let seen_clone = seen.clone();
        param.subscribe(Arc::new(move |v| seen_clone.lock().unwrap().push(v)));
        let calls_clone = calls.clone();
        param.subscribe(Arc::new(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        param.set_value_notifying_host(0.25);
        param.set_value_notifying_host(1.75);

        assert_eq!(param.value(), 1.75);
        assert_eq!(*seen.lock().unwrap(), vec![0.25, 1.75]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let param = GainParameter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        let id = param.subscribe(Arc::new(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        param.set_value_notifying_host(0.5);
        assert!(param.unsubscribe(id));
        assert!(!param.unsubscribe(id));
        param.set_value_notifying_host(0.75);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(param.listener_count(), 0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let param = GainParameter::new();
        param.set_value_notifying_host(5.0);
        assert_eq!(param.value(), 2.0);
        param.set_value_notifying_host(-1.0);
        assert_eq!(param.value(), 0.0);
        param.set_value_notifying_host(f32::NAN);
        assert_eq!(param.value(), 0.0);
    }

    #[test]
    fn host_values_are_stored_silently() {
        let param = GainParameter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();
        param.subscribe(Arc::new(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        }));

        param.set_value_from_host(0.6);
        param.set_value_from_host(9.0);
        param.set_value_from_host(f32::NAN);

        assert_eq!(param.value(), 2.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn in_range_values_are_not_snapped() {
        let param = GainParameter::new();
        param.set_value_notifying_host(0.123_456_7);
        assert_eq!(param.value().to_bits(), 0.123_456_7f32.to_bits());
    }

    #[test]
    fn callbacks_may_subscribe_and_set_again() {
        let param = Arc::new(GainParameter::new());
        let weak = Arc::downgrade(&param);
        let calls = Arc::new(AtomicUsize::new(0));

        let calls_clone = calls.clone();
        param.subscribe(Arc::new(move |value| {
            let Some(param) = weak.upgrade() else {
                return;
            };
            if calls_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                param.subscribe(Arc::new(|_| {}));
                param.set_value_notifying_host(value / 2.0);
            }
        }));

        param.set_value_notifying_host(1.0);

        assert_eq!(param.value(), 0.5);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(param.listener_count(), 2);
    }

    #[test]
    fn callback_may_drop_an_editor() {
        let param = Arc::new(GainParameter::new());
        let editor = Arc::new(Mutex::new(Some(crate::editor::GainEditor::new(param.clone()))));

        let editor_clone = editor.clone();
        param.subscribe(Arc::new(move |_| {
            editor_clone.lock().unwrap().take();
        }));
        assert_eq!(param.listener_count(), 2);

        param.set_value_notifying_host(0.7);

        assert!(editor.lock().unwrap().is_none());
        assert_eq!(param.listener_count(), 1);
    }
}
