use std::sync::Arc;

use super::config::ProcessorConfig;
use super::constants::{STATE_SIZE, TAIL_LENGTH_SECONDS};
use super::denormals::ScopedNoDenormals;
use super::layout::BusesLayout;
use super::parameter::GainParameter;
use super::state::{self, StateError};
use crate::editor::GainEditor;

pub const PROCESSOR_NAME: &str = "Gain Plugin";

/// Sample rate and block size handed over by the host before playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackConfig {
    pub sample_rate: f64,
    pub max_block_size: usize,
}

/// Host-agnostic gain stage.
///
/// This is a passive object: a host calls [`prepare()`](Self::prepare),
/// [`process()`](Self::process), [`release_resources()`](Self::release_resources) and the state
/// functions, it never spawns threads or drives itself.
pub struct GainProcessor {
    config: ProcessorConfig,
    layout: BusesLayout,

    // Shared with editors and the plugin's parameter callback. The audio thread only does
    // atomic loads on it.
    gain: Arc<GainParameter>,

    playback: Option<PlaybackConfig>,
}

impl GainProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            layout: BusesLayout::default_for(&config),
            gain: Arc::new(GainParameter::new()),
            playback: None,
        }
    }

    pub fn gain_parameter(&self) -> &Arc<GainParameter> {
        &self.gain
    }

    // === IDENTIFICATION ===

    pub fn name(&self) -> &'static str {
        PROCESSOR_NAME
    }

    pub fn accepts_midi(&self) -> bool {
        self.config.wants_midi_input
    }

    pub fn produces_midi(&self) -> bool {
        self.config.produces_midi_output
    }

    pub fn is_midi_effect(&self) -> bool {
        self.config.is_midi_effect
    }

    pub fn tail_length_seconds(&self) -> f64 {
        TAIL_LENGTH_SECONDS
    }

    // === PROGRAMS ===
    // Some hosts don't cope with zero programs, so there's always exactly one.

    pub fn num_programs(&self) -> usize {
        1
    }

    pub fn current_program(&self) -> usize {
        0
    }

    pub fn set_current_program(&mut self, _index: usize) {}

    pub fn program_name(&self, _index: usize) -> &'static str {
        ""
    }

    pub fn change_program_name(&mut self, _index: usize, _new_name: &str) {}

    // === LAYOUT ===

    pub fn buses_layout(&self) -> BusesLayout {
        self.layout
    }

    pub fn is_buses_layout_supported(&self, layout: &BusesLayout) -> bool {
        layout.is_supported(&self.config)
    }

    /// Switch to a new layout if it's supported. Returns whether the layout was applied.
    pub fn set_buses_layout(&mut self, layout: BusesLayout) -> bool {
        if !self.is_buses_layout_supported(&layout) {
            nih_plug::nih_warn!("Rejecting unsupported bus layout {:?}", layout);
            return false;
        }

        self.layout = layout;
        true
    }

    // === PLAYBACK ===

    /// Nothing to allocate, the gain stage is stateless across blocks.
    pub fn prepare(&mut self, sample_rate: f64, max_block_size: usize) {
        nih_plug::nih_log!(
            "Preparing gain processor, sample_rate: {}, max_block_size: {}",
            sample_rate,
            max_block_size
        );
        self.playback = Some(PlaybackConfig {
            sample_rate,
            max_block_size,
        });
    }

    pub fn release_resources(&mut self) {
        self.playback = None;
    }

    pub fn playback_config(&self) -> Option<PlaybackConfig> {
        self.playback
    }

    /// Process one block using the current layout's input channel count.
    pub fn process(&self, buffer: &mut [&mut [f32]]) {
        let num_inputs = self.layout.main_input.channel_count() as usize;
        self.process_with_inputs(buffer, num_inputs);
    }

    /// Process one block in place. `buffer` holds one slice per output channel, the first
    /// `num_input_channels` of which carry input data.
    ///
    /// Output channels without input are cleared, everything else is multiplied by the gain.
    /// The gain is read once, so changes made during the block take effect on the next one.
    /// Flush-to-zero and denormals-are-zero are on for the whole call, so subnormal input
    /// samples come out as zero instead of `x * gain`.
    pub fn process_with_inputs(&self, buffer: &mut [&mut [f32]], num_input_channels: usize) {
        let _no_denormals = ScopedNoDenormals::new();

        let num_active = num_input_channels.min(buffer.len());
        for channel in buffer[num_active..].iter_mut() {
            channel.fill(0.0);
        }

        let gain = self.gain.value();
        for channel in buffer[..num_active].iter_mut() {
            apply_gain(channel, gain);
        }
    }

    // === STATE ===

    pub fn get_state(&self) -> [u8; STATE_SIZE] {
        state::serialize_gain(self.gain.value())
    }

    /// Restore the gain from a blob produced by [`get_state()`](Self::get_state). On error the
    /// current gain is kept.
    pub fn set_state(&self, data: &[u8]) -> Result<(), StateError> {
        let gain = state::deserialize_gain(data).inspect_err(|err| {
            nih_plug::nih_warn!("Could not restore state: {}", err);
        })?;
        self.gain.set_value_notifying_host(gain);
        Ok(())
    }

    // === EDITOR ===

    pub fn has_editor(&self) -> bool {
        true
    }

    /// The editor shares ownership of the gain parameter, so it stays valid even if it outlives
    /// this processor.
    pub fn create_editor(&self) -> GainEditor {
        GainEditor::new(self.gain.clone())
    }
}

impl Default for GainProcessor {
    fn default() -> Self {
        Self::new(ProcessorConfig::DEFAULT)
    }
}

/// Multiply every sample by `gain`. No clipping.
#[inline]
pub fn apply_gain(samples: &mut [f32], gain: f32) {
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}
