pub mod audio;
pub mod editor;

use audio::constants::{GAIN_DEFAULT, GAIN_MAX, GAIN_MIN, GAIN_PARAM_NAME, GAIN_STEP};
use audio::parameter::ParameterCallback;
use audio::{BusesLayout, GainParameter, GainProcessor, ProcessorConfig};
use nih_plug::prelude::*;
use std::sync::Arc;

/// Inside nih_plug the `FloatParam` is the source of truth for the gain. Host changes are
/// forwarded one way into the processor, and the processor is never handed out, so its own
/// write paths (`set_state`, `create_editor`) are only used by other hosts and by tests.
pub struct GainPlugin {
    params: Arc<GainPluginParams>,
    processor: GainProcessor,
}

#[derive(Params)]
pub struct GainPluginParams {
    /// The parameter's ID is used to identify the parameter in the wrapped plugin API. As long as
    /// these IDs remain constant, you can rename and reorder these fields as you wish. The gain is
    /// a plain linear multiplier, so there's no decibel conversion anywhere.
    #[id = "gain"]
    pub gain: FloatParam,
}

impl GainPluginParams {
    /// Host-side view of the processor's gain. Every value the host applies is forwarded to
    /// `target`, which is what the processor actually reads.
    pub fn new(target: Arc<GainParameter>) -> Self {
        Self {
            gain: FloatParam::new(
                GAIN_PARAM_NAME,
                GAIN_DEFAULT,
                FloatRange::Linear {
                    min: GAIN_MIN,
                    max: GAIN_MAX,
                },
            )
            // No smoother: the processor reads the gain once per block
            .with_step_size(GAIN_STEP)
            .with_callback(forward_host_changes(target))
            .with_value_to_string(formatters::v2s_f32_rounded(2)),
        }
    }
}

/// Runs on whatever thread the wrapper applies the change on, possibly the audio thread, so this
/// has to stay lock-free. Listeners are not notified since the change came from the host.
fn forward_host_changes(target: Arc<GainParameter>) -> ParameterCallback {
    Arc::new(move |value| target.set_value_from_host(value))
}

impl Default for GainPlugin {
    fn default() -> Self {
        let processor = GainProcessor::new(ProcessorConfig::DEFAULT);
        let params = Arc::new(GainPluginParams::new(processor.gain_parameter().clone()));

        Self { params, processor }
    }
}

/// Mono and stereo effect layouts. The first one is the default.
#[cfg(not(any(feature = "synth", feature = "midi-effect")))]
const IO_LAYOUTS: &[AudioIOLayout] = &[
    AudioIOLayout {
        main_input_channels: NonZeroU32::new(2),
        main_output_channels: NonZeroU32::new(2),
        ..AudioIOLayout::const_default()
    },
    AudioIOLayout {
        main_input_channels: NonZeroU32::new(1),
        main_output_channels: NonZeroU32::new(1),
        ..AudioIOLayout::const_default()
    },
];

/// A synth only has outputs
#[cfg(all(feature = "synth", not(feature = "midi-effect")))]
const IO_LAYOUTS: &[AudioIOLayout] = &[
    AudioIOLayout {
        main_output_channels: NonZeroU32::new(2),
        ..AudioIOLayout::const_default()
    },
    AudioIOLayout {
        main_output_channels: NonZeroU32::new(1),
        ..AudioIOLayout::const_default()
    },
];

/// A MIDI effect doesn't have any audio buses
#[cfg(feature = "midi-effect")]
const IO_LAYOUTS: &[AudioIOLayout] = &[AudioIOLayout::const_default()];

impl Plugin for GainPlugin {
    const NAME: &'static str = audio::processor::PROCESSOR_NAME;
    const VENDOR: &'static str = "Cmdv";
    const URL: &'static str = env!("CARGO_PKG_HOMEPAGE");
    const EMAIL: &'static str = "info@cmdv.me";

    const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    // The first audio IO layout is used as the default. The other layouts may be selected either
    // explicitly or automatically by the host or the user depending on the plugin API/backend.
    const AUDIO_IO_LAYOUTS: &'static [AudioIOLayout] = IO_LAYOUTS;

    const MIDI_INPUT: MidiConfig = if ProcessorConfig::DEFAULT.wants_midi_input {
        MidiConfig::Basic
    } else {
        MidiConfig::None
    };
    const MIDI_OUTPUT: MidiConfig = if ProcessorConfig::DEFAULT.produces_midi_output {
        MidiConfig::Basic
    } else {
        MidiConfig::None
    };

    // Gain is read once per block, splitting blocks at parameter changes buys nothing
    const SAMPLE_ACCURATE_AUTOMATION: bool = false;

    type SysExMessage = ();
    type BackgroundTask = ();

    fn params(&self) -> Arc<dyn Params> {
        self.params.clone()
    }

    fn initialize(
        &mut self,
        audio_io_layout: &AudioIOLayout,
        buffer_config: &BufferConfig,
        _context: &mut impl InitContext<Self>,
    ) -> bool {
        if !self
            .processor
            .set_buses_layout(BusesLayout::from(audio_io_layout))
        {
            return false;
        }

        self.processor.prepare(
            buffer_config.sample_rate as f64,
            buffer_config.max_buffer_size as usize,
        );

        nih_plug::nih_log!("Plugin initialized successfully");
        true
    }

    fn deactivate(&mut self) {
        self.processor.release_resources();
    }

    fn process(
        &mut self,
        buffer: &mut Buffer,
        _aux: &mut AuxiliaryBuffers,
        _context: &mut impl ProcessContext<Self>,
    ) -> ProcessStatus {
        // Inputs have already been copied to the outputs, so this is processed in place
        self.processor.process(buffer.as_slice());

        ProcessStatus::Normal
    }
}

impl ClapPlugin for GainPlugin {
    const CLAP_ID: &'static str = "me.cmdv.gain-plugin";
    const CLAP_DESCRIPTION: Option<&'static str> =
        Some("Multiplies the signal by a single automatable gain");
    const CLAP_MANUAL_URL: Option<&'static str> = Some(Self::URL);
    const CLAP_SUPPORT_URL: Option<&'static str> = None;

    const CLAP_FEATURES: &'static [ClapFeature] = &[
        ClapFeature::AudioEffect,
        ClapFeature::Stereo,
        ClapFeature::Mono,
        ClapFeature::Utility,
    ];
}

impl Vst3Plugin for GainPlugin {
    const VST3_CLASS_ID: [u8; 16] = *b"GainPluginCmdv01";

    const VST3_SUBCATEGORIES: &'static [Vst3SubCategory] =
        &[Vst3SubCategory::Fx, Vst3SubCategory::Tools];
}

nih_export_clap!(GainPlugin);
