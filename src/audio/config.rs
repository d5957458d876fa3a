/// Build-time behaviour switches for the processor.
///
/// The crate's cargo features (`synth`, `midi-effect`, `midi-input`, `midi-output`) select
/// [`ProcessorConfig::DEFAULT`], which is what the plugin binding uses. Tests and other hosts can
/// construct any combination directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// A synth has no main input bus, so input/output layouts don't have to match
    pub is_synth: bool,
    /// A pure MIDI effect has no audio buses at all
    pub is_midi_effect: bool,
    pub wants_midi_input: bool,
    pub produces_midi_output: bool,
}

impl ProcessorConfig {
    /// A plain stereo audio effect without MIDI.
    pub const EFFECT: Self = Self {
        is_synth: false,
        is_midi_effect: false,
        wants_midi_input: false,
        produces_midi_output: false,
    };

    /// The configuration selected by this build's cargo features.
    pub const DEFAULT: Self = Self {
        is_synth: cfg!(feature = "synth"),
        is_midi_effect: cfg!(feature = "midi-effect"),
        wants_midi_input: cfg!(feature = "midi-input"),
        produces_midi_output: cfg!(feature = "midi-output"),
    };
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
