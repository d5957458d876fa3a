use nih_plug::prelude::AudioIOLayout;
use std::num::NonZeroU32;

use super::config::ProcessorConfig;

/// The channel set of a single bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelSet {
    Disabled,
    Mono,
    Stereo,
    /// Anything wider than stereo
    Discrete(u32),
}

impl ChannelSet {
    pub fn from_channel_count(channels: u32) -> Self {
        match channels {
            0 => Self::Disabled,
            1 => Self::Mono,
            2 => Self::Stereo,
            n => Self::Discrete(n),
        }
    }

    pub fn channel_count(&self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Discrete(n) => *n,
        }
    }

    pub fn is_mono_or_stereo(&self) -> bool {
        matches!(self, Self::Mono | Self::Stereo)
    }
}

/// Main input and output channel sets proposed by a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusesLayout {
    pub main_input: ChannelSet,
    pub main_output: ChannelSet,
}

impl BusesLayout {
    pub const MONO: Self = Self::new(ChannelSet::Mono, ChannelSet::Mono);
    pub const STEREO: Self = Self::new(ChannelSet::Stereo, ChannelSet::Stereo);

    pub const fn new(main_input: ChannelSet, main_output: ChannelSet) -> Self {
        Self {
            main_input,
            main_output,
        }
    }

    /// The layout the processor declares when it's created.
    pub fn default_for(config: &ProcessorConfig) -> Self {
        if config.is_midi_effect {
            Self::new(ChannelSet::Disabled, ChannelSet::Disabled)
        } else if config.is_synth {
            Self::new(ChannelSet::Disabled, ChannelSet::Stereo)
        } else {
            Self::STEREO
        }
    }

    /// Only mono or stereo output is supported, and unless this is a synth the input has to
    /// match the output. MIDI effects have no audio and accept anything.
    pub fn is_supported(&self, config: &ProcessorConfig) -> bool {
        if config.is_midi_effect {
            return true;
        }

        if !self.main_output.is_mono_or_stereo() {
            return false;
        }

        if !config.is_synth && self.main_input != self.main_output {
            return false;
        }

        true
    }
}

impl From<&AudioIOLayout> for BusesLayout {
    fn from(layout: &AudioIOLayout) -> Self {
        let channels = |count: Option<NonZeroU32>| {
            ChannelSet::from_channel_count(count.map(NonZeroU32::get).unwrap_or(0))
        };

        Self::new(
            channels(layout.main_input_channels),
            channels(layout.main_output_channels),
        )
    }
}
