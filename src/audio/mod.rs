pub mod config;
pub mod constants;
pub mod denormals;
pub mod layout;
pub mod parameter;
pub mod processor;
pub mod state;

pub use config::ProcessorConfig;
pub use layout::{BusesLayout, ChannelSet};
pub use parameter::GainParameter;
pub use processor::GainProcessor;
pub use state::StateError;
