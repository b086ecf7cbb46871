mod bus;
mod types;

pub use bus::{ChannelSink, MessageBus};
pub use types::SynthMessage;
