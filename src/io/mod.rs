// Purpose - external interfaces: audio output and console status

#[cfg(feature = "rtrb")]
pub mod cpal_sink;
pub mod sink;
pub mod status;

#[cfg(feature = "rtrb")]
pub use cpal_sink::CpalSink;
pub use sink::{AudioSink, BufferSink, SinkError};
pub use status::{ConsoleNotifier, SilentNotifier, StatusColor, StatusNotifier};

/// Every sink in this crate is interleaved stereo.
pub const CHANNELS: u16 = 2;
