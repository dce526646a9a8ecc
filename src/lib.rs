mod buffer;
mod config;
mod error;
mod generator;
#[cfg(feature = "live")]
mod live;
mod mixer;
mod notation;
mod notes;
mod pipeline;
mod scale;
mod score;
mod sink;
mod synth;
mod voicing;
#[cfg(feature = "wav")]
mod wav;

pub use buffer::*;
pub use config::*;
pub use error::*;
pub use generator::*;
#[cfg(feature = "live")]
pub use live::*;
pub use mixer::*;
pub use notation::*;
pub use notes::*;
pub use pipeline::*;
pub use scale::*;
pub use score::*;
pub use sink::*;
pub use synth::*;
pub use voicing::*;
#[cfg(feature = "wav")]
pub use wav::*;
