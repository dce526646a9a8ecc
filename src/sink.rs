use crate::Result;

/// Somewhere to send finished PCM. `play` blocks until playback is done, and
/// device failures are returned as they are.
pub trait AudioSink {
    fn play(&mut self, pcm: &[i16], channels: u16, sample_rate: u32) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Recording {
    pub pcm: Vec<i16>,
    pub channels: u16,
    pub sample_rate: u32,
}

/// Keeps everything it is asked to play.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub recordings: Vec<Recording>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioSink for MemorySink {
    fn play(&mut self, pcm: &[i16], channels: u16, sample_rate: u32) -> Result<()> {
        self.recordings.push(Recording {
            pcm: pcm.to_vec(),
            channels,
            sample_rate,
        });
        Ok(())
    }
}
