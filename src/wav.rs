use std::path::Path;

use crate::buffer::PcmSample;
use crate::{Error, Result};

fn wav_error(e: hound::Error) -> Error {
    match e {
        hound::Error::IoError(io) => Error::Io(io),
        other => Error::Config(other.to_string()),
    }
}

/// Writes 16-bit PCM to a WAV file.
pub fn save_wav(path: &Path, pcm: &[i16], channels: u16, sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: i16::BYTES * 8,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(wav_error)?;
    for &sample in pcm {
        writer.write_sample(sample).map_err(wav_error)?;
    }
    writer.finalize().map_err(wav_error)?;

    tracing::info!(path = %path.display(), samples = pcm.len(), "saved wav");
    Ok(())
}
