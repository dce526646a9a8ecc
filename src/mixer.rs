use crate::buffer::Buffer;
use crate::{Error, Result};

/// Sums equal-length buffers sample by sample. There is no gain compensation,
/// so the result can exceed [-1, 1] until it is normalised.
pub fn mix(buffers: &[Buffer]) -> Result<Buffer> {
    let Some(first) = buffers.first() else {
        return Ok(Buffer::new(crate::buffer::SAMPLE_RATE));
    };

    let mut out = vec![0.0f32; first.len()];
    for buffer in buffers {
        if buffer.len() != first.len() {
            return Err(Error::LengthMismatch {
                expected: first.len(),
                actual: buffer.len(),
            });
        }
        if buffer.sample_rate != first.sample_rate {
            return Err(Error::InvalidArgument(format!(
                "cannot mix {} Hz with {} Hz",
                first.sample_rate, buffer.sample_rate
            )));
        }
        for (acc, s) in out.iter_mut().zip(&buffer.samples) {
            *acc += s;
        }
    }

    Ok(Buffer::from_samples(out, first.sample_rate))
}
