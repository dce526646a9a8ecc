pub const SAMPLE_RATE: u32 = 44100;

/// Mono audio at a fixed sample rate, samples nominally in [-1, 1] before
/// mixing.
#[derive(Clone, Debug, PartialEq)]
pub struct Buffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Buffer {
    pub fn new(sample_rate: u32) -> Self {
        Buffer {
            samples: Vec::new(),
            sample_rate,
        }
    }

    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Buffer {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn append(&mut self, other: &Buffer) {
        self.samples.extend_from_slice(&other.samples);
    }

    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |peak, s| peak.max(s.abs()))
    }
}

/// Fixed-width signed integer sample formats the normaliser can target.
pub trait PcmSample: Copy + Default {
    const MAX: f64;
    const BYTES: u16;

    /// Truncates toward zero, saturating at the type bounds.
    fn from_f64(value: f64) -> Self;
}

impl PcmSample for i8 {
    const MAX: f64 = i8::MAX as f64;
    const BYTES: u16 = 1;

    fn from_f64(value: f64) -> Self {
        value as i8
    }
}

impl PcmSample for i16 {
    const MAX: f64 = i16::MAX as f64;
    const BYTES: u16 = 2;

    fn from_f64(value: f64) -> Self {
        value as i16
    }
}

impl PcmSample for i32 {
    const MAX: f64 = i32::MAX as f64;
    const BYTES: u16 = 4;

    fn from_f64(value: f64) -> Self {
        value as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_and_duration() {
        let buffer = Buffer::from_samples(vec![0.25, -0.75, 0.5, 0.0], 4);
        assert_eq!(buffer.peak(), 0.75);
        assert_eq!(buffer.duration_seconds(), 1.0);
        assert_eq!(Buffer::new(SAMPLE_RATE).peak(), 0.0);
    }

    #[test]
    fn test_append() {
        let mut a = Buffer::from_samples(vec![1.0], 10);
        a.append(&Buffer::from_samples(vec![2.0, 3.0], 10));
        assert_eq!(a.samples, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pcm_conversion_truncates() {
        assert_eq!(i16::from_f64(32766.9), 32766);
        assert_eq!(i16::from_f64(-1.9), -1);
        assert_eq!(i8::from_f64(500.0), i8::MAX);
        assert_eq!(i32::BYTES, 4);
    }
}
