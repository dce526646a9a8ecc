use std::f64::consts::PI;

use crate::buffer::{Buffer, PcmSample};
use crate::{Error, Result};

pub const DEFAULT_NOTE_SECONDS: f64 = 0.5;

/// A pure sine at `frequency`, phase 0, `floor(seconds * sample_rate)` samples long.
pub fn note_waveform(frequency: f32, seconds: f64, sample_rate: u32) -> Buffer {
    let len = (seconds * sample_rate as f64) as usize;
    let step = 2.0 * PI * frequency as f64 / sample_rate as f64;
    let samples = (0..len).map(|i| (step * i as f64).sin() as f32).collect();
    Buffer::from_samples(samples, sample_rate)
}

/// How long each note of a sequence lasts.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Durations {
    #[default]
    Default,
    Uniform(f64),
    PerNote(Vec<f64>),
}

impl Durations {
    fn resolve(self, count: usize) -> Result<Vec<f64>> {
        match self {
            Durations::Default => Ok(vec![DEFAULT_NOTE_SECONDS; count]),
            Durations::Uniform(seconds) => Ok(vec![seconds; count]),
            Durations::PerNote(list) if list.len() == count => Ok(list),
            Durations::PerNote(list) => Err(Error::LengthMismatch {
                expected: count,
                actual: list.len(),
            }),
        }
    }
}

pub fn sequence_waveform(frequencies: &[f32], durations: &[f64], sample_rate: u32) -> Result<Buffer> {
    if frequencies.len() != durations.len() {
        return Err(Error::LengthMismatch {
            expected: frequencies.len(),
            actual: durations.len(),
        });
    }

    let mut buffer = Buffer::new(sample_rate);
    for (&frequency, &seconds) in frequencies.iter().zip(durations) {
        buffer.append(&note_waveform(frequency, seconds, sample_rate));
    }
    Ok(buffer)
}

pub fn sequence_waveform_with(
    frequencies: &[f32],
    durations: Durations,
    sample_rate: u32,
) -> Result<Buffer> {
    let durations = durations.resolve(frequencies.len())?;
    sequence_waveform(frequencies, &durations, sample_rate)
}

/// Centered moving average, same length as the input. Samples past either
/// edge count as zero, and every output divides by the full window.
pub fn smooth(buffer: &Buffer, window: usize) -> Result<Buffer> {
    if window == 0 {
        return Err(Error::InvalidArgument(
            "smoothing window must be positive".to_string(),
        ));
    }

    let len = buffer.len();
    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0.0f64);
    for &s in &buffer.samples {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + s as f64);
    }

    let lead = (window - 1) / 2;
    let samples = (0..len)
        .map(|i| {
            let hi = (i + lead + 1).min(len);
            let lo = (i + lead + 1).saturating_sub(window).min(hi);
            ((prefix[hi] - prefix[lo]) / window as f64) as f32
        })
        .collect();

    Ok(Buffer::from_samples(samples, buffer.sample_rate))
}

/// Scales the buffer so its loudest sample lands exactly on `S::MAX`, then
/// truncates toward zero. A silent buffer comes back as all zeros.
pub fn normalize_to_pcm<S: PcmSample>(buffer: &Buffer) -> Vec<S> {
    let peak = buffer.peak() as f64;
    if peak == 0.0 || !peak.is_finite() {
        if !peak.is_finite() {
            tracing::warn!("buffer contains non-finite samples, emitting silence");
        }
        return vec![S::default(); buffer.len()];
    }

    buffer
        .samples
        .iter()
        .map(|&s| {
            let s = s as f64;
            if s.abs() == peak {
                S::from_f64(S::MAX.copysign(s))
            } else {
                S::from_f64(s * S::MAX / peak)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SAMPLE_RATE;

    #[test]
    fn test_note_waveform_shape() {
        let note = note_waveform(441.0, 0.5, SAMPLE_RATE);
        assert_eq!(note.len(), 22050);
        assert_eq!(note.samples[0], 0.0);
        // 441 Hz at 44.1 kHz is exactly 100 samples per cycle.
        assert!((note.samples[25] - 1.0).abs() < 1e-5);
        assert!((note.samples[75] + 1.0).abs() < 1e-5);
        assert!(note.peak() <= 1.0);
    }

    #[test]
    fn test_note_waveform_truncates_length() {
        assert_eq!(note_waveform(440.0, 0.00001, SAMPLE_RATE).len(), 0);
        assert_eq!(note_waveform(440.0, 0.1, 1000).len(), 100);
    }

    #[test]
    fn test_note_length_keeps_double_precision() {
        // 0.7 rounds below itself as f32, which would lose a sample here.
        assert_eq!(note_waveform(440.0, 0.7, 10_000).len(), 7000);
        let seq = sequence_waveform_with(&[440.0; 3], Durations::Uniform(0.7), 10_000).unwrap();
        assert_eq!(seq.len(), 21000);
    }

    #[test]
    fn test_sequence_length_is_sum_of_notes() {
        let freqs = [220.0, 330.0, 440.0];
        let durs = [0.5, 0.25, 0.125];
        let buffer = sequence_waveform(&freqs, &durs, SAMPLE_RATE).unwrap();
        let expected: f64 = durs.iter().map(|d| d * SAMPLE_RATE as f64).sum();
        assert!((buffer.len() as f64 - expected).abs() <= durs.len() as f64);
        assert_eq!(buffer.len(), 22050 + 11025 + 5512);
    }

    #[test]
    fn test_sequence_length_mismatch() {
        let result = sequence_waveform(&[220.0, 330.0], &[0.5], SAMPLE_RATE);
        assert!(matches!(
            result,
            Err(Error::LengthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_durations_variants() {
        let freqs = [220.0, 330.0];
        let default = sequence_waveform_with(&freqs, Durations::Default, 100).unwrap();
        assert_eq!(default.len(), 100);
        let uniform = sequence_waveform_with(&freqs, Durations::Uniform(0.25), 100).unwrap();
        assert_eq!(uniform.len(), 50);
        let per_note =
            sequence_waveform_with(&freqs, Durations::PerNote(vec![0.1, 0.2]), 100).unwrap();
        assert_eq!(per_note.len(), 30);
        assert!(sequence_waveform_with(&freqs, Durations::PerNote(vec![0.1]), 100).is_err());
    }

    #[test]
    fn test_smooth_matches_same_mode_convolution() {
        let buffer = Buffer::from_samples(vec![1.0, 2.0, 3.0, 4.0, 5.0], 10);

        let odd = smooth(&buffer, 3).unwrap();
        let expected = [3.0 / 3.0, 6.0 / 3.0, 9.0 / 3.0, 12.0 / 3.0, 9.0 / 3.0];
        for (a, b) in odd.samples.iter().zip(expected) {
            assert!((a - b).abs() < 1e-6);
        }

        // Even windows lean one sample toward the past.
        let even = smooth(&buffer, 2).unwrap();
        let expected = [0.5, 1.5, 2.5, 3.5, 4.5];
        for (a, b) in even.samples.iter().zip(expected) {
            assert!((a - b).abs() < 1e-6);
        }

        let identity = smooth(&buffer, 1).unwrap();
        assert_eq!(identity, buffer);
    }

    #[test]
    fn test_smooth_edges_and_wide_window() {
        let buffer = Buffer::from_samples(vec![1.0; 4], 10);
        let wide = smooth(&buffer, 10).unwrap();
        assert_eq!(wide.len(), 4);
        for s in &wide.samples {
            assert!((s - 0.4).abs() < 1e-6);
        }
        assert!(matches!(smooth(&buffer, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_normalize_hits_full_scale() {
        let buffer = Buffer::from_samples(vec![0.1, -0.3, 0.2, 0.05], 10);
        let pcm: Vec<i16> = normalize_to_pcm(&buffer);
        assert_eq!(pcm[1], -32767);
        assert_eq!(pcm.iter().map(|s| s.unsigned_abs()).max(), Some(32767));
        assert_eq!(pcm[0], (0.1f32 as f64 * 32767.0 / 0.3f32 as f64) as i16);

        let pcm: Vec<i8> = normalize_to_pcm(&buffer);
        assert_eq!(pcm[1], -127);
    }

    #[test]
    fn test_normalize_silence() {
        let silent = Buffer::from_samples(vec![0.0; 16], 10);
        let pcm: Vec<i16> = normalize_to_pcm(&silent);
        assert_eq!(pcm, vec![0; 16]);
        let empty: Vec<i16> = normalize_to_pcm(&Buffer::new(10));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_normalize_is_scale_invariant() {
        let note = note_waveform(261.63, 0.05, SAMPLE_RATE);
        let louder = Buffer::from_samples(
            note.samples.iter().map(|s| s * 2.0).collect(),
            note.sample_rate,
        );
        let a: Vec<i16> = normalize_to_pcm(&note);
        let b: Vec<i16> = normalize_to_pcm(&louder);
        assert_eq!(a, b);
    }
}
