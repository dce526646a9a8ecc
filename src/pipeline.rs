use crate::buffer::Buffer;
use crate::config::Config;
use crate::generator;
use crate::mixer::mix;
use crate::notation::parse_melody;
use crate::scale::Scale;
use crate::score::{Score, load_score};
use crate::sink::AudioSink;
use crate::synth::{self, Durations};
use crate::voicing::{expand, octaves, stack};
use crate::{Error, Result};

/// A finished render: the score that produced it and its 16-bit mono PCM.
#[derive(Clone, Debug)]
pub struct Rendered {
    pub score: Score,
    pub pcm: Vec<i16>,
    pub sample_rate: u32,
}

impl Rendered {
    pub fn play(&self, sink: &mut impl AudioSink) -> Result<()> {
        sink.play(&self.pcm, 1, self.sample_rate)
    }
}

/// The melody: the configured notation if there is one, otherwise a
/// generated contour.
pub fn melody(config: &Config, rng: &mut fastrand::Rng) -> Result<Vec<i32>> {
    match &config.melody {
        Some(text) => parse_melody(text),
        None => generator::generate(&config.contour_params(), rng),
    }
}

/// Stacks the configured harmony on the melody, then copies every voice
/// across octaves.
pub fn voice(melody: Vec<i32>, config: &Config, scale: &Scale) -> Vec<Vec<i32>> {
    let harmony = expand(&[melody], stack(config.harmony.clone()));
    expand(&harmony, octaves(scale.notes_per_octave(), config.octaves))
}

/// Synthesises every track, sums them and smooths the mix.
pub fn render_tracks(
    tracks: &[Vec<f32>],
    time_step: f64,
    sample_rate: u32,
    smoothing_window: usize,
) -> Result<Buffer> {
    let buffers = tracks
        .iter()
        .map(|track| {
            synth::sequence_waveform_with(track, Durations::Uniform(time_step), sample_rate)
        })
        .collect::<Result<Vec<_>>>()?;

    let mixed = if buffers.is_empty() {
        Buffer::new(sample_rate)
    } else {
        mix(&buffers)?
    };
    tracing::debug!(tracks = buffers.len(), samples = mixed.len(), "mixed tracks");

    synth::smooth(&mixed, smoothing_window)
}

pub fn render_with(config: &Config, rng: &mut fastrand::Rng, seed: Option<u64>) -> Result<Rendered> {
    config.validate()?;
    let scale = config.build_scale()?;
    let voices = voice(melody(config, rng)?, config, &scale);
    tracing::info!(
        voices = voices.len(),
        steps = voices.first().map_or(0, Vec::len),
        "composed"
    );

    let score = Score {
        seed,
        base_note: config.base_note.clone(),
        pattern: scale.pattern().to_vec(),
        time_step: config.time_step,
        voices,
    };
    render_score(&score, config.sample_rate, config.smoothing_window)
}

/// Renders with a seeded generator. Without a configured seed one is drawn
/// from entropy and kept in the score so the run can be repeated.
pub fn render(config: &Config) -> Result<Rendered> {
    let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
    tracing::info!(seed, "rendering");
    let mut rng = fastrand::Rng::with_seed(seed);
    render_with(config, &mut rng, Some(seed))
}

pub fn render_score(score: &Score, sample_rate: u32, smoothing_window: usize) -> Result<Rendered> {
    if !(score.time_step > 0.0 && score.time_step.is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "score time_step must be positive, got {}",
            score.time_step
        )));
    }
    let tracks = score.tracks()?;
    let buffer = render_tracks(&tracks, score.time_step, sample_rate, smoothing_window)?;
    let pcm = synth::normalize_to_pcm::<i16>(&buffer);
    tracing::info!(seconds = buffer.duration_seconds(), "rendered");

    Ok(Rendered {
        score: score.clone(),
        pcm,
        sample_rate,
    })
}

/// Replays the score at `replay_path` when one is configured, otherwise
/// renders a new one.
pub fn render_configured(config: &Config) -> Result<Rendered> {
    let Some(path) = &config.replay_path else {
        return render(config);
    };
    config.validate()?;
    let score = load_score(path)?;
    tracing::info!(path = %path.display(), seed = ?score.seed, "replaying score");
    render_score(&score, config.sample_rate, config.smoothing_window)
}

/// Plays frequencies one after another, without smoothing.
pub fn play_sequential(
    frequencies: &[f32],
    durations: Durations,
    sample_rate: u32,
    sink: &mut impl AudioSink,
) -> Result<()> {
    let buffer = synth::sequence_waveform_with(frequencies, durations, sample_rate)?;
    let pcm = synth::normalize_to_pcm::<i16>(&buffer);
    sink.play(&pcm, 1, sample_rate)
}
