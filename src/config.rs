use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::buffer::SAMPLE_RATE;
use crate::generator::ContourParams;
use crate::scale::{BaseNote, Scale, ScaleKind};
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScaleChoice {
    Named(ScaleKind),
    Pattern(Vec<i32>),
}

impl ScaleChoice {
    pub fn pattern(&self) -> Vec<i32> {
        match self {
            ScaleChoice::Named(kind) => kind.pattern(),
            ScaleChoice::Pattern(p) => p.clone(),
        }
    }
}

impl Default for ScaleChoice {
    fn default() -> Self {
        ScaleChoice::Named(ScaleKind::PentatonicBlues)
    }
}

/// Everything a render needs. Every field has a default, so a config file
/// only has to name what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub time_step: f64,
    pub total_time: f64,
    #[serde(alias = "scale_pattern")]
    pub scale: ScaleChoice,
    pub base_note: BaseNote,
    pub baseline_periods: u32,
    pub baseline_amplitude: u32,
    pub jitter_max: u32,
    pub smoothing_window: usize,
    pub sample_rate: u32,
    /// Scale-step intervals stacked on every note.
    pub harmony: Vec<i32>,
    /// Octave copies of every voice, starting at the written octave.
    pub octaves: usize,
    pub seed: Option<u64>,
    /// Replaces the generated contour when set.
    pub melody: Option<String>,
    pub play: bool,
    pub wav_path: Option<PathBuf>,
    pub score_path: Option<PathBuf>,
    /// Re-renders a saved score instead of composing a new one.
    pub replay_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let total_time = 60.0;
        Config {
            time_step: 0.5,
            total_time,
            scale: ScaleChoice::default(),
            base_note: BaseNote::default(),
            baseline_periods: (total_time / 10.0) as u32,
            baseline_amplitude: 7,
            jitter_max: 3,
            smoothing_window: 100,
            sample_rate: SAMPLE_RATE,
            harmony: vec![0, 1],
            octaves: 3,
            seed: None,
            melody: None,
            play: true,
            wav_path: None,
            score_path: None,
            replay_path: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.time_step > 0.0 && self.time_step.is_finite()) {
            return Err(Error::Config(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        if !(self.total_time > 0.0 && self.total_time.is_finite()) {
            return Err(Error::Config(format!(
                "total_time must be positive, got {}",
                self.total_time
            )));
        }
        if self.sample_rate == 0 {
            return Err(Error::Config("sample_rate must be positive".to_string()));
        }
        if self.smoothing_window == 0 {
            return Err(Error::Config(
                "smoothing_window must be positive".to_string(),
            ));
        }
        self.contour_params()
            .check_range()
            .map_err(|e| Error::Config(e.to_string()))?;
        Ok(())
    }

    pub fn contour_params(&self) -> ContourParams {
        ContourParams {
            time_step: self.time_step,
            total_time: self.total_time,
            baseline_periods: self.baseline_periods,
            baseline_amplitude: self.baseline_amplitude,
            jitter_max: self.jitter_max,
        }
    }

    pub fn build_scale(&self) -> Result<Scale> {
        Scale::new(self.base_note.clone(), self.scale.pattern())
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os("CONTOUR_CONFIG") {
        return Some(PathBuf::from(p));
    }
    std::env::var_os("HOME").map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("contour")
            .join("config.toml")
    })
}

/// Reads the user's config, falling back to defaults when it is missing or
/// unreadable.
pub fn load_config() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Config::default();
    }
    match Config::load(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.baseline_periods, 6);
        assert_eq!(config.scale.pattern(), vec![0, 3, 5, 6, 7, 10]);
        assert_eq!(config.base_note, BaseNote::Name("C3".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str(
            r#"
            total_time = 8.0
            scale = "heptatonic_major"
            base_note = 48
            seed = 1234
            melody = "0 1 2 | 3"
            play = false
            wav_path = "out.wav"
            replay_path = "take.ron"
            "#,
        )
        .unwrap();
        assert_eq!(config.total_time, 8.0);
        assert_eq!(config.scale, ScaleChoice::Named(ScaleKind::HeptatonicMajor));
        assert_eq!(config.base_note, BaseNote::Index(48));
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.time_step, 0.5);
        assert!(!config.play);
        assert_eq!(config.wav_path, Some(PathBuf::from("out.wav")));
        assert_eq!(config.replay_path, Some(PathBuf::from("take.ron")));
        assert_eq!(config.build_scale().unwrap().base(), 48);
    }

    #[test]
    fn test_explicit_pattern() {
        let config = Config::from_toml_str(
            r#"
            scale_pattern = [0, 2, 4, 7, 9]
            base_note = "A2"
            "#,
        )
        .unwrap();
        assert_eq!(config.scale, ScaleChoice::Pattern(vec![0, 2, 4, 7, 9]));
        let scale = config.build_scale().unwrap();
        assert_eq!(scale.notes_per_octave(), 5);
        assert_eq!(scale.base(), 33);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_toml_str("scale_pattern = [0, 2.5]").is_err());
        assert!(Config::from_toml_str("time_step = 0.0").is_err());
        assert!(Config::from_toml_str("smoothing_window = 0").is_err());
        assert!(Config::from_toml_str("sample_rate = 0").is_err());
        assert!(matches!(
            Config::from_toml_str("baseline_amplitude = 4294967295"),
            Err(Error::Config(_))
        ));
        assert!(Config::from_toml_str("baseline_amplitude = 2147483644\njitter_max = 3").is_ok());

        let config = Config::from_toml_str(r#"base_note = "Q7""#).unwrap();
        assert!(matches!(config.build_scale(), Err(Error::InvalidArgument(_))));
    }
}
