use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::Result;
use crate::scale::{BaseNote, Scale};

/// The voiced scale steps of one render, enough to re-render it exactly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    #[serde(default)]
    pub seed: Option<u64>,
    pub base_note: BaseNote,
    pub pattern: Vec<i32>,
    pub time_step: f64,
    pub voices: Vec<Vec<i32>>,
}

impl Score {
    pub fn scale(&self) -> Result<Scale> {
        Scale::new(self.base_note.clone(), self.pattern.clone())
    }

    /// Resolves every voice through the score's scale.
    pub fn tracks(&self) -> Result<Vec<Vec<f32>>> {
        let scale = self.scale()?;
        self.voices.iter().map(|v| scale.compose(v)).collect()
    }
}

pub fn to_ron(score: &Score) -> Result<String> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(2)
        .indentor("  ".to_string());
    Ok(ron::ser::to_string_pretty(score, config)?)
}

pub fn from_ron(content: &str) -> Result<Score> {
    Ok(ron::from_str(content)?)
}

pub fn save_score(score: &Score, path: &Path) -> Result<()> {
    fs::write(path, to_ron(score)?)?;
    tracing::info!(path = %path.display(), voices = score.voices.len(), "saved score");
    Ok(())
}

pub fn load_score(path: &Path) -> Result<Score> {
    let content = fs::read_to_string(path)?;
    from_ron(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sample_score() -> Score {
        Score {
            seed: Some(42),
            base_note: BaseNote::Name("C3".to_string()),
            pattern: vec![0, 3, 5, 6, 7, 10],
            time_step: 0.5,
            voices: vec![vec![0, 1, 2], vec![6, 7, 8]],
        }
    }

    #[test]
    fn test_ron_format() {
        let text = to_ron(&sample_score()).unwrap();
        assert!(text.contains("seed: Some(42)"));
        assert!(text.contains("base_note: \"C3\""));
    }

    #[test]
    fn test_roundtrip_through_file() {
        let score = sample_score();
        let path = std::env::temp_dir().join(format!("contour-score-{}.ron", std::process::id()));
        save_score(&score, &path).unwrap();
        let loaded = load_score(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, score);
    }

    #[test]
    fn test_tracks_resolve_through_scale() {
        let tracks = sample_score().tracks().unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0][0], 130.81);
        assert_eq!(tracks[1][0], 261.63);
    }

    #[test]
    fn test_integer_base_and_missing_seed() {
        let score = from_ron("(base_note: 36, pattern: [0, 2], time_step: 0.25, voices: [[0, 1]])")
            .unwrap();
        assert_eq!(score.seed, None);
        assert_eq!(score.base_note, BaseNote::Index(36));
    }

    #[test]
    fn test_malformed_ron() {
        assert!(matches!(from_ron("(voices: oops)"), Err(Error::Config(_))));
    }
}
