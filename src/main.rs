use contour::*;

fn run() -> Result<()> {
    let config = load_config();
    let rendered = render_configured(&config)?;

    if let Some(path) = &config.score_path {
        save_score(&rendered.score, path)?;
    }

    #[cfg(feature = "wav")]
    {
        if let Some(path) = &config.wav_path {
            save_wav(path, &rendered.pcm, 1, rendered.sample_rate)?;
        }
    }
    #[cfg(not(feature = "wav"))]
    {
        if config.wav_path.is_some() {
            tracing::warn!("wav_path is set but WAV export is not enabled. Build with --features wav");
        }
    }

    if config.play {
        #[cfg(feature = "live")]
        {
            let mut sink = CpalSink::new()?;
            rendered.play(&mut sink)?;
        }
        #[cfg(not(feature = "live"))]
        {
            tracing::warn!("playback is not enabled. Build with --features live to play audio");
        }
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "contour failed");
        std::process::exit(1);
    }
}
