use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use sprite_cycle::config::Options;
use sprite_cycle::scene::{self, Color, Renderer, Scene};
use sprite_cycle::transcript::TranscriptRenderer;
use sprite_cycle::{log_debug, log_error, log_info, Cli};

/// Renderer used when no transcript is requested
struct LogRenderer;

impl Renderer for LogRenderer {
    fn draw_sprite(&mut self, x: i32, y: i32, tag: &str) {
        log_info!("Displaying sprite: {} at ({}, {})", tag, x, y);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, _color: Color) {
        log_debug!("Text at ({}, {}): {}", x, y, text);
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error!("{:#}", err);
            eprintln!("sprite-cycle: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Logging, then config file, then command-line overrides
    let options = cli.resolve_options()?;

    log_info!("sprite-cycle starting");
    log_info!("  Dialogue: {:?} (key {:?})", options.dialogue_file, options.dialogue_key);
    log_info!("  Interval: {} ms, {} ticks of {} ms", options.interval_ms, options.ticks, options.tick_ms);

    let mut scene = scene::build_scene(&options);

    match &options.transcript {
        Some(path) => {
            let mut renderer = TranscriptRenderer::new(path);
            drive(&mut scene, &options, &mut renderer, TranscriptRenderer::end_frame);
            let written = renderer
                .finish()
                .with_context(|| format!("Failed to write transcript {:?}", path))?;
            log_info!("Wrote {} frames to {:?}", written, path);
        }
        None => drive(&mut scene, &options, &mut LogRenderer, |_| {}),
    }
    Ok(())
}

/// Stand-in for the external frame loop
fn drive<R: Renderer>(
    scene: &mut Scene,
    options: &Options,
    renderer: &mut R,
    end_frame: impl Fn(&mut R),
) {
    let frame = Duration::from_millis(options.tick_ms);
    for _ in 0..options.ticks {
        scene.tick(&mut *renderer);
        end_frame(&mut *renderer);
        thread::sleep(frame);
    }
}
