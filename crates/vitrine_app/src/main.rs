//! Vitrine demo driver
//!
//! Runs the full page headlessly: builds the app, feeds it a scroll
//! script (wheel bursts, nav jumps, pointer moves) frame by frame, and
//! prints where the document ended up. Useful for eyeballing the
//! choreography pipeline without a renderer attached.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vitrine_app::{
    ScriptEvent, ScrollScript, ViewportConfig, VitrineApp, VitrineConfig, CONFIG_FILE,
};
use vitrine_core::Point;

const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "vitrine-demo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless scroll choreography demo", long_about = None)]
struct Cli {
    /// Config file (defaults to vitrine.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scroll script to replay (JSON); a built-in tour runs otherwise
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Frames to run when the script does not say
    #[arg(short, long, default_value = "600")]
    frames: u32,

    /// Override the config's randomness seed
    #[arg(long)]
    seed: Option<u64>,

    /// Viewport as WIDTHxHEIGHT, e.g. 1280x800
    #[arg(long)]
    viewport: Option<String>,

    /// Force reduced motion regardless of config and environment
    #[arg(long)]
    reduced_motion: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => VitrineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => VitrineConfig::load_or_default(Path::new(CONFIG_FILE))
            .with_context(|| format!("loading {CONFIG_FILE}"))?,
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(spec) = &cli.viewport {
        config.viewport = parse_viewport(spec)?;
    }
    if cli.reduced_motion {
        config.reduced_motion = Some(true);
    }

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(&config.log_filter)
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let script = match &cli.script {
        Some(path) => ScrollScript::load(path)
            .with_context(|| format!("loading script from {}", path.display()))?,
        None => tour_script(),
    };

    info!(
        "starting: {}x{} viewport, seed {}, {} events",
        config.viewport.width,
        config.viewport.height,
        config.seed,
        script.events.len()
    );

    let mut app = VitrineApp::new(&config);
    let frames = run_script(&mut app, &script, cli.frames);

    let label = app
        .section_labels()
        .nth(app.active_section())
        .unwrap_or("none");
    println!(
        "{} frames | offset {:.0} of {:.0} | progress {:.0}% | section '{}'",
        frames,
        app.offset(),
        app.content_height(),
        app.progress() * 100.0,
        label
    );

    Ok(())
}

/// Replay the script; returns how many frames actually ran
fn run_script(app: &mut VitrineApp, script: &ScrollScript, fallback_frames: u32) -> u32 {
    let total = script.frame_count(fallback_frames);
    for frame in 0..total {
        for event in script.events_at(frame) {
            apply(app, event);
        }
        app.advance(FRAME_DT);
        if app.reload_requested() {
            warn!("boundary requested a reload at frame {}; stopping", frame);
            return frame + 1;
        }
    }
    total
}

fn apply(app: &mut VitrineApp, event: &ScriptEvent) {
    if let Some(delta) = event.wheel {
        app.wheel(delta);
    }
    if let Some(index) = event.scroll_to {
        app.scroll_to_section(index);
    }
    if let Some((x, y)) = event.pointer {
        app.pointer_move(Point::new(x, y));
    }
    if event.pointer_leave {
        app.pointer_leave();
    }
}

/// The default tour: scroll a bit, jump around, wave the pointer
fn tour_script() -> ScrollScript {
    ScrollScript {
        frames: Some(600),
        events: vec![
            ScriptEvent {
                frame: 30,
                wheel: Some(600.0),
                ..Default::default()
            },
            ScriptEvent {
                frame: 150,
                scroll_to: Some(3),
                ..Default::default()
            },
            ScriptEvent {
                frame: 300,
                pointer: Some((640.0, 400.0)),
                ..Default::default()
            },
            ScriptEvent {
                frame: 420,
                scroll_to: Some(4),
                ..Default::default()
            },
            ScriptEvent {
                frame: 560,
                pointer_leave: true,
                ..Default::default()
            },
        ],
    }
}

fn parse_viewport(spec: &str) -> Result<ViewportConfig> {
    let (width, height) = spec
        .split_once('x')
        .with_context(|| format!("viewport '{spec}' should look like 1280x800"))?;
    Ok(ViewportConfig {
        width: width
            .trim()
            .parse()
            .with_context(|| format!("bad viewport width '{width}'"))?,
        height: height
            .trim()
            .parse()
            .with_context(|| format!("bad viewport height '{height}'"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        let viewport = parse_viewport("1920x1080").unwrap();
        assert_eq!(viewport.width, 1920.0);
        assert_eq!(viewport.height, 1080.0);

        assert!(parse_viewport("1920").is_err());
        assert!(parse_viewport("wide x tall").is_err());
    }

    #[test]
    fn test_tour_script_stays_in_bounds() {
        let script = tour_script();
        let total = script.frame_count(600);
        assert_eq!(total, 600);
        for event in &script.events {
            assert!(event.frame < total);
            if let Some(index) = event.scroll_to {
                assert!(index < vitrine_app::SECTION_LABELS.len());
            }
        }
    }
}
