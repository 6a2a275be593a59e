use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use raylib::prelude::*;

mod ambient;
mod carousel;
mod confetti;
mod config;
mod constants;
mod error;
mod export;
mod ffmpeg;
mod greeting;
mod input;
mod layout;
mod lightbox;
mod media;
mod particles;
mod render;
mod slide;
mod state;
mod texture_loader;
mod timer;
mod typewriter;

use crate::config::Config;
use crate::constants::*;
use crate::greeting::Greeting;
use crate::layout::Viewport;
use crate::particles::ParticleField;
use crate::render::Renderer;

#[derive(Parser)]
#[command(name = "greeting", version, about = "An animated greeting card with a photo carousel and a surprise")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory scanned for photos and videos
    media_dir: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML manifest listing carousel, gallery and overlays; wins over MEDIA_DIR
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Where "Descargar" copies the open photo
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init,
    /// Print the config file location
    ConfigPath,
    /// Print the manifest resolved from MEDIA_DIR
    Manifest { media_dir: Option<PathBuf> },
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_from(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(dir) = &cli.media_dir {
        config.media.directory = Some(dir.clone());
    }
    if let Some(manifest) = &cli.manifest {
        config.media.manifest = Some(manifest.clone());
    }
    if let Some(export_dir) = &cli.export_dir {
        config.media.export_dir = export_dir.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Init) => {
            let path = Config::create_default_config_file(cli.config.as_deref())
                .context("Failed to write default config")?;
            println!("Wrote {}", path.display());
            return Ok(());
        }
        Some(Commands::ConfigPath) => {
            println!("{}", Config::config_path()?.display());
            return Ok(());
        }
        Some(Commands::Manifest { media_dir }) => {
            let config = load_config(&cli)?;
            let directory = media_dir.as_deref().or(config.media.directory.as_deref());
            let manifest = media::resolve(None, directory, config.media.min_items)?;
            print!("{}", manifest.to_toml()?);
            return Ok(());
        }
        None => {}
    }

    let config = load_config(&cli)?;
    let manifest = media::resolve(
        config.media.manifest.as_deref(),
        config.media.directory.as_deref(),
        config.media.min_items,
    )
    .context("Failed to resolve media")?;

    let mut greeting = Greeting::new(&config, manifest)?;

    let (mut rl, thread) = raylib::init()
        .size(config.window.width, config.window.height)
        .title(&config.window.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    // Escape closes layers, not the window
    rl.set_exit_key(None);

    let mut renderer = Renderer::load(&mut rl, &thread, &config, &greeting);
    let mut particles = ParticleField::new(RENDER_WIDTH, RENDER_HEIGHT);

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("Failed to create render texture: {e}"))?;

    greeting.mount();
    log::info!("Greeting mounted with {} slides", greeting.carousel().len());

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        let intents = input::poll(&rl, &greeting.view());
        for intent in intents {
            if let Err(e) = greeting.apply(intent) {
                log::warn!("{:?} failed: {}", intent, e);
            }
        }

        greeting.update(Duration::from_secs_f32(dt), &mut particles);
        particles.update(dt);
        renderer.update(dt, &greeting.view());

        // --- Render each frame into fixed size "framebuffer" ---
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            d.clear_background(Color::BLACK);
            renderer.draw(&mut d, &greeting, &particles);
        });

        // Letterbox the framebuffer onto the window
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        let viewport = Viewport::fit(d.get_screen_width() as f32, d.get_screen_height() as f32);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            viewport.dest(),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    greeting.unmount();
    log::debug!("{} timers left after unmount", greeting.active_timers());
    Ok(())
}
