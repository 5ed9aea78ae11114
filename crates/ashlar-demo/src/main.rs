//! Ashlar demo: renders an example UI command stream through either the wgpu
//! backend (windowed) or the tiny-skia software backend (headless PNG dump).

mod app;
mod device;
mod resources;
mod ui;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use ashlar_engine::backend::SoftwareBackend;
use ashlar_engine::coords::Viewport;
use ashlar_engine::logging;
use ashlar_engine::paint::Color;
use ashlar_engine::render::Dispatcher;
use winit::event_loop::EventLoop;

use crate::app::App;
use crate::resources::Resources;

const USAGE: &str = "\
ashlar-demo — retained-command UI renderer demo

USAGE:
  ashlar-demo [--size WxH] [--software PATH]

OPTIONS:
  --size WxH        logical viewport size (default 1024x768)
  --software PATH   render one frame with the software backend to PATH (PNG)
                    instead of opening a window
  --help            print this message
";

struct Options {
    size: (u32, u32),
    software: Option<PathBuf>,
}

fn parse_args() -> Result<Options> {
    let mut options = Options { size: (1024, 768), software: None };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print!("{USAGE}");
                std::process::exit(0);
            }
            "--size" => {
                let value = args.next().context("--size needs a WxH value")?;
                let (w, h) = value
                    .split_once(['x', 'X'])
                    .context("--size format is WxH, e.g. 1024x768")?;
                options.size = (
                    w.parse().context("bad --size width")?,
                    h.parse().context("bad --size height")?,
                );
            }
            "--software" => {
                let path = args.next().context("--software needs an output path")?;
                options.software = Some(PathBuf::from(path));
            }
            other => bail!("unknown argument {other:?} (try --help)"),
        }
    }

    Ok(options)
}

fn main() -> Result<()> {
    logging::init_logging(Default::default());

    let options = parse_args()?;
    let resources = resources::load().context("failed to load resources")?;

    match options.software {
        Some(path) => render_headless(&resources, options.size, &path),
        None => run_windowed(resources, options.size),
    }
}

fn render_headless(resources: &Resources, (w, h): (u32, u32), path: &PathBuf) -> Result<()> {
    let viewport = Viewport::new(w as f32, h as f32);
    let scene = ui::build_scene(
        viewport,
        &ui::UiState::default(),
        &resources.fonts,
        resources.body_font,
        resources.profile_picture,
    );

    let mut backend = SoftwareBackend::new(w, h, &resources.fonts, &resources.textures)
        .context("viewport must be non-zero")?;
    backend.clear(Color::BLACK);
    Dispatcher::new().dispatch(&mut backend, scene.commands.commands());

    backend
        .into_pixmap()
        .save_png(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn run_windowed(resources: Resources, size: (u32, u32)) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(resources, size);
    event_loop
        .run_app(&mut app)
        .context("event loop terminated with error")?;
    Ok(())
}
