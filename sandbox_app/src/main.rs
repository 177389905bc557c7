//! GUI sandbox demo application
//!
//! Runs the compositor headless: builds the atlas and font from a
//! configuration file, replays a scripted input sequence through the widget
//! layer and hands every frame to a render backend that logs what it would
//! draw.
//!
//! Usage: `gui_sandbox [config.toml|config.ron] [write-config-to]`

mod demo;
mod logging_backend;

use sandbox_gui::atlas::{AtlasError, SpriteAtlas};
use sandbox_gui::config::{Config, ConfigError, GuiConfig};
use sandbox_gui::draw::DrawError;
use sandbox_gui::foundation::logging;
use sandbox_gui::foundation::math::Vec2;
use sandbox_gui::text::{Font, FontError, GlyphRasterizer, LineMetrics, RasterGlyph};
use sandbox_gui::ui::{GuiContext, RenderBackend};

use demo::DemoState;
use logging_backend::LoggingBackend;

/// Frames run after the script is exhausted
const IDLE_FRAMES: usize = 3;

/// Demo application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be read or written
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Atlas could not be built
    #[error("Atlas error: {0}")]
    Atlas(#[from] AtlasError),

    /// Font could not be loaded
    #[error("Font error: {0}")]
    Font(#[from] FontError),

    /// Compositor failure
    #[error("Draw error: {0}")]
    Draw(#[from] DrawError),

    /// Render backend failure
    #[error("Backend error: {0}")]
    Backend(String),
}

fn backend_error(error: Box<dyn std::error::Error>) -> AppError {
    AppError::Backend(error.to_string())
}

/// Solid block glyphs used when no font file is configured
struct BlockRasterizer;

impl GlyphRasterizer for BlockRasterizer {
    fn line_metrics(&self, px: f32) -> Option<LineMetrics> {
        Some(LineMetrics {
            ascent: px * 0.8,
            descent: -px * 0.2,
            line_gap: 0.0,
        })
    }

    fn rasterize(&self, ch: char, px: f32) -> Option<RasterGlyph> {
        let (width, height) = if ch.is_whitespace() {
            (0, 0)
        } else {
            ((px * 0.45) as u32, (px * 0.6) as u32)
        };
        Some(RasterGlyph {
            width,
            height,
            xmin: 1,
            ymin: 0,
            advance: px * 0.6,
            coverage: vec![200; (width * height) as usize],
        })
    }
}

fn load_font(config: &GuiConfig, atlas: &mut SpriteAtlas) -> Result<Font, AppError> {
    let font = &config.font;
    match &font.path {
        Some(path) => Ok(Font::load_file(path, font.pixel_size, font.codepoints(), atlas)?),
        None => {
            log::warn!("No font configured; using block glyphs");
            Ok(Font::from_rasterizer(&BlockRasterizer, font.pixel_size, font.codepoints(), atlas)?)
        }
    }
}

fn run(config: &GuiConfig) -> Result<(), AppError> {
    let mut atlas = SpriteAtlas::with_default_sprites(config.atlas.max_corner_radius, config.atlas.max_line_width)?;
    let font = load_font(config, &mut atlas)?;
    atlas.prepare()?;

    if let Some(path) = &config.atlas.debug_image_path {
        atlas.save_debug_image(path)?;
        log::info!("Wrote atlas image to {}", path);
    }

    let [width, height] = config.window_size;
    let window = Vec2::new(width as f32, height as f32);

    let mut backend = LoggingBackend::new(width, height);
    let mut uploaded_revision = 0;
    backend.sync_atlas(&atlas, &mut uploaded_revision).map_err(backend_error)?;

    let mut gui = GuiContext::new(&atlas, &font, config.style.clone())?;
    let mut input = demo::script(&font, &config.style, window);
    let mut state = DemoState::default();

    let frames = input.len() + IDLE_FRAMES;
    log::info!("Running {} frames at {}x{}", frames, width, height);

    for _ in 0..frames {
        gui.begin_frame(window, input.next_event());
        demo::build_frame(&mut gui, &mut state, window);

        match gui.end_frame() {
            Ok(list) => backend.draw_frame(&list).map_err(backend_error)?,
            Err(DrawError::VertexOverflow { limit }) => {
                log::warn!("Frame dropped: more than {} vertices", limit);
            }
            Err(e) => return Err(e.into()),
        }

        if state.quit {
            log::info!("Quit selected");
            break;
        }
    }

    log::info!(
        "Done: {} frames, {} atlas uploads, peak {} vertices",
        backend.frames(),
        backend.uploads(),
        backend.peak_vertices()
    );
    log::info!(
        "Final state: name {:?}, zoom {:.2}, pan ({:.0}, {:.0}), split {:.2}, scroll {:.0}, {} canvas clicks",
        state.name,
        state.zoom,
        state.pan.x,
        state.pan.y,
        state.split,
        state.scroll,
        state.clicks
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            GuiConfig::load_from_file(&path)?
        }
        None => GuiConfig::default(),
    };

    if let Some(out) = args.next() {
        config.save_to_file(&out)?;
        log::info!("Wrote effective configuration to {}", out);
    }

    run(&config)?;
    Ok(())
}
