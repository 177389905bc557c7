//! Render backend that reports instead of drawing

use sandbox_gui::atlas::AtlasTexture;
use sandbox_gui::draw::{DrawList, Vertex};
use sandbox_gui::ui::RenderBackend;

/// Logs uploads and per-frame geometry statistics
#[derive(Debug, Default)]
pub struct LoggingBackend {
    screen: (u32, u32),
    uploads: usize,
    frames: usize,
    peak_vertices: usize,
}

impl LoggingBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen: (width, height),
            ..Self::default()
        }
    }

    pub const fn frames(&self) -> usize {
        self.frames
    }

    pub const fn uploads(&self) -> usize {
        self.uploads
    }

    pub const fn peak_vertices(&self) -> usize {
        self.peak_vertices
    }
}

impl RenderBackend for LoggingBackend {
    fn upload_atlas(
        &mut self,
        texture: AtlasTexture<'_>,
        revision: u64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let coverage = texture.pixels.iter().filter(|&&p| p > 0).count();
        log::info!(
            "Atlas upload #{}: {}x{} texels, {} covered (revision {})",
            self.uploads + 1,
            texture.width,
            texture.height,
            coverage,
            revision
        );
        self.uploads += 1;
        Ok(())
    }

    fn draw_frame(&mut self, list: &DrawList<'_>) -> Result<(), Box<dyn std::error::Error>> {
        if list.indices.len() % 3 != 0 {
            return Err(format!("index count {} is not a triangle list", list.indices.len()).into());
        }
        let bytes: &[u8] = bytemuck::cast_slice(list.vertices);
        log::debug!(
            "Frame {}: {} vertices ({} bytes, stride {}), {} triangles",
            self.frames,
            list.vertices.len(),
            bytes.len(),
            std::mem::size_of::<Vertex>(),
            list.indices.len() / 3
        );
        self.frames += 1;
        self.peak_vertices = self.peak_vertices.max(list.vertices.len());
        Ok(())
    }

    fn set_screen_size(&mut self, width: u32, height: u32) {
        self.screen = (width, height);
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen
    }
}
