//! Render backend seam
//!
//! Defines the interface between the compositor and whatever draws its output.
//! Keeps the GUI independent of Vulkan/OpenGL specifics: a backend receives the
//! packed atlas texture and one vertex/index list per frame.

use crate::atlas::{AtlasTexture, SpriteAtlas};
use crate::draw::DrawList;

/// Backend-agnostic GUI rendering interface
pub trait RenderBackend {
    /// Upload the single-channel atlas texture
    ///
    /// `revision` is [`SpriteAtlas::revision`] at the time of the upload.
    fn upload_atlas(
        &mut self,
        texture: AtlasTexture<'_>,
        revision: u64,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Draw one frame's geometry as indexed triangles
    fn draw_frame(&mut self, list: &DrawList<'_>) -> Result<(), Box<dyn std::error::Error>>;

    /// Update screen size for coordinate calculations
    fn set_screen_size(&mut self, width: u32, height: u32);

    /// Get current screen size
    fn screen_size(&self) -> (u32, u32);

    /// Upload the atlas if it was re-packed since `uploaded_revision`
    ///
    /// Returns true when an upload happened. `uploaded_revision` starts at 0,
    /// which no prepared atlas reports.
    fn sync_atlas(
        &mut self,
        atlas: &SpriteAtlas,
        uploaded_revision: &mut u64,
    ) -> Result<bool, Box<dyn std::error::Error>> {
        let texture = atlas.texture()?;
        let revision = atlas.revision();
        if revision == *uploaded_revision {
            return Ok(false);
        }
        log::debug!("Uploading {}x{} atlas (revision {})", texture.width, texture.height, revision);
        self.upload_atlas(texture, revision)?;
        *uploaded_revision = revision;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{rgba, Rect, Vec2};
    use crate::draw::DrawBuffer;

    #[derive(Default)]
    struct Recorder {
        uploads: Vec<(u32, u32, u64)>,
        frames: Vec<(usize, usize)>,
        size: (u32, u32),
    }

    impl RenderBackend for Recorder {
        fn upload_atlas(
            &mut self,
            texture: AtlasTexture<'_>,
            revision: u64,
        ) -> Result<(), Box<dyn std::error::Error>> {
            assert_eq!(texture.pixels.len(), (texture.width * texture.height) as usize);
            self.uploads.push((texture.width, texture.height, revision));
            Ok(())
        }

        fn draw_frame(&mut self, list: &DrawList<'_>) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push((list.vertices.len(), list.indices.len()));
            Ok(())
        }

        fn set_screen_size(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }

        fn screen_size(&self) -> (u32, u32) {
            self.size
        }
    }

    #[test]
    fn test_sync_uploads_once_per_revision() {
        let mut atlas = SpriteAtlas::new();
        atlas.prepare().unwrap();
        let mut backend = Recorder::default();
        let mut uploaded = 0;

        assert!(backend.sync_atlas(&atlas, &mut uploaded).unwrap());
        assert!(!backend.sync_atlas(&atlas, &mut uploaded).unwrap());

        atlas.insert(3, 3, vec![255; 9]).unwrap();
        atlas.prepare().unwrap();
        assert!(backend.sync_atlas(&atlas, &mut uploaded).unwrap());

        assert_eq!(backend.uploads.len(), 2);
        assert_eq!(backend.uploads[1].2, atlas.revision());
    }

    #[test]
    fn test_sync_unprepared_atlas_fails() {
        let atlas = SpriteAtlas::new();
        let mut backend = Recorder::default();
        let mut uploaded = 0;
        assert!(backend.sync_atlas(&atlas, &mut uploaded).is_err());
        assert_eq!(uploaded, 0);
    }

    #[test]
    fn test_draw_frame_receives_list() {
        let mut atlas = SpriteAtlas::new();
        atlas.prepare().unwrap();
        let mut buffer = DrawBuffer::new(&atlas).unwrap();
        let mut backend = Recorder::default();
        backend.set_screen_size(100, 100);

        buffer.begin_frame(Vec2::new(100.0, 100.0));
        buffer.draw_rect(&Rect::new(10.0, 10.0, 20.0, 20.0), &rgba(1.0, 0.0, 0.0, 1.0));
        let list = buffer.end_frame().unwrap();
        backend.draw_frame(&list).unwrap();

        assert_eq!(backend.frames, vec![(4, 6)]);
        assert_eq!(backend.screen_size(), (100, 100));
    }
}
