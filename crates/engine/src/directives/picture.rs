use std::path::PathBuf;
use std::sync::Arc;

use wordforge_doctree::{PictureNode, Run, RunChild, SharedData};
use wordforge_traits::DocumentHost;
use wordforge_types::{Extent, ImageKind};

use super::DirectiveContent;
use crate::error::RenderError;

/// Default edge length in pixels when the caller sets no size.
const DEFAULT_EDGE_PX: u32 = 400;

/// Where a picture's bytes come from. A path is read lazily at execute
/// time; bytes carry their extension explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum PictureSource {
    Path(PathBuf),
    Bytes { data: SharedData, extension: String },
}

/// An embedded image instruction. Width and height are pixels,
/// converted to the document's native unit when the node is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub source: PictureSource,
    pub width: u32,
    pub height: u32,
}

impl Picture {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: PictureSource::Path(path.into()),
            width: DEFAULT_EDGE_PX,
            height: DEFAULT_EDGE_PX,
        }
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>, extension: impl Into<String>) -> Self {
        Self {
            source: PictureSource::Bytes {
                data: Arc::new(data.into()),
                extension: extension.into(),
            },
            width: DEFAULT_EDGE_PX,
            height: DEFAULT_EDGE_PX,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// The source's extension, uppercased, no dot.
    fn extension(&self) -> String {
        match &self.source {
            PictureSource::Path(path) => path
                .extension()
                .map(|e| e.to_string_lossy().to_uppercase())
                .unwrap_or_default(),
            PictureSource::Bytes { extension, .. } => extension.to_uppercase(),
        }
    }

    /// Resolve the image kind before any bytes are read or any node is
    /// emitted; unknown extensions are a configuration error.
    fn image_kind(&self) -> Result<ImageKind, RenderError> {
        let extension = self.extension();
        ImageKind::from_extension(&extension)
            .ok_or(RenderError::UnsupportedImage(extension))
    }

    fn render_one(&self, run: &mut Run, host: &mut dyn DocumentHost) -> Result<(), RenderError> {
        let kind = self.image_kind()?;
        let data: SharedData = match &self.source {
            PictureSource::Bytes { data, .. } => Arc::clone(data),
            PictureSource::Path(path) => Arc::new(std::fs::read(path)?),
        };
        let rel_id = host.add_image(kind, &data);
        log::debug!("embedded {:?} image as {} ({} bytes)", kind, rel_id, data.len());
        run.children.push(RunChild::Picture(PictureNode {
            rel_id,
            kind,
            extent: Extent::from_pixels(self.width, self.height),
        }));
        Ok(())
    }
}

impl DirectiveContent for Picture {
    fn render_batch(
        items: &[&Self],
        run: &mut Run,
        host: &mut dyn DocumentHost,
    ) -> Result<(), RenderError> {
        for picture in items {
            picture.render_one(run, host)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordforge_traits::InMemoryHost;
    use wordforge_types::Emu;

    #[test]
    fn bytes_picture_renders_with_pixel_extent() {
        let mut run = Run::default();
        let mut host = InMemoryHost::new();
        let pic = Picture::from_bytes(vec![1, 2, 3], "png").with_size(100, 50);
        pic.render(&mut run, &mut host).unwrap();

        let RunChild::Picture(node) = &run.children[0] else {
            panic!("expected picture node");
        };
        assert_eq!(node.kind, ImageKind::Png);
        assert_eq!(node.extent.cx, Emu(952_500));
        assert_eq!(node.extent.cy, Emu(476_250));
        assert_eq!(host.images, [(ImageKind::Png, 3)]);
    }

    #[test]
    fn extension_comes_from_the_path_when_absent() {
        let pic = Picture::from_path("/tmp/logo.JPG");
        assert_eq!(pic.extension(), "JPG");
        assert_eq!(pic.image_kind().unwrap(), ImageKind::Jpeg);
    }

    #[test]
    fn unsupported_extension_fails_before_any_mutation() {
        let mut run = Run::default();
        let mut host = InMemoryHost::new();
        let pic = Picture::from_bytes(vec![0], "webp");
        let err = pic.render(&mut run, &mut host).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedImage(e) if e == "WEBP"));
        assert!(run.children.is_empty());
        assert!(host.images.is_empty());
    }
}
