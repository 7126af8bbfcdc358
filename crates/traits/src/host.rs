//! DocumentHost trait for abstracting container-side bookkeeping.
//!
//! Rendering produces nodes that point at relationships and binary
//! parts; the layer that opened the template owns both. This trait lets
//! the engine register them without being tied to a container format.

use wordforge_types::ImageKind;

/// The container layer's bookkeeping surface.
///
/// Implementations hand out relationship ids that the serializer later
/// resolves. Ids are opaque to the engine; it only stores them on
/// rendered nodes.
pub trait DocumentHost {
    /// Register an external hyperlink target, returning its
    /// relationship id.
    fn add_hyperlink(&mut self, url: &str) -> String;

    /// Store image bytes as a new image part, returning its
    /// relationship id.
    fn add_image(&mut self, kind: ImageKind, data: &[u8]) -> String;
}

/// A host that keeps registrations in memory and hands out sequential
/// ids. Default collaborator for tests and renders without a real
/// container.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    next_id: usize,
    pub hyperlinks: Vec<String>,
    pub images: Vec<(ImageKind, usize)>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_rel_id(&mut self) -> String {
        self.next_id += 1;
        format!("rId{}", self.next_id)
    }
}

impl DocumentHost for InMemoryHost {
    fn add_hyperlink(&mut self, url: &str) -> String {
        self.hyperlinks.push(url.to_string());
        self.next_rel_id()
    }

    fn add_image(&mut self, kind: ImageKind, data: &[u8]) -> String {
        self.images.push((kind, data.len()));
        self.next_rel_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_relationship_ids() {
        let mut host = InMemoryHost::new();
        assert_eq!(host.add_hyperlink("https://a.example"), "rId1");
        assert_eq!(host.add_image(ImageKind::Png, &[0, 1, 2]), "rId2");
        assert_eq!(host.hyperlinks, ["https://a.example"]);
        assert_eq!(host.images, [(ImageKind::Png, 3)]);
    }
}
