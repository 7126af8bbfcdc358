use serde::{Deserialize, Serialize};

/// Image formats the document container can embed as parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageKind {
    Bmp,
    Emf,
    Icon,
    Jpeg,
    Pcx,
    Png,
    Svg,
    Tiff,
    Wmf,
}

impl ImageKind {
    /// Map a file extension (no dot, any case) to an image kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Some(ImageKind::Bmp),
            "emf" => Some(ImageKind::Emf),
            "ico" => Some(ImageKind::Icon),
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            "pcx" => Some(ImageKind::Pcx),
            "png" => Some(ImageKind::Png),
            "svg" => Some(ImageKind::Svg),
            "tiff" => Some(ImageKind::Tiff),
            "wmf" => Some(ImageKind::Wmf),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageKind::Bmp => "image/bmp",
            ImageKind::Emf => "image/x-emf",
            ImageKind::Icon => "image/x-icon",
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Pcx => "image/x-pcx",
            ImageKind::Png => "image/png",
            ImageKind::Svg => "image/svg+xml",
            ImageKind::Tiff => "image/tiff",
            ImageKind::Wmf => "image/x-wmf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_mapping_is_case_insensitive() {
        assert_eq!(ImageKind::from_extension("PNG"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_extension("JpEg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("webp"), None);
    }
}
