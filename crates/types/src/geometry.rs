use serde::{Deserialize, Serialize};

/// English Metric Units per pixel at 96 DPI, the document format's
/// native length unit.
pub const EMU_PER_PIXEL: i64 = 9525;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Emu(pub i64);

impl Emu {
    pub fn from_pixels(px: u32) -> Self {
        Emu(i64::from(px) * EMU_PER_PIXEL)
    }
}

/// The drawn extent of an embedded object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub cx: Emu,
    pub cy: Emu,
}

impl Extent {
    pub fn new(cx: Emu, cy: Emu) -> Self {
        Self { cx, cy }
    }

    pub fn from_pixels(width: u32, height: u32) -> Self {
        Self {
            cx: Emu::from_pixels(width),
            cy: Emu::from_pixels(height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_conversion_uses_fixed_multiplier() {
        assert_eq!(Emu::from_pixels(400), Emu(3_810_000));
        assert_eq!(
            Extent::from_pixels(400, 200),
            Extent::new(Emu(3_810_000), Emu(1_905_000))
        );
    }
}
