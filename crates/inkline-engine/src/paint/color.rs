use serde::Deserialize;

/// Straight-alpha sRGB color, one byte per channel.
///
/// Strokes snapshot one of these when they start; renderers decide how to
/// convert it for blending.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    pub const WHITE: Color32 = Color32::rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::rgb(0, 0, 0);
    pub const RED: Color32 = Color32::rgb(255, 0, 0);
    pub const GREEN: Color32 = Color32::rgb(0, 255, 0);
    pub const YELLOW: Color32 = Color32::rgb(255, 255, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB bytes.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Premultiplied `f32` components in `[0, 1]`, ready for GPU blending.
    #[inline]
    pub fn to_premul_f32(self) -> [f32; 4] {
        let a = self.a as f32 / 255.0;
        [
            self.r as f32 / 255.0 * a,
            self.g as f32 / 255.0 * a,
            self.b as f32 / 255.0 * a,
            a,
        ]
    }
}

impl Default for Color32 {
    /// Opaque white, the color a fresh drawing session starts with.
    fn default() -> Self {
        Color32::WHITE
    }
}

/// Fixed drawing palette addressed by small integer ids.
///
/// Ids come straight from UI controls, so lookup is total: unknown ids map to
/// `None` rather than an error.
#[derive(Debug, Copy, Clone, Default)]
pub struct Palette;

impl Palette {
    const ENTRIES: [Color32; 5] = [
        Color32::WHITE,
        Color32::BLACK,
        Color32::RED,
        Color32::GREEN,
        Color32::YELLOW,
    ];

    /// Returns the color for `id`, or `None` when `id` is not in the palette.
    #[inline]
    pub fn color(id: i32) -> Option<Color32> {
        usize::try_from(id).ok().and_then(|i| Self::ENTRIES.get(i).copied())
    }

    /// Number of palette entries.
    #[inline]
    pub const fn len() -> usize {
        Self::ENTRIES.len()
    }
}
