//! RGBW color helpers for 4-channel LEDs.
//!
//! [`Rgbw`] holds one byte per channel and offers cheap fixed-point blending
//! and dimming, a color wheel, and the packed 32-bit word expected by
//! NeoPixel-style drivers. HSV construction goes through `palette`, like the
//! gamma correction applied when packing.

use palette::{FromColor, Hsv, LinSrgb, Srgb};

/// Last valid position on the [`Rgbw::wheel`].
pub const WHEEL_MAX: u8 = 191;

/// An RGBW color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgbw {
    /// Red amount.
    pub r: u8,
    /// Green amount.
    pub g: u8,
    /// Blue amount.
    pub b: u8,
    /// White amount.
    pub w: u8,
}

impl Rgbw {
    /// All channels off.
    pub const BLACK: Rgbw = Rgbw::new(0, 0, 0, 0);

    /// Creates a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Creates a color from a packed `0xWBGR` value with 4 bits per channel.
    ///
    /// Each nibble is scaled by 16, so `0xF` becomes `0xF0`.
    pub const fn from_packed(value: u16) -> Self {
        Self {
            r: (value & 0x000f) as u8 * 0x10,
            g: ((value & 0x00f0) >> 4) as u8 * 0x10,
            b: ((value & 0x0f00) >> 8) as u8 * 0x10,
            w: ((value & 0xf000) >> 12) as u8 * 0x10,
        }
    }

    /// Converts a `palette` color, adding the given white amount.
    pub fn from_srgb(color: Srgb, white: u8) -> Self {
        let color: Srgb<u8> = color.into_format();
        Self::new(color.red, color.green, color.blue, white)
    }

    /// Blends towards `other`.
    ///
    /// `shift` is the share of `other` in 1/256 steps: 0 returns `self`, 255
    /// is all but one step of `other`.
    pub fn mix(&self, other: &Rgbw, shift: u8) -> Self {
        let own = 0x100 - u16::from(shift);
        let theirs = u16::from(shift);
        let blend = |a: u8, b: u8| ((u16::from(a) * own + u16::from(b) * theirs) / 0x100) as u8;
        Self::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
            blend(self.w, other.w),
        )
    }

    /// Scales every channel by `(level + 1) / 256`; 255 keeps the color.
    pub fn dim(&self, level: u8) -> Self {
        let factor = u16::from(level) + 1;
        let scale = |c: u8| ((u16::from(c) * factor) / 0x100) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), scale(self.w))
    }

    /// Returns a color from a 192-step wheel: red to green, green to blue,
    /// blue back to red. Positions past [`WHEEL_MAX`] are clamped.
    pub fn wheel(position: u8, white: u8) -> Self {
        let position = position.min(WHEEL_MAX);
        let ramp = position % 64;
        let falling = (63 - ramp) * 4;
        let rising = ramp * 4;
        match position / 64 {
            0 => Self::new(falling, rising, 0, white),
            1 => Self::new(0, falling, rising, white),
            _ => Self::new(rising, 0, falling, white),
        }
    }

    /// Returns the gamma-corrected color packed as `0xWWRRGGBB`.
    pub fn to_neopixel_word(&self) -> u32 {
        let color = self.gamma_corrected();
        u32::from(color.w) << 24 | u32::from(color.r) << 16 | u32::from(color.g) << 8 | u32::from(color.b)
    }

    /// Applies the sRGB transfer curve to every channel, so that equal steps
    /// in value look like equal steps in brightness.
    pub fn gamma_corrected(&self) -> Self {
        let linear = |r: u8, g: u8, b: u8| -> LinSrgb<u8> {
            let encoded: Srgb<f32> = Srgb::new(r, g, b).into_format();
            encoded.into_linear::<f32>().into_format()
        };
        let rgb = linear(self.r, self.g, self.b);
        let white = linear(self.w, self.w, self.w);
        Self::new(rgb.red, rgb.green, rgb.blue, white.red)
    }
}

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue, saturation, value);
    Srgb::from_color(hsv)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}
