//! Integration tests for colors module

use palette::Srgb;
use rtc_calendar::Rgbw;
use rtc_calendar::colors::{self, WHEEL_MAX};

fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.01;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}

#[test]
fn hsv_creates_primary_colors() {
    let red = colors::hsv(0.0, 1.0, 1.0);
    assert!(colors_equal(red, Srgb::new(1.0, 0.0, 0.0)));

    let green = colors::hsv(120.0, 1.0, 1.0);
    assert!(colors_equal(green, Srgb::new(0.0, 1.0, 0.0)));

    let blue = colors::hsv(240.0, 1.0, 1.0);
    assert!(colors_equal(blue, Srgb::new(0.0, 0.0, 1.0)));
}

#[test]
fn hue_wraps_around_360() {
    assert!(colors_equal(colors::hue(0.0), colors::hue(360.0)));
}

#[test]
fn from_srgb_keeps_white_channel() {
    let green = Rgbw::from_srgb(colors::hue(120.0), 7);
    assert_eq!(green, Rgbw::new(0, 255, 0, 7));

    let gray = Rgbw::from_srgb(colors::hsv(0.0, 0.0, 0.0), 255);
    assert_eq!(gray, Rgbw::new(0, 0, 0, 255));
}

#[test]
fn default_is_black() {
    assert_eq!(Rgbw::default(), Rgbw::BLACK);
    assert_eq!(Rgbw::BLACK.to_neopixel_word(), 0);
}

#[test]
fn packed_nibbles_are_scaled() {
    assert_eq!(Rgbw::from_packed(0xf00f), Rgbw::new(0xf0, 0, 0, 0xf0));
    assert_eq!(Rgbw::from_packed(0x0120), Rgbw::new(0, 0x20, 0x10, 0));
    assert_eq!(Rgbw::from_packed(0), Rgbw::BLACK);
}

#[test]
fn mix_blends_each_channel() {
    let from = Rgbw::new(0, 0, 0, 0);
    let to = Rgbw::new(255, 128, 64, 32);

    assert_eq!(from.mix(&to, 0), from);
    assert_eq!(from.mix(&to, 64), Rgbw::new(63, 32, 16, 8));
    assert_eq!(to.mix(&from, 128), Rgbw::new(127, 64, 32, 16));
    assert_eq!(to.mix(&to, 200), to);
}

#[test]
fn dim_scales_brightness() {
    let color = Rgbw::new(200, 100, 50, 255);
    assert_eq!(color.dim(255), color);
    assert_eq!(color.dim(127), Rgbw::new(100, 50, 25, 127));
    assert_eq!(color.dim(0), Rgbw::new(0, 0, 0, 0));
}

#[test]
fn wheel_ramps_between_primaries() {
    assert_eq!(Rgbw::wheel(0, 0), Rgbw::new(252, 0, 0, 0));
    assert_eq!(Rgbw::wheel(32, 0), Rgbw::new(124, 128, 0, 0));
    assert_eq!(Rgbw::wheel(63, 0), Rgbw::new(0, 252, 0, 0));
    assert_eq!(Rgbw::wheel(127, 0), Rgbw::new(0, 0, 252, 0));
    assert_eq!(Rgbw::wheel(WHEEL_MAX, 10), Rgbw::new(252, 0, 0, 10));
    assert_eq!(Rgbw::wheel(250, 10), Rgbw::wheel(WHEEL_MAX, 10));
}

#[test]
fn neopixel_word_layout() {
    assert_eq!(Rgbw::new(255, 0, 0, 0).to_neopixel_word(), 0x00ff_0000);
    assert_eq!(Rgbw::new(0, 255, 0, 0).to_neopixel_word(), 0x0000_ff00);
    assert_eq!(Rgbw::new(0, 0, 255, 0).to_neopixel_word(), 0x0000_00ff);
    assert_eq!(Rgbw::new(0, 0, 0, 255).to_neopixel_word(), 0xff00_0000);
}

#[test]
fn gamma_darkens_mid_tones() {
    let corrected = Rgbw::new(128, 128, 128, 128).gamma_corrected();
    assert!(corrected.r > 0 && corrected.r < 128);
    assert_eq!(corrected.r, corrected.w);
    assert_eq!(corrected.g, corrected.b);
    assert_eq!(Rgbw::new(255, 255, 255, 255).gamma_corrected(), Rgbw::new(255, 255, 255, 255));
}
