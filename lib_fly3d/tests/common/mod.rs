#![allow(dead_code)]

/// One opaque red pixel followed by one opaque white pixel (2x1 RGBA).
pub const RED_WHITE_2X1: [u8; 8] = [255, 0, 0, 255, 255, 255, 255, 255];

/// The image block the reference converter produces for
/// [`RED_WHITE_2X1`]: marker 2, width 2, height 1, reserved 0, then
/// red (0xF800) and white (0xFFFF) big-endian.
pub const RED_WHITE_2X1_BLOCK: [u8; 11] = [
    0x02, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0xF8, 0x00, 0xFF, 0xFF,
];

/// A short but realistic G-code fragment.
pub const GCODE: &[u8] = b"G1 X10\n";

/// Builds a w*h RGBA buffer where every pixel is `rgba`.
pub fn solid_rgba(width: u16, height: u16, rgba: [u8; 4]) -> Vec<u8> {
    rgba.repeat(width as usize * height as usize)
}
