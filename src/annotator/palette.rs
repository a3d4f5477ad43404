use image::Rgb;

use crate::domain::HIGH_SIMILARITY_THRESHOLD;

pub const OVERVIEW: Rgb<u8> = Rgb([0, 255, 0]);
pub const LABEL: Rgb<u8> = Rgb([0, 255, 0]);
pub const NEUTRAL: Rgb<u8> = Rgb([128, 128, 128]);
pub const SELECTED: Rgb<u8> = Rgb([0, 0, 255]);
pub const ALERT: Rgb<u8> = Rgb([255, 0, 0]);

/// Solid alert above the high similarity threshold, otherwise a green to red blend.
pub fn confidence_color(confidence: f64) -> Rgb<u8> {
    if confidence > HIGH_SIMILARITY_THRESHOLD {
        return ALERT;
    }
    let ratio = (confidence / 100.0).clamp(0.0, 1.0);
    let red = (255.0 * ratio) as u8;
    let green = (255.0 * (1.0 - ratio)) as u8;
    Rgb([red, green, 0])
}
