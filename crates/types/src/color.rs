//! Color helpers for block foregrounds.

/// Map a load fraction onto a green → yellow → red gradient.
///
/// `0.0` is `#00ff00`, `0.5` is `#ffff00` and anything at or above `1.0`
/// is `#ff0000`. Negative and NaN inputs are treated as `0.0`.
pub fn gradient_color(fraction: f64) -> String {
    let n = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };

    let mut r = (255.0 * (n * 2.0)) as u32;
    let mut g = 255u32;

    if r >= 255 {
        r = 255;
        g = (255.0 * ((1.0 - n) * 2.0)) as u32;
    }
    g = g.min(255);

    format!("#{:02x}{:02x}{:02x}", r, g, 0)
}
