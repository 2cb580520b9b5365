//! Gradient operations - Pure DOP functions
//!
//! Linear color interpolation over ordered color stops.

use super::gradient_data::{ColorGradient, ColorStop};
use rand::Rng;

/// Create a color stop from byte RGB and normalized alpha
pub fn create_color_stop(position: f32, r: u8, g: u8, b: u8, a: f32) -> ColorStop {
    ColorStop { position, r, g, b, a }
}

/// RGBA of a stop with RGB normalized by 1/255 and alpha passed through
pub fn stop_color(stop: &ColorStop) -> [f32; 4] {
    [
        stop.r as f32 / 255.0,
        stop.g as f32 / 255.0,
        stop.b as f32 / 255.0,
        stop.a,
    ]
}

/// Interpolate a color at fractional position `t`.
///
/// Stops are scanned in order, skipping every stop with `position < t`. The
/// first remaining stop is returned as-is if it is the first stop, otherwise
/// the color is blended channel by channel with the stop before it. If `t`
/// lies past every stop the last color is returned.
///
/// # Panics
/// Panics if `stops` is empty.
pub fn interpolate(stops: &[ColorStop], t: f32) -> [f32; 4] {
    assert!(!stops.is_empty(), "Unexpected stops for linear gradient");

    if stops.len() == 1 {
        return stop_color(&stops[0]);
    }

    for (i, cur) in stops.iter().enumerate() {
        if t > cur.position {
            continue;
        }
        if i == 0 {
            return stop_color(cur);
        }

        let last = &stops[i - 1];
        let last_color = stop_color(last);
        let cur_color = stop_color(cur);
        // Stops sharing a position divide by zero here
        let frac = (t - last.position) / (cur.position - last.position);

        let mut color = [0.0f32; 4];
        for c in 0..4 {
            color[c] = (cur_color[c] - last_color[c]) * frac + last_color[c];
        }
        return color;
    }

    stop_color(&stops[stops.len() - 1])
}

/// Default hypsometric tint: teal lowlands, green midlands, orange peaks
pub fn default_terrain_gradient() -> ColorGradient {
    vec![
        create_color_stop(0.0, 34, 191, 195, 1.0),
        create_color_stop(0.18, 123, 227, 62, 1.0),
        create_color_stop(1.0, 253, 95, 10, 1.0),
    ]
}

/// Random gradient with 3 to 7 evenly spaced opaque stops spanning [0, 1]
pub fn randomized_gradient<R: Rng + ?Sized>(rng: &mut R) -> ColorGradient {
    let intervals: u32 = rng.gen_range(2..=6);

    let gradient: ColorGradient = (0..=intervals)
        .map(|i| {
            create_color_stop(
                i as f32 / intervals as f32,
                rng.gen(),
                rng.gen(),
                rng.gen(),
                1.0,
            )
        })
        .collect();

    log::debug!(
        "[randomized_gradient] Generated gradient with {} stops",
        gradient.len()
    );

    gradient
}
