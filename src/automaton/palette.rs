//! State-to-color lookup tables

use super::State;
use serde::{Deserialize, Serialize};

/// An RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(192, 192, 192);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);

    fn channels(self) -> [i32; 3] {
        [self.0 as i32, self.1 as i32, self.2 as i32]
    }
}

/// Ordered colors where index `i` is the color of state `i`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, state: State) -> Option<Rgb> {
        self.colors.get(state as usize).copied()
    }

    /// True when every state up to and including `max_state` has a color
    pub fn covers(&self, max_state: State) -> bool {
        (max_state as usize) < self.colors.len()
    }

    /// White dead, gray just-died, black alive
    pub fn life() -> Self {
        Self::new(vec![Rgb::WHITE, Rgb::GRAY, Rgb::BLACK])
    }

    /// Black for dead, then red fading to yellow across states `1..max_generation`
    pub fn generations(max_generation: u32) -> Self {
        let size = max_generation.saturating_sub(1) as usize;
        let mut colors = vec![Rgb::BLACK; size + 1];
        put_color_range(&mut colors, 1, Rgb::RED, Rgb::YELLOW, size);
        Self::new(colors)
    }

    /// Tri-channel modular ramp, brightest state first
    pub fn rug_spectrum() -> Self {
        Self::ramp(|i| Rgb(((3 * i) % 256) as u8, ((5 * i) % 256) as u8, ((7 * i) % 256) as u8))
    }

    pub fn rug_grayscale() -> Self {
        Self::ramp(|i| {
            let v = ((8 * i) % 256) as u8;
            Rgb(v, v, v)
        })
    }

    /// 256 colors generated for `i` running from 255 down to 0
    fn ramp(color: impl Fn(u32) -> Rgb) -> Self {
        Self::new((0..=255u32).rev().map(color).collect())
    }
}

/// Linear interpolation of `size` colors starting at `from`
///
/// Each channel advances by `floor((to - from) / size)` per entry and wraps
/// modulo 256, so the last entry need not equal `to`.
pub fn color_range(from: Rgb, to: Rgb, size: usize) -> Vec<Rgb> {
    if size == 0 {
        return Vec::new();
    }

    let start = from.channels();
    let target = to.channels();
    let step: Vec<i32> = (0..3)
        .map(|c| ((target[c] - start[c]) as f64 / size as f64).floor() as i32)
        .collect();

    std::iter::successors(Some(start), |prev| {
        Some([
            (prev[0] + step[0]).rem_euclid(256),
            (prev[1] + step[1]).rem_euclid(256),
            (prev[2] + step[2]).rem_euclid(256),
        ])
    })
    .take(size)
    .map(|[r, g, b]| Rgb(r as u8, g as u8, b as u8))
    .collect()
}

/// Overwrite `colors[start..start + size]` with a color range, growing the
/// vector if needed
pub fn put_color_range(colors: &mut Vec<Rgb>, start: usize, from: Rgb, to: Rgb, size: usize) {
    if colors.len() < start + size {
        colors.resize(start + size, Rgb::BLACK);
    }
    for (slot, color) in colors[start..].iter_mut().zip(color_range(from, to, size)) {
        *slot = color;
    }
}
