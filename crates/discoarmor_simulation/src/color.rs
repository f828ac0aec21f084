//! Pure color math для disco armor
//!
//! Единственная "алгоритмика" модуля: hue → RGB конверсия
//! (HSB с saturation = 1, brightness = 1). Детерминированная,
//! без side effects, не зависит от host state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// RGB цвет с 8-bit каналами (цвет кожаной брони)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// HSB → RGB при saturation = 1, brightness = 1.
///
/// Вход — hue в [0, 1), уже wrapped (1.0 сюда не попадает,
/// см. `DiscoState::current_hue`). `hue_to_rgb(0.0)` = чистый красный.
///
/// Квантование каналов — `(x * 255 + 0.5) as u8`, как в эталонной
/// HSB конверсии (полукруглое округление вверх).
pub fn hue_to_rgb(hue: f64) -> Rgb {
    debug_assert!((0.0..1.0).contains(&hue), "hue must be pre-wrapped: {hue}");

    // Сектор цветового круга: h ∈ [0, 6), f — позиция внутри сектора
    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let q = 1.0 - f;

    let (r, g, b) = match h as u32 {
        0 => (1.0, f, 0.0),
        1 => (q, 1.0, 0.0),
        2 => (0.0, 1.0, f),
        3 => (0.0, q, 1.0),
        4 => (f, 0.0, 1.0),
        _ => (1.0, 0.0, q),
    };

    Rgb::new(channel(r), channel(g), channel(b))
}

fn channel(x: f64) -> u8 {
    (x * 255.0 + 0.5) as u8
}
