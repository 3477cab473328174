/*  Copyright 2017-2021 the Conwayste Developers.
 *
 *  This file is part of colorway.
 *
 *  colorway is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  colorway is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with colorway.  If not, see <http://www.gnu.org/licenses/>. */

//! CIE L\*a\*b\* conversion for blending the colors of parent cells into a newborn cell.
//!
//! Colors go sRGB -> linear RGB -> XYZ (D65) -> Lab and back. Averaging in Lab approximates how
//! people perceive a mix of colors better than averaging sRGB bytes.

use crate::cell::Rgb;

// D65 reference white
const WHITE_X: f64 = 0.950_47;
const WHITE_Y: f64 = 1.0;
const WHITE_Z: f64 = 1.088_83;

const DELTA: f64 = 6.0 / 29.0;

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub fn from_rgb(rgb: Rgb) -> Self {
        let r = srgb_to_linear(rgb.r);
        let g = srgb_to_linear(rgb.g);
        let b = srgb_to_linear(rgb.b);

        let x = 0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b;
        let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
        let z = 0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b;

        let fx = lab_f(x / WHITE_X);
        let fy = lab_f(y / WHITE_Y);
        let fz = lab_f(z / WHITE_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Converts back to sRGB, rounding each channel to the nearest integer. Colors outside the
    /// sRGB gamut are clamped.
    pub fn to_rgb(self) -> Rgb {
        let fy = (self.l + 16.0) / 116.0;
        let fx = fy + self.a / 500.0;
        let fz = fy - self.b / 200.0;

        let x = WHITE_X * lab_f_inv(fx);
        let y = WHITE_Y * lab_f_inv(fy);
        let z = WHITE_Z * lab_f_inv(fz);

        let r = 3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z;
        let g = -0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z;
        let b = 0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z;

        Rgb::new(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
    }
}

impl From<Rgb> for Lab {
    fn from(rgb: Rgb) -> Self {
        Lab::from_rgb(rgb)
    }
}

/// Averages `colors` componentwise in Lab space. Returns `None` for an empty slice.
pub fn blend(colors: &[Rgb]) -> Option<Rgb> {
    if colors.is_empty() {
        return None;
    }
    let n = colors.len() as f64;
    let (l, a, b) = colors.iter().map(|&c| Lab::from_rgb(c)).fold((0.0, 0.0, 0.0), |acc, lab| {
        (acc.0 + lab.l, acc.1 + lab.a, acc.2 + lab.b)
    });
    Some(
        Lab {
            l: l / n,
            a: a / n,
            b: b / n,
        }
        .to_rgb(),
    )
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> u8 {
    let c = c.max(0.0).min(1.0);
    let v = if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).round().max(0.0).min(255.0) as u8
}

fn lab_f(t: f64) -> f64 {
    if t > DELTA * DELTA * DELTA {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

fn lab_f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}
