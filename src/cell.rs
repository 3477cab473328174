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

use std::fmt;
use std::str::FromStr;

use crate::coords::Coordinates;
use crate::error::{invalid, ColorwayError, ColorwayResult};

/// An sRGB color, one byte per channel.
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Builds a color from wider integers.
    ///
    /// # Panics
    ///
    /// Panics if any channel is outside `0..=255`.
    pub fn checked(r: i64, g: i64, b: i64) -> Self {
        let channel = |name: &str, value: i64| -> u8 {
            if value < 0 || value > 255 {
                panic!("color channel {} out of range: {}", name, value);
            }
            value as u8
        };
        Rgb {
            r: channel("r", r),
            g: channel("g", g),
            b: channel("b", b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorwayError;

    /// Accepts `"r,g,b"` with decimal channels or `"#rrggbb"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return invalid(format!("expected #rrggbb but got {:?}", s));
            }
            let channel = |i: usize| -> ColorwayResult<u8> {
                u8::from_str_radix(&hex[i..i + 2], 16).or_else(|_| invalid(format!("bad hex color {:?}", s)))
            };
            return Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let fields: Vec<&str> = s.split(',').collect();
        if fields.len() != 3 {
            return invalid(format!("expected r,g,b but got {:?}", s));
        }
        let mut channels = [0u8; 3];
        for (dst, field) in channels.iter_mut().zip(fields.iter()) {
            *dst = field
                .trim()
                .parse::<u8>()
                .or_else(|_| invalid(format!("color channel must be 0-255: {:?}", field)))?;
        }
        Ok(Rgb::new(channels[0], channels[1], channels[2]))
    }
}

/// One slot of the board. A cell is alive exactly when it has a color.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Cell {
    coords: Coordinates,
    alive:  bool,
    color:  Option<Rgb>,
}

impl Cell {
    /// Creates a dead, colorless cell at `coords`.
    pub fn new(coords: Coordinates) -> Self {
        Cell {
            coords,
            alive: false,
            color: None,
        }
    }

    /// Convenience constructor for a live cell of the given color.
    pub fn alive_with(coords: Coordinates, color: Rgb) -> Self {
        let mut cell = Cell::new(coords);
        cell.set_color(color);
        cell.set_alive();
        cell
    }

    /// Sets the color without touching the alive flag. A dead cell may be colored in preparation
    /// for `set_alive`.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = Some(color);
    }

    /// Marks the cell alive.
    ///
    /// # Panics
    ///
    /// Panics if no color has been set.
    pub fn set_alive(&mut self) {
        assert!(
            self.color.is_some(),
            "cell at {} cannot become alive without a color",
            self.coords
        );
        self.alive = true;
    }

    /// Marks the cell dead and forgets its color.
    pub fn set_dead(&mut self) {
        self.alive = false;
        self.color = None;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    #[inline]
    pub fn coordinates(&self) -> Coordinates {
        self.coords
    }
}
