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

use crate::error::{invalid, ColorwayError, ColorwayResult};

/// A position on the board. `x` is the column and `y` is the row, both counted from the top-left
/// corner. Coordinates know nothing about the bounds of any particular `Grid`.
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone, Debug)]
pub struct Coordinates {
    pub x: usize,
    pub y: usize,
}

impl Coordinates {
    pub fn new(x: usize, y: usize) -> Self {
        Coordinates { x, y }
    }

    /// Canonical key for this position. Distinct positions always have distinct keys.
    #[inline]
    pub fn key(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Returns the position shifted by (`dx`, `dy`), or `None` if either component would become
    /// negative. No upper bound is checked.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Coordinates> {
        let x = add_signed(self.x, dx)?;
        let y = add_signed(self.y, dy)?;
        Some(Coordinates { x, y })
    }

    /// Applies each offset in turn, yielding one entry per offset in the same order.
    pub fn add_offsets(&self, offsets: &[(isize, isize)]) -> Vec<Option<Coordinates>> {
        offsets.iter().map(|&(dx, dy)| self.offset(dx, dy)).collect()
    }
}

fn add_signed(base: usize, delta: isize) -> Option<usize> {
    if delta >= 0 {
        base.checked_add(delta as usize)
    } else {
        base.checked_sub(delta.unsigned_abs())
    }
}

impl From<(usize, usize)> for Coordinates {
    fn from((x, y): (usize, usize)) -> Self {
        Coordinates { x, y }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Coordinates {
    type Err = ColorwayError;

    /// Parses the canonical `"x,y"` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').collect();
        if fields.len() != 2 {
            return invalid(format!("expected x,y but got {:?}", s));
        }
        let x = parse_component(fields[0])?;
        let y = parse_component(fields[1])?;
        Ok(Coordinates { x, y })
    }
}

fn parse_component(field: &str) -> ColorwayResult<usize> {
    field
        .trim()
        .parse::<usize>()
        .or_else(|_| invalid(format!("not a coordinate: {:?}", field)))
}
