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

use chrono::{NaiveTime, Timelike};

use crate::cell::{Cell, Rgb};
use crate::coords::Coordinates;
use crate::error::{invalid, ColorwayError, ColorwayResult};
use crate::grid::Grid;

/// The decoded form of `Grid::serialize` output: a timestamp plus the live cells.
///
/// # Examples
///
/// ```
/// use colorway::{Coordinates, Rgb, Snapshot};
///
/// let snap: Snapshot = "120005|3,4,255,0,0".parse().unwrap();
/// assert_eq!(snap.cells, vec![(Coordinates::new(3, 4), Rgb::new(255, 0, 0))]);
/// assert_eq!(snap.to_string(), "120005|3,4,255,0,0");
/// ```
#[derive(PartialEq, Clone, Debug)]
pub struct Snapshot {
    pub time:  NaiveTime,
    pub cells: Vec<(Coordinates, Rgb)>,
}

impl Snapshot {
    /// Captures the live cells of `grid`, stamped with `time`.
    pub fn capture(grid: &Grid, time: NaiveTime) -> Self {
        let cells = grid
            .live_cells()
            .filter_map(|cell| cell.color().map(|color| (cell.coordinates(), color)))
            .collect();
        Snapshot { time, cells }
    }

    /// Replaces the contents of `grid` with the cells of this snapshot.
    ///
    /// # Panics
    ///
    /// Panics if any cell lies outside `grid`.
    pub fn apply_to(&self, grid: &mut Grid) {
        grid.clear();
        for &(coords, color) in &self.cells {
            grid.set_cell(Cell::alive_with(coords, color));
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}{:02}{:02}",
            self.time.hour(),
            self.time.minute(),
            self.time.second()
        )?;
        for (coords, color) in &self.cells {
            write!(f, "|{},{}", coords, color)?;
        }
        Ok(())
    }
}

fn parse_time(stamp: &str) -> ColorwayResult<NaiveTime> {
    if stamp.len() != 6 || !stamp.chars().all(|c| c.is_ascii_digit()) {
        return invalid(format!("timestamp must be HHMMSS: {:?}", stamp));
    }
    // all ASCII digits, so these parse
    let part = |i: usize| stamp[i..i + 2].parse::<u32>().unwrap_or(0);
    match NaiveTime::from_hms_opt(part(0), part(2), part(4)) {
        Some(time) => Ok(time),
        None => invalid(format!("no such time of day: {:?}", stamp)),
    }
}

fn parse_cell(segment: &str) -> ColorwayResult<(Coordinates, Rgb)> {
    let fields: Vec<&str> = segment.split(',').collect();
    if fields.len() != 5 {
        return invalid(format!("expected x,y,r,g,b but got {:?}", segment));
    }
    let coords = fields[..2].join(",").parse::<Coordinates>()?;
    let color = fields[2..].join(",").parse::<Rgb>()?;
    Ok((coords, color))
}

impl FromStr for Snapshot {
    type Err = ColorwayError;

    fn from_str(wire: &str) -> Result<Self, Self::Err> {
        let mut segments = wire.trim_end().split('|');
        let time = parse_time(segments.next().unwrap_or(""))?;
        let cells = segments.map(parse_cell).collect::<ColorwayResult<Vec<_>>>()?;
        Ok(Snapshot { time, cells })
    }
}
