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

#[macro_use]
extern crate log;
#[macro_use]
extern crate custom_error;

pub mod cell;
pub mod color;
pub mod config;
pub mod coords;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod snapshot;

pub use cell::{Cell, Rgb};
pub use coords::Coordinates;
pub use error::{ColorwayError, ColorwayResult};
pub use grid::Grid;
pub use patterns::PatternKind;
pub use snapshot::Snapshot;
