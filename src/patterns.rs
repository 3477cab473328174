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

//! Dropping well-known patterns into free space on a `Grid`.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cell::Rgb;
use crate::coords::Coordinates;
use crate::grid::Grid;

/// Offsets of the live cells of one orientation of a pattern, relative to its center.
pub type Variation = Vec<(isize, isize)>;

const BLOCK: [(isize, isize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
const BLINKER_HORIZONTAL: [(isize, isize); 3] = [(-1, 0), (0, 0), (1, 0)];
const BLINKER_VERTICAL: [(isize, isize); 3] = [(0, -1), (0, 0), (0, 1)];
// heads down and to the right
const GLIDER: [(isize, isize); 5] = [(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)];

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum PatternKind {
    Block,
    Blinker,
    Glider,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [PatternKind::Block, PatternKind::Blinker, PatternKind::Glider];

    /// Every orientation this pattern can be placed in.
    pub fn variations(self) -> Vec<Variation> {
        match self {
            PatternKind::Block => vec![BLOCK.to_vec()],
            PatternKind::Blinker => vec![BLINKER_HORIZONTAL.to_vec(), BLINKER_VERTICAL.to_vec()],
            PatternKind::Glider => {
                let mut rotations = vec![GLIDER.to_vec()];
                for _ in 1..4 {
                    let last = &rotations[rotations.len() - 1];
                    let turned = last.iter().map(|&(dx, dy)| (-dy, dx)).collect();
                    rotations.push(turned);
                }
                rotations
            }
        }
    }

    /// Whether `center` is far enough from the edges that every variation stays on the grid.
    /// The block extends right and down; the others extend one cell in every direction.
    pub fn is_eligible_center(self, grid: &Grid, center: Coordinates) -> bool {
        match self {
            PatternKind::Block => center.x < grid.max_x() && center.y < grid.max_y(),
            PatternKind::Blinker | PatternKind::Glider => {
                center.x >= 1 && center.y >= 1 && center.x < grid.max_x() && center.y < grid.max_y()
            }
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PatternKind::Block => "block",
            PatternKind::Blinker => "blinker",
            PatternKind::Glider => "glider",
        };
        write!(f, "{}", name)
    }
}

/// Resolves `variation` around `center`, or `None` if any cell would be off the grid.
fn place(grid: &Grid, center: Coordinates, variation: &[(isize, isize)]) -> Option<Vec<Coordinates>> {
    center
        .add_offsets(variation)
        .into_iter()
        .map(|opt_coords| opt_coords.filter(|&c| grid.in_bounds(c)))
        .collect()
}

impl Grid {
    /// Tries to put a block of `color` somewhere random where it fits. Does nothing if there is
    /// no room.
    pub fn try_generate_block(&mut self, color: Rgb) -> bool {
        self.try_generate(PatternKind::Block, color, &mut rand::thread_rng())
    }

    /// Same as `try_generate_block`, for a blinker in either orientation.
    pub fn try_generate_blinker(&mut self, color: Rgb) -> bool {
        self.try_generate(PatternKind::Blinker, color, &mut rand::thread_rng())
    }

    /// Same as `try_generate_block`, for a glider in any of its four rotations.
    pub fn try_generate_glider(&mut self, color: Rgb) -> bool {
        self.try_generate(PatternKind::Glider, color, &mut rand::thread_rng())
    }

    /// Places `kind` in `color` around a randomly chosen dead center where some variation lies
    /// entirely on dead cells. Centers are drawn without replacement, so a full board costs one
    /// pass over the free cells and then gives up. Returns whether anything was placed.
    ///
    /// The placed cells are alive as soon as this returns.
    pub fn try_generate<R: Rng + ?Sized>(&mut self, kind: PatternKind, color: Rgb, rng: &mut R) -> bool {
        let mut candidates: Vec<Coordinates> = self.free_centers(kind).collect();
        candidates.shuffle(rng);
        let variations = kind.variations();

        for (draws, center) in candidates.iter().enumerate() {
            let fitting = self.fitting_variations(*center, &variations);
            if let Some(cells) = fitting.choose(rng) {
                for &c in cells {
                    let cell = self.get_cell_mut(c);
                    cell.set_color(color);
                    cell.set_alive();
                }
                trace!("placed {} at {} after {} draws", kind, center, draws + 1);
                return true;
            }
        }

        trace!("no room for a {} among {} candidates", kind, candidates.len());
        false
    }

    /// The variations around `center` that lie entirely on dead cells, resolved to coordinates.
    fn fitting_variations(&self, center: Coordinates, variations: &[Variation]) -> Vec<Vec<Coordinates>> {
        variations
            .iter()
            .filter_map(|variation| place(self, center, variation))
            .filter(|cells| cells.iter().all(|&c| !self.get_cell(c).is_alive()))
            .collect()
    }

    /// Dead cells that could serve as a center for `kind`.
    fn free_centers(&self, kind: PatternKind) -> impl Iterator<Item = Coordinates> + '_ {
        let width = self.width();
        (0..width * self.height())
            .map(move |idx| Coordinates::new(idx % width, idx / width))
            .filter(move |&c| kind.is_eligible_center(self, c))
            .filter(move |&c| !self.get_cell(c).is_alive())
    }
}
