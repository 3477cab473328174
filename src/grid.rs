/*  Copyright 2016-2021 the Conwayste Developers.
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
use std::fmt::Write as FmtWrite;
use std::mem;

use chrono::{Local, NaiveTime, Timelike};

use crate::cell::{Cell, Rgb};
use crate::color;
use crate::coords::Coordinates;

/// Moore neighborhood, row by row.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The shared, bounded board. It does not wrap around at the edges.
///
/// Every position from (0, 0) to (`max_x`, `max_y`) inclusive has a slot, stored row-major. A
/// slot that was never written holds a dead, colorless cell.
///
/// # Examples
///
/// ```
/// use colorway::{Coordinates, Grid, Rgb};
///
/// let mut grid = Grid::new(15, 15);
/// let teal = Rgb::new(0, 128, 128);
/// for x in 4..7 {
///     grid.claim_cell(Coordinates::new(x, 5), teal);
/// }
/// grid.tick();
/// assert!(grid.get_cell(Coordinates::new(5, 4)).is_alive());
/// assert!(!grid.get_cell(Coordinates::new(4, 5)).is_alive());
/// ```
pub struct Grid {
    max_x:      usize,
    max_y:      usize,
    cells:      Vec<Cell>,
    visited:    Vec<u64>, // per-slot stamp; equal to `epoch` once visited during the current tick
    epoch:      u64,
    generation: usize, // completed ticks
}

impl Grid {
    /// Creates an all-dead grid with inclusive bounds `max_x` and `max_y`.
    pub fn new(max_x: usize, max_y: usize) -> Self {
        let width = max_x + 1;
        let height = max_y + 1;
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell::new(Coordinates::new(x, y)));
            }
        }
        Grid {
            max_x,
            max_y,
            cells,
            visited: vec![0; width * height],
            epoch: 0,
            generation: 0,
        }
    }

    #[inline]
    pub fn max_x(&self) -> usize {
        self.max_x
    }

    #[inline]
    pub fn max_y(&self) -> usize {
        self.max_y
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.max_x + 1
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.max_y + 1
    }

    /// Number of completed `tick` calls.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn in_bounds(&self, coords: Coordinates) -> bool {
        coords.x <= self.max_x && coords.y <= self.max_y
    }

    fn index(&self, coords: Coordinates) -> usize {
        if !self.in_bounds(coords) {
            panic!(
                "coordinates {} outside of grid bounds 0..={},0..={}",
                coords, self.max_x, self.max_y
            );
        }
        coords.y * self.width() + coords.x
    }

    fn coords_of(&self, idx: usize) -> Coordinates {
        Coordinates::new(idx % self.width(), idx / self.width())
    }

    /// Returns the cell at `coords`. Repeated calls return the same slot.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is outside the grid.
    pub fn get_cell(&self, coords: Coordinates) -> &Cell {
        let idx = self.index(coords);
        &self.cells[idx]
    }

    /// Mutable handle to the cell at `coords`. Kept inside the crate so outside writes go through
    /// `set_cell` or `claim_cell`, which can't leave a dead cell holding a color.
    ///
    /// ```compile_fail
    /// use colorway::{Coordinates, Grid, Rgb};
    ///
    /// let mut grid = Grid::new(3, 3);
    /// grid.get_cell_mut(Coordinates::new(1, 1)).set_color(Rgb::new(1, 2, 3));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `coords` is outside the grid.
    pub(crate) fn get_cell_mut(&mut self, coords: Coordinates) -> &mut Cell {
        let idx = self.index(coords);
        &mut self.cells[idx]
    }

    /// Replaces the slot at the cell's own coordinates, whatever it held before.
    ///
    /// # Panics
    ///
    /// Panics if the cell's coordinates are outside the grid.
    pub fn set_cell(&mut self, cell: Cell) {
        let idx = self.index(cell.coordinates());
        self.cells[idx] = cell;
    }

    /// A player's attempt to bring the cell at `coords` to life with `color`. Returns `false` and
    /// leaves the grid alone if the cell is already alive; first write wins.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is outside the grid.
    pub fn claim_cell(&mut self, coords: Coordinates, color: Rgb) -> bool {
        let cell = self.get_cell_mut(coords);
        if cell.is_alive() {
            trace!("claim of {} refused, already alive", coords);
            return false;
        }
        cell.set_color(color);
        cell.set_alive();
        true
    }

    /// Kills every cell. The generation count is kept.
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_dead();
        }
    }

    /// Coordinates of the in-bounds Moore neighbors of `coords`, in `NEIGHBOR_OFFSETS` order.
    pub fn neighbor_coords(&self, coords: Coordinates) -> Vec<Coordinates> {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| coords.offset(dx, dy))
            .filter(|&c| self.in_bounds(c))
            .collect()
    }

    /// The up-to-8 neighboring cells of `coords`. Cells on an edge or corner have fewer.
    ///
    /// # Panics
    ///
    /// Panics if `coords` is outside the grid.
    pub fn neighbors(&self, coords: Coordinates) -> Vec<&Cell> {
        let idx = self.index(coords);
        self.neighbor_indices(idx).map(|n| &self.cells[n]).collect()
    }

    fn neighbor_indices(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let coords = self.coords_of(idx);
        let width = self.width();
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| coords.offset(dx, dy))
            .filter(move |&c| self.in_bounds(c))
            .map(move |c| c.y * width + c.x)
    }

    /// Advances the board by one generation.
    ///
    /// Only live cells and their neighbors are examined; a dead cell with no live neighbor can't
    /// be born. Every decision reads the board as it was before the call, and all changes are
    /// applied together at the end.
    pub fn tick(&mut self) {
        self.epoch += 1;
        let epoch = self.epoch;
        let mut visited = mem::take(&mut self.visited);

        let mut stack: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(idx, _)| idx)
            .collect();

        let mut flips: Vec<(usize, Option<Rgb>)> = vec![];
        let mut parents: Vec<Rgb> = Vec::with_capacity(NEIGHBOR_OFFSETS.len());

        while let Some(idx) = stack.pop() {
            if visited[idx] == epoch {
                continue;
            }
            visited[idx] = epoch;

            parents.clear();
            parents.extend(
                self.neighbor_indices(idx)
                    .map(|n| &self.cells[n])
                    .filter(|cell| cell.is_alive())
                    .filter_map(|cell| cell.color()),
            );
            let live_neighbors = parents.len();

            if self.cells[idx].is_alive() {
                if live_neighbors < 2 || live_neighbors > 3 {
                    flips.push((idx, None));
                }
                stack.extend(self.neighbor_indices(idx).filter(|&n| visited[n] != epoch));
            } else if live_neighbors == 3 {
                flips.push((idx, color::blend(&parents)));
            }
        }

        let (mut births, mut deaths) = (0, 0);
        for (idx, opt_color) in flips {
            let cell = &mut self.cells[idx];
            match opt_color {
                Some(color) => {
                    cell.set_color(color);
                    cell.set_alive();
                    births += 1;
                }
                None => {
                    cell.set_dead();
                    deaths += 1;
                }
            }
        }

        self.visited = visited;
        self.generation += 1;
        debug!(
            "generation {}: {} born, {} died, {} alive",
            self.generation,
            births,
            deaths,
            self.live_count()
        );
    }

    /// All live cells, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.is_alive())
    }

    pub fn live_count(&self) -> usize {
        self.live_cells().count()
    }

    /// Wire form of the board stamped with the current local time. See `serialize_at`.
    pub fn serialize(&self) -> String {
        self.serialize_at(Local::now().time())
    }

    /// Wire form of the board: `HHMMSS` followed by `|x,y,r,g,b` for every live cell, row by
    /// row.
    pub fn serialize_at(&self, time: NaiveTime) -> String {
        let mut out = format!("{:02}{:02}{:02}", time.hour(), time.minute(), time.second());
        for cell in self.live_cells() {
            let coords = cell.coordinates();
            if let Some(color) = cell.color() {
                // writing to a String can't fail
                let _ = write!(out, "|{},{}", coords, color);
            }
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.width()) {
            let mut s = String::with_capacity(row.len());
            for cell in row {
                s.push(if cell.is_alive() { 'o' } else { '.' });
            }
            writeln!(f, "{}", s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    /// Brings each (x, y) to life with `color`.
    pub fn plant(grid: &mut Grid, cells: &[(usize, usize)], color: Rgb) {
        for &(x, y) in cells {
            grid.set_cell(Cell::alive_with(Coordinates::new(x, y), color));
        }
    }

    /// Live positions in row-major order.
    pub fn live_set(grid: &Grid) -> Vec<(usize, usize)> {
        grid.live_cells().map(|c| c.coordinates().key()).collect()
    }

    pub fn sort_row_major(cells: &mut Vec<(usize, usize)>) {
        cells.sort_by_key(|&(x, y)| (y, x));
    }
}

#[cfg(test)]
mod grid_tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn get_cell_is_idempotent() {
        let mut grid = Grid::new(9, 9);
        plant(&mut grid, &[(3, 4)], RED);
        for &(x, y) in &[(3, 4), (0, 0), (9, 9)] {
            let first = grid.get_cell(Coordinates::new(x, y)).clone();
            let second = grid.get_cell(Coordinates::new(x, y)).clone();
            assert_eq!(first, second);
            assert_eq!(first.coordinates(), Coordinates::new(x, y));
        }
    }

    #[test]
    #[should_panic(expected = "outside of grid bounds")]
    fn get_cell_out_of_bounds_panics() {
        let grid = Grid::new(9, 4);
        grid.get_cell(Coordinates::new(10, 0));
    }

    #[test]
    #[should_panic(expected = "outside of grid bounds")]
    fn set_cell_out_of_bounds_panics() {
        let mut grid = Grid::new(9, 4);
        grid.set_cell(Cell::new(Coordinates::new(0, 5)));
    }

    #[test]
    fn bounds_are_inclusive() {
        let grid = Grid::new(0, 0);
        assert_eq!(grid.width(), 1);
        assert_eq!(grid.height(), 1);
        assert!(!grid.get_cell(Coordinates::new(0, 0)).is_alive());
        assert!(grid.neighbors(Coordinates::new(0, 0)).is_empty());
    }

    #[test]
    fn set_cell_overwrites_unconditionally() {
        let mut grid = Grid::new(4, 4);
        let here = Coordinates::new(2, 2);
        grid.set_cell(Cell::alive_with(here, RED));
        grid.set_cell(Cell::alive_with(here, BLUE));
        assert_eq!(grid.get_cell(here).color(), Some(BLUE));

        grid.set_cell(Cell::new(here));
        assert!(!grid.get_cell(here).is_alive());
        assert_eq!(grid.get_cell(here).color(), None);
    }

    #[test]
    fn claim_cell_first_write_wins() {
        let mut grid = Grid::new(4, 4);
        let here = Coordinates::new(1, 3);
        assert!(grid.claim_cell(here, GREEN));
        assert!(!grid.claim_cell(here, RED));
        assert_eq!(grid.get_cell(here).color(), Some(GREEN));
    }

    #[test]
    fn mutable_handle_writes_through() {
        let mut grid = Grid::new(4, 4);
        {
            let cell = grid.get_cell_mut(Coordinates::new(0, 1));
            cell.set_color(RED);
            cell.set_alive();
        }
        assert!(grid.get_cell(Coordinates::new(0, 1)).is_alive());
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside of grid bounds")]
    fn neighbors_out_of_bounds_panics() {
        let grid = Grid::new(5, 5);
        grid.neighbors(Coordinates::new(6, 2));
    }

    #[test]
    fn neighbors_of_a_corner_cell() {
        let grid = Grid::new(5, 5);
        let coords: Vec<(usize, usize)> = grid
            .neighbors(Coordinates::new(5, 0))
            .iter()
            .map(|c| c.coordinates().key())
            .collect();
        assert_eq!(coords, vec![(4, 0), (4, 1), (5, 1)]);
    }

    #[test]
    fn outside_writes_leave_dead_cells_colorless() {
        let mut grid = Grid::new(4, 4);
        let here = Coordinates::new(2, 3);
        grid.claim_cell(here, RED);
        grid.set_cell(Cell::new(here));
        grid.tick();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let cell = grid.get_cell(Coordinates::new(x, y));
                assert_eq!(cell.is_alive(), cell.color().is_some());
            }
        }
    }

    #[test]
    fn neighbor_counts_are_clipped_at_edges() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.neighbors(Coordinates::new(0, 0)).len(), 3);
        assert_eq!(grid.neighbors(Coordinates::new(5, 5)).len(), 3);
        assert_eq!(grid.neighbors(Coordinates::new(0, 3)).len(), 5);
        assert_eq!(grid.neighbors(Coordinates::new(3, 5)).len(), 5);
        assert_eq!(grid.neighbors(Coordinates::new(2, 2)).len(), 8);
    }

    #[test]
    fn neighbors_follow_offset_order() {
        let grid = Grid::new(5, 5);
        let coords: Vec<(usize, usize)> = grid
            .neighbors(Coordinates::new(1, 1))
            .iter()
            .map(|c| c.coordinates().key())
            .collect();
        assert_eq!(
            coords,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (1, 2), (2, 2)]
        );
    }

    #[test]
    fn tick_on_empty_grid_is_a_no_op() {
        let mut grid = Grid::new(20, 10);
        grid.tick();
        assert_eq!(grid.live_count(), 0);
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn block_is_a_still_life() {
        let mut grid = Grid::new(9, 9);
        let block = [(4, 4), (5, 4), (4, 5), (5, 5)];
        plant(&mut grid, &block, GREEN);
        for &(x, y) in &block {
            let live = grid
                .neighbors(Coordinates::new(x, y))
                .iter()
                .filter(|c| c.is_alive())
                .count();
            assert_eq!(live, 3);
        }
        for _ in 0..3 {
            grid.tick();
            assert_eq!(live_set(&grid), block.to_vec());
        }
        assert!(grid.live_cells().all(|c| c.color() == Some(GREEN)));
    }

    #[test]
    fn block_in_a_corner_is_a_still_life() {
        let mut grid = Grid::new(5, 5);
        let block = [(0, 0), (1, 0), (0, 1), (1, 1)];
        plant(&mut grid, &block, RED);
        grid.tick();
        assert_eq!(live_set(&grid), block.to_vec());
    }

    #[test]
    fn blinker_oscillates() {
        let mut grid = Grid::new(10, 10);
        let horizontal = vec![(4, 5), (5, 5), (6, 5)];
        let vertical = vec![(5, 4), (5, 5), (5, 6)];
        plant(&mut grid, &horizontal, BLUE);

        grid.tick();
        assert_eq!(live_set(&grid), vertical);
        grid.tick();
        assert_eq!(live_set(&grid), horizontal);
        assert!(grid.live_cells().all(|c| c.color() == Some(BLUE)));
    }

    #[test]
    fn glider_moves_diagonally_after_four_ticks() {
        let mut grid = Grid::new(19, 19);
        let glider = [(5, 4), (6, 5), (4, 6), (5, 6), (6, 6)];
        plant(&mut grid, &glider, GREEN);

        for _ in 0..4 {
            grid.tick();
        }

        let mut expected: Vec<(usize, usize)> = glider.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        sort_row_major(&mut expected);
        assert_eq!(live_set(&grid), expected);
        assert!(grid.live_cells().all(|c| c.color() == Some(GREEN)));
    }

    #[test]
    fn lone_cell_and_pair_die() {
        let mut grid = Grid::new(10, 10);
        plant(&mut grid, &[(1, 1)], RED);
        plant(&mut grid, &[(7, 7), (8, 7)], RED);
        grid.tick();
        assert_eq!(grid.live_count(), 0);
        assert_eq!(grid.get_cell(Coordinates::new(1, 1)).color(), None);
    }

    #[test]
    fn overcrowded_cell_dies() {
        let mut grid = Grid::new(6, 6);
        // plus sign: the center has 4 live neighbors
        plant(&mut grid, &[(3, 3), (3, 2), (2, 3), (4, 3), (3, 4)], RED);
        grid.tick();
        assert!(!grid.get_cell(Coordinates::new(3, 3)).is_alive());
    }

    #[test]
    fn newborn_color_is_lab_average_of_parents() {
        let mut grid = Grid::new(6, 6);
        grid.set_cell(Cell::alive_with(Coordinates::new(1, 1), RED));
        grid.set_cell(Cell::alive_with(Coordinates::new(3, 1), GREEN));
        grid.set_cell(Cell::alive_with(Coordinates::new(2, 3), BLUE));

        grid.tick();

        // (2, 2) is the only cell that touches all three
        assert_eq!(live_set(&grid), vec![(2, 2)]);
        let expected = color::blend(&[RED, GREEN, BLUE]);
        assert_eq!(grid.get_cell(Coordinates::new(2, 2)).color(), expected);
    }

    #[test]
    fn newborn_of_identical_parents_keeps_color() {
        let mut grid = Grid::new(6, 6);
        let odd = Rgb::new(13, 207, 99);
        plant(&mut grid, &[(1, 1), (3, 1), (2, 3)], odd);
        grid.tick();
        assert_eq!(grid.get_cell(Coordinates::new(2, 2)).color(), Some(odd));
    }

    #[test]
    fn serialize_empty_grid_is_just_the_timestamp() {
        let grid = Grid::new(3, 3);
        let time = NaiveTime::from_hms_opt(7, 5, 9).unwrap();
        assert_eq!(grid.serialize_at(time), "070509");
    }

    #[test]
    fn serialize_lists_live_cells_row_by_row() {
        let mut grid = Grid::new(20, 20);
        grid.set_cell(Cell::alive_with(Coordinates::new(12, 3), Rgb::new(1, 2, 3)));
        grid.set_cell(Cell::alive_with(Coordinates::new(0, 0), Rgb::new(255, 0, 10)));
        let time = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(grid.serialize_at(time), "235900|0,0,255,0,10|12,3,1,2,3");
    }

    #[test]
    fn serialize_segment_count_matches_live_count() {
        let mut grid = Grid::new(9, 9);
        plant(&mut grid, &[(4, 4), (5, 4), (6, 4), (1, 8)], RED);
        let wire = grid.serialize();
        let fields: Vec<&str> = wire.split('|').collect();
        assert_eq!(fields[0].len(), 6);
        assert!(fields[0].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(fields.len() - 1, grid.live_count());
    }

    #[test]
    fn display_draws_live_cells() {
        let mut grid = Grid::new(2, 1);
        plant(&mut grid, &[(1, 0), (2, 1)], RED);
        assert_eq!(grid.to_string(), ".o.\n..o\n");
    }

    #[test]
    fn clear_kills_everything() {
        let mut grid = Grid::new(5, 5);
        plant(&mut grid, &[(1, 1), (2, 2)], RED);
        grid.clear();
        assert_eq!(grid.live_count(), 0);
    }
}
