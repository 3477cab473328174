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

//! Headless driver for a shared board: ticks on a timer, drops patterns on behalf of the
//! configured players, and prints every frame in wire format to stdout.

#[macro_use]
extern crate log;

use std::io::{self, Write};
use std::process::exit;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Local;
use clap::{App, Arg};
use log::LevelFilter;
use rand::seq::SliceRandom;
use tokio::time as TT;

use colorway::config::{Settings, CONFIG_FILE_PATH};
use colorway::{Grid, PatternKind};

type SharedGrid = Arc<Mutex<Grid>>;

fn init_logging() {
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:5}] - {}",
                Local::now().format("%a %Y-%m-%d %H:%M:%S%.6f"),
                record.level(),
                record.args(),
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
}

/// Advances the board and returns the frame to broadcast. The lock is held across both so no
/// reader sees a half-applied generation.
fn tick_and_serialize(grid: &SharedGrid) -> String {
    let mut grid = grid.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    grid.tick();
    grid.serialize()
}

fn drop_random_pattern(grid: &SharedGrid, settings: &Settings) {
    let mut rng = rand::thread_rng();
    let (player, kind) = match (settings.players.choose(&mut rng), PatternKind::ALL.choose(&mut rng)) {
        (Some(player), Some(kind)) => (player, *kind),
        _ => return,
    };
    let mut grid = grid.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if grid.try_generate(kind, player.rgb(), &mut rng) {
        debug!("{} placed a {}", player.name, kind);
    } else {
        info!("no room for {}'s {}", player.name, kind);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + 'static>> {
    color_backtrace::install();
    init_logging();

    let matches = App::new("lifeloop")
        .about("runs a shared colored Game of Life board and prints each generation")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .help(&format!("path to settings file [default {}]", CONFIG_FILE_PATH))
                .takes_value(true),
        )
        .arg(
            Arg::with_name("generations")
                .short("g")
                .long("generations")
                .help("stop after this many generations; overrides the settings file")
                .takes_value(true),
        )
        .get_matches();

    let config_path = matches.value_of("config").unwrap_or(CONFIG_FILE_PATH);
    let mut settings = Settings::load(config_path).unwrap_or_else(|e| {
        error!("Error while loading {:?}: {}", config_path, e);
        exit(1);
    });
    if let Some(gen_str) = matches.value_of("generations") {
        settings.simulation.generations = gen_str.parse::<usize>().unwrap_or_else(|e| {
            error!("Error while attempting to parse {:?} as generation count: {:?}", gen_str, e);
            exit(1);
        });
    }

    info!(
        "board {}x{}, {} player(s), tick every {}ms",
        settings.grid.max_x + 1,
        settings.grid.max_y + 1,
        settings.players.len(),
        settings.simulation.tick_interval_ms
    );

    let grid: SharedGrid = Arc::new(Mutex::new(Grid::new(settings.grid.max_x, settings.grid.max_y)));
    drop_random_pattern(&grid, &settings);

    let mut tick_interval = TT::interval(Duration::from_millis(settings.simulation.tick_interval_ms));
    let mut pattern_interval = TT::interval(Duration::from_millis(settings.simulation.pattern_interval_ms));

    let stdout = io::stdout();
    let mut generations = 0;
    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                let frame = tick_and_serialize(&grid);
                writeln!(stdout.lock(), "{}", frame)?;
                generations += 1;
                if settings.simulation.generations != 0 && generations >= settings.simulation.generations {
                    info!("stopping after {} generations", generations);
                    break;
                }
            }
            _ = pattern_interval.tick() => {
                drop_random_pattern(&grid, &settings);
            }
        }
    }

    Ok(())
}
