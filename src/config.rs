/*  Copyright 2019 the Conwayste Developers.
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

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cell::Rgb;
use crate::error::{invalid, ColorwayResult};

pub const CONFIG_FILE_PATH: &str = "colorway.toml";

/// Settings for driving a shared board. Every field has a default, so an empty file (or no file
/// at all) is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub grid:       GridSettings,
    pub simulation: SimulationSettings,
    pub players:    Vec<PlayerSettings>,
}

/// Decodes from the [grid] section. Bounds are inclusive.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct GridSettings {
    pub max_x: usize,
    pub max_y: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        GridSettings { max_x: 63, max_y: 31 }
    }
}

/// Timing of the tick loop.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationSettings {
    pub tick_interval_ms:    u64,
    pub pattern_interval_ms: u64,
    pub generations:         usize, // 0 runs forever
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            tick_interval_ms:    200,
            pattern_interval_ms: 1000,
            generations:         0,
        }
    }
}

/// One [[players]] entry. The color is kept as text until `Settings::validate`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlayerSettings {
    pub name:  String,
    pub color: String,
}

impl PlayerSettings {
    /// # Panics
    ///
    /// Panics if the color doesn't parse; `Settings::validate` rules that out.
    pub fn rgb(&self) -> Rgb {
        match self.color.parse() {
            Ok(rgb) => rgb,
            Err(e) => panic!("player {} has an unvalidated color: {}", self.name, e),
        }
    }
}

impl Settings {
    /// Default settings with two players.
    pub fn new() -> Self {
        Settings {
            players: vec![
                PlayerSettings {
                    name:  "JohnConway".to_owned(),
                    color: "#e6194b".to_owned(),
                },
                PlayerSettings {
                    name:  "Gosper".to_owned(),
                    color: "60,180,75".to_owned(),
                },
            ],
            ..Default::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> ColorwayResult<Settings> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from `path`. A missing file gives the defaults from `Settings::new`.
    pub fn load<P: AsRef<Path>>(path: P) -> ColorwayResult<Settings> {
        match fs::read_to_string(path.as_ref()) {
            Ok(contents) => Settings::from_toml_str(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} not found, using default settings", path.as_ref().display());
                Ok(Settings::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn to_toml_string(&self) -> ColorwayResult<String> {
        toml::to_string(self).or_else(|e| invalid(format!("cannot encode settings: {}", e)))
    }

    /// Checks what serde can't: player colors must parse, and the intervals must be nonzero.
    pub fn validate(&self) -> ColorwayResult<()> {
        for player in &self.players {
            if let Err(e) = player.color.parse::<Rgb>() {
                return invalid(format!("player {}: {}", player.name, e));
            }
        }
        if self.simulation.tick_interval_ms == 0 || self.simulation.pattern_interval_ms == 0 {
            return invalid("simulation intervals must be nonzero".to_owned());
        }
        Ok(())
    }
}
