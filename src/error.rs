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

// Only text parsing and config loading can fail recoverably. Bad coordinates and colors handed to
// the engine itself are caller bugs and panic instead.
custom_error! {pub ColorwayError
    InvalidData {reason: String} = "ColorwayError->InvalidData->{reason}",
    Io          {reason: String} = "ColorwayError->Io->{reason}"
}

pub type ColorwayResult<T> = ::std::result::Result<T, ColorwayError>;

impl PartialEq for ColorwayError {
    fn eq(&self, other: &ColorwayError) -> bool {
        use ColorwayError::*;
        match (self, other) {
            (InvalidData { reason: self_reason }, InvalidData { reason: other_reason }) => self_reason == other_reason,
            (Io { reason: self_reason }, Io { reason: other_reason }) => self_reason == other_reason,
            _ => false,
        }
    }
}

impl From<std::io::Error> for ColorwayError {
    fn from(e: std::io::Error) -> Self {
        ColorwayError::Io { reason: e.to_string() }
    }
}

impl From<toml::de::Error> for ColorwayError {
    fn from(e: toml::de::Error) -> Self {
        ColorwayError::InvalidData {
            reason: format!("bad config: {}", e),
        }
    }
}

/// Shorthand used by the parsers.
pub(crate) fn invalid<T>(reason: String) -> ColorwayResult<T> {
    Err(ColorwayError::InvalidData { reason })
}
