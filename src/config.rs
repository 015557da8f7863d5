//! Match configuration: grid dimensions and the fleet.

use serde::Deserialize;

use crate::bitboard::BitBoard;
use crate::common::{ConfigError, ShipId};
use crate::ship::ShipSpec;

pub const MAX_ROWS: usize = 10;
pub const MAX_COLS: usize = 10;

/// Side length of the bitboards that back every grid-shaped set.
pub(crate) const MASK_SIDE: usize = if MAX_ROWS > MAX_COLS { MAX_ROWS } else { MAX_COLS };

/// Point set large enough for any legal grid.
pub type Mask = BitBoard<u128, MASK_SIDE>;

/// Markers a ship symbol may never collide with.
pub const EMPTY_MARKER: char = '.';
pub const MISS_MARKER: char = 'o';
pub const HIT_MARKER: char = 'X';

/// Validated grid dimensions and fleet for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    rows: usize,
    cols: usize,
    fleet: Vec<ShipSpec>,
}

impl MatchConfig {
    /// Start a configuration with an empty fleet.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows < 1 || rows > MAX_ROWS {
            return Err(ConfigError::RowsOutOfRange(rows));
        }
        if cols < 1 || cols > MAX_COLS {
            return Err(ConfigError::ColsOutOfRange(cols));
        }
        Ok(Self {
            rows,
            cols,
            fleet: Vec::new(),
        })
    }

    /// The classic 10×10 game with five ships.
    pub fn standard() -> Self {
        let fleet = vec![
            ShipSpec::new(5, 'A', "aircraft carrier"),
            ShipSpec::new(4, 'B', "battleship"),
            ShipSpec::new(3, 'D', "destroyer"),
            ShipSpec::new(3, 'S', "submarine"),
            ShipSpec::new(2, 'P', "patrol boat"),
        ];
        Self {
            rows: 10,
            cols: 10,
            fleet,
        }
    }

    /// Validate and append a ship, returning its id.
    pub fn add_ship(
        &mut self,
        length: usize,
        symbol: char,
        name: impl Into<String>,
    ) -> Result<ShipId, ConfigError> {
        if length < 1 || (length > self.rows && length > self.cols) {
            return Err(ConfigError::BadShipLength(length));
        }
        if !symbol.is_ascii() || symbol.is_ascii_control() {
            return Err(ConfigError::UnprintableSymbol(symbol));
        }
        if matches!(symbol, EMPTY_MARKER | MISS_MARKER | HIT_MARKER) {
            return Err(ConfigError::ReservedSymbol(symbol));
        }
        if self.fleet.iter().any(|s| s.symbol() == symbol) {
            return Err(ConfigError::DuplicateSymbol(symbol));
        }
        let cells = self.total_ship_cells() + length;
        let area = self.rows * self.cols;
        if cells > area {
            return Err(ConfigError::FleetTooLarge { cells, area });
        }
        self.fleet.push(ShipSpec::new(length, symbol, name));
        Ok(self.fleet.len() - 1)
    }

    /// Builder form of [`add_ship`](Self::add_ship).
    pub fn with_ship(
        mut self,
        length: usize,
        symbol: char,
        name: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        self.add_ship(length, symbol, name)?;
        Ok(self)
    }

    /// Parse and validate a JSON config of the form
    /// `{"rows": 10, "cols": 10, "ships": [{"length": 5, "symbol": "A", "name": "carrier"}]}`.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::try_from(file)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn fleet(&self) -> &[ShipSpec] {
        &self.fleet
    }

    pub fn ship(&self, id: ShipId) -> Option<&ShipSpec> {
        self.fleet.get(id)
    }

    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().map(ShipSpec::length).sum()
    }

    /// Skip validation, for exercising what the checks normally prevent.
    #[cfg(test)]
    pub(crate) fn unchecked(rows: usize, cols: usize, fleet: Vec<ShipSpec>) -> Self {
        Self { rows, cols, fleet }
    }
}

/// On-disk shape of a match configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    rows: usize,
    cols: usize,
    ships: Vec<ShipEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ShipEntry {
    length: usize,
    symbol: char,
    name: String,
}

impl TryFrom<ConfigFile> for MatchConfig {
    type Error = ConfigError;

    fn try_from(file: ConfigFile) -> Result<Self, ConfigError> {
        if file.ships.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        let mut config = MatchConfig::new(file.rows, file.cols)?;
        for ship in file.ships {
            config.add_ship(ship.length, ship.symbol, ship.name)?;
        }
        Ok(config)
    }
}
