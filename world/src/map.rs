//! Tile-grid parsing and the authored enemy path.

use road_defence_core::{CellCoord, WorldPoint};
use thiserror::Error;

/// Failures raised while parsing a map definition.
///
/// Every variant is fatal at load time: the world refuses to construct from
/// partial data.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// The map text contained no size header line.
    #[error("map text is empty; expected a `width:height` header")]
    MissingHeader,
    /// The size header could not be parsed into two positive integers.
    #[error("malformed size header `{header}`; expected `width:height`")]
    MalformedHeader {
        /// Raw header line as found in the map text.
        header: String,
    },
    /// The number of tile rows does not match the declared height.
    #[error("expected {expected} tile rows, found {found}")]
    RowCountMismatch {
        /// Height declared by the header.
        expected: u32,
        /// Number of rows actually present.
        found: usize,
    },
    /// A tile row does not match the declared width.
    #[error("row {row} does not match the declared width of {expected}")]
    RowLengthMismatch {
        /// Zero-based index of the offending row.
        row: u32,
        /// Width declared by the header.
        expected: u32,
    },
    /// A character outside the tile alphabet was encountered.
    #[error("unknown tile `{tile}` at column {column}, row {row}")]
    UnknownTile {
        /// Offending character.
        tile: char,
        /// Zero-based column of the character.
        column: u32,
        /// Zero-based row of the character.
        row: u32,
    },
    /// Fewer than two numbered road tiles were found.
    #[error("a path needs at least a start and an end waypoint, found {found}")]
    MissingEndpoints {
        /// Number of numbered tiles actually found.
        found: usize,
    },
    /// The numbered tiles do not form a contiguous id sequence from zero.
    #[error("waypoint ids must be contiguous from zero; expected {expected}, found {found}")]
    BrokenWaypointSequence {
        /// Id required at this position of the sorted sequence.
        expected: u32,
        /// Id actually found.
        found: u32,
    },
}

/// Failures raised by waypoint queries against the authored path.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The queried id lies beyond the authored path.
    #[error("waypoint {id} is outside the authored path")]
    OutOfRange {
        /// Id provided by the caller.
        id: u32,
    },
}

/// Fixed point on the authored path, identified by an ordinal id.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    id: u32,
    position: WorldPoint,
}

impl Waypoint {
    /// Ordinal identifier of the waypoint along the path.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// World-space position of the waypoint.
    #[must_use]
    pub const fn position(&self) -> WorldPoint {
        self.position
    }
}

/// Ordered sequence of waypoints derived once from the tile layout.
///
/// Traversal order is determined by the ids authored into the map, not by
/// tile positions. The graph never mutates after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct PathGraph {
    start: Waypoint,
    end: Waypoint,
    interior: Vec<Waypoint>,
}

impl PathGraph {
    /// Waypoint enemies spawn at.
    #[must_use]
    pub const fn start(&self) -> Waypoint {
        self.start
    }

    /// Terminal waypoint guarding the player base.
    #[must_use]
    pub const fn end(&self) -> Waypoint {
        self.end
    }

    /// Number of checkpoints strictly between start and end.
    #[must_use]
    pub fn interior_count(&self) -> u32 {
        self.interior.len() as u32
    }

    /// Returns the waypoint that follows the one with the provided id.
    ///
    /// Advancing past the last interior checkpoint yields the end waypoint;
    /// ids beyond that are an [`PathError::OutOfRange`] error.
    pub fn next_waypoint(&self, id: u32) -> Result<Waypoint, PathError> {
        if let Some(waypoint) = self.interior.get(id as usize) {
            return Ok(*waypoint);
        }
        if id as usize == self.interior.len() {
            return Ok(self.end);
        }
        Err(PathError::OutOfRange { id })
    }
}

/// Parsed map: the authored path plus the buildable ground cells.
#[derive(Clone, Debug, PartialEq)]
pub struct MapLayout {
    columns: u32,
    rows: u32,
    path: PathGraph,
    ground: Vec<CellCoord>,
}

impl MapLayout {
    /// Parses a textual map definition.
    ///
    /// The first line declares `width:height`; each following row holds one
    /// character per column: `#` buildable ground, `$` road, and digits road
    /// tiles that double as numbered waypoints.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or(MapError::MissingHeader)?;
        let (columns, rows) = parse_header(header)?;

        let body: Vec<&str> = lines.collect();
        if body.len() != rows as usize {
            return Err(MapError::RowCountMismatch {
                expected: rows,
                found: body.len(),
            });
        }

        let mut ground = Vec::new();
        let mut numbered: Vec<Waypoint> = Vec::new();

        for (row_index, line) in body.iter().enumerate() {
            let row = row_index as u32;
            if line.chars().count() != columns as usize {
                return Err(MapError::RowLengthMismatch {
                    row,
                    expected: columns,
                });
            }

            for (column_index, tile) in line.chars().enumerate() {
                let cell = CellCoord::new(column_index as u32, row);
                match tile {
                    '#' => ground.push(cell),
                    '$' => {}
                    '0'..='9' => numbered.push(Waypoint {
                        id: tile as u32 - '0' as u32,
                        position: cell.center(),
                    }),
                    other => {
                        return Err(MapError::UnknownTile {
                            tile: other,
                            column: cell.column(),
                            row,
                        })
                    }
                }
            }
        }

        numbered.sort_by_key(Waypoint::id);
        if numbered.len() < 2 {
            return Err(MapError::MissingEndpoints {
                found: numbered.len(),
            });
        }
        for (index, waypoint) in numbered.iter().enumerate() {
            let expected = index as u32;
            if waypoint.id != expected {
                return Err(MapError::BrokenWaypointSequence {
                    expected,
                    found: waypoint.id,
                });
            }
        }

        let start = numbered.remove(0);
        let end = numbered.pop().ok_or(MapError::MissingEndpoints { found: 1 })?;

        Ok(Self {
            columns,
            rows,
            path: PathGraph {
                start,
                end,
                interior: numbered,
            },
            ground,
        })
    }

    /// Number of tile columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// The authored enemy path.
    #[must_use]
    pub const fn path(&self) -> &PathGraph {
        &self.path
    }

    /// Buildable ground cells in row-major order.
    #[must_use]
    pub fn ground_cells(&self) -> &[CellCoord] {
        &self.ground
    }

    /// Reports whether the provided cell is buildable ground.
    #[must_use]
    pub fn is_buildable(&self, cell: CellCoord) -> bool {
        self.ground.contains(&cell)
    }
}

fn parse_header(header: &str) -> Result<(u32, u32), MapError> {
    let malformed = || MapError::MalformedHeader {
        header: header.to_owned(),
    };
    let (raw_columns, raw_rows) = header.split_once(':').ok_or_else(malformed)?;
    let columns: u32 = raw_columns.trim().parse().map_err(|_| malformed())?;
    let rows: u32 = raw_rows.trim().parse().map_err(|_| malformed())?;
    if columns == 0 || rows == 0 {
        return Err(malformed());
    }
    Ok((columns, rows))
}
