//! Single-line maze layout strings for sharing generated mazes.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_race_core::{GridPos, TileKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SNAPSHOT_DOMAIN: &str = "mazerace";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "mazerace:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of a generated maze: dimensions, goal and tile walkability.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct MazeLayoutSnapshot {
    /// Number of tile columns contained in the grid.
    pub columns: u32,
    /// Number of tile rows contained in the grid.
    pub rows: u32,
    /// Cell holding the goal tile.
    pub goal: GridPos,
    /// Tile kinds in row-major order, `columns * rows` entries.
    pub tiles: Vec<TileKind>,
}

impl MazeLayoutSnapshot {
    /// Encodes the snapshot into a single-line string suitable for clipboard transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableSnapshot {
            goal: self.goal,
            tiles: self.tiles.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("layout snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SNAPSHOT_HEADER}:{}x{}:{encoded}", self.columns, self.rows)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: SerializableSnapshot =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        if decoded.tiles.len() != (columns * rows) as usize {
            return Err(LayoutTransferError::TileCountMismatch {
                expected: (columns * rows) as usize,
                found: decoded.tiles.len(),
            });
        }

        Ok(Self {
            columns,
            rows,
            goal: decoded.goal,
            tiles: decoded.tiles,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableSnapshot {
    goal: GridPos,
    tiles: Vec<TileKind>,
}

/// Errors that can occur while decoding layout transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("clipboard payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    #[error("layout string is missing the prefix")]
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    #[error("layout string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include grid dimensions.
    #[error("layout string is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    #[error("layout string is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("layout prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("layout version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded snapshot.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The payload did not carry one tile per grid cell.
    #[error("layout payload holds {found} tiles, expected {expected}")]
    TileCountMismatch {
        /// Tiles implied by the encoded dimensions.
        expected: usize,
        /// Tiles actually present in the payload.
        found: usize,
    },
    /// The base64 payload could not be decoded.
    #[error("could not decode layout payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse layout payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LayoutTransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(LayoutTransferError::InvalidDimensions(
            dimensions.to_owned(),
        ));
    }

    Ok((columns, rows))
}
