use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::{RoundSnapshot, TargetRow, Tile};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    StartRound,
    PlaceTile {
        row: TargetRow,
    },
    Undo,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    SessionCreated {
        session_id: Uuid,
    },
    RoundStarted {
        round: RoundSnapshot,
    },
    TilePlaced {
        tile: Tile,
        row: TargetRow,
        round: RoundSnapshot,
    },
    TileReturned {
        tile: Tile,
        row: TargetRow,
        round: RoundSnapshot,
    },
    RoundComplete {
        word1: String,
        word2: String,
    },
    Error {
        message: String,
    },
}
