//! Players and the events that change them.
//!
//! # Events
//!
//! ```text
//!              add {player}
//!   (absent) ───────────────▶ (present) ──┐
//!      ▲                          │  ▲    │ move {playerId, position}
//!      │   remove {playerId}      │  └────┘
//!      └──────────────────────────┘
//! ```
//!
//! Whether an event is allowed depends on the current [`State`](super::State);
//! see the `transition` module.

use std::fmt;

use serde::Serialize;

use super::geometry::Position;
use super::Id;

/// A uniquely identified point entity in the room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: Id,
    pub position: Position,
    /// Display attribute, carried through transitions unchanged
    pub color: String,
}

impl Player {
    pub fn new(id: impl Into<Id>, position: Position, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position,
            color: color.into(),
        }
    }

    /// Copy of this player standing somewhere else.
    pub fn moved_to(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "position": self.position.to_json(),
            "color": self.color
        })
    }
}

/// Discriminator of [`PlayerEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEventKind {
    Add,
    Remove,
    Move,
}

impl PlayerEventKind {
    pub const ALL: [PlayerEventKind; 3] = [Self::Add, Self::Remove, Self::Move];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Move => "move",
        }
    }

    pub fn from_name(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }
}

impl fmt::Display for PlayerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to add, remove or move a player.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayerEvent {
    Add {
        player: Player,
    },
    Remove {
        #[serde(rename = "playerId")]
        player_id: Id,
    },
    Move {
        #[serde(rename = "playerId")]
        player_id: Id,
        position: Position,
    },
}

impl PlayerEvent {
    pub fn add(player: Player) -> Self {
        Self::Add { player }
    }

    pub fn remove(player_id: impl Into<Id>) -> Self {
        Self::Remove {
            player_id: player_id.into(),
        }
    }

    pub fn move_to(player_id: impl Into<Id>, position: Position) -> Self {
        Self::Move {
            player_id: player_id.into(),
            position,
        }
    }

    pub fn kind(&self) -> PlayerEventKind {
        match self {
            Self::Add { .. } => PlayerEventKind::Add,
            Self::Remove { .. } => PlayerEventKind::Remove,
            Self::Move { .. } => PlayerEventKind::Move,
        }
    }

    /// ID of the player this event targets.
    pub fn player_id(&self) -> &str {
        match self {
            Self::Add { player } => &player.id,
            Self::Remove { player_id } | Self::Move { player_id, .. } => player_id,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Add { player } => serde_json::json!({
                "kind": "add",
                "player": player.to_json()
            }),
            Self::Remove { player_id } => serde_json::json!({
                "kind": "remove",
                "playerId": player_id
            }),
            Self::Move {
                player_id,
                position,
            } => serde_json::json!({
                "kind": "move",
                "playerId": player_id,
                "position": position.to_json()
            }),
        }
    }
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { player } => write!(
                f,
                "add({} at {}, {})",
                player.id, player.position.x, player.position.y
            ),
            Self::Remove { player_id } => write!(f, "remove({})", player_id),
            Self::Move {
                player_id,
                position,
            } => write!(f, "move({} to {}, {})", player_id, position.x, position.y),
        }
    }
}
