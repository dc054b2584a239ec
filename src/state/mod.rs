//! Room state and player event transitions.
//!
//! - `geometry` - positions, rectangles and inclusive containment
//! - `room` - rooms, walls and teleports
//! - `player` - players and player events
//! - `transition` - deciding whether an event is valid, and applying it
//! - `parse` - turning untyped JSON into typed state
//! - `session` - host-side holder of the current state with undo
//!
//! # Architecture
//!
//! ```text
//!   JSON ──parse──▶ State ─┐
//!                          ├─ is_event_valid ──▶ bool
//!   JSON ──parse──▶ Event ─┤
//!                          └─ apply_event ─────▶ State'   (room shared, State untouched)
//!
//!   RoomSession: current State + history of previous States
//! ```
//!
//! # Usage
//!
//! ```rust
//! use roomstate::state::{is_event_valid, apply_event, PlayerEvent, Position, State};
//!
//! let state = State::from_json_str(r#"{
//!     "room": {"id": "room1", "width": 10, "height": 10,
//!              "objects": {"walls": [], "teleports": []}},
//!     "players": [{"id": "player1", "position": {"x": 0, "y": 0}, "color": "red"}]
//! }"#).unwrap();
//!
//! let event = PlayerEvent::move_to("player1", Position::new(9.0, 9.0));
//! assert!(is_event_valid(&state, &event));
//! let next = apply_event(&state, &event);
//! assert_eq!(next.player("player1").unwrap().position, Position::new(9.0, 9.0));
//! ```

pub mod geometry;
pub mod parse;
pub mod player;
pub mod room;
pub mod session;
pub mod transition;

use std::sync::Arc;

use serde::Serialize;

pub use geometry::{inside_rectangle, Position, Rectangle};
pub use parse::{
    parse_event, parse_player, parse_position, parse_rectangle, parse_room, parse_state,
    parse_teleport, parse_wall, ParseError, ShapeError,
};
pub use player::{Player, PlayerEvent, PlayerEventKind};
pub use room::{Room, RoomObjects, Teleport, Wall};
pub use session::{HistoryEntry, RoomSession, SessionConfig, DEFAULT_HISTORY_LIMIT};
pub use transition::{apply_event, check_event, is_event_valid, InvalidEvent, InvalidReason};

/// Identifier of a room, wall, teleport or player.
pub type Id = String;

/// The whole room state: one room and the players in it.
///
/// States are never changed in place. Each accepted event produces a new
/// `State` sharing the same room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct State {
    pub room: Arc<Room>,
    pub players: Vec<Player>,
}

impl State {
    pub fn new(room: Room, players: Vec<Player>) -> Self {
        Self {
            room: Arc::new(room),
            players,
        }
    }

    /// Get player by ID.
    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.player(player_id).is_some()
    }

    /// Player IDs in list order.
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.id.as_str())
    }

    pub fn to_json(&self) -> serde_json::Value {
        let players: Vec<serde_json::Value> = self.players.iter().map(Player::to_json).collect();
        serde_json::json!({
            "room": self.room.to_json(),
            "players": players
        })
    }
}
