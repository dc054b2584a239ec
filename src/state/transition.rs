//! Event validation and application.
//!
//! Both halves are pure: they read a [`State`] and an event and never
//! modify either. Application builds a new `State`; the old one stays valid.
//!
//! | kind   | valid when                                              |
//! |--------|---------------------------------------------------------|
//! | add    | no player has the new player's ID                       |
//! | remove | some player has the ID                                  |
//! | move   | player exists, position in room bounds and outside walls|
//!
//! `add` does not look at the new player's position.

use std::fmt;

use super::geometry::Position;
use super::player::PlayerEvent;
use super::room::Room;
use super::State;

/// Why an event was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    DuplicatePlayer,
    UnknownPlayer,
    OutOfBounds,
    InsideWall { wall_id: String },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePlayer => write!(f, "Player ID already present"),
            Self::UnknownPlayer => write!(f, "No player with this ID"),
            Self::OutOfBounds => write!(f, "Position is outside the room"),
            Self::InsideWall { wall_id } => write!(f, "Position is inside wall {}", wall_id),
        }
    }
}

/// Error when an event cannot be applied to a state.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidEvent {
    pub event: PlayerEvent,
    pub reason: InvalidReason,
}

impl fmt::Display for InvalidEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid event {}: {}", self.event, self.reason)
    }
}

impl std::error::Error for InvalidEvent {}

/// Check an event against a state, reporting the first rule it breaks.
pub fn check_event(state: &State, event: &PlayerEvent) -> Result<(), InvalidEvent> {
    let invalid = |reason: InvalidReason| InvalidEvent {
        event: event.clone(),
        reason,
    };

    match event {
        PlayerEvent::Add { player } => {
            if state.has_player(&player.id) {
                return Err(invalid(InvalidReason::DuplicatePlayer));
            }
        }
        PlayerEvent::Remove { player_id } => {
            if !state.has_player(player_id) {
                return Err(invalid(InvalidReason::UnknownPlayer));
            }
        }
        PlayerEvent::Move {
            player_id,
            position,
        } => {
            if !state.has_player(player_id) {
                return Err(invalid(InvalidReason::UnknownPlayer));
            }
            check_position(&state.room, *position).map_err(invalid)?;
        }
    }

    Ok(())
}

fn check_position(room: &Room, position: Position) -> Result<(), InvalidReason> {
    if !room.bounds().contains(position) {
        return Err(InvalidReason::OutOfBounds);
    }
    match room.wall_at(position) {
        Some(wall) => Err(InvalidReason::InsideWall {
            wall_id: wall.id.clone(),
        }),
        None => Ok(()),
    }
}

/// Check whether an event may be applied to a state.
pub fn is_event_valid(state: &State, event: &PlayerEvent) -> bool {
    check_event(state, event).is_ok()
}

/// Apply an event without validating it.
///
/// Only call this with events accepted by [`is_event_valid`]. For other
/// events: `remove` and `move` of an unknown ID return an equal state, and
/// `add` of a present ID appends a second player with that ID. Use
/// [`State::apply`] to have the check done for you.
pub fn apply_event(state: &State, event: &PlayerEvent) -> State {
    let players = match event {
        PlayerEvent::Add { player } => {
            let mut players = Vec::with_capacity(state.players.len() + 1);
            players.extend(state.players.iter().cloned());
            players.push(player.clone());
            players
        }
        PlayerEvent::Remove { player_id } => state
            .players
            .iter()
            .filter(|p| p.id != *player_id)
            .cloned()
            .collect(),
        PlayerEvent::Move {
            player_id,
            position,
        } => state
            .players
            .iter()
            .map(|p| {
                if p.id == *player_id {
                    p.moved_to(*position)
                } else {
                    p.clone()
                }
            })
            .collect(),
    };

    State {
        room: state.room.clone(),
        players,
    }
}

impl State {
    /// Apply an event, returning the new state or an error.
    pub fn apply(&self, event: &PlayerEvent) -> Result<State, InvalidEvent> {
        check_event(self, event)?;
        Ok(apply_event(self, event))
    }

    /// Check whether an event may be applied to this state.
    pub fn accepts(&self, event: &PlayerEvent) -> bool {
        is_event_valid(self, event)
    }
}
