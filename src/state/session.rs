//! Host-side holder of the current room state.
//!
//! A presentation layer keeps one "current" [`State`] and replaces it on
//! every accepted event. [`RoomSession`] does that bookkeeping: it validates,
//! applies, and keeps a bounded history of previous states for undo.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geometry::Position;
use super::player::PlayerEvent;
use super::transition::{check_event, InvalidEvent};
use super::State;

/// Default number of previous states kept for undo.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Session settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum undo depth. Zero disables history.
    pub history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// An accepted event and the state it was applied to.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub event: PlayerEvent,
    pub applied_at: DateTime<Utc>,
    previous: State,
}

impl HistoryEntry {
    /// State as it was before the event.
    pub fn previous(&self) -> &State {
        &self.previous
    }
}

/// Current state plus undo history.
#[derive(Debug, Clone)]
pub struct RoomSession {
    state: State,
    history: VecDeque<HistoryEntry>,
    config: SessionConfig,
}

impl RoomSession {
    pub fn new(initial: State, config: SessionConfig) -> Self {
        Self {
            state: initial,
            history: VecDeque::new(),
            config,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Validate and apply an event, replacing the current state.
    pub fn submit(&mut self, event: PlayerEvent) -> Result<&State, InvalidEvent> {
        let next = match self.state.apply(&event) {
            Ok(next) => next,
            Err(e) => {
                tracing::debug!(room = %self.state.room.id, reason = %e.reason, "rejected {}", event);
                return Err(e);
            }
        };

        tracing::debug!(
            room = %self.state.room.id,
            players = next.players.len(),
            "applied {}",
            event
        );

        let previous = std::mem::replace(&mut self.state, next);
        self.record(event, previous);
        Ok(&self.state)
    }

    /// Move a player; the usual event for pointer-driven hosts.
    pub fn try_move(
        &mut self,
        player_id: &str,
        position: Position,
    ) -> Result<&State, InvalidEvent> {
        self.submit(PlayerEvent::move_to(player_id, position))
    }

    /// Check an event against the current state without applying it.
    pub fn check(&self, event: &PlayerEvent) -> Result<(), InvalidEvent> {
        check_event(&self.state, event)
    }

    fn record(&mut self, event: PlayerEvent, previous: State) {
        if self.config.history_limit == 0 {
            return;
        }
        while self.history.len() >= self.config.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            event,
            applied_at: Utc::now(),
            previous,
        });
    }

    /// Restore the state before the last accepted event.
    ///
    /// Returns the undone event, or `None` if there is no history.
    pub fn undo(&mut self) -> Option<PlayerEvent> {
        let entry = self.history.pop_back()?;
        tracing::debug!(room = %self.state.room.id, "undid {}", entry.event);
        self.state = entry.previous;
        Some(entry.event)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Accepted events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Replace the current state and forget the history.
    pub fn reset(&mut self, state: State) {
        tracing::debug!(room = %state.room.id, "session reset");
        self.state = state;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{InvalidReason, Player, Rectangle, Room, Wall};
    use pretty_assertions::assert_eq;

    fn initial_state() -> State {
        let room = Room::new("room1", 10.0, 10.0)
            .with_wall(Wall::new("1", Rectangle::new(2.0, 8.0, 3.0, 2.0)));
        State::new(
            room,
            vec![
                Player::new("player1", Position::new(0.0, 0.0), "green"),
                Player::new("player2", Position::new(1.0, 7.0), "blue"),
            ],
        )
    }

    fn session() -> RoomSession {
        RoomSession::new(initial_state(), SessionConfig::default())
    }

    #[test]
    fn test_submit_replaces_state() {
        let mut session = session();
        let state = session.try_move("player1", Position::new(1.0, 1.0)).unwrap();
        assert_eq!(state.player("player1").unwrap().position, Position::new(1.0, 1.0));
        assert!(session.can_undo());
        assert_eq!(session.history().count(), 1);
    }

    #[test]
    fn test_rejected_event_leaves_state() {
        let mut session = session();
        let err = session.try_move("player1", Position::new(5.0, 2.0)).unwrap_err();

        assert_eq!(
            err.reason,
            InvalidReason::InsideWall {
                wall_id: "1".to_string()
            }
        );
        assert_eq!(session.state(), &initial_state());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo() {
        let mut session = session();
        session
            .submit(PlayerEvent::add(Player::new(
                "player3",
                Position::new(9.0, 9.0),
                "red",
            )))
            .unwrap();
        session.submit(PlayerEvent::remove("player2")).unwrap();
        assert_eq!(session.state().players.len(), 2);

        assert_eq!(session.undo(), Some(PlayerEvent::remove("player2")));
        assert_eq!(session.state().players.len(), 3);

        session.undo().unwrap();
        assert_eq!(session.state(), &initial_state());
        assert_eq!(session.undo(), None);
    }

    #[test]
    fn test_history_limit() {
        let mut session = RoomSession::new(initial_state(), SessionConfig { history_limit: 2 });
        for x in 1..=4 {
            session
                .try_move("player1", Position::new(x as f64, 0.0))
                .unwrap();
        }

        let events: Vec<&PlayerEvent> = session.history().map(|e| &e.event).collect();
        assert_eq!(
            events,
            vec![
                &PlayerEvent::move_to("player1", Position::new(3.0, 0.0)),
                &PlayerEvent::move_to("player1", Position::new(4.0, 0.0)),
            ]
        );
        assert_eq!(
            session.history().next().unwrap().previous().player("player1").unwrap().position,
            Position::new(2.0, 0.0)
        );
    }

    #[test]
    fn test_history_disabled() {
        let mut session = RoomSession::new(initial_state(), SessionConfig { history_limit: 0 });
        session.try_move("player1", Position::new(1.0, 0.0)).unwrap();
        assert!(!session.can_undo());
        assert_eq!(session.undo(), None);
    }

    #[test]
    fn test_reset_clears_history() {
        let mut session = session();
        session.try_move("player1", Position::new(1.0, 0.0)).unwrap();
        session.reset(initial_state());
        assert!(!session.can_undo());
        assert_eq!(session.state(), &initial_state());
    }

    #[test]
    fn test_config_from_json() {
        let config: SessionConfig = serde_json::from_str(r#"{"history_limit": 8}"#).unwrap();
        assert_eq!(config.history_limit, 8);

        let config: SessionConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_old_states_stay_valid() {
        let mut session = session();
        let before = session.state().clone();
        session.try_move("player1", Position::new(9.0, 0.0)).unwrap();

        assert_eq!(before.player("player1").unwrap().position, Position::new(0.0, 0.0));
        assert_eq!(
            session.state().player("player1").unwrap().position,
            Position::new(9.0, 0.0)
        );
    }
}
