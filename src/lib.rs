//! Room State Library
//!
//! This crate models a single 2D room with static walls and mobile players,
//! and decides how player events change it.
//!
//! # Overview
//!
//! - **Model** - Rooms, walls, teleports, players and positions, plus the
//!   `add`/`remove`/`move` player events.
//!
//! - **Transition Engine** - `is_event_valid` decides whether an event is
//!   legal for a state, `apply_event` produces the next state.
//!
//! - **Schema Boundary** - Untyped JSON is parsed into typed values, failing
//!   with the path of the first malformed field.
//!
//! - **Session** - Optional holder of the current state with bounded undo.
//!
//! # Design Principles
//!
//! 1. **States are values** - Applying an event builds a new state; the old
//!    one stays valid and can be kept for history.
//!
//! 2. **Rejection is not an error** - An invalid event is a normal `false`.
//!
//! 3. **No rendering, no networking** - Drawing and input mapping belong to
//!    the host.
//!
//! # Example
//!
//! ```rust
//! use roomstate::state::{
//!     Player, PlayerEvent, Position, Rectangle, Room, RoomSession, SessionConfig, State, Wall,
//! };
//!
//! let room = Room::new("room1", 10.0, 10.0)
//!     .with_wall(Wall::new("1", Rectangle::new(2.0, 4.0, 4.0, 2.0)));
//! let state = State::new(
//!     room,
//!     vec![Player::new("player1", Position::new(0.0, 0.0), "red")],
//! );
//!
//! // Inside the wall
//! assert!(!state.accepts(&PlayerEvent::move_to("player1", Position::new(3.0, 3.0))));
//!
//! let mut session = RoomSession::new(state, SessionConfig::default());
//! session.try_move("player1", Position::new(1.0, 1.0)).unwrap();
//! assert_eq!(
//!     session.state().player("player1").unwrap().position,
//!     Position::new(1.0, 1.0)
//! );
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
