//! Parsing untyped JSON into typed state.
//!
//! Data arriving from outside (files, messages, user input) goes through
//! these functions before reaching the transition engine. A value that does
//! not have the expected shape fails with a [`ShapeError`] naming the field
//! path, e.g. `room.objects.walls[0].area.top`. Fields not in the schema are
//! ignored.
//!
//! Only shape is checked here. Duplicate IDs, positions inside walls and the
//! like are left to the transition engine.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::geometry::{Position, Rectangle};
use super::player::{Player, PlayerEvent, PlayerEventKind};
use super::room::{Room, RoomObjects, Teleport, Wall};
use super::State;

/// Expected description for an unrecognized event `kind`.
pub const EVENT_KIND_EXPECTED: &str = "one of add, remove, move";

/// A value did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    /// Field path from the root, empty for the root itself
    pub path: String,
    /// Type or values the field should have had
    pub expected: &'static str,
    /// JSON type actually found (`"missing"` if absent)
    pub found: &'static str,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        write!(
            f,
            "Expected {} at {}, found {}",
            self.expected, path, self.found
        )
    }
}

impl std::error::Error for ShapeError {}

/// Errors from parsing raw JSON text.
#[derive(Debug)]
pub enum ParseError {
    /// Not valid JSON at all
    Json(serde_json::Error),
    /// Valid JSON with the wrong shape
    Shape(ShapeError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "Invalid JSON: {}", e),
            Self::Shape(e) => write!(f, "Invalid shape: {}", e),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Shape(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<ShapeError> for ParseError {
    fn from(e: ShapeError) -> Self {
        Self::Shape(e)
    }
}

// ===== Path helpers =====

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn item(path: &str, index: usize) -> String {
    format!("{}[{}]", path, index)
}

fn type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

fn mismatch(path: String, expected: &'static str, value: Option<&Value>) -> ShapeError {
    ShapeError {
        path,
        expected,
        found: type_name(value),
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ShapeError> {
    value
        .as_object()
        .ok_or_else(|| mismatch(path.to_string(), "object", Some(value)))
}

fn number_field(obj: &Map<String, Value>, path: &str, key: &str) -> Result<f64, ShapeError> {
    let value = obj.get(key);
    value
        .and_then(Value::as_f64)
        .ok_or_else(|| mismatch(child(path, key), "number", value))
}

fn string_field(obj: &Map<String, Value>, path: &str, key: &str) -> Result<String, ShapeError> {
    let value = obj.get(key);
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| mismatch(child(path, key), "string", value))
}

fn object_field<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Value, ShapeError> {
    let value = obj.get(key);
    match value {
        Some(v @ Value::Object(_)) => Ok(v),
        _ => Err(mismatch(child(path, key), "object", value)),
    }
}

fn array_field<T>(
    obj: &Map<String, Value>,
    path: &str,
    key: &str,
    parse_item: impl Fn(&Value, &str) -> Result<T, ShapeError>,
) -> Result<Vec<T>, ShapeError> {
    let value = obj.get(key);
    let items = value
        .and_then(Value::as_array)
        .ok_or_else(|| mismatch(child(path, key), "array", value))?;
    let path = child(path, key);

    items
        .iter()
        .enumerate()
        .map(|(i, v)| parse_item(v, &item(&path, i)))
        .collect()
}

// ===== Entity parsers (at a path) =====

fn read_position(value: &Value, path: &str) -> Result<Position, ShapeError> {
    let obj = as_object(value, path)?;
    Ok(Position {
        x: number_field(obj, path, "x")?,
        y: number_field(obj, path, "y")?,
    })
}

fn read_rectangle(value: &Value, path: &str) -> Result<Rectangle, ShapeError> {
    let obj = as_object(value, path)?;
    Ok(Rectangle {
        top: number_field(obj, path, "top")?,
        right: number_field(obj, path, "right")?,
        bottom: number_field(obj, path, "bottom")?,
        left: number_field(obj, path, "left")?,
    })
}

fn read_wall(value: &Value, path: &str) -> Result<Wall, ShapeError> {
    let obj = as_object(value, path)?;
    let area = object_field(obj, path, "area")?;
    Ok(Wall {
        id: string_field(obj, path, "id")?,
        area: read_rectangle(area, &child(path, "area"))?,
    })
}

fn read_teleport(value: &Value, path: &str) -> Result<Teleport, ShapeError> {
    let obj = as_object(value, path)?;
    let area = object_field(obj, path, "area")?;
    Ok(Teleport {
        id: string_field(obj, path, "id")?,
        room_id: string_field(obj, path, "roomId")?,
        area: read_rectangle(area, &child(path, "area"))?,
    })
}

fn read_room(value: &Value, path: &str) -> Result<Room, ShapeError> {
    let obj = as_object(value, path)?;
    let id = string_field(obj, path, "id")?;
    let width = number_field(obj, path, "width")?;
    let height = number_field(obj, path, "height")?;

    let objects_path = child(path, "objects");
    let objects = as_object(object_field(obj, path, "objects")?, &objects_path)?;

    Ok(Room {
        id,
        width,
        height,
        objects: RoomObjects {
            walls: array_field(objects, &objects_path, "walls", read_wall)?,
            teleports: array_field(objects, &objects_path, "teleports", read_teleport)?,
        },
    })
}

fn read_player(value: &Value, path: &str) -> Result<Player, ShapeError> {
    let obj = as_object(value, path)?;
    let id = string_field(obj, path, "id")?;
    let position = object_field(obj, path, "position")?;
    Ok(Player {
        id,
        position: read_position(position, &child(path, "position"))?,
        color: string_field(obj, path, "color")?,
    })
}

fn read_state(value: &Value, path: &str) -> Result<State, ShapeError> {
    let obj = as_object(value, path)?;
    let room = object_field(obj, path, "room")?;
    let room = read_room(room, &child(path, "room"))?;
    let players = array_field(obj, path, "players", read_player)?;
    Ok(State {
        room: Arc::new(room),
        players,
    })
}

fn read_event(value: &Value, path: &str) -> Result<PlayerEvent, ShapeError> {
    let obj = as_object(value, path)?;
    let kind_value = obj.get("kind");
    let kind = kind_value
        .and_then(Value::as_str)
        .and_then(PlayerEventKind::from_name)
        .ok_or_else(|| mismatch(child(path, "kind"), EVENT_KIND_EXPECTED, kind_value))?;

    match kind {
        PlayerEventKind::Add => {
            let player = object_field(obj, path, "player")?;
            Ok(PlayerEvent::Add {
                player: read_player(player, &child(path, "player"))?,
            })
        }
        PlayerEventKind::Remove => Ok(PlayerEvent::Remove {
            player_id: string_field(obj, path, "playerId")?,
        }),
        PlayerEventKind::Move => {
            let player_id = string_field(obj, path, "playerId")?;
            let position = object_field(obj, path, "position")?;
            Ok(PlayerEvent::Move {
                player_id,
                position: read_position(position, &child(path, "position"))?,
            })
        }
    }
}

// ===== Public entry points =====

pub fn parse_position(value: &Value) -> Result<Position, ShapeError> {
    read_position(value, "")
}

pub fn parse_rectangle(value: &Value) -> Result<Rectangle, ShapeError> {
    read_rectangle(value, "")
}

pub fn parse_wall(value: &Value) -> Result<Wall, ShapeError> {
    read_wall(value, "")
}

pub fn parse_teleport(value: &Value) -> Result<Teleport, ShapeError> {
    read_teleport(value, "")
}

pub fn parse_room(value: &Value) -> Result<Room, ShapeError> {
    read_room(value, "")
}

pub fn parse_player(value: &Value) -> Result<Player, ShapeError> {
    read_player(value, "")
}

/// Parse a whole state: `{room, players}`.
pub fn parse_state(value: &Value) -> Result<State, ShapeError> {
    read_state(value, "")
}

/// Parse an event, dispatching on its `kind` field.
pub fn parse_event(value: &Value) -> Result<PlayerEvent, ShapeError> {
    read_event(value, "")
}

impl State {
    pub fn from_json(value: &Value) -> Result<Self, ShapeError> {
        parse_state(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(parse_state(&value)?)
    }
}

impl PlayerEvent {
    pub fn from_json(value: &Value) -> Result<Self, ShapeError> {
        parse_event(value)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(parse_event(&value)?)
    }
}
