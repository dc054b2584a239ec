//! Rooms and their static objects.
//!
//! A room is the bounded play area plus the obstacles inside it. Player
//! events never change a room.

use serde::Serialize;

use super::geometry::{Position, Rectangle};
use super::Id;

/// Static obstacle. Positions inside the area (edges included) are blocked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wall {
    pub id: Id,
    pub area: Rectangle,
}

impl Wall {
    pub fn new(id: impl Into<Id>, area: Rectangle) -> Self {
        Self {
            id: id.into(),
            area,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({"id": self.id, "area": self.area.to_json()})
    }
}

/// Region linking to another room. Not consulted by any transition yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Teleport {
    pub id: Id,
    #[serde(rename = "roomId")]
    pub room_id: Id,
    pub area: Rectangle,
}

impl Teleport {
    pub fn new(id: impl Into<Id>, room_id: impl Into<Id>, area: Rectangle) -> Self {
        Self {
            id: id.into(),
            room_id: room_id.into(),
            area,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "roomId": self.room_id,
            "area": self.area.to_json()
        })
    }
}

/// Everything placed in a room.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RoomObjects {
    pub walls: Vec<Wall>,
    pub teleports: Vec<Teleport>,
}

/// A room: playable bounds `[0, width-1] x [0, height-1]` and its objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: Id,
    pub width: f64,
    pub height: f64,
    pub objects: RoomObjects,
}

impl Room {
    /// Create an empty room.
    pub fn new(id: impl Into<Id>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            objects: RoomObjects::default(),
        }
    }

    pub fn with_wall(mut self, wall: Wall) -> Self {
        self.objects.walls.push(wall);
        self
    }

    pub fn with_teleport(mut self, teleport: Teleport) -> Self {
        self.objects.teleports.push(teleport);
        self
    }

    /// Playable area as a rectangle.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_size(self.width, self.height)
    }

    /// Get wall by ID.
    pub fn wall(&self, wall_id: &str) -> Option<&Wall> {
        self.objects.walls.iter().find(|w| w.id == wall_id)
    }

    /// First wall whose area contains the position.
    pub fn wall_at(&self, position: Position) -> Option<&Wall> {
        self.objects
            .walls
            .iter()
            .find(|w| w.area.contains(position))
    }

    /// First teleport whose area contains the position.
    pub fn teleport_at(&self, position: Position) -> Option<&Teleport> {
        self.objects
            .teleports
            .iter()
            .find(|t| t.area.contains(position))
    }

    /// Check if a player may stand at this position.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.bounds().contains(position) && self.wall_at(position).is_none()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let walls: Vec<serde_json::Value> = self.objects.walls.iter().map(Wall::to_json).collect();
        let teleports: Vec<serde_json::Value> = self
            .objects
            .teleports
            .iter()
            .map(Teleport::to_json)
            .collect();

        serde_json::json!({
            "id": self.id,
            "width": self.width,
            "height": self.height,
            "objects": {
                "walls": walls,
                "teleports": teleports
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_room() -> Room {
        Room::new("room1", 10.0, 10.0)
            .with_wall(Wall::new("1", Rectangle::new(2.0, 4.0, 4.0, 2.0)))
            .with_teleport(Teleport::new(
                "t1",
                "room2",
                Rectangle::new(8.0, 9.0, 9.0, 8.0),
            ))
    }

    #[test]
    fn test_lookup_by_id() {
        let room = test_room();
        assert_eq!(room.wall("1").map(|w| w.area.left), Some(2.0));
        assert!(room.wall("2").is_none());
    }

    #[test]
    fn test_wall_at() {
        let room = test_room();
        assert_eq!(room.wall_at(Position::new(2.0, 4.0)).map(|w| w.id.as_str()), Some("1"));
        assert!(room.wall_at(Position::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_teleport_at() {
        let room = test_room();
        let teleport = room.teleport_at(Position::new(9.0, 9.0)).unwrap();
        assert_eq!(teleport.room_id, "room2");
        assert!(room.teleport_at(Position::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_is_walkable() {
        let room = test_room();
        assert!(room.is_walkable(Position::new(0.0, 0.0)));
        assert!(room.is_walkable(Position::new(9.0, 9.0)));
        assert!(!room.is_walkable(Position::new(10.0, 0.0)));
        assert!(!room.is_walkable(Position::new(3.0, 3.0)));
    }

    #[test]
    fn test_to_json() {
        let room = test_room();
        assert_eq!(
            room.to_json(),
            serde_json::json!({
                "id": "room1",
                "width": 10.0,
                "height": 10.0,
                "objects": {
                    "walls": [
                        {"id": "1", "area": {"top": 2.0, "right": 4.0, "bottom": 4.0, "left": 2.0}}
                    ],
                    "teleports": [
                        {
                            "id": "t1",
                            "roomId": "room2",
                            "area": {"top": 8.0, "right": 9.0, "bottom": 9.0, "left": 8.0}
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_serialize_matches_to_json() {
        let room = test_room();
        assert_eq!(serde_json::to_value(&room).unwrap(), room.to_json());
    }
}
