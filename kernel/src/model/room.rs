use super::id::RoomId;

#[derive(Debug, Clone)]
pub struct Room {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
}
