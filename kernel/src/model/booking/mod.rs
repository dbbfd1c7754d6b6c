use super::id::{BookingId, RoomId, UserId};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub created_at: DateTime<Utc>,
    pub room: BookingRoom,
}

// 予約に紐づく部屋の情報。一覧や詳細表示で部屋の属性も一緒に返すために埋め込む
#[derive(Debug)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub name: String,
    pub capacity: i32,
}
