use kernel::model::{
    booking::{Booking, BookingRoom},
    id::{BookingId, RoomId, UserId},
};
use sqlx::types::chrono::{DateTime, Utc};

// 予約一件を部屋情報込みで取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub room_id: RoomId,
    pub room_name: String,
    pub capacity: i32,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            user_id,
            created_at,
            room_id,
            room_name,
            capacity,
        } = value;
        Booking {
            booking_id,
            booked_by: user_id,
            created_at,
            room: BookingRoom {
                room_id,
                name: room_name,
                capacity,
            },
        }
    }
}
