use crate::model::id::{BookingId, RoomId, UserId};
use derive_new::new;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct CreateBooking {
    pub user_id: UserId,
    pub room_id: RoomId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct UpdateBookingRoom {
    pub booking_id: BookingId,
    pub room_id: RoomId,
}
