use crate::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{BookingId, RoomId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    // ユーザー ID に紐づく予約（部屋情報込み）を取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>>;
    // 予約 ID から予約を取得する
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // 部屋 ID に紐づく現在の予約数を取得する
    async fn count_by_room_id(&self, room_id: RoomId) -> AppResult<i64>;
    // 予約操作を行う
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    // 予約の部屋を付け替える
    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<()>;
}
