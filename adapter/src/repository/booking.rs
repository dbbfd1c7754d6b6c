use crate::database::{model::booking::BookingRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CreateBooking, UpdateBookingRoom},
        Booking,
    },
    id::{BookingId, RoomId, UserId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    // ユーザー ID に紐づく予約を取得する。
    // rooms テーブルと INNER JOIN し、部屋の情報も一緒に抽出する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.user_id,
                    b.created_at,
                    r.room_id,
                    r.name AS room_name,
                    r.capacity
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Booking::from))
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(
            r#"
                SELECT
                    b.booking_id,
                    b.user_id,
                    b.created_at,
                    r.room_id,
                    r.name AS room_name,
                    r.capacity
                FROM bookings AS b
                INNER JOIN rooms AS r ON b.room_id = r.room_id
                WHERE b.booking_id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Booking::from))
    }

    // 部屋 ID に紐づく現在の予約数を数える。満室判定に使う
    async fn count_by_room_id(&self, room_id: RoomId) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*) FROM bookings WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(count)
    }

    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        let booking_id: BookingId = sqlx::query_scalar(
            r#"
                INSERT INTO bookings (user_id, room_id)
                VALUES ($1, $2)
                RETURNING booking_id
            "#,
        )
        .bind(event.user_id)
        .bind(event.room_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(booking_id)
    }

    async fn update_room(&self, event: UpdateBookingRoom) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET room_id = $1, updated_at = NOW()
                WHERE booking_id = $2
            "#,
        )
        .bind(event.room_id)
        .bind(event.booking_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been updated".into(),
            ));
        }

        Ok(())
    }
}
