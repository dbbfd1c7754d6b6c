use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        BookingIdResponse, BookingResponse, CreateBookingRequest, UpdateBookingRequest,
    },
};
use axum::{
    extract::{Path, State},
    Json,
};
use garde::Validate;
use kernel::model::id::{BookingId, RoomId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn show_current_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .find_booking(user.id())
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn book_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingIdResponse>> {
    req.validate(&())?;
    let room_id = required_room_id(req.room_id)?;

    registry
        .booking_service()
        .create_booking(user.id(), room_id)
        .await
        .map(BookingIdResponse::from)
        .map(Json)
}

pub async fn change_booking_room(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingRequest>,
) -> AppResult<Json<BookingIdResponse>> {
    req.validate(&())?;
    let room_id = required_room_id(req.room_id)?;

    registry
        .booking_service()
        .update_booking(user.id(), room_id, booking_id)
        .await
        .map(BookingIdResponse::from)
        .map(Json)
}

// roomId の欠落・0 以下の値は NotFound として扱う
fn required_room_id(room_id: Option<RoomId>) -> AppResult<RoomId> {
    match room_id {
        Some(room_id) if room_id.raw() > 0 => Ok(room_id),
        _ => Err(AppError::EntityNotFound(
            "リクエストに有効な roomId が指定されていません。".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_non_positive_room_id_is_not_found() {
        assert!(matches!(
            required_room_id(None),
            Err(AppError::EntityNotFound(_))
        ));
        assert!(matches!(
            required_room_id(Some(RoomId::new(0))),
            Err(AppError::EntityNotFound(_))
        ));
        assert_eq!(required_room_id(Some(RoomId::new(3))).unwrap(), RoomId::new(3));
    }
}
