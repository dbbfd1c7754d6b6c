use crate::{
    model::{
        booking::{
            event::{CreateBooking, UpdateBookingRoom},
            Booking,
        },
        id::{BookingId, RoomId, UserId},
    },
    repository::{
        booking::BookingRepository, enrollment::EnrollmentRepository, room::RoomRepository,
        ticket::TicketRepository,
    },
};
use derive_new::new;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

// 予約操作のバリデーションとオーケストレーションを担う。
// ストレージはトレイト経由で注入するため、テストではモックに差し替えられる。
//
// なお、在室数の確認と INSERT/UPDATE の間はトランザクションで保護していない。
// 同時リクエストが両方とも在室数チェックを通過し定員を超過し得るが、
// 既知の制約としてそのままにしている。
#[derive(new)]
pub struct BookingService {
    enrollment_repository: Arc<dyn EnrollmentRepository>,
    ticket_repository: Arc<dyn TicketRepository>,
    room_repository: Arc<dyn RoomRepository>,
    booking_repository: Arc<dyn BookingRepository>,
}

impl BookingService {
    // ユーザーの現在の予約（部屋情報込み）を取得する
    pub async fn find_booking(&self, user_id: UserId) -> AppResult<Booking> {
        self.booking_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "ユーザー（{user_id}）の予約が見つかりませんでした。"
                ))
            })
    }

    // 予約を新規作成する。チェックは以下の順で行い、最初の違反で打ち切る。
    // ① チケットの適格性 ② 部屋の存在 ③ 満室またはすでに予約を保持
    pub async fn create_booking(&self, user_id: UserId, room_id: RoomId) -> AppResult<BookingId> {
        self.verify_eligibility(user_id).await?;

        let room = self
            .room_repository
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("部屋（{room_id}）が見つかりませんでした。"))
            })?;

        let occupancy = self.booking_repository.count_by_room_id(room_id).await?;
        let current = self.booking_repository.find_by_user_id(user_id).await?;

        // 満室チェックと重複予約チェックはひとつの拒否条件としてまとめて評価する
        if occupancy >= i64::from(room.capacity) || current.is_some() {
            return Err(AppError::ForbiddenOperation(
                "部屋が満室か、すでに予約が存在します。".into(),
            ));
        }

        self.booking_repository
            .create(CreateBooking::new(user_id, room_id))
            .await
    }

    // 既存予約の部屋を付け替える。チェックは以下の順で行う。
    // ① チケットの適格性 ② 部屋・予約の存在 ③ 予約の所有者 ④ 満室または同一部屋
    pub async fn update_booking(
        &self,
        user_id: UserId,
        room_id: RoomId,
        booking_id: BookingId,
    ) -> AppResult<BookingId> {
        self.verify_eligibility(user_id).await?;

        let room = self
            .room_repository
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("部屋（{room_id}）が見つかりませんでした。"))
            })?;
        let booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("予約（{booking_id}）が見つかりませんでした。"))
            })?;

        if booking.booked_by != user_id {
            return Err(AppError::UnauthorizedError);
        }

        let occupancy = self.booking_repository.count_by_room_id(room_id).await?;

        // 移動先の満室チェックと同一部屋チェックもまとめて評価する
        if occupancy >= i64::from(room.capacity) || booking.room.room_id == room_id {
            return Err(AppError::ForbiddenOperation(
                "部屋が満室か、同じ部屋への変更です。".into(),
            ));
        }

        self.booking_repository
            .update_room(UpdateBookingRoom::new(booking_id, room_id))
            .await?;

        Ok(booking_id)
    }

    // 予約操作の前提となるチケットの適格性を確認する。
    // 参加登録が無い場合は NotFound、チケットが不適格な場合は Forbidden を返す
    async fn verify_eligibility(&self, user_id: UserId) -> AppResult<()> {
        let enrollment = self
            .enrollment_repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "ユーザー（{user_id}）の参加登録が見つかりませんでした。"
                ))
            })?;

        let ticket = self
            .ticket_repository
            .find_by_enrollment_id(enrollment.enrollment_id)
            .await?;

        match ticket {
            Some(ticket) if ticket.grants_booking() => Ok(()),
            _ => Err(AppError::ForbiddenOperation(
                "このチケットでは宿泊予約ができません。".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{
            booking::BookingRoom,
            enrollment::Enrollment,
            id::{EnrollmentId, TicketId},
            ticket::{Ticket, TicketStatus, TicketType},
        },
        repository::{
            booking::MockBookingRepository, enrollment::MockEnrollmentRepository,
            room::MockRoomRepository, ticket::MockTicketRepository,
        },
    };
    use crate::model::room::Room;
    use chrono::Utc;

    const USER_ID: i32 = 10;
    const ENROLLMENT_ID: i32 = 20;
    const ROOM_ID: i32 = 30;
    const BOOKING_ID: i32 = 40;

    struct Fixture {
        enrollment: MockEnrollmentRepository,
        ticket: MockTicketRepository,
        room: MockRoomRepository,
        booking: MockBookingRepository,
    }

    impl Fixture {
        // モックに期待値を設定しないまま呼び出しが届くとテストは失敗するので、
        // 「このリポジトリには到達しない」という検証を兼ねる
        fn new() -> Self {
            Self {
                enrollment: MockEnrollmentRepository::new(),
                ticket: MockTicketRepository::new(),
                room: MockRoomRepository::new(),
                booking: MockBookingRepository::new(),
            }
        }

        fn with_enrollment(mut self) -> Self {
            self.enrollment.expect_find_by_user_id().returning(|user_id| {
                Ok(Some(Enrollment {
                    enrollment_id: EnrollmentId::new(ENROLLMENT_ID),
                    user_id,
                }))
            });
            self
        }

        fn with_ticket(mut self, status: TicketStatus, is_remote: bool, includes_hotel: bool) -> Self {
            self.ticket
                .expect_find_by_enrollment_id()
                .returning(move |_| {
                    Ok(Some(Ticket {
                        ticket_id: TicketId::new(1),
                        status,
                        ticket_type: TicketType {
                            is_remote,
                            includes_hotel,
                        },
                    }))
                });
            self
        }

        fn with_valid_ticket(self) -> Self {
            self.with_ticket(TicketStatus::Paid, false, true)
        }

        fn with_room(mut self, capacity: i32) -> Self {
            self.room.expect_find_by_id().returning(move |room_id| {
                Ok(Some(Room {
                    room_id,
                    name: "101".into(),
                    capacity,
                }))
            });
            self
        }

        fn with_occupancy(mut self, count: i64) -> Self {
            self.booking
                .expect_count_by_room_id()
                .returning(move |_| Ok(count));
            self
        }

        fn build(self) -> BookingService {
            BookingService::new(
                Arc::new(self.enrollment),
                Arc::new(self.ticket),
                Arc::new(self.room),
                Arc::new(self.booking),
            )
        }
    }

    fn booking_in_room(booked_by: UserId, room_id: RoomId) -> Booking {
        Booking {
            booking_id: BookingId::new(BOOKING_ID),
            booked_by,
            created_at: Utc::now(),
            room: BookingRoom {
                room_id,
                name: "101".into(),
                capacity: 3,
            },
        }
    }

    #[tokio::test]
    async fn create_booking_succeeds_on_empty_room() {
        let mut fx = Fixture::new().with_valid_ticket().with_enrollment();
        fx = fx.with_room(1).with_occupancy(0);
        fx.booking
            .expect_find_by_user_id()
            .returning(|_| Ok(None));
        fx.booking
            .expect_create()
            .withf(|event| {
                *event == CreateBooking::new(UserId::new(USER_ID), RoomId::new(ROOM_ID))
            })
            .returning(|_| Ok(BookingId::new(BOOKING_ID)));

        let service = fx.build();
        let res = service
            .create_booking(UserId::new(USER_ID), RoomId::new(ROOM_ID))
            .await;
        assert_eq!(res.unwrap(), BookingId::new(BOOKING_ID));
    }

    #[tokio::test]
    async fn create_booking_is_forbidden_when_user_already_has_one() {
        let mut fx = Fixture::new()
            .with_enrollment()
            .with_valid_ticket()
            .with_room(10)
            .with_occupancy(0);
        fx.booking.expect_find_by_user_id().returning(|user_id| {
            Ok(Some(booking_in_room(user_id, RoomId::new(99))))
        });

        let service = fx.build();
        let res = service
            .create_booking(UserId::new(USER_ID), RoomId::new(ROOM_ID))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn create_booking_is_forbidden_when_room_is_full() {
        let mut fx = Fixture::new()
            .with_enrollment()
            .with_valid_ticket()
            .with_room(2)
            .with_occupancy(2);
        fx.booking.expect_find_by_user_id().returning(|_| Ok(None));

        let service = fx.build();
        let res = service
            .create_booking(UserId::new(USER_ID), RoomId::new(ROOM_ID))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn create_booking_fails_not_found_for_unknown_room() {
        let mut fx = Fixture::new().with_enrollment().with_valid_ticket();
        fx.room.expect_find_by_id().returning(|_| Ok(None));

        let service = fx.build();
        let res = service
            .create_booking(UserId::new(USER_ID), RoomId::new(ROOM_ID))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn missing_enrollment_fails_not_found_before_any_other_check() {
        // room / ticket / booking のモックには期待値を設定していないので、
        // 参加登録チェックより後の処理に到達した時点でテストが落ちる
        let mut fx = Fixture::new();
        fx.enrollment
            .expect_find_by_user_id()
            .returning(|_| Ok(None));

        let service = fx.build();
        let res = service
            .create_booking(UserId::new(USER_ID), RoomId::new(ROOM_ID))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn each_ineligible_ticket_is_rejected_before_room_lookup() {
        let cases = [
            // (status, is_remote, includes_hotel)
            (TicketStatus::Reserved, false, true),
            (TicketStatus::Paid, true, true),
            (TicketStatus::Paid, false, false),
        ];
        for (status, is_remote, includes_hotel) in cases {
            let fx = Fixture::new()
                .with_enrollment()
                .with_ticket(status, is_remote, includes_hotel);
            let service = fx.build();
            let res = service
                .create_booking(UserId::new(USER_ID), RoomId::new(ROOM_ID))
                .await;
            assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
        }
    }

    #[tokio::test]
    async fn absent_ticket_is_rejected() {
        let mut fx = Fixture::new().with_enrollment();
        fx.ticket
            .expect_find_by_enrollment_id()
            .returning(|_| Ok(None));

        let service = fx.build();
        let res = service
            .create_booking(UserId::new(USER_ID), RoomId::new(ROOM_ID))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn update_booking_moves_to_another_room() {
        let mut fx = Fixture::new()
            .with_enrollment()
            .with_valid_ticket()
            .with_room(3)
            .with_occupancy(1);
        fx.booking.expect_find_by_id().returning(|booking_id| {
            assert_eq!(booking_id, BookingId::new(BOOKING_ID));
            Ok(Some(booking_in_room(UserId::new(USER_ID), RoomId::new(99))))
        });
        fx.booking
            .expect_update_room()
            .withf(|event| {
                *event == UpdateBookingRoom::new(BookingId::new(BOOKING_ID), RoomId::new(ROOM_ID))
            })
            .returning(|_| Ok(()));

        let service = fx.build();
        let res = service
            .update_booking(
                UserId::new(USER_ID),
                RoomId::new(ROOM_ID),
                BookingId::new(BOOKING_ID),
            )
            .await;
        assert_eq!(res.unwrap(), BookingId::new(BOOKING_ID));
    }

    #[tokio::test]
    async fn update_to_the_same_room_is_forbidden_even_with_free_capacity() {
        let mut fx = Fixture::new()
            .with_enrollment()
            .with_valid_ticket()
            .with_room(10)
            .with_occupancy(1);
        fx.booking.expect_find_by_id().returning(|_| {
            Ok(Some(booking_in_room(
                UserId::new(USER_ID),
                RoomId::new(ROOM_ID),
            )))
        });

        let service = fx.build();
        let res = service
            .update_booking(
                UserId::new(USER_ID),
                RoomId::new(ROOM_ID),
                BookingId::new(BOOKING_ID),
            )
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn update_of_foreign_booking_is_unauthorized_before_capacity_check() {
        // count_by_room_id に期待値を設定していないので、
        // 所有者チェックより後の満室チェックに到達すればテストは失敗する
        let mut fx = Fixture::new()
            .with_enrollment()
            .with_valid_ticket()
            .with_room(10);
        fx.booking.expect_find_by_id().returning(|_| {
            Ok(Some(booking_in_room(
                UserId::new(USER_ID + 1),
                RoomId::new(99),
            )))
        });

        let service = fx.build();
        let res = service
            .update_booking(
                UserId::new(USER_ID),
                RoomId::new(ROOM_ID),
                BookingId::new(BOOKING_ID),
            )
            .await;
        assert!(matches!(res, Err(AppError::UnauthorizedError)));
    }

    #[tokio::test]
    async fn update_to_a_full_room_is_forbidden() {
        let mut fx = Fixture::new()
            .with_enrollment()
            .with_valid_ticket()
            .with_room(1)
            .with_occupancy(1);
        fx.booking.expect_find_by_id().returning(|_| {
            Ok(Some(booking_in_room(UserId::new(USER_ID), RoomId::new(99))))
        });

        let service = fx.build();
        let res = service
            .update_booking(
                UserId::new(USER_ID),
                RoomId::new(ROOM_ID),
                BookingId::new(BOOKING_ID),
            )
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation(_))));
    }

    #[tokio::test]
    async fn update_fails_not_found_for_unknown_booking() {
        let mut fx = Fixture::new()
            .with_enrollment()
            .with_valid_ticket()
            .with_room(10);
        fx.booking.expect_find_by_id().returning(|_| Ok(None));

        let service = fx.build();
        let res = service
            .update_booking(
                UserId::new(USER_ID),
                RoomId::new(ROOM_ID),
                BookingId::new(BOOKING_ID),
            )
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }

    #[tokio::test]
    async fn find_booking_returns_current_booking() {
        let mut fx = Fixture::new();
        fx.booking.expect_find_by_user_id().returning(|user_id| {
            Ok(Some(booking_in_room(user_id, RoomId::new(ROOM_ID))))
        });

        let service = fx.build();
        let booking = service.find_booking(UserId::new(USER_ID)).await.unwrap();
        assert_eq!(booking.booking_id, BookingId::new(BOOKING_ID));
        assert_eq!(booking.room.room_id, RoomId::new(ROOM_ID));
    }

    #[tokio::test]
    async fn find_booking_fails_not_found_when_user_has_none() {
        let mut fx = Fixture::new();
        fx.booking.expect_find_by_user_id().returning(|_| Ok(None));

        let service = fx.build();
        let res = service.find_booking(UserId::new(USER_ID)).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
    }
}
