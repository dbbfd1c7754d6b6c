use super::id::{EnrollmentId, UserId};

// 参加登録。チケットおよび予約操作の前提条件で、存在確認にのみ使う。
#[derive(Debug)]
pub struct Enrollment {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
}
