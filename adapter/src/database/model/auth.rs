use crate::redis::model::RedisKey;
use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppError;

pub struct AuthorizationKey(String);

pub struct AuthorizedUserId(UserId);

impl AuthorizedUserId {
    pub fn into_inner(self) -> UserId {
        self.0
    }
}

impl From<&AccessToken> for AuthorizationKey {
    fn from(value: &AccessToken) -> Self {
        Self(value.0.to_string())
    }
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let user_id = value.parse::<UserId>().map_err(|e| {
            AppError::ConversionEntityError(format!("ユーザー ID に変換できません: {e}"))
        })?;
        Ok(Self(user_id))
    }
}
