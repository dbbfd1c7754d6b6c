use shared::error::AppError;

pub trait RedisKey {
    type Value: TryFrom<String, Error = AppError>;

    fn inner(&self) -> String;
}
