pub mod auth;
pub mod booking;
pub mod enrollment;
pub mod health;
pub mod room;
pub mod ticket;
pub mod user;
