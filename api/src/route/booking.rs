use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{book_room, change_booking_room, show_current_booking};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", get(show_current_booking))
        .route("/", post(book_room))
        .route("/:booking_id", put(change_booking_room));

    Router::new().nest("/booking", booking_routers)
}
