//! Route table

use super::contact::{handle_root, handle_send_message};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub const SEND_MESSAGE_PATH: &str = "/send-message";

pub fn create_routes(liveness_route: bool) -> Router<AppState> {
    let router = Router::new().route(SEND_MESSAGE_PATH, post(handle_send_message));

    if liveness_route {
        router.route("/", get(handle_root))
    } else {
        router
    }
}
