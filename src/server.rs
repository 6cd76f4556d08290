use axum::{
    Extension, Router,
    routing::{get, post},
};
use tokio::net::TcpListener;

use crate::{
    Res, api,
    config::CALLBACK_PATH,
    types::{CallbackOrigin, CallbackSlot},
};

/// Routes of the callback server. Only posts from `origin` reach the slot.
pub fn router(slot: CallbackSlot, origin: CallbackOrigin) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(CALLBACK_PATH, get(api::callback))
        .route("/fragment", post(api::fragment))
        .layer(Extension(slot))
        .layer(Extension(origin))
}

/// Serves the callback routes on an already bound listener until the task is
/// aborted.
pub async fn serve(listener: TcpListener, slot: CallbackSlot, origin: CallbackOrigin) -> Res<()> {
    axum::serve(listener, router(slot, origin)).await?;
    Ok(())
}
