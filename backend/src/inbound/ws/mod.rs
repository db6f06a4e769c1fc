//! WebSocket inbound adapter pushing live notifications to clients.
//!
//! Responsibilities:
//! - validate upgrade requests (origin allow-list, bearer identity)
//! - subscribe the session to the owner's channel on the [`NotificationHub`]
//! - keep framing and heartbeats at the edge of the system

use actix_web::web::{self, Payload};
use actix_web::{
    HttpRequest, HttpResponse, get,
    http::header::{HeaderValue, ORIGIN},
};
use serde::Deserialize;
use tracing::{error, info, warn};
use url::Url;

use crate::domain::Error;
use crate::inbound::http::auth::{bearer_token, verify_token};

mod session;

pub mod hub;
pub mod messages;
pub mod state;

pub use hub::NotificationHub;

/// Query string accepted by the upgrade endpoint.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    token: Option<String>,
}

/// Handle WebSocket upgrade for the `/ws` endpoint.
///
/// Browsers cannot set headers on upgrade requests, so the bearer token may
/// be passed as `?token=`; an `Authorization` header is accepted as well.
#[get("/ws")]
pub async fn ws_entry(
    state: web::Data<state::WsState>,
    query: web::Query<WsQuery>,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let mut origin_iter = req.headers().get_all(ORIGIN);
    let origin_header = origin_iter.next().ok_or_else(|| {
        error!("Missing Origin header on WebSocket upgrade");
        Error::forbidden("Origin not allowed")
    })?;
    if origin_iter.next().is_some() {
        error!("Multiple Origin headers on WebSocket upgrade");
        return Err(Error::invalid_request("Invalid Origin header").into());
    }
    validate_origin(&state, origin_header)?;

    let token = match query.token.as_deref() {
        Some(token) if !token.trim().is_empty() => token,
        _ => bearer_token(req.headers())?,
    };
    let identity = verify_token(state.identity.as_ref(), token).await?;
    let owner = identity.owner().clone();

    let (response, session, messages) = actix_ws::handle(&req, stream).map_err(|error| {
        error!(error = %error, "WebSocket upgrade failed");
        error
    })?;

    let notifications = state.hub.subscribe(&owner);
    info!(owner = %owner, "notification socket upgraded");
    actix_web::rt::spawn(session::handle_ws_session(
        owner,
        notifications,
        session,
        messages,
    ));
    Ok(response)
}

fn validate_origin(state: &state::WsState, origin_header: &HeaderValue) -> Result<(), Error> {
    let origin_value = origin_header.to_str().map_err(|error| {
        error!(error = %error, "Failed to parse Origin header as string");
        Error::invalid_request("Invalid Origin header")
    })?;

    let origin = Url::parse(origin_value).map_err(|error| {
        error!(error = %error, "Failed to parse Origin header as URL");
        Error::invalid_request("Invalid Origin header")
    })?;

    if state.allows_origin(&origin) {
        Ok(())
    } else {
        warn!(
            origin = origin_value,
            "Rejected WS upgrade due to disallowed Origin"
        );
        Err(Error::forbidden("Origin not allowed"))
    }
}
