//! Request handlers for the gateway's HTTP surface.
//!
//! Thin handlers: extract parameters, call the manager client, write the
//! classified body. Outcome nuance lives in the JSON body, not the HTTP
//! status code: `/ports` always answers 200 and the mutating routes always
//! answer 201, a shape existing consumers depend on.
//!
//! Malformed input (non-integer port, unreadable body) does not reject the
//! request: an error envelope fragment is written into the body and the
//! upstream call still goes out with zero/empty fields, preserving the
//! behavior callers observe today.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::manager::Envelope;

use super::server::AppState;

/// `GET /healthcheck`: liveness probe; never touches the upstream.
pub async fn healthcheck() -> &'static str {
    "ok"
}

/// `GET /ports`: relay `ping` and pass the statistics (or envelope) back.
pub async fn traffic_statistics(State(state): State<AppState>) -> Response {
    let reply = state.manager.traffic_statistics().await;
    (StatusCode::OK, reply.into_body()).into_response()
}

/// `POST /ports/{port_number}`: relay `add`, with the raw request body as
/// the plaintext password.
pub async fn add_port(
    State(state): State<AppState>,
    Path(port_number): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let mut out = String::new();

    let server_port = match parse_port(&port_number) {
        Ok(port) => port,
        Err(fragment) => {
            out.push_str(&fragment);
            0
        }
    };

    let password = match read_password(body) {
        Ok(password) => password,
        Err(fragment) => {
            out.push_str(&fragment);
            String::new()
        }
    };

    let reply = state.manager.add_port(server_port, password).await;
    out.push_str(&reply.into_body());

    (StatusCode::CREATED, out).into_response()
}

/// `DELETE /ports/{port_number}`: relay `remove`.
pub async fn remove_port(
    State(state): State<AppState>,
    Path(port_number): Path<String>,
) -> Response {
    let mut out = String::new();

    let server_port = match parse_port(&port_number) {
        Ok(port) => port,
        Err(fragment) => {
            out.push_str(&fragment);
            0
        }
    };

    let reply = state.manager.remove_port(server_port).await;
    out.push_str(&reply.into_body());

    (StatusCode::CREATED, out).into_response()
}

fn parse_port(raw: &str) -> Result<u16, String> {
    raw.parse::<u16>().map_err(|_| {
        tracing::warn!(port_number = %raw, "Invalid port number in request path");
        Envelope::with_reason("invalid_port", "not_a_port_number").to_json()
    })
}

fn read_password(body: Result<Bytes, BytesRejection>) -> Result<String, String> {
    body.ok()
        .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
        .ok_or_else(|| {
            tracing::warn!("Unreadable password in request body");
            Envelope::with_reason("invalid_password", "port_password_invalid_or_undefined")
                .to_json()
        })
}
