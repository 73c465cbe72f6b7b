#![cfg(feature = "std")]

//! Transport-neutral action dispatch and JSON response framing.
//!
//! A request names an action (`new`, `restart`, `state` or `fire`, default
//! `state`) and optionally carries a JSON body. Responses always include the
//! full state snapshot so a client can redraw from any single reply.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::GameError;
use crate::coordinate::Coordinate;
use crate::engine::GameEngine;
use crate::game::FireOutcome;
use crate::session::{SessionId, SessionStore};
use crate::snapshot::StateSnapshot;

/// Operations a client may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    New,
    Restart,
    State,
    Fire,
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Action::New),
            "restart" => Ok(Action::Restart),
            "state" => Ok(Action::State),
            "fire" => Ok(Action::Fire),
            other => Err(GameError::UnknownAction(other.to_string())),
        }
    }
}

/// Successful reply. Shot fields are present only for `fire`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub state: StateSnapshot,
    #[serde(flatten)]
    pub shots: Option<FireOutcome>,
}

impl ActionResponse {
    fn new(state: StateSnapshot, shots: Option<FireOutcome>) -> Self {
        Self {
            ok: true,
            state,
            shots,
        }
    }
}

/// Failed reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub status: u16,
}

impl From<&GameError> for ErrorResponse {
    fn from(err: &GameError) -> Self {
        Self {
            ok: false,
            error: err.to_string(),
            status: err.status_code(),
        }
    }
}

/// One line of the JSON-lines wire protocol.
///
/// The target of a `fire` may be given as a top-level `coord` or inside
/// `body`; a `coord` in `body` takes precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub session: SessionId,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coord: Option<String>,
    #[serde(default)]
    pub body: Value,
}

impl Request {
    /// The body handed to the dispatcher, with a top-level `coord` folded in.
    pub fn body(&self) -> Value {
        let mut body = self.body.clone();
        if let Some(coord) = &self.coord {
            if !body.is_object() {
                body = Value::Object(serde_json::Map::new());
            }
            if let Value::Object(map) = &mut body {
                map.entry("coord")
                    .or_insert_with(|| Value::String(coord.clone()));
            }
        }
        body
    }
}

/// Decode a raw request payload. Empty or unparsable payloads decode to
/// `Value::Null`, which the dispatcher treats as an empty body.
pub fn parse_body(raw: &[u8]) -> Value {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(raw).unwrap_or_else(|e| {
        log::warn!("ignoring unparsable request body: {}", e);
        Value::Null
    })
}

/// The `coord` field of a fire body.
fn body_coord(body: &Value) -> Result<&str, GameError> {
    body.get("coord")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| GameError::MalformedRequestBody("missing coord".to_string()))
}

impl<S: SessionStore> GameEngine<S> {
    /// Run `action` (default `state`) for `session`.
    ///
    /// `fire` on a finished game answers with the unchanged state and no
    /// shots before looking at the body at all.
    pub fn dispatch(
        &self,
        session: &SessionId,
        action: Option<&str>,
        body: &Value,
    ) -> Result<ActionResponse, GameError> {
        let action: Action = action.unwrap_or("state").parse()?;
        match action {
            Action::New => Ok(ActionResponse::new(self.new_game(session)?, None)),
            Action::Restart => Ok(ActionResponse::new(self.restart_game(session)?, None)),
            Action::State => Ok(ActionResponse::new(self.get_state(session)?, None)),
            Action::Fire => self.with_game(session, |game| -> Result<ActionResponse, GameError> {
                if game.is_over() {
                    return Ok(ActionResponse::new(
                        game.snapshot(),
                        Some(FireOutcome::default()),
                    ));
                }
                let target = Coordinate::parse(body_coord(body)?)?;
                let resp = self.fire_at(game, target);
                Ok(ActionResponse::new(resp.state, Some(resp.shots)))
            })?,
        }
    }

    /// Handle one wire request line and render the JSON reply.
    pub fn handle_line(&self, line: &str) -> String {
        let reply = match serde_json::from_str::<Request>(line) {
            Ok(req) => self
                .dispatch(&req.session, req.action.as_deref(), &req.body())
                .map(serde_json::to_value),
            Err(e) => Err(GameError::MalformedRequestBody(e.to_string())),
        };
        let value = match reply {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                log::error!("failed to encode response: {}", e);
                error_value(&GameError::MalformedRequestBody(e.to_string()))
            }
            Err(e) => {
                log::warn!("request failed: {}", e);
                error_value(&e)
            }
        };
        value.to_string()
    }
}

pub(crate) fn error_value(err: &GameError) -> Value {
    serde_json::to_value(ErrorResponse::from(err)).unwrap_or(Value::Null)
}
