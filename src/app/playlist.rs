use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};

use super::csrf::CsrfToken;
use super::notify::Notifier;
use crate::error::MutationError;
use crate::http;

const SOFT_SERVER_WARNING: &str = "There is a slight inconvenience, please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistAction {
    Add,
    Remove,
}

impl PlaylistAction {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Add => "/add_to_playlist",
            Self::Remove => "/remove_from_playlist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationRequest {
    pub episode_id: String,
    pub playlist_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Success {
    Created,
    AlreadyExists,
    Removed,
}

impl Success {
    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Episode added to the playlist successfully!",
            Self::AlreadyExists => "Episode already exists in the playlist!",
            Self::Removed => "Episode removed from playlist successfully!",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Success(Success, Option<Value>),
    BadRequest,
    NotFound,
    ServerError,
    UnexpectedStatus(u16),
    NetworkFailure(String),
    MalformedResponse(String),
    MissingToken,
    TokenUnavailable(String),
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(..))
    }

    pub(crate) fn from_error(err: MutationError) -> Self {
        match err {
            MutationError::BadRequest => Self::BadRequest,
            MutationError::NotFound => Self::NotFound,
            MutationError::ServerError => Self::ServerError,
            MutationError::UnexpectedStatus(code) => Self::UnexpectedStatus(code),
            MutationError::MissingToken => Self::MissingToken,
            MutationError::Network(detail) => Self::NetworkFailure(detail),
            MutationError::ResponseParse(detail) => Self::MalformedResponse(detail),
            MutationError::TokenPage(detail) => Self::TokenUnavailable(detail),
        }
    }
}

/// Maps a response status to its success kind or classified failure.
pub fn classify(action: PlaylistAction, status: u16) -> Result<Success, MutationError> {
    match (action, status) {
        (PlaylistAction::Add, 200) => Ok(Success::AlreadyExists),
        (PlaylistAction::Add, 201) => Ok(Success::Created),
        (PlaylistAction::Remove, 200) => Ok(Success::Removed),
        (_, 400) => Err(MutationError::BadRequest),
        (_, 404) => Err(MutationError::NotFound),
        (_, 500) => Err(MutationError::ServerError),
        (_, code) => Err(MutationError::UnexpectedStatus(code)),
    }
}

pub(crate) fn parse_payload(body: &str) -> Result<Value, MutationError> {
    serde_json::from_str(body).map_err(|err| MutationError::ResponseParse(err.to_string()))
}

/// Logs and shows a failure. Every error path of a mutation ends here.
pub fn report_failure(err: &MutationError, notifier: &mut dyn Notifier) {
    error!(error = %err, "playlist request failed");
    notifier.notify(&format!("Error: {err}"));
}

pub struct PlaylistClient {
    agent: ureq::Agent,
    base_url: String,
    token: CsrfToken,
    cookie: Option<String>,
    soft_server_warning: bool,
}

impl PlaylistClient {
    pub fn new(agent: ureq::Agent, base_url: impl Into<String>, token: CsrfToken) -> Self {
        Self {
            agent,
            base_url: base_url.into(),
            token,
            cookie: None,
            soft_server_warning: true,
        }
    }

    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }

    /// Disables the extra warning that precedes the generic error on a 500.
    pub fn with_soft_server_warning(mut self, enabled: bool) -> Self {
        self.soft_server_warning = enabled;
        self
    }

    pub fn add_to_playlist(
        &self,
        episode_id: &str,
        playlist_id: &str,
        notifier: &mut dyn Notifier,
    ) -> MutationOutcome {
        self.mutate(PlaylistAction::Add, episode_id, playlist_id, notifier)
    }

    pub fn remove_from_playlist(
        &self,
        episode_id: &str,
        playlist_id: &str,
        notifier: &mut dyn Notifier,
    ) -> MutationOutcome {
        self.mutate(PlaylistAction::Remove, episode_id, playlist_id, notifier)
    }

    fn mutate(
        &self,
        action: PlaylistAction,
        episode_id: &str,
        playlist_id: &str,
        notifier: &mut dyn Notifier,
    ) -> MutationOutcome {
        let request = MutationRequest {
            episode_id: episode_id.to_string(),
            playlist_id: playlist_id.to_string(),
        };
        match self.send(action, &request, notifier) {
            Ok((success, payload)) => MutationOutcome::Success(success, payload),
            Err(err) => {
                report_failure(&err, notifier);
                MutationOutcome::from_error(err)
            }
        }
    }

    fn send(
        &self,
        action: PlaylistAction,
        request: &MutationRequest,
        notifier: &mut dyn Notifier,
    ) -> Result<(Success, Option<Value>), MutationError> {
        let body = serde_json::to_string(request)
            .map_err(|err| MutationError::Network(format!("request encode failed: {err}")))?;
        let url = http::join_url(&self.base_url, action.endpoint());

        let mut headers = vec![("X-CSRFToken", self.token.as_str())];
        if let Some(cookie) = self.cookie.as_deref() {
            headers.push(("Cookie", cookie));
        }

        debug!(%url, episode_id = %request.episode_id, playlist_id = %request.playlist_id, "sending playlist request");
        let reply = http::post_json(&self.agent, &url, &headers, &body).map_err(MutationError::Network)?;

        let success = match classify(action, reply.status) {
            Ok(success) => success,
            Err(MutationError::ServerError) if self.soft_server_warning => {
                notifier.notify(SOFT_SERVER_WARNING);
                return Err(MutationError::ServerError);
            }
            Err(err) => return Err(err),
        };
        notifier.notify(success.message());

        let payload = match parse_payload(&reply.body) {
            Ok(value) => {
                info!(payload = %value, "playlist response");
                Some(value)
            }
            Err(err) => {
                debug!(error = %err, "playlist response had no JSON payload");
                None
            }
        };
        Ok((success, payload))
    }
}
