// API controller: holds the server origin, the auth token and the two
// callbacks through which request failures and notices reach the user.
use serde::Deserialize;
use tracing::{error, info};

/// How a request failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server answered with a non 2xx status.
    Response { status: u16, body: Vec<u8> },
    /// The request went out but nothing came back.
    NoResponse,
    /// The request could not be set up.
    Request(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: String,
    pub message_html: String,
}

#[derive(Deserialize)]
struct ServerMessage {
    message: String,
}

/// Maps a failure to the title and HTML body shown to the user.
pub fn parse_error(err: &ApiError) -> ErrorReport {
    match err {
        ApiError::Response { body, .. } => {
            let message_html = match serde_json::from_slice::<ServerMessage>(body) {
                Ok(server) => format!("<i>{}</i>", server.message),
                Err(e) => format!(
                    "Le format d'erreur du serveur n'a pu être décodé.<br/>Détails : <i>{}</i>",
                    e
                ),
            };
            ErrorReport { kind: "Erreur côté serveur".to_string(), message_html }
        }
        ApiError::NoResponse => ErrorReport {
            kind: "Aucune réponse du serveur".to_string(),
            message_html: "La requête a bien été envoyée, mais le serveur n'a donné aucune réponse..."
                .to_string(),
        },
        ApiError::Request(details) => ErrorReport {
            kind: "Erreur du client".to_string(),
            message_html: format!("La requête n'a pu être mise en place. <br/>Détails : {}", details),
        },
    }
}

pub type ErrorCallback = Box<dyn Fn(&str, &str) + Send + Sync>;
pub type MessageCallback = Box<dyn Fn(&str, Option<&str>) + Send + Sync>;

pub struct ApiController {
    base_url: String,
    auth_token: String,
    on_error: ErrorCallback,
    show_message: MessageCallback,
}

impl ApiController {
    pub fn new(base_url: impl Into<String>, on_error: ErrorCallback, show_message: MessageCallback) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: String::new(),
            on_error,
            show_message,
        }
    }

    /// Controller whose callbacks only log.
    pub fn logging(base_url: impl Into<String>) -> Self {
        Self::new(
            base_url,
            Box::new(|kind: &str, html: &str| error!(kind, html, "Request failed")),
            Box::new(|message: &str, color: Option<&str>| info!(notice = message, color, "Notice")),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    pub fn has_token(&self) -> bool {
        !self.auth_token.is_empty()
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.auth_token = token.into();
    }

    /// `base_url` joined with `path`, with exactly one slash between them.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn handle_error(&self, err: &ApiError) {
        let report = parse_error(err);
        error!(kind = %report.kind, error = ?err, "API call failed");
        (self.on_error)(&report.kind, &report.message_html);
    }

    pub fn show_message(&self, message: &str, color: Option<&str>) {
        (self.show_message)(message, color);
    }
}
