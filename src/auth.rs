//! Login and registration submission.
//!
//! Both forms post the same two fields and react to the same JSON shape, so
//! they share [`submit_credentials`] and differ only in [`AuthAction`].

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::config::AuthConfig;
use crate::error::{TransportError, ValidationError};

/// Characters left alone by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    pub fn endpoint(self, cfg: &AuthConfig) -> &str {
        match self {
            AuthAction::Login => &cfg.login_endpoint,
            AuthAction::Register => &cfg.register_endpoint,
        }
    }

    /// Prefix for diagnostic log lines.
    pub fn log_label(self) -> &'static str {
        match self {
            AuthAction::Login => "Login Error",
            AuthAction::Register => "Registration Error",
        }
    }

    /// Shown to the user when the request fails for any non-server reason.
    pub fn failure_message(self) -> &'static str {
        match self {
            AuthAction::Login => "An error occurred during login.",
            AuthAction::Register => "An error occurred during registration.",
        }
    }
}

/// What the page offers to the submitter.
pub trait AuthPage {
    /// Raw username field text, `None` if the field is missing.
    fn username(&self) -> Option<String>;
    /// `content` of the CSRF meta tag, `None` if the tag is missing.
    fn csrf_token(&self) -> Option<String>;
    /// Blocking user notification.
    fn alert(&self, message: &str);
    fn navigate(&self, target: &str);
}

/// One-shot form POST. Returns the response body whatever the HTTP status.
#[allow(async_fn_in_trait)]
pub trait CredentialTransport {
    async fn post_form(&self, endpoint: &str, body: &str) -> Result<String, TransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    csrf_token: String,
}

impl Credentials {
    pub fn collect(
        username: Option<&str>,
        csrf_token: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let username = username.map(str::trim).unwrap_or_default();
        if username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        let csrf_token = csrf_token
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::MissingCsrfToken)?;
        Ok(Self {
            username: username.to_string(),
            csrf_token: csrf_token.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn form_body(&self) -> String {
        format!(
            "username={}&csrf_token={}",
            utf8_percent_encode(&self.username, URI_COMPONENT),
            utf8_percent_encode(&self.csrf_token, URI_COMPONENT)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AuthResponse {
    pub fn from_body(body: &str) -> Result<Self, TransportError> {
        serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stopped locally; no request was made.
    Rejected(ValidationError),
    Navigated(String),
    /// Server said no; its message (or the generic one) was shown.
    ServerMessage(String),
    Failed(TransportError),
}

pub async fn submit_credentials<P, T>(
    action: AuthAction,
    page: &P,
    transport: &T,
    cfg: &AuthConfig,
) -> SubmitOutcome
where
    P: AuthPage,
    T: CredentialTransport,
{
    let username = page.username();
    let token = page.csrf_token();
    let creds = match Credentials::collect(username.as_deref(), token.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            page.alert(&e.to_string());
            return SubmitOutcome::Rejected(e);
        }
    };

    let endpoint = action.endpoint(cfg);
    tracing::debug!(endpoint, username = creds.username(), "submitting credentials");

    let result = transport
        .post_form(endpoint, &creds.form_body())
        .await
        .and_then(|body| AuthResponse::from_body(&body));

    let response = match result {
        Ok(r) => r,
        Err(e) => return fail(action, page, e),
    };

    if response.success {
        match response.redirect {
            Some(target) => {
                page.navigate(&target);
                SubmitOutcome::Navigated(target)
            }
            None => fail(action, page, TransportError::MissingRedirect),
        }
    } else {
        let message = response
            .message
            .unwrap_or_else(|| action.failure_message().to_string());
        page.alert(&message);
        SubmitOutcome::ServerMessage(message)
    }
}

fn fail<P: AuthPage>(action: AuthAction, page: &P, err: TransportError) -> SubmitOutcome {
    tracing::error!(error = %err, "{}", action.log_label());
    page.alert(action.failure_message());
    SubmitOutcome::Failed(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Page {
        username: Option<String>,
        token: Option<String>,
        alerts: RefCell<Vec<String>>,
        navigations: RefCell<Vec<String>>,
    }

    impl Page {
        fn new(username: &str, token: Option<&str>) -> Self {
            Self {
                username: Some(username.to_string()),
                token: token.map(str::to_string),
                ..Self::default()
            }
        }
    }

    impl AuthPage for Page {
        fn username(&self) -> Option<String> {
            self.username.clone()
        }

        fn csrf_token(&self) -> Option<String> {
            self.token.clone()
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn navigate(&self, target: &str) {
            self.navigations.borrow_mut().push(target.to_string());
        }
    }

    struct Server {
        reply: Result<String, TransportError>,
        requests: RefCell<Vec<(String, String)>>,
    }

    impl Server {
        fn replying(body: &str) -> Self {
            Self {
                reply: Ok(body.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing(err: TransportError) -> Self {
            Self {
                reply: Err(err),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl CredentialTransport for Server {
        async fn post_form(&self, endpoint: &str, body: &str) -> Result<String, TransportError> {
            self.requests
                .borrow_mut()
                .push((endpoint.to_string(), body.to_string()));
            self.reply.clone()
        }
    }

    fn run(action: AuthAction, page: &Page, server: &Server) -> SubmitOutcome {
        pollster::block_on(submit_credentials(
            action,
            page,
            server,
            &AuthConfig::default(),
        ))
    }

    #[test]
    fn blank_username_is_rejected_without_request() {
        for name in ["", "   ", "\t\n"] {
            let page = Page::new(name, Some("tok"));
            let server = Server::replying(r#"{"success":true,"redirect":"/"}"#);
            let out = run(AuthAction::Login, &page, &server);
            assert_eq!(out, SubmitOutcome::Rejected(ValidationError::EmptyUsername));
            assert_eq!(*page.alerts.borrow(), ["Please enter a username."]);
            assert!(server.requests.borrow().is_empty());
        }
    }

    #[test]
    fn missing_username_field_counts_as_empty() {
        let page = Page {
            token: Some("tok".to_string()),
            ..Page::default()
        };
        let server = Server::replying("{}");
        let out = run(AuthAction::Register, &page, &server);
        assert_eq!(out, SubmitOutcome::Rejected(ValidationError::EmptyUsername));
        assert!(server.requests.borrow().is_empty());
    }

    #[test]
    fn missing_csrf_is_rejected_without_request() {
        for token in [None, Some("")] {
            let page = Page::new("alice", token);
            let server = Server::replying(r#"{"success":true,"redirect":"/"}"#);
            let out = run(AuthAction::Login, &page, &server);
            assert_eq!(out, SubmitOutcome::Rejected(ValidationError::MissingCsrfToken));
            assert_eq!(
                *page.alerts.borrow(),
                ["CSRF Token not found. Please reload the page."]
            );
            assert!(server.requests.borrow().is_empty());
        }
    }

    #[test]
    fn success_navigates_to_exact_redirect() {
        let page = Page::new("  alice ", Some("tok"));
        let server = Server::replying(r#"{"success":true,"redirect":"/users/7?tab=movies"}"#);
        let out = run(AuthAction::Login, &page, &server);
        assert_eq!(out, SubmitOutcome::Navigated("/users/7?tab=movies".to_string()));
        assert_eq!(*page.navigations.borrow(), ["/users/7?tab=movies"]);
        assert!(page.alerts.borrow().is_empty());

        let requests = server.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "/login");
        assert_eq!(requests[0].1, "username=alice&csrf_token=tok");
    }

    #[test]
    fn failure_shows_server_message_verbatim() {
        let page = Page::new("bob", Some("tok"));
        let server = Server::replying(r#"{"success":false,"message":"Username taken"}"#);
        let out = run(AuthAction::Register, &page, &server);
        assert_eq!(out, SubmitOutcome::ServerMessage("Username taken".to_string()));
        assert_eq!(*page.alerts.borrow(), ["Username taken"]);
        assert!(page.navigations.borrow().is_empty());
        assert_eq!(server.requests.borrow()[0].0, "/register");
    }

    #[test]
    fn failure_without_message_uses_generic_text() {
        let page = Page::new("bob", Some("tok"));
        let server = Server::replying(r#"{"success":false}"#);
        run(AuthAction::Register, &page, &server);
        assert_eq!(
            *page.alerts.borrow(),
            ["An error occurred during registration."]
        );
    }

    #[test]
    fn transport_errors_never_reach_the_user() {
        let cases = [
            Server::failing(TransportError::Network("connection refused".to_string())),
            Server::failing(TransportError::Timeout { ms: 10_000 }),
            Server::replying("<html>Internal Server Error</html>"),
            Server::replying(r#"{"success":true}"#),
        ];
        for server in cases {
            let page = Page::new("carol", Some("tok"));
            let out = run(AuthAction::Login, &page, &server);
            assert!(matches!(out, SubmitOutcome::Failed(_)), "{out:?}");
            assert_eq!(*page.alerts.borrow(), ["An error occurred during login."]);
            assert!(page.navigations.borrow().is_empty());
        }
    }

    #[test]
    fn body_is_uri_component_encoded() {
        let c = Credentials::collect(Some("a b&c=d/é"), Some("x+y/z==")).expect("valid");
        assert_eq!(
            c.form_body(),
            "username=a%20b%26c%3Dd%2F%C3%A9&csrf_token=x%2By%2Fz%3D%3D"
        );

        let c = Credentials::collect(Some("it's-(ok)_~!*."), Some("t")).expect("valid");
        assert_eq!(c.form_body(), "username=it's-(ok)_~!*.&csrf_token=t");
    }

    #[test]
    fn endpoints_follow_config() {
        let cfg = AuthConfig {
            login_endpoint: "/auth/login".to_string(),
            ..AuthConfig::default()
        };
        assert_eq!(AuthAction::Login.endpoint(&cfg), "/auth/login");
        assert_eq!(AuthAction::Register.endpoint(&cfg), "/register");
    }

    #[test]
    fn response_ignores_unknown_fields() {
        let r = AuthResponse::from_body(r#"{"success":true,"redirect":"/","user_id":3}"#)
            .expect("decodes");
        assert!(r.success);
        assert_eq!(r.redirect.as_deref(), Some("/"));
        assert!(AuthResponse::from_body("null").is_err());
    }
}
