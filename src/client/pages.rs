//! Page flows of the client.
//!
//! Each page is a small state value plus an async action that talks to an
//! [`AuthApi`] and reads or writes [`SessionStorage`]. Actions report where
//! the user should go next as a [`Redirect`]; `None` means stay on the page.

use crate::application::validation::MIN_PASSWORD_LEN;
use crate::client::api::AuthApi;
use crate::client::storage::SessionStorage;
use crate::domain::user::Credentials;
use std::fmt;
use tracing::{error, info, warn};

pub const SIGNUP_SUCCESS_NOTICE: &str = "Registration successful! Please login.";
pub const SIGNUP_FALLBACK_ERROR: &str = "Registration failed. Please try again.";
pub const LOGIN_FALLBACK_ERROR: &str = "Login failed. Please try again.";
pub const PRIVATE_FALLBACK_ERROR: &str = "Unauthorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Signup,
    Login,
    Private,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Signup => "/signup",
            Route::Login => "/login",
            Route::Private => "/private",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub to: Route,
    pub notice: Option<String>,
}

impl Redirect {
    pub fn to(route: Route) -> Self {
        Self {
            to: route,
            notice: None,
        }
    }

    pub fn with_notice(route: Route, notice: impl Into<String>) -> Self {
        Self {
            to: route,
            notice: Some(notice.into()),
        }
    }
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-> {}", self.to.path())?;
        if let Some(notice) = &self.notice {
            write!(f, " ({notice})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Home,
    Signup,
    Login,
    Private,
    Logout,
}

impl NavLink {
    pub fn label(self) -> &'static str {
        match self {
            NavLink::Home => "Home",
            NavLink::Signup => "Signup",
            NavLink::Login => "Login",
            NavLink::Private => "Private",
            NavLink::Logout => "Logout",
        }
    }
}

pub struct Navbar;

impl Navbar {
    pub fn links<S: SessionStorage>(storage: &S) -> Vec<NavLink> {
        if storage.is_authenticated() {
            vec![NavLink::Home, NavLink::Private, NavLink::Logout]
        } else {
            vec![NavLink::Home, NavLink::Signup, NavLink::Login]
        }
    }

    pub fn render<S: SessionStorage>(storage: &S) -> String {
        Self::links(storage)
            .into_iter()
            .map(|link| format!("[{}]", link.label()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Drops the session token and sends the user to the login page.
///
/// The server is told about the logout when a token exists, but its answer
/// never blocks the local logout.
pub async fn logout<A: AuthApi, S: SessionStorage>(api: &A, storage: &mut S) -> Redirect {
    if let Some(token) = storage.token() {
        if let Err(e) = api.logout(&token).await {
            warn!(error = %e, "Server-side logout failed");
        }
    }
    storage.clear_token();
    info!("Logged out");
    Redirect::to(Route::Login)
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub email: String,
    pub password: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl FormState {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), self.password.trim())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupPage {
    pub form: FormState,
}

impl SignupPage {
    pub fn new(form: FormState) -> Self {
        Self { form }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.form.is_loading {
            "Creating account..."
        } else {
            "Sign Up"
        }
    }

    /// Registers the account. The issued token is not kept; the user is
    /// sent to log in.
    pub async fn submit<A: AuthApi>(&mut self, api: &A) -> Option<Redirect> {
        self.form.error = None;

        // Same floor as the password input's minimum length
        if self.form.password.chars().count() < MIN_PASSWORD_LEN {
            self.form.error = Some(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ));
            return None;
        }

        self.form.is_loading = true;
        let result = api.signup(&self.form.credentials()).await;
        self.form.is_loading = false;

        match result {
            Ok(_) => Some(Redirect::with_notice(Route::Login, SIGNUP_SUCCESS_NOTICE)),
            Err(e) => {
                error!(error = %e, "Signup error");
                self.form.error = Some(e.user_message(SIGNUP_FALLBACK_ERROR));
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    pub form: FormState,
}

impl LoginPage {
    pub fn new(form: FormState) -> Self {
        Self { form }
    }

    pub async fn submit<A: AuthApi, S: SessionStorage>(
        &mut self,
        api: &A,
        storage: &mut S,
    ) -> Option<Redirect> {
        self.form.error = None;
        self.form.is_loading = true;
        let result = api.login(&self.form.credentials()).await;
        self.form.is_loading = false;

        match result {
            Ok(session) => {
                storage.set_token(session.token);
                info!(user_id = %session.user.id, "Logged in");
                Some(Redirect::to(Route::Private))
            }
            Err(e) => {
                warn!(error = %e, "Login error");
                self.form.error = Some(e.user_message(LOGIN_FALLBACK_ERROR));
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateView {
    pub msg: String,
    pub email: String,
}

impl fmt::Display for PrivateView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Private Page")?;
        writeln!(f, "Welcome!")?;
        writeln!(f, "{}", self.msg)?;
        write!(f, "Email: {}", self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivateOutcome {
    Render(PrivateView),
    Redirect(Redirect),
}

/// Loads the private page.
///
/// Without a token no request is made. Any failure of the request clears
/// the token; there is no distinction between transient and permanent
/// errors.
pub async fn load_private<A: AuthApi, S: SessionStorage>(
    api: &A,
    storage: &mut S,
) -> PrivateOutcome {
    let Some(token) = storage.token() else {
        return PrivateOutcome::Redirect(Redirect::to(Route::Login));
    };

    match api.private(&token).await {
        Ok(body) => PrivateOutcome::Render(PrivateView {
            msg: body.msg,
            email: body.user.email,
        }),
        Err(e) => {
            error!(error = %e, "Failed to load private data");
            storage.clear_token();
            PrivateOutcome::Redirect(Redirect::with_notice(
                Route::Login,
                e.user_message(PRIVATE_FALLBACK_ERROR),
            ))
        }
    }
}
