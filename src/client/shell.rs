use crate::client::api::AuthApi;
use crate::client::pages::{
    FormState, LoginPage, Navbar, PrivateOutcome, Redirect, Route, SignupPage, load_private,
    logout,
};
use crate::client::storage::SessionStorage;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::error;

pub const HELP: &str = "\
commands:
  signup <email> <password>
  login <email> <password>
  private
  logout
  nav
  status
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Signup { email: String, password: String },
    Login { email: String, password: String },
    Private,
    Logout,
    Nav,
    Status,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("usage: {0} <email> <password>")]
    Usage(&'static str),
}

pub fn parse_command(line: &str) -> Result<ShellCommand, ParseError> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Err(ParseError::Empty);
    };
    let args: Vec<&str> = parts.collect();

    let credentials = |usage: &'static str| match args.as_slice() {
        [email, password] => Ok((email.to_string(), password.to_string())),
        _ => Err(ParseError::Usage(usage)),
    };

    match name {
        "signup" => {
            let (email, password) = credentials("signup")?;
            Ok(ShellCommand::Signup { email, password })
        }
        "login" => {
            let (email, password) = credentials("login")?;
            Ok(ShellCommand::Login { email, password })
        }
        "private" => Ok(ShellCommand::Private),
        "logout" => Ok(ShellCommand::Logout),
        "nav" => Ok(ShellCommand::Nav),
        "status" => Ok(ShellCommand::Status),
        "help" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}

/// One client session: an API handle and the storage that dies with it.
pub struct Shell<A: AuthApi, S: SessionStorage> {
    api: A,
    storage: S,
    location: Route,
}

impl<A: AuthApi, S: SessionStorage> Shell<A, S> {
    pub fn new(api: A, storage: S) -> Self {
        Self {
            api,
            storage,
            location: Route::Home,
        }
    }

    pub fn location(&self) -> Route {
        self.location
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn follow(&mut self, redirect: Redirect) -> String {
        self.location = redirect.to;
        redirect.to_string()
    }

    /// Runs `command` and returns what the user should see.
    pub async fn execute(&mut self, command: ShellCommand) -> String {
        match command {
            ShellCommand::Signup { email, password } => {
                self.location = Route::Signup;
                let mut page = SignupPage::new(FormState::new(email, password));
                match page.submit(&self.api).await {
                    Some(redirect) => self.follow(redirect),
                    None => format!("error: {}", page.form.error.unwrap_or_default()),
                }
            }
            ShellCommand::Login { email, password } => {
                self.location = Route::Login;
                let mut page = LoginPage::new(FormState::new(email, password));
                match page.submit(&self.api, &mut self.storage).await {
                    Some(redirect) => self.follow(redirect),
                    None => format!("error: {}", page.form.error.unwrap_or_default()),
                }
            }
            ShellCommand::Private => {
                self.location = Route::Private;
                match load_private(&self.api, &mut self.storage).await {
                    PrivateOutcome::Render(view) => view.to_string(),
                    PrivateOutcome::Redirect(redirect) => self.follow(redirect),
                }
            }
            ShellCommand::Logout => {
                let redirect = logout(&self.api, &mut self.storage).await;
                self.follow(redirect)
            }
            ShellCommand::Nav => Navbar::render(&self.storage),
            ShellCommand::Status => match self.api.status().await {
                Ok(status) => format!("{} ({})", status.status, status.time),
                Err(e) => format!("error: {e}"),
            },
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => "bye".to_string(),
        }
    }

    /// Reads commands line by line from `input`, writing each result to
    /// `output`, until `quit` or end of input.
    ///
    /// A read error ends the session and is returned to the caller.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "Failed to read command");
                    return Err(e);
                }
            };
            let (reply, quit) = match parse_command(&line) {
                Ok(command) => {
                    let quit = command == ShellCommand::Quit;
                    (self.execute(command).await, quit)
                }
                Err(e) => (e.to_string(), false),
            };
            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
            if quit {
                break;
            }
        }
        output.flush().await
    }
}
