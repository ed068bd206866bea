//! Terminal driving adapter.
//!
//! The shell owns what the domain deliberately does not: carrying out
//! navigation effects, rendering snapshots, and mapping terminal resolution
//! states to exit status. Protected commands revalidate the session first
//! and refuse to run anonymously, the command-line analogue of redirecting
//! to the login surface.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{IdentityStore, IdentityStoreError, ShortenerApi, TokioSleeper};
use crate::domain::{
    ClassifiedError, FeedDirective, FeedObserver, LinkFeed, LinkSnapshot, LinkStatus,
    LoginRequest, RegisterRequest, Resolution, Resolver, SessionCache, ShortenRequest,
    ShortenValidationError,
};
use crate::outbound::http::{HttpRedirectProbe, HttpShortenerApi};
use crate::outbound::persistence::FileIdentityStore;
use crate::settings::{ClientSettings, SettingsError};

/// ZipLink command-line client.
#[derive(Debug, Parser)]
#[command(
    name = "ziplink",
    about = "Client for the ZipLink URL-shortening service",
    version
)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed by the shell.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account and start a session.
    Register {
        /// Display name for the new account.
        #[arg(long)]
        name: String,
        /// Account email address.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Start a session.
    Login {
        /// Account email address.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// End the session. Local state clears even if the server is down.
    Logout,
    /// List your links with click counts and expiry states.
    Links,
    /// Watch your links, refreshing every ten seconds until interrupted.
    Watch,
    /// Create a short link.
    Shorten {
        /// Destination URL to shorten.
        long: String,
        /// Custom short code instead of a generated one.
        #[arg(long)]
        custom: Option<String>,
        /// Expiry instant (RFC 3339); the server defaults to 30 days.
        #[arg(long)]
        expiry: Option<DateTime<Utc>>,
    },
    /// Delete a link by id.
    Delete {
        /// Server-assigned link id.
        id: String,
    },
    /// Resolve a short code and print the navigation target.
    Resolve {
        /// Short code from a shared link.
        code: String,
    },
}

/// Failures surfaced to the terminal user.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration did not validate.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    /// The identity store is unusable.
    #[error(transparent)]
    Store(#[from] IdentityStoreError),
    /// A request was rejected client-side before any network call.
    #[error("{0}")]
    Validation(#[from] ShortenValidationError),
    /// A classified failure from the service.
    #[error("{0}")]
    Api(#[from] ClassifiedError),
    /// A protected command was run without a valid session.
    #[error("Not logged in. Run `ziplink login` first.")]
    NotLoggedIn,
    /// The segment does not match the short-code shape.
    #[error("'{segment}' is not a short code; nothing to resolve.")]
    NotAShortCode {
        /// The rejected path segment.
        segment: String,
    },
    /// Terminal resolution state: the code is unknown to the server.
    #[error("This short link does not exist.")]
    LinkNotFound,
    /// Terminal resolution state: the link's expiry has passed.
    #[error("This short link has expired.")]
    LinkExpired,
}

/// Observer that renders every snapshot and keeps the feed alive.
struct PrintObserver;

impl FeedObserver for PrintObserver {
    fn snapshot(&self, snapshot: &LinkSnapshot) -> FeedDirective {
        println!("{}", render_links(snapshot));
        FeedDirective::Continue
    }
}

/// Dispatch a parsed command against configured adapters.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure; partial output may
/// already have been printed.
pub async fn run(cli: Cli, settings: &ClientSettings) -> Result<(), CliError> {
    let base_url = settings.api_base_url()?;
    let timeout = settings.request_timeout();
    let api: Arc<dyn ShortenerApi> =
        Arc::new(HttpShortenerApi::new(base_url.clone(), timeout)?);
    let store: Arc<dyn IdentityStore> = Arc::new(FileIdentityStore::in_user_data_dir()?);
    let session = SessionCache::new(Arc::clone(&api), store);
    let clock = DefaultClock;

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let identity = session
                .register(&RegisterRequest {
                    name,
                    email,
                    password,
                })
                .await?;
            println!("Registered {} <{}>.", identity.name, identity.email);
        }
        Command::Login { email, password } => {
            let identity = session.login(&LoginRequest { email, password }).await?;
            println!("Logged in as {} <{}>.", identity.name, identity.email);
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out.");
        }
        Command::Links => {
            require_session(&session).await?;
            let feed = LinkFeed::new(
                Arc::clone(&api),
                Arc::new(DefaultClock),
                Arc::new(TokioSleeper),
            );
            let snapshot = feed.fetch().await?;
            println!("{}", render_links(&snapshot));
        }
        Command::Watch => {
            require_session(&session).await?;
            let feed = LinkFeed::new(
                Arc::clone(&api),
                Arc::new(DefaultClock),
                Arc::new(TokioSleeper),
            );
            feed.run(&PrintObserver).await?;
        }
        Command::Shorten {
            long,
            custom,
            expiry,
        } => {
            require_session(&session).await?;
            let request = ShortenRequest::new(long, custom, expiry, clock.utc())?;
            let link = api.shorten(&request).await?;
            println!("{} -> {}", resolve_url(&base_url, &link.short), link.long);
        }
        Command::Delete { id } => {
            require_session(&session).await?;
            api.delete_link(&id).await?;
            println!("Link deleted.");
        }
        Command::Resolve { code } => {
            let probe = HttpRedirectProbe::new(base_url.clone(), timeout)?;
            let resolver = Resolver::new(Arc::new(probe), base_url);
            perform(resolver.resolve(&code).await, code)?;
        }
    }
    Ok(())
}

async fn require_session(session: &SessionCache) -> Result<(), CliError> {
    session.revalidate().await;
    if session.identity().is_none() {
        return Err(CliError::NotLoggedIn);
    }
    Ok(())
}

/// Carry out a navigation effect in terminal terms: print the destination
/// for navigations, fail with a terminal message otherwise.
fn perform(resolution: Resolution, segment: String) -> Result<(), CliError> {
    match resolution {
        Resolution::Redirect { location } => {
            println!("{location}");
            Ok(())
        }
        Resolution::ServerSide { url } => {
            println!("{url}");
            Ok(())
        }
        Resolution::NotFound => Err(CliError::LinkNotFound),
        Resolution::Expired => Err(CliError::LinkExpired),
        Resolution::Deferred => Err(CliError::NotAShortCode { segment }),
    }
}

fn resolve_url(base_url: &url::Url, short: &str) -> String {
    format!("{}/{}", base_url.as_str().trim_end_matches('/'), short)
}

fn render_links(snapshot: &LinkSnapshot) -> String {
    if snapshot.links.is_empty() {
        return "No links yet.".to_owned();
    }
    let mut lines = Vec::with_capacity(snapshot.links.len());
    for (link, status) in snapshot.links.iter().zip(&snapshot.statuses) {
        let created = link
            .created_at
            .map_or_else(|| "n/a".to_owned(), |instant| format_instant(instant));
        lines.push(format!(
            "{:<10} {:<14} {:>6} clicks  created {:<17} expires {}  {}",
            link.short,
            status_label(*status),
            link.clicks,
            created,
            format_instant(link.expiry),
            link.long,
        ));
    }
    lines.join("\n")
}

fn status_label(status: LinkStatus) -> &'static str {
    match status {
        LinkStatus::Active => "active",
        LinkStatus::ExpiringSoon => "expiring soon",
        LinkStatus::Expired => "expired",
    }
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}
