//! Command-line front end over the store.
//!
//! User-facing output goes to stdout with `writeln!`; diagnostics go through
//! `tracing`.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::api::ApiError;
use crate::filter::{filter_view, FilterCriteria, Filterable};
use crate::resource::{
    Animal, Expense, FarmDocument, FarmProfile, ForumPost, HealthAssessment, InventoryItem,
    Listing, RevenueEntry, Schedule, Sensor, WeatherForecast,
};
use crate::store::{Store, StoreDetail, StoreSlice};
use crate::validation::{LoginForm, RegistrationForm};

/// AgriSync farm management client.
#[derive(Debug, Parser)]
#[command(name = "agrisync", version, about)]
pub struct Cli {
    /// Config file (default: ~/.config/agrisync/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Collections reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Animals,
    Schedules,
    Inventory,
    Marketplace,
    Sensors,
    Health,
    Expenses,
    Revenue,
    Posts,
    Documents,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session.
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        farm_name: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Forget the persisted session.
    Logout,
    /// Validate the session against the server and show the user.
    Whoami,
    /// List a collection, optionally filtered.
    List {
        kind: ResourceKind,
        /// Dimension filter, `name=value` (repeatable)
        #[arg(short, long = "filter", value_parser = parse_pair)]
        filters: Vec<(String, String)>,
        /// Case-insensitive text search
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show one record.
    Show { kind: ResourceKind, id: String },
    /// Delete one record.
    Delete { kind: ResourceKind, id: String },
    /// Mark a schedule as completed.
    Complete { id: String },
    /// Show the weather dashboard.
    Weather,
    /// Show the farm profile.
    Farm,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.trim().to_string())),
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

/// Run a generic operation for the resource type behind a [`ResourceKind`].
macro_rules! with_resource {
    ($kind:expr, $f:ident($($arg:expr),*)) => {
        match $kind {
            ResourceKind::Animals => $f::<Animal>($($arg),*).await,
            ResourceKind::Schedules => $f::<Schedule>($($arg),*).await,
            ResourceKind::Inventory => $f::<InventoryItem>($($arg),*).await,
            ResourceKind::Marketplace => $f::<Listing>($($arg),*).await,
            ResourceKind::Sensors => $f::<Sensor>($($arg),*).await,
            ResourceKind::Health => $f::<HealthAssessment>($($arg),*).await,
            ResourceKind::Expenses => $f::<Expense>($($arg),*).await,
            ResourceKind::Revenue => $f::<RevenueEntry>($($arg),*).await,
            ResourceKind::Posts => $f::<ForumPost>($($arg),*).await,
            ResourceKind::Documents => $f::<FarmDocument>($($arg),*).await,
        }
    };
}

impl Command {
    pub async fn run(self, store: &Store) -> anyhow::Result<()> {
        match self {
            Command::Login { email, password } => {
                let session = store
                    .login(&LoginForm::new(email, password))
                    .await
                    .map_err(user_error)?;
                writeln!(io::stdout(), "Logged in as {}", session.name())?;
            }
            Command::Register {
                name,
                email,
                password,
                farm_name,
                phone,
            } => {
                let form = RegistrationForm {
                    name,
                    email,
                    confirm_password: password.clone(),
                    password,
                    farm_name,
                    phone,
                };
                let session = store.register(&form).await.map_err(user_error)?;
                writeln!(
                    io::stdout(),
                    "Registered {} ({})",
                    session.name(),
                    session.farm_name()
                )?;
            }
            Command::Logout => {
                store.logout().context("Failed to clear session")?;
                writeln!(io::stdout(), "Logged out")?;
            }
            Command::Whoami => match store.load_user().await.map_err(user_error)? {
                Some(user) => {
                    let mut out = io::stdout();
                    writeln!(out, "{} <{}>", user.name, user.email)?;
                    writeln!(out, "Farm: {}", user.farm_name)?;
                    writeln!(out, "Plan: {:?}", user.subscription)?;
                }
                None => writeln!(io::stdout(), "Not logged in")?,
            },
            Command::List {
                kind,
                filters,
                search,
            } => {
                require_session(store)?;
                let criteria = filters
                    .iter()
                    .fold(FilterCriteria::new(), |c, (dim, value)| c.with(dim, value.as_str()));
                with_resource!(kind, list(store, &criteria, &search))?;
            }
            Command::Show { kind, id } => {
                require_session(store)?;
                with_resource!(kind, show(store, &id))?;
            }
            Command::Delete { kind, id } => {
                require_session(store)?;
                with_resource!(kind, delete(store, &id))?;
                writeln!(io::stdout(), "Deleted {}", id)?;
            }
            Command::Complete { id } => {
                require_session(store)?;
                let schedule = store.complete_schedule(&id).await.map_err(user_error)?;
                writeln!(io::stdout(), "Completed '{}'", schedule.title)?;
            }
            Command::Weather => {
                require_session(store)?;
                detail::<WeatherForecast>(store).await?;
            }
            Command::Farm => {
                require_session(store)?;
                detail::<FarmProfile>(store).await?;
            }
        }
        Ok(())
    }
}

fn require_session(store: &Store) -> anyhow::Result<()> {
    if store.session().is_none() {
        bail!("Not logged in. Run `agrisync login` first.");
    }
    Ok(())
}

/// Surface the same text a screen would show.
fn user_error(err: ApiError) -> anyhow::Error {
    tracing::debug!(error = %err, "Command failed");
    anyhow::anyhow!(err.user_message())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(io::stdout(), "{}", json)?;
    Ok(())
}

async fn list<R>(store: &Store, criteria: &FilterCriteria, search: &str) -> anyhow::Result<()>
where
    R: StoreSlice + Filterable + Serialize,
{
    store.fetch::<R>(&[]).await.map_err(user_error)?;
    let items = store.select(|state| filter_view(&R::slice(state).items, criteria, search));
    print_json(&items)
}

async fn show<R>(store: &Store, id: &str) -> anyhow::Result<()>
where
    R: StoreSlice + Serialize,
{
    let item = store.fetch_one::<R>(id).await.map_err(user_error)?;
    print_json(&item)
}

async fn delete<R: StoreSlice>(store: &Store, id: &str) -> anyhow::Result<()> {
    store.remove::<R>(id).await.map_err(user_error)
}

async fn detail<T>(store: &Store) -> anyhow::Result<()>
where
    T: StoreDetail + Serialize,
{
    let value = store.fetch_detail::<T>().await.map_err(user_error)?;
    print_json(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_splits_on_first_equals() {
        assert_eq!(
            parse_pair("status=in_stock").unwrap(),
            ("status".to_string(), "in_stock".to_string())
        );
        assert_eq!(
            parse_pair("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn list_accepts_repeated_filters() {
        let cli = Cli::try_parse_from([
            "agrisync", "list", "animals", "-f", "species=goat", "-f", "status=sick", "-s", "nan",
        ])
        .unwrap();
        match cli.command {
            Command::List {
                kind,
                filters,
                search,
            } => {
                assert_eq!(kind, ResourceKind::Animals);
                assert_eq!(filters.len(), 2);
                assert_eq!(search, "nan");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_api_url_flag() {
        let cli = Cli::try_parse_from(["agrisync", "whoami", "--api-url", "http://farm.local"])
            .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://farm.local"));
    }
}
