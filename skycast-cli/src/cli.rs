use anyhow::Result;
use clap::{Parser, Subcommand};
use skycast_core::{ApiClient, Config, QueryMode, Session};

use crate::{interactive, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather lookup client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Look up current weather for a location and print it.
    Show {
        /// City name, or a postal code with `--zip`.
        location: String,

        /// Interpret the location as a postal code instead of a city name.
        #[arg(long)]
        zip: bool,

        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },

    /// Start an interactive lookup session.
    Interactive,

    /// Set the backend endpoint the client talks to.
    Configure {
        /// Base URL of the weather backend, e.g. "http://localhost:5000".
        endpoint: String,
    },

    /// Check that the backend is reachable.
    Ping,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { location, zip, fahrenheit } => show(&location, zip, fahrenheit).await,
            Command::Interactive => interactive::run().await,
            Command::Configure { endpoint } => configure(endpoint),
            Command::Ping => ping().await,
        }
    }
}

async fn show(location: &str, zip: bool, fahrenheit: bool) -> Result<()> {
    let config = Config::load()?;
    let client = ApiClient::new(&config)?;

    let mut session = Session::new();
    if zip {
        session.set_mode(QueryMode::PostalCode);
    }
    if fahrenheit {
        session.toggle_unit();
    }
    session.edit_query(location);

    // A blank location is silently skipped, like an empty form submit.
    if session.submit(&client).await {
        print!("{}", render::session(&session));
    }

    Ok(())
}

fn configure(endpoint: String) -> Result<()> {
    let mut config = Config::load()?;
    config.endpoint = endpoint.trim_end_matches('/').to_string();
    config.save()?;

    println!("Backend endpoint set to {}", config.endpoint);
    Ok(())
}

async fn ping() -> Result<()> {
    let config = Config::load()?;
    let client = ApiClient::new(&config)?;

    let message = client.ping().await?;
    println!("{message}");

    Ok(())
}
