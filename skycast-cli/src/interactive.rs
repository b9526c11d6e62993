//! Interactive lookup session: one persistent [`Session`] driven by a menu
//! of the same controls the lookup page offers — search, mode switch, unit
//! toggle.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use skycast_core::{ApiClient, Config, QueryMode, Session};

use crate::render;

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let client = ApiClient::new(&config)?;
    let mut session = Session::new();

    loop {
        let mode = session.query().mode();

        let search = match mode {
            QueryMode::City => "Search by city",
            QueryMode::PostalCode => "Search by ZIP",
        };
        let switch_mode = match mode {
            QueryMode::City => "Switch to ZIP search",
            QueryMode::PostalCode => "Switch to city search",
        };
        let switch_unit = format!("Switch to {}", session.unit().toggled().suffix());

        let options = vec![
            search.to_string(),
            switch_mode.to_string(),
            switch_unit,
            "Quit".to_string(),
        ];

        let choice = match Select::new("Weather lookup", options.clone()).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        if choice == options[0] {
            search_once(&mut session, &client).await?;
        } else if choice == options[1] {
            let next = match mode {
                QueryMode::City => QueryMode::PostalCode,
                QueryMode::PostalCode => QueryMode::City,
            };
            session.set_mode(next);
        } else if choice == options[2] {
            session.toggle_unit();
            if session.report().is_some() {
                print!("{}", render::session(&session));
            }
        } else {
            return Ok(());
        }
    }
}

async fn search_once(session: &mut Session, client: &ApiClient) -> Result<()> {
    let placeholder = match session.query().mode() {
        QueryMode::City => "Enter city name...",
        QueryMode::PostalCode => "Enter ZIP code...",
    };

    let raw = match Text::new("Location:")
        .with_placeholder(placeholder)
        .with_initial_value(session.query().text())
        .prompt()
    {
        Ok(raw) => raw,
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    session.edit_query(&raw);

    // Blank input is skipped silently, like an empty form submit.
    if session.submit(client).await {
        print!("{}", render::session(&session));
    }

    Ok(())
}
