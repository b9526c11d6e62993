use std::mem;

use tracing::debug;

use crate::{
    client::{ApiError, WeatherBackend},
    model::{Query, QueryMode, WeatherReport},
    units::Unit,
};

/// Status of the current (or most recent) lookup.
///
/// Exactly one variant is authoritative at a time: the loading flag, the
/// error banner and a fresh result cannot coexist.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReport),
    Failure(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// The message to show in the error banner, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one submission. Outcomes carrying a superseded token are
/// dropped instead of overwriting newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitToken(u64);

/// What happened when the session was asked to start a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The lookup was started; resolve it with [`Session::finish`].
    Started(SubmitToken),
    /// Blank query, or a lookup already in flight. Nothing changed.
    Ignored,
}

/// All interactive state of one weather lookup session: the query being
/// edited, the chosen display unit, and the status of the current request.
///
/// A successful report stays visible while a later lookup loads or fails;
/// only a fresh success replaces it.
#[derive(Debug, Default)]
pub struct Session {
    query: Query,
    unit: Unit,
    state: RequestState,
    last_report: Option<WeatherReport>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query text with `raw`, normalized for the active mode.
    pub fn edit_query(&mut self, raw: &str) {
        self.query.set_text(raw);
    }

    /// Switch between city and postal-code search. Stored text is untouched.
    pub fn set_mode(&mut self, mode: QueryMode) {
        self.query.set_mode(mode);
    }

    /// Flip the display unit between Celsius and Fahrenheit.
    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The report to render: the fresh result if the last lookup succeeded,
    /// otherwise the most recent earlier success (stale, but still shown).
    pub fn report(&self) -> Option<&WeatherReport> {
        match &self.state {
            RequestState::Success(report) => Some(report),
            _ => self.last_report.as_ref(),
        }
    }

    /// Try to start a lookup for the current query.
    ///
    /// Blank queries (after trimming) are ignored with no state change and
    /// no request, as is a submit while another lookup is still loading.
    pub fn begin(&mut self) -> Submission {
        if self.query.is_blank() || self.state.is_loading() {
            return Submission::Ignored;
        }

        // A previous result stays visible while the new lookup is in flight.
        if let RequestState::Success(report) = mem::replace(&mut self.state, RequestState::Loading)
        {
            self.last_report = Some(report);
        }

        self.generation += 1;
        Submission::Started(SubmitToken(self.generation))
    }

    /// Record the outcome of the lookup started with `token`.
    ///
    /// Outcomes for superseded tokens are discarded so an out-of-order
    /// completion can never overwrite newer state.
    pub fn finish(&mut self, token: SubmitToken, outcome: Result<WeatherReport, ApiError>) {
        if token.0 != self.generation {
            debug!(token = token.0, current = self.generation, "dropping stale lookup outcome");
            return;
        }

        self.state = match outcome {
            Ok(report) => RequestState::Success(report),
            Err(err) => RequestState::Failure(err.to_string()),
        };
    }

    /// Run one full submission against `backend`: begin, fetch, resolve.
    ///
    /// Returns whether a request was actually issued.
    pub async fn submit(&mut self, backend: &dyn WeatherBackend) -> bool {
        let token = match self.begin() {
            Submission::Started(token) => token,
            Submission::Ignored => return false,
        };

        let outcome = backend.get_weather(&self.query).await;
        self.finish(token, outcome);
        true
    }
}
