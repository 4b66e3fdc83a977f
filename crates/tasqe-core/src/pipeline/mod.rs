//! Pipeline orchestrator: one user query from prose to a validated document.
//!
//! ```text
//! Idle ─▶ Filtering ─▶ Extracting ─▶ Structuring(1) ─▶ … ─▶ Structuring(3)
//!            │                             │                     │
//!            ▼                             ▼                     ▼
//!         Rejected                      Accepted              Rejected
//! ```
//!
//! Stage 1 runs exactly once per query. Stage 2 is retried while its output is
//! disqualified, up to [`MAX_STRUCTURING_ATTEMPTS`] attempts. Transport
//! failures abort the run at any state; only disqualified structured output
//! is retried.
//!
//! A single [`Pipeline`] holds no lock: callers must not run two queries
//! against the same list at once.

use std::{fmt, sync::Arc};

use log::{debug, info, warn};

use crate::{
    client::{ModelClient, StructuredResponse},
    error::{Result, TasqeError},
    filter::is_injection_like,
    models::TodoDocument,
    schema::{self, ValidationError},
    store::ListStore,
};

#[cfg(test)]
mod tests;

/// Structuring attempts made before giving up.
pub const MAX_STRUCTURING_ATTEMPTS: u32 = 3;

/// Longest run of consecutive newlines tolerated in structured output.
pub const MAX_NEWLINE_RUN: usize = 20;

/// States of a single pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Filtering,
    Extracting,
    /// Structuring stage, attempt numbered from 1
    Structuring { attempt: u32 },
    Accepted,
    Rejected,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Filtering => write!(f, "filtering"),
            PipelineState::Extracting => write!(f, "extracting"),
            PipelineState::Structuring { attempt } => {
                write!(f, "structuring (attempt {attempt}/{MAX_STRUCTURING_ATTEMPTS})")
            }
            PipelineState::Accepted => write!(f, "accepted"),
            PipelineState::Rejected => write!(f, "rejected"),
        }
    }
}

/// Why one structuring attempt was thrown away.
#[derive(Debug, Clone, PartialEq)]
pub enum Disqualification {
    /// Output contains a newline run longer than [`MAX_NEWLINE_RUN`]
    Degenerate { newline_run: usize },
    /// No `output_text` block in the response
    MissingOutputText,
    /// Output text is not JSON
    MalformedJson(String),
    /// JSON that does not match the to-do schema
    SchemaViolation(ValidationError),
}

impl fmt::Display for Disqualification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disqualification::Degenerate { newline_run } => {
                write!(f, "malformed output: run of {newline_run} newlines")
            }
            Disqualification::MissingOutputText => write!(f, "malformed output: no output text"),
            Disqualification::MalformedJson(e) => write!(f, "malformed output: {e}"),
            Disqualification::SchemaViolation(e) => write!(f, "schema violation at {e}"),
        }
    }
}

/// Terminal rejection of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// Blank submission; nothing was done
    Empty,
    /// Flagged by the injection filter before any model call
    InjectionDetected,
    /// Every structuring attempt was disqualified, in attempt order
    CouldNotParse { attempts: Vec<Disqualification> },
}

impl Rejection {
    /// Message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::Empty => "Tell me about your week first.",
            Rejection::InjectionDetected => "Nice try.",
            Rejection::CouldNotParse { .. } => "Couldn't parse the response. Try again.",
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    Accepted(TodoDocument),
    Rejected(Rejection),
}

impl PipelineOutcome {
    /// Converts rejections into their `TasqeError` counterparts.
    pub fn into_result(self) -> Result<TodoDocument> {
        match self {
            PipelineOutcome::Accepted(doc) => Ok(doc),
            PipelineOutcome::Rejected(Rejection::Empty) => Err(TasqeError::invalid_input("query")
                .with_reason("must not be empty")),
            PipelineOutcome::Rejected(Rejection::InjectionDetected) => {
                Err(TasqeError::InjectionDetected)
            }
            PipelineOutcome::Rejected(Rejection::CouldNotParse { attempts }) => {
                Err(TasqeError::CouldNotParse {
                    attempts: attempts.len() as u32,
                })
            }
        }
    }

    fn terminal_state(&self) -> PipelineState {
        match self {
            PipelineOutcome::Accepted(_) => PipelineState::Accepted,
            PipelineOutcome::Rejected(_) => PipelineState::Rejected,
        }
    }
}

/// Callback invoked on every state entered.
pub type StateObserver = Arc<dyn Fn(&PipelineState) + Send + Sync>;

enum Step {
    Continue(PipelineState),
    Finish(PipelineOutcome),
}

#[derive(Default)]
struct RunContext {
    outline: String,
    disqualified: Vec<Disqualification>,
}

/// Drives queries through filtering, extraction and structuring.
#[derive(Clone)]
pub struct Pipeline {
    client: ModelClient,
    store: ListStore,
    observer: Option<StateObserver>,
}

impl Pipeline {
    pub fn new(client: ModelClient, store: ListStore) -> Self {
        Self {
            client,
            store,
            observer: None,
        }
    }

    /// Registers a callback notified of each state transition.
    pub fn with_observer(mut self, observer: StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Runs one query to a terminal state.
    ///
    /// # Errors
    ///
    /// `MissingCredential`, `RequestFailed` and `UnexpectedResponse` from the
    /// model client, and store failures, abort the run. Rejections are
    /// returned as `Ok(PipelineOutcome::Rejected(..))`.
    pub async fn run(&self, query: &str) -> Result<PipelineOutcome> {
        let mut state = PipelineState::Idle;
        let mut ctx = RunContext::default();

        loop {
            self.notify(&state);
            match self.step(state, query, &mut ctx).await? {
                Step::Continue(next) => state = next,
                Step::Finish(outcome) => {
                    self.notify(&outcome.terminal_state());
                    return Ok(outcome);
                }
            }
        }
    }

    async fn step(&self, state: PipelineState, query: &str, ctx: &mut RunContext) -> Result<Step> {
        match state {
            PipelineState::Idle => {
                if query.trim().is_empty() {
                    Ok(Step::Finish(PipelineOutcome::Rejected(Rejection::Empty)))
                } else {
                    Ok(Step::Continue(PipelineState::Filtering))
                }
            }
            PipelineState::Filtering => {
                if is_injection_like(query) {
                    warn!("Query rejected by injection filter");
                    return Ok(Step::Finish(PipelineOutcome::Rejected(
                        Rejection::InjectionDetected,
                    )));
                }
                self.store.record_query(query).await?;
                Ok(Step::Continue(PipelineState::Extracting))
            }
            PipelineState::Extracting => {
                let response = self.client.generate_outline(query).await?;
                ctx.outline = response.outline_text()?.to_string();
                debug!("Outline has {} lines", ctx.outline.lines().count());
                Ok(Step::Continue(PipelineState::Structuring { attempt: 1 }))
            }
            PipelineState::Structuring { attempt } => {
                let response = self.client.generate_structured(&ctx.outline).await?;
                match assess(&response) {
                    Ok(doc) => {
                        info!(
                            "Accepted structured output on attempt {attempt} ({} categories, {} tasks)",
                            doc.todo.len(),
                            doc.task_count()
                        );
                        Ok(Step::Finish(PipelineOutcome::Accepted(doc)))
                    }
                    Err(reason) => {
                        warn!("Structuring attempt {attempt} disqualified: {reason}");
                        ctx.disqualified.push(reason);
                        if attempt >= MAX_STRUCTURING_ATTEMPTS {
                            let attempts = std::mem::take(&mut ctx.disqualified);
                            Ok(Step::Finish(PipelineOutcome::Rejected(
                                Rejection::CouldNotParse { attempts },
                            )))
                        } else {
                            Ok(Step::Continue(PipelineState::Structuring {
                                attempt: attempt + 1,
                            }))
                        }
                    }
                }
            }
            PipelineState::Accepted | PipelineState::Rejected => Err(TasqeError::invalid_input(
                "state",
            )
            .with_reason(format!("run already finished in state {state}"))),
        }
    }

    fn notify(&self, state: &PipelineState) {
        debug!("Pipeline state: {state}");
        if let Some(observer) = &self.observer {
            observer(state);
        }
    }
}

/// Applies the disqualification checks to one structured response, in order:
/// degenerate newline runs, JSON syntax, then the schema.
pub fn assess(response: &StructuredResponse) -> std::result::Result<TodoDocument, Disqualification> {
    let text = response
        .last_output_text()
        .ok_or(Disqualification::MissingOutputText)?;

    let newline_run = longest_newline_run(text);
    if newline_run > MAX_NEWLINE_RUN {
        return Err(Disqualification::Degenerate { newline_run });
    }

    let candidate: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| Disqualification::MalformedJson(e.to_string()))?;

    schema::validate(&candidate).map_err(Disqualification::SchemaViolation)
}

/// Length of the longest run of consecutive `\n` characters.
pub fn longest_newline_run(text: &str) -> usize {
    text.split(|c| c != '\n')
        .map(str::len)
        .max()
        .unwrap_or(0)
}
