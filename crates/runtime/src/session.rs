//! The bounded iteration loop.

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::error::report;
use crate::generation::{DEFAULT_GENERATION_TIMEOUT, generate};
use crate::model::Backend;
use crate::prompt::{self, DEFAULT_QUERY};
use crate::reply::{Reply, parse_reply};
use crate::tools::{ToolDescriptor, ToolHost, ToolOutput, render_catalog};
use crate::transcript::{IterationRecord, LastResult, TranscriptEntry};
use crate::{Error, Result, coerce_arguments};

/// Default iteration budget per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Knobs for a run.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub max_iterations: usize,
    pub generation_timeout: Duration,
    /// The seed task for the first iteration.
    pub query: String,
    /// Keep only this many newest summaries when extending the query.
    /// `None` folds in every summary.
    pub transcript_limit: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            query: DEFAULT_QUERY.to_string(),
            transcript_limit: None,
        }
    }
}

/// Mutable state of one run. Empty outside of [`Session::run`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub iteration: usize,
    pub last_result: Option<LastResult>,
    pub transcript: Vec<TranscriptEntry>,
    /// The query text sent on the latest iteration.
    pub query: String,
}

impl SessionState {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What a run did before it ended.
#[derive(Debug)]
pub struct RunReport {
    pub iterations: usize,
    pub transcript: Vec<TranscriptEntry>,
    pub last_result: Option<LastResult>,
    /// The failure that ended the run early, if any.
    pub error: Option<Error>,
}

impl RunReport {
    /// True when the run used its whole iteration budget.
    pub fn completed(&self) -> bool {
        self.error.is_none()
    }
}

/// An orchestration session over a backend and a tool host.
pub struct Session<B, H> {
    backend: B,
    host: H,
    config: SessionConfig,
    state: SessionState,
}

impl<B: Backend, H: ToolHost> Session<B, H> {
    /// Create a session with the default configuration.
    pub fn new(backend: B, host: H) -> Self {
        Self {
            backend,
            host,
            config: SessionConfig::default(),
            state: SessionState::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Give back the backend and the tool host.
    pub fn into_parts(self) -> (B, H) {
        (self.backend, self.host)
    }

    /// Run the loop until the budget is spent or a step fails.
    ///
    /// State starts empty and is empty again when this returns, whatever
    /// the outcome; the report carries what happened.
    pub async fn run(&mut self) -> RunReport {
        self.state = SessionState::default();
        let outcome = self.drive().await;
        let state = std::mem::take(&mut self.state);

        let error = outcome.err();
        match &error {
            None => info!(iterations = state.iteration, "session complete"),
            Some(e) => error!(iteration = state.iteration + 1, error = %report(e), "session aborted"),
        }

        RunReport {
            iterations: state.iteration,
            transcript: state.transcript,
            last_result: state.last_result,
            error,
        }
    }

    async fn drive(&mut self) -> Result<()> {
        let tools = self.host.list_tools().await?;
        info!(count = tools.len(), "retrieved tools");

        let system = prompt::system_prompt(&render_catalog(&tools));
        while self.state.iteration < self.config.max_iterations {
            if let Err(e) = self.step(&tools, &system).await {
                if e.is_dispatch() {
                    self.state.transcript.push(TranscriptEntry::Error {
                        index: self.state.iteration + 1,
                        message: report(&e),
                    });
                }
                return Err(e);
            }
        }
        Ok(())
    }

    /// One generate → parse → dispatch pass. Dispatch failures are
    /// written to the transcript by the caller.
    async fn step(&mut self, tools: &[ToolDescriptor], system: &str) -> Result<()> {
        let index = self.state.iteration + 1;
        info!(iteration = index, "starting iteration");

        self.state.query = match self.state.last_result {
            None => self.config.query.clone(),
            Some(_) => prompt::next_query(
                &self.state.query,
                &self.state.transcript,
                self.config.transcript_limit,
            ),
        };
        let prompt = prompt::compose(system, &self.state.query);

        let text = generate(&self.backend, &prompt, self.config.generation_timeout).await?;
        debug!(response = %text, "model replied");

        match parse_reply(&text) {
            Reply::Call { name, args } => {
                let (arguments, output) = self.dispatch(tools, &name, &args).await?;
                info!(iteration = index, tool = %name, result = %output, "tool returned");
                self.state.last_result = Some(LastResult::Tool(output.clone()));
                self.state
                    .transcript
                    .push(TranscriptEntry::Call(IterationRecord {
                        index,
                        tool: name,
                        arguments,
                        result: output,
                    }));
            }
            // The loop keeps going after a final answer until the budget is spent.
            Reply::Final { text } => {
                info!(iteration = index, answer = %text, "model gave final answer");
                self.state.transcript.push(TranscriptEntry::FinalAnswer {
                    index,
                    text: text.clone(),
                });
                self.state.last_result = Some(LastResult::FinalAnswer(text));
            }
            Reply::Malformed => return Err(Error::NoValidResponseLine),
        }

        self.state.iteration += 1;
        Ok(())
    }

    async fn dispatch(
        &self,
        tools: &[ToolDescriptor],
        name: &str,
        args: &[String],
    ) -> Result<(Map<String, Value>, ToolOutput)> {
        let tool = tools
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;
        let arguments = coerce_arguments(tool, args)?;
        let shown = Value::Object(arguments.clone());
        debug!(tool = %name, arguments = %shown, "calling tool");
        let output = self.host.call_tool(name, arguments.clone()).await?;
        Ok((arguments, output))
    }
}
