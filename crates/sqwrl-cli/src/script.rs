//! Scripted host for running built-in sequences
//!
//! A script names a query and lists built-in invocations in order. The runner
//! plays the rule engine: it keeps variable bindings across steps, feeds
//! consequent steps into a result table and stops on errors that indicate a
//! malformed query.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sqwrl_eval::{Invocation, Phase, ResultTable, SqwrlBuiltIn, SqwrlEngine, SqwrlError};
use sqwrl_types::{BuiltInArgument, Datatype, Literal};
use std::path::Path;

/// A query and the built-in steps to run for it
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub query: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    /// Load a script from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid script: {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse script JSON")
    }
}

/// One built-in invocation
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub phase: Phase,
    pub builtin: String,
    #[serde(default)]
    pub arguments: Vec<ScriptArgument>,
}

/// Argument notation used in scripts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptArgument {
    /// Variable, bound if an earlier step bound it
    Var(String),
    /// `xsd:int` when it fits, `xsd:long` otherwise
    Int(i64),
    /// `xsd:decimal` from its lexical form
    Decimal(String),
    String(String),
    Boolean(bool),
    /// Any typed literal
    Literal { value: String, datatype: String },
    Individual(String),
    Class(String),
}

impl ScriptArgument {
    /// Convert to an engine argument, substituting known bindings
    pub fn to_argument(&self, bindings: &IndexMap<String, BuiltInArgument>) -> Result<BuiltInArgument> {
        Ok(match self {
            Self::Var(name) => match bindings.get(name) {
                Some(value) => BuiltInArgument::bound(name.clone(), value.clone()),
                None => BuiltInArgument::variable(name.clone()),
            },
            Self::Int(value) => match i32::try_from(*value) {
                Ok(small) => BuiltInArgument::literal(Literal::int(small)),
                Err(_) => BuiltInArgument::literal(Literal::long(*value)),
            },
            Self::Decimal(lexical) => BuiltInArgument::literal(Literal::parse(lexical, Datatype::Decimal)?),
            Self::String(value) => BuiltInArgument::literal(Literal::string(value.clone())),
            Self::Boolean(value) => BuiltInArgument::literal(Literal::boolean(*value)),
            Self::Literal { value, datatype } => {
                let datatype: Datatype = datatype.parse()?;
                BuiltInArgument::literal(Literal::parse(value, datatype)?)
            }
            Self::Individual(iri) => BuiltInArgument::individual(iri.clone()),
            Self::Class(iri) => BuiltInArgument::class(iri.clone()),
        })
    }
}

/// What happened to one step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Succeeded,
    Failed,
    /// Non-fatal error, treated as a failed condition
    Error { category: String, message: String },
}

impl Outcome {
    fn from_error(error: &SqwrlError) -> Self {
        Self::Error {
            category: format!("{:?}", error.category()).to_lowercase(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub phase: Phase,
    pub builtin: String,
    /// Arguments after the step ran, bindings included
    pub arguments: Vec<BuiltInArgument>,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub query: String,
    pub steps: Vec<StepReport>,
    pub bindings: IndexMap<String, BuiltInArgument>,
    pub results: ResultTable,
}

/// Runs scripts against one engine
#[derive(Debug, Default)]
pub struct ScriptRunner {
    engine: SqwrlEngine,
}

impl ScriptRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every step of a script
    ///
    /// Fatal engine errors abort the run; other errors are recorded on the
    /// step. The engine is reset afterwards.
    pub fn run(&mut self, script: &Script) -> Result<RunReport> {
        info!("Running {} steps for query {}", script.steps.len(), script.query);

        let mut bindings = IndexMap::new();
        let mut results = ResultTable::new();
        let mut reports = Vec::with_capacity(script.steps.len());
        let mut previous_phase = None;

        for (index, step) in script.steps.iter().enumerate() {
            // A new antecedent ends the row built by the previous consequent
            if previous_phase == Some(Phase::Consequent) && step.phase == Phase::Antecedent {
                results.close_row();
            }
            previous_phase = Some(step.phase);

            let mut arguments = step
                .arguments
                .iter()
                .map(|arg| arg.to_argument(&bindings))
                .collect::<Result<Vec<_>>>()
                .with_context(|| format!("Step {} ({}) has an invalid argument", index + 1, step.builtin))?;

            let builtin: SqwrlBuiltIn = step
                .builtin
                .parse()
                .with_context(|| format!("Step {}", index + 1))?;

            let outcome = {
                let mut invocation =
                    Invocation::new(&script.query, step.phase).with_results(&mut results);
                self.engine.invoke(builtin, &mut invocation, &mut arguments)
            };

            let outcome = match outcome {
                Ok(true) => {
                    record_bindings(&mut bindings, &arguments);
                    Outcome::Succeeded
                }
                Ok(false) => Outcome::Failed,
                Err(error) if error.is_fatal() => {
                    self.engine.reset();
                    return Err(error)
                        .with_context(|| format!("Step {} ({}) failed", index + 1, step.builtin));
                }
                Err(error) => Outcome::from_error(&error),
            };
            debug!("Step {} {}: {:?}", index + 1, builtin, outcome);

            reports.push(StepReport {
                phase: step.phase,
                builtin: builtin.to_string(),
                arguments,
                outcome,
            });
        }

        results.close_row();
        self.engine.reset();

        Ok(RunReport {
            query: script.query.clone(),
            steps: reports,
            bindings,
            results,
        })
    }
}

/// Remember values bound by a successful step
fn record_bindings(bindings: &mut IndexMap<String, BuiltInArgument>, arguments: &[BuiltInArgument]) {
    for argument in arguments {
        if let Some(name) = argument.variable_name() {
            if !argument.is_unbound() && !bindings.contains_key(name) {
                bindings.insert(name.to_string(), argument.resolved().clone());
            }
        }
    }
}
