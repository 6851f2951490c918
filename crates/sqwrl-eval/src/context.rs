//! Invocation context for SQWRL built-ins
//!
//! Everything a built-in needs from the host besides its arguments: the
//! query name that scopes collections, the evaluation phase, the pattern
//! renderer used for group keys and the result sink.

use serde::{Deserialize, Serialize};
use sqwrl_types::BuiltInArgument;
use std::fmt;

use crate::error::{EvalResult, SqwrlError};
use crate::result::ResultGenerator;

/// Evaluation phase of the current rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Condition gathering: built-ins may fail, bind and build collections
    Antecedent,
    /// Result construction: built-ins feed the result generator
    Consequent,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Antecedent => f.write_str("antecedent"),
            Self::Consequent => f.write_str("consequent"),
        }
    }
}

/// Renders a run of arguments into a stable string
///
/// Equal argument runs must render identically and different runs must not
/// collide.
pub trait PatternRenderer {
    fn render(&self, arguments: &[BuiltInArgument]) -> String;
}

/// Length-prefixed structural rendering
///
/// Each resolved argument becomes `tag:len:payload;` where `len` is the byte
/// length of `payload`, so no choice of payload can fake a boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalPatternRenderer;

impl CanonicalPatternRenderer {
    fn render_one(argument: &BuiltInArgument, out: &mut String) {
        let (tag, payload) = match argument.resolved() {
            BuiltInArgument::Literal(lit) => ("L", format!("{}^^{}", lit.lexical_form(), lit.datatype())),
            BuiltInArgument::NamedIndividual(iri) => ("I", iri.to_string()),
            BuiltInArgument::Class(iri) => ("C", iri.to_string()),
            BuiltInArgument::ObjectProperty(iri) => ("OP", iri.to_string()),
            BuiltInArgument::DataProperty(iri) => ("DP", iri.to_string()),
            BuiltInArgument::AnnotationProperty(iri) => ("AP", iri.to_string()),
            BuiltInArgument::ClassExpression(expr) => ("CE", expr.clone()),
            BuiltInArgument::Collection(handle) => ("COL", handle.to_string()),
            BuiltInArgument::MultiValue(values) => {
                let mut nested = String::new();
                for value in values {
                    Self::render_one(value, &mut nested);
                }
                ("MV", nested)
            }
            BuiltInArgument::Variable(v) => ("V", v.name.clone()),
        };
        out.push_str(tag);
        out.push(':');
        out.push_str(&payload.len().to_string());
        out.push(':');
        out.push_str(&payload);
        out.push(';');
    }
}

impl PatternRenderer for CanonicalPatternRenderer {
    fn render(&self, arguments: &[BuiltInArgument]) -> String {
        let mut out = String::new();
        for argument in arguments {
            Self::render_one(argument, &mut out);
        }
        out
    }
}

static CANONICAL_RENDERER: CanonicalPatternRenderer = CanonicalPatternRenderer;

/// Per-call host context
pub struct Invocation<'a> {
    /// Query (rule) name scoping all collections
    pub query: &'a str,
    /// Current evaluation phase
    pub phase: Phase,
    renderer: &'a dyn PatternRenderer,
    results: Option<&'a mut dyn ResultGenerator>,
}

impl<'a> Invocation<'a> {
    /// Create an invocation with the canonical renderer and no result sink
    pub fn new(query: &'a str, phase: Phase) -> Self {
        Self {
            query,
            phase,
            renderer: &CANONICAL_RENDERER,
            results: None,
        }
    }

    /// Antecedent-phase invocation
    pub fn antecedent(query: &'a str) -> Self {
        Self::new(query, Phase::Antecedent)
    }

    /// Consequent-phase invocation
    pub fn consequent(query: &'a str) -> Self {
        Self::new(query, Phase::Consequent)
    }

    /// Use a host-supplied pattern renderer
    pub fn with_renderer(mut self, renderer: &'a dyn PatternRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Attach a result generator
    pub fn with_results(mut self, results: &'a mut dyn ResultGenerator) -> Self {
        self.results = Some(results);
        self
    }

    /// Render a run of arguments with the configured renderer
    pub fn render(&self, arguments: &[BuiltInArgument]) -> String {
        self.renderer.render(arguments)
    }

    /// The result generator, required in the consequent
    pub fn results(&mut self) -> EvalResult<&mut (dyn ResultGenerator + 'a)> {
        self.results
            .as_deref_mut()
            .ok_or_else(|| SqwrlError::internal("no result generator attached to invocation"))
    }

    /// Fail unless the invocation is in the expected phase
    pub fn require_phase(&self, builtin: &str, expected: Phase) -> EvalResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SqwrlError::phase_violation(builtin, self.phase))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqwrl_types::Literal;

    #[test]
    fn canonical_rendering_separates_boundaries() {
        let r = CanonicalPatternRenderer;
        let a = r.render(&[
            BuiltInArgument::literal("a,b"),
            BuiltInArgument::literal("c"),
        ]);
        let b = r.render(&[
            BuiltInArgument::literal("a"),
            BuiltInArgument::literal("b,c"),
        ]);
        assert_ne!(a, b);
    }

    #[test]
    fn canonical_rendering_distinguishes_datatypes() {
        let r = CanonicalPatternRenderer;
        let int = r.render(&[BuiltInArgument::literal(Literal::int(1))]);
        let long = r.render(&[BuiltInArgument::literal(Literal::long(1))]);
        let text = r.render(&[BuiltInArgument::literal("1")]);
        assert_ne!(int, long);
        assert_ne!(int, text);
    }

    #[test]
    fn bound_variables_render_as_their_value() {
        let r = CanonicalPatternRenderer;
        let bound = BuiltInArgument::bound("x", BuiltInArgument::individual("urn:a"));
        assert_eq!(
            r.render(&[bound]),
            r.render(&[BuiltInArgument::individual("urn:a")])
        );
    }
}
