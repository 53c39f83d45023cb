//! The translation facade: a rule set plus the two-stage pipeline.
//!
//! One `Translator` holds one immutable [`RuleSet`] and can be shared
//! across units; each call runs the mutation engine and then the code
//! generator over a single compilation unit. A translation always
//! completes and returns both the output text and the full diagnostic
//! list, so the caller can inspect and hand-patch the output instead of
//! getting nothing.

use crate::ast::CompilationUnit;
use crate::codegen::As3Generator;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::mutation::MutationEngine;
use crate::rules::RuleSet;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutput {
    /// The generated AS3 source text.
    pub source: String,
    /// Every diagnostic emitted during mutation and generation, in order.
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Translator {
    rules: RuleSet,
}

impl Translator {
    pub fn new(rules: RuleSet) -> Self {
        Translator { rules }
    }

    /// A translator with the standard mutations installed.
    pub fn with_defaults() -> Self {
        Translator::new(RuleSet::defaults())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Translate one compilation unit.
    pub fn translate(&self, unit: CompilationUnit) -> TranslationOutput {
        let diags = DiagnosticSink::new();
        let source = self.translate_into(unit, &diags);
        TranslationOutput {
            source,
            diagnostics: diags.take(),
        }
    }

    /// Translate one unit, appending diagnostics to a caller-owned sink.
    /// Intended for drivers that process units in parallel and share one
    /// sink across them.
    pub fn translate_into(&self, unit: CompilationUnit, diags: &DiagnosticSink) -> String {
        let engine = MutationEngine::new(&self.rules, diags.clone());
        let mutated = engine.rewrite(unit);
        As3Generator::new(diags.clone(), self.rules.vector_class()).generate(&mutated)
    }

    /// Translate a serialized program tree, as handed over by the
    /// external parsing front-end. A tree outside the documented node
    /// taxonomy fails here with a typed error naming the offending node;
    /// only this unit's translation is lost.
    pub fn translate_json(&self, json: &str) -> Result<TranslationOutput> {
        let unit: CompilationUnit = serde_json::from_str(json)?;
        Ok(self.translate(unit))
    }
}
