//! # AS3 Core
//!
//! Core implementation of the Java-to-ActionScript 3 translator,
//! including:
//! - Program tree definitions (the interchange contract with the parsing
//!   front-end)
//! - Rule set: renames, import handling, container categorization
//! - Scope-aware mutation engine
//! - Syntax-directed AS3 code generator
//! - Diagnostics collection
//!
//! This crate is pure logic over in-memory trees; file discovery and
//! persistence belong to the surrounding driver (see the `as3-cli`
//! crate).

#![warn(clippy::all)]

pub mod ast;
pub mod codegen;
pub mod diagnostics;
pub mod mutation;
pub mod rules;
pub mod translator;

// Re-export commonly used types
pub use ast::CompilationUnit;
pub use diagnostics::{Diagnostic, DiagnosticSink, Severity};
pub use mutation::scope::{ScopeStack, VarBinding};
pub use mutation::MutationEngine;
pub use rules::{Category, CategoryFlags, RuleOverrides, RuleSet, RuleSetBuilder, RulesError};
pub use translator::{TranslationOutput, Translator};

/// Translator version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize tracing for the translation core
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("as3_core=info".parse().unwrap()),
        )
        .init();
}

/// Error types for core operations
#[derive(thiserror::Error, Debug)]
pub enum As3Error {
    /// Rule configuration error
    #[error("Rule error: {0}")]
    Rules(#[from] rules::RulesError),

    /// The serialized tree violates the node taxonomy contract
    #[error("Program tree error: {0}")]
    Tree(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, As3Error>;
