//! The decision logic for which declarations receive a scaffold.
//!
//! A declaration qualifies iff its source position resolves, its identifier
//! matches the configured filter, no sibling in the same source unit is
//! already named `test_<ident>`, no scaffold for that name was emitted
//! earlier in this run, and it declares at least one parameter and one
//! result. Duplicate detection is by exact name only: a test with a
//! diverging name, or one declared outside the scanned unit, is not seen.

use crate::signature::test_name_for;
use regex::Regex;
use std::collections::HashSet;
use syn::{FnArg, ReturnType, Type};

/// Why a declaration was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    /// The identifier does not match the name filter.
    FilterMismatch,
    /// A sibling declaration named `test_<ident>` already exists.
    AlreadyTested,
    /// A scaffold for this name was already emitted during this run.
    AlreadyEmitted,
    /// No parameters; an empty-input harness is meaningless.
    NoParams,
    /// No results; an empty-output harness is meaningless.
    NoResults,
    /// The declaration has no resolvable source position.
    NoPosition,
}

impl Skip {
    pub fn reason(&self) -> &'static str {
        match self {
            Skip::FilterMismatch => "name does not match the filter",
            Skip::AlreadyTested => "a generated test already exists",
            Skip::AlreadyEmitted => "a scaffold was already emitted this run",
            Skip::NoParams => "no parameters",
            Skip::NoResults => "no results",
            Skip::NoPosition => "no resolvable source position",
        }
    }

    /// Whether the skip is worth a visible diagnostic rather than a trace.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, Skip::NoPosition)
    }
}

/// Decide whether a declaration qualifies for scaffold generation.
pub fn check(
    sig: &syn::Signature,
    filter: &Regex,
    declared: &HashSet<String>,
    emitted: &HashSet<String>,
) -> Result<(), Skip> {
    if sig.ident.span().source_text().is_none() {
        return Err(Skip::NoPosition);
    }

    let ident = sig.ident.to_string();
    if !filter.is_match(&ident) {
        return Err(Skip::FilterMismatch);
    }

    let test_name = test_name_for(&ident);
    if declared.contains(&test_name) {
        return Err(Skip::AlreadyTested);
    }
    if emitted.contains(&test_name) {
        return Err(Skip::AlreadyEmitted);
    }

    if param_count(sig) == 0 {
        return Err(Skip::NoParams);
    }
    if result_count(sig) == 0 {
        return Err(Skip::NoResults);
    }

    Ok(())
}

/// Explicit parameters only; the receiver does not count.
pub fn param_count(sig: &syn::Signature) -> usize {
    sig.inputs
        .iter()
        .filter(|arg| matches!(arg, FnArg::Typed(_)))
        .count()
}

pub fn result_count(sig: &syn::Signature) -> usize {
    match &sig.output {
        ReturnType::Default => 0,
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Tuple(tuple) => tuple.elems.len(),
            _ => 1,
        },
    }
}
