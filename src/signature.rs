//! Normalized signature descriptions and their extraction from declarations.
//!
//! Extraction is a pure function of the declaration: parameter and result
//! order is preserved exactly as declared, because the renderer emits
//! positional call arguments and positional multi-assignment from it.

use crate::typename::{display_name, UnsupportedType};
use std::collections::HashSet;
use syn::{FnArg, ImplItemFn, ItemFn, Pat, ReturnType, Type};

/// One named input to a function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

/// One return value. Rust results are unnamed, so `name` is always
/// synthesized by lowercasing the resolved type name (`bool` for a `bool`
/// result), with a positional suffix on collision (`i32`, `i32_2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnValue {
    pub name: String,
    pub ty: String,
}

/// A method's receiver. `ty` is the impl self type with indirection
/// stripped; `name` is the lowercase type-derived field name used for the
/// receiver slot in the generated Input record (`self` cannot name a field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    pub name: String,
    pub ty: String,
}

/// A free-function candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeFunction {
    pub name: String,
    /// Expression used to invoke the target; differs from `name` for
    /// associated functions without a receiver (`Counter::make`).
    pub call_path: String,
    pub params: Vec<Param>,
    pub results: Vec<ReturnValue>,
}

/// A method candidate; a free function plus a receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub rcvr: Receiver,
    pub params: Vec<Param>,
    pub results: Vec<ReturnValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Function(FreeFunction),
    Method(Method),
}

impl Candidate {
    pub fn name(&self) -> &str {
        match self {
            Candidate::Function(f) => &f.name,
            Candidate::Method(m) => &m.name,
        }
    }

    pub fn params(&self) -> &[Param] {
        match self {
            Candidate::Function(f) => &f.params,
            Candidate::Method(m) => &m.params,
        }
    }

    pub fn results(&self) -> &[ReturnValue] {
        match self {
            Candidate::Function(f) => &f.results,
            Candidate::Method(m) => &m.results,
        }
    }

    pub fn test_name(&self) -> String {
        test_name_for(self.name())
    }
}

/// The fixed naming convention for generated tests; duplicate detection
/// looks for this exact name among a unit's declared functions.
pub fn test_name_for(ident: &str) -> String {
    format!("test_{ident}")
}

/// Extract a free-function description from a top-level `fn` item.
pub fn extract_fn(item: &ItemFn) -> Result<Candidate, UnsupportedType> {
    let name = item.sig.ident.to_string();
    let mut taken = HashSet::new();
    let params = extract_params(&item.sig, &mut taken)?;
    let results = extract_results(&item.sig)?;
    Ok(Candidate::Function(FreeFunction {
        call_path: name.clone(),
        name,
        params,
        results,
    }))
}

/// Extract a candidate from an inherent impl's function.
///
/// A function with a `self` receiver becomes a [`Method`]; one without
/// becomes a [`FreeFunction`] invoked through `SelfTy::name`.
pub fn extract_impl_fn(self_ty: &Type, item: &ImplItemFn) -> Result<Candidate, UnsupportedType> {
    let name = item.sig.ident.to_string();
    let self_name = display_name(self_ty)?;
    let mut taken = HashSet::new();

    if item.sig.receiver().is_some() {
        // The receiver occupies the first Input field, so its synthesized
        // name is reserved before parameter names are collected.
        let rcvr_name = unique_name(self_name.to_lowercase(), &mut taken, 0);
        let params = extract_params(&item.sig, &mut taken)?;
        let results = extract_results(&item.sig)?;
        Ok(Candidate::Method(Method {
            name,
            rcvr: Receiver {
                name: rcvr_name,
                ty: self_name,
            },
            params,
            results,
        }))
    } else {
        let params = extract_params(&item.sig, &mut taken)?;
        let results = extract_results(&item.sig)?;
        Ok(Candidate::Function(FreeFunction {
            call_path: format!("{self_name}::{name}"),
            name,
            params,
            results,
        }))
    }
}

fn extract_params(
    sig: &syn::Signature,
    taken: &mut HashSet<String>,
) -> Result<Vec<Param>, UnsupportedType> {
    let mut params = Vec::new();
    for arg in &sig.inputs {
        let FnArg::Typed(pat_ty) = arg else {
            continue;
        };
        let ty = display_name(&pat_ty.ty)?;
        let base = match pat_ty.pat.as_ref() {
            Pat::Ident(pat) => pat.ident.to_string(),
            // `_` or a destructuring pattern leaves the parameter unnamed;
            // synthesize a name from its type, like unnamed results.
            _ => ty.to_lowercase(),
        };
        // `taken.len()` is the 0-based Input field position: the receiver,
        // when present, was reserved first.
        let position = taken.len();
        let name = unique_name(base, taken, position);
        params.push(Param { name, ty });
    }
    Ok(params)
}

fn extract_results(sig: &syn::Signature) -> Result<Vec<ReturnValue>, UnsupportedType> {
    let ReturnType::Type(_, ty) = &sig.output else {
        return Ok(Vec::new());
    };

    // A top-level tuple return contributes one result per element.
    let element_types: Vec<&Type> = match ty.as_ref() {
        Type::Tuple(tuple) => tuple.elems.iter().collect(),
        other => vec![other],
    };

    let mut taken = HashSet::new();
    let mut results = Vec::new();
    for element in element_types {
        let ty = display_name(element)?;
        let name = unique_name(ty.to_lowercase(), &mut taken, results.len());
        results.push(ReturnValue { name, ty });
    }
    Ok(results)
}

/// Reserve `base` as a field name, disambiguating collisions with a 1-based
/// positional suffix (`i32`, then `i32_2`). The suffix keeps incrementing
/// while the candidate is itself already taken, e.g. by an explicit
/// parameter that happens to carry the suffixed name.
fn unique_name(base: String, taken: &mut HashSet<String>, position: usize) -> String {
    if taken.insert(base.clone()) {
        return base;
    }
    let mut suffix = position + 1;
    loop {
        let name = format!("{base}_{suffix}");
        if taken.insert(name.clone()) {
            return name;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_fn(source: &str) -> ItemFn {
        syn::parse_str(source).unwrap()
    }

    fn parse_impl(source: &str) -> syn::ItemImpl {
        syn::parse_str(source).unwrap()
    }

    fn impl_candidate(source: &str) -> Candidate {
        let item = parse_impl(source);
        let syn::ImplItem::Fn(method) = &item.items[0] else {
            panic!("expected a fn item");
        };
        extract_impl_fn(&item.self_ty, method).unwrap()
    }

    #[test]
    fn free_function_preserves_parameter_order() {
        let item = parse_fn("fn f(a: i32, b: String) -> bool { true }");
        let Candidate::Function(f) = extract_fn(&item).unwrap() else {
            panic!("expected a free function");
        };
        assert_eq!(f.params.len(), 2);
        assert_eq!(f.params[0], Param { name: "a".into(), ty: "i32".into() });
        assert_eq!(f.params[1], Param { name: "b".into(), ty: "String".into() });
    }

    #[test]
    fn single_result_is_named_by_lowercased_type() {
        let item = parse_fn("fn g(x: i32) -> bool { true }");
        let candidate = extract_fn(&item).unwrap();
        assert_eq!(
            candidate.results(),
            &[ReturnValue { name: "bool".into(), ty: "bool".into() }]
        );
    }

    #[test]
    fn tuple_results_flatten_in_order() {
        let item = parse_fn("fn h(x: i32) -> (i32, String) { (x, String::new()) }");
        let candidate = extract_fn(&item).unwrap();
        assert_eq!(candidate.results().len(), 2);
        assert_eq!(candidate.results()[0].name, "i32");
        assert_eq!(candidate.results()[1].name, "string");
    }

    #[test]
    fn colliding_result_names_get_positional_suffix() {
        let item = parse_fn("fn h(x: i32) -> (i32, i32) { (x, x) }");
        let candidate = extract_fn(&item).unwrap();
        assert_eq!(candidate.results()[0].name, "i32");
        assert_eq!(candidate.results()[1].name, "i32_2");
    }

    #[test]
    fn wildcard_parameter_gets_type_derived_name() {
        let item = parse_fn("fn f(_: i32, y: i32) -> bool { y > 0 }");
        let candidate = extract_fn(&item).unwrap();
        assert_eq!(candidate.params()[0].name, "i32");
        assert_eq!(candidate.params()[1].name, "y");
    }

    #[test]
    fn synthesized_name_skips_over_explicitly_taken_suffixes() {
        // The wildcard at position 2 would synthesize `i32_3`, which the
        // first parameter already claims; the suffix must keep advancing.
        let item = parse_fn("fn f(i32_3: u32, _: i32, _: i32) -> bool { true }");
        let candidate = extract_fn(&item).unwrap();

        let names: Vec<&str> = candidate.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["i32_3", "i32", "i32_4"]);
    }

    #[test]
    fn method_receiver_strips_indirection() {
        let candidate =
            impl_candidate("impl Counter { fn add(&mut self, n: u32) -> u32 { n } }");
        let Candidate::Method(m) = candidate else {
            panic!("expected a method");
        };
        assert_eq!(m.rcvr, Receiver { name: "counter".into(), ty: "Counter".into() });
        assert_eq!(m.params.len(), 1);
        assert_eq!(m.params[0].name, "n");
    }

    #[test]
    fn receiver_name_collision_with_parameter_is_disambiguated() {
        let candidate =
            impl_candidate("impl Counter { fn merge(&self, counter: u32) -> u32 { counter } }");
        let Candidate::Method(m) = candidate else {
            panic!("expected a method");
        };
        assert_eq!(m.rcvr.name, "counter");
        assert_ne!(m.params[0].name, "counter");
    }

    #[test]
    fn associated_function_is_called_through_its_type() {
        let candidate = impl_candidate("impl Counter { fn make(seed: u32) -> Counter { todo!() } }");
        let Candidate::Function(f) = candidate else {
            panic!("expected a free function");
        };
        assert_eq!(f.call_path, "Counter::make");
        assert_eq!(f.name, "make");
    }

    #[test]
    fn qualified_parameter_type_resolves_to_bare_name() {
        let item = parse_fn("fn f(r: io::Error) -> bool { true }");
        let candidate = extract_fn(&item).unwrap();
        assert_eq!(candidate.params()[0].ty, "Error");
    }

    #[test]
    fn unsupported_parameter_type_is_an_error() {
        let item = parse_fn("fn f(v: Vec<u8>) -> bool { true }");
        assert!(extract_fn(&item).is_err());
    }

    #[test]
    fn test_name_follows_fixed_convention() {
        let item = parse_fn("fn add(x: i32) -> i32 { x }");
        assert_eq!(extract_fn(&item).unwrap().test_name(), "test_add");
    }
}
