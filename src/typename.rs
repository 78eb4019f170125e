//! Display-name resolution for type expressions.
//!
//! Generated Input/Output fields carry a flat type name, not a structured
//! type tree. Path types resolve to their final segment (`fmt::Error`
//! becomes `Error`); references and raw pointers resolve to the pointee's
//! name with the indirection dropped (`&mut Foo` and `Foo` both render as
//! `Foo`). Every other shape is reported as unsupported rather than being
//! silently degraded to a placeholder name.

use std::fmt;
use syn::{PathArguments, Type};

/// A type expression shape the generator cannot turn into a field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedType {
    pub kind: &'static str,
}

impl fmt::Display for UnsupportedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported {} type", self.kind)
    }
}

impl std::error::Error for UnsupportedType {}

/// Resolve a type expression to the display name used for generated fields.
pub fn display_name(ty: &Type) -> Result<String, UnsupportedType> {
    match ty {
        Type::Path(path) => {
            if path.qself.is_some() {
                return Err(UnsupportedType {
                    kind: "qualified-self",
                });
            }
            let segment = path
                .path
                .segments
                .last()
                .ok_or(UnsupportedType { kind: "empty path" })?;
            match segment.arguments {
                PathArguments::None => Ok(segment.ident.to_string()),
                _ => Err(UnsupportedType { kind: "generic" }),
            }
        }
        Type::Reference(reference) => display_name(&reference.elem),
        Type::Ptr(pointer) => display_name(&pointer.elem),
        Type::Paren(paren) => display_name(&paren.elem),
        Type::Group(group) => display_name(&group.elem),
        Type::Tuple(_) => Err(UnsupportedType { kind: "tuple" }),
        Type::Slice(_) => Err(UnsupportedType { kind: "slice" }),
        Type::Array(_) => Err(UnsupportedType { kind: "array" }),
        Type::BareFn(_) => Err(UnsupportedType { kind: "function" }),
        Type::TraitObject(_) => Err(UnsupportedType {
            kind: "trait object",
        }),
        Type::ImplTrait(_) => Err(UnsupportedType { kind: "impl trait" }),
        Type::Macro(_) => Err(UnsupportedType { kind: "macro" }),
        Type::Never(_) => Err(UnsupportedType { kind: "never" }),
        Type::Infer(_) => Err(UnsupportedType { kind: "inferred" }),
        _ => Err(UnsupportedType {
            kind: "unrecognized",
        }),
    }
}
