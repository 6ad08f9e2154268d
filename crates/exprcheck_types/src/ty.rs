//! Types and call signatures.

use crate::kind::TypeKind;
use crate::symbol::SymbolTable;
use std::fmt;
use std::rc::Rc;

/// A type as the checker sees it.
///
/// `members` and `call_signatures` may be computed lazily by an
/// implementation, but repeated calls must return the same value.
pub trait Type {
    /// Display name used in diagnostics.
    fn name(&self) -> &str;
    fn kind(&self) -> TypeKind;
    fn members(&self) -> &SymbolTable;
    fn call_signatures(&self) -> &[CallSignature];
}

/// Shared handle to a type.
pub type TypeRef = Rc<dyn Type>;

impl fmt::Debug for dyn Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

/// The parameter list of a call signature.
#[derive(Clone)]
pub enum ArgTypes {
    /// Exactly these parameters.
    Fixed(Vec<TypeRef>),
    /// `leading` parameters followed by any number of `rest` arguments.
    Variadic { leading: Vec<TypeRef>, rest: TypeRef },
    /// Accepts any arguments.
    Any,
}

impl ArgTypes {
    /// The fewest arguments a call must pass.
    pub fn min_count(&self) -> usize {
        match self {
            ArgTypes::Fixed(params) => params.len(),
            ArgTypes::Variadic { leading, .. } => leading.len(),
            ArgTypes::Any => 0,
        }
    }

    pub fn accepts_count(&self, count: usize) -> bool {
        match self {
            ArgTypes::Fixed(params) => params.len() == count,
            ArgTypes::Variadic { leading, .. } => count >= leading.len(),
            ArgTypes::Any => true,
        }
    }
}

impl fmt::Debug for ArgTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgTypes::Fixed(params) => f.debug_tuple("Fixed").field(params).finish(),
            ArgTypes::Variadic { leading, rest } => f
                .debug_struct("Variadic")
                .field("leading", leading)
                .field("rest", rest)
                .finish(),
            ArgTypes::Any => f.write_str("Any"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallSignature {
    pub arg_types: ArgTypes,
    pub return_type: TypeRef,
}

impl CallSignature {
    pub fn new(arg_types: ArgTypes, return_type: TypeRef) -> Self {
        Self { arg_types, return_type }
    }
}

/// A type whose properties are all known up front.
pub struct StaticType {
    name: String,
    kind: TypeKind,
    members: SymbolTable,
    call_signatures: Vec<CallSignature>,
}

impl StaticType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            members: SymbolTable::new(),
            call_signatures: Vec::new(),
        }
    }

    /// The canonical type of a kind, named by its keyword.
    pub fn of_kind(kind: TypeKind) -> TypeRef {
        Rc::new(Self::new(kind.keyword(), kind))
    }

    pub fn with_members(mut self, members: SymbolTable) -> Self {
        self.members = members;
        self
    }

    pub fn with_call_signature(mut self, signature: CallSignature) -> Self {
        self.call_signatures.push(signature);
        self
    }

    pub fn into_ref(self) -> TypeRef {
        Rc::new(self)
    }
}

impl Type for StaticType {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> TypeKind {
        self.kind
    }

    fn members(&self) -> &SymbolTable {
        &self.members
    }

    fn call_signatures(&self) -> &[CallSignature] {
        &self.call_signatures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity() {
        let number = StaticType::of_kind(TypeKind::Number);
        let fixed = ArgTypes::Fixed(vec![number.clone(), number.clone()]);
        assert!(fixed.accepts_count(2));
        assert!(!fixed.accepts_count(3));

        let variadic = ArgTypes::Variadic { leading: vec![number.clone()], rest: number };
        assert_eq!(variadic.min_count(), 1);
        assert!(!variadic.accepts_count(0));
        assert!(variadic.accepts_count(5));

        assert!(ArgTypes::Any.accepts_count(0));
    }

    #[test]
    fn test_static_type_debug() {
        let ty = StaticType::of_kind(TypeKind::Function);
        assert_eq!(format!("{:?}", ty), "Type { name: \"Function\", kind: Function }");
    }
}
