//! Host-backed types and symbols.

use exprcheck_host::{HostChecker, Location, Signature, SymbolId, TypeFlags, TypeId};
use exprcheck_types::{ArgTypes, CallSignature, Symbol, SymbolRef, SymbolTable, Type, TypeKind, TypeRef};
use std::cell::OnceCell;
use std::rc::Rc;

/// Map host type flags to a [`TypeKind`].
///
/// Precedence is fixed: any, boolean-like, string-like, number-like, symbol,
/// undefined, null. Everything else, host objects included, is `Other`.
///
/// Host types never classify as `Object` or `Function`; those kinds only come
/// from the repository's fixed singletons or from non-host types. So `in` and
/// `instanceof` report on interface- and function-typed host bindings.
pub fn classify_type_flags(flags: TypeFlags) -> TypeKind {
    if flags.contains(TypeFlags::ANY) {
        TypeKind::Any
    } else if flags.intersects(TypeFlags::BOOLEAN_LIKE) {
        TypeKind::Boolean
    } else if flags.intersects(TypeFlags::STRING_LIKE) {
        TypeKind::String
    } else if flags.intersects(TypeFlags::NUMBER_LIKE) {
        TypeKind::Number
    } else if flags.intersects(TypeFlags::ES_SYMBOL_LIKE) {
        TypeKind::Symbol
    } else if flags.contains(TypeFlags::UNDEFINED) {
        TypeKind::Undefined
    } else if flags.contains(TypeFlags::NULL) {
        TypeKind::Null
    } else {
        TypeKind::Other
    }
}

/// A host type seen from one location.
pub struct HostType {
    host: Rc<HostChecker>,
    id: TypeId,
    location: Location,
    name: String,
    kind: TypeKind,
    members: OnceCell<SymbolTable>,
    call_signatures: OnceCell<Vec<CallSignature>>,
}

impl HostType {
    pub fn new(host: Rc<HostChecker>, id: TypeId, location: Location) -> Self {
        let name = host.type_to_string(id);
        let kind = classify_type_flags(host.type_flags(id));
        Self {
            host,
            id,
            location,
            name,
            kind,
            members: OnceCell::new(),
            call_signatures: OnceCell::new(),
        }
    }

    pub fn into_ref(self) -> TypeRef {
        Rc::new(self)
    }

    fn wrap(&self, id: TypeId) -> TypeRef {
        HostType::new(self.host.clone(), id, self.location).into_ref()
    }

    fn convert_signature(&self, signature: &Signature) -> CallSignature {
        let return_type = self.wrap(signature.return_type);
        let mut params: Vec<TypeId> = signature.parameters.iter().map(|p| p.type_id).collect();
        if !signature.has_rest_parameter {
            let params = params.into_iter().map(|id| self.wrap(id)).collect();
            return CallSignature::new(ArgTypes::Fixed(params), return_type);
        }

        let Some(rest_array) = params.pop() else {
            return CallSignature::new(ArgTypes::Any, return_type);
        };
        let rest = self.host.element_type_of_array(rest_array).unwrap_or(rest_array);
        if params.is_empty() && self.host.type_flags(rest).contains(TypeFlags::ANY) {
            return CallSignature::new(ArgTypes::Any, return_type);
        }
        let leading = params.into_iter().map(|id| self.wrap(id)).collect();
        CallSignature::new(ArgTypes::Variadic { leading, rest: self.wrap(rest) }, return_type)
    }
}

impl Type for HostType {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> TypeKind {
        self.kind
    }

    fn members(&self) -> &SymbolTable {
        self.members.get_or_init(|| {
            self.host
                .properties_of_type(self.id)
                .into_iter()
                .map(|symbol| HostSymbol::new(self.host.clone(), symbol, self.location).into_ref())
                .collect()
        })
    }

    fn call_signatures(&self) -> &[CallSignature] {
        self.call_signatures.get_or_init(|| {
            self.host
                .signatures_of_type(self.id)
                .iter()
                .map(|signature| self.convert_signature(signature))
                .collect()
        })
    }
}

/// A host symbol whose type is read at its anchor location.
pub struct HostSymbol {
    host: Rc<HostChecker>,
    id: SymbolId,
    location: Location,
    name: String,
    ty: OnceCell<TypeRef>,
}

impl HostSymbol {
    pub fn new(host: Rc<HostChecker>, id: SymbolId, location: Location) -> Self {
        let name = host.symbol_name(id);
        Self {
            host,
            id,
            location,
            name,
            ty: OnceCell::new(),
        }
    }

    pub fn into_ref(self) -> SymbolRef {
        Rc::new(self)
    }
}

impl Symbol for HostSymbol {
    fn name(&self) -> &str {
        &self.name
    }

    fn ty(&self) -> TypeRef {
        self.ty
            .get_or_init(|| {
                let id = self.host.type_of_symbol_at_location(self.id, self.location);
                HostType::new(self.host.clone(), id, self.location).into_ref()
            })
            .clone()
    }
}
