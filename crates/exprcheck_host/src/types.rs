//! Host type representation.
//!
//! Types are stored in a TypeTable (type arena) and referenced by TypeId.
//! This avoids lifetime issues with recursive type structures.

use exprcheck_ast::types::{SymbolId, TypeFlags, TypeId};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

/// A type in the host type system.
#[derive(Debug, Clone)]
pub struct Type {
    pub id: TypeId,
    pub flags: TypeFlags,
    pub data: TypeData,
}

/// The specific data for each type.
#[derive(Debug, Clone)]
pub enum TypeData {
    /// any, unknown, string, number, boolean, symbol, void, undefined, null, never, object
    Intrinsic { name: &'static str },
    StringLiteral { value: String },
    /// Keeps the literal's source text for display.
    NumberLiteral { text: String },
    BooleanLiteral { value: bool },
    /// Interfaces, type literals, function types and the global `Function`
    /// and `Object` types. Anonymous when `name` is `None`.
    Object {
        name: Option<String>,
        members: IndexMap<String, SymbolId>,
        call_signatures: Vec<Signature>,
    },
    Array { element_type: TypeId },
    Union { types: Vec<TypeId> },
}

/// A function or method signature.
#[derive(Debug, Clone)]
pub struct Signature {
    pub parameters: Vec<SignatureParameter>,
    pub return_type: TypeId,
    /// The last parameter collects the remaining arguments.
    pub has_rest_parameter: bool,
}

#[derive(Debug, Clone)]
pub struct SignatureParameter {
    pub name: String,
    pub type_id: TypeId,
}

/// The type table stores all types and provides access by TypeId.
#[derive(Debug)]
pub struct TypeTable {
    types: Vec<Type>,
    // Well-known types
    pub any_type: TypeId,
    pub unknown_type: TypeId,
    pub string_type: TypeId,
    pub number_type: TypeId,
    pub boolean_type: TypeId,
    pub symbol_type: TypeId,
    pub void_type: TypeId,
    pub undefined_type: TypeId,
    pub null_type: TypeId,
    pub never_type: TypeId,
    pub object_type: TypeId,
    pub true_type: TypeId,
    pub false_type: TypeId,
    pub global_function_type: TypeId,
    pub global_object_type: TypeId,
    string_literals: FxHashMap<String, TypeId>,
    number_literals: FxHashMap<String, TypeId>,
    array_types: FxHashMap<TypeId, TypeId>,
    union_types: FxHashMap<Vec<TypeId>, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self {
            types: Vec::with_capacity(64),
            any_type: TypeId(0),
            unknown_type: TypeId(1),
            string_type: TypeId(2),
            number_type: TypeId(3),
            boolean_type: TypeId(4),
            symbol_type: TypeId(5),
            void_type: TypeId(6),
            undefined_type: TypeId(7),
            null_type: TypeId(8),
            never_type: TypeId(9),
            object_type: TypeId(10),
            true_type: TypeId(11),
            false_type: TypeId(12),
            global_function_type: TypeId(13),
            global_object_type: TypeId(14),
            string_literals: FxHashMap::default(),
            number_literals: FxHashMap::default(),
            array_types: FxHashMap::default(),
            union_types: FxHashMap::default(),
        };

        // Create intrinsic types
        table.create_intrinsic(TypeFlags::ANY, "any");
        table.create_intrinsic(TypeFlags::UNKNOWN, "unknown");
        table.create_intrinsic(TypeFlags::STRING, "string");
        table.create_intrinsic(TypeFlags::NUMBER, "number");
        table.create_intrinsic(TypeFlags::BOOLEAN, "boolean");
        table.create_intrinsic(TypeFlags::ES_SYMBOL, "symbol");
        table.create_intrinsic(TypeFlags::VOID, "void");
        table.create_intrinsic(TypeFlags::UNDEFINED, "undefined");
        table.create_intrinsic(TypeFlags::NULL, "null");
        table.create_intrinsic(TypeFlags::NEVER, "never");
        table.create_intrinsic(TypeFlags::NON_PRIMITIVE, "object");
        // true/false literal types
        table.add_type(TypeFlags::BOOLEAN_LITERAL, TypeData::BooleanLiteral { value: true });
        table.add_type(TypeFlags::BOOLEAN_LITERAL, TypeData::BooleanLiteral { value: false });
        // Global Function and Object
        table.create_named_object("Function");
        table.create_named_object("Object");

        table
    }

    fn create_intrinsic(&mut self, flags: TypeFlags, name: &'static str) -> TypeId {
        self.add_type(flags, TypeData::Intrinsic { name })
    }

    /// Create an object type with no members yet.
    pub fn create_named_object(&mut self, name: &str) -> TypeId {
        self.add_type(
            TypeFlags::OBJECT,
            TypeData::Object {
                name: Some(name.to_string()),
                members: IndexMap::new(),
                call_signatures: Vec::new(),
            },
        )
    }

    pub fn create_anonymous_object(
        &mut self,
        members: IndexMap<String, SymbolId>,
        call_signatures: Vec<Signature>,
    ) -> TypeId {
        self.add_type(
            TypeFlags::OBJECT,
            TypeData::Object { name: None, members, call_signatures },
        )
    }

    /// Add a new type to the table and return its ID.
    pub fn add_type(&mut self, flags: TypeFlags, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(Type { id, flags, data });
        id
    }

    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    pub fn get_mut(&mut self, id: TypeId) -> &mut Type {
        &mut self.types[id.index()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn string_literal(&mut self, value: &str) -> TypeId {
        if let Some(&id) = self.string_literals.get(value) {
            return id;
        }
        let id = self.add_type(
            TypeFlags::STRING_LITERAL,
            TypeData::StringLiteral { value: value.to_string() },
        );
        self.string_literals.insert(value.to_string(), id);
        id
    }

    pub fn number_literal(&mut self, text: &str) -> TypeId {
        if let Some(&id) = self.number_literals.get(text) {
            return id;
        }
        let id = self.add_type(
            TypeFlags::NUMBER_LITERAL,
            TypeData::NumberLiteral { text: text.to_string() },
        );
        self.number_literals.insert(text.to_string(), id);
        id
    }

    pub fn boolean_literal(&self, value: bool) -> TypeId {
        if value {
            self.true_type
        } else {
            self.false_type
        }
    }

    pub fn array_of(&mut self, element_type: TypeId) -> TypeId {
        if let Some(&id) = self.array_types.get(&element_type) {
            return id;
        }
        let id = self.add_type(TypeFlags::OBJECT, TypeData::Array { element_type });
        self.array_types.insert(element_type, id);
        id
    }

    /// Create a union, flattening nested unions and dropping duplicates.
    pub fn union_of(&mut self, types: Vec<TypeId>) -> TypeId {
        let mut seen = FxHashSet::default();
        let mut unique = Vec::with_capacity(types.len());
        for ty in types {
            let members = match &self.get(ty).data {
                TypeData::Union { types } => types.clone(),
                _ => vec![ty],
            };
            for member in members {
                if seen.insert(member) {
                    unique.push(member);
                }
            }
        }
        if unique.iter().any(|&t| t == self.any_type) {
            return self.any_type;
        }
        match unique.len() {
            0 => self.never_type,
            1 => unique[0],
            _ => {
                if let Some(&id) = self.union_types.get(&unique) {
                    return id;
                }
                let id = self.add_type(TypeFlags::UNION, TypeData::Union { types: unique.clone() });
                self.union_types.insert(unique, id);
                id
            }
        }
    }

    /// The primitive a literal type widens to; other types are unchanged.
    pub fn widen_literal(&self, id: TypeId) -> TypeId {
        match self.get(id).data {
            TypeData::StringLiteral { .. } => self.string_type,
            TypeData::NumberLiteral { .. } => self.number_type,
            TypeData::BooleanLiteral { .. } => self.boolean_type,
            _ => id,
        }
    }

    pub fn element_type_of(&self, id: TypeId) -> Option<TypeId> {
        match self.get(id).data {
            TypeData::Array { element_type } => Some(element_type),
            _ => None,
        }
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_ids() {
        let table = TypeTable::new();
        assert!(table.get(table.string_type).flags.contains(TypeFlags::STRING));
        assert!(table.get(table.true_type).flags.contains(TypeFlags::BOOLEAN_LITERAL));
        assert!(matches!(
            &table.get(table.global_function_type).data,
            TypeData::Object { name: Some(name), .. } if name == "Function"
        ));
        assert!(matches!(
            &table.get(table.global_object_type).data,
            TypeData::Object { name: Some(name), .. } if name == "Object"
        ));
    }

    #[test]
    fn test_literals_are_interned() {
        let mut table = TypeTable::new();
        let a = table.string_literal("a");
        assert_eq!(table.string_literal("a"), a);
        assert_ne!(table.string_literal("b"), a);
        assert_eq!(table.widen_literal(a), table.string_type);
    }

    #[test]
    fn test_union_flattening() {
        let mut table = TypeTable::new();
        let (s, n) = (table.string_type, table.number_type);
        let inner = table.union_of(vec![s, n]);
        let outer = table.union_of(vec![inner, s]);
        assert_eq!(inner, outer);
        assert_eq!(table.union_of(vec![s, s]), s);
        let any = table.any_type;
        assert_eq!(table.union_of(vec![s, any]), any);
    }
}
