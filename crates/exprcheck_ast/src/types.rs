//! Flag types and identifiers shared by the parser and the host checker.

bitflags::bitflags! {
    /// Flags for AST nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const NONE                = 0;
        const LET                 = 1 << 0;
        const CONST               = 1 << 1;
        const AMBIENT             = 1 << 2;
        const THIS_NODE_HAS_ERROR = 1 << 3;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

bitflags::bitflags! {
    /// Type flags used by the host checker, laid out like TypeScript's
    /// TypeFlags. A literal type sets its literal bit; the `*_LIKE` unions
    /// group a primitive with its literal form.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        const NONE              = 0;
        const ANY               = 1 << 0;
        const UNKNOWN           = 1 << 1;
        const STRING            = 1 << 2;
        const NUMBER            = 1 << 3;
        const BOOLEAN           = 1 << 4;
        const STRING_LITERAL    = 1 << 7;
        const NUMBER_LITERAL    = 1 << 8;
        const BOOLEAN_LITERAL   = 1 << 9;
        const ES_SYMBOL         = 1 << 12;
        const UNIQUE_ES_SYMBOL  = 1 << 13;
        const VOID              = 1 << 14;
        const UNDEFINED         = 1 << 15;
        const NULL              = 1 << 16;
        const NEVER             = 1 << 17;
        const OBJECT            = 1 << 19;
        const UNION             = 1 << 20;
        const NON_PRIMITIVE     = 1 << 26;

        const STRING_LIKE    = Self::STRING.bits() | Self::STRING_LITERAL.bits();
        const NUMBER_LIKE    = Self::NUMBER.bits() | Self::NUMBER_LITERAL.bits();
        const BOOLEAN_LIKE   = Self::BOOLEAN.bits() | Self::BOOLEAN_LITERAL.bits();
        const ES_SYMBOL_LIKE = Self::ES_SYMBOL.bits() | Self::UNIQUE_ES_SYMBOL.bits();
        const LITERAL        = Self::STRING_LITERAL.bits() | Self::NUMBER_LITERAL.bits() | Self::BOOLEAN_LITERAL.bits();
    }
}

bitflags::bitflags! {
    /// What a host symbol declares.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u32 {
        const NONE                    = 0;
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        const BLOCK_SCOPED_VARIABLE   = 1 << 1;
        const CONST                   = 1 << 2;
        const PROPERTY                = 1 << 3;
        const FUNCTION                = 1 << 4;
        const METHOD                  = 1 << 5;
        const PARAMETER               = 1 << 6;
        const INTERFACE               = 1 << 7;
        const TYPE_ALIAS              = 1 << 8;

        const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits() | Self::BLOCK_SCOPED_VARIABLE.bits();
        const VALUE    = Self::VARIABLE.bits() | Self::PROPERTY.bits() | Self::FUNCTION.bits()
            | Self::METHOD.bits() | Self::PARAMETER.bits();
        const TYPE     = Self::INTERFACE.bits() | Self::TYPE_ALIAS.bits();
    }
}

/// Unique identifier of an AST node within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a symbol in the host's symbol arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a type in the host's type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
