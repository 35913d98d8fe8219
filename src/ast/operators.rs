use std::fmt;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,

    // Relational
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    Lte,

    // Equality
    /// Equal (`==`)
    EqEq,
    /// Not equal (`!=`)
    Neq,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Gt => ">",
            BinOp::Gte => ">=",
            BinOp::Lt => "<",
            BinOp::Lte => "<=",
            BinOp::EqEq => "==",
            BinOp::Neq => "!=",
        }
    }

    /// Node name used by the JSON rendering.
    pub fn node_name(self) -> &'static str {
        match self {
            BinOp::And => "AndExpr",
            BinOp::Or => "OrExpr",
            BinOp::Gt => "GtExpr",
            BinOp::Gte => "GteExpr",
            BinOp::Lt => "LtExpr",
            BinOp::Lte => "LteExpr",
            BinOp::EqEq => "EqeqExpr",
            BinOp::Neq => "NeqExpr",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical negation (`!`)
    Not,
    /// Arithmetic negation (`-`)
    Minus,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Minus => "-",
        }
    }

    pub fn node_name(self) -> &'static str {
        match self {
            UnaryOp::Not => "NotExpr",
            UnaryOp::Minus => "MinusExpr",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Target type of a typed cast (`@int(...)`, `@str(...)`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastType {
    Int,
    Str,
    Bool,
    Array,
}

impl CastType {
    /// Resolves the identifier following `@`. Matching is exact.
    pub fn from_name(name: &str) -> Option<CastType> {
        match name {
            "int" => Some(CastType::Int),
            "str" => Some(CastType::Str),
            "bool" => Some(CastType::Bool),
            "array" => Some(CastType::Array),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CastType::Int => "int",
            CastType::Str => "str",
            CastType::Bool => "bool",
            CastType::Array => "array",
        }
    }

    pub fn node_name(self) -> &'static str {
        match self {
            CastType::Int => "TypedIntExpr",
            CastType::Str => "TypedStringExpr",
            CastType::Bool => "TypedBoolExpr",
            CastType::Array => "TypedArrayExpr",
        }
    }
}

impl fmt::Display for CastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
