//! Abstract Syntax Tree types
//!
//! Every node serializes with a `type` discriminant naming its kind.
//! Optional fields (`else_body`, `decorators`, `alias`, ...) are omitted
//! when absent, so consumers must read a missing field as `None`.

use serde::Serialize;
use std::fmt;

/// Root node
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "Program")]
pub struct Program {
    pub body: Vec<Stmt>,
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Stmt {
    FunctionDefinition {
        name: String,
        params: Vec<Param>,
        #[serde(skip_serializing_if = "Option::is_none")]
        return_type: Option<TypeExpr>,
        body: Vec<Stmt>,
        #[serde(rename = "async")]
        is_async: bool,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        decorators: Vec<Expr>,
    },
    ClassDefinition {
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        bases: Vec<Expr>,
        body: Vec<Stmt>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        decorators: Vec<Expr>,
    },
    #[serde(rename = "IfStatement")]
    If {
        condition: Expr,
        body: Vec<Stmt>,
        #[serde(skip_serializing_if = "Option::is_none")]
        else_body: Option<Vec<Stmt>>,
    },
    #[serde(rename = "WhileStatement")]
    While {
        condition: Expr,
        body: Vec<Stmt>,
        #[serde(skip_serializing_if = "Option::is_none")]
        else_body: Option<Vec<Stmt>>,
    },
    #[serde(rename = "ForStatement")]
    For {
        target: String,
        iterable: Expr,
        body: Vec<Stmt>,
        #[serde(skip_serializing_if = "Option::is_none")]
        else_body: Option<Vec<Stmt>>,
    },
    #[serde(rename = "TryStatement")]
    Try {
        body: Vec<Stmt>,
        handlers: Vec<ExceptHandler>,
        #[serde(skip_serializing_if = "Option::is_none")]
        finalbody: Option<Vec<Stmt>>,
    },
    #[serde(rename = "WithStatement")]
    With { items: Vec<WithItem>, body: Vec<Stmt> },
    #[serde(rename = "MatchStatement")]
    Match { subject: Expr, cases: Vec<MatchCase> },
    Assignment { target: String, value: Expr },
    AugmentedAssignment {
        target: String,
        operator: BinOp,
        value: Expr,
    },
    #[serde(rename = "ReturnStatement")]
    Return {
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<Expr>,
    },
    #[serde(rename = "PassStatement")]
    Pass,
    #[serde(rename = "BreakStatement")]
    Break,
    #[serde(rename = "ContinueStatement")]
    Continue,
    #[serde(rename = "ImportStatement")]
    Import {
        module: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alias: Option<String>,
    },
    #[serde(rename = "ImportFromStatement")]
    ImportFrom {
        module: String,
        names: Vec<ImportName>,
    },
    /// A bare expression; serializes as the expression node itself
    #[serde(untagged)]
    Expr(Expr),
}

impl Stmt {
    /// Node kind as it appears in the `type` discriminant
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::FunctionDefinition { .. } => "FunctionDefinition",
            Stmt::ClassDefinition { .. } => "ClassDefinition",
            Stmt::If { .. } => "IfStatement",
            Stmt::While { .. } => "WhileStatement",
            Stmt::For { .. } => "ForStatement",
            Stmt::Try { .. } => "TryStatement",
            Stmt::With { .. } => "WithStatement",
            Stmt::Match { .. } => "MatchStatement",
            Stmt::Assignment { .. } => "Assignment",
            Stmt::AugmentedAssignment { .. } => "AugmentedAssignment",
            Stmt::Return { .. } => "ReturnStatement",
            Stmt::Pass => "PassStatement",
            Stmt::Break => "BreakStatement",
            Stmt::Continue => "ContinueStatement",
            Stmt::Import { .. } => "ImportStatement",
            Stmt::ImportFrom { .. } => "ImportFromStatement",
            Stmt::Expr(expr) => expr.kind_name(),
        }
    }

    /// Decorator list of a function or class definition
    pub fn decorators_mut(&mut self) -> Option<&mut Vec<Expr>> {
        match self {
            Stmt::FunctionDefinition { decorators, .. }
            | Stmt::ClassDefinition { decorators, .. } => Some(decorators),
            _ => None,
        }
    }
}

/// One `except [Type [as alias]]:` clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceptHandler {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub exception: Option<Expr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    pub body: Vec<Stmt>,
}

/// One `expr [as alias]` item of a `with` header
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithItem {
    pub context: Expr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// One `case pattern [if guard]:` clause
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCase {
    pub pattern: Expr,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// One `name [as alias]` of a `from ... import` list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportName {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    BinaryOp {
        operator: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp {
        operator: UnaryOp,
        operand: Box<Expr>,
    },
    Literal { kind: LiteralKind, value: String },
    Identifier { name: String },
    ListLiteral { elements: Vec<Expr> },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        keywords: Vec<KeywordArg>,
    },
    Attribute { value: Box<Expr>, attr: String },
    Subscript { value: Box<Expr>, index: Box<Expr> },
}

impl Expr {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Expr::Literal {
            kind: LiteralKind::Number,
            value: text.into(),
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expr::Literal {
            kind: LiteralKind::String,
            value: text.into(),
        }
    }

    pub fn binary(
        operator: BinOp,
        left: Expr,
        right: Expr,
    ) -> Self {
        Expr::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(
        operator: UnaryOp,
        operand: Expr,
    ) -> Self {
        Expr::UnaryOp {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::BinaryOp { .. } => "BinaryOp",
            Expr::UnaryOp { .. } => "UnaryOp",
            Expr::Literal { .. } => "Literal",
            Expr::Identifier { .. } => "Identifier",
            Expr::ListLiteral { .. } => "ListLiteral",
            Expr::Call { .. } => "Call",
            Expr::Attribute { .. } => "Attribute",
            Expr::Subscript { .. } => "Subscript",
        }
    }
}

/// `name=value` argument of a call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordArg {
    pub name: String,
    pub value: Expr,
}

/// Literal category; the value keeps its source spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LiteralKind {
    Number,
    String,
    Bool,
    None,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinOp {
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
    #[serde(rename = "is")]
    Is,
    #[serde(rename = "is not")]
    IsNot,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtE,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtE,
    #[serde(rename = "|")]
    BitOr,
    #[serde(rename = "^")]
    BitXor,
    #[serde(rename = "&")]
    BitAnd,
    #[serde(rename = "<<")]
    LShift,
    #[serde(rename = ">>")]
    RShift,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "//")]
    FloorDiv,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "@")]
    MatMul,
    #[serde(rename = "**")]
    Pow,
}

impl BinOp {
    /// Operator for a symbolic `OPERATOR` token
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "==" => Some(BinOp::Eq),
            "!=" => Some(BinOp::NotEq),
            "<" => Some(BinOp::Lt),
            "<=" => Some(BinOp::LtE),
            ">" => Some(BinOp::Gt),
            ">=" => Some(BinOp::GtE),
            "|" => Some(BinOp::BitOr),
            "^" => Some(BinOp::BitXor),
            "&" => Some(BinOp::BitAnd),
            "<<" => Some(BinOp::LShift),
            ">>" => Some(BinOp::RShift),
            "+" => Some(BinOp::Add),
            "-" => Some(BinOp::Sub),
            "*" => Some(BinOp::Mul),
            "/" => Some(BinOp::Div),
            "//" => Some(BinOp::FloorDiv),
            "%" => Some(BinOp::Mod),
            "@" => Some(BinOp::MatMul),
            "**" => Some(BinOp::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::In => "in",
            BinOp::NotIn => "not in",
            BinOp::Is => "is",
            BinOp::IsNot => "is not",
            BinOp::Lt => "<",
            BinOp::LtE => "<=",
            BinOp::Gt => ">",
            BinOp::GtE => ">=",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::BitAnd => "&",
            BinOp::LShift => "<<",
            BinOp::RShift => ">>",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::FloorDiv => "//",
            BinOp::Mod => "%",
            BinOp::MatMul => "@",
            BinOp::Pow => "**",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    #[serde(rename = "+")]
    Pos,
    #[serde(rename = "-")]
    Neg,
    #[serde(rename = "~")]
    Invert,
    #[serde(rename = "not")]
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Pos => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Invert => "~",
            UnaryOp::Not => "not",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Function parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Param {
    Parameter {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotation: Option<TypeExpr>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default: Option<Expr>,
    },
    #[serde(rename = "VarArgParameter")]
    VarArg {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotation: Option<TypeExpr>,
    },
    #[serde(rename = "KwArgParameter")]
    KwArg {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        annotation: Option<TypeExpr>,
    },
}

impl Param {
    pub fn name(&self) -> &str {
        match self {
            Param::Parameter { name, .. } | Param::VarArg { name, .. } | Param::KwArg { name, .. } => {
                name
            }
        }
    }
}

/// Type annotations
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TypeExpr {
    SimpleType { name: String },
    GenericType { base: String, params: Vec<TypeExpr> },
    FunctionType {
        param_type: Box<TypeExpr>,
        return_type: Box<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn simple(name: impl Into<String>) -> Self {
        TypeExpr::SimpleType { name: name.into() }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            TypeExpr::SimpleType { name } => f.write_str(name),
            TypeExpr::GenericType { base, params } => {
                write!(f, "{}[", base)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                f.write_str("]")
            }
            TypeExpr::FunctionType {
                param_type,
                return_type,
            } => write!(f, "{} -> {}", param_type, return_type),
        }
    }
}
