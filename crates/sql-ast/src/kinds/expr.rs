//! Expression nodes shared by every dialect.

use crate::arena::NodeId;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A bare or quoted name. Quoting is applied by the dialect at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default)]
    pub quoted: bool,
}
node!(Identifier {});

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier {
            name: name.into(),
            quoted: false,
        }
    }

    pub fn quoted(name: impl Into<String>) -> Self {
        Identifier {
            name: name.into(),
            quoted: true,
        }
    }
}

/// `owner.name`, e.g. a qualified column or table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyExpr {
    pub owner: Option<NodeId>,
    pub name: String,
}
node!(PropertyExpr { opt owner });

/// `*`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllColumn;
node!(AllColumn {});

/// A character string literal. `text` of `None` is the SQL NULL string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharLiteral {
    pub text: Option<String>,
    #[serde(default)]
    pub collate: Option<String>,
    /// The literal carries C-style escapes (PostgreSQL `E'..'`).
    #[serde(default)]
    pub c_style: bool,
}
node!(CharLiteral {});

impl CharLiteral {
    pub fn new(text: impl Into<String>) -> Self {
        CharLiteral {
            text: Some(text.into()),
            collate: None,
            c_style: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegerLiteral {
    pub value: i64,
}
node!(IntegerLiteral {});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberLiteral {
    pub value: BigDecimal,
}
node!(NumberLiteral {});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BooleanLiteral {
    pub value: bool,
}
node!(BooleanLiteral {});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NullLiteral;
node!(NullLiteral {});

/// `DATE 'yyyy-mm-dd'`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateLiteral {
    pub value: NaiveDate,
}
node!(DateLiteral {});

/// `TIMESTAMP 'yyyy-mm-dd hh:mm:ss'`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampLiteral {
    pub value: NaiveDateTime,
}
node!(TimestampLiteral {});

/// Bit string literal, `B'0101'`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinaryLiteral {
    pub bits: String,
}
node!(BinaryLiteral {});

/// A host variable or bind marker kept verbatim: `?`, `$1`, `:name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantRef {
    pub name: String,
}
node!(VariantRef {});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    NotLike,
    ILike,
    NotILike,
    Concat,
    BitOr,
    BitAnd,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Or => "OR",
            BinaryOperator::And => "AND",
            BinaryOperator::Eq => "=",
            BinaryOperator::NotEq => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::LtEq => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::GtEq => ">=",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::NotLike => "NOT LIKE",
            BinaryOperator::ILike => "ILIKE",
            BinaryOperator::NotILike => "NOT ILIKE",
            BinaryOperator::Concat => "||",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
        }
    }

    /// Spelled as a word, so subject to keyword casing.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            BinaryOperator::Or
                | BinaryOperator::And
                | BinaryOperator::Like
                | BinaryOperator::NotLike
                | BinaryOperator::ILike
                | BinaryOperator::NotILike
        )
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::LtEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq
            | BinaryOperator::Like
            | BinaryOperator::NotLike
            | BinaryOperator::ILike
            | BinaryOperator::NotILike => 4,
            BinaryOperator::BitOr => 5,
            BinaryOperator::BitAnd => 6,
            BinaryOperator::Concat | BinaryOperator::Add | BinaryOperator::Sub => 7,
            BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod => 8,
        }
    }

    /// `a op (b op c)` means the same as `(a op b) op c`.
    pub fn is_associative(self) -> bool {
        matches!(
            self,
            BinaryOperator::Or
                | BinaryOperator::And
                | BinaryOperator::Concat
                | BinaryOperator::BitOr
                | BinaryOperator::BitAnd
                | BinaryOperator::Add
                | BinaryOperator::Mul
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOp {
    pub left: Option<NodeId>,
    pub op: BinaryOperator,
    pub right: Option<NodeId>,
}
node!(BinaryOp { opt left, opt right });

impl BinaryOp {
    pub fn new(left: NodeId, op: BinaryOperator, right: NodeId) -> Self {
        BinaryOp {
            left: Some(left),
            op,
            right: Some(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Neg,
    Plus,
    BitNot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryOp {
    pub op: UnaryOperator,
    pub expr: Option<NodeId>,
}
node!(UnaryOp { opt expr });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<NodeId>,
    #[serde(default)]
    pub distinct: bool,
}
node!(FunctionCall { many args });

/// `CAST(expr AS type)`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cast {
    pub expr: Option<NodeId>,
    pub data_type: Option<NodeId>,
}
node!(Cast { opt expr, opt data_type });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InList {
    pub expr: Option<NodeId>,
    #[serde(default)]
    pub items: Vec<NodeId>,
    #[serde(default)]
    pub not: bool,
}
node!(InList { opt expr, many items });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Between {
    pub expr: Option<NodeId>,
    pub low: Option<NodeId>,
    pub high: Option<NodeId>,
    #[serde(default)]
    pub not: bool,
}
node!(Between { opt expr, opt low, opt high });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IsNull {
    pub expr: Option<NodeId>,
    #[serde(default)]
    pub not: bool,
}
node!(IsNull { opt expr });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exists {
    pub query: Option<NodeId>,
    #[serde(default)]
    pub not: bool,
}
node!(Exists { opt query });

/// A scalar or `IN` subquery: `(SELECT ..)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubqueryExpr {
    pub query: Option<NodeId>,
}
node!(SubqueryExpr { opt query });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub value: Option<NodeId>,
    #[serde(default)]
    pub whens: Vec<NodeId>,
    #[serde(default)]
    pub else_expr: Option<NodeId>,
}
node!(Case { opt value, many whens, opt else_expr });

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseWhen {
    pub condition: Option<NodeId>,
    pub result: Option<NodeId>,
}
node!(CaseWhen { opt condition, opt result });

/// Parenthesized expression list, `(a, b, c)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListExpr {
    #[serde(default)]
    pub items: Vec<NodeId>,
}
node!(ListExpr { many items });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl IntervalUnit {
    pub fn keyword(self) -> &'static str {
        match self {
            IntervalUnit::Year => "YEAR",
            IntervalUnit::Month => "MONTH",
            IntervalUnit::Week => "WEEK",
            IntervalUnit::Day => "DAY",
            IntervalUnit::Hour => "HOUR",
            IntervalUnit::Minute => "MINUTE",
            IntervalUnit::Second => "SECOND",
        }
    }
}

/// `INTERVAL value unit`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntervalExpr {
    pub value: Option<NodeId>,
    #[serde(default)]
    pub unit: Option<IntervalUnit>,
}
node!(IntervalExpr { opt value });

/// A type name with optional arguments, `VARCHAR(20)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataType {
    pub name: String,
    #[serde(default)]
    pub args: Vec<NodeId>,
}
node!(DataType { many args });

impl DataType {
    pub fn new(name: impl Into<String>) -> Self {
        DataType {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// `component[]`, or `ARRAY<component>` where arrays are generic types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayDataType {
    pub component: Option<NodeId>,
    #[serde(default)]
    pub args: Vec<NodeId>,
}
node!(ArrayDataType { opt component, many args });
