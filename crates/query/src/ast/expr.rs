//! Expression AST definitions.

use std::fmt;
use tabula_core::Value;

/// Tolerance used by [`Expr::is_close_to`] when none is given.
pub const DEFAULT_TOLERANCE: f64 = 0.1;

/// Expression AST node.
///
/// Expressions are immutable and carry no row state: one tree can be
/// evaluated against any number of rows, from any number of tables.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Literal value.
    Literal(Value),
    /// Reference to a field of the evaluated row, by name.
    Field(String),
    /// Logical negation.
    Not(Box<Expr>),
    /// Logical conjunction. Both operands are always evaluated.
    And { left: Box<Expr>, right: Box<Expr> },
    /// Logical disjunction. Both operands are always evaluated.
    Or { left: Box<Expr>, right: Box<Expr> },
    /// Structural equality.
    Equals { left: Box<Expr>, right: Box<Expr> },
    /// Strict greater-than, by natural ordering.
    GreaterThan { left: Box<Expr>, right: Box<Expr> },
    /// Strict less-than, by natural ordering.
    LessThan { left: Box<Expr>, right: Box<Expr> },
    /// Numeric closeness: `|left - right| < tolerance`.
    CloseTo {
        left: Box<Expr>,
        right: Box<Expr>,
        tolerance: f64,
    },
    /// Whole-string regular expression match.
    Matches { text: Box<Expr>, pattern: Box<Expr> },
}

/// Creates a reference to the named field.
pub fn field(name: impl Into<String>) -> Expr {
    Expr::Field(name.into())
}

/// Creates a literal.
pub fn value(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

/// Creates a negation.
pub fn not(expr: Expr) -> Expr {
    Expr::Not(Box::new(expr))
}

impl Expr {
    /// Conjunction of `self` and `other`.
    pub fn and(self, other: Expr) -> Expr {
        Expr::And {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Disjunction of `self` and `other`.
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Implication, built as `not(self).or(other)`.
    pub fn implies(self, other: Expr) -> Expr {
        not(self).or(other)
    }

    /// Equality test.
    pub fn is(self, other: Expr) -> Expr {
        Expr::Equals {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Strict greater-than test.
    pub fn is_above(self, other: Expr) -> Expr {
        Expr::GreaterThan {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Strict less-than test.
    pub fn is_below(self, other: Expr) -> Expr {
        Expr::LessThan {
            left: Box::new(self),
            right: Box::new(other),
        }
    }

    /// Closeness test with the default tolerance.
    pub fn is_close_to(self, other: Expr) -> Expr {
        self.is_close_to_within(other, DEFAULT_TOLERANCE)
    }

    /// Closeness test with an explicit tolerance.
    pub fn is_close_to_within(self, other: Expr, tolerance: f64) -> Expr {
        Expr::CloseTo {
            left: Box::new(self),
            right: Box::new(other),
            tolerance,
        }
    }

    /// Whole-string regular expression match against `pattern`.
    pub fn matches(self, pattern: Expr) -> Expr {
        Expr::Matches {
            text: Box::new(self),
            pattern: Box::new(pattern),
        }
    }

    /// Returns the names of every field this expression reads.
    pub fn referenced_fields(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_fields(&mut names);
        names
    }

    fn collect_fields<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Field(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            Expr::Not(expr) => expr.collect_fields(names),
            Expr::And { left, right }
            | Expr::Or { left, right }
            | Expr::Equals { left, right }
            | Expr::GreaterThan { left, right }
            | Expr::LessThan { left, right }
            | Expr::CloseTo { left, right, .. } => {
                left.collect_fields(names);
                right.collect_fields(names);
            }
            Expr::Matches { text, pattern } => {
                text.collect_fields(names);
                pattern.collect_fields(names);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Value::Text(text)) => write!(f, "{:?}", text),
            Expr::Literal(Value::Char(c)) => write!(f, "{:?}", c),
            Expr::Literal(v) => write!(f, "{}", v),
            Expr::Field(name) => write!(f, "{}", name),
            Expr::Not(expr) => write!(f, "not({})", expr),
            Expr::And { left, right } => write!(f, "({} and {})", left, right),
            Expr::Or { left, right } => write!(f, "({} or {})", left, right),
            Expr::Equals { left, right } => write!(f, "{} is {}", left, right),
            Expr::GreaterThan { left, right } => write!(f, "{} > {}", left, right),
            Expr::LessThan { left, right } => write!(f, "{} < {}", left, right),
            Expr::CloseTo {
                left,
                right,
                tolerance,
            } => write!(f, "{} ~ {} (+/- {})", left, right, tolerance),
            Expr::Matches { text, pattern } => write!(f, "{} matches {}", text, pattern),
        }
    }
}
