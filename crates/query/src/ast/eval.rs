//! Expression evaluation against a single row.

use super::expr::Expr;
use hashbrown::HashMap;
use regex::Regex;
use std::cell::RefCell;
use std::cmp::Ordering;
use tabula_core::{Error, Operand, Result, Row, Value};

const BOOLEAN: &str = "boolean";
const ORDERED: &str = "ordered value";
const NUMERIC: &str = "numeric value";
const TEXT: &str = "text";

/// Upper bound on the compiled patterns kept per thread.
const PATTERN_CACHE_CAPACITY: usize = 64;

thread_local! {
    /// Compiled literal patterns, keyed by their source text.
    static PATTERNS: RefCell<HashMap<String, Regex>> = RefCell::new(HashMap::new());
}

impl Expr {
    /// Evaluates this expression against a row.
    ///
    /// Operands of binary operators are always both evaluated, left first.
    pub fn evaluate(&self, row: &dyn Row) -> Result<Value> {
        match self {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Field(name) => row.get_field(name),
            Expr::Not(expr) => {
                let v = boolean("negation", Operand::Single, expr.evaluate(row)?)?;
                Ok(Value::Boolean(!v))
            }
            Expr::And { left, right } => {
                let (l, r) = both_booleans("conjunction", left, right, row)?;
                Ok(Value::Boolean(l && r))
            }
            Expr::Or { left, right } => {
                let (l, r) = both_booleans("disjunction", left, right, row)?;
                Ok(Value::Boolean(l || r))
            }
            Expr::Equals { left, right } => {
                let l = left.evaluate(row)?;
                let r = right.evaluate(row)?;
                if l.is_null() {
                    return Err(Error::illegal_operand(
                        "equality",
                        Operand::Left,
                        "non-null value",
                        l.type_name(),
                    ));
                }
                Ok(Value::Boolean(l == r))
            }
            Expr::GreaterThan { left, right } => {
                let ordering = compare("greater than", left, right, row)?;
                Ok(Value::Boolean(ordering == Ordering::Greater))
            }
            Expr::LessThan { left, right } => {
                let ordering = compare("less than", left, right, row)?;
                Ok(Value::Boolean(ordering == Ordering::Less))
            }
            Expr::CloseTo {
                left,
                right,
                tolerance,
            } => {
                let l = numeric(Operand::Left, left.evaluate(row)?)?;
                let r = numeric(Operand::Right, right.evaluate(row)?)?;
                Ok(Value::Boolean((l - r).abs() < *tolerance))
            }
            Expr::Matches { text, pattern } => {
                let text = match text.evaluate(row)? {
                    Value::Text(s) => s,
                    Value::Char(c) => c.to_string(),
                    other => {
                        return Err(Error::illegal_operand(
                            "matches",
                            Operand::Left,
                            TEXT,
                            other.type_name(),
                        ))
                    }
                };
                // Only literal patterns are reused across rows.
                let cached = matches!(**pattern, Expr::Literal(_));
                let pattern = match pattern.evaluate(row)? {
                    Value::Text(s) => s,
                    other => {
                        return Err(Error::illegal_operand(
                            "matches",
                            Operand::Right,
                            TEXT,
                            other.type_name(),
                        ))
                    }
                };
                let matched = if cached {
                    is_cached_full_match(&pattern, &text)?
                } else {
                    compile(&pattern)?.is_match(&text)
                };
                Ok(Value::Boolean(matched))
            }
        }
    }

    /// Evaluates this expression and requires a boolean result.
    pub fn test(&self, row: &dyn Row) -> Result<bool> {
        match self.evaluate(row)? {
            Value::Boolean(b) => Ok(b),
            other => Err(Error::illegal_operand(
                "test",
                Operand::Single,
                BOOLEAN,
                other.type_name(),
            )),
        }
    }
}

fn boolean(operator: &'static str, operand: Operand, value: Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| Error::illegal_operand(operator, operand, BOOLEAN, value.type_name()))
}

fn both_booleans(
    operator: &'static str,
    left: &Expr,
    right: &Expr,
    row: &dyn Row,
) -> Result<(bool, bool)> {
    let l = left.evaluate(row)?;
    let r = right.evaluate(row)?;
    Ok((
        boolean(operator, Operand::Left, l)?,
        boolean(operator, Operand::Right, r)?,
    ))
}

fn compare(operator: &'static str, left: &Expr, right: &Expr, row: &dyn Row) -> Result<Ordering> {
    let l = left.evaluate(row)?;
    let r = right.evaluate(row)?;
    if l.is_null() {
        return Err(Error::illegal_operand(
            operator,
            Operand::Left,
            ORDERED,
            l.type_name(),
        ));
    }
    l.compare(&r).ok_or_else(|| {
        let expected = if r.is_null() {
            ORDERED.to_string()
        } else {
            format!("{} comparable with '{}'", ORDERED, l.type_name())
        };
        Error::illegal_operand(operator, Operand::Right, expected, r.type_name())
    })
}

fn numeric(operand: Operand, value: Value) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| Error::illegal_operand("close to", operand, NUMERIC, value.type_name()))
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{})$", pattern))
        .map_err(|e| Error::invalid_pattern(pattern, e.to_string()))
}

fn is_cached_full_match(pattern: &str, text: &str) -> Result<bool> {
    PATTERNS.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.is_match(text));
        }
        let regex = compile(pattern)?;
        let matched = regex.is_match(text);
        if cache.len() >= PATTERN_CACHE_CAPACITY {
            cache.clear();
        }
        cache.insert(pattern.to_string(), regex);
        Ok(matched)
    })
}
