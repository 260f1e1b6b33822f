//! Error types for Tabula tables.

use crate::types::DataType;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Result type alias for Tabula operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Broad failure categories, used by callers that only care about the family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Construction or append-time validation failed.
    Validation,
    /// An index fell outside its valid inclusive range.
    Bounds,
    /// A cursor or iterator was moved or read outside its defined bounds.
    State,
    /// An expression operand lacked the capability its operator requires.
    Evaluation,
}

/// Which operand of an expression operator failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Left,
    Right,
    /// The only operand of a unary operator.
    Single,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operand::Left => "left",
            Operand::Right => "right",
            Operand::Single => "single",
        })
    }
}

/// Error types for Tabula operations.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Invalid field definition.
    InvalidField { message: String },
    /// Invalid schema definition.
    InvalidSchema { message: String },
    /// No field with the given name.
    UnknownField { name: String, available: Vec<String> },
    /// A value whose type cannot be stored or inferred.
    UnsupportedValue { found: &'static str },
    /// A row with fewer values than the schema has fields.
    ArityMismatch { expected: usize, found: usize },
    /// A cell whose type differs from its column's declared type.
    TypeMismatch {
        column: usize,
        expected: DataType,
        found: &'static str,
    },
    /// One row of a batch was rejected.
    InvalidRow { row: usize, cause: Box<Error> },
    /// Index outside `[1, upper]`; `upper == 0` means nothing is addressable.
    OutOfBounds {
        target: &'static str,
        index: usize,
        upper: usize,
    },
    /// Cursor or iterator used outside its bounds.
    InvalidState { message: String },
    /// Expression operand of the wrong type.
    IllegalOperand {
        operator: &'static str,
        operand: Operand,
        expected: String,
        found: &'static str,
    },
    /// Regular expression that does not compile.
    InvalidPattern { pattern: String, message: String },
    /// Typed getter called with a type other than the field's declared type.
    FieldTypeMismatch {
        field: String,
        declared: DataType,
        requested: DataType,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidField { message } => write!(f, "Invalid field: {}", message),
            Error::InvalidSchema { message } => write!(f, "Invalid schema: {}", message),
            Error::UnknownField { name, available } => {
                write!(f, "Unknown field name '{}' (fields are [", name)?;
                for (i, each) in available.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(each)?;
                }
                f.write_str("])")
            }
            Error::UnsupportedValue { found } => {
                write!(f, "Unsupported value type '{}'", found)
            }
            Error::ArityMismatch { expected, found } => write!(
                f,
                "Missing values (expected {} values but only {} were found)",
                expected, found
            ),
            Error::TypeMismatch {
                column,
                expected,
                found,
            } => write!(
                f,
                "Unexpected type '{}' in column {} (expecting type '{}')",
                found, column, expected
            ),
            Error::InvalidRow { row, cause } => write!(f, "Invalid row #{}: {}", row, cause),
            Error::OutOfBounds {
                target,
                index,
                upper,
            } => {
                if *upper == 0 {
                    write!(f, "Invalid {} index '{}' (empty table)", target, index)
                } else {
                    write!(
                        f,
                        "Invalid {} index '{}' (should be within [1, {}])",
                        target, index, upper
                    )
                }
            }
            Error::InvalidState { message } => write!(f, "Invalid state: {}", message),
            Error::IllegalOperand {
                operator,
                operand,
                expected,
                found,
            } => write!(
                f,
                "Illegal {} operand in '{}' (expected {}, but found '{}')",
                operand, operator, expected, found
            ),
            Error::InvalidPattern { pattern, message } => {
                write!(f, "Invalid pattern '{}': {}", pattern, message)
            }
            Error::FieldTypeMismatch {
                field,
                declared,
                requested,
            } => write!(
                f,
                "Field '{}' has type '{}' (cannot be read as '{}')",
                field, declared, requested
            ),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::InvalidRow { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl Error {
    /// Returns the failure category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidField { .. }
            | Error::InvalidSchema { .. }
            | Error::UnknownField { .. }
            | Error::UnsupportedValue { .. }
            | Error::ArityMismatch { .. }
            | Error::TypeMismatch { .. }
            | Error::InvalidRow { .. } => ErrorKind::Validation,
            Error::OutOfBounds { .. } => ErrorKind::Bounds,
            Error::InvalidState { .. } => ErrorKind::State,
            Error::IllegalOperand { .. }
            | Error::InvalidPattern { .. }
            | Error::FieldTypeMismatch { .. } => ErrorKind::Evaluation,
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(message: impl Into<String>) -> Self {
        Error::InvalidField {
            message: message.into(),
        }
    }

    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Self {
        Error::InvalidSchema {
            message: message.into(),
        }
    }

    /// Creates an unknown field error listing the available names.
    pub fn unknown_field(name: impl Into<String>, available: Vec<String>) -> Self {
        Error::UnknownField {
            name: name.into(),
            available,
        }
    }

    /// Creates an unsupported value error.
    pub fn unsupported_value(found: &'static str) -> Self {
        Error::UnsupportedValue { found }
    }

    /// Creates a type mismatch error for a cell in the given (1-based) column.
    pub fn type_mismatch(column: usize, expected: DataType, found: &'static str) -> Self {
        Error::TypeMismatch {
            column,
            expected,
            found,
        }
    }

    /// Wraps the failure of one row of a batch.
    pub fn invalid_row(row: usize, cause: Error) -> Self {
        Error::InvalidRow {
            row,
            cause: Box::new(cause),
        }
    }

    /// Creates an out-of-bounds error for a row index.
    pub fn row_out_of_bounds(index: usize, upper: usize) -> Self {
        Error::OutOfBounds {
            target: "row",
            index,
            upper,
        }
    }

    /// Creates an out-of-bounds error for a column index.
    pub fn column_out_of_bounds(index: usize, upper: usize) -> Self {
        Error::OutOfBounds {
            target: "column",
            index,
            upper,
        }
    }

    /// Creates an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Error::InvalidState {
            message: message.into(),
        }
    }

    /// Creates an illegal operand error.
    pub fn illegal_operand(
        operator: &'static str,
        operand: Operand,
        expected: impl Into<String>,
        found: &'static str,
    ) -> Self {
        Error::IllegalOperand {
            operator,
            operand,
            expected: expected.into(),
            found,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Creates a typed getter mismatch error.
    pub fn field_type_mismatch(
        field: impl Into<String>,
        declared: DataType,
        requested: DataType,
    ) -> Self {
        Error::FieldTypeMismatch {
            field: field.into(),
            declared,
            requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_bounds_display_states_range() {
        let err = Error::row_out_of_bounds(4, 3);
        assert_eq!(err.to_string(), "Invalid row index '4' (should be within [1, 3])");

        let err = Error::row_out_of_bounds(1, 0);
        assert_eq!(err.to_string(), "Invalid row index '1' (empty table)");
    }

    #[test]
    fn test_unknown_field_lists_names() {
        let err = Error::unknown_field("x", vec!["name".into(), "age".into()]);
        assert_eq!(err.to_string(), "Unknown field name 'x' (fields are [name, age])");
    }

    #[test]
    fn test_illegal_operand_names_side() {
        let err = Error::illegal_operand("greater than", Operand::Left, "ordered value", "null");
        let text = err.to_string();
        assert!(text.contains("left"));
        assert!(text.contains("ordered value"));
        assert!(text.contains("null"));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::invalid_field("x").kind(), ErrorKind::Validation);
        assert_eq!(Error::column_out_of_bounds(9, 2).kind(), ErrorKind::Bounds);
        assert_eq!(Error::invalid_state("x").kind(), ErrorKind::State);
        assert_eq!(
            Error::field_type_mismatch("age", DataType::Int32, DataType::Boolean).kind(),
            ErrorKind::Evaluation
        );
    }

    #[test]
    fn test_invalid_row_keeps_cause() {
        use core::error::Error as _;

        let err = Error::invalid_row(2, Error::type_mismatch(3, DataType::Boolean, "text"));
        assert_eq!(err.kind(), ErrorKind::Validation);
        let cause = err.source().unwrap();
        assert!(cause.to_string().contains("expecting type 'boolean'"));
    }
}
