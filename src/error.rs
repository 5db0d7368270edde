// Unified diagnostic type for the lexer, parser, and semantic predicates.
//
// Every failure in the front end -- a lexical error, a grammar violation, a
// scoping mistake -- is reported through this single enum instead of three
// separate error types, because the spec treats them as one taxonomy with one
// user-visible line format.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    MissingToken { expected: String, found: String, line: usize, column: usize },
    UnrecognizedCharacter { ch: char, line: usize, column: usize },
    TooManyTokens { line: usize, column: usize },
    InvalidConstant { line: usize, column: usize },
    InvalidType { line: usize, column: usize },
    InvalidBasicType { line: usize, column: usize },
    InvalidParameter { line: usize, column: usize },
    InvalidStatement { line: usize, column: usize },
    InvalidLValue { line: usize, column: usize },
    InvalidComparator { line: usize, column: usize },
    InvalidExpression { line: usize, column: usize },
    InvalidTerm { line: usize, column: usize },
    InvalidFactor { line: usize, column: usize },
    InvalidArguments { line: usize, column: usize },
    InvalidVariable { line: usize, column: usize },
    InvalidFunction { line: usize, column: usize },
    InvalidProcedure { line: usize, column: usize },
    TypeInconsistency { line: usize, column: usize },
    DuplicateIdent { name: String, line: usize, column: usize },
    UndeclaredIdent { name: String, line: usize, column: usize },
}

impl CompileError {
    pub fn line(&self) -> usize {
        self.position().0
    }

    pub fn column(&self) -> usize {
        self.position().1
    }

    fn position(&self) -> (usize, usize) {
        use CompileError::*;
        match self {
            MissingToken { line, column, .. }
            | UnrecognizedCharacter { line, column, .. }
            | TooManyTokens { line, column }
            | InvalidConstant { line, column }
            | InvalidType { line, column }
            | InvalidBasicType { line, column }
            | InvalidParameter { line, column }
            | InvalidStatement { line, column }
            | InvalidLValue { line, column }
            | InvalidComparator { line, column }
            | InvalidExpression { line, column }
            | InvalidTerm { line, column }
            | InvalidFactor { line, column }
            | InvalidArguments { line, column }
            | InvalidVariable { line, column }
            | InvalidFunction { line, column }
            | InvalidProcedure { line, column }
            | TypeInconsistency { line, column }
            | DuplicateIdent { line, column, .. }
            | UndeclaredIdent { line, column, .. } => (*line, *column),
        }
    }

    fn description(&self) -> String {
        use CompileError::*;
        match self {
            MissingToken { expected, found, .. } => {
                format!("expected {expected}, found {found}")
            }
            UnrecognizedCharacter { ch, .. } => format!("unrecognized character '{ch}'"),
            TooManyTokens { .. } => "too many tokens".to_string(),
            InvalidConstant { .. } => "invalid constant".to_string(),
            InvalidType { .. } => "invalid type".to_string(),
            InvalidBasicType { .. } => "invalid basic type".to_string(),
            InvalidParameter { .. } => "invalid parameter".to_string(),
            InvalidStatement { .. } => "invalid statement".to_string(),
            InvalidLValue { .. } => "invalid lvalue".to_string(),
            InvalidComparator { .. } => "invalid comparator".to_string(),
            InvalidExpression { .. } => "invalid expression".to_string(),
            InvalidTerm { .. } => "invalid term".to_string(),
            InvalidFactor { .. } => "invalid factor".to_string(),
            InvalidArguments { .. } => "invalid arguments".to_string(),
            InvalidVariable { .. } => "invalid variable".to_string(),
            InvalidFunction { .. } => "invalid function".to_string(),
            InvalidProcedure { .. } => "invalid procedure".to_string(),
            TypeInconsistency { .. } => "type inconsistency".to_string(),
            DuplicateIdent { name, .. } => format!("identifier '{name}' redeclared"),
            UndeclaredIdent { name, .. } => format!("identifier '{name}' is undeclared"),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, col {}",
            self.description(),
            self.line(),
            self.column()
        )
    }
}

impl std::error::Error for CompileError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_spec_format() {
        let err = CompileError::DuplicateIdent {
            name: "x".to_string(),
            line: 3,
            column: 7,
        };
        assert_eq!(
            err.to_string(),
            "identifier 'x' redeclared at line 3, col 7"
        );
    }

    #[test]
    fn position_accessors() {
        let err = CompileError::InvalidFactor { line: 1, column: 2 };
        assert_eq!(err.line(), 1);
        assert_eq!(err.column(), 2);
    }
}
