// Parser module: recursive-descent grammar driver, split into the same
// logical groupings the grammar itself falls into.
//
// `Parser` owns the token vector, a cursor into it, and the symbol table
// being populated as a side effect of parsing -- the teacher's own
// `Parser<'a>` (token vector + index + an owned accumulator) reshaped for
// this grammar. No global mutable `currentToken`/`lookAhead`/`symtab`: it's
// all `&mut self`, which also makes the parser reentrant for tests.

mod constants;
mod declarations;
mod expressions;
mod semantic;
mod statements;
mod type_syntax;

use crate::error::CompileError;
use crate::lexer::{Token, TokenKind};
use crate::limits::CompilerLimits;
use crate::symtab::{ObjectId, SymTab};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    symtab: SymTab,
    limits: CompilerLimits,
}

impl Parser {
    fn new(tokens: Vec<Token>, limits: CompilerLimits) -> Self {
        Self { tokens, pos: 0, symtab: SymTab::init(), limits }
    }

    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// The next unconsumed token.
    fn lookahead(&self) -> &Token {
        &self.tokens[self.pos.min(self.last_index())]
    }

    /// The most recently consumed token. Reading a lexeme/value only makes
    /// sense right after an `eat` of the matching kind.
    fn current(&self) -> &Token {
        let idx = self.pos.saturating_sub(1).min(self.last_index());
        &self.tokens[idx]
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// If `lookahead.kind == expected`, advances past it; else fails with
    /// `MissingToken` at the lookahead's position.
    fn eat(&mut self, expected: TokenKind) -> Result<(), CompileError> {
        if self.lookahead().kind == expected {
            self.advance();
            Ok(())
        } else {
            Err(CompileError::MissingToken {
                expected: format!("{:?}", expected),
                found: format!("{:?}", self.lookahead().kind),
                line: self.lookahead().line,
                column: self.lookahead().column,
            })
        }
    }

    /// Guards recursive-descent entry points against pathologically nested
    /// input; not a grammar rule, purely a stack-safety valve.
    fn check_depth(&self, depth: usize, on_exceeded: CompileError) -> Result<(), CompileError> {
        if depth >= self.limits.max_expr_depth {
            Err(on_exceeded)
        } else {
            Ok(())
        }
    }

    fn here(&self) -> (usize, usize) {
        (self.lookahead().line, self.lookahead().column)
    }

    /// `Program ::= 'program' IDENT ';' Block '.'`
    fn compile_program(&mut self) -> Result<ObjectId, CompileError> {
        self.eat(TokenKind::Program)?;
        self.eat(TokenKind::Ident)?;
        let name = self.current().text.clone();

        let (program_obj, scope) = self.symtab.create_program_object(name);
        self.symtab.enter_block(scope);

        self.eat(TokenKind::Semicolon)?;
        self.compile_block(0)?;
        self.eat(TokenKind::Period)?;

        self.symtab.exit_block();
        Ok(program_obj)
    }
}

/// Tokenizes and parses `source`, returning the populated symbol table and
/// the id of its root program object.
pub fn parse(source: &str, limits: &CompilerLimits) -> Result<(SymTab, ObjectId), CompileError> {
    let tokens = crate::lexer::lex(source, limits)?;
    let mut parser = Parser::new(tokens, limits.clone());
    let program = parser.compile_program()?;
    Ok((parser.symtab, program))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> (SymTab, ObjectId) {
        parse(src, &CompilerLimits::default()).expect("expected successful parse")
    }

    fn parse_err(src: &str) -> CompileError {
        parse(src, &CompilerLimits::default()).expect_err("expected parse failure")
    }

    #[test]
    fn minimal_program_parses() {
        let (st, prog) = parse_ok("program p; begin end.");
        assert_eq!(st.object(prog).name, "p");
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let err = parse_err("program p; var x: integer; x: char; begin end.");
        assert!(matches!(err, CompileError::DuplicateIdent { ref name, .. } if name == "x"));
    }

    #[test]
    fn undeclared_identifier_is_rejected() {
        let err = parse_err("program p; begin call foo end.");
        assert!(matches!(err, CompileError::UndeclaredIdent { ref name, .. } if name == "foo"));
    }

    #[test]
    fn assigning_to_constant_is_invalid_lvalue() {
        let err = parse_err("program p; const c = 5; begin c := 3 end.");
        assert!(matches!(err, CompileError::InvalidLValue { .. }));
    }

    #[test]
    fn for_loop_variable_must_be_a_variable() {
        let err = parse_err("program p; const i = 0; begin for i := 1 to 10 do end.");
        assert!(matches!(err, CompileError::InvalidVariable { .. }));
    }

    #[test]
    fn recursive_function_name_is_visible_in_its_own_body() {
        parse_ok("program p; function f: integer; begin f := f end; begin end.");
    }
}
