// `Expression ::= ['+'|'-'] Expression2`
// `Expression2 ::= Term Expression3`
// `Expression3 ::= ('+' Term Expression3) | ('-' Term Expression3) | ε`
// `Term ::= Factor Term2`
// `Term2 ::= ('*' Factor Term2) | ('/' Factor Term2) | ε`
// `Factor ::= NUMBER | CHAR | IDENT Suffix`
// `Suffix ::= '(' Arguments ')' | '[' Expression ']' Indexes | ε`
// `Arguments ::= [ '(' Expression (',' Expression)* ')' ]`

use super::Parser;
use crate::error::CompileError;
use crate::lexer::TokenKind;
use crate::symtab::ObjectKind;

/// FOLLOW(Expression3) == FOLLOW(Arguments' empty branch).
fn in_expression_follow(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::To
            | TokenKind::Do
            | TokenKind::RParen
            | TokenKind::Comma
            | TokenKind::Eq
            | TokenKind::Neq
            | TokenKind::Le
            | TokenKind::Lt
            | TokenKind::Ge
            | TokenKind::Gt
            | TokenKind::RBracket
            | TokenKind::Semicolon
            | TokenKind::End
            | TokenKind::Else
            | TokenKind::Then
    )
}

fn in_term_follow(kind: TokenKind) -> bool {
    in_expression_follow(kind) || matches!(kind, TokenKind::Plus | TokenKind::Minus)
}

impl Parser {
    pub(super) fn compile_expression(&mut self, depth: usize) -> Result<(), CompileError> {
        self.check_depth(depth, {
            let (line, column) = self.here();
            CompileError::InvalidExpression { line, column }
        })?;

        match self.lookahead().kind {
            TokenKind::Plus => {
                self.eat(TokenKind::Plus)?;
                self.compile_expression2(depth + 1)
            }
            TokenKind::Minus => {
                self.eat(TokenKind::Minus)?;
                self.compile_expression2(depth + 1)
            }
            _ => self.compile_expression2(depth + 1),
        }
    }

    fn compile_expression2(&mut self, depth: usize) -> Result<(), CompileError> {
        self.compile_term(depth)?;
        self.compile_expression3(depth)
    }

    fn compile_expression3(&mut self, depth: usize) -> Result<(), CompileError> {
        match self.lookahead().kind {
            TokenKind::Plus => {
                self.eat(TokenKind::Plus)?;
                self.compile_term(depth)?;
                self.compile_expression3(depth)
            }
            TokenKind::Minus => {
                self.eat(TokenKind::Minus)?;
                self.compile_term(depth)?;
                self.compile_expression3(depth)
            }
            kind if in_expression_follow(kind) => Ok(()),
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidExpression { line, column })
            }
        }
    }

    fn compile_term(&mut self, depth: usize) -> Result<(), CompileError> {
        self.compile_factor(depth)?;
        self.compile_term2(depth)
    }

    fn compile_term2(&mut self, depth: usize) -> Result<(), CompileError> {
        match self.lookahead().kind {
            TokenKind::Star => {
                self.eat(TokenKind::Star)?;
                self.compile_factor(depth)?;
                self.compile_term2(depth)
            }
            TokenKind::Slash => {
                self.eat(TokenKind::Slash)?;
                self.compile_factor(depth)?;
                self.compile_term2(depth)
            }
            kind if in_term_follow(kind) => Ok(()),
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidTerm { line, column })
            }
        }
    }

    fn compile_factor(&mut self, depth: usize) -> Result<(), CompileError> {
        self.check_depth(depth, {
            let (line, column) = self.here();
            CompileError::InvalidFactor { line, column }
        })?;

        match self.lookahead().kind {
            TokenKind::Number => {
                self.eat(TokenKind::Number)?;
                Ok(())
            }
            TokenKind::CharLiteral => {
                self.eat(TokenKind::CharLiteral)?;
                Ok(())
            }
            TokenKind::Ident => {
                self.eat(TokenKind::Ident)?;
                let name = self.current().text.clone();

                match self.lookahead().kind {
                    TokenKind::LParen => {
                        self.check_declared_function(&name)?;
                        self.compile_arguments(depth)
                    }
                    TokenKind::LBracket => {
                        let id = self.check_declared_ident(&name)?;
                        let kind = self.symtab.object(id).kind;
                        if !matches!(kind, ObjectKind::Variable | ObjectKind::Parameter) {
                            let (line, column) = (self.current().line, self.current().column);
                            return Err(CompileError::InvalidVariable { line, column });
                        }
                        self.compile_indexes_in_factor(depth)
                    }
                    _ => {
                        let id = self.check_declared_ident(&name)?;
                        let kind = self.symtab.object(id).kind;
                        if !matches!(
                            kind,
                            ObjectKind::Variable
                                | ObjectKind::Parameter
                                | ObjectKind::Constant
                                | ObjectKind::Function
                        ) {
                            let (line, column) = (self.current().line, self.current().column);
                            return Err(CompileError::InvalidFactor { line, column });
                        }
                        Ok(())
                    }
                }
            }
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidFactor { line, column })
            }
        }
    }

    /// `Suffix`'s array-indexing branch reuses `Indexes`, but it is only
    /// reached from inside `Factor` once the `'['` lookahead has already
    /// been confirmed, so it is spelled out here rather than shared with
    /// `LValue`'s `compile_indexes` (which starts from a fresh lookahead
    /// check of its own).
    fn compile_indexes_in_factor(&mut self, depth: usize) -> Result<(), CompileError> {
        while self.lookahead().kind == TokenKind::LBracket {
            self.eat(TokenKind::LBracket)?;
            self.compile_expression(depth)?;
            self.eat(TokenKind::RBracket)?;
        }
        Ok(())
    }

    /// `Arguments ::= [ '(' Expression (',' Expression)* ')' ]`
    pub(super) fn compile_arguments(&mut self, depth: usize) -> Result<(), CompileError> {
        match self.lookahead().kind {
            TokenKind::LParen => {
                self.eat(TokenKind::LParen)?;
                self.compile_expression(depth)?;
                while self.lookahead().kind == TokenKind::Comma {
                    self.eat(TokenKind::Comma)?;
                    self.compile_expression(depth)?;
                }
                self.eat(TokenKind::RParen)
            }
            kind if in_expression_follow(kind) => Ok(()),
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidArguments { line, column })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::limits::CompilerLimits;
    use crate::parser::parse;

    #[test]
    fn arithmetic_expression_parses() {
        parse(
            "program p; var x: integer; begin x := 1 + 2 * 3 - 4 / 2 end.",
            &CompilerLimits::default(),
        )
        .unwrap();
    }

    #[test]
    fn function_call_as_factor() {
        parse(
            "program p; var x: integer; function f(a: integer): integer; begin f := a end; \
             begin x := f(1) end.",
            &CompilerLimits::default(),
        )
        .unwrap();
    }

    #[test]
    fn indexed_variable_as_factor() {
        parse(
            "program p; var a: array[10] of integer; var x: integer; begin x := a[0] end.",
            &CompilerLimits::default(),
        )
        .unwrap();
    }

    #[test]
    fn calling_an_undeclared_function_is_undeclared_ident() {
        let err = parse(
            "program p; var x: integer; begin x := g(1) end.",
            &CompilerLimits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::CompileError::UndeclaredIdent { .. }));
    }

    #[test]
    fn indexing_a_constant_is_invalid_variable() {
        let err = parse(
            "program p; const c = 5; var x: integer; begin x := c[0] end.",
            &CompilerLimits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::CompileError::InvalidVariable { .. }));
    }
}
