// Statements, lvalues, and the three compound-statement forms (if/while/for).

use super::Parser;
use crate::error::CompileError;
use crate::lexer::TokenKind;
use crate::symtab::ObjectKind;

impl Parser {
    /// `Statements ::= Statement (';' Statement)*`
    pub(super) fn compile_statements(&mut self, depth: usize) -> Result<(), CompileError> {
        self.compile_statement(depth)?;
        while self.lookahead().kind == TokenKind::Semicolon {
            self.eat(TokenKind::Semicolon)?;
            self.compile_statement(depth)?;
        }
        Ok(())
    }

    /// `Statement ::= AssignSt | CallSt | GroupSt | IfSt | WhileSt | ForSt | ε`
    ///
    /// The empty production is only legal when the lookahead is in its
    /// FOLLOW set (`;`, `end`, `else`); anything else is `InvalidStatement`.
    pub(super) fn compile_statement(&mut self, depth: usize) -> Result<(), CompileError> {
        self.check_depth(depth, {
            let (line, column) = self.here();
            CompileError::InvalidStatement { line, column }
        })?;

        match self.lookahead().kind {
            TokenKind::Ident => self.compile_assign_st(depth + 1),
            TokenKind::Call => self.compile_call_st(),
            TokenKind::Begin => self.compile_group_st(depth + 1),
            TokenKind::If => self.compile_if_st(depth + 1),
            TokenKind::While => self.compile_while_st(depth + 1),
            TokenKind::For => self.compile_for_st(depth + 1),
            TokenKind::Semicolon | TokenKind::End | TokenKind::Else => Ok(()),
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidStatement { line, column })
            }
        }
    }

    /// `LValue ::= IDENT Indexes`
    ///
    /// A `Function` is accepted here (besides `Variable`/`Parameter`) so a
    /// function body may assign to its own name to set the return value.
    fn compile_lvalue(&mut self, depth: usize) -> Result<(), CompileError> {
        self.eat(TokenKind::Ident)?;
        let name = self.current().text.clone();
        let id = self.check_declared_ident(&name)?;
        let kind = self.symtab.object(id).kind;
        if !matches!(kind, ObjectKind::Variable | ObjectKind::Function | ObjectKind::Parameter) {
            let (line, column) = (self.current().line, self.current().column);
            return Err(CompileError::InvalidLValue { line, column });
        }
        self.compile_indexes(depth)
    }

    /// `AssignSt ::= LValue ':=' Expression`
    fn compile_assign_st(&mut self, depth: usize) -> Result<(), CompileError> {
        self.compile_lvalue(depth)?;
        self.eat(TokenKind::Assign)?;
        self.compile_expression(depth)
    }

    /// `CallSt ::= 'call' IDENT Arguments`
    fn compile_call_st(&mut self) -> Result<(), CompileError> {
        self.eat(TokenKind::Call)?;
        self.eat(TokenKind::Ident)?;
        let name = self.current().text.clone();
        self.check_declared_procedure(&name)?;
        self.compile_arguments(0)
    }

    /// `GroupSt ::= 'begin' Statements 'end'`
    fn compile_group_st(&mut self, depth: usize) -> Result<(), CompileError> {
        self.eat(TokenKind::Begin)?;
        self.compile_statements(depth)?;
        self.eat(TokenKind::End)
    }

    /// `IfSt ::= 'if' Condition 'then' Statement [ 'else' Statement ]`
    fn compile_if_st(&mut self, depth: usize) -> Result<(), CompileError> {
        self.eat(TokenKind::If)?;
        self.compile_condition(depth)?;
        self.eat(TokenKind::Then)?;
        self.compile_statement(depth)?;
        if self.lookahead().kind == TokenKind::Else {
            self.eat(TokenKind::Else)?;
            self.compile_statement(depth)?;
        }
        Ok(())
    }

    /// `WhileSt ::= 'while' Condition 'do' Statement`
    fn compile_while_st(&mut self, depth: usize) -> Result<(), CompileError> {
        self.eat(TokenKind::While)?;
        self.compile_condition(depth)?;
        self.eat(TokenKind::Do)?;
        self.compile_statement(depth)
    }

    /// `ForSt ::= 'for' IDENT ':=' Expression 'to' Expression 'do' Statement`
    ///
    /// The loop variable must resolve to a `Variable`, not a parameter or
    /// constant.
    fn compile_for_st(&mut self, depth: usize) -> Result<(), CompileError> {
        self.eat(TokenKind::For)?;
        self.eat(TokenKind::Ident)?;
        let name = self.current().text.clone();
        self.check_declared_variable(&name)?;

        self.eat(TokenKind::Assign)?;
        self.compile_expression(depth)?;
        self.eat(TokenKind::To)?;
        self.compile_expression(depth)?;
        self.eat(TokenKind::Do)?;
        self.compile_statement(depth)
    }

    /// `Indexes ::= ('[' Expression ']')*`
    fn compile_indexes(&mut self, depth: usize) -> Result<(), CompileError> {
        while self.lookahead().kind == TokenKind::LBracket {
            self.eat(TokenKind::LBracket)?;
            self.compile_expression(depth)?;
            self.eat(TokenKind::RBracket)?;
        }
        Ok(())
    }

    /// `Condition ::= Expression CmpOp Expression`
    fn compile_condition(&mut self, depth: usize) -> Result<(), CompileError> {
        self.compile_expression(depth)?;
        match self.lookahead().kind {
            TokenKind::Eq
            | TokenKind::Neq
            | TokenKind::Le
            | TokenKind::Lt
            | TokenKind::Ge
            | TokenKind::Gt => {
                let kind = self.lookahead().kind;
                self.eat(kind)?;
            }
            _ => {
                let (line, column) = self.here();
                return Err(CompileError::InvalidComparator { line, column });
            }
        }
        self.compile_expression(depth)
    }
}

#[cfg(test)]
mod tests {
    use crate::limits::CompilerLimits;
    use crate::parser::parse;

    #[test]
    fn empty_statement_before_end_is_accepted() {
        parse("program p; begin ; end.", &CompilerLimits::default()).unwrap();
    }

    #[test]
    fn nested_group_statement_parses() {
        parse(
            "program p; var x: integer; begin begin x := 1 end end.",
            &CompilerLimits::default(),
        )
        .unwrap();
    }

    #[test]
    fn if_else_parses() {
        parse(
            "program p; var x: integer; begin if x = 1 then x := 2 else x := 3 end.",
            &CompilerLimits::default(),
        )
        .unwrap();
    }

    #[test]
    fn while_and_for_parse() {
        parse(
            "program p; var i: integer; begin while i < 10 do i := i + 1; for i := 0 to 9 do i := i end.",
            &CompilerLimits::default(),
        )
        .unwrap();
    }

    #[test]
    fn missing_comparator_is_invalid() {
        let err = parse(
            "program p; var x: integer; begin if x then x := 1 end.",
            &CompilerLimits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::CompileError::InvalidComparator { .. }));
    }
}
