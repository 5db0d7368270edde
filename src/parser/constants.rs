// `Constant ::= '+' Constant2 | '-' Constant2 | CHAR | Constant2`
// `Constant2 ::= NUMBER | IDENT` (the IDENT must name a Constant)
// `UnsignedConstant ::= NUMBER | IDENT | CHAR`

use super::Parser;
use crate::error::CompileError;
use crate::lexer::TokenKind;
use crate::symtab::{ConstantValue, duplicate_constant_value};

impl Parser {
    pub(super) fn compile_constant(&mut self) -> Result<ConstantValue, CompileError> {
        match self.lookahead().kind {
            TokenKind::Plus => {
                self.eat(TokenKind::Plus)?;
                self.compile_constant2()
            }
            TokenKind::Minus => {
                self.eat(TokenKind::Minus)?;
                let value = self.compile_constant2()?;
                value.negate().ok_or_else(|| {
                    let (line, column) = (self.current().line, self.current().column);
                    CompileError::TypeInconsistency { line, column }
                })
            }
            TokenKind::CharLiteral => {
                self.eat(TokenKind::CharLiteral)?;
                let ch = self.current().text.chars().next().unwrap_or('\0');
                Ok(ConstantValue::Char(ch))
            }
            _ => self.compile_constant2(),
        }
    }

    pub(super) fn compile_constant2(&mut self) -> Result<ConstantValue, CompileError> {
        match self.lookahead().kind {
            TokenKind::Number => {
                self.eat(TokenKind::Number)?;
                Ok(ConstantValue::Int(self.current().int_value.unwrap_or(0)))
            }
            TokenKind::Ident => {
                self.eat(TokenKind::Ident)?;
                let name = self.current().text.clone();
                let id = self.check_declared_constant(&name)?;
                match &self.symtab.object(id).attrs {
                    crate::symtab::ObjectAttrs::Constant { value } => Ok(duplicate_constant_value(value)),
                    _ => unreachable!("check_declared_constant guarantees a Constant object"),
                }
            }
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidConstant { line, column })
            }
        }
    }

    #[allow(dead_code)]
    pub(super) fn compile_unsigned_constant(&mut self) -> Result<ConstantValue, CompileError> {
        match self.lookahead().kind {
            TokenKind::Number => {
                self.eat(TokenKind::Number)?;
                Ok(ConstantValue::Int(self.current().int_value.unwrap_or(0)))
            }
            TokenKind::Ident => {
                self.eat(TokenKind::Ident)?;
                let name = self.current().text.clone();
                let id = self.check_declared_constant(&name)?;
                match &self.symtab.object(id).attrs {
                    crate::symtab::ObjectAttrs::Constant { value } => Ok(duplicate_constant_value(value)),
                    _ => unreachable!("check_declared_constant guarantees a Constant object"),
                }
            }
            TokenKind::CharLiteral => {
                self.eat(TokenKind::CharLiteral)?;
                let ch = self.current().text.chars().next().unwrap_or('\0');
                Ok(ConstantValue::Char(ch))
            }
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidConstant { line, column })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::limits::CompilerLimits;
    use crate::parser::parse;

    #[test]
    fn negative_constant_flips_sign() {
        parse("program p; const c = -5; begin end.", &CompilerLimits::default()).unwrap();
    }

    #[test]
    fn negating_a_char_constant_is_type_inconsistency() {
        let err = parse(
            "program p; const a = 'x'; const b = -a; begin end.",
            &CompilerLimits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::CompileError::TypeInconsistency { .. }));
    }
}
