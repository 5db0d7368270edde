// `Type ::= 'integer' | 'char' | 'array' '[' NUMBER ']' 'of' Type | IDENT`
// `BasicType ::= 'integer' | 'char'`

use super::Parser;
use crate::error::CompileError;
use crate::lexer::TokenKind;
use crate::symtab::{Type, duplicate_type};

impl Parser {
    pub(super) fn compile_type(&mut self, depth: usize) -> Result<Type, CompileError> {
        self.check_depth(depth, {
            let (line, column) = self.here();
            CompileError::InvalidType { line, column }
        })?;

        match self.lookahead().kind {
            TokenKind::Integer => {
                self.eat(TokenKind::Integer)?;
                Ok(Type::make_int_type())
            }
            TokenKind::Char => {
                self.eat(TokenKind::Char)?;
                Ok(Type::make_char_type())
            }
            TokenKind::Array => {
                self.eat(TokenKind::Array)?;
                self.eat(TokenKind::LBracket)?;
                self.eat(TokenKind::Number)?;
                let size = self.current().int_value.unwrap_or(0);
                self.eat(TokenKind::RBracket)?;
                self.eat(TokenKind::Of)?;
                let element = self.compile_type(depth + 1)?;
                Ok(Type::make_array_type(size, element))
            }
            TokenKind::Ident => {
                self.eat(TokenKind::Ident)?;
                let name = self.current().text.clone();
                let id = self.check_declared_type(&name)?;
                match &self.symtab.object(id).attrs {
                    crate::symtab::ObjectAttrs::Type { actual_type } => Ok(duplicate_type(actual_type)),
                    _ => unreachable!("check_declared_type guarantees a Type object"),
                }
            }
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidType { line, column })
            }
        }
    }

    pub(super) fn compile_basic_type(&mut self) -> Result<Type, CompileError> {
        match self.lookahead().kind {
            TokenKind::Integer => {
                self.eat(TokenKind::Integer)?;
                Ok(Type::make_int_type())
            }
            TokenKind::Char => {
                self.eat(TokenKind::Char)?;
                Ok(Type::make_char_type())
            }
            _ => {
                let (line, column) = self.here();
                Err(CompileError::InvalidBasicType { line, column })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::CompilerLimits;

    #[test]
    fn type_alias_is_transparent() {
        let (st, prog) = crate::parser::parse(
            "program p; type t = array[10] of integer; var x : t; begin end.",
            &CompilerLimits::default(),
        )
        .unwrap();
        let scope = match &st.object(prog).attrs {
            crate::symtab::ObjectAttrs::Program { scope } => *scope,
            _ => unreachable!(),
        };
        let x = st.find_in(scope, "x").unwrap();
        match &st.object(x).attrs {
            crate::symtab::ObjectAttrs::Variable { ty, .. } => {
                assert_eq!(*ty, Type::make_array_type(10, Type::make_int_type()));
            }
            _ => panic!("expected variable"),
        }
    }
}
