// Semantic predicates: checkFresh / checkDeclared{Ident,Const,Type,Var,Func,Proc}.
//
// Each takes the identifier just consumed by `eat(Ident)` and reports at
// that token's line/column -- matching the reference implementation, which
// raises on `currentToken`, not `lookAhead`. Lookup failure and wrong-kind
// are distinguished, not collapsed into one error: `lookupObject` returning
// nothing is `UndeclaredIdent`; finding an object of the wrong kind is the
// kind-specific `InvalidX`.

use super::Parser;
use crate::error::CompileError;
use crate::symtab::{ObjectId, ObjectKind};

impl Parser {
    fn pos_of_current(&self) -> (usize, usize) {
        (self.current().line, self.current().column)
    }

    pub(super) fn check_fresh_ident(&self, name: &str) -> Result<(), CompileError> {
        if self.symtab.find_in(self.symtab.current_scope(), name).is_some() {
            let (line, column) = self.pos_of_current();
            Err(CompileError::DuplicateIdent { name: name.to_string(), line, column })
        } else {
            Ok(())
        }
    }

    pub(super) fn check_declared_ident(&self, name: &str) -> Result<ObjectId, CompileError> {
        let (line, column) = self.pos_of_current();
        self.symtab
            .lookup(name)
            .ok_or_else(|| CompileError::UndeclaredIdent { name: name.to_string(), line, column })
    }

    fn check_declared_kind(
        &self,
        name: &str,
        wanted: ObjectKind,
        on_wrong_kind: impl FnOnce(usize, usize) -> CompileError,
    ) -> Result<ObjectId, CompileError> {
        let id = self.check_declared_ident(name)?;
        if self.symtab.object(id).kind == wanted {
            Ok(id)
        } else {
            let (line, column) = self.pos_of_current();
            Err(on_wrong_kind(line, column))
        }
    }

    pub(super) fn check_declared_constant(&self, name: &str) -> Result<ObjectId, CompileError> {
        self.check_declared_kind(name, ObjectKind::Constant, |line, column| {
            CompileError::InvalidConstant { line, column }
        })
    }

    pub(super) fn check_declared_type(&self, name: &str) -> Result<ObjectId, CompileError> {
        self.check_declared_kind(name, ObjectKind::Type, |line, column| CompileError::InvalidType {
            line,
            column,
        })
    }

    pub(super) fn check_declared_variable(&self, name: &str) -> Result<ObjectId, CompileError> {
        self.check_declared_kind(name, ObjectKind::Variable, |line, column| {
            CompileError::InvalidVariable { line, column }
        })
    }

    pub(super) fn check_declared_function(&self, name: &str) -> Result<ObjectId, CompileError> {
        self.check_declared_kind(name, ObjectKind::Function, |line, column| {
            CompileError::InvalidFunction { line, column }
        })
    }

    pub(super) fn check_declared_procedure(&self, name: &str) -> Result<ObjectId, CompileError> {
        self.check_declared_kind(name, ObjectKind::Procedure, |line, column| {
            CompileError::InvalidProcedure { line, column }
        })
    }
}
