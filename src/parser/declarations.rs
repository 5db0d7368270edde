// `Block ::= [ConstDecls] [TypeDecls] [VarDecls] SubDecls 'begin' Statements 'end'`
// and everything that can appear inside one: const/type/var declarations,
// nested function/procedure declarations, and their parameter lists.

use super::Parser;
use crate::error::CompileError;
use crate::lexer::TokenKind;
use crate::symtab::ParamKind;

impl Parser {
    pub(super) fn compile_block(&mut self, depth: usize) -> Result<(), CompileError> {
        self.check_depth(depth, {
            let (line, column) = self.here();
            CompileError::InvalidStatement { line, column }
        })?;

        if self.lookahead().kind == TokenKind::Const {
            self.compile_const_decls()?;
        }
        if self.lookahead().kind == TokenKind::Type {
            self.compile_type_decls()?;
        }
        if self.lookahead().kind == TokenKind::Var {
            self.compile_var_decls()?;
        }
        self.compile_sub_decls(depth)?;

        self.eat(TokenKind::Begin)?;
        self.compile_statements(depth + 1)?;
        self.eat(TokenKind::End)?;
        Ok(())
    }

    /// `ConstDecls ::= 'const' (IDENT '=' Constant ';')+`
    fn compile_const_decls(&mut self) -> Result<(), CompileError> {
        self.eat(TokenKind::Const)?;
        loop {
            self.eat(TokenKind::Ident)?;
            let name = self.current().text.clone();
            self.check_fresh_ident(&name)?;

            self.eat(TokenKind::Eq)?;
            let value = self.compile_constant()?;
            let obj = self.symtab.create_constant_object(name, value);
            self.symtab.declare(obj);

            self.eat(TokenKind::Semicolon)?;
            if self.lookahead().kind != TokenKind::Ident {
                break;
            }
        }
        Ok(())
    }

    /// `TypeDecls ::= 'type' (IDENT '=' Type ';')+`
    fn compile_type_decls(&mut self) -> Result<(), CompileError> {
        self.eat(TokenKind::Type)?;
        loop {
            self.eat(TokenKind::Ident)?;
            let name = self.current().text.clone();
            self.check_fresh_ident(&name)?;

            self.eat(TokenKind::Eq)?;
            let ty = self.compile_type(0)?;
            let obj = self.symtab.create_type_object(name, ty);
            self.symtab.declare(obj);

            self.eat(TokenKind::Semicolon)?;
            if self.lookahead().kind != TokenKind::Ident {
                break;
            }
        }
        Ok(())
    }

    /// `VarDecls ::= 'var' (IDENT ':' Type ';')+`
    fn compile_var_decls(&mut self) -> Result<(), CompileError> {
        self.eat(TokenKind::Var)?;
        loop {
            self.eat(TokenKind::Ident)?;
            let name = self.current().text.clone();
            self.check_fresh_ident(&name)?;

            self.eat(TokenKind::Colon)?;
            let ty = self.compile_type(0)?;
            let obj = self.symtab.create_variable_object(name, ty);
            self.symtab.declare(obj);

            self.eat(TokenKind::Semicolon)?;
            if self.lookahead().kind != TokenKind::Ident {
                break;
            }
        }
        Ok(())
    }

    /// `SubDecls ::= (FuncDecl | ProcDecl)*`
    fn compile_sub_decls(&mut self, depth: usize) -> Result<(), CompileError> {
        loop {
            match self.lookahead().kind {
                TokenKind::Function => self.compile_func_decl(depth + 1)?,
                TokenKind::Procedure => self.compile_proc_decl(depth + 1)?,
                _ => break,
            }
        }
        Ok(())
    }

    /// `FuncDecl ::= 'function' IDENT Params ':' BasicType ';' Block ';'`
    ///
    /// Declared into the enclosing scope *before* its own scope is entered,
    /// so the function's name resolves inside its own body (recursion).
    fn compile_func_decl(&mut self, depth: usize) -> Result<(), CompileError> {
        self.eat(TokenKind::Function)?;
        self.eat(TokenKind::Ident)?;
        let name = self.current().text.clone();
        self.check_fresh_ident(&name)?;

        let (func_obj, scope) =
            self.symtab.create_function_object(name, crate::symtab::Type::make_int_type());
        self.symtab.declare(func_obj);
        self.symtab.enter_block(scope);

        self.compile_params(func_obj)?;

        self.eat(TokenKind::Colon)?;
        let return_type = self.compile_basic_type()?;
        if let crate::symtab::ObjectAttrs::Function { return_type: rt, .. } =
            &mut self.symtab.object_mut(func_obj).attrs
        {
            *rt = return_type;
        }

        self.eat(TokenKind::Semicolon)?;
        self.compile_block(depth)?;
        self.eat(TokenKind::Semicolon)?;

        self.symtab.exit_block();
        Ok(())
    }

    /// `ProcDecl ::= 'procedure' IDENT Params ';' Block ';'`
    fn compile_proc_decl(&mut self, depth: usize) -> Result<(), CompileError> {
        self.eat(TokenKind::Procedure)?;
        self.eat(TokenKind::Ident)?;
        let name = self.current().text.clone();
        self.check_fresh_ident(&name)?;

        let (proc_obj, scope) = self.symtab.create_procedure_object(name);
        self.symtab.declare(proc_obj);
        self.symtab.enter_block(scope);

        self.compile_params(proc_obj)?;

        self.eat(TokenKind::Semicolon)?;
        self.compile_block(depth)?;
        self.eat(TokenKind::Semicolon)?;

        self.symtab.exit_block();
        Ok(())
    }

    /// `Params ::= [ '(' Param (';' Param)* ')' ]`
    fn compile_params(&mut self, owner: crate::symtab::ObjectId) -> Result<(), CompileError> {
        if self.lookahead().kind == TokenKind::LParen {
            self.eat(TokenKind::LParen)?;
            self.compile_param(owner)?;
            while self.lookahead().kind == TokenKind::Semicolon {
                self.eat(TokenKind::Semicolon)?;
                self.compile_param(owner)?;
            }
            self.eat(TokenKind::RParen)?;
        }
        Ok(())
    }

    /// `Param ::= IDENT ':' BasicType | 'var' IDENT ':' BasicType`
    fn compile_param(&mut self, owner: crate::symtab::ObjectId) -> Result<(), CompileError> {
        let kind = match self.lookahead().kind {
            TokenKind::Ident => ParamKind::Value,
            TokenKind::Var => {
                self.eat(TokenKind::Var)?;
                ParamKind::Reference
            }
            _ => {
                let (line, column) = self.here();
                return Err(CompileError::InvalidParameter { line, column });
            }
        };

        self.eat(TokenKind::Ident)?;
        let name = self.current().text.clone();
        self.check_fresh_ident(&name)?;

        self.eat(TokenKind::Colon)?;
        let ty = self.compile_basic_type()?;

        let obj = self.symtab.create_parameter_object(name, ty, kind, owner);
        self.symtab.declare(obj);
        Ok(())
    }
}
