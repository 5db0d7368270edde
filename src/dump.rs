// Debug dumper: prints the resulting program object tree with nested
// indentation. Informational only -- not a stable interface.

use crate::symtab::{ObjectAttrs, ObjectId, SymTab, Type};
use std::fmt::Write as _;

pub fn dump(symtab: &SymTab, root: ObjectId) -> String {
    let mut out = String::new();
    dump_object(symtab, root, 0, &mut out);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn type_desc(ty: &Type) -> String {
    match ty {
        Type::Int => "integer".to_string(),
        Type::Char => "char".to_string(),
        Type::Array { size, element } => format!("array[{}] of {}", size, type_desc(element)),
    }
}

fn dump_object(symtab: &SymTab, id: ObjectId, depth: usize, out: &mut String) {
    let obj = symtab.object(id);
    indent(out, depth);
    match &obj.attrs {
        ObjectAttrs::Program { scope } => {
            let _ = writeln!(out, "Program {}", obj.name);
            dump_scope(symtab, *scope, depth + 1, out);
        }
        ObjectAttrs::Constant { value } => {
            let _ = writeln!(out, "Constant {} = {:?}", obj.name, value);
        }
        ObjectAttrs::Type { actual_type } => {
            let _ = writeln!(out, "Type {} = {}", obj.name, type_desc(actual_type));
        }
        ObjectAttrs::Variable { ty, .. } => {
            let _ = writeln!(out, "Variable {} : {}", obj.name, type_desc(ty));
        }
        ObjectAttrs::Function { return_type, scope, .. } => {
            let _ = writeln!(out, "Function {} -> {}", obj.name, type_desc(return_type));
            // Parameters are declared in the function's own scope, so they
            // already surface via `dump_scope` below; no separate pass needed.
            dump_scope(symtab, *scope, depth + 1, out);
        }
        ObjectAttrs::Procedure { scope, .. } => {
            let _ = writeln!(out, "Procedure {}", obj.name);
            dump_scope(symtab, *scope, depth + 1, out);
        }
        ObjectAttrs::Parameter { ty, param_kind, .. } => {
            let _ = writeln!(out, "Parameter {} : {} ({:?})", obj.name, type_desc(ty), param_kind);
        }
    }
}

fn dump_scope(symtab: &SymTab, scope: crate::symtab::object::ScopeId, depth: usize, out: &mut String) {
    for &obj_id in &symtab.scope(scope).objects {
        dump_object(symtab, obj_id, depth, out);
    }
}
