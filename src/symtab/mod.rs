// Symbol table: scope stack, object creation, lookup, duplicate detection.
//
// Objects and scopes live in two flat arenas owned by `SymTab`, addressed by
// plain integer handles (`ObjectId`, `ScopeId`). A scope's `owner`/`outer`
// and a parameter's/variable's back-reference are therefore `Copy` integers,
// not borrowed references, so mutually-referential data (a function owning a
// scope whose objects point back at the function) never needs `Rc<RefCell<>>`
// or unsafe code -- the same trick the teacher's `ScopeStack` arena uses for
// its own parent-indexed scopes.

pub mod object;
pub mod scope;
pub mod types;

pub use object::{Object, ObjectAttrs, ObjectId, ObjectKind, ParamKind};
pub use scope::Scope;
pub use types::{ConstantValue, Type, duplicate_constant_value, duplicate_type};

pub struct SymTab {
    objects: Vec<Object>,
    scopes: Vec<Scope>,
    current_scope: Option<ScopeId>,
    pub int_type: Type,
    pub char_type: Type,
}

use object::ScopeId;

impl SymTab {
    /// Creates an empty symbol table; no program scope exists yet.
    pub fn init() -> Self {
        Self {
            objects: Vec::new(),
            scopes: Vec::new(),
            current_scope: None,
            int_type: Type::make_int_type(),
            char_type: Type::make_char_type(),
        }
    }

    pub fn current_scope(&self) -> ScopeId {
        self.current_scope.expect("no scope is active")
    }

    pub fn enter_block(&mut self, scope: ScopeId) {
        self.current_scope = Some(scope);
    }

    pub fn exit_block(&mut self) {
        let outer = self.scopes[self.current_scope()].outer;
        self.current_scope = outer;
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id]
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    /// Linear scan of a single scope's object list by case-sensitive name.
    pub fn find_in(&self, scope: ScopeId, name: &str) -> Option<ObjectId> {
        self.scopes[scope]
            .objects
            .iter()
            .copied()
            .find(|&id| self.objects[id].name == name)
    }

    /// Innermost-first walk across the scope chain from `current_scope` outward.
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        let mut scope = self.current_scope;
        while let Some(s) = scope {
            if let Some(id) = self.find_in(s, name) {
                return Some(id);
            }
            scope = self.scopes[s].outer;
        }
        None
    }

    /// Appends `obj` to `current_scope`'s object list. Does not check freshness;
    /// the caller must have already done so.
    pub fn declare(&mut self, obj: ObjectId) {
        let scope = self.current_scope();
        self.scopes[scope].objects.push(obj);
    }

    fn push_object(&mut self, name: String, kind: ObjectKind, attrs: ObjectAttrs) -> ObjectId {
        let id = self.objects.len();
        self.objects.push(Object::new(name, kind, attrs));
        id
    }

    fn push_scope(&mut self, owner: ObjectId, outer: Option<ScopeId>) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(Scope::new(owner, outer));
        id
    }

    /// Creates the root program object together with its owned scope.
    /// `outer` is `None`: the program scope has no enclosing scope.
    pub fn create_program_object(&mut self, name: String) -> (ObjectId, ScopeId) {
        let obj_id = self.objects.len();
        let scope_id = self.scopes.len();
        self.objects.push(Object::new(
            name,
            ObjectKind::Program,
            ObjectAttrs::Program { scope: scope_id },
        ));
        self.scopes.push(Scope::new(obj_id, None));
        (obj_id, scope_id)
    }

    pub fn create_constant_object(&mut self, name: String, value: ConstantValue) -> ObjectId {
        self.push_object(name, ObjectKind::Constant, ObjectAttrs::Constant { value })
    }

    pub fn create_type_object(&mut self, name: String, actual_type: Type) -> ObjectId {
        self.push_object(name, ObjectKind::Type, ObjectAttrs::Type { actual_type })
    }

    pub fn create_variable_object(&mut self, name: String, ty: Type) -> ObjectId {
        let enclosing_scope = self.current_scope();
        self.push_object(
            name,
            ObjectKind::Variable,
            ObjectAttrs::Variable { ty, enclosing_scope },
        )
    }

    /// Creates a function object together with its owned scope, nested inside
    /// whatever scope is currently active.
    pub fn create_function_object(&mut self, name: String, return_type: Type) -> (ObjectId, ScopeId) {
        let enclosing_scope = self.current_scope();
        let obj_id = self.objects.len();
        let scope_id = self.scopes.len();
        self.objects.push(Object::new(
            name,
            ObjectKind::Function,
            ObjectAttrs::Function { params: Vec::new(), return_type, scope: scope_id, enclosing_scope },
        ));
        self.scopes.push(Scope::new(obj_id, Some(enclosing_scope)));
        (obj_id, scope_id)
    }

    pub fn create_procedure_object(&mut self, name: String) -> (ObjectId, ScopeId) {
        let enclosing_scope = self.current_scope();
        let obj_id = self.objects.len();
        let scope_id = self.scopes.len();
        self.objects.push(Object::new(
            name,
            ObjectKind::Procedure,
            ObjectAttrs::Procedure { params: Vec::new(), scope: scope_id, enclosing_scope },
        ));
        self.scopes.push(Scope::new(obj_id, Some(enclosing_scope)));
        (obj_id, scope_id)
    }

    pub fn create_parameter_object(
        &mut self,
        name: String,
        ty: Type,
        param_kind: ParamKind,
        owner: ObjectId,
    ) -> ObjectId {
        let id = self.push_object(
            name,
            ObjectKind::Parameter,
            ObjectAttrs::Parameter { ty, param_kind, owner },
        );
        match &mut self.objects[owner].attrs {
            ObjectAttrs::Function { params, .. } | ObjectAttrs::Procedure { params, .. } => {
                params.push(id);
            }
            _ => unreachable!("parameter owner must be a function or procedure"),
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_scope_has_no_outer() {
        let mut st = SymTab::init();
        let (_prog, scope) = st.create_program_object("p".to_string());
        assert!(st.scope(scope).outer.is_none());
    }

    #[test]
    fn declare_then_find_in_same_scope() {
        let mut st = SymTab::init();
        let (_prog, scope) = st.create_program_object("p".to_string());
        st.enter_block(scope);
        let x = st.create_variable_object("x".to_string(), Type::make_int_type());
        st.declare(x);
        assert_eq!(st.find_in(scope, "x"), Some(x));
        assert_eq!(st.find_in(scope, "y"), None);
    }

    #[test]
    fn lookup_walks_outward_innermost_first() {
        let mut st = SymTab::init();
        let (_prog, outer_scope) = st.create_program_object("p".to_string());
        st.enter_block(outer_scope);
        let outer_x = st.create_variable_object("x".to_string(), Type::make_int_type());
        st.declare(outer_x);

        let (_func, inner_scope) = st.create_function_object("f".to_string(), Type::make_int_type());
        st.declare(_func);
        st.enter_block(inner_scope);
        let inner_x = st.create_variable_object("x".to_string(), Type::make_char_type());
        st.declare(inner_x);

        assert_eq!(st.lookup("x"), Some(inner_x));
        st.exit_block();
        assert_eq!(st.lookup("x"), Some(outer_x));
    }

    #[test]
    fn exit_block_restores_outer_after_nested_function() {
        let mut st = SymTab::init();
        let (_prog, outer_scope) = st.create_program_object("p".to_string());
        st.enter_block(outer_scope);
        let (func, inner_scope) = st.create_function_object("f".to_string(), Type::make_int_type());
        st.declare(func);
        st.enter_block(inner_scope);
        st.exit_block();
        assert_eq!(st.current_scope(), outer_scope);
    }

    #[test]
    fn parameter_is_appended_to_subprogram_param_list() {
        let mut st = SymTab::init();
        let (_prog, outer_scope) = st.create_program_object("p".to_string());
        st.enter_block(outer_scope);
        let (proc_id, proc_scope) = st.create_procedure_object("swap".to_string());
        st.declare(proc_id);
        st.enter_block(proc_scope);
        let a = st.create_parameter_object(
            "a".to_string(),
            Type::make_int_type(),
            ParamKind::Reference,
            proc_id,
        );
        st.declare(a);
        match &st.object(proc_id).attrs {
            ObjectAttrs::Procedure { params, .. } => assert_eq!(params, &vec![a]),
            _ => panic!("expected procedure"),
        }
    }
}
