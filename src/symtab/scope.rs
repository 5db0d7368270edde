// A lexical scope: an ordered, duplicate-free list of declared objects,
// plus links to its owner and its enclosing scope.

use super::object::{ObjectId, ScopeId};

#[derive(Debug, Clone)]
pub struct Scope {
    pub owner: ObjectId,
    pub outer: Option<ScopeId>,
    pub objects: Vec<ObjectId>,
}

impl Scope {
    pub fn new(owner: ObjectId, outer: Option<ScopeId>) -> Self {
        Self { owner, outer, objects: Vec::new() }
    }
}
