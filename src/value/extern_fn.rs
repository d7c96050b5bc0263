//! Externally registered functions: `(args) -> Value`, looked up by name
//! (spec.md §4.5). The registry itself lives in [`crate::builtins`]; this
//! module is just the callable record.

use std::rc::Rc;

use super::Value;

#[derive(Clone)]
pub struct ExternFn {
    pub name: Rc<str>,
    func: Rc<dyn Fn(&[Value]) -> Value>,
}

impl ExternFn {
    pub fn new(name: impl Into<Rc<str>>, func: Rc<dyn Fn(&[Value]) -> Value>) -> ExternFn {
        ExternFn { name: name.into(), func }
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    pub fn ptr_eq(&self, other: &ExternFn) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl std::fmt::Debug for ExternFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Extern Function {}>", self.name)
    }
}
