//! Closures: a function pointer plus a heap-owned copy of its captured
//! environment (spec.md §4.5).
//!
//! The reference runtime captures by copying a POD record from the stack
//! to the heap, which only works because every captured slot is itself a
//! boxed pointer. This is the Rust realization of that same contract made
//! explicit (spec.md §9 "Closure environment capture"): `Env` is a plain
//! `Vec<Value>`, and cloning it is exactly the cheap copy-of-pointers the
//! source relies on, since every `Value` variant that owns real storage
//! does so through `Rc`.

use std::rc::Rc;

use super::Value;

/// A closure's captured environment: already-boxed values, so cloning it
/// is the same shallow copy the source performs on its raw byte record.
pub type Env = Vec<Value>;

#[derive(Clone)]
pub struct Closure {
    func: Rc<dyn Fn(&Env, &[Value]) -> Value>,
    env: Env,
}

impl Closure {
    pub fn new(func: Rc<dyn Fn(&Env, &[Value]) -> Value>, env: Env) -> Closure {
        Closure { func, env }
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(&self.env, args)
    }

    pub fn ptr_eq(&self, other: &Closure) -> bool {
        Rc::ptr_eq(&self.func, &other.func) && self.env.len() == other.env.len()
    }
}

impl std::fmt::Debug for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Function {:p}>", Rc::as_ptr(&self.func))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_sees_its_captured_environment() {
        let env: Env = vec![Value::Bool(true)];
        let closure = Closure::new(Rc::new(|env: &Env, _args: &[Value]| env[0].clone()), env);
        assert!(matches!(closure.call(&[]), Value::Bool(true)));
    }
}
