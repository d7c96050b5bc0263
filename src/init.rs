//! Process-wide one-shot initialization (spec.md §4.1/§4.8), ported from
//! the reference runtime's constructor hook
//! (`original_source/runtime/numerobis/runtime.c`'s
//! `numerobis_runtime_ctor`), which the platform invokes automatically
//! before `main`. Rust has no portable equivalent, so callers invoke
//! [`init`] explicitly instead — exactly once, idempotently, before
//! touching anything else in this crate.

use std::cell::Cell;

use crate::{builtins, source_registry};

thread_local! {
    // A `Cell<bool>`, not `std::sync::Once`: every other piece of
    // process-wide state here (the extern registry, the unit table, the
    // PRNG) is `thread_local!` too, since `Rc`-backed `Value`s aren't
    // `Send`. A process-wide `Once` guarding thread-local storage would
    // let a second thread see "already initialized" while its own
    // thread-local registry is still empty; tying the guard to the same
    // thread-local storage it protects keeps them consistent.
    static INITIALIZED: Cell<bool> = Cell::new(false);
}

/// Runs the startup sequence exactly once per thread, in the order the
/// reference constructor does: note the allocator facade (a no-op, see
/// [`crate::alloc`]), register the built-in externs, and reset the
/// module registry's current-file index to the start.
///
/// Unit-table installation is deliberately not part of this sequence —
/// the reference runtime links its `base_unit`/`unit_id_eval` hooks in
/// directly at compile time, so supplying one here is the caller's job
/// (see [`crate::builtins::set_unit_table`]), not something this crate
/// can default.
pub fn init() {
    INITIALIZED.with(|flag| {
        if flag.get() {
            return;
        }
        flag.set(true);
        tracing::info!("initializing numerobis runtime");
        builtins::register_builtins();
        source_registry::set_current_file(0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_registers_the_builtin_externs() {
        init();
        assert!(builtins::lookup_extern("random").is_some());
        assert!(builtins::lookup_extern("input").is_some());
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
        assert!(builtins::lookup_extern("random").is_some());
    }
}
