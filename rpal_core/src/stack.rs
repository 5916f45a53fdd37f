//! keeping deep recursion off the guard page.
//!
//! the standardizer, the tree printers and the evaluator all recurse once
//! per nested node, so a long operator chain would overflow the native
//! stack. `stacker` grows the stack on demand instead.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
