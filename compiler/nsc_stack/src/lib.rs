//! Stack safety for deep tree walks.
//!
//! Cloning a component body, folding its constants and relinking parents
//! all recurse once per tree level, and instantiating a nested generic
//! recurses again inside that. Depth is bounded only by the input, so these
//! walks grow the stack on demand instead of trusting the thread's default.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack when it runs low.
//! - **WASM targets**: passthrough; the runtime manages its own stack.
//!
//! # Usage
//!
//! ```text
//! fn clone_node(&mut self, node: NodeId) -> NodeId {
//!     ensure_sufficient_stack(|| {
//!         // ... copy node, then clone_node each child ...
//!     })
//! }
//! ```

/// Grow when less than this much stack remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
