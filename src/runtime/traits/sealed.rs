// ABOUTME: Sealed trait pattern for runtime traits.
// ABOUTME: Only in-crate runtimes (and in-crate test fakes) can implement them.

/// Sealed trait to prevent external implementations.
pub trait Sealed {}
