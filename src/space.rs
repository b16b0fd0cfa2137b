//! Inline capacity types.
//!
//! A space type is never instantiated as a value; [`Delegate`](crate::Delegate) only reserves
//! uninitialized room for one. Its size is the inline capacity; the inline buffer is aligned to
//! the larger of 16 and the space's own alignment. Any `Sized` type works as a space, these are
//! the common ones:
//!
//! ```rust
//! use smalldelegate::Delegate;
//! use smalldelegate::space::S8;
//!
//! assert_eq!(Delegate::<fn(u32) -> u32, S8>::STACK_CAPACITY, 8 * core::mem::size_of::<usize>());
//! assert_eq!(Delegate::<fn(u32) -> u32, [u8; 100]>::STACK_CAPACITY, 100);
//! ```

/// Represents `usize * 1` bytes of inline space.
pub struct S1 {
    _inner: [usize; 1],
}

/// Represents `usize * 2` bytes of inline space.
pub struct S2 {
    _inner: [usize; 2],
}

/// Represents `usize * 3` bytes of inline space.
pub struct S3 {
    _inner: [usize; 3],
}

/// Represents `usize * 4` bytes of inline space.
pub struct S4 {
    _inner: [usize; 4],
}

/// Represents `usize * 8` bytes of inline space.
pub struct S8 {
    _inner: [usize; 8],
}

/// Represents `usize * 16` bytes of inline space.
pub struct S16 {
    _inner: [usize; 16],
}

/// Represents `usize * 32` bytes of inline space.
pub struct S32 {
    _inner: [usize; 32],
}

/// Represents `usize * 64` bytes of inline space.
pub struct S64 {
    _inner: [usize; 64],
}

/// Space used when a delegate type does not name one: 24 bytes on 64-bit targets.
pub type DefaultSpace = S3;
