//! # SmallDelegate: Bound Callables Without Boxing
//!
//! [`Delegate`] holds "anything callable" (a function, a method on a borrowed receiver, or a
//! closure) together with trailing arguments bound at construction time. It can later be called
//! with the remaining arguments, stored in collections and moved around without the owner
//! knowing the concrete callable type.
//!
//! ## Core Concept
//!
//! A `Box<dyn FnMut>` always heap-allocates and dispatches through a vtable. A [`Delegate`]
//! packs the callable and its bound arguments into one payload, stores that payload in an
//! inline buffer when it fits and in an exactly-sized heap block otherwise, and calls it through
//! a single monomorphized fn pointer.
//!
//! ## Quick Start
//!
//! ```rust
//! use smalldelegate::Delegate;
//!
//! fn add(a: i32, b: i32) -> i32 {
//!     a + b
//! }
//!
//! // `3` is bound now; `5` arrives at the call site.
//! let mut sum: Delegate<fn(i32) -> i32> = Delegate::from_fn(add, (3i32,));
//! assert_eq!(sum.call(5), 8);
//!
//! // Small payloads never touch the heap.
//! assert!(!sum.is_heap());
//! assert_eq!(sum.heap_footprint(), 0);
//! ```
//!
//! ## Callable Shapes
//!
//! ```rust
//! use smalldelegate::Delegate;
//!
//! struct Bar {
//!     value: i32,
//! }
//!
//! impl Bar {
//!     fn bump(&mut self, x: i32) -> i32 {
//!         self.value += x;
//!         self.value
//!     }
//!
//!     fn combine(&self, a: i32, bound: i32) -> i32 {
//!         self.value + a + bound
//!     }
//! }
//!
//! let mut bar = Bar { value: 2 };
//!
//! let mut bump: Delegate<fn(i32) -> i32> = Delegate::from_method_mut(&mut bar, Bar::bump, ());
//! assert_eq!(bump.call(1), 3);
//! drop(bump);
//!
//! let mut combine: Delegate<fn(i32) -> i32> = Delegate::from_method(&bar, Bar::combine, (3i32,));
//! assert_eq!(combine.call(5), 11);
//!
//! let offset = 100;
//! let mut closure: Delegate<fn(i32) -> i32> =
//!     Delegate::from_closure(move |a: i32, b: i32| a * b + offset, (2i32,));
//! assert_eq!(closure.call(4), 108);
//! ```
//!
//! ## Configuration
//!
//! ### Feature Flags
//!
//! - **`std`** (enabled by default)
//!   - Links to the standard library
//!   - Disable for `#![no_std]` environments: `default-features = false`
//!
//! ### Inline Capacity
//!
//! The second type parameter picks the inline space. It defaults to
//! [`DefaultSpace`](space::DefaultSpace) (three machine words); name a bigger one per signature
//! with a type alias:
//!
//! ```rust
//! use smalldelegate::Delegate;
//! use smalldelegate::space::S8;
//!
//! type Handler<'a> = Delegate<'a, fn(u64) -> u64, S8>;
//!
//! let table = [1u64, 2, 3, 4, 5, 6];
//! let mut h: Handler = Delegate::from_closure(move |i: u64| table.iter().sum::<u64>() * i, ());
//! assert!(!h.is_heap());
//! assert_eq!(h.call(2), 42);
//!
//! // The same payload spills to the heap with the default space.
//! let mut d: Delegate<fn(u64) -> u64> =
//!     Delegate::from_closure(move |i: u64| table.iter().sum::<u64>() * i, ());
//! assert_eq!(d.heap_footprint(), 48);
//! assert_eq!(d.call(1), 21);
//! ```
//!
//! The inline buffer is aligned to at least 16 bytes whatever the space type, so byte arrays
//! such as `[u8; 40]` work as spaces. Only payloads aligned above both 16 and the space's own
//! alignment are heap-allocated regardless of size.
//!
//! ## Bound Arguments
//!
//! Bound values are owned by the delegate. Small `Copy` values are passed to the target by
//! value, larger or owning ones as borrows (`String` as `&str`, `Vec<T>` as `&[T]`); see
//! [`BindArg`].
//!
//! ## Ownership
//!
//! A delegate is move-only. [`Delegate::take`] moves the target out and leaves an empty
//! delegate behind; dropping a delegate destroys its payload and frees any heap block.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(clippy::as_conversions)]

extern crate alloc;

mod bind;
mod delegate;
pub mod payload;
mod signature;
mod slot;
pub mod space;
mod thunk;

pub use crate::bind::BindArg;
pub use crate::delegate::Delegate;
pub use crate::signature::Signature;
