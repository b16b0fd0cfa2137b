//! How a bound argument is handed to the target on each call.
//!
//! Bound arguments are owned by the delegate and live in its payload. Small, trivially copyable
//! values are copied out for every call; everything else is lent to the target as a borrow of
//! the stored value, so invoking a delegate never clones a bound `String` or `Vec`.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, rc::Rc, string::String, sync::Arc, vec::Vec};
use core::ptr::NonNull;
#[cfg(feature = "std")]
use std::{rc::Rc, sync::Arc};

/// A value that can be bound to a [`Delegate`](crate::Delegate) at construction time.
///
/// `Param<'p>` is the parameter type the target sees for this argument. It is either `Self`
/// (for `Copy` scalars up to 64 bits, pointers and references) or a borrow of the stored value.
/// The by-value set does not depend on the target: `u64`, `i64` and `f64` are passed by value
/// on 32-bit targets as well.
/// Owned containers only bind when their contents are `'static`; bind a `&T` instead to lend
/// short-lived data.
///
/// Own types opt in with [`bind_by_value!`](crate::bind_by_value) or
/// [`bind_by_ref!`](crate::bind_by_ref):
///
/// ```rust
/// use smalldelegate::{bind_by_ref, Delegate};
///
/// struct Config {
///     scale: i64,
/// }
/// bind_by_ref!(Config);
///
/// fn scaled(x: i64, config: &Config) -> i64 {
///     x * config.scale
/// }
///
/// let config = Config { scale: 3 };
/// let mut d: Delegate<fn(i64) -> i64> = Delegate::from_fn(scaled, (config,));
/// assert_eq!(d.call(7), 21);
/// ```
pub trait BindArg {
    /// Parameter type passed to the target.
    type Param<'p>
    where
        Self: 'p;

    /// Produces the parameter for one call.
    fn as_param(&self) -> Self::Param<'_>;
}

/// Implements [`BindArg`] for `Copy` types that are passed to the target by value.
#[macro_export]
macro_rules! bind_by_value {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::BindArg for $ty {
            type Param<'p> = $ty
            where
                Self: 'p;

            #[inline]
            fn as_param(&self) -> $ty {
                *self
            }
        }
    )*};
}

/// Implements [`BindArg`] for types that are passed to the target as `&Self`.
#[macro_export]
macro_rules! bind_by_ref {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::BindArg for $ty {
            type Param<'p> = &'p $ty
            where
                Self: 'p;

            #[inline]
            fn as_param(&self) -> &$ty {
                self
            }
        }
    )*};
}

bind_by_value!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    usize,
    i8,
    i16,
    i32,
    i64,
    isize,
    f32,
    f64,
);

bind_by_ref!(u128, i128);

impl<'b, T: ?Sized> BindArg for &'b T {
    type Param<'p> = &'b T
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> &'b T {
        *self
    }
}

impl<T: ?Sized> BindArg for *const T {
    type Param<'p> = *const T
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> *const T {
        *self
    }
}

impl<T: ?Sized> BindArg for *mut T {
    type Param<'p> = *mut T
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> *mut T {
        *self
    }
}

impl<T: ?Sized> BindArg for NonNull<T> {
    type Param<'p> = NonNull<T>
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> NonNull<T> {
        *self
    }
}

impl BindArg for String {
    type Param<'p> = &'p str
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> &str {
        self
    }
}

impl<T: 'static> BindArg for Vec<T> {
    type Param<'p> = &'p [T]
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> &[T] {
        self
    }
}

impl<T: ?Sized + 'static> BindArg for Box<T> {
    type Param<'p> = &'p T
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> &T {
        self
    }
}

impl<T: ?Sized + 'static> BindArg for Rc<T> {
    type Param<'p> = &'p Rc<T>
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> &Rc<T> {
        self
    }
}

impl<T: ?Sized + 'static> BindArg for Arc<T> {
    type Param<'p> = &'p Arc<T>
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> &Arc<T> {
        self
    }
}

impl<T: 'static, const N: usize> BindArg for [T; N] {
    type Param<'p> = &'p [T; N]
    where
        Self: 'p;

    #[inline]
    fn as_param(&self) -> &[T; N] {
        self
    }
}
