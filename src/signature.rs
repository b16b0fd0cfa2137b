//! Call signatures a [`Delegate`](crate::Delegate) can erase.

mod sealed {
    pub trait Sealed {}
}

/// A call signature, named by a fn-pointer type such as `fn(i32, u8) -> bool`.
///
/// The fn-pointer type is only a marker: no function pointer of that type is ever stored.
/// `Args` is the tuple of call-site argument types and `Output` the return type. Implemented for
/// signatures with up to four call-site arguments.
///
/// Elided references make a fn-pointer type higher-ranked (`fn(&str)` is `for<'r> fn(&'r str)`),
/// which has no single `Args` tuple. Name the lifetime instead; it is usually the delegate's own:
///
/// ```rust
/// use smalldelegate::Delegate;
///
/// fn len_plus(s: &str, extra: usize) -> usize {
///     s.len() + extra
/// }
///
/// fn measure<'s>(words: &[&'s str]) -> usize {
///     let mut d: Delegate<'s, fn(&'s str) -> usize> = Delegate::from_fn(len_plus, (1usize,));
///     words.iter().map(|&w| d.call(w)).sum()
/// }
///
/// let owned = String::from("hello");
/// assert_eq!(measure(&[owned.as_str(), "hi"]), 9);
/// ```
pub trait Signature: sealed::Sealed {
    /// Call-site arguments as a tuple.
    type Args;
    /// Return type.
    type Output;
}

macro_rules! impl_signature {
    ($($A:ident),*) => {
        impl<R, $($A,)*> sealed::Sealed for fn($($A,)*) -> R {}

        impl<R, $($A,)*> Signature for fn($($A,)*) -> R {
            type Args = ($($A,)*);
            type Output = R;
        }
    };
}

impl_signature!();
impl_signature!(A0);
impl_signature!(A0, A1);
impl_signature!(A0, A1, A2);
impl_signature!(A0, A1, A2, A3);
