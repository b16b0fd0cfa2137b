//! Packed payload records: one callable descriptor followed by the bound arguments.
//!
//! Every record is `#[repr(C)]` with the descriptor first, so its size and alignment are fixed
//! by the concrete types chosen at the factory call. [`Payload`] is implemented for every
//! combination of up to four call-site arguments and up to four bound arguments; the target
//! always sees the call-site arguments first, then the bound arguments in the order they were
//! supplied.

use crate::bind::BindArg;

/// A packed record that can be called with the call-site arguments `Args`.
pub trait Payload<Args, R> {
    /// Calls the target with `args` followed by the bound arguments.
    fn call(&mut self, args: Args) -> R;
}

/// A function and its bound arguments.
#[repr(C)]
pub struct FnPayload<F, B> {
    func: F,
    bound: B,
}

impl<F, B> FnPayload<F, B> {
    pub(crate) fn new(func: F, bound: B) -> Self {
        FnPayload { func, bound }
    }
}

/// An exclusive receiver, a method taking `&mut T`, and the bound arguments.
#[repr(C)]
pub struct MethodMutPayload<'r, T: ?Sized, M, B> {
    receiver: &'r mut T,
    method: M,
    bound: B,
}

impl<'r, T: ?Sized, M, B> MethodMutPayload<'r, T, M, B> {
    pub(crate) fn new(receiver: &'r mut T, method: M, bound: B) -> Self {
        MethodMutPayload {
            receiver,
            method,
            bound,
        }
    }
}

/// A shared receiver, a method taking `&T`, and the bound arguments.
#[repr(C)]
pub struct MethodPayload<'r, T: ?Sized, M, B> {
    receiver: &'r T,
    method: M,
    bound: B,
}

impl<'r, T: ?Sized, M, B> MethodPayload<'r, T, M, B> {
    pub(crate) fn new(receiver: &'r T, method: M, bound: B) -> Self {
        MethodPayload {
            receiver,
            method,
            bound,
        }
    }
}

/// A closure object and its bound arguments.
#[repr(C)]
pub struct ClosurePayload<F, B> {
    func: F,
    bound: B,
}

impl<F, B> ClosurePayload<F, B> {
    pub(crate) fn new(func: F, bound: B) -> Self {
        ClosurePayload { func, bound }
    }
}

macro_rules! impl_payload {
    ($($A:ident $a:ident),* ; $($B:ident $i:tt),*) => {
        impl<F, R, $($A,)* $($B,)*> Payload<($($A,)*), R> for FnPayload<F, ($($B,)*)>
        where
            $($B: BindArg,)*
            F: for<'p> Fn($($A,)* $(<$B as BindArg>::Param<'p>,)*) -> R,
        {
            #[inline]
            fn call(&mut self, ($($a,)*): ($($A,)*)) -> R {
                (self.func)($($a,)* $(self.bound.$i.as_param(),)*)
            }
        }

        impl<'r, T: ?Sized, M, R, $($A,)* $($B,)*> Payload<($($A,)*), R>
            for MethodMutPayload<'r, T, M, ($($B,)*)>
        where
            $($B: BindArg,)*
            M: for<'p> Fn(&mut T, $($A,)* $(<$B as BindArg>::Param<'p>,)*) -> R,
        {
            #[inline]
            fn call(&mut self, ($($a,)*): ($($A,)*)) -> R {
                (self.method)(&mut *self.receiver, $($a,)* $(self.bound.$i.as_param(),)*)
            }
        }

        impl<'r, T: ?Sized, M, R, $($A,)* $($B,)*> Payload<($($A,)*), R>
            for MethodPayload<'r, T, M, ($($B,)*)>
        where
            $($B: BindArg,)*
            M: for<'p> Fn(&T, $($A,)* $(<$B as BindArg>::Param<'p>,)*) -> R,
        {
            #[inline]
            fn call(&mut self, ($($a,)*): ($($A,)*)) -> R {
                (self.method)(self.receiver, $($a,)* $(self.bound.$i.as_param(),)*)
            }
        }

        impl<F, R, $($A,)* $($B,)*> Payload<($($A,)*), R> for ClosurePayload<F, ($($B,)*)>
        where
            $($B: BindArg,)*
            F: for<'p> FnMut($($A,)* $(<$B as BindArg>::Param<'p>,)*) -> R,
        {
            #[inline]
            fn call(&mut self, ($($a,)*): ($($A,)*)) -> R {
                (self.func)($($a,)* $(self.bound.$i.as_param(),)*)
            }
        }
    };
}

macro_rules! impl_payload_bound_arities {
    ($($A:ident $a:ident),*) => {
        impl_payload!($($A $a),* ;);
        impl_payload!($($A $a),* ; B0 0);
        impl_payload!($($A $a),* ; B0 0, B1 1);
        impl_payload!($($A $a),* ; B0 0, B1 1, B2 2);
        impl_payload!($($A $a),* ; B0 0, B1 1, B2 2, B3 3);
    };
}

impl_payload_bound_arities!();
impl_payload_bound_arities!(A0 a0);
impl_payload_bound_arities!(A0 a0, A1 a1);
impl_payload_bound_arities!(A0 a0, A1 a1, A2 a2);
impl_payload_bound_arities!(A0 a0, A1 a1, A2 a2, A3 a3);
