use core::fmt;
use core::marker::PhantomData;
use core::mem;

use crate::payload::{ClosurePayload, FnPayload, MethodMutPayload, MethodPayload, Payload};
use crate::signature::Signature;
use crate::slot::Slot;
use crate::space::DefaultSpace;
use crate::thunk::{self, Release, Thunk};

/// A callable with trailing arguments bound in, stored inline or on the heap depending on its
/// size.
///
/// `Sig` names the call-site signature as a fn-pointer type, e.g. `fn(i32) -> i32`. The target
/// behind a delegate may be a function, a method on a borrowed receiver, or a closure; it is
/// called with the call-site arguments followed by the arguments bound at construction.
///
/// The callable and its bound arguments are packed into one payload. If the payload fits in
/// `Space` (see [`space`](crate::space)) it lives inside the delegate, otherwise it gets a heap
/// allocation of exactly its size. Dispatch goes through a single fn pointer chosen at
/// construction.
///
/// A delegate can only be moved, never copied:
///
/// ```compile_fail
/// use smalldelegate::Delegate;
///
/// let d: Delegate<fn() -> u32> = Delegate::from_closure(|| 1u32, ());
/// let e = d.clone();
/// ```
///
/// # Example
///
/// ```
/// use smalldelegate::Delegate;
///
/// fn add(a: i32, b: i32) -> i32 {
///     a + b
/// }
///
/// let mut d: Delegate<fn(i32) -> i32> = Delegate::from_fn(add, (3i32,));
/// assert_eq!(d.call(5), 8);
/// assert_eq!(d.heap_footprint(), 0);
/// ```
pub struct Delegate<'a, Sig: Signature, Space = DefaultSpace> {
    slot: Slot<Space>,
    entry: Option<(Thunk<Sig>, Release)>,
    _phantom: PhantomData<(&'a (), *mut ())>,
}

impl<'a, Sig: Signature, Space> Delegate<'a, Sig, Space> {
    /// Inline capacity in bytes. Payloads up to this size (and no stricter aligned than
    /// `Space`) never allocate.
    pub const STACK_CAPACITY: usize = Slot::<Space>::CAPACITY;

    /// Creates an empty delegate. Calling it panics.
    pub fn empty() -> Self {
        Delegate {
            slot: Slot::vacant(),
            entry: None,
            _phantom: PhantomData,
        }
    }

    /// Binds a function and trailing arguments.
    ///
    /// `bound` is a tuple of up to four values; the function is called with the call-site
    /// arguments followed by these, in order. How each bound value reaches the function is
    /// decided by its [`BindArg`](crate::BindArg) implementation.
    ///
    /// # Example
    ///
    /// ```
    /// use smalldelegate::Delegate;
    ///
    /// fn label(n: u32, prefix: &str, width: usize) -> String {
    ///     format!("{prefix}{n:0width$}")
    /// }
    ///
    /// let mut d: Delegate<fn(u32) -> String> =
    ///     Delegate::from_fn(label, (String::from("id-"), 4usize));
    /// assert_eq!(d.call(42), "id-0042");
    /// ```
    pub fn from_fn<F, B>(func: F, bound: B) -> Self
    where
        F: Copy + 'a,
        B: 'a,
        FnPayload<F, B>: Payload<Sig::Args, Sig::Output>,
    {
        Self::pack(FnPayload::new(func, bound))
    }

    /// Binds a method taking `&mut T` to an exclusively borrowed receiver.
    ///
    /// # Example
    ///
    /// ```
    /// use smalldelegate::Delegate;
    ///
    /// struct Account {
    ///     balance: i64,
    /// }
    ///
    /// impl Account {
    ///     fn deposit(&mut self, amount: i64, fee: i64) -> i64 {
    ///         self.balance += amount - fee;
    ///         self.balance
    ///     }
    /// }
    ///
    /// let mut account = Account { balance: 0 };
    /// let mut d: Delegate<fn(i64) -> i64> =
    ///     Delegate::from_method_mut(&mut account, Account::deposit, (1i64,));
    /// assert_eq!(d.call(10), 9);
    /// assert_eq!(d.call(10), 18);
    /// drop(d);
    /// assert_eq!(account.balance, 18);
    /// ```
    pub fn from_method_mut<T, M, B>(receiver: &'a mut T, method: M, bound: B) -> Self
    where
        T: ?Sized,
        M: Copy + 'a,
        B: 'a,
        MethodMutPayload<'a, T, M, B>: Payload<Sig::Args, Sig::Output>,
    {
        Self::pack(MethodMutPayload::new(receiver, method, bound))
    }

    /// Binds a method taking `&T` to a shared receiver.
    ///
    /// # Example
    ///
    /// ```
    /// use smalldelegate::Delegate;
    ///
    /// struct Bar {
    ///     value: i32,
    /// }
    ///
    /// impl Bar {
    ///     fn combine(&self, a: i32, bound: i32) -> i32 {
    ///         self.value + a + bound
    ///     }
    /// }
    ///
    /// let bar = Bar { value: 2 };
    /// let mut d: Delegate<fn(i32) -> i32> = Delegate::from_method(&bar, Bar::combine, (3i32,));
    /// assert_eq!(d.call(5), 10);
    /// ```
    pub fn from_method<T, M, B>(receiver: &'a T, method: M, bound: B) -> Self
    where
        T: ?Sized,
        M: Copy + 'a,
        B: 'a,
        MethodPayload<'a, T, M, B>: Payload<Sig::Args, Sig::Output>,
    {
        Self::pack(MethodPayload::new(receiver, method, bound))
    }

    /// Binds a closure and trailing arguments.
    ///
    /// The closure may mutate its captures; it runs at most once per call.
    ///
    /// # Example
    ///
    /// ```
    /// use smalldelegate::Delegate;
    ///
    /// let mut seen = Vec::new();
    /// let mut d: Delegate<fn(u8)> =
    ///     Delegate::from_closure(|x: u8, tag: char| seen.push((tag, x)), ('a',));
    /// d.call(1);
    /// d.call(2);
    /// drop(d);
    /// assert_eq!(seen, [('a', 1), ('a', 2)]);
    /// ```
    pub fn from_closure<F, B>(func: F, bound: B) -> Self
    where
        F: 'a,
        B: 'a,
        ClosurePayload<F, B>: Payload<Sig::Args, Sig::Output>,
    {
        Self::pack(ClosurePayload::new(func, bound))
    }

    fn pack<P>(payload: P) -> Self
    where
        P: Payload<Sig::Args, Sig::Output> + 'a,
    {
        let mut slot = Slot::<Space>::reserve::<P>();
        unsafe { slot.as_ptr().cast::<P>().as_ptr().write(payload) };

        Delegate {
            slot,
            entry: Some((
                thunk::invoke::<P, Sig::Args, Sig::Output>,
                thunk::release::<P>,
            )),
            _phantom: PhantomData,
        }
    }

    /// Calls the target with `args` (as a tuple) followed by the bound arguments.
    ///
    /// # Panics
    ///
    /// Panics if the delegate is empty.
    #[inline]
    pub fn invoke(&mut self, args: Sig::Args) -> Sig::Output {
        match self.entry {
            Some((thunk, _)) => unsafe { thunk(self.slot.as_ptr(), args) },
            None => panic!("called an empty Delegate"),
        }
    }

    /// Calls the target like [`invoke`](Self::invoke), or returns `None` if the delegate is
    /// empty.
    #[inline]
    pub fn try_invoke(&mut self, args: Sig::Args) -> Option<Sig::Output> {
        let (thunk, _) = self.entry?;
        Some(unsafe { thunk(self.slot.as_ptr(), args) })
    }

    /// Returns true if no target is bound.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Returns true if a target is bound.
    pub fn is_engaged(&self) -> bool {
        self.entry.is_some()
    }

    /// Bytes allocated on the heap for the payload; 0 when it is stored inline.
    pub fn heap_footprint(&self) -> usize {
        self.slot.heap_footprint()
    }

    /// Returns true if the payload is heap-allocated.
    pub fn is_heap(&self) -> bool {
        self.slot.is_heap()
    }

    /// Moves the target out, leaving this delegate empty.
    ///
    /// # Example
    ///
    /// ```
    /// use smalldelegate::Delegate;
    ///
    /// let mut x: Delegate<fn() -> u8> = Delegate::from_closure(|| 7u8, ());
    /// let mut y = x.take();
    /// assert!(x.is_empty());
    /// assert_eq!(y.call(), 7);
    /// ```
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<'a, Sig: Signature, Space> Default for Delegate<'a, Sig, Space> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, Sig: Signature, Space> Drop for Delegate<'a, Sig, Space> {
    fn drop(&mut self) {
        if let Some((_, release)) = self.entry.take() {
            unsafe { release(self.slot.as_ptr()) }
        }
    }
}

impl<'a, Sig: Signature, Space> fmt::Debug for Delegate<'a, Sig, Space> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("engaged", &self.is_engaged())
            .field("heap", &self.is_heap())
            .field("heap_footprint", &self.heap_footprint())
            .finish()
    }
}

macro_rules! impl_call {
    ($($A:ident $a:ident),*) => {
        impl<'a, R, $($A,)* Space> Delegate<'a, fn($($A,)*) -> R, Space> {
            /// Calls the target with these arguments followed by the bound arguments.
            ///
            /// # Panics
            ///
            /// Panics if the delegate is empty.
            #[inline]
            pub fn call(&mut self, $($a: $A),*) -> R {
                self.invoke(($($a,)*))
            }
        }
    };
}

impl_call!();
impl_call!(A0 a0);
impl_call!(A0 a0, A1 a1);
impl_call!(A0 a0, A1 a1, A2 a2);
impl_call!(A0 a0, A1 a1, A2 a2, A3 a3);
