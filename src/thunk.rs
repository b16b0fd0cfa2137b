//! Monomorphized entry points that recover a payload from raw storage.

use core::ptr::{self, NonNull};

use crate::payload::Payload;
use crate::signature::Signature;

/// Calls the payload stored at the given address.
pub(crate) type Thunk<Sig> =
    unsafe fn(NonNull<u8>, <Sig as Signature>::Args) -> <Sig as Signature>::Output;

/// Destroys the payload stored at the given address without freeing its memory.
pub(crate) type Release = unsafe fn(NonNull<u8>);

/// # Safety
///
/// `data` must point to a live, exclusively borrowed `P`.
pub(crate) unsafe fn invoke<P, Args, R>(data: NonNull<u8>, args: Args) -> R
where
    P: Payload<Args, R>,
{
    let payload = unsafe { data.cast::<P>().as_mut() };
    payload.call(args)
}

/// # Safety
///
/// `data` must point to a live `P` that is never used again.
pub(crate) unsafe fn release<P>(data: NonNull<u8>) {
    unsafe { ptr::drop_in_place(data.cast::<P>().as_ptr()) }
}
