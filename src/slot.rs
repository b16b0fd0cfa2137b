use core::mem::{self, MaybeUninit};
use core::ptr::NonNull;

#[cfg(not(feature = "std"))]
use ::alloc::alloc::{self, Layout};
#[cfg(feature = "std")]
use std::alloc::{self, Layout};

/// Alignment every inline buffer provides, whatever `Space` is.
#[repr(align(16))]
struct MaxAlign;

/// `size_of::<Space>()` bytes aligned to at least 16.
#[repr(C)]
pub(crate) struct InlineBuf<Space> {
    _align: [MaxAlign; 0],
    buf: MaybeUninit<Space>,
}

/// Backing memory for one payload: the inline buffer, or a heap block of exactly the payload's
/// layout. The variant is chosen once by [`Slot::reserve`] and never changes.
pub(crate) enum Slot<Space> {
    Inline(InlineBuf<Space>),
    Heap { ptr: NonNull<u8>, layout: Layout },
}

impl<Space> Slot<Space> {
    /// Inline capacity in bytes.
    pub(crate) const CAPACITY: usize = mem::size_of::<Space>();

    /// An inline slot holding nothing.
    pub(crate) const fn vacant() -> Self {
        Slot::Inline(InlineBuf {
            _align: [],
            buf: MaybeUninit::uninit(),
        })
    }

    /// Returns true if a value of type `P` is stored inline.
    pub(crate) const fn fits_inline<P>() -> bool {
        mem::size_of::<P>() <= Self::CAPACITY
            && mem::align_of::<P>() <= mem::align_of::<InlineBuf<Space>>()
    }

    /// Reserves uninitialized room for one `P`.
    ///
    /// Payloads larger than the inline capacity, or aligned above both 16 and `Space`'s own
    /// alignment, go to the heap. Allocation failure is reported through
    /// [`handle_alloc_error`](alloc::handle_alloc_error).
    pub(crate) fn reserve<P>() -> Self {
        if Self::fits_inline::<P>() {
            return Slot::vacant();
        }

        let layout = Layout::new::<P>();
        let ptr = if layout.size() == 0 {
            // zero-sized but over-aligned: nothing to allocate
            NonNull::<P>::dangling().cast::<u8>()
        } else {
            let raw = unsafe { alloc::alloc(layout) };
            match NonNull::new(raw) {
                Some(ptr) => ptr,
                None => alloc::handle_alloc_error(layout),
            }
        };

        Slot::Heap { ptr, layout }
    }

    /// Address of the active buffer.
    pub(crate) fn as_ptr(&mut self) -> NonNull<u8> {
        match self {
            Slot::Inline(inline) => NonNull::from(&mut inline.buf).cast::<u8>(),
            Slot::Heap { ptr, .. } => *ptr,
        }
    }

    /// Bytes allocated on the heap, 0 when inline.
    pub(crate) fn heap_footprint(&self) -> usize {
        match self {
            Slot::Inline(_) => 0,
            Slot::Heap { layout, .. } => layout.size(),
        }
    }

    pub(crate) fn is_heap(&self) -> bool {
        matches!(self, Slot::Heap { .. })
    }
}

impl<Space> Drop for Slot<Space> {
    fn drop(&mut self) {
        if let Slot::Heap { ptr, layout } = self {
            if layout.size() != 0 {
                unsafe { alloc::dealloc(ptr.as_ptr(), *layout) }
            }
        }
    }
}
