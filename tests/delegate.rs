use std::cell::{Cell, RefCell};
use std::mem::size_of;
use std::rc::Rc;

use smalldelegate::payload::{FnPayload, MethodPayload};
use smalldelegate::space::*;
use smalldelegate::{bind_by_ref, bind_by_value, Delegate};

struct Bar {
    value: i32,
}

impl Bar {
    fn add(&mut self, x: i32) -> i32 {
        self.value += x;
        self.value
    }

    fn add_2(&mut self, a: i32, b: i32) -> i32 {
        self.value + a + b
    }

    fn combine(&self, a: i32, bound: i32) -> i32 {
        self.value + a + bound
    }
}

fn add_2(lhs: i32, rhs: i32) -> i32 {
    lhs + rhs
}

#[test]
fn free_function() {
    let mut d: Delegate<fn(i32) -> i32> = Delegate::from_fn(add_2, (3i32,));
    assert_eq!(d.call(5), add_2(5, 3));

    let mut d: Delegate<fn(i32, i32) -> i32> = Delegate::from_fn(add_2, ());
    assert_eq!(d.call(5, 3), 8);

    let mut d: Delegate<fn() -> i32> = Delegate::from_fn(add_2, (1i32, 2i32));
    assert_eq!(d.call(), 3);
}

#[test]
fn mutable_method() {
    let mut bar = Bar { value: 2 };
    {
        let mut d: Delegate<fn(i32) -> i32> =
            Delegate::from_method_mut(&mut bar, Bar::add_2, (2i32,));
        assert_eq!(d.call(5), 9);
    }
    {
        let mut d: Delegate<fn(i32) -> i32> = Delegate::from_method_mut(&mut bar, Bar::add, ());
        assert_eq!(d.call(5), 7);
        assert_eq!(d.call(1), 8);
    }
    assert_eq!(bar.value, 8);
}

#[test]
fn read_only_method() {
    let bar = Bar { value: 2 };
    let mut d: Delegate<fn(i32) -> i32> = Delegate::from_method(&bar, Bar::combine, (3i32,));
    assert_eq!(d.call(5), bar.combine(5, 3));
    assert_eq!(d.call(5), 10);
}

#[test]
fn closure() {
    let mut d: Delegate<fn(i32) -> i32> =
        Delegate::from_closure(|lhs: i32, rhs: i32| lhs + rhs, (5i32,));
    assert_eq!(d.call(5), 10);

    let mut total = 0;
    let mut acc: Delegate<fn(i32)> = Delegate::from_closure(|x: i32| total += x, ());
    acc.call(4);
    acc.call(6);
    drop(acc);
    assert_eq!(total, 10);
}

fn len_plus(s: &str, extra: usize) -> usize {
    s.len() + extra
}

fn measure_all<'s>(words: &[&'s str]) -> Vec<usize> {
    let mut d: Delegate<'s, fn(&'s str) -> usize> = Delegate::from_fn(len_plus, (1usize,));
    words.iter().map(|&w| d.call(w)).collect()
}

fn tag_all<'s>(words: &[&'s str]) -> Vec<String> {
    let mut d: Delegate<'s, fn(&'s str) -> String> = Delegate::from_closure(
        |s: &str, prefix: &str| format!("{prefix}:{s}"),
        (String::from("x"),),
    );
    words.iter().map(|&w| d.call(w)).collect()
}

#[test]
fn borrowed_call_site_argument() {
    let owned = String::from("hello");
    let other = String::from("hi");
    assert_eq!(measure_all(&[&owned, &other]), [6, 3]);
    assert_eq!(tag_all(&[&owned]), ["x:hello"]);
}

#[test]
fn storage_selection_law() {
    fn checksum(seed: usize, bytes: &[u8; 40]) -> usize {
        bytes.iter().map(|&b| usize::from(b)).sum::<usize>() + seed
    }

    type Packed = FnPayload<fn(usize, &[u8; 40]) -> usize, ([u8; 40],)>;

    let f: fn(usize, &[u8; 40]) -> usize = checksum;
    let mut heap: Delegate<fn(usize) -> usize> = Delegate::from_fn(f, ([1u8; 40],));
    assert!(size_of::<Packed>() > Delegate::<fn(usize) -> usize>::STACK_CAPACITY);
    assert!(heap.is_heap());
    assert_eq!(heap.heap_footprint(), size_of::<Packed>());
    assert_eq!(heap.call(2), 42);

    let mut inline: Delegate<fn(usize) -> usize, S8> = Delegate::from_fn(f, ([1u8; 40],));
    assert!(size_of::<Packed>() <= Delegate::<fn(usize) -> usize, S8>::STACK_CAPACITY);
    assert!(!inline.is_heap());
    assert_eq!(inline.heap_footprint(), 0);
    assert_eq!(inline.call(2), 42);
}

#[test]
fn boundary_fits_exactly() {
    let words = [1usize, 2, 3];
    let mut d: Delegate<fn() -> usize> =
        Delegate::from_closure(move || words.iter().sum::<usize>(), ());
    assert_eq!(Delegate::<fn() -> usize>::STACK_CAPACITY, size_of::<[usize; 3]>());
    assert_eq!(d.heap_footprint(), 0);
    assert_eq!(d.call(), 6);

    let words = [1usize, 2, 3, 4];
    let mut d: Delegate<fn() -> usize> =
        Delegate::from_closure(move || words.iter().sum::<usize>(), ());
    assert_eq!(d.heap_footprint(), size_of::<[usize; 4]>());
    assert_eq!(d.call(), 10);
}

#[test]
fn byte_array_space() {
    fn add(a: i32, b: i32) -> i32 {
        a + b
    }

    let mut d: Delegate<fn(i32) -> i32, [u8; 40]> = Delegate::from_fn(add, (3i32,));
    assert_eq!(Delegate::<fn(i32) -> i32, [u8; 40]>::STACK_CAPACITY, 40);
    assert!(!d.is_heap());
    assert_eq!(d.heap_footprint(), 0);
    assert_eq!(d.call(5), 8);

    let words = [2u64; 5];
    let mut d: Delegate<fn() -> u64, [u8; 40]> =
        Delegate::from_closure(move || words.iter().sum::<u64>(), ());
    assert_eq!(d.heap_footprint(), 0);
    assert_eq!(d.call(), 10);

    let words = [2u64; 6];
    let mut d: Delegate<fn() -> u64, [u8; 40]> =
        Delegate::from_closure(move || words.iter().sum::<u64>(), ());
    assert_eq!(d.heap_footprint(), 48);
    assert_eq!(d.call(), 12);
}

#[test]
fn over_aligned_payload() {
    #[derive(Clone, Copy)]
    #[repr(align(32))]
    struct Aligned(u8);
    bind_by_value!(Aligned);

    let mut d: Delegate<fn() -> u8, S8> = Delegate::from_fn(|a: Aligned| a.0, (Aligned(9),));
    assert!(d.is_heap());
    assert_eq!(d.heap_footprint(), 32);
    assert_eq!(d.call(), 9);
}

#[test]
fn move_transfers_ownership_once() {
    struct Tracker<'c> {
        drops: &'c Cell<usize>,
    }

    impl Drop for Tracker<'_> {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    for heap in [false, true] {
        let drops = Cell::new(0);
        let calls = &Cell::new(0);
        let pad = [0u8; 64];
        {
            let tracker = Tracker { drops: &drops };
            let mut x: Delegate<fn(u32) -> u32> = if heap {
                Delegate::from_closure(
                    move |a: u32| {
                        let _ = &tracker;
                        calls.set(calls.get() + 1);
                        a + u32::from(pad[0])
                    },
                    (),
                )
            } else {
                Delegate::from_closure(
                    move |a: u32| {
                        let _ = &tracker;
                        calls.set(calls.get() + 1);
                        a
                    },
                    (),
                )
            };
            assert_eq!(x.is_heap(), heap);

            let mut y = x.take();
            assert!(x.is_empty());
            assert!(y.is_engaged());
            assert_eq!(y.is_heap(), heap);
            assert_eq!(y.call(7), 7);
            assert_eq!(calls.get(), 1);

            let mut z = y;
            assert_eq!(z.call(1), 1);
            assert_eq!(calls.get(), 2);
            assert_eq!(drops.get(), 0);

            drop(x);
            assert_eq!(drops.get(), 0);
        }
        assert_eq!(drops.get(), 1);
        assert_eq!(calls.get(), 2);
    }
}

#[test]
fn argument_order_law() {
    let log = RefCell::new(Vec::new());
    let mut d: Delegate<fn(u8, u8)> = Delegate::from_closure(
        |a: u8, b: u8, c: u8, d: u8, e: u8| log.borrow_mut().extend([a, b, c, d, e]),
        (3u8, 4u8, 5u8),
    );
    d.call(1, 2);
    drop(d);
    assert_eq!(*log.borrow(), [1, 2, 3, 4, 5]);
}

#[test]
fn full_arity() {
    fn weigh(a: i64, b: i64, c: i64, d: i64, e: i64, f: i64, g: i64, h: i64) -> i64 {
        a + 2 * b + 3 * c + 4 * d + 5 * e + 6 * f + 7 * g + 8 * h
    }

    let mut d: Delegate<fn(i64, i64, i64, i64) -> i64, S8> =
        Delegate::from_fn(weigh, (1i64, 1i64, 1i64, 1i64));
    assert_eq!(d.call(1, 1, 1, 1), 36);
    assert_eq!(d.call(0, 0, 0, 0), 26);
}

#[test]
fn owned_bound_arguments() {
    fn greet(punct: char, name: &str, scores: &[u32]) -> String {
        format!("{name}{punct} {}", scores.iter().sum::<u32>())
    }

    let mut d: Delegate<fn(char) -> String> =
        Delegate::from_fn(greet, (String::from("ada"), vec![1u32, 2, 3]));
    assert_eq!(d.call('!'), "ada! 6");
    assert_eq!(d.call('?'), "ada? 6");
}

#[test]
fn own_bind_rule() {
    struct Table {
        rows: Vec<u32>,
    }
    bind_by_ref!(Table);

    fn row(i: usize, table: &Table) -> u32 {
        table.rows[i]
    }

    let table = Table { rows: vec![4, 5, 6] };
    let mut d: Delegate<fn(usize) -> u32> = Delegate::from_fn(row, (table,));
    assert_eq!(d.call(1), 5);
}

#[test]
fn drop_bound_argument_once() {
    let token = Rc::new(());
    let mut d: Delegate<fn() -> usize, S1> =
        Delegate::from_fn(|t: &Rc<()>| Rc::strong_count(t), (Rc::clone(&token),));
    assert_eq!(d.call(), 2);
    let e = d.take();
    drop(d);
    assert_eq!(Rc::strong_count(&token), 2);
    drop(e);
    assert_eq!(Rc::strong_count(&token), 1);
}

fn combine_with<Space>() -> (i32, usize) {
    let bar = Bar { value: 2 };
    let method: fn(&Bar, i32, i32) -> i32 = Bar::combine;
    let mut d: Delegate<fn(i32) -> i32, Space> = Delegate::from_method(&bar, method, (3i32,));
    (d.call(5), d.heap_footprint())
}

#[test]
fn combine_scenario_inline_and_heap() {
    type Packed = MethodPayload<'static, Bar, fn(&Bar, i32, i32) -> i32, (i32,)>;

    let (result, footprint) = combine_with::<S8>();
    assert_eq!(result, 10);
    assert_eq!(footprint, 0);

    let (result, footprint) = combine_with::<S1>();
    assert_eq!(result, 10);
    assert_eq!(footprint, size_of::<Packed>());

    let (result, footprint) = combine_with::<()>();
    assert_eq!(result, 10);
    assert_eq!(footprint, size_of::<Packed>());
}

#[test]
fn heterogeneous_collection() {
    let bar = Bar { value: 2 };
    let mut handlers: Vec<Delegate<fn(i32) -> i32>> = vec![
        Delegate::from_fn(add_2, (1i32,)),
        Delegate::from_method(&bar, Bar::combine, (3i32,)),
        Delegate::from_closure(|x: i32| x * 10, ()),
        Delegate::empty(),
    ];

    let results: Vec<Option<i32>> = handlers.iter_mut().map(|d| d.try_invoke((5,))).collect();
    assert_eq!(results, [Some(6), Some(10), Some(50), None]);
}

#[test]
fn future_returning_delegate() {
    use futures::executor::block_on;
    use futures::future::{FutureExt, LocalBoxFuture};

    let mut d: Delegate<fn(u32) -> LocalBoxFuture<'static, u32>> = Delegate::from_closure(
        |x: u32, y: u32| -> LocalBoxFuture<'static, u32> { async move { x + y }.boxed_local() },
        (40u32,),
    );
    assert_eq!(block_on(d.call(2)), 42);
}

#[test]
#[should_panic(expected = "called an empty Delegate")]
fn invoke_empty() {
    let mut d: Delegate<fn(i32) -> i32> = Delegate::default();
    d.invoke((1,));
}

mod static_checks {
    use smalldelegate::space::S64;
    use smalldelegate::Delegate;
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    assert_not_impl_any!(Delegate<'static, fn(i32) -> i32>: Clone, Copy, Send, Sync);
    assert_not_impl_any!(Delegate<'static, fn(), S64>: Clone, Copy);
    assert_impl_all!(Delegate<'static, fn(i32) -> i32>: Default, core::fmt::Debug);
}
