#[macro_use]
extern crate quickcheck_macros;

mod tree;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the value, keeping duplicates
    Insert(T),
    /// Insert the value unless an equal one is present
    InsertUnique(T),
    /// Remove one copy of the value, if present
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 1, 2]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::InsertUnique(T::arbitrary(g)),
            2 => Op::Remove(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}
