//! Field-write interception
//!
//! A write to an equality-safe field compares old and new value and only
//! touches the owner when they differ. Every other write touches
//! unconditionally, since no reliable equality contract can be assumed.
//!
//! The choice is made per field type at compile time. `WriteProbe<T>` is
//! called through two references; method resolution picks
//! `CompareOnWrite` when `T: EqualitySafe` and falls back to `AlwaysWrite`
//! otherwise.

use std::marker::PhantomData;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use super::WriteSemantics;

mod sealed {
    pub trait Sealed {}
}

/// Types whose `==` is a reliable value equality.
///
/// Closed set: numeric and boolean primitives, text, wide integers
/// standing in for arbitrary-precision numbers, and calendar values.
/// `Option<T>` qualifies when `T` does; two `None`s compare equal.
pub trait EqualitySafe: PartialEq + sealed::Sealed {}

macro_rules! equality_safe {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl EqualitySafe for $ty {}
        )*
    };
}

equality_safe!(
    bool, char,
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
    String, &'static str,
    NaiveDate, NaiveDateTime, NaiveTime, DateTime<Utc>,
);

impl<T: EqualitySafe> sealed::Sealed for Option<T> {}
impl<T: EqualitySafe> EqualitySafe for Option<T> {}

/// Assigns and reports whether the value changed.
pub fn assign_compared<T: EqualitySafe>(slot: &mut T, value: T) -> bool {
    let changed = *slot != value;
    *slot = value;
    changed
}

/// Assigns and always reports a change.
pub fn assign_unconditional<T>(slot: &mut T, value: T) -> bool {
    *slot = value;
    true
}

/// Zero-sized selector for the write strategy of `T`.
pub struct WriteProbe<T>(PhantomData<T>);

impl<T> WriteProbe<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for WriteProbe<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Selected for equality-safe field types.
pub trait CompareOnWrite {
    type Value;

    /// Assigns; returns true if the owner must be touched.
    fn assign(&self, slot: &mut Self::Value, value: Self::Value) -> bool;

    fn semantics(&self) -> WriteSemantics;
}

/// Fallback for every other field type.
pub trait AlwaysWrite {
    type Value;

    /// Assigns; returns true if the owner must be touched.
    fn assign(&self, slot: &mut Self::Value, value: Self::Value) -> bool;

    fn semantics(&self) -> WriteSemantics;
}

impl<T: EqualitySafe> CompareOnWrite for &WriteProbe<T> {
    type Value = T;

    fn assign(&self, slot: &mut T, value: T) -> bool {
        assign_compared(slot, value)
    }

    fn semantics(&self) -> WriteSemantics {
        WriteSemantics::Compare
    }
}

impl<T> AlwaysWrite for WriteProbe<T> {
    type Value = T;

    fn assign(&self, slot: &mut T, value: T) -> bool {
        assign_unconditional(slot, value)
    }

    fn semantics(&self) -> WriteSemantics {
        WriteSemantics::Always
    }
}
