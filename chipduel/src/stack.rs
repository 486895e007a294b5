//! # Machine stack
//! The LIFO stack manipulated by `PUSH` and `POP`.
//!
//! Unlike the registers it has no fixed size: it grows as long as values are
//! pushed. Popping an empty stack is an error the machine reports, so [`MachineStack::pop`]
//! hands back an [`Option`] rather than a garbage value.

use alloc::vec::Vec;
use core::{
    fmt::{self, Display},
    iter::FusedIterator,
    ops::Index,
};

use crate::Word;

/// Stack used by the [`MachineState`](crate::machine::MachineState) to hold
/// temporary values.
///
/// Indexing starts at the top of the stack: index `0` is the value the next
/// `POP` would return, index `1` the one below it, and so on.
///
/// | **Index** | ... | 2 | 1 | **0** |
/// | --------- | --- | - | - | ----- |
/// | **Pushed** | ... | third to last | second to last | last |
#[derive(Clone, Default, Eq, PartialEq, Hash, Debug)]
pub struct MachineStack {
    data: Vec<Word>,
}
impl MachineStack {
    /// Returns an empty `MachineStack`.
    /// # Example
    /// ```rust
    /// # use chipduel::stack::MachineStack;
    /// let stack = MachineStack::new();
    /// assert!(stack.is_empty());
    /// ```
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the value on top of the stack, if any.
    /// # Example
    /// ```rust
    /// # use chipduel::stack::MachineStack;
    /// # let mut stack = MachineStack::new();
    /// assert_eq!(stack.top(), None);
    /// stack.push(4);
    /// assert_eq!(stack.top(), Some(4));
    /// ```
    pub fn top(&self) -> Option<Word> {
        self.data.last().copied()
    }

    /// Returns the value at the given depth, `0` being the top of the stack.
    /// # Example
    /// ```rust
    /// # use chipduel::stack::MachineStack;
    /// # let mut stack = MachineStack::new();
    /// stack.push(1);
    /// stack.push(4);
    /// stack.push(10);
    ///
    /// assert_eq!(stack.get(0), stack.top());
    /// assert_eq!(stack.get(2), Some(1));
    /// assert_eq!(stack.get(3), None);
    /// ```
    pub fn get(&self, depth: usize) -> Option<Word> {
        let index = self.data.len().checked_sub(depth)?.checked_sub(1)?;
        self.data.get(index).copied()
    }

    /// Pushes a value on top of the stack.
    /// # Example
    /// ```rust
    /// # use chipduel::stack::MachineStack;
    /// # let mut stack = MachineStack::new();
    /// stack.push(3);
    /// assert_eq!(stack.top(), Some(3));
    /// ```
    pub fn push(&mut self, value: Word) {
        self.data.push(value)
    }

    /// Pops a value from the top of the stack, or [`None`] if it is empty.
    /// # Example
    /// ```rust
    /// # use chipduel::stack::MachineStack;
    /// # let mut stack = MachineStack::new();
    /// stack.push(2);
    /// stack.push(3);
    ///
    /// assert_eq!(stack.pop(), Some(3));
    /// assert_eq!(stack.pop(), Some(2));
    /// assert_eq!(stack.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<Word> {
        self.data.pop()
    }

    /// Values from the bottom of the stack to its top, in push order.
    pub fn as_slice(&self) -> &[Word] {
        &self.data
    }

    /// Returns an iterator over the values of this stack, starting at the top.
    /// # Example
    /// ```rust
    /// # use chipduel::stack::MachineStack;
    /// # let mut stack = MachineStack::new();
    /// stack.push(1);
    /// stack.push(2);
    /// assert!(stack.iter().eq(&[2, 1]));
    /// ```
    pub fn iter(&self) -> MachineStackIter<'_> {
        MachineStackIter::new(self)
    }
}
impl Index<usize> for MachineStack {
    type Output = Word;

    /// Returns a reference to the value at the given depth. Panics if the stack
    /// is not that deep.
    fn index(&self, depth: usize) -> &Self::Output {
        &self.data[self.data.len() - 1 - depth]
    }
}
impl From<Vec<Word>> for MachineStack {
    /// The last element of the vector ends up on top of the stack.
    fn from(data: Vec<Word>) -> Self {
        Self { data }
    }
}
impl PartialEq<[Word]> for MachineStack {
    /// Compares against values listed bottom to top.
    fn eq(&self, other: &[Word]) -> bool {
        self.data.as_slice() == other
    }
}
impl<const N: usize> PartialEq<[Word; N]> for MachineStack {
    /// Compares against values listed bottom to top.
    fn eq(&self, other: &[Word; N]) -> bool {
        self.data.as_slice() == other
    }
}
impl Display for MachineStack {
    /// Pretty printing, bottom to top, the top marked with `|`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.data.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("|]")
    }
}

/// Iterator over the values of a [`MachineStack`], from the top down.
pub struct MachineStackIter<'a> {
    values: &'a [Word],
}
impl<'a> MachineStackIter<'a> {
    pub fn new(stack: &'a MachineStack) -> Self {
        Self {
            values: &stack.data,
        }
    }
}
impl<'a> Iterator for MachineStackIter<'a> {
    type Item = &'a Word;

    fn next(&mut self) -> Option<Self::Item> {
        let (last, rest) = self.values.split_last()?;
        self.values = rest;
        Some(last)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.values.len(), Some(self.values.len()))
    }
}
impl DoubleEndedIterator for MachineStackIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (first, rest) = self.values.split_first()?;
        self.values = rest;
        Some(first)
    }
}
impl ExactSizeIterator for MachineStackIter<'_> {}
impl FusedIterator for MachineStackIter<'_> {}
