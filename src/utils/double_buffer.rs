//! Two-slot buffer for state that is read at step n-1 and written at step n.

/// Holds the current and previous time step of some state.
///
/// `flip` advances time: the slot written last becomes the previous one and
/// the older slot is handed out for writing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DoubleBuffer<T> {
    slots: [T; 2],
    current: usize,
}

impl<T: Default> DoubleBuffer<T> {
    pub fn new() -> Self {
        Self {
            slots: [T::default(), T::default()],
            current: 0,
        }
    }

    pub fn reset(&mut self) {
        self.slots = [T::default(), T::default()];
        self.current = 0;
    }
}

impl<T> DoubleBuffer<T> {
    #[inline]
    pub fn flip(&mut self) {
        self.current = 1 - self.current;
    }

    #[inline]
    pub fn current(&self) -> &T {
        &self.slots[self.current]
    }

    #[inline]
    pub fn previous(&self) -> &T {
        &self.slots[1 - self.current]
    }

    /// Borrows the previous slot for reading and the current slot for writing.
    #[inline]
    pub fn split(&mut self) -> (&T, &mut T) {
        let (first, second) = self.slots.split_at_mut(1);
        if self.current == 0 {
            (&second[0], &mut first[0])
        } else {
            (&first[0], &mut second[0])
        }
    }
}
