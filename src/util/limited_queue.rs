use std::{cmp::Ordering, iter::Chain, ops::Index, slice::Iter};

/// Indexed queue with a fixed capacity: pushing once the queue is full drops
/// the oldest element.
///
/// The backing array lives on the stack, so keep `size_of::<T>() * N` small.
#[derive(Clone, Debug)]
pub struct LimitedQueue<T, const N: usize> {
    queue: [T; N],
    /// If the queue is not empty, `end` is the index of the last element.
    /// Otherwise, it has no meaning.
    end: usize,
    /// Amount of elements in the queue. This is equal to `end + 1` if the
    /// queue is not full, or `N` otherwise.
    len: usize,
}

impl<T, const N: usize> Default for LimitedQueue<T, N>
where
    T: Copy + Clone + Default,
{
    fn default() -> Self {
        Self {
            end: N - 1,
            queue: [T::default(); N],
            len: 0,
        }
    }
}

impl<T, const N: usize> LimitedQueue<T, N> {
    pub fn push(&mut self, elem: T) {
        self.end = (self.end + 1) % N;
        self.queue[self.end] = elem;
        self.len += usize::from(self.len < N);
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.end = N - 1;
        self.len = 0;
    }

    #[cfg(test)]
    pub const fn last(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            Some(&self.queue[self.end])
        }
    }

    /// Iterates from the oldest to the most recent element.
    pub fn iter(&self) -> LimitedQueueIter<'_, T> {
        let (head, tail) = self.as_slices();

        head.iter().chain(tail)
    }

    fn as_slices(&self) -> (&[T], &[T]) {
        if self.is_full() {
            (&self.queue[self.end + 1..N], &self.queue[0..=self.end])
        } else {
            (&[], &self.queue[0..self.len])
        }
    }
}

impl<T: PartialOrd, const N: usize> LimitedQueue<T, N> {
    pub fn min(&self) -> Option<&T> {
        self.iter().reduce(|min, next| {
            if let Some(Ordering::Greater) = min.partial_cmp(next) {
                next
            } else {
                min
            }
        })
    }
}

impl<T, const N: usize> Index<usize> for LimitedQueue<T, N> {
    type Output = T;

    fn index(&self, idx: usize) -> &Self::Output {
        let idx = (idx + usize::from(self.len == N) * (self.end + 1)) % N;

        &self.queue[idx]
    }
}

pub type LimitedQueueIter<'a, T> = Chain<Iter<'a, T>, Iter<'a, T>>;
