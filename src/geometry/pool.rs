//! Free-list pools for `Rectangle` and `Matrix`.
//!
//! Each thread owns its own pools, so the "one logical owner at a time"
//! contract only has to hold within a thread: an instance handed to
//! `free()` must not be used again until a later `allocate()` returns it.

use std::cell::RefCell;

use super::{Matrix, Rectangle};

/// Value type that can be recycled through a [`Pool`].
pub trait Poolable: Copy {
    /// Obviously-wrong fill value for fresh instances, so reads before
    /// initialization stand out in tests.
    const SENTINEL: Self;
}

/// Explicit object pool with a dirty free list.
#[derive(Debug, Clone, Default)]
pub struct Pool<T> {
    free: Vec<T>,
    allocation_count: usize,
}

impl<T: Poolable> Pool<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            free: Vec::new(),
            allocation_count: 0,
        }
    }

    /// Pops a recycled instance or builds a sentinel-filled one.
    ///
    /// Recycled instances keep whatever value they held when released.
    pub fn acquire(&mut self) -> T {
        match self.free.pop() {
            Some(value) => value,
            None => {
                self.allocation_count += 1;
                T::SENTINEL
            }
        }
    }

    pub fn release(&mut self, value: T) {
        self.free.push(value);
    }

    /// Number of fresh instances constructed by this pool.
    #[must_use]
    pub fn allocation_count(&self) -> usize {
        self.allocation_count
    }

    #[must_use]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn clear(&mut self) {
        self.free.clear();
    }
}

thread_local! {
    static RECTANGLES: RefCell<Pool<Rectangle>> = RefCell::new(Pool::new());
    static MATRICES: RefCell<Pool<Matrix>> = RefCell::new(Pool::new());
}

pub(super) fn allocate_rectangle() -> Rectangle {
    RECTANGLES.with(|pool| pool.borrow_mut().acquire())
}

pub(super) fn free_rectangle(rectangle: Rectangle) {
    RECTANGLES.with(|pool| pool.borrow_mut().release(rectangle));
}

pub(super) fn allocate_matrix() -> Matrix {
    MATRICES.with(|pool| pool.borrow_mut().acquire())
}

pub(super) fn free_matrix(matrix: Matrix) {
    MATRICES.with(|pool| pool.borrow_mut().release(matrix));
}

/// Fresh rectangles constructed by this thread's pool.
#[must_use]
pub fn rectangle_allocation_count() -> usize {
    RECTANGLES.with(|pool| pool.borrow().allocation_count())
}

/// Fresh matrices constructed by this thread's pool.
#[must_use]
pub fn matrix_allocation_count() -> usize {
    MATRICES.with(|pool| pool.borrow().allocation_count())
}
