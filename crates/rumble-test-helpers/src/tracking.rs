//! Allocation tracking for tick-path tests.
//!
//! [`TrackingAllocator`] counts allocations made on the current thread while
//! an [`AllocationGuard`] is alive. Install it as the global allocator of the
//! test binary, then wrap the code under test:
//!
//! ```rust,ignore
//! let guard = track();
//! device.tick(8);
//! assert_rt_safe!(guard, "device tick");
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::fmt;

thread_local! {
    static ALLOCATION_COUNT: Cell<usize> = const { Cell::new(0) };
    static ALLOCATION_BYTES: Cell<usize> = const { Cell::new(0) };
    static TRACKING_DEPTH: Cell<usize> = const { Cell::new(0) };
}

fn tracking() -> bool {
    TRACKING_DEPTH.with(|depth| depth.get() > 0)
}

fn record(bytes: usize) {
    ALLOCATION_COUNT.with(|count| count.set(count.get().saturating_add(1)));
    ALLOCATION_BYTES.with(|total| total.set(total.get().saturating_add(bytes)));
}

/// System allocator that counts allocations on tracked threads
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingAllocator;

// SAFETY: every call is forwarded unchanged to `System`; the counters are
// thread-local `Cell`s that never allocate.
unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: caller upholds the `GlobalAlloc::alloc` contract.
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() && tracking() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: caller upholds the `GlobalAlloc::alloc_zeroed` contract.
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() && tracking() {
            record(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        // SAFETY: `ptr` was returned by `System` with this `layout`.
        unsafe { System.dealloc(ptr, layout) };
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: caller upholds the `GlobalAlloc::realloc` contract.
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() && tracking() {
            record(new_size.saturating_sub(layout.size()));
        }
        new_ptr
    }
}

/// Counts allocations on this thread from creation until drop
#[derive(Debug)]
pub struct AllocationGuard {
    start_count: usize,
    start_bytes: usize,
}

impl AllocationGuard {
    /// Start tracking
    pub fn new() -> Self {
        TRACKING_DEPTH.with(|depth| depth.set(depth.get().saturating_add(1)));
        Self {
            start_count: ALLOCATION_COUNT.with(Cell::get),
            start_bytes: ALLOCATION_BYTES.with(Cell::get),
        }
    }

    /// Allocations since the guard was created
    pub fn allocations(&self) -> usize {
        ALLOCATION_COUNT
            .with(Cell::get)
            .saturating_sub(self.start_count)
    }

    /// Bytes allocated since the guard was created
    pub fn bytes(&self) -> usize {
        ALLOCATION_BYTES
            .with(Cell::get)
            .saturating_sub(self.start_bytes)
    }

    /// True if anything was allocated
    pub fn has_allocations(&self) -> bool {
        self.allocations() > 0
    }

    /// Snapshot the counters under a label
    pub fn report(&self, context: impl Into<String>) -> AllocationReport {
        AllocationReport {
            allocations: self.allocations(),
            bytes: self.bytes(),
            context: context.into(),
        }
    }
}

impl Default for AllocationGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AllocationGuard {
    fn drop(&mut self) {
        TRACKING_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Start tracking allocations on this thread
pub fn track() -> AllocationGuard {
    AllocationGuard::new()
}

/// Panic if the guard saw any allocation
#[macro_export]
macro_rules! assert_rt_safe {
    ($guard:expr) => {
        $crate::assert_rt_safe!($guard, "tracked section")
    };
    ($guard:expr, $context:expr) => {{
        let guard = &$guard;
        let allocs = guard.allocations();
        if allocs > 0 {
            panic!(
                "RT path allocation violation in '{}': {} allocations ({} bytes)\n\
                 Location: {}:{}",
                $context,
                allocs,
                guard.bytes(),
                file!(),
                line!()
            );
        }
    }};
}

/// Allocation counts captured for one section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationReport {
    /// Number of allocations
    pub allocations: usize,
    /// Bytes allocated
    pub bytes: usize,
    /// Label of the measured section
    pub context: String,
}

impl AllocationReport {
    /// True if nothing was allocated
    pub fn is_zero(&self) -> bool {
        self.allocations == 0
    }

    /// Panic unless nothing was allocated
    pub fn assert_zero(&self) -> &Self {
        if self.allocations > 0 {
            panic!(
                "Allocation violation in '{}': {} allocations ({} bytes)",
                self.context, self.allocations, self.bytes
            );
        }
        self
    }
}

impl fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.allocations > 0 {
            write!(
                f,
                "{} allocated {} times ({} bytes)",
                self.context, self.allocations, self.bytes
            )
        } else {
            write!(f, "{} - zero allocations", self.context)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_no_allocations() {
        let guard = track();
        let x = 42;
        let _y = x + 1;
        assert_rt_safe!(guard);
    }

    #[test]
    #[should_panic(expected = "RT path allocation violation")]
    fn test_guard_with_allocations() {
        let guard = track();
        let _vec: Vec<i32> = vec![1, 2, 3];
        assert_rt_safe!(guard, "vec literal");
    }

    #[test]
    fn test_guard_counts() {
        let guard = track();
        let _vec: Vec<i32> = vec![1, 2, 3, 4, 5];
        assert!(guard.has_allocations());
        assert!(guard.bytes() >= 20);
    }

    #[test]
    fn test_nested_guards_keep_tracking() {
        let outer = track();
        {
            let inner = track();
            assert_rt_safe!(inner);
        }
        let _vec: Vec<u8> = Vec::with_capacity(8);
        assert!(outer.has_allocations());
    }

    #[test]
    fn test_report_display() {
        let guard = track();
        let report = guard.report("idle");
        assert!(report.is_zero());
        assert_eq!(report.to_string(), "idle - zero allocations");

        let nonzero = AllocationReport {
            allocations: 3,
            bytes: 256,
            context: "tick".to_string(),
        };
        assert_eq!(nonzero.to_string(), "tick allocated 3 times (256 bytes)");
    }

    #[test]
    #[should_panic(expected = "Allocation violation")]
    fn test_report_assert_zero() {
        AllocationReport {
            allocations: 1,
            bytes: 16,
            context: "tick".to_string(),
        }
        .assert_zero();
    }
}
