//! Zero-cost safety macro for the per-cell hot path
//!
//! The kernel touches three SoA arrays for every neighbor of every cell,
//! every step. Indices come from the toroidal wrap / clamp helpers and are
//! always in range, so release builds skip the bounds check.
//!
//! - Debug: normal indexing (panics with a useful message)
//! - Release: `get_unchecked` / `get_unchecked_mut`

/// Debug-checked, release-unchecked slice access.
///
/// Read: `fast!(slice, [index])`
/// Write: `fast!(slice, [index] = value)`
#[macro_export]
macro_rules! fast {
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn fast_read() {
        let arr = vec![1, 2, 3, 4, 5];
        assert_eq!(*fast!(arr, [2]), 3);
    }

    #[test]
    fn fast_write() {
        let mut arr = vec![0.0f32; 4];
        fast!(arr, [1] = 0.5);
        assert_eq!(arr[1], 0.5);
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn fast_bounds_check_debug() {
        let arr = vec![1, 2, 3];
        let _ = *fast!(arr, [10]);
    }
}
