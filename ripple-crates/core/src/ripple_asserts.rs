//! Leveled assertions. Cheap checks are always on; the expensive ones only run in tests or when
//! the `debug-checks` feature is enabled.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub(crate) const RIPPLE_ASSERT_LEVEL_DEFINITION: u8 = RIPPLE_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub(crate) const RIPPLE_ASSERT_LEVEL_DEFINITION: u8 = RIPPLE_ASSERT_EXTREME;

pub(crate) const RIPPLE_ASSERT_SIMPLE: u8 = 1;
pub(crate) const RIPPLE_ASSERT_MODERATE: u8 = 2;
pub(crate) const RIPPLE_ASSERT_ADVANCED: u8 = 3;
pub(crate) const RIPPLE_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! ripple_assert_simple {
    ($($arg:tt)*) => {
        if $crate::ripple_asserts::RIPPLE_ASSERT_LEVEL_DEFINITION >= $crate::ripple_asserts::RIPPLE_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! ripple_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::ripple_asserts::RIPPLE_ASSERT_LEVEL_DEFINITION >= $crate::ripple_asserts::RIPPLE_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! ripple_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::ripple_asserts::RIPPLE_ASSERT_LEVEL_DEFINITION >= $crate::ripple_asserts::RIPPLE_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! ripple_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::ripple_asserts::RIPPLE_ASSERT_LEVEL_DEFINITION >= $crate::ripple_asserts::RIPPLE_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! ripple_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::ripple_asserts::RIPPLE_ASSERT_LEVEL_DEFINITION >= $crate::ripple_asserts::RIPPLE_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
