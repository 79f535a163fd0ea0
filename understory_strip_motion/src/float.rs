// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float functions that live in `std`, with `libm` fallbacks for `no_std` builds.

#[cfg(feature = "std")]
mod imp {
    pub(crate) fn abs(x: f64) -> f64 {
        x.abs()
    }

    pub(crate) fn exp(x: f64) -> f64 {
        x.exp()
    }

    pub(crate) fn ln(x: f64) -> f64 {
        x.ln()
    }

    pub(crate) fn sqrt(x: f64) -> f64 {
        x.sqrt()
    }

    pub(crate) fn round(x: f64) -> f64 {
        x.round()
    }

    pub(crate) fn trunc(x: f64) -> f64 {
        x.trunc()
    }
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
mod imp {
    pub(crate) fn abs(x: f64) -> f64 {
        libm::fabs(x)
    }

    pub(crate) fn exp(x: f64) -> f64 {
        libm::exp(x)
    }

    pub(crate) fn ln(x: f64) -> f64 {
        libm::log(x)
    }

    pub(crate) fn sqrt(x: f64) -> f64 {
        libm::sqrt(x)
    }

    pub(crate) fn round(x: f64) -> f64 {
        libm::round(x)
    }

    pub(crate) fn trunc(x: f64) -> f64 {
        libm::trunc(x)
    }
}

pub(crate) use imp::{abs, exp, ln, round, sqrt, trunc};

/// `-1.0`, `0.0`, or `1.0` by the sign of `x` (zero for zero and NaN).
pub(crate) fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rounds to the nearest pixel, saturating at the `i32` bounds.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Float-to-int `as` casts saturate, and pixel offsets fit in i32"
)]
pub(crate) fn round_px(x: f64) -> i32 {
    round(x) as i32
}

/// Converts seconds to whole milliseconds, rounding up.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Float-to-int `as` casts saturate; negative and NaN durations become zero"
)]
pub(crate) fn secs_to_ms_ceil(secs: f64) -> u64 {
    let ms = secs * 1000.0;
    let whole = trunc(ms);
    let ceil = if ms > whole { whole + 1.0 } else { whole };
    ceil as u64
}

#[cfg(test)]
mod tests {
    #[test]
    fn pixel_rounding_and_ceil_ms() {
        assert_eq!(super::round_px(2.5), 3);
        assert_eq!(super::round_px(-2.4), -2);
        assert_eq!(super::round_px(1e12), i32::MAX);
        assert_eq!(super::secs_to_ms_ceil(0.25), 250);
        assert_eq!(super::secs_to_ms_ceil(0.2501), 251);
        assert_eq!(super::secs_to_ms_ceil(-1.0), 0);
    }
}
