pub trait FloatExt: Copy {
    fn approximately_eq(self, other: Self) -> bool;

    /// Number of representable values between `self` and `other`.
    /// `u64::MAX` if either is NaN.
    fn ulps_between(self, other: Self) -> u64;

    /// Gap between `|self|` and the next representable value away from zero.
    fn ulp(self) -> Self;

    fn within_ulps(self, other: Self, ulps: u64) -> bool {
        self.ulps_between(other) <= ulps
    }
}

impl FloatExt for f32 {
    fn approximately_eq(self, other: Self) -> bool {
        (self - other).abs() < crate::EPSILON as f32
    }

    fn ulps_between(self, other: Self) -> u64 {
        if self.is_nan() || other.is_nan() {
            return u64::MAX;
        }
        let ordered = |v: f32| {
            let bits = v.to_bits();
            let magnitude = (bits & 0x7fff_ffff) as i64;
            if bits >> 31 == 1 {
                -magnitude
            } else {
                magnitude
            }
        };
        ordered(self).abs_diff(ordered(other))
    }

    fn ulp(self) -> Self {
        let magnitude = self.abs();
        f32::from_bits(magnitude.to_bits() + 1) - magnitude
    }
}

impl FloatExt for f64 {
    fn approximately_eq(self, other: Self) -> bool {
        (self - other).abs() < crate::EPSILON
    }

    fn ulps_between(self, other: Self) -> u64 {
        if self.is_nan() || other.is_nan() {
            return u64::MAX;
        }
        let ordered = |v: f64| {
            let bits = v.to_bits();
            let magnitude = (bits & 0x7fff_ffff_ffff_ffff) as i128;
            if bits >> 63 == 1 {
                -magnitude
            } else {
                magnitude
            }
        };
        let diff = ordered(self).abs_diff(ordered(other));
        u64::try_from(diff).unwrap_or(u64::MAX)
    }

    fn ulp(self) -> Self {
        let magnitude = self.abs();
        f64::from_bits(magnitude.to_bits() + 1) - magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_approximately_eq() {
        assert!(1.0_f32.approximately_eq(1.0));
        assert!((0.1_f32 + 0.2_f32).approximately_eq(0.3));
        assert!(!1.0_f32.approximately_eq(1.001));
    }

    #[test]
    fn f64_approximately_eq() {
        assert!(1.0_f64.approximately_eq(1.0));
        assert!((0.1_f64 + 0.2_f64).approximately_eq(0.30000000000000004));
        assert!(!1.0_f64.approximately_eq(1.0001));
    }

    #[test]
    fn ulps_between_neighbours() {
        let next = f64::from_bits(1.0_f64.to_bits() + 1);
        assert_eq!(1.0_f64.ulps_between(next), 1);
        assert_eq!(next.ulps_between(1.0), 1);
        assert_eq!(1.0_f64.ulps_between(1.0), 0);
    }

    #[test]
    fn ulps_between_crosses_zero() {
        let tiny = f32::from_bits(1);
        assert_eq!(tiny.ulps_between(-tiny), 2);
        assert_eq!(0.0_f32.ulps_between(-0.0), 0);
    }

    #[test]
    fn nan_is_never_within_ulps() {
        assert_eq!(f32::NAN.ulps_between(1.0), u64::MAX);
        assert!(!f64::NAN.within_ulps(f64::NAN, 1_000));
    }

    #[test]
    fn ulp_of_one() {
        assert_eq!(1.0_f32.ulp(), f32::EPSILON);
        assert_eq!(1.0_f64.ulp(), f64::EPSILON);
        assert_eq!((-1.0_f64).ulp(), f64::EPSILON);
    }
}
