use std::cmp::min;

use num_traits::PrimInt;

pub(crate) trait ClampedDivRem<Q: Ord>: Sized {
    type Quotient;
    fn clamped_div_rem(self, divisor: Self, max_quotient: Q) -> (Q, Self);
}

impl<T, Q> ClampedDivRem<Q> for T
where
    T: PrimInt + TryInto<Q>,
    Q: Ord + Into<T> + Copy,
{
    type Quotient = Q;

    // Division where the quotient saturates at max_quotient and the excess
    // stays in the remainder. The tail periods of the Gregorian cycle need
    // this: the last century of a 400-year cycle and the last year of a
    // quadrennium both run one day longer than their siblings, and the
    // clamp lets that extra day overflow into the remainder instead of
    // starting a period that doesn't exist.
    fn clamped_div_rem(self, divisor: T, max_quotient: Self::Quotient) -> (Self::Quotient, Self) {
        let quotient = min(self / divisor, max_quotient.into());
        let remainder = self - quotient * divisor;
        let quotient: Self::Quotient = match quotient.try_into() {
            Ok(x) => x,
            Err(_) => panic!("quotient is too large"),
        };
        (quotient, remainder)
    }
}
