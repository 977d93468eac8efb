//! Narcissistic (Armstrong) numbers: values equal to the sum of their decimal
//! digits, each raised to the number of digits.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

/// Number of decimal digits in `n`. Zero has one digit.
pub fn digit_count(n: &BigUint) -> u32 {
    let ten = BigUint::from(10u32);
    let mut count = 0u32;
    let mut rest = n.clone();
    while !rest.is_zero() {
        rest /= &ten;
        count += 1;
    }
    count.max(1)
}

/// Is `n` equal to the sum of its decimal digits raised to the digit count?
pub fn is_narcissistic(n: &BigUint) -> bool {
    let exponent = digit_count(n);
    let powers: Vec<BigUint> = (0u32..10)
        .map(|digit| BigUint::from(digit).pow(exponent))
        .collect();

    let ten = BigUint::from(10u32);
    let mut sum = BigUint::zero();
    let mut rest = n.clone();
    while !rest.is_zero() {
        let (quotient, digit) = rest.div_rem(&ten);
        // digit < 10 always fits
        let digit = digit.to_usize().unwrap_or_default();
        sum += &powers[digit];
        if sum > *n {
            return false;
        }
        rest = quotient;
    }
    sum == *n
}
