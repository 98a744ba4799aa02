//! Luhn algorithm over card number text.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a
//! checksum formula used to catch typos in card numbers.
//!
//! Only ASCII digit characters take part. Any other character is skipped:
//! it adds nothing to the sum and does not advance the doubling alternation.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Returns true if `number` passes the Luhn check.
///
/// # Algorithm
///
/// 1. Walk the characters from right to left
/// 2. Double every second digit, starting with the one left of the check digit
/// 3. If doubling gives a number > 9, subtract 9
/// 4. Sum all digits
/// 5. The number is valid if the sum is divisible by 10
///
/// # Example
///
/// ```
/// use cardguard::luhn::passes;
///
/// assert!(passes("4539578763621486"));
/// assert!(!passes("4539578763621487"));
/// ```
#[inline]
pub fn passes(number: &str) -> bool {
    checksum(number) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10).
pub fn checksum(number: &str) -> u32 {
    let mut sum: u32 = 0;
    let mut double = false;

    for c in number.chars().rev() {
        if let Some(digit) = c.to_digit(10) {
            sum += if double {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit
            };
            double = !double;
        }
    }

    sum
}

/// Computes the check digit that completes `partial`.
///
/// Appending the returned digit to `partial` yields a number that passes
/// [`passes`].
///
/// # Example
///
/// ```
/// use cardguard::luhn::check_digit;
///
/// assert_eq!(check_digit("453957876362148"), 6);
/// ```
pub fn check_digit(partial: &str) -> u8 {
    // The appended digit sits at the undoubled position, so the rightmost
    // digit of `partial` is doubled.
    let mut sum: u32 = 0;
    let mut double = true;

    for c in partial.chars().rev() {
        if let Some(digit) = c.to_digit(10) {
            sum += if double {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit
            };
            double = !double;
        }
    }

    ((10 - (sum % 10)) % 10) as u8
}
