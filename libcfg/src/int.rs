//! Signed decimal integer parsing for value payloads.

use num_traits::{WrappingAdd, WrappingMul, WrappingNeg, Zero};

use crate::error::ParseIntError;

/// Parse an optionally signed decimal integer from `span`.
///
/// Leading spaces are skipped, then a single `+` or `-` is accepted. Digits
/// are read until a space or the end of the span; whatever follows a space
/// is ignored. Any other byte is an error, as is a span without digits.
/// Values that do not fit in `T` wrap around.
///
/// ```
/// use libcfg::parse_int;
///
/// assert_eq!(parse_int::<i32>(b"   -123 "), Ok(-123));
/// assert!(parse_int::<i32>(b"12a").is_err());
/// ```
pub fn parse_int<T>(span: &[u8]) -> Result<T, ParseIntError>
where
    T: Copy + Zero + From<i8> + WrappingAdd + WrappingMul + WrappingNeg,
{
    let mut pos = span.iter().take_while(|&&b| b == b' ').count();

    let negative = match span.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let ten = T::from(10i8);
    let mut value = T::zero();
    let mut digits = 0;
    for (offset, &b) in span[pos..].iter().enumerate() {
        match b {
            b' ' => break,
            b'0'..=b'9' => {
                // `b - b'0'` is a single digit, so the cast is lossless.
                let digit = T::from((b - b'0') as i8);
                value = value.wrapping_mul(&ten).wrapping_add(&digit);
                digits += 1;
            }
            _ => {
                return Err(ParseIntError::InvalidDigit {
                    byte: b,
                    position: pos + offset,
                })
            }
        }
    }

    if digits == 0 {
        return Err(ParseIntError::Empty);
    }
    Ok(if negative { value.wrapping_neg() } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<i32>(b"   -123 "), Ok(-123));
        assert_eq!(parse_int::<i32>(b"42"), Ok(42));
        assert_eq!(parse_int::<i32>(b"+7"), Ok(7));
        assert_eq!(parse_int::<i64>(b"0"), Ok(0));
        assert_eq!(parse_int::<i32>(b" 12 trailing"), Ok(12));
    }

    #[test]
    fn test_invalid_digit() {
        assert_eq!(
            parse_int::<i32>(b"12a"),
            Err(ParseIntError::InvalidDigit {
                byte: b'a',
                position: 2
            })
        );
        assert_eq!(
            parse_int::<i32>(b"--1"),
            Err(ParseIntError::InvalidDigit {
                byte: b'-',
                position: 1
            })
        );
        assert!(parse_int::<i32>(b"1\t").is_err());
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(parse_int::<i32>(b""), Err(ParseIntError::Empty));
        assert_eq!(parse_int::<i32>(b"    "), Err(ParseIntError::Empty));
        assert_eq!(parse_int::<i32>(b"-"), Err(ParseIntError::Empty));
        assert_eq!(parse_int::<i32>(b"- 5"), Err(ParseIntError::Empty));
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(parse_int::<i8>(b"127"), Ok(127));
        assert_eq!(parse_int::<i8>(b"128"), Ok(-128));
        assert_eq!(parse_int::<i8>(b"-128"), Ok(-128));
        assert!(parse_int::<i32>(b"99999999999999999999").is_ok());
    }

    #[test]
    fn test_split_array_elements() {
        let parsed: Vec<_> = crate::split::split(b"0,1,,2, 3, 5,12", b',')
            .map(parse_int::<i32>)
            .collect();
        assert_eq!(
            parsed,
            vec![
                Ok(0),
                Ok(1),
                Err(ParseIntError::Empty),
                Ok(2),
                Ok(3),
                Ok(5),
                Ok(12)
            ]
        );
    }
}
