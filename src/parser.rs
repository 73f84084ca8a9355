//! Parser reads numbers written as `[-]int_digits ; frac_digits`.

use crate::defs::{Error, Sign};
use crate::num::BasedReal;
use crate::radix::RadixBase;
use rust_decimal::Decimal;

/// Splits the integer part of a literal into digits, most significant first.
/// Digits are read from the right; the separator expected before each digit
/// is the one of its position.
fn integer_tokens<'a>(base: &RadixBase, s: &'a str) -> Vec<&'a str> {
    let mut tokens = Vec::new();
    let mut rest = s.trim();
    let mut pos = 0;

    while !rest.is_empty() {
        let raw_sep = base.separator_at(pos);
        let sep = raw_sep.trim();

        let (head, token) = if !sep.is_empty() {
            rest.rsplit_once(sep).unwrap_or(("", rest))
        } else if !raw_sep.is_empty() {
            rest.rsplit_once(char::is_whitespace).unwrap_or(("", rest))
        } else {
            // no separator: one character per digit
            let at = rest.char_indices().last().map(|(i, _)| i).unwrap_or(0);
            rest.split_at(at)
        };

        tokens.push(token.trim());
        rest = head.trim();
        pos -= 1;
    }

    tokens.reverse();
    tokens
}

fn parse_digit(token: &str) -> Result<i64, Error> {
    if let Ok(d) = token.parse::<i64>() {
        Ok(d)
    } else if let Ok(f) = token.parse::<f64>() {
        Err(Error::IllegalFloat(f))
    } else {
        Err(Error::InvalidDigit(token.to_owned()))
    }
}

impl BasedReal {
    /// Parses a number written in `base`.
    /// The integer part is separated from the fractional part with `;`, fractional digits with `,`,
    /// and integer digits with the separators of `base`. Whitespace around digits is ignored.
    ///
    /// ## Errors
    ///
    ///  - EmptyString: the string contains only whitespace.
    ///  - TooManySeparators: more than one `;` was found.
    ///  - InvalidDigit: a digit can not be read as an integer.
    ///  - IllegalFloat: a digit is a non integer value.
    ///  - IllegalBaseValue: a digit is out of the range of its position.
    pub fn parse(base: &RadixBase, s: &str) -> Result<BasedReal, Error> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            return Err(Error::EmptyString);
        }

        let (sign, s) = match s.strip_prefix('-') {
            Some(rest) => (Sign::Neg, rest),
            None => (Sign::Pos, s.as_str()),
        };

        let parts: Vec<&str> = s.split(';').collect();
        if parts.len() > 2 {
            return Err(Error::TooManySeparators(parts.len() - 1));
        }

        let left = integer_tokens(base, parts[0])
            .into_iter()
            .map(parse_digit)
            .collect::<Result<Vec<i64>, Error>>()?;

        let right = match parts.get(1).map(|p| p.trim()) {
            Some(p) if !p.is_empty() => p
                .split(',')
                .map(|t| parse_digit(t.trim()))
                .collect::<Result<Vec<i64>, Error>>()?,
            _ => Vec::new(),
        };

        BasedReal::new(base, &left, &right, sign, Decimal::ZERO)
    }
}

impl RadixBase {
    /// Parses a number written in this base, see `BasedReal::parse`.
    pub fn parse(&self, s: &str) -> Result<BasedReal, Error> {
        BasedReal::parse(self, s)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::common::consts::{HISTORICAL, INTEGER_AND_SEXAGESIMAL, SEXAGESIMAL, TEMPORAL};

    #[test]
    fn test_parser() {
        let n = BasedReal::parse(&SEXAGESIMAL, "-1, 2, 31; 6").unwrap();
        assert_eq!(n.left(), &[1, 2, 31]);
        assert_eq!(n.right(), &[6]);
        assert_eq!(n.sign(), Sign::Neg);

        let n = BasedReal::parse(&SEXAGESIMAL, "  12;  ").unwrap();
        assert_eq!(n.left(), &[12]);
        assert_eq!(n.significant(), 0);

        let n = BasedReal::parse(&SEXAGESIMAL, "0 ; 0, 0, 30").unwrap();
        assert_eq!(n.left(), &[0]);
        assert_eq!(n.right(), &[0, 0, 30]);

        let n = SEXAGESIMAL.parse("1,0,1").unwrap();
        assert_eq!(n.left(), &[1, 0, 1]);

        // positions without separator hold one character each
        let n = BasedReal::parse(&INTEGER_AND_SEXAGESIMAL, "125;15").unwrap();
        assert_eq!(n.left(), &[1, 2, 5]);
        assert_eq!(n.right(), &[15]);

        let n = BasedReal::parse(&HISTORICAL, "2r 7s 29; 45, 2").unwrap();
        assert_eq!(n.left(), &[2, 7, 29]);
        assert_eq!(n.right(), &[45, 2]);
        let n = BasedReal::parse(&HISTORICAL, "1 2R 7S 29;").unwrap();
        assert_eq!(n.left(), &[1, 2, 7, 29]);

        let n = BasedReal::parse(&TEMPORAL, "3;23,59").unwrap();
        assert_eq!(n.right(), &[23, 59]);
    }

    #[test]
    fn test_parser_custom_separators() {
        let b = RadixBase::new(&[20, 5, 18], &[24, 60], "parser_test_base", Some(&[" ", "u ", "sep "]))
            .unwrap();
        let n = b.parse("8 12u 3sep 1 ; 23,31").unwrap();
        assert_eq!(n.left(), &[8, 12, 3, 1]);
        assert_eq!(n.right(), &[23, 31]);
    }

    #[test]
    fn test_parser_errors() {
        assert_eq!(BasedReal::parse(&SEXAGESIMAL, "   "), Err(Error::EmptyString));
        assert_eq!(BasedReal::parse(&SEXAGESIMAL, "1;2;3"), Err(Error::TooManySeparators(2)));
        assert_eq!(BasedReal::parse(&SEXAGESIMAL, "1;2.5"), Err(Error::IllegalFloat(2.5)));
        assert_eq!(
            BasedReal::parse(&SEXAGESIMAL, "1;a"),
            Err(Error::InvalidDigit("a".into()))
        );
        assert!(matches!(
            BasedReal::parse(&SEXAGESIMAL, "1;60"),
            Err(Error::IllegalBaseValue { radix: 60, digit: 60, .. })
        ));
        assert!(matches!(
            BasedReal::parse(&HISTORICAL, "12s 0"),
            Err(Error::IllegalBaseValue { radix: 12, digit: 12, .. })
        ));
    }
}
