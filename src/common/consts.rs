//! Standard numeral systems.

use crate::radix::RadixBase;
use lazy_static::lazy_static;

lazy_static! {
    /// Base 60 on every position.
    pub static ref SEXAGESIMAL: RadixBase =
        RadixBase::build(&[60], &[60], "sexagesimal", None).expect("Sexagesimal base defined");

    /// Degrees counted in signs of 30 and revolutions of 12 signs, sexagesimal fractions.
    pub static ref HISTORICAL: RadixBase =
        RadixBase::build(&[10, 12, 30], &[60], "historical", Some(&["", "r ", "s "]))
            .expect("Historical base defined");

    /// Decimal integers with centesimal fractions.
    pub static ref HISTORICAL_DECIMAL: RadixBase =
        RadixBase::build(&[10], &[100], "historical_decimal", None)
            .expect("Historical decimal base defined");

    /// Decimal integers with sexagesimal fractions.
    pub static ref INTEGER_AND_SEXAGESIMAL: RadixBase =
        RadixBase::build(&[10], &[60], "integer_and_sexagesimal", None)
            .expect("Integer and sexagesimal base defined");

    /// Days, hours, then sexagesimal fractions of an hour.
    pub static ref TEMPORAL: RadixBase =
        RadixBase::build(&[10], &[24, 60], "temporal", None).expect("Temporal base defined");
}

/// Bases present in the registry from the start.
pub(crate) fn standard_bases() -> [RadixBase; 5] {
    [
        SEXAGESIMAL.clone(),
        HISTORICAL.clone(),
        HISTORICAL_DECIMAL.clone(),
        INTEGER_AND_SEXAGESIMAL.clone(),
        TEMPORAL.clone(),
    ]
}
