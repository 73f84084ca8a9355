//! This test suite compares the arithmetic of radix-real with exact rational arithmetic.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use radix_real::{BasedReal, PrecisionMode, RadixBase, Scope, HISTORICAL, SEXAGESIMAL, TEMPORAL};
use rand::random;

macro_rules! test_radix_op {
    ($n1:ident, $n2:ident, $op:ident, $rop:tt, $eps:ident, $op_name:literal) => {
        let n3 = BasedReal::$op(&($n1), &($n2)).unwrap();
        let f3 = ($n1).to_fraction() $rop ($n2).to_fraction();
        assert_close(&n3, &f3, &$eps, $op_name);
    };
}

fn assert_close(n: &BasedReal, f: &BigRational, eps: &BigRational, op_name: &str) {
    let one = BigRational::from_integer(BigInt::from(1));
    let scale = if f.abs() > one { f.abs() } else { one };
    let diff = (n.to_fraction() - f).abs();
    assert!(
        diff <= eps * scale,
        "{}: got {:?}, expected {}, difference {}",
        op_name,
        n,
        f,
        diff
    );
}

fn compare(base: &RadixBase, run_cnt: usize) {
    // products in mixed bases go through f64
    let eps = if base.is_mixed() {
        BigRational::new(BigInt::from(1), BigInt::from(10).pow(5))
    } else {
        BigRational::new(BigInt::from(1), BigInt::from(10).pow(12))
    };

    for _ in 0..run_cnt {
        let int1 = random::<usize>() % 4 + 1;
        let int2 = random::<usize>() % 4 + 1;
        let sig1 = random::<usize>() % 6;
        let sig2 = random::<usize>() % 6;

        let n1 = BasedReal::random(base, int1, sig1);
        let mut n2 = BasedReal::random(base, int2, sig2);

        test_radix_op!(n1, n2, try_add, +, eps, "add");
        test_radix_op!(n1, n2, try_sub, -, eps, "sub");
        test_radix_op!(n1, n2, try_mul, *, eps, "mul");

        if n2.is_zero() {
            n2 = BasedReal::one(base, sig2);
        }
        test_radix_op!(n1, n2, try_div, /, eps, "div");

        let (q, m) = n1.div_rem(&n2).unwrap();
        let (f1, f2) = (n1.to_fraction(), n2.to_fraction());
        assert_eq!(q.to_fraction(), (&f1 / &f2).floor());
        assert_close(&m, &(&f1 - (&f1 / &f2).floor() * &f2), &eps, "modulo");
        assert!(m.to_fraction().is_zero() || m.is_negative() == n2.is_negative());
    }
}

#[test]
fn rational_compare() {
    let run_cnt = 1000;

    for base in [&*SEXAGESIMAL, &*HISTORICAL, &*TEMPORAL] {
        compare(base, run_cnt);
        Scope::new().pmode(PrecisionMode::Max).run(|| compare(base, run_cnt / 10));
    }
}

#[test]
fn fixed_precision_compare() {
    let run_cnt = 1000;

    for p in 0..6usize {
        let eps = BigRational::new(BigInt::from(1), BigInt::from(60).pow(p as u32));

        Scope::new().pmode(PrecisionMode::Fixed(p)).run(|| {
            for _ in 0..run_cnt / 6 {
                let n1 = BasedReal::random(&SEXAGESIMAL, 2, 4);
                let n2 = BasedReal::random(&SEXAGESIMAL, 2, 4);

                let n3 = &n1 + &n2;
                assert_eq!(n3.significant(), p);
                assert_close(&n3, &(n1.to_fraction() + n2.to_fraction()), &eps, "fixed add");

                let n3 = &n1 * &n2;
                assert_eq!(n3.significant(), p);
                assert_close(&n3, &(n1.to_fraction() * n2.to_fraction()), &eps, "fixed mul");
            }
        });
    }
}
