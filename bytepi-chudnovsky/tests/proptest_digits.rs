use bytepi_chudnovsky::{compute_pi, PiConfig};
use proptest::prelude::*;

const PI_200: &str = "31415926535897932384626433832795028841971693993751\
05820974944592307816406286208998628034825342117067\
98214808651328230664709384460955058223172535940812\
84811174502841027019385211055596446229489549303819";

// Property 1: any digit count yields a prefix of pi
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn prop_digits_are_prefix_of_pi(digits in 1usize..=200) {
        let out = compute_pi(&PiConfig::new(digits)).unwrap();
        prop_assert_eq!(out.len(), digits);
        prop_assert_eq!(&out[..], &PI_200[..digits]);
    }
}

// Property 2: guard digits do not change the emitted prefix
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]
    #[test]
    fn prop_guard_digits_stable(digits in 1usize..=120, guard in 5usize..40) {
        let config = PiConfig::new(digits).with_guard_digits(guard);
        let out = compute_pi(&config).unwrap();
        prop_assert_eq!(&out[..], &PI_200[..digits]);
    }
}
