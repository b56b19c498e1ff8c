use daedalus_engine::{EngineError, LiteralDigits, Signedness, decode_literal, decode_literal_canonical, encode_literal, is_canonical};
use num_bigint::BigInt;

fn round_trip(value: &BigInt, signedness: Signedness) -> BigInt {
    decode_literal(&encode_literal(value, signedness), signedness).unwrap()
}

#[test]
fn zero_is_a_single_digit() {
    assert_eq!(encode_literal(&BigInt::from(0), Signedness::Signed).raw_digits(), vec![0]);
    assert_eq!(encode_literal(&BigInt::from(5), Signedness::Unsigned).raw_digits(), vec![5]);
}

#[test]
fn non_negative_round_trip() {
    for v in (0..2000).chain([16_434_824, i64::MAX]) {
        let value = BigInt::from(v);
        assert_eq!(round_trip(&value, Signedness::Signed), value);
        assert_eq!(round_trip(&value, Signedness::Unsigned), value);
    }
}

#[test]
fn negative_round_trip() {
    for v in (-2000..0).chain([-16_434_824, i64::MIN]) {
        let value = BigInt::from(v);
        assert_eq!(round_trip(&value, Signedness::Signed), value);
        assert!(encode_literal(&value, Signedness::Unsigned).is_empty());
    }
}

#[test]
fn arbitrary_precision() {
    let huge: BigInt = "-123456789012345678901234567890123456789".parse().unwrap();
    assert_eq!(round_trip(&huge, Signedness::Signed), huge);
    let huge = -huge;
    assert_eq!(round_trip(&huge, Signedness::Unsigned), huge);
    assert_eq!(round_trip(&huge, Signedness::Signed), huge);
}

#[test]
fn sixteen_million() {
    let value = BigInt::from(16_434_824);
    let digits = encode_literal(&value, Signedness::Signed);
    // 16434824 = 0o76543210, top digit has the sign bit so a zero is added
    assert_eq!(digits.to_string(), "076543210");
    assert_eq!(decode_literal(&digits, Signedness::Signed).unwrap(), value);
}

#[test]
fn minus_one_has_sign_bit() {
    let digits = encode_literal(&BigInt::from(-1), Signedness::Signed);
    let top = digits.digits().last().unwrap().value();
    assert!(top >= 4);
    assert_eq!(decode_literal(&digits, Signedness::Signed).unwrap(), BigInt::from(-1));
}

#[test]
fn encoded_negative_values_have_sign_bit() {
    for v in -600..0 {
        let digits = encode_literal(&BigInt::from(v), Signedness::Signed);
        assert!(digits.digits().last().unwrap().value() >= 4, "{v} encoded as {digits}");
    }
}

#[test]
fn encoded_sequences_are_canonical() {
    for v in -600..600 {
        let value = BigInt::from(v);
        for signedness in [Signedness::Signed, Signedness::Unsigned] {
            let digits = encode_literal(&value, signedness);
            if digits.is_empty() {
                continue;
            }
            assert!(is_canonical(&digits, signedness), "{v} {signedness:?}");
            assert_eq!(encode_literal(&decode_literal(&digits, signedness).unwrap(), signedness), digits);
        }
    }
}

#[test]
fn permissive_decode_accepts_padding() {
    let padded: LiteralDigits = "0005".parse().unwrap();
    assert_eq!(decode_literal(&padded, Signedness::Unsigned).unwrap(), BigInt::from(5));
    assert_eq!(decode_literal(&padded, Signedness::Signed).unwrap(), BigInt::from(5));
    assert!(!is_canonical(&padded, Signedness::Unsigned));
    assert!(matches!(
        decode_literal_canonical(&padded, Signedness::Unsigned),
        Err(EngineError::NonCanonicalLiteral { .. })
    ));

    // sign extended -1
    let wide: LiteralDigits = "777".parse().unwrap();
    assert_eq!(decode_literal(&wide, Signedness::Signed).unwrap(), BigInt::from(-1));
    assert_eq!(decode_literal(&wide, Signedness::Unsigned).unwrap(), BigInt::from(511));
    assert!(!is_canonical(&wide, Signedness::Signed));
    assert!(is_canonical(&wide, Signedness::Unsigned));
}

#[test]
fn empty_sequence_is_no_literal() {
    let empty = LiteralDigits::default();
    assert!(matches!(decode_literal(&empty, Signedness::Signed), Err(EngineError::EmptyLiteral)));
    assert!(!is_canonical(&empty, Signedness::Unsigned));
}
