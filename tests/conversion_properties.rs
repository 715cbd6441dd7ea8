//! Property-based tests for conversion into `ValidationData`

use proptest::prelude::*;
use weir::{ConversionError, ValidationData, ValidationDataRepresentable};

proptest! {
    #[test]
    fn prop_i64_converts_to_int(n in any::<i64>()) {
        prop_assert_eq!(n.make_validation_data(), Ok(ValidationData::Int(n)));
    }

    #[test]
    fn prop_u64_converts_to_uint(n in any::<u64>()) {
        prop_assert_eq!(n.make_validation_data(), Ok(ValidationData::UInt(n)));
    }

    #[test]
    fn prop_f64_converts_to_double(x in any::<f64>()) {
        match x.make_validation_data() {
            Ok(ValidationData::Double(y)) => prop_assert_eq!(y.to_bits(), x.to_bits()),
            other => prop_assert!(false, "expected a double, got {:?}", other),
        }
    }

    #[test]
    fn prop_f32_widens_to_double(x in any::<f32>().prop_filter("finite", |x| x.is_finite())) {
        prop_assert_eq!(x.make_validation_data(), Ok(ValidationData::Double(f64::from(x))));
    }

    #[test]
    fn prop_string_converts_to_string(s in any::<String>()) {
        prop_assert_eq!(s.make_validation_data(), Ok(ValidationData::String(s.clone())));
        prop_assert_eq!(s.as_str().make_validation_data(), Ok(ValidationData::String(s)));
    }

    #[test]
    fn prop_bool_converts_to_bool(b in any::<bool>()) {
        prop_assert_eq!(b.make_validation_data(), Ok(ValidationData::Bool(b)));
    }

    #[test]
    fn prop_usize_converts_to_uint(n in any::<usize>()) {
        prop_assert_eq!(n.make_validation_data(), Ok(ValidationData::UInt(n as u64)));
    }

    #[test]
    fn prop_i128_in_range_converts_to_int(n in any::<i64>()) {
        prop_assert_eq!(i128::from(n).make_validation_data(), Ok(ValidationData::Int(n)));
    }

    #[test]
    fn prop_i128_out_of_range_fails(n in (i128::from(i64::MAX) + 1)..=i128::MAX) {
        let is_out_of_range = matches!(
            n.make_validation_data(),
            Err(ConversionError::OutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
        let is_out_of_range = matches!(
            (-n - 1).make_validation_data(),
            Err(ConversionError::OutOfRange { .. })
        );
        prop_assert!(is_out_of_range);
    }

    #[test]
    fn prop_option_is_null_or_inner(value in proptest::option::of(any::<i32>())) {
        let expected = match value {
            Some(n) => ValidationData::Int(i64::from(n)),
            None => ValidationData::Null,
        };
        prop_assert_eq!(value.make_validation_data(), Ok(expected));
    }

    #[test]
    fn prop_vec_keeps_order(items in proptest::collection::vec(any::<u8>(), 0..16)) {
        let expected = items.iter().map(|b| ValidationData::UInt(u64::from(*b))).collect();
        prop_assert_eq!(items.make_validation_data(), Ok(ValidationData::Array(expected)));
    }
}

#[test]
fn test_integer_extremes() {
    assert_eq!(
        i64::MIN.make_validation_data(),
        Ok(ValidationData::Int(i64::MIN))
    );
    assert_eq!(
        u64::MAX.make_validation_data(),
        Ok(ValidationData::UInt(u64::MAX))
    );
    assert_eq!(
        u128::from(u64::MAX).make_validation_data(),
        Ok(ValidationData::UInt(u64::MAX))
    );
    assert!((u128::from(u64::MAX) + 1).make_validation_data().is_err());
}
