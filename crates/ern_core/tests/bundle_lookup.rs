use ern_core::{Bundle, BundleValue, LatLong, Parcelable, PriceEstimate};

#[test]
fn to_bundle_stores_value_under_fixed_key() {
    let value = LatLong::builder(42).lon(-71).build();
    let bundle = value.to_bundle();

    assert_eq!(bundle.keys(), vec!["latLong"]);
    assert_eq!(LatLong::from_bundle(Some(&bundle)), Some(value));
}

#[test]
fn from_bundle_returns_none_for_absent_bundle() {
    assert_eq!(LatLong::from_bundle(None), None);
}

#[test]
fn from_bundle_returns_none_for_missing_key() {
    let mut bundle = Bundle::new();
    bundle.put_int("lat", 42);

    assert_eq!(LatLong::from_bundle(Some(&bundle)), None);
}

#[test]
fn from_bundle_returns_none_for_non_parcelable_entry() {
    let mut bundle = Bundle::new();
    bundle.put_string("latLong", "42,-71");

    assert_eq!(LatLong::from_bundle(Some(&bundle)), None);
}

#[test]
fn from_bundle_returns_none_for_other_parcelable_type() {
    let estimate = PriceEstimate::builder("uberX", "USD").build();
    let mut bundle = Bundle::new();
    bundle
        .put_parcelable(LatLong::BUNDLE_KEY, &estimate)
        .expect("encode estimate");

    assert_eq!(LatLong::from_bundle(Some(&bundle)), None);
}

#[test]
fn from_bundle_returns_none_for_corrupt_blob() {
    let mut bundle = Bundle::new();
    bundle.put(
        LatLong::BUNDLE_KEY,
        BundleValue::Parcelable {
            type_name: LatLong::TYPE_NAME,
            blob: vec![1, 2],
        },
    );

    assert_eq!(LatLong::from_bundle(Some(&bundle)), None);
}

#[test]
fn from_bundle_returns_none_for_oversized_length_prefix() {
    for prefix in [1_u64 << 40, u64::MAX - 1] {
        let mut bundle = Bundle::new();
        bundle.put(
            PriceEstimate::BUNDLE_KEY,
            BundleValue::Parcelable {
                type_name: PriceEstimate::TYPE_NAME,
                blob: prefix.to_le_bytes().to_vec(),
            },
        );

        assert_eq!(PriceEstimate::from_bundle(Some(&bundle)), None);
    }
}

#[test]
fn one_bundle_can_carry_several_models() {
    let location = LatLong::builder(37).lon(-122).build();
    let estimate = PriceEstimate::builder("uberX", "USD")
        .estimate(Some("$10"))
        .build();

    let mut bundle = location.to_bundle();
    bundle
        .put_parcelable(PriceEstimate::BUNDLE_KEY, &estimate)
        .unwrap();

    assert_eq!(LatLong::from_bundle(Some(&bundle)), Some(location));
    assert_eq!(PriceEstimate::from_bundle(Some(&bundle)), Some(estimate));
}
