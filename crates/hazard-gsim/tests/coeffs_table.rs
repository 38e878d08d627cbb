use std::collections::BTreeMap;

use hazard_core::{HazardError, Imt};
use hazard_gsim::{Coeffs, CoeffsTable};
use serde_json::json;

const TABLE: &str = "
    IMT    a     b     c
    pgv    0.1   0.2   0.3
    pga    0.4   0.5   0.6
    0.1    1.0   2.0   3.0
    1.0    4.0   5.0   6.0
    10.0   7.0   8.0   9.0
";

fn coeffs(values: [f64; 3]) -> Coeffs {
    ["a", "b", "c"].into_iter().zip(values).collect()
}

#[test]
fn text_rows_are_partitioned() {
    let table = CoeffsTable::from_text(5.0, TABLE).unwrap();
    assert_eq!(table.sa_damping(), 5.0);
    assert_eq!(
        table.non_sa_coeffs().keys().collect::<Vec<_>>(),
        [&Imt::Pga, &Imt::Pgv]
    );
    assert_eq!(
        table.sa_coeffs().keys().collect::<Vec<_>>(),
        [&Imt::sa(0.1), &Imt::sa(1.0), &Imt::sa(10.0)]
    );
    assert_eq!(table.get(&Imt::Pgv).unwrap(), coeffs([0.1, 0.2, 0.3]));
    assert_eq!(table.get(&Imt::sa(1.0)).unwrap(), coeffs([4.0, 5.0, 6.0]));
}

#[test]
fn text_and_mapping_agree() {
    let mapping: BTreeMap<Imt, Coeffs> = [
        (Imt::Pgv, coeffs([0.1, 0.2, 0.3])),
        (Imt::Pga, coeffs([0.4, 0.5, 0.6])),
        (Imt::sa(0.1), coeffs([1.0, 2.0, 3.0])),
        (Imt::sa(1.0), coeffs([4.0, 5.0, 6.0])),
        (Imt::sa(10.0), coeffs([7.0, 8.0, 9.0])),
    ]
    .into_iter()
    .collect();
    assert_eq!(
        CoeffsTable::from_text(5.0, TABLE).unwrap(),
        CoeffsTable::from_mapping(5.0, mapping)
    );
}

#[test]
fn value_inputs() {
    let from_text = CoeffsTable::from_value(5.0, &json!(TABLE)).unwrap();
    assert_eq!(from_text, CoeffsTable::from_text(5.0, TABLE).unwrap());

    let from_object = CoeffsTable::from_value(
        5.0,
        &json!({
            "PGA": {"a": 0.4, "b": 0.5, "c": 0.6},
            "SA(0.1)": {"a": 1.0, "b": 2.0, "c": 3.0}
        }),
    )
    .unwrap();
    assert_eq!(from_object.get(&Imt::Pga).unwrap(), coeffs([0.4, 0.5, 0.6]));
    assert_eq!(from_object.sa_coeffs().len(), 1);
}

#[test]
fn unsupported_value_names_its_type() {
    let err = CoeffsTable::from_value(5.0, &json!(5)).unwrap_err();
    assert!(matches!(err, HazardError::Type(_)));
    assert_eq!(
        err.message(),
        "CoeffsTable cannot be constructed with inputs of the form 'int'"
    );

    let err = CoeffsTable::from_value(5.0, &json!([1, 2])).unwrap_err();
    assert!(err.message().ends_with("'list'"));

    let err = CoeffsTable::from_value(5.0, &json!(null)).unwrap_err();
    assert!(err.message().ends_with("'NoneType'"));
}

#[test]
fn value_keys_follow_table_damping() {
    let text = CoeffsTable::from_text(10.0, TABLE).unwrap();
    let object = CoeffsTable::from_value(
        10.0,
        &json!({
            "pgv": {"a": 0.1, "b": 0.2, "c": 0.3},
            "pga": {"a": 0.4, "b": 0.5, "c": 0.6},
            "sa(0.1)": {"a": 1.0, "b": 2.0, "c": 3.0},
            "SA(1.0)": {"a": 4.0, "b": 5.0, "c": 6.0},
            "SA(10.0)": {"a": 7.0, "b": 8.0, "c": 9.0}
        }),
    )
    .unwrap();
    assert_eq!(object, text);
    assert_eq!(
        object.get(&Imt::sa_damped(0.1, 10.0)).unwrap(),
        coeffs([1.0, 2.0, 3.0])
    );

    let explicit = CoeffsTable::from_value(10.0, &json!({"SA(0.1, 5)": {"a": 1.0}})).unwrap();
    assert_eq!(
        explicit.sa_coeffs().keys().collect::<Vec<_>>(),
        [&Imt::sa_damped(0.1, 5.0)]
    );
}

#[test]
fn sa_between_rows_is_log_interpolated() {
    let table = CoeffsTable::from_text(5.0, TABLE).unwrap();
    let mid = table.get(&Imt::sa(10f64.sqrt())).unwrap();
    for (name, expected) in [("a", 5.5), ("b", 6.5), ("c", 7.5)] {
        assert!((mid.get(name).unwrap() - expected).abs() < 1e-12);
    }

    let quarter = table.get(&Imt::sa(0.1f64.powf(0.75))).unwrap();
    assert!((quarter.get("a").unwrap() - 1.75).abs() < 1e-12);
}

#[test]
fn lookups_outside_the_table_fail() {
    let table = CoeffsTable::from_text(5.0, TABLE).unwrap();
    for imt in [Imt::sa(0.01), Imt::sa(20.0), Imt::Mmi, Imt::sa_damped(1.0, 10.0)] {
        let err = table.get(&imt).unwrap_err();
        assert!(matches!(err, HazardError::Lookup(_)), "{imt}");
        assert_eq!(err.info().code, "coeffs-unknown-imt");
    }
}

#[test]
fn zero_period_row_is_not_an_interpolation_anchor() {
    let table = CoeffsTable::from_text(5.0, "imt a\npga 1\n0.0 2\n0.1 3\n").unwrap();
    assert_eq!(table.get(&Imt::sa(0.0)).unwrap().get("a").unwrap(), 2.0);
    assert_eq!(table.get(&Imt::sa(0.1)).unwrap().get("a").unwrap(), 3.0);

    let err = table.get(&Imt::sa(0.05)).unwrap_err();
    assert_eq!(err.info().code, "coeffs-unknown-imt");
}

#[test]
fn missing_coefficient_name() {
    let table = CoeffsTable::from_text(5.0, TABLE).unwrap();
    let err = table.get(&Imt::Pga).unwrap().get("d").unwrap_err();
    assert_eq!(err.info().code, "coeff-missing");
}

#[test]
fn malformed_text() {
    let cases = [
        ("", "coeffs-empty"),
        ("period a b\n0.1 1 2", "coeffs-header"),
        ("imt a b\n0.1 1 x", "coeffs-value"),
        ("imt a b\n0.1 1", "coeffs-row-width"),
        ("imt a b\nfoo 1 2", "coeffs-imt"),
    ];
    for (text, code) in cases {
        let err = CoeffsTable::from_text(5.0, text).unwrap_err();
        assert!(matches!(err, HazardError::Parse(_)), "{text:?}");
        assert_eq!(err.info().code, code, "{text:?}");
    }
}
