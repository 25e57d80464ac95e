use rstest::rstest;
use serde_json::{Value, json};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tmplfill_core::vars::{CoercionError, TypeTag, coerce, infer};

#[rstest]
#[case("42", TypeTag::Int, json!(42))]
#[case(" -7 ", TypeTag::Int, json!(-7))]
#[case("Y", TypeTag::Bool, json!(true))]
#[case("On", TypeTag::Bool, json!(true))]
#[case("TRUE", TypeTag::Bool, json!(true))]
#[case("maybe", TypeTag::Bool, json!(false))]
#[case("0", TypeTag::Bool, json!(false))]
#[case("", TypeTag::Bool, json!(false))]
#[case("10.0.0.1", TypeTag::Ip, json!("10.0.0.1"))]
#[case("::1", TypeTag::Ip, json!("::1"))]
#[case("10.0.0.0/8", TypeTag::Cidr, json!("10.0.0.0/8"))]
#[case("a, b,,c", TypeTag::List, json!(["a", "b", "c"]))]
#[case("1.1.1.1,8.8.8.8", TypeTag::parse("list-of-ip"), json!(["1.1.1.1", "8.8.8.8"]))]
#[case("anything", TypeTag::parse("hostname"), json!("anything"))]
fn coerce_by_declared_type(#[case] raw: &str, #[case] tag: TypeTag, #[case] expected: Value) {
    assert_eq!(coerce(raw, &tag).unwrap(), expected);
}

#[rstest]
#[case("x", TypeTag::Int)]
#[case("1.5", TypeTag::Int)]
#[case("300.1.1.1", TypeTag::Ip)]
#[case("10.0.0.1/8", TypeTag::Cidr)]
#[case("10.0.0.0/33", TypeTag::Cidr)]
fn coerce_rejects_bad_input(#[case] raw: &str, #[case] tag: TypeTag) {
    assert!(coerce(raw, &tag).is_err());
}

// Typed value -> its text form -> coerce gives the same value back.

#[rstest]
#[case(0)]
#[case(-1)]
#[case(8080)]
#[case(-40_000_000_000)]
#[case(i64::MIN)]
#[case(i64::MAX)]
fn int_round_trips(#[case] n: i64) {
    assert_eq!(coerce(&n.to_string(), &TypeTag::Int), Ok(json!(n)));
}

#[rstest]
#[case(true)]
#[case(false)]
fn bool_round_trips(#[case] b: bool) {
    assert_eq!(coerce(&b.to_string(), &TypeTag::Bool), Ok(json!(b)));
}

#[rstest]
#[case(IpAddr::V4(Ipv4Addr::LOCALHOST))]
#[case(IpAddr::V4(Ipv4Addr::BROADCAST))]
#[case(IpAddr::V4(Ipv4Addr::new(192, 168, 10, 7)))]
#[case(IpAddr::V6(Ipv6Addr::UNSPECIFIED))]
#[case(IpAddr::V6(Ipv6Addr::LOCALHOST))]
#[case(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 1)))]
#[case(IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0x1ff, 0xfe23, 0x4567, 0x890a)))]
#[case(IpAddr::V6(Ipv4Addr::new(10, 0, 0, 1).to_ipv6_mapped()))]
fn ip_round_trips(#[case] addr: IpAddr) {
    let text = addr.to_string();
    assert_eq!(coerce(&text, &TypeTag::Ip), Ok(Value::String(text)));
}

#[rstest]
#[case(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)]
#[case(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)), 8)]
#[case(IpAddr::V4(Ipv4Addr::new(172, 16, 0, 0)), 12)]
#[case(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 128)), 25)]
#[case(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 7)), 32)]
#[case(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)]
#[case(IpAddr::V6(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0)), 32)]
#[case(IpAddr::V6(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0)), 10)]
#[case(IpAddr::V6(Ipv6Addr::LOCALHOST), 128)]
fn cidr_round_trips(#[case] network: IpAddr, #[case] prefix: u8) {
    let text = format!("{network}/{prefix}");
    assert_eq!(coerce(&text, &TypeTag::Cidr), Ok(Value::String(text)));
}

#[rstest]
#[case(vec!["a"])]
#[case(vec!["web01", "web02", "db"])]
#[case(vec!["10.0.0.1", "10.0.0.2"])]
#[case(vec!["x y", "z"])]
fn list_round_trips(#[case] items: Vec<&str>) {
    assert_eq!(coerce(&items.join(","), &TypeTag::List), Ok(json!(items)));
}

#[rstest]
#[case("", None)]
#[case("   ", None)]
#[case("yes", Some(json!(true)))]
#[case("Off", Some(json!(false)))]
#[case("22", Some(json!(22)))]
#[case("2.5", Some(json!(2.5)))]
#[case("1,2", Some(json!(["1", "2"])))]
#[case("[1]", Some(json!([1])))]
#[case(r#"{"a": 1}"#, Some(json!({"a": 1})))]
#[case("[not json", Some(json!("[not json")))]
#[case(":list x", Some(json!(["x"])))]
#[case(":dict a=1 b=two", Some(json!({"a": "1", "b": "two"})))]
#[case(":json [true]", Some(json!([true])))]
#[case("example.com", Some(json!("example.com")))]
fn infer_follows_rule_order(#[case] raw: &str, #[case] expected: Option<Value>) {
    assert_eq!(infer(raw).unwrap(), expected);
}

#[test]
fn forced_prefix_errors_propagate() {
    assert!(matches!(infer(":json {oops"), Err(CoercionError::InvalidJson(_))));
    assert!(matches!(infer(":dict novalue"), Err(CoercionError::InvalidDict(_))));
}

#[test]
fn coercion_error_messages() {
    insta::assert_snapshot!(coerce("abc", &TypeTag::Int).unwrap_err(), @"invalid integer: 'abc'");
    insta::assert_snapshot!(
        coerce("999.1.1.1", &TypeTag::Ip).unwrap_err(),
        @"invalid IP address: '999.1.1.1'"
    );
}
