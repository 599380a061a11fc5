use slot_json::{
    error::AccessError,
    from_text,
    value::{Kind, Object, Slot, Value},
};

#[test]
fn auto_vivification_from_null() {
    let mut v = Value::Null;
    v["a"][0] = Value::Integer(1);

    assert!(v.is_object());
    assert_eq!(v.len(), 1);
    assert!(v["a"].is_array());
    assert_eq!(v["a"].len(), 1);
    assert_eq!(v["a"][0], Value::Integer(1));
}

#[test]
fn array_growth_pads_with_null() {
    let mut v = Value::array();
    v[5] = Value::from("five");

    let array = v.as_array().unwrap();

    assert_eq!(array.len(), 6);
    assert!(array[..5].iter().all(|slot| slot.get() == Some(&Value::Null)));
    assert_eq!(v[5].as_str(), Some("five"));
}

#[test]
fn path_access_reports_mismatch() {
    let mut v = Value::from(true);

    assert_eq!(
        v.at("a"),
        Err(AccessError::TypeMismatch {
            expected: Kind::Object,
            found: Kind::Bool,
        })
    );
    assert_eq!(v, Value::Bool(true));
}

#[test]
#[should_panic(expected = "type mismatch: expected array, found object")]
fn index_mut_panics_on_wrong_container() {
    let mut v = Value::object();
    v[0] = Value::Null;
}

#[test]
#[should_panic(expected = "key not found")]
fn index_panics_on_missing_key() {
    let v = Value::object();
    let _ = &v["missing"];
}

#[test]
fn get_distinguishes_missing_from_mismatch() {
    let v = from_text(r#"{"list": [1]}"#).unwrap();

    assert_eq!(
        v.get("other"),
        Err(AccessError::KeyNotFound("other".into()))
    );
    assert_eq!(
        v["list"].get(3),
        Err(AccessError::IndexOutOfRange { index: 3, len: 1 })
    );
    assert!(matches!(
        v["list"].get("x"),
        Err(AccessError::TypeMismatch { .. })
    ));
    assert_eq!(v["list"].get(0), Ok(&Value::Integer(1)));
}

#[test]
fn find_never_fails() {
    let v = from_text(r#"{"a": [true]}"#).unwrap();

    assert_eq!(v.find("a").and_then(|a| a.find(0)), Some(&Value::Bool(true)));
    assert_eq!(v.find("b"), None);
    assert_eq!(v.find(0), None);
    assert_eq!(Value::Null.find("a"), None);
}

#[test]
fn typed_accessors() {
    let v = from_text(r#"{"i": 7, "f": 0.5, "s": "x", "b": false}"#).unwrap();

    assert_eq!(v["i"].try_as::<i64>(), Some(7));
    assert_eq!(v["i"].try_as::<i16>(), Some(7));
    assert_eq!(v["i"].try_as::<f64>(), None);
    assert_eq!(v["f"].try_as::<f32>(), Some(0.5));
    assert_eq!(v["f"].try_as::<i32>(), None);
    assert_eq!(v["s"].to::<&str>(), Ok("x"));
    assert_eq!(v["b"].to::<bool>(), Ok(false));
    assert_eq!(
        v["s"].to::<bool>(),
        Err(AccessError::TypeMismatch {
            expected: Kind::Bool,
            found: Kind::String,
        })
    );
    assert_eq!(v.to::<&Object>().map(|o| o.len()), Ok(4));
}

#[test]
fn narrowing_reports_the_target_width() {
    let v = Value::from(70_000);

    assert_eq!(v.try_as::<i16>(), None);
    assert_eq!(
        v.to::<i16>(),
        Err(AccessError::OutOfRange {
            value: 70_000,
            target: "i16",
        })
    );
    assert_eq!(
        v.to::<i16>().unwrap_err().to_string(),
        "integer 70000 does not fit in i16"
    );
    assert_eq!(v.to::<i32>(), Ok(70_000));
    assert!(matches!(
        Value::from(1.5).to::<i16>(),
        Err(AccessError::TypeMismatch { .. })
    ));
}

#[test]
fn scalars_have_no_elements() {
    assert_eq!(Value::from(1).len(), 0);
    assert!(Value::from(1).is_empty());
    assert!(Value::Null.is_empty());
    assert!(!from_text("[null]").unwrap().is_empty());
}

#[test]
fn find_mut_leaves_empty_slots_alone() {
    let mut v = from_text(r#"{"list": [1, 2], "key": true}"#).unwrap();

    v["list"].as_array_mut().unwrap()[0].take();
    v.as_object_mut().unwrap().get_mut("key").unwrap().take();

    assert_eq!(v["list"].find_mut(0), None);
    assert!(v["list"].as_array().unwrap()[0].is_empty());
    assert_eq!(v.find_mut("key"), None);
    assert!(v.as_object().unwrap()["key"].is_empty());

    *v["list"].find_mut(1).unwrap() = Value::from(3);
    assert_eq!(v["list"][1], Value::Integer(3));
}

#[test]
fn predicates() {
    let v = Value::from(1.5);

    assert!(v.is_floating());
    assert!(v.is_number());
    assert!(!v.is_integer());
    assert!(Value::from(1).is_number());
    assert!(Value::from("s").is_string());
    assert!(Value::from(None::<bool>).is_null());
}

#[test]
fn object_equality_ignores_order() {
    let a = from_text(r#"{"a":1,"b":2}"#).unwrap();
    let b = from_text(r#"{"b":2,"a":1}"#).unwrap();

    assert_eq!(a, b);
}

#[test]
fn array_equality_respects_order() {
    let a = from_text("[1,2]").unwrap();
    let b = from_text("[2,1]").unwrap();

    assert_ne!(a, b);
}

#[test]
fn integer_and_float_are_different_kinds() {
    assert_ne!(from_text("1").unwrap(), from_text("1.0").unwrap());
}

#[test]
fn clone_is_independent() {
    let original = from_text(r#"{"nested": {"list": [1, 2, {"deep": null}]}}"#).unwrap();
    let mut copy = original.clone();

    assert_eq!(copy, original);

    copy["nested"]["list"][2]["deep"] = Value::from("changed");
    copy["nested"]["extra"] = Value::from(3);

    assert_ne!(copy, original);
    assert!(original["nested"]["list"][2]["deep"].is_null());
    assert_eq!(original["nested"].find("extra"), None);
}

#[test]
fn take_moves_out() {
    let mut v = from_text(r#"{"a": [1, 2]}"#).unwrap();

    let list = v["a"].take();

    assert_eq!(list, from_text("[1, 2]").unwrap());
    assert!(v["a"].is_null());

    let mut slot = Slot::new(list);
    let moved = slot.take();

    assert!(slot.is_empty());
    assert_eq!(moved.map(|m| m.len()), Some(2));
}

#[test]
fn insert_emplace_and_remove() {
    let mut v = Value::Null;

    assert_eq!(v.insert("list", Value::array()), Ok(None));
    v["list"].emplace(Value::from(1)).unwrap();
    *v["list"].emplace(Value::Null).unwrap() = Value::from(2);

    assert_eq!(v["list"], from_text("[1, 2]").unwrap());
    assert_eq!(
        v.insert("list", Value::from(0)),
        Ok(Some(from_text("[1, 2]").unwrap()))
    );
    assert_eq!(v.remove("list"), Some(Value::Integer(0)));
    assert!(v.is_empty());

    let mut scalar = Value::from(1);
    assert!(scalar.insert("k", Value::Null).is_err());
}

#[test]
fn collect_into_containers() {
    let array: Value = (1..=3).map(Value::from).collect();
    let object: Value = vec![("a", Value::from(1)), ("b", Value::from(true))]
        .into_iter()
        .collect();

    assert_eq!(array, from_text("[1,2,3]").unwrap());
    assert_eq!(object, from_text(r#"{"b":true,"a":1}"#).unwrap());
}

#[test]
fn display_renders_json() {
    let v = from_text(r#"{"a":[1,"two"]}"#).unwrap();

    assert_eq!(v.to_string(), r#"{"a":[1,"two"]}"#);
    assert_eq!(format!("{v:#}"), "{\n  \"a\": [\n    1,\n    \"two\"\n  ]\n}");
}
