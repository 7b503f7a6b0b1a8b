use serde::Serialize;
use slysoft_hal::{ResourceValue, Scalar, convert_value, convert_value_with_format};

#[derive(Serialize)]
struct User {
    #[serde(rename = "LastName")]
    last_name: String,
    #[serde(rename = "FirstName")]
    first_name: String,
    age: u32,
}

#[derive(Serialize)]
struct Team {
    name: String,
    members: Vec<User>,
}

fn user(last: &str, first: &str, age: u32) -> User {
    User {
        last_name: last.to_string(),
        first_name: first.to_string(),
        age,
    }
}

#[test]
fn test_none_converts_to_nothing() {
    let value: Option<i32> = None;
    assert!(convert_value(&value).unwrap().is_none());
}

#[test]
fn test_strings_pass_through() {
    let value = convert_value(&"abc").unwrap().unwrap();
    assert_eq!(value, ResourceValue::Scalar(Scalar::String("abc".into())));
}

#[test]
fn test_numbers_keep_their_native_type() {
    assert_eq!(
        convert_value(&5).unwrap().unwrap(),
        ResourceValue::Scalar(Scalar::Int(5))
    );
    assert_eq!(
        convert_value(&2.5).unwrap().unwrap(),
        ResourceValue::Scalar(Scalar::Float(2.5))
    );
    assert_eq!(
        convert_value(&true).unwrap().unwrap(),
        ResourceValue::Scalar(Scalar::Bool(true))
    );
}

#[test]
fn test_object_keys_are_camel_cased() {
    let value = convert_value(&user("Curie", "Marie", 36)).unwrap().unwrap();
    let data = value.as_object().expect("expected object data");

    assert!(data.keys().eq(["lastName", "firstName", "age"]));
    assert_eq!(data.try_str("lastName").unwrap(), "Curie");
    assert_eq!(data.try_i64("age").unwrap(), 36);
}

#[test]
fn test_none_fields_are_omitted() {
    #[derive(Serialize)]
    struct Sparse {
        present: i32,
        absent: Option<i32>,
    }

    let value = convert_value(&Sparse {
        present: 1,
        absent: None,
    })
    .unwrap()
    .unwrap();
    let data = value.as_object().unwrap();
    assert_eq!(data.len(), 1);
    assert!(data.get("absent").is_none());
}

#[test]
fn test_list_of_scalars() {
    let value = convert_value(&vec!["a", "b"]).unwrap().unwrap();
    assert_eq!(
        value,
        ResourceValue::ScalarList(vec![
            Scalar::String("a".into()),
            Scalar::String("b".into())
        ])
    );
}

#[test]
fn test_list_of_objects() {
    let users = vec![user("Curie", "Marie", 36), user("Meitner", "Lise", 59)];
    let value = convert_value(&users).unwrap().unwrap();

    match value {
        ResourceValue::ObjectList(objects) => {
            assert_eq!(objects.len(), 2);
            assert_eq!(objects[1].try_str("lastName").unwrap(), "Meitner");
        }
        other => panic!("expected an object list, got {:?}", other),
    }
}

#[test]
fn test_collection_properties_are_dropped_one_level_deep() {
    let team = Team {
        name: "physics".to_string(),
        members: vec![user("Curie", "Marie", 36)],
    };

    let value = convert_value(&team).unwrap().unwrap();
    let data = value.as_object().unwrap();
    assert_eq!(data.try_str("name").unwrap(), "physics");
    assert!(data.get("members").is_none());
}

#[test]
fn test_list_of_objects_drops_inner_lists() {
    let teams = vec![
        Team {
            name: "physics".to_string(),
            members: vec![user("Curie", "Marie", 36)],
        },
        Team {
            name: "chemistry".to_string(),
            members: vec![],
        },
    ];

    let value = convert_value(&teams).unwrap().unwrap();
    match value {
        ResourceValue::ObjectList(objects) => {
            for object in &objects {
                assert!(object.get("members").is_none());
                assert!(object.get("name").is_some());
            }
        }
        other => panic!("expected an object list, got {:?}", other),
    }
}

#[test]
fn test_nested_objects_still_recurse() {
    #[derive(Serialize)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Serialize)]
    struct Inner {
        city: String,
    }

    let value = convert_value(&Outer {
        inner: Inner {
            city: "Paris".to_string(),
        },
    })
    .unwrap()
    .unwrap();

    let data = value.as_object().unwrap();
    let inner = data.get("inner").and_then(ResourceValue::as_object).unwrap();
    assert_eq!(inner.try_str("city").unwrap(), "Paris");
}

#[test]
fn test_map_converts_like_a_struct() {
    let mut map = std::collections::BTreeMap::new();
    map.insert("LastName", "Curie");
    map.insert("FirstName", "Marie");

    let value = convert_value(&map).unwrap().unwrap();
    let data = value.as_object().unwrap();
    assert_eq!(data.try_str("lastName").unwrap(), "Curie");
    assert_eq!(data.try_str("firstName").unwrap(), "Marie");
}

#[test]
fn test_unit_variants_convert_to_their_name() {
    #[derive(Serialize)]
    enum Status {
        Active,
    }

    let value = convert_value(&Status::Active).unwrap().unwrap();
    assert_eq!(value, ResourceValue::Scalar(Scalar::String("Active".into())));
}

#[test]
fn test_format_wraps_scalars() {
    let value = convert_value_with_format(&5, "0.00").unwrap().unwrap();
    match value {
        ResourceValue::Formatted(f) => {
            assert_eq!(f.text(), "5.00");
            assert!(f.is_numeric());
        }
        other => panic!("expected a formatted value, got {:?}", other),
    }
}

#[test]
fn test_format_is_ignored_for_objects() {
    let value = convert_value_with_format(&user("Curie", "Marie", 36), "0.00")
        .unwrap()
        .unwrap();
    assert!(matches!(value, ResourceValue::Object(_)));
}

#[test]
fn test_case_insensitive_lookup_after_conversion() {
    let value = convert_value(&user("Curie", "Marie", 36)).unwrap().unwrap();
    let data = value.as_object().unwrap();
    assert!(data.get("LastName").is_some());
    assert!(data.get("LASTNAME").is_some());
}
