use slysoft_hal::{Embedded, InputItem, Link, Resource, ResourceValue, Scalar, Verb};
use slysoft_hal_serde::error::CodecError;
use slysoft_hal_serde::xml::{from_xml_str, to_xml_string, to_xml_string_pretty};

#[test]
fn test_serialize_simple_resource() {
    let resource = Resource::new()
        .with_uri("/api/user/42")
        .with_data("lastName", "Curie");

    let xml = to_xml_string(&resource).unwrap();
    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <resource rel=\"self\" href=\"/api/user/42\">\
         <lastName>Curie</lastName>\
         </resource>"
    );
}

#[test]
fn test_empty_resource_is_an_empty_element() {
    let xml = to_xml_string(&Resource::new()).unwrap();
    assert!(xml.contains("<resource/>"));
}

#[test]
fn test_uri_becomes_root_attributes() {
    let xml = to_xml_string(&Resource::new().with_uri("/api/user")).unwrap();
    assert!(xml.contains("<resource rel=\"self\" href=\"/api/user\"/>"));

    let parsed = from_xml_str(&xml).unwrap();
    assert_eq!(parsed.uri(), "/api/user");
}

#[test]
fn test_scalars_are_stringified() {
    let resource = Resource::new()
        .with_data("age", 36)
        .with_data("active", true)
        .with_data("score", 2.5);

    let xml = to_xml_string(&resource).unwrap();
    assert!(xml.contains("<age>36</age>"));
    assert!(xml.contains("<active>true</active>"));
    assert!(xml.contains("<score>2.5</score>"));
}

#[test]
fn test_parse_infers_native_types() {
    let xml = r#"<resource><age>36</age><active>true</active><score>2.5</score><name>Curie</name></resource>"#;
    let resource = from_xml_str(xml).unwrap();

    assert_eq!(
        resource.data().get("age"),
        Some(&ResourceValue::Scalar(Scalar::Int(36)))
    );
    assert_eq!(
        resource.data().get("active"),
        Some(&ResourceValue::Scalar(Scalar::Bool(true)))
    );
    assert_eq!(
        resource.data().get("score"),
        Some(&ResourceValue::Scalar(Scalar::Float(2.5)))
    );
    assert_eq!(
        resource.data().get("name"),
        Some(&ResourceValue::Scalar(Scalar::String("Curie".to_string())))
    );
}

#[test]
fn test_scalar_list_uses_value_wrappers() {
    let resource = Resource::new().with_data(
        "tags",
        vec![Scalar::from("nobel"), Scalar::from("radium")],
    );

    let xml = to_xml_string(&resource).unwrap();
    assert!(xml.contains("<tags><value>nobel</value><value>radium</value></tags>"));

    let parsed = from_xml_str(&xml).unwrap();
    match parsed.data().get("tags").unwrap() {
        ResourceValue::ScalarList(items) => {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0], Scalar::String("nobel".to_string()));
        }
        other => panic!("expected a scalar list, got {:?}", other),
    }
}

#[test]
fn test_object_list_uses_value_wrappers() {
    let mut first = slysoft_hal::ObjectData::new();
    first.insert("lastName", "Curie");
    let mut second = slysoft_hal::ObjectData::new();
    second.insert("lastName", "Meitner");
    let resource = Resource::new().with_data("members", vec![first, second]);

    let xml = to_xml_string(&resource).unwrap();
    assert!(xml.contains(
        "<members><value><lastName>Curie</lastName></value>\
         <value><lastName>Meitner</lastName></value></members>"
    ));

    let parsed = from_xml_str(&xml).unwrap();
    match parsed.data().get("members").unwrap() {
        ResourceValue::ObjectList(items) => {
            assert_eq!(items[1].try_str("lastName").unwrap(), "Meitner")
        }
        other => panic!("expected an object list, got {:?}", other),
    }
}

#[test]
fn test_nested_object() {
    let mut address = slysoft_hal::ObjectData::new();
    address.insert("city", "Paris");
    let resource = Resource::new().with_data("address", address);

    let xml = to_xml_string(&resource).unwrap();
    assert!(xml.contains("<address><city>Paris</city></address>"));

    let parsed = from_xml_str(&xml).unwrap();
    let address = parsed.data().get("address").unwrap().as_object().unwrap();
    assert_eq!(address.try_str("city").unwrap(), "Paris");
}

#[test]
fn test_link_serialization() {
    let resource = Resource::new().with_link(
        Link::new("Search", "/api/user")
            .with_item(InputItem::new("lastName"))
            .with_item(InputItem::new("firstName")),
    );

    let xml = to_xml_string(&resource).unwrap();
    assert!(xml.contains("<link rel=\"search\" href=\"/api/user\">"));
    assert!(xml.contains("<parameter name=\"lastName\"/>"));
    assert!(xml.contains("<parameter name=\"firstName\"/>"));
}

#[test]
fn test_link_optional_attributes() {
    let resource = Resource::new()
        .with_link(Link::new("next", "/api/page/2"))
        .with_link(
            Link::new("update", "/api/user/{id}")
                .with_verb(Verb::Put)
                .templated()
                .with_timeout(30)
                .with_item(InputItem::new("lastName")),
        );

    let xml = to_xml_string(&resource).unwrap();
    assert!(xml.contains("<link rel=\"next\" href=\"/api/page/2\"/>"));
    assert!(xml.contains(
        "<link rel=\"update\" href=\"/api/user/{id}\" \
         templated=\"true\" verb=\"PUT\" timeout=\"30\">"
    ));
    // non-GET links declare fields, not parameters
    assert!(xml.contains("<field name=\"lastName\"/>"));
}

#[test]
fn test_link_defaults_on_read() {
    let xml = r#"<resource><link rel="search" href="/api/user"/></resource>"#;
    let resource = from_xml_str(xml).unwrap();
    let link = resource.find_link("search").unwrap();

    assert_eq!(link.verb(), Verb::Get);
    assert!(!link.is_templated());
    assert_eq!(link.timeout(), 0);
    assert!(link.input_items().is_empty());
}

#[test]
fn test_input_item_details() {
    let resource = Resource::new().with_link(
        Link::new("filter", "/api/user").with_item(
            InputItem::new("status")
                .with_type("string")
                .with_default("active")
                .with_values(["active", "disabled"]),
        ),
    );

    let xml = to_xml_string(&resource).unwrap();
    assert!(xml.contains(
        "<parameter name=\"status\"><type>string</type>\
         <defaultValue>active</defaultValue>\
         <listOfValues><value>active</value><value>disabled</value></listOfValues>\
         </parameter>"
    ));

    let parsed = from_xml_str(&xml).unwrap();
    let item = &parsed.find_link("filter").unwrap().input_items()[0];
    assert_eq!(item.name(), "status");
    assert_eq!(item.type_hint(), Some("string"));
    assert_eq!(item.default_value(), Some("active"));
    assert_eq!(item.list_of_values(), ["active", "disabled"]);
}

#[test]
fn test_embedded_resources() {
    let resource = Resource::new()
        .with_embedded(
            "address",
            Resource::new()
                .with_uri("/api/address/7")
                .with_data("city", "Paris"),
        )
        .with_embedded_list(
            "awards",
            vec![
                Resource::new().with_data("year", 1903),
                Resource::new().with_data("year", 1911),
            ],
        );

    let xml = to_xml_string(&resource).unwrap();
    assert!(xml.contains(
        "<resource rel=\"address\" href=\"/api/address/7\"><city>Paris</city></resource>"
    ));
    assert!(xml.contains("<resource rel=\"awards\"><year>1903</year></resource>"));
    assert!(xml.contains("<resource rel=\"awards\"><year>1911</year></resource>"));

    let parsed = from_xml_str(&xml).unwrap();
    match parsed.find_embedded("address").unwrap() {
        Embedded::Single(r) => {
            assert_eq!(r.uri(), "/api/address/7");
            assert_eq!(r.data().try_str("city").unwrap(), "Paris");
        }
        Embedded::Many(_) => panic!("expected a single embedded resource"),
    }
    match parsed.find_embedded("awards").unwrap() {
        Embedded::Many(rs) => assert_eq!(rs.len(), 2),
        Embedded::Single(_) => panic!("expected an embedded list"),
    }
}

#[test]
fn test_escaped_text_and_attributes() {
    let resource = Resource::new()
        .with_uri("/api/user?a=1&b=2")
        .with_data("note", "a < b & c");

    let xml = to_xml_string(&resource).unwrap();
    let parsed = from_xml_str(&xml).unwrap();
    assert_eq!(parsed.uri(), "/api/user?a=1&b=2");
    assert_eq!(parsed.data().try_str("note").unwrap(), "a < b & c");
}

#[test]
fn test_pretty_output_parses_back() {
    let resource = Resource::new()
        .with_uri("/api/user/42")
        .with_data("lastName", "Curie")
        .with_link(Link::new("search", "/api/user"));

    let pretty = to_xml_string_pretty(&resource).unwrap();
    assert!(pretty.contains('\n'));

    let parsed = from_xml_str(&pretty).unwrap();
    assert_eq!(parsed, resource);
}

#[test]
fn test_malformed_documents() {
    assert!(matches!(
        from_xml_str("<notresource/>"),
        Err(CodecError::Malformed(_))
    ));
    assert!(matches!(from_xml_str(""), Err(CodecError::Malformed(_))));
    assert!(matches!(
        from_xml_str("<resource><open></resource>"),
        Err(CodecError::Xml(_)) | Err(CodecError::Malformed(_))
    ));
}
