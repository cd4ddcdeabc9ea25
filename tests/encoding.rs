//! Mixed payloads through both wire encodings.

use std::collections::HashMap;

use ocs_response::ocs::json::to_json;
use ocs_response::ocs::xml::to_xml;
use ocs_response::ocs::{Data, Envelope, Payload, META_OK};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Quota {
    used: f64,
    total: u64,
    relative: f32,
}

#[derive(Serialize)]
struct Entry {
    path: String,
    size: u64,
    favorite: bool,
    quota: Quota,
    tags: Vec<String>,
    props: HashMap<String, f64>,
}

fn entry(name: &str) -> Entry {
    Entry {
        path: format!("/home/{name}"),
        size: 4096,
        favorite: name.len() % 2 == 0,
        quota: Quota {
            used: 1.0,
            total: 1 << 30,
            relative: 0.5,
        },
        tags: vec!["work".into(), "<draft>".into()],
        props: (0..4).map(|i| (format!("p{i}"), f64::from(i) * 1.5)).collect(),
    }
}

fn envelope(data: Data) -> Envelope {
    Envelope::new(Payload::new(META_OK.clone(), Some(data)))
}

#[test]
fn test_mixed_payloads_encode_in_both_formats() {
    // (name, payload, expected <element> count)
    let cases: Vec<(&str, Data, usize)> = vec![
        (
            "scalars",
            Data::from(json!(["a", 1, -2, 2.5, 1e21, true, false])),
            7,
        ),
        ("floats", Data::from_serialize(&[1.0, 0.1, 1e-7, 123456.0]).unwrap(), 4),
        ("empty", Data::Sequence(vec![]), 0),
        (
            "structs",
            Data::from_serialize(&vec![entry("ann"), entry("bob"), entry("cy")]).unwrap(),
            3,
        ),
        ("single struct", Data::from_serialize(&entry("dee")).unwrap(), 0),
        (
            "maps",
            Data::from_serialize(&vec![
                HashMap::from([("b", 2.0), ("a", 1.0)]),
                HashMap::from([("z", 0.75)]),
            ])
            .unwrap(),
            2,
        ),
        (
            "nested objects",
            Data::from(json!([{ "a": { "b": [1, 2, { "c": 3.5 }] } }, { "d": [] }])),
            2,
        ),
        // sequences directly inside items flatten into more elements
        (
            "nested sequences",
            Data::from(json!([["x", "y"], [1.5, [true]], "z"])),
            5,
        ),
    ];

    for (name, data, elements) in cases {
        let envelope = envelope(data);

        let json = to_json(&envelope).unwrap_or_else(|e| panic!("{name}: json failed: {e}"));
        let json: serde_json::Value = serde_json::from_slice(&json)
            .unwrap_or_else(|e| panic!("{name}: invalid json: {e}"));
        assert_eq!(json["ocs"]["meta"]["statuscode"], 100, "{name}");

        let xml = to_xml(&envelope).unwrap_or_else(|e| panic!("{name}: xml failed: {e}"));
        let xml = String::from_utf8(xml).unwrap();
        assert_eq!(xml.matches("<element>").count(), elements, "{name}: {xml}");
        assert_eq!(xml.matches("</element>").count(), elements, "{name}: {xml}");
        assert!(!xml.contains(".0<"), "{name}: {xml}");
    }
}

#[test]
fn test_map_payload_is_stable() {
    let props: HashMap<String, u32> = (0..8).map(|i| (format!("k{i}"), i)).collect();
    let first = to_json(&envelope(Data::from_serialize(&props).unwrap())).unwrap();

    for _ in 0..20 {
        let props: HashMap<String, u32> = (0..8).map(|i| (format!("k{i}"), i)).collect();
        let again = to_json(&envelope(Data::from_serialize(&props).unwrap())).unwrap();
        assert_eq!(again, first);
    }

    let first = String::from_utf8(first).unwrap();
    assert!(first.ends_with(
        r#""data":{"k0":0,"k1":1,"k2":2,"k3":3,"k4":4,"k5":5,"k6":6,"k7":7}}}"#
    ));
}

#[test]
fn test_struct_keeps_field_order_next_to_sorted_map() {
    let data = Data::from_serialize(&entry("eve")).unwrap();
    let xml = String::from_utf8(to_xml(&envelope(data)).unwrap()).unwrap();

    assert!(xml.contains(
        "<data><path>/home/eve</path><size>4096</size><favorite>false</favorite>\
         <quota><used>1</used><total>1073741824</total><relative>0.5</relative></quota>\
         <tags>work</tags><tags>&lt;draft&gt;</tags>\
         <props><p0>0</p0><p1>1.5</p1><p2>3</p2><p3>4.5</p3></props></data>"
    ));
}
