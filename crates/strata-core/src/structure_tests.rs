use crate::ir::Kind;
use crate::structure::{Structure, StructureTable, TypeId};

fn simple(properties: &[(&str, TypeId, Kind)]) -> Structure {
    let mut structure = Structure::new();
    for (name, type_id, kind) in properties {
        assert!(structure.add_property(name, *type_id, *kind));
    }
    structure
}

#[test]
fn canonical_signature_is_sorted_by_property_name() {
    let a = simple(&[
        ("b", TypeId::BOOLEAN, Kind::None),
        ("a", TypeId::INTEGER, Kind::None),
    ]);
    let b = simple(&[
        ("a", TypeId::INTEGER, Kind::None),
        ("b", TypeId::BOOLEAN, Kind::None),
    ]);
    assert_eq!(a.canonical(), b.canonical());
    assert_eq!(a.canonical(), "&a=4&b=2");
}

#[test]
fn kind_markers_distinguish_signatures() {
    let plain = simple(&[("xs", TypeId::STRING, Kind::None)]);
    let array = simple(&[("xs", TypeId::STRING, Kind::Array)]);
    let dynamic = simple(&[("xs", TypeId::STRING, Kind::Dynamic)]);

    assert_eq!(array.canonical(), "&xs[]=5");
    assert_eq!(dynamic.canonical(), "&xs{}=5");
    assert_ne!(plain.canonical(), array.canonical());
    assert_ne!(array.canonical(), dynamic.canonical());
}

#[test]
fn duplicate_property_rejected() {
    let mut structure = Structure::new();
    assert!(structure.add_property("a", TypeId::INTEGER, Kind::None));
    assert!(!structure.add_property("a", TypeId::STRING, Kind::None));
    assert_eq!(structure.len(), 1);
}

#[test]
fn identical_signatures_intern_once() {
    let mut table = StructureTable::new();

    let first = table.intern(simple(&[
        ("a", TypeId::INTEGER, Kind::None),
        ("b", TypeId::BOOLEAN, Kind::None),
    ]));
    let second = table.intern(simple(&[
        ("b", TypeId::BOOLEAN, Kind::None),
        ("a", TypeId::INTEGER, Kind::None),
    ]));

    assert_eq!(first, second);
    assert_eq!(table.len(), 1);
    assert_eq!(first, TypeId::USER_MIN);
}

#[test]
fn distinct_signatures_get_monotonic_ids() {
    let mut table = StructureTable::new();

    let first = table.intern(simple(&[("a", TypeId::INTEGER, Kind::None)]));
    let second = table.intern(simple(&[("a", TypeId::STRING, Kind::None)]));

    assert_eq!(first.as_u32() + 1, second.as_u32());
    assert_eq!(table.type_name(first), "Class_100");
    assert_eq!(table.type_name(second), "Class_101");
}

#[test]
fn alias_binding_is_idempotent_per_id() {
    let mut table = StructureTable::new();
    let id = table.intern(simple(&[("a", TypeId::INTEGER, Kind::None)]));

    assert!(table.bind_alias(id, "Options"));
    assert!(table.bind_alias(id, "Options"));
    assert_eq!(table.alias("Options"), Some(id));
    assert_eq!(table.get(id).unwrap().aliases, vec!["Options".to_string()]);
}

#[test]
fn alias_conflict_reported() {
    let mut table = StructureTable::new();
    let first = table.intern(simple(&[("a", TypeId::INTEGER, Kind::None)]));
    let second = table.intern(simple(&[("b", TypeId::STRING, Kind::None)]));

    assert!(table.bind_alias(first, "Options"));
    assert!(!table.bind_alias(second, "Options"));
}

#[test]
fn primitive_type_names() {
    let table = StructureTable::new();
    assert_eq!(table.type_name(TypeId::BOOLEAN), "boolean");
    assert_eq!(table.type_name(TypeId::FLOAT), "float");
    assert_eq!(table.type_name(TypeId::INTEGER), "integer");
    assert_eq!(table.type_name(TypeId::STRING), "string");
}

#[test]
fn enumerate_resolves_property_type_names() {
    let mut table = StructureTable::new();
    let inner = table.intern(simple(&[("x", TypeId::FLOAT, Kind::None)]));
    table.intern(simple(&[
        ("name", TypeId::STRING, Kind::None),
        ("inner", inner, Kind::None),
    ]));

    let emitted = table.enumerate();
    assert_eq!(emitted.len(), 2);
    assert_eq!(emitted[0].identifier, "Class_100");
    let outer = &emitted[1];
    assert_eq!(outer.properties[0].property, "inner");
    assert_eq!(outer.properties[0].type_name, "Class_100");
    assert_eq!(outer.properties[1].type_name, "string");
}
