use proptest::prelude::*;
use ptaf_core::{strip_read_only, ResourceKind, COMMON_READ_ONLY_FIELDS};
use serde_json::{Map, Value};

fn kind_strategy() -> impl Strategy<Value = ResourceKind> {
    prop::sample::select(ResourceKind::ALL.to_vec())
}

proptest! {
    #[test]
    fn stripped_objects_keep_user_fields(
        kind in kind_strategy(),
        fields in proptest::collection::btree_map("[a-z]{3,12}", "[a-zA-Z0-9 ]{0,16}", 0..8),
    ) {
        let mut map = Map::new();
        map.insert("id".to_string(), Value::String("server-id".to_string()));
        for (key, value) in &fields {
            map.insert(key.clone(), Value::String(value.clone()));
        }
        let mut value = Value::Object(map);
        strip_read_only(kind, &mut value);

        let object = value.as_object().expect("object survives stripping");
        for field in COMMON_READ_ONLY_FIELDS {
            prop_assert!(!object.contains_key(*field));
        }
        for field in kind.read_only_fields() {
            prop_assert!(!object.contains_key(*field));
        }
        for (key, expected) in &fields {
            let protected = COMMON_READ_ONLY_FIELDS.contains(&key.as_str())
                || kind.read_only_fields().contains(&key.as_str());
            if !protected {
                prop_assert_eq!(object.get(key), Some(&Value::String(expected.clone())));
            }
        }
    }
}
