use hikegear_catalog::*;
use std::fs;
use tempfile::TempDir;

fn sample_list() -> GearList {
    GearList::new(vec![
        GearCategory {
            id: 0,
            name: "Shelter".to_string(),
            items: vec![
                GearItem {
                    id: 0,
                    name: "Tarp".to_string(),
                    description: "silnylon".to_string(),
                    weight: 350,
                },
                GearItem {
                    id: 1,
                    name: "Pegs".to_string(),
                    description: String::new(),
                    weight: 60,
                },
            ],
        },
        GearCategory {
            id: 4,
            name: "Kitchen".to_string(),
            items: vec![GearItem {
                id: 7,
                name: "Pot".to_string(),
                description: "titanium 750ml".to_string(),
                weight: 110,
            }],
        },
    ])
}

#[test]
fn missing_file_is_empty_list() {
    let tmp = TempDir::new().unwrap();
    let list = load_gear_list(&tmp.path().join("nope.json")).unwrap();
    assert!(list.is_empty());
}

#[test]
fn gear_list_round_trips_through_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("gear").join("private.json");

    save_gear_list(&path, &sample_list()).unwrap();
    let loaded = load_gear_list(&path).unwrap();

    assert_eq!(loaded, sample_list());
    assert!(!tmp.path().join("gear").join("private.json.tmp").exists());
}

#[test]
fn gear_list_is_a_bare_json_array() {
    let json = serde_json::to_value(sample_list()).unwrap();
    assert!(json.is_array());
    assert_eq!(json[1]["items"][0]["name"], "Pot");
    assert_eq!(json[1]["id"], 4);
}

#[test]
fn loads_document_with_missing_optional_fields() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("private.json");
    fs::write(&path, r#"[{"id": 2, "name": "Misc", "items": [{"id": 3}]}]"#).unwrap();

    let list = load_gear_list(&path).unwrap();
    assert_eq!(list.len(), 1);
    let item = &list.categories[0].items[0];
    assert_eq!(item.id, 3);
    assert_eq!(item.name, "");
    assert_eq!(item.weight, 0);
}

#[test]
fn rejects_duplicate_item_ids_across_categories() {
    let mut list = sample_list();
    list.categories[1].items[0].id = 1;

    let err = validate_gear_list(&list).unwrap_err();
    assert!(matches!(err, DocumentError::Invalid(ref m) if m.contains("duplicate item id 1")));
}

#[test]
fn rejects_duplicate_category_ids() {
    let mut list = sample_list();
    list.categories[1].id = 0;
    assert!(validate_gear_list(&list).is_err());
}

#[test]
fn rejects_out_of_range_ids() {
    let mut list = sample_list();
    list.categories[0].id = CATEGORY_ID_SPACE;
    assert!(validate_gear_list(&list).is_err());

    let mut list = sample_list();
    list.categories[0].items[0].id = ITEM_ID_SPACE;
    assert!(validate_gear_list(&list).is_err());
}

#[test]
fn malformed_json_reports_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = load_gear_list(&path).unwrap_err();
    assert!(matches!(err, DocumentError::Parse { ref path, .. } if path.ends_with("broken.json")));
}

#[test]
fn backpack_draft_written_and_backpack_loaded() {
    let tmp = TempDir::new().unwrap();
    let draft = BackpackDraft {
        name: "Weekend".to_string(),
        description: String::new(),
        list: vec![BackpackCategory {
            id: 0,
            name: "Sleep".to_string(),
            items: vec![BackpackItem {
                id: 0,
                name: "Quilt".to_string(),
                description: String::new(),
                weight: 620.0,
                worn: false,
                consumable: false,
                quantity: 1.0,
            }],
        }],
    };
    let draft_path = tmp.path().join("draft.json");
    save_backpack(&draft_path, &draft).unwrap();
    let written: BackpackDraft =
        serde_json::from_str(&fs::read_to_string(&draft_path).unwrap()).unwrap();
    assert_eq!(written, draft);

    let record_path = tmp.path().join("record.json");
    fs::write(
        &record_path,
        r#"{"id": 9, "owner": 3, "name": "Alps", "list": [], "shared": true}"#,
    )
    .unwrap();
    let backpack = load_backpack(&record_path).unwrap();
    assert_eq!(backpack.owner, ProfileId(3));
    assert!(backpack.shared);
    assert_eq!(backpack.description, "");
}

#[test]
fn fractional_weights_round_on_load() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("private.json");
    fs::write(
        &path,
        r#"[{"id": 0, "name": "Misc", "items": [
            {"id": 0, "name": "Spoon", "weight": 12.4},
            {"id": 1, "name": "Mug", "weight": 79.5},
            {"id": 2, "name": "Bag", "weight": 30}
        ]}]"#,
    )
    .unwrap();

    let list = load_gear_list(&path).unwrap();
    let weights: Vec<u32> = list.items().map(|i| i.weight).collect();
    assert_eq!(weights, vec![12, 80, 30]);
}

#[test]
fn negative_weight_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("private.json");
    fs::write(&path, r#"[{"id": 0, "items": [{"id": 0, "weight": -3}]}]"#).unwrap();
    assert!(matches!(
        load_gear_list(&path).unwrap_err(),
        DocumentError::Parse { .. }
    ));
}
