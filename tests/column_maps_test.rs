//! Integration tests for column map use cases

use nad_ch::core::use_cases::{
    add_column_map, get_column_map, get_column_maps_by_producer, update_column_mapping,
    update_column_mapping_field,
};
use nad_ch::core::ApplicationContext;
use nad_ch::domain::{DataProducer, Mapping, NadError, User};

/// A context holding producer "New Jersey" and one user for it
async fn app_context() -> (ApplicationContext, i64) {
    let ctx = ApplicationContext::in_memory();
    let producer = ctx
        .producers()
        .add(DataProducer::new("New Jersey"))
        .await
        .unwrap();
    let user = ctx
        .users()
        .add(User::new("test@test.org", "foo", "bar", true, producer))
        .await
        .unwrap();
    (ctx, user.id.unwrap())
}

fn mapping(pairs: &[(&str, &str)]) -> Mapping {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn full_mapping() -> Mapping {
    mapping(&[
        ("Add_Number", "address_number"),
        ("AddNo_Full", "address_number_full"),
        ("St_Name", "street_name"),
        ("StNam_Full", "street_name_full"),
        ("County", "county"),
        ("Inc_Muni", "city"),
        ("Post_City", "postal_city"),
        ("State", "state"),
        ("UUID", "uuid"),
        ("AddAuth", "address_authority"),
        ("Longitude", "long"),
        ("Latitude", "lat"),
        ("NatGrid", "national_grid"),
        ("Placement", "placement"),
        ("AddrPoint", "address_point"),
        ("DateUpdate", "updated"),
        ("NAD_Source", "source"),
        ("DataSet_ID", "id"),
    ])
}

#[tokio::test]
async fn test_add_column_map_is_valid() {
    let (ctx, user_id) = app_context().await;

    let view = add_column_map(&ctx, user_id, "Test", full_mapping())
        .await
        .unwrap();

    assert_eq!(view.name, "Test");
    assert_eq!(view.mapping, full_mapping());
    assert_eq!(view.mapping.len(), 18);
}

#[tokio::test]
async fn test_add_column_map_is_invalid() {
    let (ctx, user_id) = app_context().await;

    let err = add_column_map(&ctx, user_id, "Test", mapping(&[("a", "b")]))
        .await
        .unwrap_err();

    assert!(matches!(err, NadError::Validation(_)));
    assert!(err.to_string().contains("Invalid keys: a"));
    assert!(ctx.column_maps().get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_column_map_round_trip() {
    let (ctx, user_id) = app_context().await;
    let created = add_column_map(&ctx, user_id, "Test", full_mapping())
        .await
        .unwrap();

    let fetched = get_column_map(&ctx, created.id).await.unwrap();
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.mapping, created.mapping);
}

#[tokio::test]
async fn test_get_column_maps_by_producer() {
    let (ctx, user_id) = app_context().await;
    add_column_map(&ctx, user_id, "First", mapping(&[("State", "st")]))
        .await
        .unwrap();
    add_column_map(&ctx, user_id, "Second", mapping(&[("County", "cty")]))
        .await
        .unwrap();

    let names: Vec<String> = get_column_maps_by_producer(&ctx, "New Jersey")
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["First", "Second"]);

    let other = ctx
        .producers()
        .add(DataProducer::new("Ohio"))
        .await
        .unwrap();
    assert!(get_column_maps_by_producer(&ctx, &other.name)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_update_column_mapping() {
    let (ctx, user_id) = app_context().await;
    let created = add_column_map(&ctx, user_id, "Test", full_mapping())
        .await
        .unwrap();

    let replacement = mapping(&[("Add_Number", "number"), ("State", "st")]);
    let updated = update_column_mapping(&ctx, created.id, replacement.clone())
        .await
        .unwrap();
    assert_eq!(updated.mapping, replacement);

    let fetched = get_column_map(&ctx, created.id).await.unwrap();
    assert_eq!(fetched.mapping, replacement);
}

#[tokio::test]
async fn test_update_column_mapping_field() {
    let (ctx, user_id) = app_context().await;
    let created = add_column_map(&ctx, user_id, "Test", full_mapping())
        .await
        .unwrap();

    let updated = update_column_mapping_field(&ctx, created.id, "foo", "Add_Number")
        .await
        .unwrap();
    assert_eq!(updated.mapping.get("Add_Number").map(String::as_str), Some("foo"));
    assert_eq!(updated.mapping.len(), 18);
}

#[tokio::test]
async fn test_update_column_mapping_field_inserts_missing() {
    let (ctx, user_id) = app_context().await;
    let created = add_column_map(&ctx, user_id, "Test", mapping(&[("State", "st")]))
        .await
        .unwrap();

    let updated = update_column_mapping_field(&ctx, created.id, "cty", "County")
        .await
        .unwrap();
    assert_eq!(updated.mapping, mapping(&[("County", "cty"), ("State", "st")]));
}

#[tokio::test]
async fn test_update_column_mapping_field_invalid() {
    let (ctx, user_id) = app_context().await;
    let created = add_column_map(&ctx, user_id, "Test", full_mapping())
        .await
        .unwrap();

    let err = update_column_mapping_field(&ctx, created.id, "foo", "Address")
        .await
        .unwrap_err();
    assert!(matches!(err, NadError::Validation(_)));

    let fetched = get_column_map(&ctx, created.id).await.unwrap();
    assert_eq!(fetched.mapping, full_mapping());
}

#[tokio::test]
async fn test_column_map_keeps_pair_order() {
    let (ctx, user_id) = app_context().await;
    let input = mapping(&[
        ("Add_Number", "number"),
        ("AddNo_Full", "full"),
        ("DataSet_ID", "id"),
        ("County", "county"),
    ]);

    let created = add_column_map(&ctx, user_id, "Test", input).await.unwrap();
    let updated = update_column_mapping_field(&ctx, created.id, "st", "State")
        .await
        .unwrap();

    let keys: Vec<&str> = updated.mapping.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["Add_Number", "AddNo_Full", "DataSet_ID", "County", "State"]
    );

    let json = serde_json::to_string(&updated.mapping).unwrap();
    assert_eq!(
        json,
        r#"{"Add_Number":"number","AddNo_Full":"full","DataSet_ID":"id","County":"county","State":"st"}"#
    );
}
