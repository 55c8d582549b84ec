//! Integration tests for provider and user use cases

use nad_ch::core::use_cases::{add_data_provider, add_user, list_data_providers};
use nad_ch::core::ApplicationContext;
use nad_ch::domain::NadError;
use test_case::test_case;

#[tokio::test]
async fn test_add_data_provider() {
    let ctx = ApplicationContext::in_memory();
    add_data_provider(&ctx, "State X").await.unwrap();

    let provider = ctx.providers().get_by_name("State X").await.unwrap();
    assert_eq!(provider.unwrap().id, Some(1));
}

#[test_case("" ; "empty name")]
#[test_case("State X" ; "duplicate name")]
#[tokio::test]
async fn test_add_data_provider_rejected(name: &str) {
    let ctx = ApplicationContext::in_memory();
    add_data_provider(&ctx, "State X").await.unwrap();

    add_data_provider(&ctx, name).await.unwrap();
    assert_eq!(ctx.providers().get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_data_providers_in_insertion_order() {
    let ctx = ApplicationContext::in_memory();
    for name in ["State X", "State Y", "State Z"] {
        add_data_provider(&ctx, name).await.unwrap();
    }

    let providers = list_data_providers(&ctx).await.unwrap();
    let ids: Vec<i64> = providers.iter().map(|p| p.id).collect();
    let names: Vec<&str> = providers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(names, vec!["State X", "State Y", "State Z"]);
}

#[tokio::test]
async fn test_list_data_providers_empty() {
    let ctx = ApplicationContext::in_memory();
    assert!(list_data_providers(&ctx).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_user_for_provider() {
    let ctx = ApplicationContext::in_memory();
    add_data_provider(&ctx, "State X").await.unwrap();

    let user = add_user(&ctx, "gis@x.example", "Grace", "Hopper", "State X")
        .await
        .unwrap();
    assert_eq!(user.full_name, "Grace Hopper");

    let stored = ctx
        .users()
        .get_by_email("gis@x.example")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.producer.name, "State X");
}

#[tokio::test]
async fn test_add_user_unknown_provider() {
    let ctx = ApplicationContext::in_memory();
    let err = add_user(&ctx, "gis@x.example", "Grace", "Hopper", "State X")
        .await
        .unwrap_err();
    assert!(matches!(err, NadError::NotFound(_)));
    assert!(ctx.users().get_all().await.unwrap().is_empty());
}
