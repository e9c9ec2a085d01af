// Tests for the content list projection

use storage_tui::catalog::{Scope, Subscription};
use storage_tui::content::{ContentList, ContentRow};
use storage_tui::tree::{AccountLocation, ContainerLocation};

use crate::support::{catalog, ScriptedProvider};

fn location(account: &str, container: &str) -> ContainerLocation {
    ContainerLocation {
        account: AccountLocation {
            subscription: Subscription {
                id: "sub-dev".to_string(),
                name: "Development".to_string(),
            },
            account: account.to_string(),
        },
        container: container.to_string(),
    }
}

#[tokio::test]
async fn test_rows_match_listing_one_to_one() {
    let provider = ScriptedProvider::new(catalog());
    let mut list = ContentList::default();
    list.load_for(&location("acme-dev", "logs"), &provider)
        .await
        .unwrap();

    assert_eq!(list.len(), 2);
    assert!(list.rows().iter().all(ContentRow::is_blob));
    let names: Vec<_> = list.rows().iter().map(ContentRow::primary).collect();
    assert_eq!(names, vec!["2024-05-10.log", "2024-05-11.log"]);
    assert_eq!(list.rows()[0].detail(), "text/plain | 512 B | n/a");
    assert_eq!(list.title(), "Contents: acme-dev/logs");
}

#[tokio::test]
async fn test_empty_container_shows_single_placeholder() {
    let provider = ScriptedProvider::new(catalog());
    let mut list = ContentList::default();
    list.load_for(&location("acme-dev", "empty"), &provider)
        .await
        .unwrap();

    assert_eq!(list.len(), 1);
    assert!(!list.rows()[0].is_blob());
    assert_eq!(list.rows()[0].primary(), "No blobs in container.");
}

#[tokio::test]
async fn test_failed_listing_leaves_error_row() {
    let provider = ScriptedProvider::new(catalog());
    provider.fail(Scope::Blobs, "logs");
    let mut list = ContentList::default();

    let err = list
        .load_for(&location("acme-dev", "logs"), &provider)
        .await
        .unwrap_err();
    assert_eq!(err.scope, Scope::Blobs);
    assert_eq!(
        list.rows(),
        &[ContentRow::Placeholder {
            reason: "Error loading data.".to_string(),
            is_error: true,
        }]
    );

    provider.heal();
    list.load_for(&location("acme-dev", "logs"), &provider)
        .await
        .unwrap();
    assert_eq!(list.len(), 2);
}

#[tokio::test]
async fn test_reload_resets_cursor() {
    let provider = ScriptedProvider::new(catalog());
    let mut list = ContentList::default();
    list.load_for(&location("acme-dev", "logs"), &provider)
        .await
        .unwrap();
    assert!(list.select_next());
    assert_eq!(list.selected(), 1);
    assert!(!list.select_next());

    list.load_for(&location("acme-dev", "logs"), &provider)
        .await
        .unwrap();
    assert_eq!(list.selected(), 0);
    assert_eq!(ScriptedProvider::calls(&provider.blob_calls), 2);
}
