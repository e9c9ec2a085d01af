// Tests for the tree model and subscription filter

use storage_tui::catalog::fixture::CatalogData;
use storage_tui::catalog::Scope;
use storage_tui::tree::{NodeKind, SubscriptionFilter, Tree};

use crate::support::{account, catalog, subscription, ScriptedProvider};

fn subscription_id(tree: &Tree, name: &str) -> usize {
    tree.find_child(Tree::ROOT, name).unwrap()
}

#[tokio::test]
async fn test_enablement_survives_reloads() {
    let provider = ScriptedProvider::new(catalog());
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();

    let prod = subscription_id(&tree, "Production");
    assert_eq!(
        tree.toggle_subscription(prod, &provider, &mut filter)
            .await
            .unwrap(),
        Some(false)
    );

    tree.load_root(&provider, &mut filter).await.unwrap();
    tree.load_root(&provider, &mut filter).await.unwrap();

    assert!(filter.is_enabled("sub-dev"));
    assert!(!filter.is_enabled("sub-prod"));
    let prod = subscription_id(&tree, "Production");
    assert_eq!(tree.get(prod).unwrap().label, "( ) Production");
    assert!(!tree.get(prod).unwrap().is_loaded());
}

#[tokio::test]
async fn test_new_subscriptions_start_enabled_and_vanished_ones_are_forgotten() {
    let provider = ScriptedProvider::new(catalog());
    let mut tree = Tree::new(false);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();
    filter.set_enabled("sub-prod", false);

    let mut data = catalog();
    data.subscriptions.remove(1);
    data.subscriptions
        .push(subscription("sub-qa", "QA", vec![account("acme-qa", vec![])]));
    provider.set_data(data);

    tree.load_root(&provider, &mut filter).await.unwrap();
    assert_eq!(filter.len(), 2);
    assert!(filter.is_enabled("sub-qa"));
    assert_eq!(tree.child_names(Tree::ROOT), vec!["Development", "QA"]);
}

#[tokio::test]
async fn test_toggle_off_then_on_restores_children() {
    let provider = ScriptedProvider::new(catalog());
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();

    let dev = subscription_id(&tree, "Development");
    let before = tree.child_names(dev);
    assert_eq!(before, vec!["acme-dev"]);

    tree.toggle_subscription(dev, &provider, &mut filter)
        .await
        .unwrap();
    assert!(!tree.get(dev).unwrap().is_loaded());
    assert!(tree.child_names(dev).is_empty());

    tree.toggle_subscription(dev, &provider, &mut filter)
        .await
        .unwrap();
    assert_eq!(tree.child_names(dev), before);
    assert!(tree.get(dev).unwrap().expanded);
}

#[tokio::test]
async fn test_second_expand_does_not_refetch() {
    let provider = ScriptedProvider::new(catalog());
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();

    let dev = subscription_id(&tree, "Development");
    let acct = tree.find_child(dev, "acme-dev").unwrap();

    tree.expand(acct, &provider, &filter).await.unwrap();
    tree.collapse(acct);
    tree.expand(acct, &provider, &filter).await.unwrap();

    assert_eq!(ScriptedProvider::calls(&provider.container_calls), 1);
    assert_eq!(tree.child_names(acct), vec!["logs", "empty"]);
}

#[tokio::test]
async fn test_account_without_containers_gets_placeholder() {
    let data = CatalogData {
        subscriptions: vec![subscription(
            "sub-dev",
            "Development",
            vec![account("acme-dev", vec![])],
        )],
    };
    let provider = ScriptedProvider::new(data);
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();

    let dev = subscription_id(&tree, "Development");
    let acct = tree.find_child(dev, "acme-dev").unwrap();
    tree.expand(acct, &provider, &filter).await.unwrap();

    let children = tree.get(acct).unwrap().children().unwrap().to_vec();
    assert_eq!(children.len(), 1);
    match &tree.get(children[0]).unwrap().kind {
        NodeKind::Placeholder { reason, is_error } => {
            assert_eq!(reason, "No containers.");
            assert!(!is_error);
        }
        other => panic!("expected placeholder, got {:?}", other),
    }
}

#[tokio::test]
async fn test_subscription_listing_failure_leaves_single_error_node() {
    let provider = ScriptedProvider::new(catalog());
    provider.fail(Scope::Subscriptions, "");
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();

    let err = tree.load_root(&provider, &mut filter).await.unwrap_err();
    assert_eq!(err.scope, Scope::Subscriptions);
    assert_eq!(tree.child_names(Tree::ROOT), vec!["Error loading subscriptions."]);
    assert_eq!(tree.visible().len(), 1);
    assert!(filter.is_empty());
}

#[tokio::test]
async fn test_eager_failure_only_degrades_its_subscription() {
    let provider = ScriptedProvider::new(catalog());
    provider.fail(Scope::Accounts, "sub-dev");
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();

    let report = tree.load_root(&provider, &mut filter).await.unwrap();
    assert_eq!(report.subscriptions, 2);
    let failure = report.eager_failure.unwrap();
    assert_eq!(failure.scope, Scope::Accounts);

    let dev = subscription_id(&tree, "Development");
    let prod = subscription_id(&tree, "Production");
    assert_eq!(tree.child_names(dev), vec!["Error loading accounts."]);
    assert_eq!(tree.child_names(prod), vec!["acme-prod"]);
}

#[tokio::test]
async fn test_lazy_mode_defers_account_listing() {
    let provider = ScriptedProvider::new(catalog());
    let mut tree = Tree::new(false);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();

    assert_eq!(ScriptedProvider::calls(&provider.account_calls), 0);
    let dev = subscription_id(&tree, "Development");
    assert!(!tree.get(dev).unwrap().is_loaded());

    tree.expand(dev, &provider, &filter).await.unwrap();
    assert_eq!(ScriptedProvider::calls(&provider.account_calls), 1);
    assert_eq!(tree.child_names(dev), vec!["acme-dev"]);
}

#[tokio::test]
async fn test_disabling_moves_cursor_out_of_discarded_subtree() {
    let provider = ScriptedProvider::new(catalog());
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();

    let dev = subscription_id(&tree, "Development");
    let acct = tree.find_child(dev, "acme-dev").unwrap();
    assert!(tree.select(acct));

    tree.toggle_subscription(dev, &provider, &mut filter)
        .await
        .unwrap();
    assert_eq!(tree.selected(), Some(dev));

    // Disabled subscriptions refuse to expand.
    tree.expand(dev, &provider, &filter).await.unwrap();
    assert!(!tree.get(dev).unwrap().is_loaded());
}

#[tokio::test]
async fn test_failed_reenable_keeps_subscription_collapsed() {
    let provider = ScriptedProvider::new(catalog());
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();

    let dev = subscription_id(&tree, "Development");
    tree.toggle_subscription(dev, &provider, &mut filter)
        .await
        .unwrap();
    assert!(!tree.get(dev).unwrap().expanded);

    provider.fail(Scope::Accounts, "sub-dev");
    let err = tree
        .toggle_subscription(dev, &provider, &mut filter)
        .await
        .unwrap_err();

    assert_eq!(err.scope, Scope::Accounts);
    assert!(filter.is_enabled("sub-dev"));
    assert!(!tree.get(dev).unwrap().expanded);
    assert_eq!(tree.child_names(dev), vec!["Error loading accounts."]);
}

#[tokio::test]
async fn test_failed_expand_leaves_node_untouched() {
    let provider = ScriptedProvider::new(catalog());
    let mut tree = Tree::new(true);
    let mut filter = SubscriptionFilter::new();
    tree.load_root(&provider, &mut filter).await.unwrap();

    let dev = subscription_id(&tree, "Development");
    let acct = tree.find_child(dev, "acme-dev").unwrap();

    provider.fail(Scope::Containers, "acme-dev");
    let err = tree.expand(acct, &provider, &filter).await.unwrap_err();
    assert_eq!(err.scope, Scope::Containers);
    assert!(err.to_string().starts_with("Error loading containers: "));
    assert!(!tree.get(acct).unwrap().is_loaded());
    assert!(!tree.get(acct).unwrap().expanded);

    provider.heal();
    tree.expand(acct, &provider, &filter).await.unwrap();
    assert!(tree.get(acct).unwrap().expanded);
    assert_eq!(tree.child_names(acct), vec!["logs", "empty"]);
    assert_eq!(ScriptedProvider::calls(&provider.container_calls), 2);
}
