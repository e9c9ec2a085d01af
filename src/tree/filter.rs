use std::collections::HashMap;

use crate::catalog::Subscription;

/// Per-subscription enabled flags, keyed by subscription id.
///
/// Ids the filter has never seen count as enabled. The map survives reloads:
/// [`SubscriptionFilter::merge`] keeps existing values and only adds new ids.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionFilter {
    enabled: HashMap<String, bool>,
}

impl SubscriptionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, subscription_id: &str) -> bool {
        self.enabled.get(subscription_id).copied().unwrap_or(true)
    }

    pub fn set_enabled(&mut self, subscription_id: &str, enabled: bool) {
        self.enabled.insert(subscription_id.to_string(), enabled);
    }

    /// Flip the flag and return the new value.
    pub fn toggle(&mut self, subscription_id: &str) -> bool {
        let next = !self.is_enabled(subscription_id);
        self.set_enabled(subscription_id, next);
        next
    }

    /// Rebuild the map for a freshly listed set of subscriptions.
    ///
    /// Prior toggles are kept, new ids start enabled, ids that disappeared
    /// from the listing are dropped.
    pub fn merge(&mut self, subscriptions: &[Subscription]) {
        let next = subscriptions
            .iter()
            .map(|s| (s.id.clone(), self.is_enabled(&s.id)))
            .collect();
        self.enabled = next;
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}
