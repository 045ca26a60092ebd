//! Relationship CRUD operations.
//!
//! A relationship is addressed by its pattern (source label, type, target
//! label) plus the natural-key values of both endpoints.

use compgraph_core::cypher::relationships as cypher;
use compgraph_core::schema::MIN_RELATIONSHIP_PROPERTIES;
use compgraph_core::{
    GraphError, GraphResult, Properties, Relationship, RelationshipKey, RelationshipPattern,
};
use tracing::{debug, info};

use super::relationship_from;
use crate::store::{run_count, run_single, GraphStore};

const RELATIONSHIP_NOT_FOUND: &str = "Relationship not found";

fn check_endpoints(pattern: &RelationshipPattern) -> GraphResult<()> {
    if pattern.relationship_type.connects(pattern.from_label, pattern.to_label) {
        return Ok(());
    }
    let (from, to) = pattern.relationship_type.endpoints();
    Err(GraphError::validation(format!(
        "{} connects {} to {}, not {} to {}",
        pattern.relationship_type, from, to, pattern.from_label, pattern.to_label
    )))
}

/// Property map of one relationship.
pub async fn get_relationship_properties(store: &dyn GraphStore, key: &RelationshipKey) -> GraphResult<Properties> {
    match run_single(store, cypher::relationship_properties(key)).await? {
        Some(record) => record.get("properties"),
        None => Err(GraphError::not_found(RELATIONSHIP_NOT_FOUND)),
    }
}

/// Create (or reuse) a relationship between two existing nodes.
///
/// Requires at least [`MIN_RELATIONSHIP_PROPERTIES`] properties and a label
/// pair the relationship type actually connects.
pub async fn create_relationship(
    store: &dyn GraphStore,
    key: &RelationshipKey,
    properties: &Properties,
) -> GraphResult<Relationship> {
    if properties.len() < MIN_RELATIONSHIP_PROPERTIES {
        return Err(GraphError::validation(format!(
            "At least {} properties are required, got {}",
            MIN_RELATIONSHIP_PROPERTIES,
            properties.len()
        )));
    }
    check_endpoints(&key.pattern)?;

    let record = run_single(store, cypher::create_relationship(key, properties))
        .await?
        .ok_or_else(|| GraphError::not_found("Source or target node not found"))?;
    info!(
        relationship = %key.pattern.relationship_type,
        from = %key.from_value,
        to = %key.to_value,
        "Created relationship"
    );
    relationship_from(&record)
}

/// Union `properties` onto one relationship. Backs both add and update.
pub async fn merge_relationship_properties(
    store: &dyn GraphStore,
    key: &RelationshipKey,
    properties: &Properties,
) -> GraphResult<Relationship> {
    match run_single(store, cypher::merge_relationship_properties(key, properties)).await? {
        Some(record) => relationship_from(&record),
        None => Err(GraphError::not_found(RELATIONSHIP_NOT_FOUND)),
    }
}

pub async fn merge_many_relationship_properties(
    store: &dyn GraphStore,
    pattern: &RelationshipPattern,
    pairs: &[(String, String)],
    properties: &Properties,
) -> GraphResult<u64> {
    let updated = run_count(
        store,
        cypher::merge_many_relationship_properties(pattern, pairs, properties),
        "updated_count",
    )
    .await?;
    debug!(relationship = %pattern.relationship_type, requested = pairs.len(), updated, "Merged relationship properties");
    Ok(updated)
}

pub async fn remove_relationship_properties(
    store: &dyn GraphStore,
    key: &RelationshipKey,
    properties: &[String],
) -> GraphResult<Relationship> {
    match run_single(store, cypher::remove_relationship_properties(key, properties)?).await? {
        Some(record) => relationship_from(&record),
        None => Err(GraphError::not_found(RELATIONSHIP_NOT_FOUND)),
    }
}

pub async fn remove_many_relationship_properties(
    store: &dyn GraphStore,
    pattern: &RelationshipPattern,
    pairs: &[(String, String)],
    properties: &[String],
) -> GraphResult<u64> {
    run_count(
        store,
        cypher::remove_many_relationship_properties(pattern, pairs, properties)?,
        "updated_count",
    )
    .await
}

/// Delete one relationship; the endpoint nodes stay.
pub async fn delete_relationship(store: &dyn GraphStore, key: &RelationshipKey) -> GraphResult<u64> {
    let deleted = run_count(store, cypher::delete_relationship(key), "deleted_count").await?;
    if deleted == 0 {
        return Err(GraphError::not_found(RELATIONSHIP_NOT_FOUND));
    }
    info!(
        relationship = %key.pattern.relationship_type,
        from = %key.from_value,
        to = %key.to_value,
        "Deleted relationship"
    );
    Ok(deleted)
}

pub async fn delete_relationships(
    store: &dyn GraphStore,
    pattern: &RelationshipPattern,
    pairs: &[(String, String)],
) -> GraphResult<u64> {
    let deleted = run_count(store, cypher::delete_relationships(pattern, pairs), "deleted_count").await?;
    info!(relationship = %pattern.relationship_type, requested = pairs.len(), deleted, "Deleted relationships");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{count_record, relationship_record, ScriptedStore};
    use compgraph_core::{Label, PropertyValue, RelationshipType};
    use serde_json::json;

    fn purchased(from: &str, to: &str) -> RelationshipKey {
        RelationshipKey::new(
            RelationshipPattern::new(Label::User, RelationshipType::Purchased, Label::Component),
            from,
            to,
        )
    }

    fn purchase_props() -> Properties {
        serde_json::from_value(json!({
            "purchase_date": "2020-05-01",
            "quantity": 2,
            "payment_method": "PayPal"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_three_properties() {
        let store = ScriptedStore::new();
        let mut props = purchase_props();
        props.remove("quantity");
        let err = create_relationship(&store, &purchased("User 1", "Component 3"), &props)
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
        assert!(store.statements().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_wrong_label_pair() {
        let store = ScriptedStore::new();
        let key = RelationshipKey::new(
            RelationshipPattern::new(Label::Provider, RelationshipType::Purchased, Label::Component),
            "Provider 1",
            "Component 3",
        );
        let err = create_relationship(&store, &key, &purchase_props()).await.unwrap_err();
        assert!(matches!(err, GraphError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_missing_endpoint_is_not_found() {
        let store = ScriptedStore::new().respond_empty();
        let err = create_relationship(&store, &purchased("User 1", "Nope"), &purchase_props())
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_returns_relationship() {
        let props = purchase_props();
        let store = ScriptedStore::new().respond(vec![relationship_record(
            "PURCHASED",
            "User 1",
            "Component 3",
            serde_json::to_value(&props).unwrap(),
        )]);
        let rel = create_relationship(&store, &purchased("User 1", "Component 3"), &props)
            .await
            .unwrap();
        assert_eq!(rel.relationship_type, "PURCHASED");
        assert_eq!(rel.from_value, "User 1");
        assert_eq!(rel.properties["quantity"], PropertyValue::Int(2));
    }

    #[tokio::test]
    async fn test_get_properties_not_found() {
        let store = ScriptedStore::new().respond_empty();
        let err = get_relationship_properties(&store, &purchased("User 1", "Component 99"))
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_single_not_found() {
        let store = ScriptedStore::new().respond(vec![count_record("deleted_count", 0)]);
        let err = delete_relationship(&store, &purchased("User 1", "Component 3"))
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_batch_update_counts_matches() {
        let store = ScriptedStore::new().respond(vec![count_record("updated_count", 2)]);
        let pattern = RelationshipPattern::new(Label::User, RelationshipType::Purchased, Label::Component);
        let pairs = vec![
            ("User 1".to_string(), "Component 1".to_string()),
            ("User 2".to_string(), "Component 2".to_string()),
            ("User 3".to_string(), "Missing".to_string()),
        ];
        let mut props = Properties::new();
        props.insert("quantity".to_string(), PropertyValue::Int(5));
        let updated = merge_many_relationship_properties(&store, &pattern, &pairs, &props)
            .await
            .unwrap();
        assert_eq!(updated, 2);
    }
}
