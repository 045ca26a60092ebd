//! The closed graph schema: entity labels, relationship types and the
//! natural key each label is addressed by.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::GraphError;

/// Minimum number of properties accepted by create-node-with-properties.
pub const MIN_NODE_PROPERTIES: usize = 5;

/// Minimum number of properties accepted by create-relationship.
pub const MIN_RELATIONSHIP_PROPERTIES: usize = 3;

/// Hard cap on rows returned by node listings.
pub const NODE_LIST_LIMIT: usize = 100;

/// Entity labels known to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Label {
    Component,
    Category,
    Provider,
    User,
    Review,
}

impl Label {
    pub const ALL: [Label; 5] = [
        Label::Component,
        Label::Category,
        Label::Provider,
        Label::User,
        Label::Review,
    ];

    /// The Neo4j node label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Component => "Component",
            Label::Category => "Category",
            Label::Provider => "Provider",
            Label::User => "User",
            Label::Review => "Review",
        }
    }

    /// The natural-key property for this label.
    pub fn identifier_key(&self) -> &'static str {
        match self {
            Label::Review => "title",
            _ => "name",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Label::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| GraphError::InvalidLabel(s.to_string()))
    }
}

/// Resolve the natural-key property name for a label given as text.
pub fn identifier_key(label: &str) -> Result<&'static str, GraphError> {
    Ok(label.parse::<Label>()?.identifier_key())
}

/// Relationship types known to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RelationshipType {
    Purchased,
    Categorized,
    Supplies,
    Reviews,
    Promotes,
    AssociatedWith,
    Searched,
    Wants,
    Writes,
    Complements,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 10] = [
        RelationshipType::Purchased,
        RelationshipType::Categorized,
        RelationshipType::Supplies,
        RelationshipType::Reviews,
        RelationshipType::Promotes,
        RelationshipType::AssociatedWith,
        RelationshipType::Searched,
        RelationshipType::Wants,
        RelationshipType::Writes,
        RelationshipType::Complements,
    ];

    /// The Neo4j relationship type.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Purchased => "PURCHASED",
            RelationshipType::Categorized => "CATEGORIZED",
            RelationshipType::Supplies => "SUPPLIES",
            RelationshipType::Reviews => "REVIEWS",
            RelationshipType::Promotes => "PROMOTES",
            RelationshipType::AssociatedWith => "ASSOCIATED_WITH",
            RelationshipType::Searched => "SEARCHED",
            RelationshipType::Wants => "WANTS",
            RelationshipType::Writes => "WRITES",
            RelationshipType::Complements => "COMPLEMENTS",
        }
    }

    /// The (source, target) labels this relationship connects.
    pub fn endpoints(&self) -> (Label, Label) {
        match self {
            RelationshipType::Purchased => (Label::User, Label::Component),
            RelationshipType::Categorized => (Label::Component, Label::Category),
            RelationshipType::Supplies => (Label::Provider, Label::Component),
            RelationshipType::Reviews => (Label::Review, Label::Component),
            RelationshipType::Promotes => (Label::Provider, Label::User),
            RelationshipType::AssociatedWith => (Label::Provider, Label::Category),
            RelationshipType::Searched => (Label::User, Label::Component),
            RelationshipType::Wants => (Label::User, Label::Component),
            RelationshipType::Writes => (Label::User, Label::Review),
            RelationshipType::Complements => (Label::Component, Label::Component),
        }
    }

    /// Whether `from -> to` is the direction this type is declared for.
    pub fn connects(&self, from: Label, to: Label) -> bool {
        self.endpoints() == (from, to)
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipType {
    type Err = GraphError;

    /// Case-insensitive, so form values such as `Associated_with` resolve too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        RelationshipType::ALL
            .into_iter()
            .find(|rel| rel.as_str() == upper)
            .ok_or_else(|| GraphError::InvalidRelationshipType(s.to_string()))
    }
}

/// CSV file holding the rows for one node label.
#[derive(Debug, Clone, Copy)]
pub struct NodeSource {
    pub file: &'static str,
    pub label: Label,
}

/// CSV file holding the rows for one relationship type.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipSource {
    pub file: &'static str,
    pub relationship_type: RelationshipType,
}

/// Node input files, in load order.
pub const NODE_SOURCES: &[NodeSource] = &[
    NodeSource { file: "components.csv", label: Label::Component },
    NodeSource { file: "categories.csv", label: Label::Category },
    NodeSource { file: "users.csv", label: Label::User },
    NodeSource { file: "reviews.csv", label: Label::Review },
    NodeSource { file: "providers.csv", label: Label::Provider },
];

/// Relationship input files, in load order.
pub const RELATIONSHIP_SOURCES: &[RelationshipSource] = &[
    RelationshipSource { file: "relations_purchase.csv", relationship_type: RelationshipType::Purchased },
    RelationshipSource { file: "relations_categorize.csv", relationship_type: RelationshipType::Categorized },
    RelationshipSource { file: "relations_supply.csv", relationship_type: RelationshipType::Supplies },
    RelationshipSource { file: "relations_review.csv", relationship_type: RelationshipType::Reviews },
    RelationshipSource { file: "relations_promote.csv", relationship_type: RelationshipType::Promotes },
    RelationshipSource { file: "relations_associate.csv", relationship_type: RelationshipType::AssociatedWith },
    RelationshipSource { file: "relations_search.csv", relationship_type: RelationshipType::Searched },
    RelationshipSource { file: "relations_wishlist.csv", relationship_type: RelationshipType::Wants },
    RelationshipSource { file: "relations_write.csv", relationship_type: RelationshipType::Writes },
    RelationshipSource { file: "relations_complement.csv", relationship_type: RelationshipType::Complements },
];

/// Look up the input file for a label.
pub fn node_source(label: Label) -> &'static NodeSource {
    // NODE_SOURCES covers every label
    NODE_SOURCES
        .iter()
        .find(|source| source.label == label)
        .unwrap_or(&NODE_SOURCES[0])
}

/// Look up the input file for a relationship type.
pub fn relationship_source(relationship_type: RelationshipType) -> &'static RelationshipSource {
    RELATIONSHIP_SOURCES
        .iter()
        .find(|source| source.relationship_type == relationship_type)
        .unwrap_or(&RELATIONSHIP_SOURCES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_key_per_label() {
        assert_eq!(Label::Review.identifier_key(), "title");
        for label in [Label::Component, Label::Category, Label::Provider, Label::User] {
            assert_eq!(label.identifier_key(), "name");
        }
    }

    #[test]
    fn test_identifier_key_rejects_unknown_label() {
        assert_eq!(identifier_key("Review").unwrap(), "title");
        assert!(matches!(identifier_key("Spaceship"), Err(GraphError::InvalidLabel(_))));
        // labels are case-sensitive
        assert!(identifier_key("component").is_err());
    }

    #[test]
    fn test_relationship_type_parsing() {
        assert_eq!("PURCHASED".parse::<RelationshipType>().unwrap(), RelationshipType::Purchased);
        assert_eq!("Associated_with".parse::<RelationshipType>().unwrap(), RelationshipType::AssociatedWith);
        assert!(matches!(
            "LIKES".parse::<RelationshipType>(),
            Err(GraphError::InvalidRelationshipType(_))
        ));
    }

    #[test]
    fn test_endpoints() {
        assert!(RelationshipType::Writes.connects(Label::User, Label::Review));
        assert!(!RelationshipType::Writes.connects(Label::Review, Label::User));
        assert_eq!(RelationshipType::Complements.endpoints(), (Label::Component, Label::Component));
    }

    #[test]
    fn test_source_tables_cover_schema() {
        for label in Label::ALL {
            assert_eq!(node_source(label).label, label);
        }
        for rel in RelationshipType::ALL {
            assert_eq!(relationship_source(rel).relationship_type, rel);
        }
        assert_eq!(relationship_source(RelationshipType::Wants).file, "relations_wishlist.csv");
    }
}
