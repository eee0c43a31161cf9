use crate::types::Comment;
use serde::Deserialize;

// ============================================================================
// Filter request types
// ============================================================================

/// How multiple filters combine: `and` narrows progressively, `or` unions the
/// per-filter matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterRelationship {
    #[default]
    And,
    Or,
}

/// A single field/value predicate as supplied on the wire. The field is kept
/// as free text so an unrecognized name surfaces as a validation error naming
/// it, not as a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: FilterValue,
}

/// The wire value of a filter, decoded without assuming a type up front.
/// Whether a number or text is acceptable depends on the field it is paired
/// with; anything else is never acceptable.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("invalid field {0:?} is provided")]
    UnknownField(String),

    #[error("invalid data type for {0:?} is provided")]
    TypeMismatch(String),
}

// ============================================================================
// Predicate — a validated filter
// ============================================================================

/// A filter whose field has been recognized and whose value has been narrowed
/// to the field's type. Matching a `Predicate` cannot fail.
#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    PostId(u32),
    Id(u32),
    Name(String),
    Email(String),
    Body(String),
}

impl Predicate {
    fn compile(filter: &Filter) -> Result<Self, FilterError> {
        match filter.field.as_str() {
            "postId" => Ok(Self::PostId(numeric_value(filter)?)),
            "id" => Ok(Self::Id(numeric_value(filter)?)),
            "name" => Ok(Self::Name(text_value(filter)?)),
            "email" => Ok(Self::Email(text_value(filter)?)),
            "body" => Ok(Self::Body(text_value(filter)?)),
            _ => Err(FilterError::UnknownField(filter.field.clone())),
        }
    }

    fn matches(&self, comment: &Comment) -> bool {
        match self {
            Self::PostId(value) => comment.post_id == *value,
            Self::Id(value) => comment.id == *value,
            Self::Name(value) => comment.name == *value,
            Self::Email(value) => comment.email == *value,
            Self::Body(value) => comment.body == *value,
        }
    }
}

/// Narrow a numeric wire value to the integer width of the id fields.
fn numeric_value(filter: &Filter) -> Result<u32, FilterError> {
    match filter.value {
        FilterValue::Number(n) => Ok(n as u32),
        _ => Err(FilterError::TypeMismatch(filter.field.clone())),
    }
}

fn text_value(filter: &Filter) -> Result<String, FilterError> {
    match &filter.value {
        FilterValue::Text(s) => Ok(s.clone()),
        _ => Err(FilterError::TypeMismatch(filter.field.clone())),
    }
}

// ============================================================================
// Filtering
// ============================================================================

/// Apply an ordered list of filters to a comment collection.
///
/// Every filter is validated before any matching happens, so an invalid
/// filter never produces partial results. An empty filter list produces an
/// empty result in both modes.
///
/// - `And`: filter 0 runs against the full input; each later filter runs
///   against the previous filter's survivors.
/// - `Or`: each filter runs against the full input; matches are concatenated
///   in filter order. A comment matched by several filters appears once per
///   matching filter.
pub fn filter_comments(
    comments: &[Comment],
    filters: &[Filter],
    relationship: FilterRelationship,
) -> Result<Vec<Comment>, FilterError> {
    let predicates = filters
        .iter()
        .map(Predicate::compile)
        .collect::<Result<Vec<_>, _>>()?;

    let filtered = match relationship {
        FilterRelationship::And => {
            let mut survivors: Vec<Comment> = Vec::new();
            for (round, predicate) in predicates.iter().enumerate() {
                let pool: &[Comment] = if round == 0 { comments } else { &survivors };
                let next: Vec<Comment> = pool
                    .iter()
                    .filter(|c| predicate.matches(c))
                    .cloned()
                    .collect();
                survivors = next;
            }
            survivors
        }
        FilterRelationship::Or => predicates
            .iter()
            .flat_map(|predicate| {
                comments
                    .iter()
                    .filter(|c| predicate.matches(c))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect(),
    };

    Ok(filtered)
}
