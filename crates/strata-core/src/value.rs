//! Literal value trees attached to override edges.
//!
//! A value is a tagged node (scalar, object, array, or dynamic map) plus an
//! optional scalar constraint and an optional alias name. Scalar content is
//! carried as the source text: the compiler is purely structural and never
//! evaluates literals except to check them against a constraint.

use std::collections::BTreeSet;

use regex_automata::meta;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ir::Kind;
use crate::structure::TypeId;

/// Primitive scalar type of a leaf node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    Boolean,
    Float,
    Integer,
    String,
}

impl Scalar {
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Boolean => "boolean",
            Scalar::Float => "float",
            Scalar::Integer => "integer",
            Scalar::String => "string",
        }
    }

    /// Primitive type id for this scalar.
    pub fn type_id(self) -> TypeId {
        match self {
            Scalar::Boolean => TypeId::BOOLEAN,
            Scalar::Float => TypeId::FLOAT,
            Scalar::Integer => TypeId::INTEGER,
            Scalar::String => TypeId::STRING,
        }
    }
}

/// The tagged payload of a value node.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    Scalar {
        scalar: Scalar,
        content: String,
    },
    /// Named children in source order. `structure` is filled in by the
    /// extractor once the composite signature has been interned.
    Object {
        properties: Vec<(String, Value)>,
        #[serde(skip_serializing_if = "Option::is_none")]
        structure: Option<TypeId>,
    },
    Array {
        elements: Vec<Value>,
    },
    /// String-keyed map with a uniform element type.
    Dynamic {
        properties: Vec<(String, Value)>,
    },
}

/// A literal value tree.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Value {
    #[serde(flatten)]
    pub node: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Value {
    fn from_node(node: Node) -> Self {
        Self {
            node,
            constraint: None,
            alias: None,
        }
    }

    pub fn boolean(content: bool) -> Self {
        Self::from_node(Node::Scalar {
            scalar: Scalar::Boolean,
            content: if content { "true" } else { "false" }.to_owned(),
        })
    }

    pub fn integer(content: i64) -> Self {
        Self::from_node(Node::Scalar {
            scalar: Scalar::Integer,
            content: content.to_string(),
        })
    }

    pub fn float(content: f64) -> Self {
        Self::from_node(Node::Scalar {
            scalar: Scalar::Float,
            content: content.to_string(),
        })
    }

    pub fn string(content: impl Into<String>) -> Self {
        Self::from_node(Node::Scalar {
            scalar: Scalar::String,
            content: content.into(),
        })
    }

    /// A scalar with explicit type and source content.
    pub fn scalar(scalar: Scalar, content: impl Into<String>) -> Self {
        Self::from_node(Node::Scalar {
            scalar,
            content: content.into(),
        })
    }

    pub fn object(properties: Vec<(String, Value)>) -> Self {
        Self::from_node(Node::Object {
            properties,
            structure: None,
        })
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Self::from_node(Node::Array { elements })
    }

    pub fn dynamic(properties: Vec<(String, Value)>) -> Self {
        Self::from_node(Node::Dynamic { properties })
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Container kind of this node: array, dynamic map, or plain.
    pub fn kind(&self) -> Kind {
        match &self.node {
            Node::Array { .. } => Kind::Array,
            Node::Dynamic { .. } => Kind::Dynamic,
            _ => Kind::None,
        }
    }

    /// Scalar content, if this is a leaf.
    pub fn content(&self) -> Option<&str> {
        match &self.node {
            Node::Scalar { content, .. } => Some(content.as_str()),
            _ => None,
        }
    }

    /// Human-readable name of the node's type, for diagnostics.
    pub fn type_label(&self) -> &'static str {
        match &self.node {
            Node::Scalar { scalar, .. } => scalar.name(),
            Node::Object { .. } => "object",
            Node::Array { .. } => "array",
            Node::Dynamic { .. } => "dynamic",
        }
    }
}

/// A constraint attached to a scalar position on the representative branch.
///
/// Every override branch's literal at that position must satisfy it.
#[derive(Debug, Clone)]
pub enum Constraint {
    Regex(RegexConstraint),
    /// Closed set of allowed source strings.
    OneOf(BTreeSet<String>),
}

impl Constraint {
    /// Compile a regex constraint. The pattern must match the whole
    /// content, not a substring.
    pub fn regex(pattern: &str) -> Result<Self, meta::BuildError> {
        Ok(Constraint::Regex(RegexConstraint::new(pattern)?))
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constraint::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Whether the given scalar content satisfies the constraint.
    pub fn is_satisfied_by(&self, content: &str) -> bool {
        match self {
            Constraint::Regex(regex) => regex.is_full_match(content),
            Constraint::OneOf(values) => values.contains(content),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Constraint::Regex(regex) => format!("regex `{}`", regex.pattern()),
            Constraint::OneOf(values) => {
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                format!("set {{{}}}", values.join(", "))
            }
        }
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constraint::Regex(a), Constraint::Regex(b)) => a.pattern() == b.pattern(),
            (Constraint::OneOf(a), Constraint::OneOf(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Constraint::Regex(regex) => map.serialize_entry("regex", regex.pattern())?,
            Constraint::OneOf(values) => map.serialize_entry("one_of", values)?,
        }
        map.end()
    }
}

/// A compiled full-match regular expression.
#[derive(Debug, Clone)]
pub struct RegexConstraint {
    pattern: String,
    regex: meta::Regex,
}

impl RegexConstraint {
    pub fn new(pattern: &str) -> Result<Self, meta::BuildError> {
        Ok(Self {
            pattern: pattern.to_owned(),
            regex: meta::Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern matches the entire input.
    pub fn is_full_match(&self, content: &str) -> bool {
        self.regex
            .find(content)
            .is_some_and(|m| m.start() == 0 && m.end() == content.len())
    }
}
