//! Hierarchical keys.
//!
//! A key is a dataset id, an optional namespace and a non-empty path of
//! `(kind, id | name)` elements. Only the last element may lack an
//! identifier; such a key is partial and waits for the service to allocate
//! an id.

use crate::error::KeyError;

/// Identifier of a path element: integer id or string name, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyId {
    Id(i64),
    Name(String),
}

impl From<i64> for KeyId {
    fn from(id: i64) -> Self {
        KeyId::Id(id)
    }
}

impl From<&str> for KeyId {
    fn from(name: &str) -> Self {
        KeyId::Name(name.to_string())
    }
}

impl From<String> for KeyId {
    fn from(name: String) -> Self {
        KeyId::Name(name)
    }
}

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathElement {
    /// The entity kind. Required.
    pub kind: String,
    /// The identifier, or None for an element awaiting allocation.
    pub id_or_name: Option<KeyId>,
}

impl PathElement {
    /// Creates an element with no identifier.
    pub fn incomplete(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id_or_name: None,
        }
    }

    /// Creates an element identified by integer id.
    pub fn with_id(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id_or_name: Some(KeyId::Id(id)),
        }
    }

    /// Creates an element identified by string name.
    pub fn with_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id_or_name: Some(KeyId::Name(name.into())),
        }
    }

    /// Returns the integer id, if this element has one.
    pub fn id(&self) -> Option<i64> {
        match self.id_or_name {
            Some(KeyId::Id(id)) => Some(id),
            _ => None,
        }
    }

    /// Returns the string name, if this element has one.
    pub fn name(&self) -> Option<&str> {
        match &self.id_or_name {
            Some(KeyId::Name(name)) => Some(name),
            _ => None,
        }
    }
}

/// An immutable, validated key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    dataset_id: Option<String>,
    namespace: Option<String>,
    path: Vec<PathElement>,
}

impl Key {
    /// Creates a key from its path.
    ///
    /// Fails if the path is empty, if any element has an empty kind, or if
    /// an element other than the last has no identifier.
    pub fn new(path: Vec<PathElement>) -> Result<Self, KeyError> {
        validate_path(&path)?;
        Ok(Self {
            dataset_id: None,
            namespace: None,
            path,
        })
    }

    /// Creates a single-element key.
    pub fn single(kind: impl Into<String>, id_or_name: impl Into<KeyId>) -> Result<Self, KeyError> {
        Self::new(vec![PathElement {
            kind: kind.into(),
            id_or_name: Some(id_or_name.into()),
        }])
    }

    /// Creates a key from a path the caller already knows to be valid.
    pub(crate) fn from_valid_path(path: Vec<PathElement>) -> Self {
        debug_assert!(validate_path(&path).is_ok());
        Self {
            dataset_id: None,
            namespace: None,
            path,
        }
    }

    /// Sets the dataset id.
    pub fn with_dataset_id(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = Some(dataset_id.into());
        self
    }

    /// Sets the namespace.
    ///
    /// An empty namespace is the default namespace and is stored as None.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into()).filter(|ns| !ns.is_empty());
        self
    }

    pub(crate) fn set_partition(&mut self, dataset_id: Option<String>, namespace: Option<String>) {
        self.dataset_id = dataset_id;
        self.namespace = namespace.filter(|ns| !ns.is_empty());
    }

    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset_id.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn path(&self) -> &[PathElement] {
        &self.path
    }

    fn last(&self) -> &PathElement {
        // Construction guarantees a non-empty path.
        &self.path[self.path.len() - 1]
    }

    /// Kind of the last path element.
    pub fn kind(&self) -> &str {
        &self.last().kind
    }

    /// Integer id of the last path element.
    pub fn id(&self) -> Option<i64> {
        self.last().id()
    }

    /// Name of the last path element.
    pub fn name(&self) -> Option<&str> {
        self.last().name()
    }

    /// Identifier of the last path element.
    pub fn id_or_name(&self) -> Option<&KeyId> {
        self.last().id_or_name.as_ref()
    }

    /// Returns true if the last element has no identifier yet.
    pub fn is_partial(&self) -> bool {
        self.last().id_or_name.is_none()
    }

    /// Returns the key one level up, sharing dataset and namespace.
    ///
    /// Returns None for a single-element key.
    pub fn parent(&self) -> Option<Key> {
        if self.path.len() < 2 {
            return None;
        }
        Some(Key {
            dataset_id: self.dataset_id.clone(),
            namespace: self.namespace.clone(),
            path: self.path[..self.path.len() - 1].to_vec(),
        })
    }

    /// Returns a copy of a partial key with its last element identified.
    ///
    /// Returns None if the key is already complete.
    pub fn completed(&self, id_or_name: impl Into<KeyId>) -> Option<Key> {
        if !self.is_partial() {
            return None;
        }
        let mut key = self.clone();
        let last = key.path.len() - 1;
        key.path[last].id_or_name = Some(id_or_name.into());
        Some(key)
    }

    /// Flattens the path into alternating kinds and identifiers.
    ///
    /// A partial key ends with its kind.
    pub fn flat_path(&self) -> Vec<FlatPathItem<'_>> {
        let mut flat = Vec::with_capacity(self.path.len() * 2);
        for element in &self.path {
            flat.push(FlatPathItem::Kind(&element.kind));
            if let Some(id_or_name) = &element.id_or_name {
                flat.push(FlatPathItem::Id(id_or_name));
            }
        }
        flat
    }
}

/// An item of [`Key::flat_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlatPathItem<'a> {
    Kind(&'a str),
    Id(&'a KeyId),
}

fn validate_path(path: &[PathElement]) -> Result<(), KeyError> {
    if path.is_empty() {
        return Err(KeyError::EmptyPath);
    }
    let last = path.len() - 1;
    for (index, element) in path.iter().enumerate() {
        if element.kind.is_empty() {
            return Err(KeyError::MissingKind { index });
        }
        if index != last && element.id_or_name.is_none() {
            return Err(KeyError::IncompleteAncestor { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_path() {
        assert_eq!(Key::new(vec![]), Err(KeyError::EmptyPath));
        assert_eq!(
            Key::new(vec![PathElement::incomplete("")]),
            Err(KeyError::MissingKind { index: 0 })
        );
        assert_eq!(
            Key::new(vec![PathElement::incomplete("Parent"), PathElement::with_id("Child", 1)]),
            Err(KeyError::IncompleteAncestor { index: 0 })
        );
        assert!(Key::new(vec![PathElement::incomplete("Kind")]).is_ok());
    }

    #[test]
    fn test_accessors() {
        let key = Key::new(vec![
            PathElement::with_name("Family", "Spades"),
            PathElement::with_id("King", 1234),
        ])
        .unwrap()
        .with_dataset_id("DATASET");

        assert_eq!(key.kind(), "King");
        assert_eq!(key.id(), Some(1234));
        assert_eq!(key.name(), None);
        assert_eq!(key.dataset_id(), Some("DATASET"));
        assert_eq!(key.namespace(), None);
        assert!(!key.is_partial());

        let parent = key.parent().unwrap();
        assert_eq!(parent.kind(), "Family");
        assert_eq!(parent.name(), Some("Spades"));
        assert_eq!(parent.dataset_id(), Some("DATASET"));
        assert!(parent.parent().is_none());
    }

    #[test]
    fn test_empty_namespace_is_default() {
        let key = Key::single("KIND", 1i64).unwrap().with_namespace("");
        assert_eq!(key.namespace(), None);
        assert_eq!(key, Key::single("KIND", 1i64).unwrap());

        let mut key = Key::single("KIND", 1i64).unwrap();
        key.set_partition(Some("DATASET".to_string()), Some(String::new()));
        assert_eq!(key.dataset_id(), Some("DATASET"));
        assert_eq!(key.namespace(), None);
    }

    #[test]
    fn test_completed() {
        let partial = Key::new(vec![PathElement::incomplete("Kind")]).unwrap();
        assert!(partial.is_partial());

        let complete = partial.completed(42i64).unwrap();
        assert_eq!(complete.id(), Some(42));
        assert!(complete.completed(43i64).is_none());
    }

    #[test]
    fn test_flat_path() {
        let key = Key::new(vec![
            PathElement::with_id("Parent", 1),
            PathElement::incomplete("Child"),
        ])
        .unwrap();
        let id = KeyId::Id(1);
        assert_eq!(
            key.flat_path(),
            vec![
                FlatPathItem::Kind("Parent"),
                FlatPathItem::Id(&id),
                FlatPathItem::Kind("Child"),
            ]
        );
    }
}
