//! Entities: an optional key plus named properties in insertion order.

use rustc_hash::FxHashMap;

use crate::model::{Key, Value};

/// Semantic annotation a property carried when it was decoded.
///
/// `original` is the value as decoded; the annotation is written back only
/// while the property still holds exactly that value.
#[derive(Debug, Clone, PartialEq)]
pub struct Meaning {
    pub code: i32,
    pub original: Value,
}

/// A named value with its indexing flag and decode-time meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Value,
    /// Excluded from secondary indexes.
    pub excluded: bool,
    pub meaning: Option<Meaning>,
}

impl Property {
    /// Creates an indexed property with no meaning.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            excluded: false,
            meaning: None,
        }
    }

    /// Returns the meaning code if the current value is still the decoded one.
    pub fn current_meaning(&self) -> Option<i32> {
        self.meaning
            .as_ref()
            .filter(|m| m.original == self.value)
            .map(|m| m.code)
    }
}

/// A property bag with an optional owning key.
///
/// Property names are unique. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    key: Option<Key>,
    properties: Vec<Property>,
    /// Property name -> position in `properties`.
    index: FxHashMap<String, usize>,
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.properties == other.properties
    }
}

impl Entity {
    /// Creates an empty entity with no key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty entity owned by the given key.
    pub fn with_key(key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::default()
        }
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn set_key(&mut self, key: Option<Key>) {
        self.key = key;
    }

    /// Kind of the entity's key, if it has one.
    pub fn kind(&self) -> Option<&str> {
        self.key.as_ref().map(Key::kind)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.property(name).map(|p| &p.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let pos = *self.index.get(name)?;
        Some(&mut self.properties[pos].value)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.index.get(name).map(|&pos| &self.properties[pos])
    }

    /// Assigns a value, returning the previous one.
    ///
    /// An existing property keeps its position, index exclusion and meaning
    /// record; the meaning is only re-emitted if the new value equals the
    /// decoded one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.index.get(&name) {
            Some(&pos) => Some(std::mem::replace(&mut self.properties[pos].value, value)),
            None => {
                self.push(Property::new(name, value));
                None
            }
        }
    }

    /// Inserts a whole property record, replacing any property of that name.
    pub fn insert(&mut self, property: Property) -> Option<Property> {
        match self.index.get(&property.name) {
            Some(&pos) => Some(std::mem::replace(&mut self.properties[pos], property)),
            None => {
                self.push(property);
                None
            }
        }
    }

    fn push(&mut self, property: Property) {
        self.index.insert(property.name.clone(), self.properties.len());
        self.properties.push(property);
    }

    /// Removes a property along with its flags.
    pub fn remove(&mut self, name: &str) -> Option<Property> {
        let pos = self.index.remove(name)?;
        let removed = self.properties.remove(pos);
        for property in &self.properties[pos..] {
            if let Some(slot) = self.index.get_mut(&property.name) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Marks a property as excluded from indexes.
    ///
    /// Returns false if there is no such property.
    pub fn exclude_from_indexes(&mut self, name: &str) -> bool {
        self.set_flag(name, true)
    }

    /// Clears the index exclusion of a property.
    pub fn include_in_indexes(&mut self, name: &str) -> bool {
        self.set_flag(name, false)
    }

    fn set_flag(&mut self, name: &str, excluded: bool) -> bool {
        match self.index.get(name) {
            Some(&pos) => {
                self.properties[pos].excluded = excluded;
                true
            }
            None => false,
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.property(name).is_some_and(|p| p.excluded)
    }

    /// Names of properties excluded from indexes, in property order.
    pub fn excluded(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|p| p.excluded)
            .map(|p| p.name.as_str())
    }

    /// Attaches a meaning record to a property.
    ///
    /// Returns false if there is no such property.
    pub fn set_meaning(&mut self, name: &str, meaning: Option<Meaning>) -> bool {
        match self.index.get(name) {
            Some(&pos) => {
                self.properties[pos].meaning = meaning;
                true
            }
            None => false,
        }
    }

    pub fn meaning(&self, name: &str) -> Option<&Meaning> {
        self.property(name).and_then(|p| p.meaning.as_ref())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

impl<'a> IntoIterator for &'a Entity {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_preserves_order_and_flags() {
        let mut entity = Entity::new();
        assert_eq!(entity.set("foo", 42), None);
        entity.set("bar", "some-string");
        assert!(entity.exclude_from_indexes("foo"));
        assert!(!entity.exclude_from_indexes("missing"));

        assert_eq!(entity.set("foo", 43), Some(Value::Integer(42)));
        assert!(entity.is_excluded("foo"));

        let names: Vec<&str> = entity.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["foo", "bar"]);
        assert_eq!(entity.excluded().collect::<Vec<_>>(), ["foo"]);
    }

    #[test]
    fn test_remove_reindexes() {
        let mut entity = Entity::new();
        entity.set("a", 1);
        entity.set("b", 2);
        entity.set("c", 3);

        let removed = entity.remove("a").unwrap();
        assert_eq!(removed.value, Value::Integer(1));
        assert_eq!(entity.get("b"), Some(&Value::Integer(2)));
        assert_eq!(entity.get("c"), Some(&Value::Integer(3)));
        assert!(entity.remove("a").is_none());
        assert_eq!(entity.len(), 2);
    }

    #[test]
    fn test_current_meaning_tracks_value() {
        let mut entity = Entity::new();
        entity.set("foo", 1337);
        entity.set_meaning("foo", Some(Meaning { code: 9, original: Value::Integer(1337) }));
        assert_eq!(entity.property("foo").unwrap().current_meaning(), Some(9));

        entity.set("foo", 42);
        assert_eq!(entity.property("foo").unwrap().current_meaning(), None);
        assert_eq!(entity.meaning("foo").map(|m| m.code), Some(9));

        *entity.get_mut("foo").unwrap() = Value::Integer(1337);
        assert_eq!(entity.property("foo").unwrap().current_meaning(), Some(9));
    }

    #[test]
    fn test_kind_from_key() {
        assert_eq!(Entity::new().kind(), None);
        let key = Key::single("KIND", "name").unwrap();
        assert_eq!(Entity::with_key(key).kind(), Some("KIND"));
    }
}
