//! Meaning resolution.
//!
//! A scalar property's meaning sits on its wire value. A list property's
//! meaning sits on each element, and is only representable in the
//! application model when every element agrees.

use crate::error::DecodeError;
use crate::pb;

/// Returns the meaning set on a single wire value.
pub fn value_meaning(value: &pb::Value) -> Option<i32> {
    value.meaning
}

/// Returns the meaning shared by all elements of a list.
///
/// An empty list has no meaning. Elements that differ, including one set
/// and another unset, are a consistency error.
pub fn list_meaning(items: &[pb::Value]) -> Result<Option<i32>, DecodeError> {
    let Some((first, rest)) = items.split_first() else {
        return Ok(None);
    };
    let meaning = value_meaning(first);
    if rest.iter().any(|item| value_meaning(item) != meaning) {
        return Err(DecodeError::MixedListMeaning);
    }
    Ok(meaning)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_value(s: &str, meaning: Option<i32>) -> pb::Value {
        pb::Value {
            string_value: Some(s.to_string()),
            meaning,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_meaning() {
        assert_eq!(value_meaning(&pb::Value::default()), None);
    }

    #[test]
    fn test_single() {
        assert_eq!(value_meaning(&string_value("hi", Some(22))), Some(22));
    }

    #[test]
    fn test_zero_is_a_meaning() {
        assert_eq!(value_meaning(&string_value("hi", Some(0))), Some(0));
        assert_eq!(
            list_meaning(&[string_value("hi", Some(0)), string_value("bye", None)]),
            Err(DecodeError::MixedListMeaning)
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(list_meaning(&[]), Ok(None));
    }

    #[test]
    fn test_list_agreeing() {
        let items = [string_value("hi", Some(9)), string_value("bye", Some(9))];
        assert_eq!(list_meaning(&items), Ok(Some(9)));

        let items = [string_value("hi", None), string_value("bye", None)];
        assert_eq!(list_meaning(&items), Ok(None));
    }

    #[test]
    fn test_list_disagreeing() {
        let items = [string_value("hi", Some(9)), string_value("bye", Some(10))];
        assert_eq!(list_meaning(&items), Err(DecodeError::MixedListMeaning));
    }

    #[test]
    fn test_list_partially_unset() {
        let items = [string_value("hi", Some(9)), string_value("bye", None)];
        assert_eq!(list_meaning(&items), Err(DecodeError::MixedListMeaning));
    }
}
