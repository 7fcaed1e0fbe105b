//! Ordered `key:value` lists used for event tags and extra data.
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::utils::split_quoted;

/// Raised if an item of a key/value list has no `:` separator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid key/value item `{item}`: missing `:`")]
pub struct KvListParseError {
    item: String,
}

impl KvListParseError {
    /// Returns the offending item.
    pub fn item(&self) -> &str {
        &self.item
    }
}

/// An ordered list of string pairs, written as `k1:v1;k2:v2`.
///
/// Items may be quoted to embed a `;`.  The list serializes as a JSON
/// object in the order the items were given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KvList {
    items: Vec<(String, String)>,
}

impl KvList {
    /// Iterates over the pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list has no pairs.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders the members of the JSON object without the braces.
    ///
    /// `env:prod;unit:42` becomes `"env":"prod","unit":"42"`.
    pub fn to_json_fragment(&self) -> String {
        self.items
            .iter()
            .map(|(k, v)| format!("{}:{}", json_string(k), json_string(v)))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

impl FromStr for KvList {
    type Err = KvListParseError;

    fn from_str(s: &str) -> Result<KvList, KvListParseError> {
        let items = split_quoted(s, ';')
            .into_iter()
            .map(|item| match item.split_once(':') {
                Some((key, value)) => Ok((key.to_string(), value.to_string())),
                None => Err(KvListParseError { item }),
            })
            .collect::<Result<_, _>>()?;
        Ok(KvList { items })
    }
}

impl Serialize for KvList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, value) in &self.items {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fragment_preserves_order() {
        let list: KvList = "env:prod;unit:42".parse().unwrap();
        assert_eq!(list.to_json_fragment(), r#""env":"prod","unit":"42""#);
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec![("env", "prod"), ("unit", "42")]
        );
    }

    #[test]
    fn test_missing_colon_is_an_error() {
        let err = "env:prod;broken;unit:42".parse::<KvList>().unwrap_err();
        assert_eq!(err.item(), "broken");
    }

    #[test]
    fn test_empty_input() {
        let list: KvList = "".parse().unwrap();
        assert!(list.is_empty());
        assert_eq!(list.to_json_fragment(), "");
    }

    #[test]
    fn test_empty_value_and_colon_in_value() {
        let list: KvList = "a:;url:http://x".parse().unwrap();
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec![("a", ""), ("url", "http://x")]
        );
    }

    #[test]
    fn test_quoted_delimiter() {
        let list: KvList = "query:'a;b';n:1".parse().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_json_fragment(), r#""query":"a;b","n":"1""#);
    }

    #[test]
    fn test_values_are_escaped() {
        let list: KvList = r#"msg:say \"hi\"\\now"#.parse().unwrap();
        assert_eq!(list.to_json_fragment(), r#""msg":"say \"hi\"\\now""#);
        let list: KvList = "msg:tab\there".parse().unwrap();
        assert_eq!(list.to_json_fragment(), r#""msg":"tab\there""#);
    }

    #[test]
    fn test_serializes_as_object() {
        let list: KvList = "b:2;a:1".parse().unwrap();
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"{"b":"2","a":"1"}"#);
    }
}
