//! Cultivar and ecotype parameter sets
//!
//! A parameter set is an open map of coefficient name to value, keyed in the
//! experiment by `seqid`. Null coefficients are dropped on load.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::Scalar;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "BTreeMap<String, Option<Scalar>>")]
pub struct ParamSet(BTreeMap<String, Scalar>);

impl From<BTreeMap<String, Option<Scalar>>> for ParamSet {
    fn from(raw: BTreeMap<String, Option<Scalar>>) -> Self {
        ParamSet(raw.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))).collect())
    }
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Scalar> {
        self.0.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sequence id this set is bound to (empty text when absent).
    pub fn seqid(&self) -> &str {
        self.0.get("seqid").map(|s| s.as_str()).unwrap_or("")
    }
}

impl crate::xref::Record for ParamSet {
    fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ParamSet(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nulls_dropped_and_numbers_kept() {
        let set: ParamSet =
            serde_json::from_str(r#"{"seqid": "1", "p1": 200, "p2": null, "eco": "IB0001"}"#)
                .unwrap();
        assert_eq!(set.seqid(), "1");
        assert_eq!(set.get("p1").unwrap().as_str(), "200");
        assert!(!set.contains_key("p2"));
    }
}
