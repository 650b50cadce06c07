//! # Party References
//!
//! A dialog entry names the parties that took part in it by index into the
//! document's party list. The JSON form is either a bare integer or an
//! array of integers; both are accepted and written back as they came.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Index or indices into the owning document's party list.
///
/// This is a weak reference: validity depends on the document it is
/// checked against (see [`PartyRef::check_bounds`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartyRef {
    /// A single party, serialized as a bare integer.
    Single(usize),
    /// Several parties, serialized as an array.
    Many(Vec<usize>),
}

impl PartyRef {
    /// All referenced party indices, in order.
    pub fn indices(&self) -> Vec<usize> {
        match self {
            PartyRef::Single(i) => vec![*i],
            PartyRef::Many(v) => v.clone(),
        }
    }

    /// Returns `true` if no party is referenced.
    pub fn is_empty(&self) -> bool {
        matches!(self, PartyRef::Many(v) if v.is_empty())
    }

    /// Check every index against a party list of length `party_count`.
    pub fn check_bounds(&self, party_count: usize) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPartyRef);
        }
        match self.indices().into_iter().find(|&i| i >= party_count) {
            Some(index) => Err(ValidationError::PartyIndexOutOfRange {
                index,
                count: party_count,
            }),
            None => Ok(()),
        }
    }
}

impl From<usize> for PartyRef {
    fn from(index: usize) -> Self {
        PartyRef::Single(index)
    }
}

impl From<Vec<usize>> for PartyRef {
    fn from(indices: Vec<usize>) -> Self {
        PartyRef::Many(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&PartyRef::Single(0)).unwrap(), "0");
    }

    #[test]
    fn many_serializes_as_array() {
        let r = PartyRef::Many(vec![0, 1]);
        assert_eq!(serde_json::to_string(&r).unwrap(), "[0,1]");
    }

    #[test]
    fn deserializes_both_forms() {
        let single: PartyRef = serde_json::from_str("2").unwrap();
        assert_eq!(single, PartyRef::Single(2));
        let many: PartyRef = serde_json::from_str("[1,0]").unwrap();
        assert_eq!(many, PartyRef::Many(vec![1, 0]));
    }

    #[test]
    fn rejects_negative_index() {
        assert!(serde_json::from_str::<PartyRef>("-1").is_err());
    }

    #[test]
    fn check_bounds_accepts_valid() {
        assert!(PartyRef::Single(1).check_bounds(2).is_ok());
        assert!(PartyRef::Many(vec![0, 1]).check_bounds(2).is_ok());
    }

    #[test]
    fn check_bounds_rejects_out_of_range() {
        let err = PartyRef::Many(vec![0, 5]).check_bounds(2).unwrap_err();
        assert_eq!(
            err,
            ValidationError::PartyIndexOutOfRange { index: 5, count: 2 }
        );
    }

    #[test]
    fn check_bounds_rejects_empty() {
        let err = PartyRef::Many(vec![]).check_bounds(2).unwrap_err();
        assert_eq!(err, ValidationError::EmptyPartyRef);
    }

    #[test]
    fn indices_preserve_order() {
        assert_eq!(PartyRef::Many(vec![3, 1, 2]).indices(), vec![3, 1, 2]);
        assert_eq!(PartyRef::from(4).indices(), vec![4]);
    }
}
