//! Active service calendars.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Largest service code an active set accepts.
///
/// The set is a dense bitset, so the highest code sets its memory use.
pub const MAX_SERVICE_CODE: u32 = 1 << 20;

/// Set of service codes running on the day being converted.
///
/// Stored as a bitset indexed by `service_code`.
///
/// # Examples
///
/// ```
/// use frequency_convert::domain::ServiceActiveSet;
///
/// let active = ServiceActiveSet::from_codes([0, 3, 64]).unwrap();
/// assert!(active.contains(3));
/// assert!(active.contains(64));
/// assert!(!active.contains(1));
/// assert_eq!(active.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct ServiceActiveSet {
    words: Vec<u64>,
}

impl ServiceActiveSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from service codes.
    pub fn from_codes(codes: impl IntoIterator<Item = u32>) -> Result<Self, DomainError> {
        let mut set = Self::new();
        for code in codes {
            set.insert(code)?;
        }
        Ok(set)
    }

    /// Mark a service as active.
    ///
    /// Codes above [`MAX_SERVICE_CODE`] are rejected.
    pub fn insert(&mut self, code: u32) -> Result<(), DomainError> {
        if code > MAX_SERVICE_CODE {
            return Err(DomainError::ServiceCodeOutOfRange(code));
        }
        let (word, bit) = Self::position(code);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1 << bit;
        Ok(())
    }

    /// Is the given service active?
    pub fn contains(&self, code: u32) -> bool {
        let (word, bit) = Self::position(code);
        self.words
            .get(word)
            .is_some_and(|w| w & (1 << bit) != 0)
    }

    /// Iterate active service codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().enumerate().flat_map(|(word, bits)| {
            (0..64u32)
                .filter(move |bit| bits & (1 << bit) != 0)
                .map(move |bit| word as u32 * 64 + bit)
        })
    }

    /// Returns the number of active services.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no service is active.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    fn position(code: u32) -> (usize, u32) {
        ((code / 64) as usize, code % 64)
    }
}

impl TryFrom<Vec<u32>> for ServiceActiveSet {
    type Error = DomainError;

    fn try_from(codes: Vec<u32>) -> Result<Self, Self::Error> {
        Self::from_codes(codes)
    }
}

impl From<ServiceActiveSet> for Vec<u32> {
    fn from(set: ServiceActiveSet) -> Self {
        set.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set() {
        let set = ServiceActiveSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(0));
        assert!(!set.contains(1000));
    }

    #[test]
    fn insert_across_words() {
        let mut set = ServiceActiveSet::new();
        for code in [0, 63, 64, 200] {
            set.insert(code).unwrap();
        }

        assert!(set.contains(0));
        assert!(set.contains(63));
        assert!(set.contains(64));
        assert!(set.contains(200));
        assert!(!set.contains(65));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn insert_is_idempotent() {
        let mut set = ServiceActiveSet::new();
        set.insert(5).unwrap();
        set.insert(5).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rejects_code_above_limit() {
        let mut set = ServiceActiveSet::new();
        assert_eq!(
            set.insert(u32::MAX),
            Err(DomainError::ServiceCodeOutOfRange(u32::MAX))
        );
        assert!(set.is_empty());
        assert!(!set.contains(u32::MAX));

        set.insert(MAX_SERVICE_CODE).unwrap();
        assert!(set.contains(MAX_SERVICE_CODE));
    }

    #[test]
    fn deserialize_rejects_huge_code() {
        let err = serde_json::from_str::<ServiceActiveSet>("[1, 4294967295]").unwrap_err();
        assert!(err.to_string().contains("4294967295"));
    }

    #[test]
    fn iter_ascending() {
        let set = ServiceActiveSet::from_codes([130, 2, 64]).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 64, 130]);
    }

    #[test]
    fn serde_as_code_list() {
        let set: ServiceActiveSet = serde_json::from_str("[3, 1]").unwrap();
        assert!(set.contains(1));
        assert!(set.contains(3));
        assert_eq!(serde_json::to_string(&set).unwrap(), "[1,3]");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    proptest! {
        /// Bitset membership agrees with a reference set
        #[test]
        fn matches_btreeset(codes in prop::collection::vec(0u32..500, 0..50), query in 0u32..500) {
            let set = ServiceActiveSet::from_codes(codes.iter().copied()).unwrap();
            let reference: BTreeSet<u32> = codes.iter().copied().collect();

            prop_assert_eq!(set.contains(query), reference.contains(&query));
            prop_assert_eq!(set.len(), reference.len());
            prop_assert_eq!(set.iter().collect::<Vec<_>>(), reference.into_iter().collect::<Vec<_>>());
        }
    }
}
