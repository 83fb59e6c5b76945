//! Ordering rules shared by the search trees and the priority queues.

use std::cmp::Ordering;
use std::fmt;

/// The total order used to arrange values in a collection.
///
/// A comparator is either the natural ordering of `T` or an injected comparison function. When
/// an injected function reports two values as equal, the natural ordering decides, so values
/// that the custom order cannot tell apart still resolve deterministically.
///
/// # Examples
///
/// ```
/// use classic_collections::compare::Comparator;
/// use std::cmp::Ordering;
///
/// let by_len = Comparator::from_fn(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// assert_eq!(by_len.compare(&"bb", &"a"), Ordering::Greater);
/// // equal lengths fall back to the natural ordering
/// assert_eq!(by_len.compare(&"ab", &"aa"), Ordering::Greater);
/// ```
pub struct Comparator<T> {
    custom: Option<Box<dyn Fn(&T, &T) -> Ordering>>,
}

impl<T> Comparator<T>
where
    T: Ord,
{
    /// Constructs a comparator using the natural ordering of `T`.
    pub fn natural() -> Self {
        Comparator { custom: None }
    }

    /// Constructs a comparator from a comparison function.
    pub fn from_fn<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Comparator {
            custom: Some(Box::new(compare)),
        }
    }

    /// Constructs a comparator that orders values by an extracted key.
    pub fn by_key<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self::from_fn(move |a, b| key(a).cmp(&key(b)))
    }

    /// Constructs a comparator that reverses the order of `self`.
    pub fn reversed(self) -> Self
    where
        T: 'static,
    {
        Self::from_fn(move |a, b| self.compare(b, a))
    }

    /// Compares two values.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        match self.custom {
            Some(ref custom) => custom(a, b).then_with(|| a.cmp(b)),
            None => a.cmp(b),
        }
    }

    /// Returns `true` if the comparator uses an injected function.
    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }
}

impl<T> Default for Comparator<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::natural()
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.custom {
            Some(_) => f.write_str("Comparator::Custom"),
            None => f.write_str("Comparator::Natural"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Comparator;
    use std::cmp::Ordering;

    #[test]
    fn test_natural() {
        let comparator = Comparator::natural();
        assert_eq!(comparator.compare(&1, &2), Ordering::Less);
        assert_eq!(comparator.compare(&2, &2), Ordering::Equal);
        assert!(!comparator.is_custom());
    }

    #[test]
    fn test_custom_tie_falls_back_to_natural() {
        let comparator = Comparator::by_key(|pair: &(u32, u32)| pair.0);
        assert_eq!(comparator.compare(&(1, 9), &(2, 0)), Ordering::Less);
        assert_eq!(comparator.compare(&(1, 9), &(1, 0)), Ordering::Greater);
        assert_eq!(comparator.compare(&(1, 0), &(1, 0)), Ordering::Equal);
    }

    #[test]
    fn test_reversed() {
        let comparator = Comparator::natural().reversed();
        assert_eq!(comparator.compare(&1, &2), Ordering::Greater);
        assert!(comparator.is_custom());
    }
}
