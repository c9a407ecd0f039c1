//! Abstractions for page-number pagination.

use std::num::NonZeroU32;

/// 1-based number of a [`Page`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// First [`PageNumber`].
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`PageNumber`], if the provided `number` is positive.
    #[must_use]
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    /// Returns this [`PageNumber`] as a [`u32`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the [`PageNumber`] following this one.
    #[must_use]
    pub fn forward(self) -> Self {
        self.0.checked_add(1).map_or(self, Self)
    }

    /// Returns the [`PageNumber`] preceding this one, saturating at the
    /// [`PageNumber::FIRST`] one.
    #[must_use]
    pub fn back(self) -> Self {
        NonZeroU32::new(self.0.get() - 1).map_or(Self::FIRST, Self)
    }

    /// Returns the number of items preceding the [`Page`] with this
    /// [`PageNumber`], given the provided [`PageLimit`].
    #[must_use]
    pub fn offset(self, limit: PageLimit) -> usize {
        (self.get() as usize - 1) * limit.get() as usize
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Maximum number of items on a single [`Page`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct PageLimit(NonZeroU32);

impl PageLimit {
    /// Maximum allowed [`PageLimit`].
    pub const MAX: u32 = 100;

    /// Creates a new [`PageLimit`], if the provided `limit` is positive and
    /// not greater than [`PageLimit::MAX`].
    #[must_use]
    pub fn new(limit: u32) -> Option<Self> {
        (limit <= Self::MAX)
            .then(|| NonZeroU32::new(limit))
            .flatten()
            .map(Self)
    }

    /// Returns this [`PageLimit`] as a [`u32`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(NonZeroU32::new(10).expect("not zero"))
    }
}

/// Single page of `N`odes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<N> {
    /// Nodes on this [`Page`].
    pub items: Vec<N>,

    /// Total count of nodes on all [`Page`]s.
    pub total_count: usize,
}

impl<N> Page<N> {
    /// Creates a new [`Page`] by cutting the window described by the provided
    /// [`PageNumber`] and [`PageLimit`] out of the `nodes`.
    #[must_use]
    pub fn cut(
        nodes: Vec<N>,
        page: PageNumber,
        limit: PageLimit,
    ) -> Self {
        let total_count = nodes.len();
        let items = nodes
            .into_iter()
            .skip(page.offset(limit))
            .take(limit.get() as usize)
            .collect();
        Self { items, total_count }
    }

    /// Creates a new empty [`Page`].
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

/// Selector of a single [`Page`].
#[derive(Clone, Copy, Debug)]
pub struct Selector<F> {
    /// Number of the selected [`Page`].
    pub page: PageNumber,

    /// Maximum number of items on the selected [`Page`].
    pub limit: PageLimit,

    /// Additional filter being applied to the result.
    pub filter: F,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $filter:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$filter>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Page, PageLimit, PageNumber};

    #[test]
    fn page_number_is_never_zero() {
        assert!(PageNumber::new(0).is_none());
        assert_eq!(PageNumber::new(1), Some(PageNumber::FIRST));
        assert_eq!(PageNumber::FIRST.back(), PageNumber::FIRST);
        assert_eq!(PageNumber::FIRST.forward().get(), 2);
        assert_eq!(PageNumber::FIRST.forward().back(), PageNumber::FIRST);
    }

    #[test]
    fn offset_counts_preceding_items() {
        let limit = PageLimit::new(4).unwrap();
        assert_eq!(PageNumber::FIRST.offset(limit), 0);
        assert_eq!(PageNumber::new(3).unwrap().offset(limit), 8);
    }

    #[test]
    fn cut_windows_nodes() {
        let nodes = (1..=10).collect::<Vec<_>>();
        let limit = PageLimit::new(4).unwrap();

        let first = Page::cut(nodes.clone(), PageNumber::FIRST, limit);
        assert_eq!(first.items, vec![1, 2, 3, 4]);
        assert_eq!(first.total_count, 10);

        let last = Page::cut(nodes, PageNumber::new(3).unwrap(), limit);
        assert_eq!(last.items, vec![9, 10]);
        assert_eq!(last.total_count, 10);
    }
}
