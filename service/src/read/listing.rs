//! [`Listing`]-related read definitions.
//!
//! [`Listing`]: crate::domain::Listing

pub mod list {
    //! [`Listing`] list definitions.

    use common::define_pagination;

    use crate::domain::{user, Listing};

    define_pagination!(Listing, Filter);

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`user::Id`] of the host whose [`Listing`]s to select.
        ///
        /// [`Listing`]: crate::domain::Listing
        pub host: Option<user::Id>,

        /// Location term to fuzzy search addresses for.
        pub location: Option<String>,
    }
}
