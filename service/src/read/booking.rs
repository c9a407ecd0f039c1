//! [`Booking`]-related read definitions.
//!
//! [`Booking`]: crate::domain::Booking

pub mod list {
    //! [`Booking`] list definitions.

    use common::define_pagination;

    use crate::domain::{user, Booking};

    define_pagination!(Booking, Filter);

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`user::Id`] of the tenant whose [`Booking`]s to select.
        ///
        /// [`Booking`]: crate::domain::Booking
        pub tenant: Option<user::Id>,
    }
}
