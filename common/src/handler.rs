//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}

impl<H, Args> Handler<Args> for &H
where
    H: Handler<Args> + Sync,
    Args: Send,
{
    type Ok = H::Ok;
    type Err = H::Err;

    async fn execute(&self, args: Args) -> Result<Self::Ok, Self::Err> {
        (**self).execute(args).await
    }
}
