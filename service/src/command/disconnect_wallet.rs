//! [`Command`] unlinking the payment processor account of a [`User`].
//!
//! [`User`]: crate::domain::User

use common::{
    operations::{By, Select, Update},
    Handler,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user, User, Viewer},
    infra::{database, payment, Database},
    Service,
};

use super::Command;

/// [`Command`] revoking and unlinking the payment processor account of a
/// [`User`].
#[derive(Clone, Copy, Debug)]
pub struct DisconnectWallet {
    /// ID of the [`User`] unlinking the account.
    pub user_id: user::Id,
}

impl<Db, Pay> Command<DisconnectWallet> for Service<Db, Pay>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Update<User>, Ok = (), Err = Traced<database::Error>>,
    Pay: Handler<payment::Deauthorize, Ok = (), Err = Traced<payment::Error>>,
{
    type Ok = Viewer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DisconnectWallet,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DisconnectWallet { user_id } = cmd;

        let mut user = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;
        let wallet_id = user
            .wallet_id
            .take()
            .ok_or(E::WalletNotConnected)
            .map_err(tracerr::wrap!())?;

        self.payments()
            .execute(payment::Deauthorize {
                stripe_user_id: wallet_id.into(),
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.database()
            .execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user.viewer())
    }
}

/// Error of [`DisconnectWallet`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Payment processor error.
    #[display("Payment processor request failed: {_0}")]
    Payment(payment::Error),

    /// [`User`] has no linked account to revoke.
    #[display("`User` has no linked payment processor account")]
    WalletNotConnected,

    /// [`User`] unlinking the account does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
