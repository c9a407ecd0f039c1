//! [`Command`] linking a payment processor account to a [`User`].
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

/// [`Command`] exchanging an authorization [`payment::Code`] and linking
/// the granted account to a [`User`].
#[derive(Clone, Debug)]
pub struct ConnectWallet {
    /// ID of the [`User`] linking the account.
    pub user_id: user::Id,

    /// Authorization [`payment::Code`] to exchange.
    pub code: payment::Code,
}

impl<Db, Pay> Command<ConnectWallet> for Service<Db, Pay>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Update<User>, Ok = (), Err = Traced<database::Error>>,
    Pay: Handler<
        payment::ExchangeCode,
        Ok = payment::TokenResponse,
        Err = Traced<payment::Error>,
    >,
{
    type Ok = Viewer;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: ConnectWallet) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ConnectWallet { user_id, code } = cmd;

        // Plain pass-through: any processor failure propagates unmodified,
        // with no retry or reconciliation on this side.
        let granted = self
            .payments()
            .execute(payment::ExchangeCode(code))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let wallet_id = granted
            .stripe_user_id
            .map(user::WalletId::from)
            .ok_or(E::NoAccountGranted)
            .map_err(tracerr::wrap!())?;

        let mut user = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        user.wallet_id = Some(wallet_id);
        self.database()
            .execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user.viewer())
    }
}

/// Error of [`ConnectWallet`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Payment processor error.
    #[display("Payment processor request failed: {_0}")]
    Payment(payment::Error),

    /// Processor response carried no connected account ID.
    #[display("Processor granted no connected account")]
    NoAccountGranted,

    /// [`User`] linking the account does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
