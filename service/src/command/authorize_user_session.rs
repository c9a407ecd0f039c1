//! [`Command`] for authorizing a [`User`].
//!
//! [`User`]: crate::domain::User

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, session, Session},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`User`].
#[derive(Clone, Debug, From)]
pub struct AuthorizeUserSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db, Pay> Command<AuthorizeUserSession> for Service<Db, Pay>
where
    Db: Database<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        let session = jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims;

        drop(
            self.database()
                .execute(Select(By::new(session.user_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::UserNotExists(session.user_id))
                .map_err(tracerr::wrap!())?,
        );

        Ok(session)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),

    /// [`User`] the [`Session`] belongs to does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::Handler as _;

    use crate::{
        command::CreateUserSession,
        domain::{user, User},
        infra::{payment, InMemory},
        Config, Service,
    };

    use super::AuthorizeUserSession;

    #[tokio::test]
    async fn issued_token_authorizes_back_to_same_user() {
        let svc = Service::new(
            Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    b"secret",
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
                session_ttl: Duration::from_secs(30 * 60),
            },
            InMemory::default(),
            payment::Stripe::new(payment::Config::default()),
        );
        let user = User::new(
            user::Name::new("Bobby Boone").unwrap(),
            user::Avatar::new("https://example.com/a.png").unwrap(),
            user::Email::new("bobby@example.com").unwrap(),
        );
        let user_id = user.id;
        svc.database()
            .execute(common::operations::Insert(user))
            .await
            .unwrap();

        let issued =
            svc.execute(CreateUserSession(user_id)).await.unwrap();
        let session = svc
            .execute(AuthorizeUserSession {
                token: issued.token,
            })
            .await
            .unwrap();
        assert_eq!(session.user_id, user_id);
    }
}
