//! [`Command`] for creating a [`Session`].
//!
//! [`Session`]: crate::domain::user::Session

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        user::{self, session, Session},
        User, Viewer,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`] of an existing [`User`].
#[derive(Clone, Copy, Debug, From)]
pub struct CreateUserSession(pub user::Id);

/// Output of [`CreateUserSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`session::Token`] of the created [`Session`].
    pub token: session::Token,

    /// [`Viewer`] projection of the [`User`] whose [`Session`] has been
    /// created.
    pub viewer: Viewer,

    /// [Unix timestamp][1] when the created [`Session`] expires.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Unix_time
    pub expires_at: i64,
}

impl<Db, Pay> Command<CreateUserSession> for Service<Db, Pay>
where
    Db: Database<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        CreateUserSession(user_id): CreateUserSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let user = self
            .database()
            .execute(Select(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let expires_at = (time::OffsetDateTime::now_utc()
            + self.config().session_ttl)
            .unix_timestamp();
        let token = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &Session {
                user_id: user.id,
                expires_at,
            },
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        // SAFETY: `jsonwebtoken::encode` always returns a valid
        //         `session::Token`.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { session::Token::new_unchecked(token) };

        Ok(Output {
            token,
            viewer: user.viewer(),
            expires_at,
        })
    }
}

/// Error of [`CreateUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
