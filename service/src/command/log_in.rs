//! [`Command`] signing a [`User`] in.
//!
//! [`User`]: crate::domain::User

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] signing a [`User`] in with an identity profile obtained from
/// an external sign-in flow.
///
/// The profile is upserted: the first sign-in creates the [`User`], while a
/// repeated one refreshes the name, avatar and contact address, keeping the
/// linked wallet and earned income intact.
#[derive(Clone, Debug)]
pub struct LogIn {
    /// ID of the [`User`] signing in, if known.
    pub id: Option<user::Id>,

    /// [`user::Name`] reported by the identity profile.
    pub name: user::Name,

    /// [`user::Avatar`] reported by the identity profile.
    pub avatar: user::Avatar,

    /// Contact [`user::Email`] reported by the identity profile.
    pub contact: user::Email,
}

impl<Db, Pay> Command<LogIn> for Service<Db, Pay>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Insert<User>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: LogIn) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let LogIn {
            id,
            name,
            avatar,
            contact,
        } = cmd;

        let existing = match id {
            Some(id) => self
                .database()
                .execute(Select(By::new(id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
            None => None,
        };

        if let Some(mut user) = existing {
            user.name = name;
            user.avatar = avatar;
            user.contact = contact;
            self.database()
                .execute(Update(user.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            Ok(user)
        } else {
            let mut user = User::new(name, avatar, contact);
            if let Some(id) = id {
                user.id = id;
            }
            self.database()
                .execute(Insert(user.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            Ok(user)
        }
    }
}

/// Error of [`LogIn`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::{
        operations::{By, Select},
        Handler as _,
    };

    use crate::{
        domain::{user, User},
        infra::{payment, InMemory},
        Config, Service,
    };

    use super::LogIn;

    fn service() -> Service<InMemory, payment::Stripe> {
        Service::new(
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
        )
    }

    fn profile(name: &str) -> LogIn {
        LogIn {
            id: None,
            name: user::Name::new(name).unwrap(),
            avatar: user::Avatar::new("https://example.com/a.png").unwrap(),
            contact: user::Email::new("bobby@example.com").unwrap(),
        }
    }

    #[tokio::test]
    async fn first_sign_in_creates_the_user() {
        let svc = service();

        let user = svc.execute(profile("Bobby Boone")).await.unwrap();

        let stored: Option<User> = svc
            .database()
            .execute(Select(By::new(user.id)))
            .await
            .unwrap();
        assert!(stored.is_some());
        assert!(!user.has_wallet());
    }

    #[tokio::test]
    async fn repeated_sign_in_refreshes_the_profile() {
        let svc = service();

        let user = svc.execute(profile("Bobby Boone")).await.unwrap();
        let again = svc
            .execute(LogIn {
                id: Some(user.id),
                ..profile("Bobby B.")
            })
            .await
            .unwrap();

        assert_eq!(again.id, user.id);
        assert_eq!(AsRef::<str>::as_ref(&again.name), "Bobby B.");
        assert_eq!(again.income, user.income);
    }
}
