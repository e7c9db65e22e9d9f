//! Account lookup and creation.
//!
//! Deliberately minimal: authentication mechanics (hashing, sessions) live
//! outside this crate. Operations that need an acting account take it as an
//! explicit `actor_id` parameter supplied by the caller's trust boundary.

use crate::{
    entities::{Account, account},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Parameters for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login name, unique across the marketplace
    pub username: String,
    /// Pre-hashed credential blob
    pub password: String,
    /// Display name
    pub name: String,
    /// Contact e-mail address
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Short self-introduction
    pub introduction: String,
    /// Optional profile image URL
    pub profile_image_url: Option<String>,
}

/// Creates a new account, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The username is empty or whitespace-only (Validation)
/// - The username is already taken (Conflict)
/// - The database insert fails
pub async fn create_account(
    db: &DatabaseConnection,
    new_account: NewAccount,
) -> Result<account::Model> {
    if new_account.username.trim().is_empty() {
        return Err(Error::Validation {
            message: "Username cannot be empty".to_string(),
        });
    }

    let existing = Account::find()
        .filter(account::Column::Username.eq(new_account.username.trim()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::Conflict {
            message: format!("Username {} is already taken", new_account.username.trim()),
        });
    }

    let model = account::ActiveModel {
        username: Set(new_account.username.trim().to_string()),
        password: Set(new_account.password),
        name: Set(new_account.name),
        email: Set(new_account.email),
        phone: Set(new_account.phone),
        introduction: Set(new_account.introduction),
        profile_image_url: Set(new_account.profile_image_url),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Retrieves a specific account by its unique ID.
pub async fn get_account_by_id(
    db: &DatabaseConnection,
    account_id: i64,
) -> Result<Option<account::Model>> {
    Account::find_by_id(account_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an account by its username.
pub async fn get_account_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<account::Model>> {
    Account::find()
        .filter(account::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_account_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_account(
            &db,
            NewAccount {
                username: "   ".to_string(),
                ..default_new_account("x")
            },
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_account_duplicate_username() -> Result<()> {
        let db = setup_test_db().await?;

        create_account(&db, default_new_account("alice")).await?;
        let result = create_account(&db, default_new_account("alice")).await;
        assert!(matches!(result.unwrap_err(), Error::Conflict { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_account_lookups() -> Result<()> {
        let db = setup_test_db().await?;

        let created = create_account(&db, default_new_account("bob")).await?;

        let by_id = get_account_by_id(&db, created.id).await?;
        assert_eq!(by_id.unwrap().username, "bob");

        let by_username = get_account_by_username(&db, "bob").await?;
        assert_eq!(by_username.unwrap().id, created.id);

        let missing = get_account_by_id(&db, 999).await?;
        assert!(missing.is_none());

        Ok(())
    }
}
