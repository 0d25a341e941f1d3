use async_trait::async_trait;

use crate::models::usermodel::{User, UserRole};
use crate::store::kv::{StoreClient, StoreError, SESSION_KEY, USERS_KEY};

#[async_trait]
pub trait UserStoreExt {
    async fn load_users(&self) -> Result<Vec<User>, StoreError>;

    /// Whole-collection overwrite. Callers mutate a loaded copy and hand
    /// the entire collection back.
    async fn save_users(&self, users: &[User]) -> Result<(), StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn get_leader_by_referral_code(&self, code: &str) -> Result<Option<User>, StoreError>;

    /// Rewrites one user's entry in the collection, matched by id.
    /// Returns the updated user, or None when the id is gone.
    async fn update_user(&self, user: &User) -> Result<Option<User>, StoreError>;

    async fn get_session_user(&self) -> Result<Option<User>, StoreError>;
    async fn set_session_user(&self, user: &User) -> Result<(), StoreError>;
    async fn clear_session_user(&self) -> Result<(), StoreError>;

    /// Writes the demo accounts, only when no user collection exists yet.
    async fn seed_demo_users(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl UserStoreExt for StoreClient {
    async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.load_json(USERS_KEY).await?.unwrap_or_default())
    }

    async fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        self.save_json(USERS_KEY, &users).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.load_users().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    async fn get_leader_by_referral_code(&self, code: &str) -> Result<Option<User>, StoreError> {
        let users = self.load_users().await?;
        Ok(users
            .into_iter()
            .find(|u| u.role == UserRole::Leader && u.referral_code.as_deref() == Some(code)))
    }

    async fn update_user(&self, user: &User) -> Result<Option<User>, StoreError> {
        let mut users = self.load_users().await?;
        let entry = users.iter_mut().find(|u| u.id == user.id);
        match entry {
            Some(stored) => {
                *stored = user.clone();
                self.save_users(&users).await?;
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn get_session_user(&self) -> Result<Option<User>, StoreError> {
        self.load_json(SESSION_KEY).await
    }

    async fn set_session_user(&self, user: &User) -> Result<(), StoreError> {
        self.save_json(SESSION_KEY, user).await
    }

    async fn clear_session_user(&self) -> Result<(), StoreError> {
        self.remove(SESSION_KEY).await
    }

    async fn seed_demo_users(&self) -> Result<(), StoreError> {
        if self.raw(USERS_KEY).await?.is_some() {
            return Ok(());
        }
        let demo = vec![
            User {
                id: "s1".to_string(),
                email: "student@example.com".to_string(),
                name: "Alex Johnson".to_string(),
                role: UserRole::Student,
                branch: Some("Computer Science".to_string()),
                settings: None,
                referral_code: None,
                vouched_by: Some("CS-LEADER-101".to_string()),
            },
            User {
                id: "l1".to_string(),
                email: "leader@example.com".to_string(),
                name: "Dr. Emily Carter".to_string(),
                role: UserRole::Leader,
                branch: Some("Computer Science".to_string()),
                settings: None,
                referral_code: Some("CS-LEADER-101".to_string()),
                vouched_by: None,
            },
        ];
        self.save_users(&demo).await
    }
}
