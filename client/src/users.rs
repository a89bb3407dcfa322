use reqwest::Method;

use crate::error::Result;
use crate::models::{LoginRequest, NewUser, Role, User, UserUpdate};
use crate::MarketplaceClient;

impl MarketplaceClient {
    pub async fn register_user(&self, user: &NewUser) -> Result<User> {
        self.send_json(Method::POST, "/users/register", user).await
    }

    /// Logs in with plain credentials; the backend answers with the user record.
    pub async fn login_user(&self, username: &str, password: &str) -> Result<User> {
        log::info!("Attempting login for username: {}", username);
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.send_json(Method::POST, "/users/login", &request).await {
            Ok(user) => {
                log::info!("Login successful for username: {}", username);
                Ok(user)
            }
            Err(e) => {
                log::error!("Login failed: {}", e);
                Err(e)
            }
        }
    }

    pub async fn fetch_user_by_id(&self, user_id: i64) -> Result<User> {
        self.get_json(&format!("/users/{}", user_id)).await
    }

    pub async fn fetch_all_users(&self) -> Result<Vec<User>> {
        self.get_json("/users").await
    }

    pub async fn fetch_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        self.get_json(&format!("/users/role/{}", role)).await
    }

    pub async fn update_user(&self, user_id: i64, update: &UserUpdate) -> Result<User> {
        self.send_json(Method::PUT, &format!("/users/{}", user_id), update)
            .await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<String> {
        self.send_empty(Method::DELETE, &format!("/users/{}", user_id))
            .await
    }
}
