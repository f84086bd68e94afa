//! User and authentication endpoints.

use super::{send_empty, send_json, ApiClient, Authorized};
use crate::errors::ClientError;
use crate::models::{
    EditUserRequest, LoginRequest, LoginResponse, RegisterRequest, RegisteredUser, User, UserId,
};

impl ApiClient {
    /// POST /users/register - Create an account. Returns the new user id.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserId, ClientError> {
        let registered: RegisteredUser =
            send_json(self.post("/users/register").json(request)).await?;
        Ok(registered.user_id)
    }

    /// POST /users/login - Exchange email and password for a token.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        send_json(self.post("/users/login").json(request)).await
    }

    /// POST /users/logout - Invalidate the token.
    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        send_empty(self.post("/users/logout").authorized(token)).await
    }

    /// GET /users/:id - Get a user. The email is included for oneself only.
    pub async fn get_user(&self, token: Option<&str>, id: UserId) -> Result<User, ClientError> {
        let mut request = self.get(&format!("/users/{}", id));
        if let Some(token) = token {
            request = request.authorized(token);
        }
        send_json(request).await
    }

    /// PATCH /users/:id - Edit one's own details.
    pub async fn edit_user(
        &self,
        token: &str,
        id: UserId,
        request: &EditUserRequest,
    ) -> Result<(), ClientError> {
        send_empty(
            self.patch(&format!("/users/{}", id))
                .authorized(token)
                .json(request),
        )
        .await
    }
}
