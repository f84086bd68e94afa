//! Login, registration, logout and profile editing.

use super::StepOutcome;
use crate::api::ApiClient;
use crate::errors::{ClientError, ValidationError};
use crate::models::{EditUserRequest, Image, LoginRequest, RegisterRequest, User};
use crate::routes::Route;
use crate::session::{Credentials, Session, SessionStorage};
use crate::validation;

/// Log in and persist the session. Returns the screen to show next.
pub async fn login<S: SessionStorage>(
    api: &ApiClient,
    session: &mut Session<S>,
    email: &str,
    password: &str,
) -> Result<Route, ClientError> {
    validation::validate_email(email)?;
    validation::validate_password(password)?;

    let response = api
        .login(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await?;

    session
        .login(Credentials {
            user_id: response.user_id,
            token: response.token,
        })
        .await?;
    Ok(Route::Explore)
}

/// Fields of the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_first_name(&self.first_name)?;
        validation::validate_last_name(&self.last_name)?;
        validation::validate_email(&self.email)?;
        validation::validate_password(&self.password)
    }
}

/// Register, log the new user in, then upload the optional profile picture.
///
/// A failed picture upload is logged and does not undo the registration.
pub async fn register<S: SessionStorage>(
    api: &ApiClient,
    session: &mut Session<S>,
    form: &RegisterForm,
    picture: Option<&Image>,
) -> Result<Route, ClientError> {
    form.validate()?;

    let user_id = api
        .register(&RegisterRequest {
            email: form.email.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            password: form.password.clone(),
        })
        .await?;
    tracing::info!("Registered user {}", user_id);

    let route = login(api, session, &form.email, &form.password).await?;

    if let (Some(picture), Some(creds)) = (picture, session.credentials()) {
        if let Err(e) = api.put_user_image(&creds.token, creds.user_id, picture).await {
            tracing::warn!("Profile picture upload failed for user {}: {}", user_id, e);
        }
    }

    Ok(route)
}

/// Log out and clear the stored session.
///
/// The session is also cleared when the server no longer knows the token.
/// Any other failure keeps the session so the user can retry.
pub async fn logout<S: SessionStorage>(
    api: &ApiClient,
    session: &mut Session<S>,
) -> Result<Route, ClientError> {
    let Some(creds) = session.credentials().cloned() else {
        session.clear().await?;
        return Ok(Route::Explore);
    };

    match api.logout(&creds.token).await {
        Ok(()) => {}
        Err(e) if e.status() == Some(401) => {
            tracing::debug!("Token already invalid at logout");
        }
        Err(e) => return Err(e),
    }

    session.clear().await?;
    tracing::info!("Logged out user {}", creds.user_id);
    Ok(Route::Explore)
}

/// The logged-in user's own profile.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user: User,
    pub has_picture: bool,
}

impl Profile {
    /// Prefilled edit form. Password fields start empty.
    pub fn form(&self) -> ProfileForm {
        ProfileForm {
            first_name: self.user.first_name.clone(),
            last_name: self.user.last_name.clone(),
            email: self.user.email.clone().unwrap_or_default(),
            ..ProfileForm::default()
        }
    }
}

pub async fn load_profile(api: &ApiClient, creds: &Credentials) -> Result<Profile, ClientError> {
    let user = api.get_user(Some(&creds.token), creds.user_id).await?;
    let has_picture = match api.get_user_image(creds.user_id).await {
        Ok(image) => image.is_some(),
        Err(e) => {
            tracing::warn!("Failed to load profile picture of user {}: {}", creds.user_id, e);
            false
        }
    };
    Ok(Profile { user, has_picture })
}

/// Fields of the edit-profile form.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub current_password: String,
    pub new_password: String,
}

impl ProfileForm {
    fn changes_password(&self) -> bool {
        !self.current_password.is_empty() || !self.new_password.is_empty()
    }

    /// Validate and build the request. Password fields are only sent when
    /// either one is filled in.
    pub fn to_request(&self) -> Result<EditUserRequest, ValidationError> {
        validation::validate_first_name(&self.first_name)?;
        validation::validate_last_name(&self.last_name)?;
        validation::validate_email(&self.email)?;

        let mut request = EditUserRequest {
            email: Some(self.email.clone()),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            ..EditUserRequest::default()
        };

        if self.changes_password() {
            validation::validate_current_password(&self.current_password)?;
            validation::validate_password(&self.new_password)?;
            request.current_password = Some(self.current_password.clone());
            request.password = Some(self.new_password.clone());
        }

        Ok(request)
    }
}

/// What to do with the profile picture on save.
#[derive(Debug, Clone, Default)]
pub enum PictureChange {
    #[default]
    Keep,
    Replace(Image),
    Remove,
}

/// A saved profile and what happened to the picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSaved {
    pub picture: StepOutcome,
}

impl ProfileSaved {
    pub fn next_route(&self) -> Route {
        Route::Explore
    }
}

/// Save the profile, then apply the picture change.
///
/// The picture change is best-effort; removing a picture that is already gone
/// counts as done.
pub async fn update_profile(
    api: &ApiClient,
    creds: &Credentials,
    form: &ProfileForm,
    picture: &PictureChange,
) -> Result<ProfileSaved, ClientError> {
    let request = form.to_request()?;
    api.edit_user(&creds.token, creds.user_id, &request).await?;
    tracing::info!("Profile of user {} updated", creds.user_id);

    let result = match picture {
        PictureChange::Keep => {
            return Ok(ProfileSaved {
                picture: StepOutcome::Skipped,
            })
        }
        PictureChange::Replace(image) => {
            api.put_user_image(&creds.token, creds.user_id, image).await
        }
        PictureChange::Remove => match api.delete_user_image(&creds.token, creds.user_id).await {
            Err(e) if e.is_not_found() => Ok(()),
            other => other,
        },
    };

    let picture = match result {
        Ok(()) => StepOutcome::Done,
        Err(e) => {
            tracing::warn!("Profile picture change failed for user {}: {}", creds.user_id, e);
            StepOutcome::Failed(e.to_string())
        }
    };
    Ok(ProfileSaved { picture })
}
