//! Screens and the guard that decides which one a user may see.

use std::fmt;

use crate::models::PetitionId;
use crate::session::Credentials;

/// A screen of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Explore,
    Login,
    Register,
    EditProfile,
    MyPetitions,
    CreatePetition,
    Petition(PetitionId),
    EditPetition(PetitionId),
}

impl Route {
    /// Parse a path such as `/petitions/4/edit`.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Some(Route::Explore),
            ["login"] => Some(Route::Login),
            ["register"] => Some(Route::Register),
            ["edit-profile"] => Some(Route::EditProfile),
            ["my-petitions"] => Some(Route::MyPetitions),
            ["petitions", "create"] => Some(Route::CreatePetition),
            ["petitions", id] => id.parse().ok().map(Route::Petition),
            ["petitions", id, "edit"] => id.parse().ok().map(Route::EditPetition),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Explore => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::EditProfile => "/edit-profile".to_string(),
            Route::MyPetitions => "/my-petitions".to_string(),
            Route::CreatePetition => "/petitions/create".to_string(),
            Route::Petition(id) => format!("/petitions/{}", id),
            Route::EditPetition(id) => format!("/petitions/{}/edit", id),
        }
    }

    /// Screens that need a session.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            Route::EditProfile | Route::MyPetitions | Route::CreatePetition | Route::EditPetition(_)
        )
    }

    /// Screens only shown to logged-out users.
    pub fn guests_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Resolve where a navigation to `route` actually lands.
///
/// Protected screens send logged-out users to the login screen, except
/// editing a petition, which falls back to the petition itself. Login and
/// register send logged-in users to explore. Ownership for editing is checked
/// once the petition is loaded.
pub fn guard(route: Route, credentials: Option<&Credentials>) -> Route {
    match (route, credentials) {
        (Route::EditPetition(id), None) => Route::Petition(id),
        (r, None) if r.requires_login() => Route::Login,
        (r, Some(_)) if r.guests_only() => Route::Explore,
        (r, _) => r,
    }
}
