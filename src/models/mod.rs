//! Data models for the petition API.
//!
//! Field names follow the API's camelCase JSON exactly.

mod category;
mod image;
mod petition;
mod supporter;
mod tier;
mod user;

pub use category::*;
pub use image::*;
pub use petition::*;
pub use supporter::*;
pub use tier::*;
pub use user::*;

pub type PetitionId = u32;
pub type TierId = u32;
pub type UserId = u32;
pub type CategoryId = u32;
