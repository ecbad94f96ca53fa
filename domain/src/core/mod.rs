//! Core value objects: houses, user identity, error taxonomy.

pub mod error;
pub mod house;
pub mod user;

pub use error::QuizError;
pub use house::House;
pub use user::UserId;
