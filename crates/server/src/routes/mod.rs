pub mod health;
pub mod month;
pub mod users;
