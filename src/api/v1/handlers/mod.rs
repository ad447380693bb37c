pub mod greet;
pub mod health;
