pub mod bearer;

pub use bearer::authorize_bearer;
