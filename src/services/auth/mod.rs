pub mod factory;
pub mod memory;
pub mod resolver;
pub mod token;

pub use factory::build_identity_resolver;
pub use memory::InMemoryIdentityResolver;
pub use resolver::{Identity, IdentityResolver, ResolveError};
pub use token::{BearerToken, ExtractError};
