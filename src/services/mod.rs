pub mod avatar_cache;
pub mod identity_resolver;

pub use avatar_cache::AvatarCache;
pub use identity_resolver::IdentityResolver;
