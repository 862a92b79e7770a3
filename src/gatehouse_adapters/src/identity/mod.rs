pub mod hashmap_identity_provider;
pub mod http_identity_provider;

pub use hashmap_identity_provider::HashMapIdentityProvider;
pub use http_identity_provider::HttpIdentityProvider;
