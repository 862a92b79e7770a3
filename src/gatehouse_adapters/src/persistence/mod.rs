pub mod file_session_persistence;
pub mod hashmap_profile_store;
pub mod http_profile_store;
pub mod memory_session_persistence;
mod profile_document;

pub use file_session_persistence::FileSessionPersistence;
pub use hashmap_profile_store::HashMapProfileStore;
pub use http_profile_store::HttpProfileStore;
pub use memory_session_persistence::InMemorySessionPersistence;
pub use profile_document::ProfileDocument;
