pub mod in_memory_view_router;

pub use in_memory_view_router::InMemoryViewRouter;
