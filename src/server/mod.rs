//! Development server for the `/foods` resource.

pub mod routes;
pub mod store;

pub use routes::{router, SharedStore};
pub use store::{FoodStore, StoreError};
