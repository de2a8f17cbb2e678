//! In-memory fake of the Cloud Controller v2 API
//!
//! Serves the same routes and document shapes as the real API from
//! per-resource in-memory stores, so client code can be exercised end to end
//! without a deployment. Start one with [`FakeCloudController::start`] and
//! point a client at [`FakeCloudController::url`].
//!
//! Requests for routes the fake does not know abort the handling task: a test
//! that hits one is exercising an endpoint nobody has implemented yet.

pub mod api;
pub mod config;
pub mod resources;
pub mod store;

mod server;

pub use api::{create_router, FakeState};
pub use server::FakeCloudController;
