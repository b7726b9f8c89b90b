//! HTTP API module for the Party Orchestration Engine.
//!
//! This module provides the REST API endpoints for orchestrating party
//! orders: shipping allocation, host voucher application, and loyalty
//! points.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    GuestRequest, LineItemRequest, OptionsRequest, OrchestrationRequest, PartyRequest,
};
pub use response::ApiError;
pub use state::AppState;
