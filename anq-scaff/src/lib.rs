//! anq-scaff: runtime for generated CRUD resources
//!
//! Every resource produced by `anq-scaff add` exposes a single endpoint,
//! `POST /<resource>/actions`, whose body names an `action` and carries its
//! `params`. This crate holds the pieces those generated modules share:
//!
//! - [`Status`] codes and the [`Envelope`] every response is wrapped in
//! - [`ActionRequest`], [`Action`] and [`ListParams`] for the request side
//! - the [`ResourceService`] trait a generated service implements
//! - [`dispatch`] / [`handle`], the one-shot action switch
//! - a process-wide snowflake [`id`] generator for primary keys
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use anq_scaff::prelude::*;
//!
//! # async fn example<S: ResourceService + 'static>(service: S) -> anyhow::Result<()> {
//! anq_scaff::observability::init()?;
//!
//! let app = action_router("/user/actions", service);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod action;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod id;
pub mod model;
pub mod observability;
pub mod response;
pub mod service;
pub mod status;

pub use action::{Action, ActionRequest, Filters, ListParams, Pagination, Params};
pub use dispatch::{action_router, dispatch, handle};
pub use error::ActionError;
pub use response::{Envelope, Responses};
pub use service::{ResourceService, SparsePatch};
pub use status::Status;

pub use async_trait::async_trait;

pub mod prelude {
    //! Convenience re-exports for generated services and API modules
    //!
    //! ```rust
    //! use anq_scaff::prelude::*;
    //! ```

    pub use crate::action::{Action, ActionRequest, Filters, ListParams, Pagination, Params};
    pub use crate::dispatch::{action_router, dispatch, handle};
    pub use crate::error::ActionError;
    pub use crate::response::{Envelope, Responses};
    pub use crate::service::{ResourceService, SparsePatch};
    pub use crate::status::Status;

    pub use async_trait::async_trait;
}
