//! Request handlers.
//!
//! Handlers extract and shape HTTP input, delegate to [`ItemService`], and
//! wrap results in the `{ "data": ... }` envelope. Errors map via
//! [`AppError`].
//!
//! [`ItemService`]: crate::service::ItemService
//! [`AppError`]: crate::error::AppError

pub mod items;
pub mod rpc;

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Json` extractor whose rejections use the standard error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path` extractor whose rejections use the standard error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
