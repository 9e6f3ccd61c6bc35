//! Request extractors whose rejections render as [`AppError`] bodies.
//!
//! Axum's own `Json`, `Query` and `Path` reject with plain-text responses; these
//! wrappers route malformed bodies and query strings through the same JSON
//! error shape as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor. A malformed or mistyped body is a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query-string extractor. A non-numeric `page` or `size` is a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path extractor. A non-numeric id segment is a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
