//! One-shot action dispatch
//!
//! [`dispatch`] maps a decoded [`ActionRequest`] onto a [`ResourceService`]
//! call and folds every outcome, including failures, into an [`Envelope`].
//! [`handle`] adds the body-decoding step for axum handlers, and
//! [`action_router`] mounts a ready-made `POST` route.

use crate::action::{Action, ActionRequest, Pagination};
use crate::error::ActionError;
use crate::response::{Envelope, Responses};
use crate::service::ResourceService;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Execute one action against `service`
///
/// Parameter problems are reported before the service is touched; service
/// failures become business errors. This never fails.
pub async fn dispatch<S>(service: &S, request: ActionRequest) -> Envelope
where
    S: ResourceService + ?Sized,
{
    tracing::debug!(action = %request.action, "dispatching action");

    match run(service, &request).await {
        Ok(data) => Responses::success(data),
        Err(err) => {
            tracing::debug!(action = %request.action, error = %err, "action failed");
            err.into_envelope()
        }
    }
}

/// Dispatch a possibly rejected JSON body
///
/// A body that is not valid JSON, or not an object of the request shape,
/// yields a params error envelope.
pub async fn handle<S>(
    service: &S,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Json<Envelope>
where
    S: ResourceService + ?Sized,
{
    match payload {
        Ok(Json(request)) => Json(dispatch(service, request).await),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected action body");
            Json(Responses::params_error(format!(
                "invalid request body: {}",
                rejection.body_text()
            )))
        }
    }
}

/// Router serving `POST path` for `service`
///
/// ```rust,ignore
/// let app = Router::new().merge(action_router("/user/actions", UserService::new()));
/// ```
pub fn action_router<S>(path: &str, service: S) -> Router
where
    S: ResourceService + 'static,
{
    Router::new()
        .route(path, post(action_handler::<S>))
        .with_state(Arc::new(service))
}

async fn action_handler<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Json<Envelope>
where
    S: ResourceService + 'static,
{
    handle(service.as_ref(), payload).await
}

async fn run<S>(service: &S, request: &ActionRequest) -> Result<Value, ActionError>
where
    S: ResourceService + ?Sized,
{
    match request.action.parse::<Action>()? {
        Action::List => {
            let params: S::ListParams = request.decode()?;
            let (items, total) = service
                .list(params.page(), params.size(), params.filters().clone())
                .await?;
            Ok(json!({ "items": to_value(&items)?, "total": total }))
        }
        Action::Get => {
            let id = request.id()?;
            let item = service.get(&id).await?.ok_or(ActionError::NotFound)?;
            to_value(&item)
        }
        Action::Create => {
            let data: S::Create = request.decode()?;
            let id = service.create(data).await?;
            Ok(json!({ "id": id }))
        }
        Action::Update => {
            let id = request.id()?;
            let data: S::Update = request.decode()?;
            if !service.update(&id, data).await? {
                return Err(ActionError::NotFound);
            }
            Ok(json!({ "id": id }))
        }
        Action::Delete => {
            let id = request.id()?;
            if !service.delete(&id).await? {
                return Err(ActionError::NotFound);
            }
            Ok(json!({ "id": id }))
        }
    }
}

// Output encoding failures are service-side, not a caller mistake.
fn to_value<T: Serialize>(value: &T) -> Result<Value, ActionError> {
    serde_json::to_value(value).map_err(|err| ActionError::Service(err.into()))
}
