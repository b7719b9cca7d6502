//! Handler outcomes and view rendering
//!
//! Handlers never produce markup. They return an [`Outcome`]: either a
//! [`View`] (template name plus context) or a redirect. A `View` travels in the
//! response extensions until [`render_views`], installed on the router, hands it
//! to the [`ViewRenderer`] held in [`AppState`]. The status code set by the
//! handler (200 for forms, 404 for missing records...) is kept.

pub mod models;

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::infrastructure::AppState;

/// A template identifier and the named values it is rendered with
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub template: &'static str,
    pub context: Value,
}

impl View {
    pub fn new(template: &'static str, context: Value) -> Self {
        Self { template, context }
    }
}

/// What a handler asks the routing layer to do
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    Redirect(String),
}

impl Outcome {
    pub fn render(template: &'static str, context: Value) -> Self {
        Outcome::Render(View::new(template, context))
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Outcome::Redirect(location.into())
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Render(view) => {
                let mut response = StatusCode::OK.into_response();
                response.extensions_mut().insert(view);
                response
            }
            Outcome::Redirect(location) => {
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
        }
    }
}

/// Turns a view into a response body
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: View) -> Response;
}

/// Renders `{"template": ..., "context": {...}}` for clients that do their own templating.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonViewRenderer;

impl ViewRenderer for JsonViewRenderer {
    fn render(&self, view: View) -> Response {
        Json(json!({
            "template": view.template,
            "context": view.context,
        }))
        .into_response()
    }
}

/// Middleware rendering any [`View`] left in the response by a handler.
pub async fn render_views(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let Some(view) = response.extensions_mut().remove::<View>() else {
        return response;
    };

    let status = response.status();
    let mut rendered = state.renderer.render(view);
    *rendered.status_mut() = status;
    rendered
}
