use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;

pub const SERVER_ERROR_MESSAGE: &str = "Something went wrong, please retry later";
pub const UNAVAILABLE_MESSAGE: &str = "The database is unavailable, please retry later";

/// Renders askama pages for the current request.
pub struct Template {
    current_path: String,
}

impl Template {
    pub fn current_path(&self) -> String {
        self.current_path.to_owned()
    }

    pub fn render<T: askama::Template>(&self, template: T) -> Response {
        match template.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template. Error: {err}"),
            )
                .into_response(),
        }
    }

    pub fn render_with_status<T: askama::Template>(
        &self,
        status: StatusCode,
        template: T,
    ) -> Response {
        let mut response = self.render(template);
        if response.status().is_success() {
            *response.status_mut() = status;
        }

        response
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Template {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Template {
            current_path: parts.uri.path().to_owned(),
        })
    }
}

#[derive(askama::Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub current_path: String,
}

#[derive(askama::Template)]
#[template(path = "500.html")]
pub struct ServerTemplate {
    pub current_path: String,
    pub message: &'static str,
}

/// Unwraps a `reptrack_shared::Result`, or returns the error page.
///
/// Client errors are expected to be handled by the caller before reaching
/// this macro; they are rendered like any other failure here.
#[macro_export]
macro_rules! try_page_response {
    ($result:expr, $template:expr) => {
        $crate::try_page_response!(sync: $result.await, $template)
    };

    (sync: $result:expr, $template:expr) => {
        match $result {
            Ok(r) => r,
            Err(err) => {
                let (status, message) = match &err {
                    reptrack_shared::Error::Storage(_) => (
                        axum::http::StatusCode::SERVICE_UNAVAILABLE,
                        $crate::template::UNAVAILABLE_MESSAGE,
                    ),
                    _ => (
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                        $crate::template::SERVER_ERROR_MESSAGE,
                    ),
                };
                tracing::error!(err = %err, "page failed");

                return $template
                    .render_with_status(
                        status,
                        $crate::template::ServerTemplate {
                            current_path: $template.current_path(),
                            message,
                        },
                    )
                    .into_response();
            }
        }
    };
}
