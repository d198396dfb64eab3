//! Home page with the shortening form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::domain::errors::ShortenError;
use crate::state::AppState;

/// A link created through the form.
pub struct CreatedLink {
    pub short_url: String,
    pub original_url: String,
}

/// Template for the home page.
///
/// Renders `templates/index.html`. Submitted values are echoed back so a
/// rejected form keeps its input.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub url: String,
    pub custom_code: String,
    pub error: Option<String>,
    pub created: Option<CreatedLink>,
}

impl IndexTemplate {
    fn empty() -> Self {
        Self {
            url: String::new(),
            custom_code: String::new(),
            error: None,
            created: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    pub url: String,
    #[serde(default)]
    pub custom_code: Option<String>,
}

/// Renders the empty form.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> impl IntoResponse {
    IndexTemplate::empty()
}

/// Handles a form submission.
///
/// # Endpoint
///
/// `POST /` (`application/x-www-form-urlencoded`, fields `url`, `custom_code`)
///
/// On success the page shows the new short URL and clears the form. On
/// failure the page is re-rendered with an inline message and a matching
/// status code; nothing is stored.
pub async fn shorten_form_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> impl IntoResponse {
    let custom_code = form
        .custom_code
        .as_deref()
        .filter(|c| !c.trim().is_empty());

    match state
        .link_service
        .create_link(&form.url, custom_code, None)
        .await
    {
        Ok(link) => {
            let page = IndexTemplate {
                created: Some(CreatedLink {
                    short_url: state.link_service.short_url(&link.short_code),
                    original_url: link.original_url,
                }),
                ..IndexTemplate::empty()
            };
            (StatusCode::CREATED, page)
        }
        Err(e) => {
            let status = form_error_status(&e);
            let page = IndexTemplate {
                url: form.url,
                custom_code: form.custom_code.unwrap_or_default(),
                error: Some(form_error_message(&e)),
                created: None,
            };
            (status, page)
        }
    }
}

fn form_error_status(e: &ShortenError) -> StatusCode {
    match e {
        ShortenError::InvalidUrl(_) | ShortenError::InvalidCode(_) => StatusCode::BAD_REQUEST,
        ShortenError::CodeTaken(_) => StatusCode::CONFLICT,
        ShortenError::NotFound(_) => StatusCode::NOT_FOUND,
        ShortenError::AllocationExhausted { .. } | ShortenError::PersistenceUnavailable(_) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// User-facing message for a failed submission.
fn form_error_message(e: &ShortenError) -> String {
    match e {
        ShortenError::InvalidUrl(_) => "Please enter a valid http or https URL.".to_string(),
        ShortenError::InvalidCode(reason) => format!(
            "Custom code rejected ({reason}). Use 3-20 letters, digits or hyphens."
        ),
        ShortenError::CodeTaken(_) => "That custom code is already taken.".to_string(),
        ShortenError::AllocationExhausted { .. } => {
            "Could not find a free short code. Please try again.".to_string()
        }
        ShortenError::NotFound(_) | ShortenError::PersistenceUnavailable(_) => {
            "The service is temporarily unavailable. Please try again later.".to_string()
        }
    }
}
