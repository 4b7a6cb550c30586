use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum BillError {
    #[error("no tenant at position {0}")]
    TenantNotFound(usize),

    #[error("couldn't copy to the clipboard: {0}")]
    Clipboard(String),
}

impl ResponseError for BillError {
    fn status_code(&self) -> StatusCode {
        match self {
            BillError::TenantNotFound(_) => StatusCode::NOT_FOUND,
            BillError::Clipboard(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).body(self.to_string())
    }
}
