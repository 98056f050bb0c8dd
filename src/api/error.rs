use crate::api::response::DecodeError;
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP status (DNS, connection, timeout, body read).
    #[error("transport failure: {0}")]
    TransportFailure(#[from] reqwest::Error),

    /// HTTP 401, the API key is invalid or has been revoked.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("no status found for the requested period: {0}")]
    NoDataForPeriod(String),

    #[error("service responded {status}: {body}")]
    ServiceError { status: u16, body: String },

    /// HTTP 200 with a body that does not fit the shape the request asked for.
    #[error("malformed response `{body}`: {reason}")]
    MalformedResponse {
        body: String,
        #[source]
        reason: DecodeError,
    },

    /// Rejected before any request was made, such as a zero system id.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("format error: {0}")]
    Format(String),
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn html_response(status: Status, title: &str, message: &str) -> response::Result<'static> {
    let error = format!(
        "<html><body><h3>{}</h3>Downstream API response: <code>{}</code></body></html>",
        title,
        escape_html(message)
    );
    Response::build()
        .status(status)
        .sized_body(error.len(), Cursor::new(error))
        .header(ContentType::new("text", "html"))
        .ok()
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Error::Unauthorized(s) => html_response(Status::Forbidden, "403 Forbidden", &s),
            Error::NoDataForPeriod(s) => html_response(Status::NotFound, "404 Not Found", &s),
            Error::InvalidArgument(s) => html_response(Status::BadRequest, "400 Bad Request", &s),
            Error::TransportFailure(e) => {
                html_response(Status::BadGateway, "502 Bad Gateway", &e.to_string())
            }
            _ => html_response(
                Status::InternalServerError,
                "Unknown exception",
                &format!("{:?}", self),
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn escape_html_markup() {
        assert_eq!(
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; more",
            escape_html("<script>alert(\"x\")</script> & more")
        );
        assert_eq!("No status found", escape_html("No status found"));
    }
}
