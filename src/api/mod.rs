pub mod endpoint;
pub mod error;
pub mod request;
pub mod response;
pub mod wire;

use crate::model;
pub use error::Error;
use http::StatusCode;
pub use request::{StatisticQuery, StatusQuery, StatusShape};
use response::DecodeError;

const API_KEY_HEADER: &str = "X-Pvoutput-Apikey";
const SYSTEM_ID_HEADER: &str = "X-Pvoutput-SystemId";
const NO_STATUS_FOUND: &str = "No status found";

pub fn api(
    system_id: model::SystemId,
    api_key: String,
    host: Option<String>,
) -> Result<model::Api, Error> {
    let api = model::Api::new(system_id, api_key)?;
    Ok(match host {
        Some(host) => api.with_host(host),
        None => api,
    })
}

impl model::Api {
    pub fn new(system_id: model::SystemId, api_key: String) -> Result<Self, Error> {
        if system_id == 0 {
            return Err(Error::InvalidArgument(String::from(
                "system id must be a positive integer",
            )));
        }
        if api_key.trim().is_empty() {
            return Err(Error::InvalidArgument(String::from(
                "API key must not be empty",
            )));
        }
        Ok(model::Api {
            host: model::DEFAULT_HOST.to_owned(),
            system_id,
            api_key,
            client: reqwest::Client::new(),
        })
    }

    pub fn with_host(self, host: String) -> Self {
        model::Api { host, ..self }
    }

    /// Use a preconfigured client, for example one with a request timeout.
    pub fn with_client(self, client: reqwest::Client) -> Self {
        model::Api { client, ..self }
    }

    fn url(&self, endpoint: &endpoint::Endpoint) -> String {
        format!("{}/{}", self.host.trim_end_matches('/'), endpoint)
    }
}

/// Map a non-200 status to the matching `Error`, or carry the body forward.
fn check_response(status: StatusCode, body: String) -> Result<String, Error> {
    match status {
        StatusCode::OK => Ok(body),
        StatusCode::UNAUTHORIZED => Err(Error::Unauthorized(body)),
        _ if body.contains(NO_STATUS_FOUND) => Err(Error::NoDataForPeriod(body)),
        _ => Err(Error::ServiceError {
            status: status.as_u16(),
            body,
        }),
    }
}

/// Send one authenticated GET and return the status code along with the text body.
async fn get(
    api: &model::Api,
    endpoint: &endpoint::Endpoint,
    params: &request::Params,
) -> Result<(StatusCode, String), Error> {
    let url = api.url(endpoint);

    log::trace!("endpoint: {}, params: {:#?}", endpoint, params);

    let request = api
        .client
        .get(url)
        .header(API_KEY_HEADER, api.api_key.as_str())
        .header(SYSTEM_ID_HEADER, api.system_id.to_string())
        .header(
            http::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .header(http::header::ACCEPT, "text/plain");

    /* An empty map would still leave a dangling `?` behind */
    let request = if params.is_empty() {
        request
    } else {
        request.query(params)
    };

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    log::trace!("status: {}, response_text: {}", status, body);

    Ok((status, body))
}

async fn get_checked(
    api: &model::Api,
    endpoint: &endpoint::Endpoint,
    params: &request::Params,
) -> Result<String, Error> {
    let (status, body) = get(api, endpoint, params).await?;
    check_response(status, body).map_err(|e| {
        log::warn!("{} failed: {}", endpoint, e);
        e
    })
}

fn decode<T>(
    body: String,
    parse: impl FnOnce(&str) -> Result<T, DecodeError>,
) -> Result<T, Error> {
    parse(&body).map_err(|reason| Error::MalformedResponse { body, reason })
}

/// Read the status of the system, in the shape selected by `query`.
pub async fn get_status(api: &model::Api, query: &StatusQuery) -> Result<model::Status, Error> {
    let body = get_checked(api, endpoint::GET_STATUS, &query.params()).await?;
    let shape = query.shape();

    log::debug!("decoding {:?} status", shape);

    match shape {
        StatusShape::DayStatistics => {
            decode(body, response::day_statistics::parse).map(model::Status::DayStatistics)
        }
        StatusShape::History => decode(body, response::history::parse).map(model::Status::History),
        StatusShape::Current => decode(body, response::status::parse).map(model::Status::Current),
    }
}

/// Read statistics aggregated over the range in `query`.
///
/// The service may narrow the range; the returned `actual_date_from` and `actual_date_to`
/// reflect what it actually used.
pub async fn get_statistic(
    api: &model::Api,
    query: &StatisticQuery,
) -> Result<model::AggregateStatistic, Error> {
    let body = get_checked(api, endpoint::GET_STATISTIC, &query.params()).await?;
    let blocks = query.blocks();
    decode(body, |body| response::statistic::parse(body, blocks))
}
