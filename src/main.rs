#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;
#[macro_use]
extern crate rocket;

use chrono::NaiveDate;
use config::Config;
use pvoutput_rs::api::wire;
use pvoutput_rs::model::{Api, DEFAULT_HOST};
use pvoutput_rs::{Error, StatisticQuery, StatusQuery};
use rocket::http::ContentType;
use rocket::{Build, Rocket, State};
use serde::Serialize;

mod metrics;

#[derive(Clone, serde::Deserialize)]
pub struct PvOutputConfig {
    host: String,
    system_id: u64,
    api_key: String,
}

pub fn read_settings() -> Result<PvOutputConfig, config::ConfigError> {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("PVO"))?
        .set_default("host", DEFAULT_HOST)?;

    settings.try_into()
}

fn parse_date(date: Option<String>) -> Result<Option<NaiveDate>, Error> {
    date.map(|date| {
        wire::from_date(&date)
            .map_err(|e| Error::InvalidArgument(format!("invalid date `{}`: {}", date, e)))
    })
    .transpose()
}

fn to_json<T: Serialize>(value: &T) -> Result<(ContentType, String), Error> {
    serde_json::to_string_pretty(value)
        .map(|json| (ContentType::JSON, json))
        .map_err(|e| Error::Format(e.to_string()))
}

#[get("/metrics")]
async fn metrics_route(api: &State<Api>) -> Result<String, Error> {
    metrics::collect(api).await?;
    metrics::read()
}

#[get("/status?<date>&<history>&<stats>")]
async fn status_route(
    api: &State<Api>,
    date: Option<String>,
    history: Option<bool>,
    stats: Option<bool>,
) -> Result<(ContentType, String), Error> {
    let query = StatusQuery {
        date: parse_date(date)?,
        history: history.unwrap_or(false),
        day_statistics: stats.unwrap_or(false),
        ..Default::default()
    };
    let status = pvoutput_rs::get_status(api, &query).await?;
    to_json(&status)
}

#[get("/statistic?<from>&<to>&<consumption>&<credits>")]
async fn statistic_route(
    api: &State<Api>,
    from: Option<String>,
    to: Option<String>,
    consumption: Option<bool>,
    credits: Option<bool>,
) -> Result<(ContentType, String), Error> {
    let query = StatisticQuery {
        date_from: parse_date(from)?,
        date_to: parse_date(to)?,
        consumption_and_import: consumption.unwrap_or(false),
        credits_debits: credits.unwrap_or(false),
        ..Default::default()
    };
    let statistic = pvoutput_rs::get_statistic(api, &query).await?;
    to_json(&statistic)
}

fn rocket(api: Api) -> Rocket<Build> {
    rocket::build()
        .manage(api)
        .mount("/", routes![metrics_route, status_route, statistic_route])
}

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = read_settings()?;
    let api = pvoutput_rs::api(settings.system_id, settings.api_key, Some(settings.host))?;

    log::info!("Exporting PVOutput system {} from {}", api.system_id, api.host);

    let _ = rocket(api).launch().await?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use mockito::{Matcher, Server};
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;

    const STATUS_PATH: &str = "/service/r2/getstatus.jsp";
    const STATISTIC_PATH: &str = "/service/r2/getstatistic.jsp";

    async fn client(host: String) -> Client {
        let api = pvoutput_rs::api(4242, "0123456789abcdef".to_string(), Some(host)).unwrap();
        Client::tracked(rocket(api)).await.unwrap()
    }

    #[tokio::test]
    async fn status_invalid_date_is_bad_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", STATUS_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let client = client(server.url()).await;
        let response = client.get("/status?date=2023-06-01").dispatch().await;

        assert_eq!(Status::BadRequest, response.status());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn status_no_data_is_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", STATUS_PATH)
            .match_query(Matcher::UrlEncoded("d".into(), "20230601".into()))
            .with_status(403)
            .with_body("No status found for this date.")
            .create_async()
            .await;

        let client = client(server.url()).await;
        let response = client.get("/status?date=20230601").dispatch().await;

        assert_eq!(Status::NotFound, response.status());
    }

    #[tokio::test]
    async fn status_unauthorized_is_forbidden() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", STATUS_PATH)
            .with_status(401)
            .with_body("Unauthorized 401: Invalid API Key")
            .create_async()
            .await;

        let client = client(server.url()).await;
        let response = client.get("/status").dispatch().await;

        assert_eq!(Status::Forbidden, response.status());
    }

    #[tokio::test]
    async fn status_upstream_body_is_escaped() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", STATUS_PATH)
            .with_status(403)
            .with_body("<b>No status found</b>")
            .create_async()
            .await;

        let client = client(server.url()).await;
        let response = client.get("/status").dispatch().await;

        assert_eq!(Status::NotFound, response.status());
        let body = response.into_string().await.unwrap();
        assert!(body.contains("&lt;b&gt;No status found&lt;/b&gt;"));
        assert!(!body.contains("<b>"));
    }

    #[tokio::test]
    async fn status_transport_failure_is_bad_gateway() {
        let client = client("http://127.0.0.1:1".to_string()).await;
        let response = client.get("/status").dispatch().await;

        assert_eq!(Status::BadGateway, response.status());
    }

    #[tokio::test]
    async fn status_decoded_as_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", STATUS_PATH)
            .with_status(200)
            .with_body("20230601,14:30,5000,2100,3000,1800,85.5,22.3,240.1")
            .create_async()
            .await;

        let client = client(server.url()).await;
        let response = client.get("/status").dispatch().await;

        assert_eq!(Status::Ok, response.status());
        assert_eq!(Some(ContentType::JSON), response.content_type());
        let json: serde_json::Value =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!("current", json["shape"]);
        assert_eq!(5000, json["data"]["energy_generation"]);
    }

    #[tokio::test]
    async fn statistic_invalid_date_is_bad_request() {
        let client = client("http://127.0.0.1:1".to_string()).await;
        let response = client.get("/statistic?from=20220101&to=jan").dispatch().await;

        assert_eq!(Status::BadRequest, response.status());
    }

    #[tokio::test]
    async fn statistic_malformed_is_internal_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", STATISTIC_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("246800,246800")
            .create_async()
            .await;

        let client = client(server.url()).await;
        let response = client
            .get("/statistic?from=20220101&to=20220131")
            .dispatch()
            .await;

        assert_eq!(Status::InternalServerError, response.status());
    }
}
