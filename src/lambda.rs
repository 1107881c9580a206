#[cfg(feature = "lambda")]
use base64::Engine;
#[cfg(feature = "lambda")]
use folio_contact::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use folio_contact::{Forwarder, HttpTransport, RelayResponse, ServerConfig};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "lambda")]
use std::collections::HashMap;

/// API Gateway / Function URL proxy event; only the body matters here.
#[cfg(feature = "lambda")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(feature = "lambda")]
impl Response {
    fn json(status_code: u16, body: &RelayResponse) -> Result<Self, Error> {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Ok(Self {
            status_code,
            headers,
            body: serde_json::to_string(body)?,
        })
    }
}

#[cfg(feature = "lambda")]
async fn function_handler(
    forwarder: &Forwarder<HttpTransport>,
    event: LambdaEvent<Request>,
) -> Result<Response, Error> {
    tracing::info!(request_id = %event.context.request_id, "Handling contact submission");

    let raw = event.payload.body.unwrap_or_default();
    let body = if event.payload.is_base64_encoded {
        match base64::engine::general_purpose::STANDARD.decode(raw.as_bytes()) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Invalid base64 body: {}", e);
                return Response::json(500, &RelayResponse::failure("Server error"));
            }
        }
    } else {
        raw.into_bytes()
    };

    let outcome = forwarder.handle(&body).await;
    Response::json(outcome.status_code().as_u16(), &outcome.response())
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = ServerConfig::from_env()?;
    config.validate()?;

    let transport = HttpTransport::new(config.timeout())?;
    let forwarder = Forwarder::new(config, transport);
    let forwarder = &forwarder;

    run(service_fn(move |event: LambdaEvent<Request>| async move {
        function_handler(forwarder, event).await
    }))
    .await
}
