use anyhow::Result;
use log::info;
use serde_json::json;
use sigv4_auth::{Config, Signer};
use std::env;

/// Sign a request to API Gateway and print the signed headers.
///
/// ```shell
/// AWS_ACCESS_KEY_ID=... AWS_SECRET_ACCESS_KEY=... \
///   cargo run --example execute_api_sign -- https://<api-id>.execute-api.us-east-1.amazonaws.com/prod/details
/// ```
fn main() -> Result<()> {
    env_logger::init();

    let url = env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.example.com/details?username=tstark".to_string());

    // Loading credentials is up to the application, here we read them from env.
    let signer = Signer::from_config(Config {
        access_key_id: env::var("AWS_ACCESS_KEY_ID").ok(),
        secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").ok(),
        session_token: env::var("AWS_SESSION_TOKEN").ok(),
        service: Some("execute-api".to_string()),
        region: Some(env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string())),
        ..Default::default()
    })?;
    info!("created signer: {signer:?}");

    let body = serde_json::to_vec(&json!({"team": "avengers"}))?;
    let mut req = http::Request::post(url.as_str())
        .header("content-type", "application/json")
        .body(body)?;

    signer.sign_now(&mut req)?;

    for (name, value) in req.headers() {
        if value.is_sensitive() && name != "authorization" {
            println!("{name}: <redacted>");
        } else {
            println!("{name}: {}", value.to_str()?);
        }
    }
    Ok(())
}
