//! Hammers the login endpoint with a fixed credential pair.
//!
//! Bounded retry loop with no backoff and no concurrency; prints the attempt
//! number and the server's answer for each request. Useful for eyeballing how
//! the endpoint behaves under repeated identical logins.
//!
//! Configuration via environment:
//! - `HAMMER_URL`       login endpoint (default http://localhost:3000/api/auth/login)
//! - `HAMMER_EMAIL`     email to submit
//! - `HAMMER_PASSWORD`  password to submit
//! - `HAMMER_ATTEMPTS`  number of requests (default 1000000)

use std::env;

use serde_json::json;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let url = env::var("HAMMER_URL")
        .unwrap_or_else(|_| "http://localhost:3000/api/auth/login".to_string());
    let email = env::var("HAMMER_EMAIL").unwrap_or_else(|_| "david@example.com".to_string());
    let password = env::var("HAMMER_PASSWORD").unwrap_or_else(|_| "David1234".to_string());
    let attempts: u64 = env::var("HAMMER_ATTEMPTS")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(1_000_000);

    let payload = json!({
        "email": email,
        "password": password,
    });

    let client = reqwest::Client::new();

    for attempt in 1..=attempts {
        match client.post(&url).json(&payload).send().await {
            Ok(response) => {
                let status = response.status();
                let message = response
                    .json::<Value>()
                    .await
                    .ok()
                    .and_then(|body| {
                        body.pointer("/data/message")
                            .and_then(Value::as_str)
                            .map(str::to_string)
                    })
                    .unwrap_or_else(|| "<no message>".to_string());

                println!("Attempt {attempt}: {status} {message}");
            }
            Err(e) => {
                println!("Attempt {attempt}: request failed: {e}");
            }
        }
    }

    Ok(())
}
