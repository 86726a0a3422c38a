//! services/api/src/bin/openapi.rs
//!
//! Writes the OpenAPI document for the REST API to disk, advertising the
//! configured bind address as the server. The output path is the first
//! argument, `openapi.json` by default.

use api_lib::{config::Config, error::ApiError, web::rest::openapi_document};

fn main() -> Result<(), ApiError> {
    let config = Config::from_env()?;
    let path = std::env::args().nth(1).unwrap_or_else(|| "openapi.json".to_string());

    let doc = openapi_document(&format!("http://{}", config.bind_address));
    std::fs::write(&path, doc.to_pretty_json()?)?;
    println!(
        "OpenAPI document for http://{} written to {} ({} paths)",
        config.bind_address,
        path,
        doc.paths.paths.len()
    );
    Ok(())
}
