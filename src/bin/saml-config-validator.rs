//! # SAML2 Inbound Configuration Validator
//!
//! A command-line utility for checking SAML2 inbound request payloads before they are
//! sent to an identity provider.
//!
//! ## Overview
//!
//! Each JSON file is parsed as a requested SAML2 configuration and checked for:
//! - JSON syntax and field names
//! - Presence of a configuration source (`metadataFile`, `metadataURL` or `manualConfiguration`)
//! - The mandatory binding rule (`HTTP_POST` and `HTTP_REDIRECT` always enabled)
//! - Decodable and complete metadata, when a metadata file is supplied
//!
//! Metadata URLs are reported but never fetched.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin saml-config-validator requests/travelocity.json
//! cargo run --bin saml-config-validator ./requests/
//! ```
//!
//! When a directory is given, every valid request is also registered against an
//! in-memory engine to detect issuers claimed by more than one file.
//!
//! Set `RUST_LOG=debug` to see resolver decisions.
//!
//! ## Exit Codes
//!
//! - `0`: All requests are valid
//! - `1`: One or more requests are invalid or validation error occurred

use saml_inbound::engine::metadata::{decode_metadata_file, parse_service_provider};
use saml_inbound::model::{Application, ConfigSource, RequestedSamlConfig};
use saml_inbound::resolver::validate_requested_bindings;
use saml_inbound::{
    ErrorMessage, InMemorySamlEngine, InboundError, InboundResolver, RequestContext,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <request-file-or-directory>", args[0]);
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  {} requests/travelocity.json", args[0]);
        eprintln!("  {} ./requests/", args[0]);
        process::exit(1);
    }

    let path = Path::new(&args[1]);

    if path.is_file() {
        validate_single_file(path);
    } else if path.is_dir() {
        validate_directory(path).await;
    } else {
        eprintln!(
            "Error: '{}' is not a valid file or directory",
            path.display()
        );
        process::exit(1);
    }
}

fn validate_single_file(file_path: &Path) {
    println!("Validating request file: {}", file_path.display());

    match load_and_validate_request(file_path) {
        Ok(requested) => {
            println!("✓ Request is valid!");
            print_request_summary(&requested);
        }
        Err(e) => {
            eprintln!("❌ Request validation failed: {}", e);
            process::exit(1);
        }
    }
}

async fn validate_directory(dir_path: &Path) {
    println!("Validating requests in directory: {}", dir_path.display());

    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();

    let mut valid = Vec::new();
    let mut error_count = 0;

    for path in files {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("\nValidating: {}", name);

        match load_and_validate_request(&path) {
            Ok(requested) => {
                println!("  ✓ Valid - {}", describe_source(&requested));
                valid.push((name, requested));
            }
            Err(e) => {
                eprintln!("  ❌ Invalid - {}", e);
                error_count += 1;
            }
        }
    }

    println!("\nValidation Summary:");
    println!("  Valid requests: {}", valid.len());
    println!("  Invalid requests: {}", error_count);

    if error_count > 0 {
        process::exit(1);
    }

    println!("\nRegistering requests against an in-memory engine...");
    let resolver = InboundResolver::new(InMemorySamlEngine::new());
    let context = RequestContext::with_generated_id();
    let mut conflicts = 0;

    for (name, requested) in &valid {
        if matches!(requested.source(), Some(ConfigSource::MetadataUrl(_))) {
            println!("  - {}: skipped (metadata URL)", name);
            continue;
        }
        let mut application = Application::new(name.clone(), name.clone());
        match resolver
            .put_config(&mut application, requested, &context)
            .await
        {
            Ok(inbound) => println!("  ✓ {}: issuer {}", name, inbound.auth_key),
            Err(e) => {
                eprintln!("  ❌ {}: {}", name, e);
                conflicts += 1;
            }
        }
    }

    if conflicts > 0 {
        eprintln!("\n❌ {} request(s) could not be registered", conflicts);
        process::exit(1);
    }
    println!("✓ All requests registered successfully");
}

fn load_and_validate_request(
    file_path: &Path,
) -> Result<RequestedSamlConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(file_path)?;
    let requested: RequestedSamlConfig = serde_json::from_str(&content)?;

    validate_requested_bindings(&requested)?;

    match requested.source() {
        None => return Err(InboundError::from(ErrorMessage::MissingConfigurationSource).into()),
        Some(ConfigSource::MetadataFile(file)) => {
            let xml = decode_metadata_file(file)?;
            parse_service_provider(&xml)?;
        }
        Some(ConfigSource::MetadataUrl(url)) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("Metadata URL '{}' is not an HTTP(S) URL", url).into());
            }
        }
        Some(ConfigSource::Manual(config)) => {
            if config.issuer.trim().is_empty() {
                return Err("Manual configuration has an empty issuer".into());
            }
            if config.assertion_consumer_urls.is_empty() {
                return Err("Manual configuration has no assertion consumer URL".into());
            }
        }
    }

    Ok(requested)
}

fn describe_source(requested: &RequestedSamlConfig) -> String {
    match requested.source() {
        Some(ConfigSource::MetadataFile(_)) => "metadata file".to_string(),
        Some(ConfigSource::MetadataUrl(url)) => format!("metadata URL {}", url),
        Some(ConfigSource::Manual(config)) => format!("manual configuration for {}", config.issuer),
        None => "no source".to_string(),
    }
}

fn print_request_summary(requested: &RequestedSamlConfig) {
    println!();
    println!("Request Summary:");
    println!("  Source: {}", describe_source(requested));

    let populated = requested.populated_sources();
    if populated.len() > 1 {
        let ignored: Vec<String> = populated[1..].iter().map(|kind| kind.to_string()).collect();
        println!("  Ignored sources: {}", ignored.join(", "));
    }

    if let Some(config) = &requested.manual_configuration {
        println!("  Assertion consumer URLs: {}", config.assertion_consumer_urls.len());
        for url in &config.assertion_consumer_urls {
            println!("    - {}", url);
        }
        println!(
            "  Certificate: {}",
            if config.certificate.is_some() { "present" } else { "absent" }
        );
    }

    match requested.requested_bindings() {
        Some(bindings) => println!("  Bindings: {}", bindings),
        None => println!("  Bindings: engine defaults"),
    }
    if let Some(index) = requested.source().and_then(|source| source.attribute_index()) {
        println!("  Attribute consuming service index: {}", index);
    }
}
