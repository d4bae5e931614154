use super::parsers::parse_header_list;
use super::*;
use crate::error::{AppError, ValidationError};
use clap::Parser;
use std::time::Duration;

fn parse(args: &[&str]) -> Result<TesterArgs, String> {
    TesterArgs::try_parse_from(std::iter::once("volley").chain(args.iter().copied()))
        .map_err(|err| format!("parse failed: {}", err))
}

#[test]
fn defaults_match_documented_values() -> Result<(), String> {
    let args = parse(&["-u", "http://localhost:8080/"])?;
    if args.concurrency.get() != 10 || args.requests.get() != 100 {
        return Err(format!(
            "Unexpected defaults: concurrency {} requests {}",
            args.concurrency.get(),
            args.requests.get()
        ));
    }
    if args.method != HttpMethod::Get || args.format != OutputFormat::Text {
        return Err("Method should default to GET and format to text".to_owned());
    }
    if args.request_timeout != Duration::from_secs(30)
        || args.connect_timeout != Duration::from_secs(10)
        || args.redirect_limit != 10
    {
        return Err("Unexpected client defaults".to_owned());
    }
    if args.output_dir != "outputs/cli" || args.no_save || args.qps.is_some() {
        return Err("Unexpected output defaults".to_owned());
    }
    Ok(())
}

#[test]
fn short_flags_are_parsed() -> Result<(), String> {
    let args = parse(&[
        "-u",
        "http://localhost/api",
        "-c",
        "4",
        "-n",
        "12",
        "-X",
        "POST",
        "-H",
        "Content-Type: application/json",
        "-d",
        "{}",
        "-q",
        "2.5",
    ])?;
    if args.concurrency.get() != 4 || args.requests.get() != 12 {
        return Err("Concurrency or request count not parsed".to_owned());
    }
    if args.method != HttpMethod::Post {
        return Err(format!("Expected POST, got {:?}", args.method));
    }
    if args.headers != vec![("Content-Type".to_owned(), "application/json".to_owned())] {
        return Err(format!("Unexpected headers {:?}", args.headers));
    }
    if args.data.as_deref() != Some("{}") || args.qps != Some(2.5) {
        return Err("Body or rate not parsed".to_owned());
    }
    Ok(())
}

#[test]
fn zero_counts_and_bad_rates_are_rejected() -> Result<(), String> {
    for bad in [
        vec!["-u", "http://x/", "-c", "0"],
        vec!["-u", "http://x/", "-n", "0"],
        vec!["-u", "http://x/", "-q", "0"],
        vec!["-u", "http://x/", "-q", "-3"],
        vec!["-u", "http://x/", "-q", "fast"],
        vec!["-u", "http://x/", "--timeout", "0s"],
        vec!["-u", "http://x/", "-H", "no-colon"],
    ] {
        if parse(&bad).is_ok() {
            return Err(format!("Expected {:?} to be rejected", bad));
        }
    }
    Ok(())
}

#[test]
fn parse_header_trims_key_and_value() -> Result<(), String> {
    let parsed = parse_header(" X-Trace :  abc:def ").map_err(|err| err.to_string())?;
    if parsed != ("X-Trace".to_owned(), "abc:def".to_owned()) {
        return Err(format!("Unexpected header {:?}", parsed));
    }
    match parse_header(": value") {
        Err(ValidationError::InvalidHeaderFormat { .. }) => Ok(()),
        other => Err(format!("Expected empty key to fail, got {:?}", other)),
    }
}

#[test]
fn parse_header_list_splits_on_commas() -> Result<(), String> {
    let parsed = parse_header_list("Accept:text/html, X-Id:7,").map_err(|err| err.to_string())?;
    let expected = vec![
        ("Accept".to_owned(), "text/html".to_owned()),
        ("X-Id".to_owned(), "7".to_owned()),
    ];
    if parsed != expected {
        return Err(format!("Unexpected headers {:?}", parsed));
    }
    if parse_header_list("Accept").is_ok() {
        return Err("Entry without a colon should fail".to_owned());
    }
    Ok(())
}

#[test]
fn parse_duration_value_supports_units() -> Result<(), String> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("3", Duration::from_secs(3)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3_600)),
    ];
    for (input, expected) in cases {
        let actual = parse_duration_value(input).map_err(|err| err.to_string())?;
        if actual != expected {
            return Err(format!("{} parsed as {:?}, expected {:?}", input, actual, expected));
        }
    }
    for bad in ["", "ms", "5d", "0"] {
        if parse_duration_value(bad).is_ok() {
            return Err(format!("Expected {:?} to be rejected", bad));
        }
    }
    Ok(())
}

#[test]
fn parse_rate_requires_finite_positive() -> Result<(), String> {
    if parse_rate(0.5).map_err(|err| err.to_string())? != 0.5 {
        return Err("0.5 should be accepted".to_owned());
    }
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        if parse_rate(bad).is_ok() {
            return Err(format!("Expected {} to be rejected", bad));
        }
    }
    Ok(())
}

#[test]
fn load_config_merges_headers_and_client_options() -> Result<(), String> {
    let args = parse(&[
        "-u",
        "https://example.org/",
        "-H",
        "A: 1",
        "--headers",
        "B:2,C:3",
        "--timeout",
        "500ms",
        "--redirect",
        "0",
        "--insecure",
        "--no-ua",
    ])?;
    let config = args.load_config().map_err(|err| err.to_string())?;

    let names: Vec<&str> = config.headers.iter().map(|(key, _)| key.as_str()).collect();
    if names != ["A", "B", "C"] {
        return Err(format!("Unexpected header order {:?}", names));
    }
    if config.client.request_timeout != Duration::from_millis(500)
        || config.client.redirect_limit != 0
        || !config.client.insecure
        || config.client.user_agent.is_some()
    {
        return Err(format!("Unexpected client options {:?}", config.client));
    }
    Ok(())
}

#[test]
fn load_config_requires_url() -> Result<(), String> {
    let args = parse(&[])?;
    match args.load_config() {
        Err(AppError::Validation(ValidationError::MissingUrl)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Missing URL should be rejected".to_owned()),
    }
}

#[test]
fn positive_wrappers_reject_zero() -> Result<(), String> {
    if PositiveU64::try_from(0).is_ok() || PositiveUsize::try_from(0).is_ok() {
        return Err("Zero should be rejected".to_owned());
    }
    let parsed: PositiveUsize = " 8 ".parse().map_err(|err: ValidationError| err.to_string())?;
    if parsed.get() != 8 {
        return Err(format!("Expected 8, got {}", parsed.get()));
    }
    Ok(())
}
