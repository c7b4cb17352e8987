use crate::{
    config::PlannerConfig,
    core::ItineraryHandler,
    server,
    types::{itinerary::Itinerary, response::InboundRequest},
};
use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let model = Arg::new("model")
        .short('m')
        .long("model")
        .value_name("MODEL")
        .help("Anthropic model id (or set ITINERARY_MODEL)");
    let base_url = Arg::new("base-url")
        .short('u')
        .long("base-url")
        .value_name("URL")
        .help("Anthropic API base URL (or set ANTHROPIC_BASE_URL)");
    let timeout = Arg::new("timeout")
        .short('t')
        .long("timeout")
        .value_name("SECONDS")
        .value_parser(clap::value_parser!(u64))
        .help("Request timeout in seconds (or set ITINERARY_TIMEOUT_SECS)");

    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate day-by-day travel itineraries with the Anthropic Messages API")
        .subcommand_required(true)
        .subcommand(
            Command::new("serve")
                .about("Serve the itinerary endpoint over HTTP")
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_name("HOST")
                        .help("Bind host (or set HOST)"),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .value_parser(clap::value_parser!(u16))
                        .help("Bind port (or set PORT)"),
                )
                .arg(model.clone())
                .arg(base_url.clone())
                .arg(timeout.clone()),
        )
        .subcommand(
            Command::new("plan")
                .about("Generate one itinerary and print it as JSON")
                .arg(
                    Arg::new("destination")
                        .help("Where to go, e.g. \"Paris, France\"")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("days")
                        .short('d')
                        .long("days")
                        .value_name("DAYS")
                        .value_parser(clap::value_parser!(u32))
                        .default_value("3"),
                )
                .arg(
                    Arg::new("budget")
                        .short('b')
                        .long("budget")
                        .value_name("TIER")
                        .value_parser(["budget", "mid-range", "luxury"])
                        .default_value("mid-range"),
                )
                .arg(
                    Arg::new("trip-type")
                        .short('k')
                        .long("trip-type")
                        .value_name("TYPE")
                        .value_parser(["solo", "couple", "family", "friends"])
                        .default_value("solo"),
                )
                .arg(
                    Arg::new("interest")
                        .short('i')
                        .long("interest")
                        .value_name("TAG")
                        .action(ArgAction::Append)
                        .help("Interest tag; repeat for several"),
                )
                .arg(model)
                .arg(base_url)
                .arg(timeout),
        )
}

fn apply_overrides(config: &mut PlannerConfig, matches: &ArgMatches) {
    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*timeout);
    }
}

/// CLI entry point for the trip-planner binary
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = cli().get_matches();
    let mut config = PlannerConfig::from_env().context("failed to load configuration")?;

    match matches.subcommand() {
        Some(("serve", sub)) => {
            apply_overrides(&mut config, sub);
            if let Some(host) = sub.get_one::<String>("host") {
                config.host = host.clone();
            }
            if let Some(port) = sub.get_one::<u16>("port") {
                config.port = *port;
            }
            server::serve(&config).await?;
        }
        Some(("plan", sub)) => {
            apply_overrides(&mut config, sub);
            plan(&config, sub).await?;
        }
        _ => unreachable!("clap enforces a subcommand"),
    }

    Ok(())
}

async fn plan(config: &PlannerConfig, matches: &ArgMatches) -> anyhow::Result<()> {
    let interests: Vec<String> = matches
        .get_many::<String>("interest")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let body = json!({
        "destination": matches.get_one::<String>("destination"),
        "days": matches.get_one::<u32>("days"),
        "budget": matches.get_one::<String>("budget"),
        "tripType": matches.get_one::<String>("trip-type"),
        "interests": interests,
    });

    let handler = ItineraryHandler::from_config(config);
    info!("Using model: {}", handler.model());

    let response = handler.handle(InboundRequest::post_json(&body)).await;
    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if !response.is_success() {
        let message = response.error_message().unwrap_or("unknown error").to_string();
        error!("Itinerary generation failed: {}", message);
        bail!("request failed with status {}: {}", response.status, message);
    }

    let itinerary = Itinerary::from_value(&response.body["itinerary"])?;
    for day in itinerary.days() {
        info!(
            "Day {}: {} ({} activities, staying at {})",
            day.day,
            day.title,
            day.activities.len(),
            day.hotel
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn plan_flags_parse() {
        let matches = cli()
            .try_get_matches_from([
                "trip-planner",
                "plan",
                "Lisbon",
                "--days",
                "5",
                "--budget",
                "luxury",
                "-i",
                "food",
                "-i",
                "history",
            ])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "plan");
        assert_eq!(sub.get_one::<u32>("days"), Some(&5));
        assert_eq!(sub.get_one::<String>("trip-type").map(String::as_str), Some("solo"));
        let interests: Vec<&String> = sub.get_many::<String>("interest").unwrap().collect();
        assert_eq!(interests, ["food", "history"]);
    }

    #[test]
    fn overrides_replace_env_values() {
        let matches = cli()
            .try_get_matches_from(["trip-planner", "serve", "-m", "claude-sonnet-4-5", "-t", "30"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();

        let mut config = PlannerConfig::default();
        apply_overrides(&mut config, sub);
        assert_eq!(config.model, "claude-sonnet-4-5");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn invalid_budget_is_rejected_by_cli() {
        assert!(cli()
            .try_get_matches_from(["trip-planner", "plan", "Rome", "--budget", "cheap"])
            .is_err());
    }
}
