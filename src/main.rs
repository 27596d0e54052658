use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tourguide::attractions::AttractionService;
use tourguide::composer::ResponseComposer;
use tourguide::config::TourGuideConfig;
use tourguide::geocode::{Geocoder, NominatimClient};
use tourguide::weather::{OpenMeteoClient, WeatherProvider, WeatherService};
use tourguide::{FeatureProvider, OverpassClient, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = TourGuideConfig::load()?;
    init_tracing(&config);

    let composer = Arc::new(build_composer(&config)?);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("serve") => {
            let mut server = config.server.clone();
            if let Some(port) = args.get(1).and_then(|arg| arg.parse().ok()) {
                server.port = port;
            }
            web::run(composer, &server).await
        }
        _ => run_shell(&composer).await,
    }
}

fn init_tracing(config: &TourGuideConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_composer(config: &TourGuideConfig) -> Result<ResponseComposer> {
    let geocoder: Arc<dyn Geocoder> = Arc::new(NominatimClient::new(config)?);
    let weather_provider: Arc<dyn WeatherProvider> = Arc::new(OpenMeteoClient::new(config)?);
    let feature_provider: Arc<dyn FeatureProvider> = Arc::new(OverpassClient::new(config)?);

    let weather = WeatherService::new(Arc::clone(&geocoder), weather_provider);
    let attractions = AttractionService::new(geocoder, feature_provider, &config.search);

    Ok(ResponseComposer::new(weather, attractions))
}

async fn run_shell(composer: &ResponseComposer) -> Result<()> {
    println!("{}", "=".repeat(60));
    println!("TourGuide - travel planning assistant");
    println!("{}", "=".repeat(60));
    println!("\nEnter a place you want to visit and ask about weather or places to see.");
    println!("Examples:");
    println!("  - 'I'm going to go to Bangalore, let's plan my trip.'");
    println!("  - 'I'm going to Udupi, what are the places I can visit?'");
    println!("\nType 'exit' or 'quit' to stop.\n");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("\nYou: ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "exit" | "quit" | "q") {
            println!("\nThank you for using TourGuide. Goodbye!");
            break;
        }

        let response = composer.process_query(input).await;
        println!("\nTourGuide: {response}");
    }

    Ok(())
}
