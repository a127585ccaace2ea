use anyhow::Result;
use recipe_composer::backend_client::BackendClient;
use recipe_composer::backend_config::BackendConfig;
use recipe_composer::localization::t_args_lang;
use recipe_composer::report::{describe_submit_error, load_variant_file, render_report};
use std::env;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: recipe-composer <check|submit> <variant.json> [language]";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging();

    let args: Vec<String> = env::args().collect();
    let (command, path) = match (args.get(1), args.get(2)) {
        (Some(command), Some(path)) => (command.as_str(), Path::new(path)),
        _ => {
            eprintln!("{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };
    let language = args.get(3).map(String::as_str);

    let mut composer = load_variant_file(path)?;

    match command {
        "check" => {
            println!("{}", render_report(&composer, language));
            Ok(if composer.check().is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        "submit" => {
            let config = BackendConfig::from_env()?;
            info!("Using backend at: {}", config.base_url);
            let client = BackendClient::new(config)?;

            composer.load_catalogs(&client).await;
            println!("{}", render_report(&composer, language));

            match composer.submit(&client).await {
                Ok(data) => {
                    let count = data.recipe_id.len().to_string();
                    println!(
                        "{}",
                        t_args_lang(
                            "submit-success",
                            &[("name", &data.name), ("count", &count)],
                            language
                        )
                    );
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    error!(error = %e, "Variant submission failed");
                    eprintln!("{}", describe_submit_error(&e, language));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        _ => {
            eprintln!("{USAGE}");
            Ok(ExitCode::from(2))
        }
    }
}

/// Install the tracing subscriber; `log` records are forwarded to it as well.
/// `RECIPE_COMPOSER_LOG_FORMAT=json` switches to JSON lines.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if env::var("RECIPE_COMPOSER_LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
