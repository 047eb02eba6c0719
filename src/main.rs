use token_exchange::config::env::load_config;
use token_exchange::error::SwapError;
use token_exchange::feed::HttpPriceFeed;
use token_exchange::session::{Session, SessionEvent, SessionPhase};
use token_exchange::utils::{setup_logging, token_icon_url};
use clap::Parser;
use log::{error, info};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "token-exchange", about = "Token exchange rate calculator")]
struct Cli {
    /// Token to send (defaults to the first catalog entry)
    #[arg(long)]
    from: Option<String>,

    /// Token to receive (defaults to the second catalog entry)
    #[arg(long)]
    to: Option<String>,

    /// Amount of the from-token to convert
    #[arg(long)]
    amount: Option<String>,

    /// Override the price feed endpoint
    #[arg(long)]
    feed_url: Option<String>,

    /// Run the full submission flow (simulated settlement)
    #[arg(long)]
    submit: bool,
}

#[tokio::main]
async fn main() -> Result<(), SwapError> {
    dotenv::dotenv().ok();
    setup_logging().expect("Failed to initialize logging");

    let cli = Cli::parse();
    let mut app_config = load_config()?;
    if let Some(feed_url) = cli.feed_url {
        app_config.feed_url = feed_url;
    }

    let feed = HttpPriceFeed::new(
        &app_config.feed_url,
        Duration::from_secs(app_config.http_timeout_secs),
    )?;
    let mut session = Session::new(feed, Duration::from_millis(app_config.submit_delay_ms));

    if let Err(err) = session.load_prices().await {
        error!("{}", err.user_message());
        return Err(err);
    }

    let catalog_len = session.state().catalog.len();
    info!("Loaded {} tokens from {}", catalog_len, app_config.feed_url);
    if catalog_len == 0 {
        println!("The feed returned no usable prices; nothing to convert.");
        return Ok(());
    }

    if let Some(from) = cli.from {
        session.apply(SessionEvent::FromTokenSelected(from));
    }
    if let Some(to) = cli.to {
        session.apply(SessionEvent::ToTokenSelected(to));
    }
    if let Some(amount) = cli.amount {
        session.apply(SessionEvent::FromAmountInput(amount));
    }

    let state = session.state();
    println!(
        "From: {} ({})",
        state.from_token,
        token_icon_url(&app_config.icon_base_url, &state.from_token)
    );
    println!(
        "To:   {} ({})",
        state.to_token,
        token_icon_url(&app_config.icon_base_url, &state.to_token)
    );

    match session.outputs() {
        Ok(result) => {
            if let Some(rate) = result.display_rate {
                println!("Rate: {}", rate);
            }
            match result.output_amount {
                Some(output) => println!(
                    "{} {} -> {} {}",
                    state.from_amount, state.from_token, output, state.to_token
                ),
                None => println!("Enter an amount to see the converted value."),
            }
        }
        Err(err) => println!("{}", err.user_message()),
    }

    if cli.submit {
        match session.submit().await {
            Ok(()) => {
                println!("Swap successful!");
                // Keep the success banner up for the configured window,
                // then clear the amounts the way the form does.
                tokio::time::sleep(Duration::from_millis(app_config.success_clear_ms)).await;
                session.apply(SessionEvent::SuccessCleared);
                debug_assert_eq!(session.state().phase, SessionPhase::Ready);
            }
            Err(err) => println!("{}", err.user_message()),
        }
    }

    Ok(())
}
