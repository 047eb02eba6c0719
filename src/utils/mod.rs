use log::info;

pub fn setup_logging() -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .level_for("reqwest", log::LevelFilter::Warn)
        .level_for("hyper", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;
    info!("Logging initialized.");
    Ok(())
}

/// Resolves a token icon by naming convention against a static asset
/// path. A broken image is the renderer's problem and never blocks
/// conversion.
pub fn token_icon_url(base_url: &str, symbol: &str) -> String {
    format!("{}/{}.svg", base_url.trim_end_matches('/'), symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::DEFAULT_ICON_BASE_URL;

    #[test]
    fn test_icon_url_convention() {
        assert_eq!(
            token_icon_url(DEFAULT_ICON_BASE_URL, "BTC"),
            "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/BTC.svg"
        );
        // Trailing slash on the base does not double up.
        assert_eq!(token_icon_url("https://assets.example/t/", "ETH"), "https://assets.example/t/ETH.svg");
    }
}
