use std::process::ExitCode;

use chrono_tz::Tz;
use clap::Parser;
use clockface::cli::Cli;
use clockface::config::FontConfig;
use clockface::logging::{init_logging, LoggingConfig};
use clockface::{Clock, ClockConfig, ClockError, ColorScheme};

/// The zone configured on this machine, e.g. from /etc/localtime.
fn system_timezone() -> Option<Tz> {
    let name = match iana_time_zone::get_timezone() {
        Ok(name) => name,
        Err(err) => {
            log::warn!("could not determine the system timezone: {err}");
            return None;
        }
    };
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(err) => {
            log::warn!("system timezone {name:?} is not known ({err})");
            None
        }
    }
}

fn parse_timezone(name: Option<&str>) -> Tz {
    let Some(name) = name else {
        return match system_timezone() {
            Some(tz) => {
                log::info!("using system timezone {}", tz.name());
                tz
            }
            None => {
                log::warn!("no timezone available, using UTC");
                chrono_tz::UTC
            }
        };
    };
    // TZ may carry the POSIX ':' prefix
    match name.trim_start_matches(':').parse::<Tz>() {
        Ok(tz) => tz,
        Err(err) => {
            log::warn!("unknown timezone {name:?} ({err}), using UTC");
            chrono_tz::UTC
        }
    }
}

fn run(cli: Cli) -> Result<(), ClockError> {
    let style = cli.style();
    let font_data = FontConfig::default().load(cli.font.as_deref())?;

    let config = ClockConfig::builder()
        .window_width(cli.width)
        .window_height(cli.height)
        .max_framerate(cli.max_framerate)
        .style(style)
        .colors(ColorScheme::for_theme(cli.theme.into()))
        .timezone(parse_timezone(cli.timezone.as_deref()))
        .maybe_font_data(font_data)
        .maybe_asset_dir(cli.assets)
        .build();

    Clock::new(config)?.show()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(if cli.debug {
        LoggingConfig::debug()
    } else {
        LoggingConfig::default()
    });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(&err)
        }
    }
}
