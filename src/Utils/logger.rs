use log::SetLoggerError;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Terminal logger for the demo binary. Library code only talks to the `log` facade,
/// so embedding applications are free to install their own logger instead.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Debug)
        .build();
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}
