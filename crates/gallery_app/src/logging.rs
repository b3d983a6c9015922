use std::str::FromStr;

use anyhow::anyhow;
use log::LevelFilter;

/// Parses a level name such as `"info"` or `"DEBUG"`.
pub fn parse_level(name: &str) -> anyhow::Result<LevelFilter> {
    LevelFilter::from_str(name.trim()).map_err(|_| anyhow!("unknown log level {name:?}"))
}

/// Installs the global logger: one `[LEVEL target] message` line per record
/// on stdout.  Windowing crates are capped at `warn`.
pub fn init(level: &str) -> anyhow::Result<()> {
    let level = parse_level(level)?;
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("winit", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()
        .map_err(|err| anyhow!("installing logger: {err}"))?;
    Ok(())
}
