use std::env;

use tracing::warn;

use playtr::runtime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problem) = runtime::load_settings();

    if env::args().skip(1).any(|arg| arg == "--print-config") {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    runtime::init_logging(&settings.logging);
    if let Some(problem) = problem {
        warn!("{problem}");
    }

    runtime::run(&settings)
}
