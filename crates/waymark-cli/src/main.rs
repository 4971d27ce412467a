use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use waymark_cli::{Cli, Settings, commands, errors, logging};

fn main() -> Result<()> {
    errors::init()?;
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = Settings::load(cli.config.as_deref()).wrap_err("loading settings")?;
    let mut stdout = std::io::stdout();
    commands::dispatch(cli.cmd, &settings, &mut stdout)
}
