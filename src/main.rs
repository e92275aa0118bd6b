mod app;

use anyhow::Result;
use clap::Parser;

use app::Cli;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let dinosaurs = app::load(&cli)?;

    let stdout = std::io::stdout();
    app::run(&cli.command, &dinosaurs, &mut stdout.lock())
}
