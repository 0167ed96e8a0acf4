//! iperf3 Speed Test Monitor - CLI entry point

use clap::Parser;
use iperf_speed_monitor::{app::App, cli::Cli};
use std::process;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    let cli = Cli::parse();

    if let Err(e) = App::new(cli).run().await {
        eprintln!("{}", e.user_friendly_message());
        process::exit(e.exit_code());
    }
}
