mod cli;
mod config;
mod http_client;
mod input;
mod middleware;
mod session;
mod stream_worker;
mod worker;

use anyhow::Result;
use clap::Parser;
use std::io::Write;

fn main() -> Result<()> {
    init_logger();
    let args = cli::Args::parse();
    let target = config::Target::from_args(&args)?;
    session::run(target)
}

fn init_logger() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .init();
}
