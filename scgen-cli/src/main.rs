use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use colored::Colorize;
use generate::{Generate, Render};
use log::{error, Level, LevelFilter};

mod generate;
mod manifest;

/// Generates SproutCore records from model manifests
#[derive(Parser)]
#[clap(name = "scgen", version)]
struct Opts {
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Parser)]
enum SubCommand {
    Generate(Generate),
    Render(Render),
}

#[tokio::main]
async fn main() {
    let opts: Opts = Opts::parse();

    let mut cmd: Box<dyn Runnable> = match opts.subcmd {
        SubCommand::Generate(generate) => Box::new(generate),
        SubCommand::Render(render) => Box::new(render),
    };

    let log_level = if cmd.is_verbose() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            let prefix = match record.level() {
                Level::Error => "error".red(),
                Level::Warn => "warn".yellow(),
                Level::Info => "info".blue(),
                Level::Debug => "debug".purple(),
                Level::Trace => "trace".cyan(),
            }
            .bold();
            writeln!(buf, "{} {}", prefix, record.args())
        })
        .init();

    if let Err(err) = cmd.run().await {
        error!("{}", err);
        if cmd.is_verbose() {
            let err_chain = err.chain().skip(1);
            if err_chain.clone().next().is_some() {
                eprintln!("{}", "\nCaused by:".italic().truecolor(190, 190, 190));
            }
            err_chain
                .for_each(|cause| eprintln!(" - {}", cause.to_string().truecolor(190, 190, 190)));
        }
        std::process::exit(1);
    }
}

#[async_trait]
pub trait Runnable {
    async fn run(&mut self) -> Result<()>;

    fn is_verbose(&self) -> bool {
        false
    }
}
