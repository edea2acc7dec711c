use clap::Parser;
use get_env::cli::Args;
use std::env;
use std::io;
use std::process::ExitCode;

/// Sent as the first argument by the cf host when the plugin is uninstalled.
const UNINSTALL_MESSAGE: &str = "CLI-MESSAGE-UNINSTALL";

fn main() -> ExitCode {
    if env::args().nth(1).as_deref() == Some(UNINSTALL_MESSAGE) {
        return ExitCode::SUCCESS;
    }

    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let config = args.config();
    log::debug!("Using configuration: {:?}", config);
    let source = config.source.build();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match get_env::run(
        &config,
        &args.app_name,
        &args.json_path,
        source.as_ref(),
        &mut out,
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
