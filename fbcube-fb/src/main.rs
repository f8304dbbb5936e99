/// FBCube - rotating wireframe cube on the Linux framebuffer
///
/// Runs until interrupted, or for `--frames N` frames. Exit status 1, 2 or 3
/// means the device could not be opened, described or mapped.
use std::process::ExitCode;

use clap::Parser;
use fbcube_core::CancelToken;
use fbcube_fb::Cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let cancel = CancelToken::new();
    if let Err(e) = fbcube_fb::cancel_on_signal(&cancel) {
        log::warn!("Could not install the interrupt handler: {}", e);
    }

    match fbcube_fb::run(&cli, &cancel) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
