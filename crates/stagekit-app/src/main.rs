//! Main application entry point.

use stagekit_app::{AppConfig, Shell, read_script};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting StageKit");

    let config = AppConfig::from_env();
    let path = std::env::args().nth(1).map(PathBuf::from);
    let source = match read_script(path.as_deref()) {
        Ok(source) => source,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut shell = Shell::new(config.editor);
    let failed = shell.run_script(&source);

    match shell.finish() {
        Ok(scene) => {
            if config.print_scene {
                println!("{}", scene);
            }
        }
        Err(err) => {
            log::error!("Failed to serialize scene: {}", err);
            return ExitCode::FAILURE;
        }
    }

    if failed > 0 {
        log::warn!("{} script lines failed", failed);
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
