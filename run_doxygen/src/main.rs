use clap::Parser;
use doxygen_env::DocsConfig;
use doxygen_env_run::{DocsConfigOverrides, DoxygenInvocation, Error, resolve_project_number};
use std::process::ExitCode;
use tracing::{error, info};

mod cli;
mod logging;

use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "documentation build failed");
            let code = e
                .tool_exit_code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|&code| code != 0)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn resolve(args: &Args) -> Result<DocsConfig, Error> {
    let project_number = match args.project_number {
        Some(ref version) => version.clone(),
        None => resolve_project_number(&args.repo_dir),
    };

    let mut config = DocsConfig::dripline_cpp(project_number);
    if let Some(ref path) = args.config {
        DocsConfigOverrides::load(path)?.apply(&mut config);
    }

    Ok(config)
}

fn run(args: &Args) -> Result<(), Error> {
    let config = resolve(args)?;

    let invocation = DoxygenInvocation::new()
        .program(&args.doxygen)
        .doxyfile(&args.doxyfile)
        .working_dir(&args.repo_dir);

    if args.dry_run {
        info!(
            program = %invocation.get_program().to_string_lossy(),
            doxyfile = %invocation.get_doxyfile().display(),
            "dry run, not starting the documentation tool"
        );
        let json = serde_json::to_string_pretty(&config).map_err(std::io::Error::from)?;
        println!("{}", json);
        return Ok(());
    }

    invocation.run(&config)
}
