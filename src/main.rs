mod cli;

use log::error;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use slide_merge::app::TerminalApp;
use structopt::StructOpt;
use structopt_flags::LogLevel;

use cli::Opt;

fn main() {
    let opt = Opt::from_args();

    if let Some(shell) = opt.completions {
        Opt::clap().gen_completions_to("slide-merge", shell, &mut std::io::stdout());
        return;
    }

    if let Err(e) = TermLogger::init(
        opt.verbose.get_level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not set up logging: {}", e);
    }

    let config = match opt.to_app_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = TerminalApp::new(config).run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
