// SPDX-License-Identifier: MPL-2.0
use everlasting_moments::app::{self, Flags};
use everlasting_moments::config::{self, Config};
use std::path::PathBuf;

const HELP: &str = "\
Everlasting Moments

USAGE:
  everlasting_moments [OPTIONS]

OPTIONS:
  --lang <LOCALE>         Interface language (e.g. en-US, fr)
  --config <FILE>         Album configuration file (album.toml)
  --write-config <FILE>   Write the built-in album configuration and exit
  -h, --help              Print this help
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let write_config: Option<PathBuf> = args.opt_value_from_str("--write-config").unwrap_or(None);
    if let Some(path) = write_config {
        if let Err(error) = config::save_to_path(&Config::default(), &path) {
            eprintln!("Failed to write {}: {error}", path.display());
            std::process::exit(1);
        }
        return Ok(());
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap_or(None),
        config_path: args.opt_value_from_str("--config").unwrap_or(None),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("Ignoring unexpected arguments: {remaining:?}");
    }

    app::run(flags)
}
