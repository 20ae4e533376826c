mod align;
mod map;
mod render;

use anyhow::Result;
use clap::{Command, arg};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "protrack";
    pub const VERBOSE_FLAG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Lay out protein sequence annotations as aligned tracks and map residues between structure and sequence numbering.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose "Log debug output").global(true))
        .subcommand(render::cli::create_render_cli())
        .subcommand(map::cli::create_map_cli())
        .subcommand(align::cli::create_align_cli())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();
    init_logging(matches.get_flag(consts::VERBOSE_FLAG));

    match matches.subcommand() {
        //
        // RENDER
        //
        Some((render::cli::RENDER_CMD, matches)) => {
            render::handlers::run_render(matches)?;
        }

        //
        // MAP
        //
        Some((map::cli::MAP_CMD, matches)) => {
            map::handlers::run_map(matches)?;
        }

        //
        // ALIGN
        //
        Some((align::cli::ALIGN_CMD, matches)) => {
            align::handlers::run_align(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    fn test_parser_is_valid() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_verbose_is_global() {
        let matches = build_parser()
            .try_get_matches_from(["protrack", "align", "--input", "rows.json", "-v"])
            .unwrap();
        assert!(matches.get_flag(consts::VERBOSE_FLAG));
    }
}
