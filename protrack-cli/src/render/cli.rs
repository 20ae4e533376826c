use clap::{Arg, ArgAction, Command, arg};

pub const RENDER_CMD: &str = "render";

pub fn create_render_cli() -> Command {
    Command::new(RENDER_CMD)
        .about("Load every configured source for an accession and write the aligned categories as JSON.")
        .arg_required_else_help(true)
        .arg(Arg::new("accession").required(true).help("UniProt accession, e.g. P05067"))
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("Path to a protrack TOML config file"),
        )
        .arg(
            Arg::new("custom-variants")
                .long("custom-variants")
                .required(false)
                .help("JSON file of variants tagged with a customSource"),
        )
        .arg(
            arg!(--filter <FILTER>)
                .required(false)
                .action(ArgAction::Append)
                .help("Variant filter to apply; repeat to combine"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output JSON path (default: stdout)"),
        )
}
