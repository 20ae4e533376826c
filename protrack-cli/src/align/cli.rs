use clap::{Command, arg};

pub const ALIGN_CMD: &str = "align";

pub fn create_align_cli() -> Command {
    Command::new(ALIGN_CMD)
        .about("Pack fragments into non-overlapping rows.")
        .arg_required_else_help(true)
        .arg(
            arg!(--input <INPUT>)
                .required(true)
                .help("JSON file with a list of {id, start, end} fragments"),
        )
}
