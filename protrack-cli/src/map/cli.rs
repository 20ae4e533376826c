use clap::{Command, arg, value_parser};

pub const MAP_CMD: &str = "map";

pub const FROM_STRUCTURE: &str = "structure";
pub const FROM_SEQUENCE: &str = "sequence";

pub fn create_map_cli() -> Command {
    Command::new(MAP_CMD)
        .about("Translate a residue range through a chain's structure to sequence mapping.")
        .arg_required_else_help(true)
        .arg(
            arg!(--mappings <MAPPINGS>)
                .required(true)
                .help("JSON file with the chain's fragment mappings"),
        )
        .arg(
            arg!(--start <START>)
                .required(true)
                .value_parser(value_parser!(u32))
                .help("First residue of the range"),
        )
        .arg(
            arg!(--end <END>)
                .required(true)
                .value_parser(value_parser!(u32))
                .help("Last residue of the range"),
        )
        .arg(
            arg!(--from <FROM>)
                .required(false)
                .value_parser([FROM_STRUCTURE, FROM_SEQUENCE])
                .default_value(FROM_STRUCTURE)
                .help("Numbering the range is given in"),
        )
}
