//! Command-line definition

use clap::{Arg, ArgAction, Command};

pub const DEFAULT_URL: &str = "http://127.0.0.1:8080/";

fn id_arg() -> Arg {
    Arg::new("id").value_name("ID").help("Item id").required(true)
}

fn file_arg(help: &'static str) -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .help(help)
        .required(true)
}

pub fn command() -> Command {
    Command::new("itemsdb")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Command-line client for the items service")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("url")
                .long("url")
                .value_name("URL")
                .env("ITEMSDB_URL")
                .help("Service base URL")
                .default_value(DEFAULT_URL),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .short('H')
                .value_name("NAME:VALUE")
                .help("Extra header sent with every request")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("collection")
                .long("collection")
                .short('c')
                .value_name("NAME")
                .env("ITEMSDB_COLLECTION")
                .help("Collection for name-scoped commands"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .help("Emit logs as JSON on stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("collections").about("List every collection"))
        .subcommand(Command::new("details").about("Show collection metadata"))
        .subcommand(
            Command::new("scheme")
                .about("Set the collection scheme")
                .arg(file_arg("JSON object of field to content type, or - for stdin")),
        )
        .subcommand(Command::new("drop").about("Delete the collection"))
        .subcommand(Command::new("get").about("Fetch one item").arg(id_arg()))
        .subcommand(
            Command::new("list")
                .about("Fetch a page of items")
                .arg(Arg::new("from").long("from").value_name("N").default_value("0"))
                .arg(Arg::new("size").long("size").value_name("N").default_value("10")),
        )
        .subcommand(
            Command::new("add")
                .about("Create an item")
                .arg(id_arg())
                .arg(file_arg("JSON object with the item, or - for stdin")),
        )
        .subcommand(
            Command::new("update")
                .about("Replace an item")
                .arg(id_arg())
                .arg(file_arg("JSON object with the item, or - for stdin")),
        )
        .subcommand(Command::new("delete").about("Delete an item").arg(id_arg()))
        .subcommand(
            Command::new("search")
                .about("Full-text search")
                .arg(Arg::new("query").value_name("QUERY").required(true))
                .arg(Arg::new("locale").long("locale").value_name("LOCALE")),
        )
        .subcommand(
            Command::new("batch")
                .about("Apply a JSON array of batch entries")
                .arg(file_arg("JSON array of entries with _id and __action, or - for stdin")),
        )
}
