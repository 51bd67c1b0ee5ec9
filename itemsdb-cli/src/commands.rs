//! Command execution

use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use itemsdb_client::{
    BatchEntry, Collection, HttpTransport, Item, ItemsClient, Pagination, Scheme, Transport,
};
use serde_json::Value;
use std::io::Read;
use tracing::info;

/// Split a `NAME:VALUE` header argument
pub fn parse_header(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => bail!("invalid header '{}', expected NAME:VALUE", raw),
    }
}

/// Read JSON from a file, or from stdin when `path` is `-`
pub fn read_json(path: &str) -> Result<Value> {
    let text = if path == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        text
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?
    };
    serde_json::from_str(&text).with_context(|| format!("parsing JSON from {}", path))
}

fn read_item(path: &str) -> Result<Item> {
    match read_json(path)? {
        Value::Object(item) => Ok(item),
        _ => bail!("{} must contain a JSON object", path),
    }
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing <{}>", name))
}

/// Build the HTTP transport from the global options
pub fn transport(matches: &ArgMatches) -> Result<HttpTransport> {
    let url = arg(matches, "url")?;
    let mut transport =
        HttpTransport::new(url).with_context(|| format!("configuring transport for {}", url))?;
    for raw in matches.get_many::<String>("header").into_iter().flatten() {
        let (name, value) = parse_header(raw)?;
        transport = transport.with_header(name, value)?;
    }
    Ok(transport)
}

/// Run the selected subcommand. Returns the JSON to print, if any.
pub fn run<T: Transport>(matches: &ArgMatches, transport: T) -> Result<Option<Value>> {
    let client = ItemsClient::new(transport);
    let Some((command, sub)) = matches.subcommand() else {
        bail!("no command given");
    };

    if command == "collections" {
        return Ok(Some(serde_json::to_value(client.list_collections()?)?));
    }

    let name = matches
        .get_one::<String>("collection")
        .cloned()
        .unwrap_or_default();
    let collection = client.bind(name)?;
    run_scoped(&collection, command, sub)
}

fn run_scoped<T: Transport>(
    collection: &Collection<T>,
    command: &str,
    sub: &ArgMatches,
) -> Result<Option<Value>> {
    let output = match command {
        "details" => Some(collection.details()?),
        "scheme" => {
            let scheme = Scheme::from_value(&read_json(arg(sub, "file")?)?)?;
            collection.apply_scheme(&scheme)?;
            Some(serde_json::to_value(&scheme)?)
        }
        "drop" => {
            collection.delete()?;
            None
        }
        "get" => Some(collection.get_item(arg(sub, "id")?)?),
        "list" => {
            let page = Pagination::parse(arg(sub, "from")?, arg(sub, "size")?)?;
            Some(collection.get_page(page)?)
        }
        "add" => {
            let item = read_item(arg(sub, "file")?)?;
            collection.add_item(arg(sub, "id")?, item)?;
            None
        }
        "update" => {
            let item = read_item(arg(sub, "file")?)?;
            collection.update_item(arg(sub, "id")?, item)?;
            None
        }
        "delete" => {
            collection.delete_item(arg(sub, "id")?)?;
            None
        }
        "search" => {
            let locale = sub.get_one::<String>("locale").map(String::as_str);
            Some(collection.search_items(arg(sub, "query")?, locale)?)
        }
        "batch" => {
            let entries: Vec<BatchEntry> = serde_json::from_value(read_json(arg(sub, "file")?)?)
                .context("batch file must be a JSON array of objects")?;
            let summary = collection.batch_items(entries)?;
            info!(
                "Batch applied {} of {} entries",
                summary.applied.len(),
                summary.total()
            );
            Some(serde_json::to_value(&summary)?)
        }
        other => bail!("unknown command '{}'", other),
    };
    Ok(output)
}
