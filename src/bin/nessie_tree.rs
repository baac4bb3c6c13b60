//! nessie-tree — 查询 Nessie 树 API 的命令行工具
//!
//! Usage:
//!   nessie-tree entries [--endpoint <url>] [--ref <name>] [--max <n>] [--v2]
//!   nessie-tree refs [--endpoint <url>] [--v2]
//!   nessie-tree config [--endpoint <url>] [--v2]

use anyhow::{bail, Context};
use nessie_tree_client::{get_api_v2, get_tree_api, GetEntriesRequest};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "entries" => cmd_entries(&args[2..]).await,
        "refs" => cmd_refs(&args[2..]).await,
        "config" => cmd_config(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("nessie-tree {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"nessie-tree — Nessie 树 API 命令行工具

USAGE:
    nessie-tree <COMMAND> [OPTIONS]

COMMANDS:
    entries     List entries on a reference
    refs        List branches and tags
    config      Show server configuration
    version     Show version information
    help        Show this help message

OPTIONS:
    --endpoint <url>    API endpoint (default: $NESSIE_API_ROOT/v1 or /v2)
    --ref <name>        Reference for `entries` (default: main)
    --max <n>           Maximum records for `entries`
    --v2                Use the v2 API

ENVIRONMENT:
    NESSIE_API_ROOT             API root (default http://localhost:19120/api)
    NESSIE_AUTH_TOKEN           Bearer token
    NESSIE_HTTP_TIMEOUT_SECS    Request timeout in seconds
    RUST_LOG                    Log filter"#
    );
}

struct Options {
    endpoint: Option<String>,
    reference: String,
    max_records: Option<u32>,
    v2: bool,
}

fn parse_options(args: &[String]) -> anyhow::Result<Options> {
    let mut opts = Options {
        endpoint: None,
        reference: "main".to_string(),
        max_records: None,
        v2: false,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--endpoint" => {
                opts.endpoint = Some(iter.next().context("--endpoint needs a value")?.clone());
            }
            "--ref" => {
                opts.reference = iter.next().context("--ref needs a value")?.clone();
            }
            "--max" => {
                let raw = iter.next().context("--max needs a value")?;
                let max = raw
                    .parse::<u32>()
                    .with_context(|| format!("invalid --max '{raw}'"))?;
                opts.max_records = Some(max);
            }
            "--v2" => opts.v2 = true,
            other => bail!("unknown option: {other}"),
        }
    }
    Ok(opts)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_entries(args: &[String]) -> anyhow::Result<()> {
    let opts = parse_options(args)?;
    let mut request = GetEntriesRequest::new(opts.reference);
    if let Some(max) = opts.max_records {
        request = request.with_max_records(max);
    }
    let response = if opts.v2 {
        get_api_v2(opts.endpoint.as_deref())?.get_entries(&request).await?
    } else {
        get_tree_api(opts.endpoint.as_deref())?.get_entries(&request).await?
    };
    print_json(&response)
}

async fn cmd_refs(args: &[String]) -> anyhow::Result<()> {
    let opts = parse_options(args)?;
    let response = if opts.v2 {
        get_api_v2(opts.endpoint.as_deref())?.get_all_references().await?
    } else {
        get_tree_api(opts.endpoint.as_deref())?.get_all_references().await?
    };
    print_json(&response)
}

async fn cmd_config(args: &[String]) -> anyhow::Result<()> {
    let opts = parse_options(args)?;
    let response = if opts.v2 {
        get_api_v2(opts.endpoint.as_deref())?.get_config().await?
    } else {
        get_tree_api(opts.endpoint.as_deref())?.get_config().await?
    };
    print_json(&response)
}
