//! loqr CLI — driving adapter for the location routing engine.
//!
//! Subcommands:
//! - `resolve <registry> <query> [--rent]` — resolve a query, print the decision
//! - `explain <registry> <query> [--rent]` — decision plus the resolution trace
//! - `check <registry>` — strict-validate a registry file
//! - `info <registry>` — registry summary (counts per kind)

use std::process;

use loqr::prelude::*;

fn main() {
    // Data-quality warnings from the engine (ambiguous aliases, excluded
    // entities) surface on stderr; RUST_LOG tunes the level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "resolve" => cmd_resolve(&args[2..], false),
        "explain" => cmd_resolve(&args[2..], true),
        "check" => cmd_check(&args[2..]),
        "info" => cmd_info(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_resolve(args: &[String], with_trace: bool) -> Result<(), String> {
    let (paths, listing) = parse_listing_flag(args)?;
    let [registry_path, query] = paths.as_slice() else {
        return Err("expected: <registry-file> <query> [--rent]".into());
    };

    let snapshot = load_registry(registry_path)?;
    let (decision, trace) = resolve_with_trace(query, &snapshot, listing);

    let out = serde_json::json!({
        "mode": decision.mode,
        "target": decision.target.render(),
        "matched": decision.matched,
    });
    println!("{}", serde_json::to_string_pretty(&out).map_err(|e| e.to_string())?);

    if with_trace {
        eprintln!("{trace}");
    }

    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    let [registry_path] = args else {
        return Err("check requires a registry file path".into());
    };

    let entities = load_entities(registry_path)?;
    let count = entities.len();
    RegistrySnapshot::build_strict(entities).map_err(|e| format!("registry invalid: {e}"))?;

    println!("Registry valid ({count} entities)");
    Ok(())
}

fn cmd_info(args: &[String]) -> Result<(), String> {
    let [registry_path] = args else {
        return Err("info requires a registry file path".into());
    };

    let snapshot = load_registry(registry_path)?;
    let aliases: usize = snapshot.iter().map(|e| e.aliases.len()).sum();

    println!("Provinces: {}", snapshot.provinces().count());
    println!(
        "Cities:    {}",
        snapshot.iter().filter(|e| e.kind == LocationKind::City).count()
    );
    println!(
        "Suburbs:   {}",
        snapshot.iter().filter(|e| e.kind == LocationKind::Suburb).count()
    );
    println!("Aliases:   {aliases}");
    println!("Retained:  {}", snapshot.len());

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_registry(path: &str) -> Result<RegistrySnapshot, String> {
    Ok(RegistrySnapshot::build(load_entities(path)?))
}

fn load_entities(path: &str) -> Result<Vec<LocationEntity>, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| format!("JSON parse error: {e}"))
    } else {
        // Default to YAML (handles .yaml and .yml)
        serde_yaml::from_str(&content).map_err(|e| format!("YAML parse error: {e}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

/// Split positional args from the `--rent` toggle.
fn parse_listing_flag(args: &[String]) -> Result<(Vec<String>, ListingType), String> {
    let mut positional = Vec::new();
    let mut listing = ListingType::Sale;

    for arg in args {
        match arg.as_str() {
            "--rent" => listing = ListingType::Rent,
            other if other.starts_with("--") => {
                return Err(format!("unexpected flag \"{other}\""));
            }
            _ => positional.push(arg.clone()),
        }
    }

    Ok((positional, listing))
}

fn print_usage() {
    eprintln!(
        "Usage: loqr <command> [options]

Commands:
  resolve <registry> <query> [--rent]   Resolve a location query to a route decision
  explain <registry> <query> [--rent]   Resolve and print the tier-by-tier trace
  check <registry>                      Strict-validate a registry file
  info <registry>                       Print registry summary
  help                                  Show this help

The registry file is a JSON or YAML array of location entities."
    );
}
