use clap::Parser;
use std::path::PathBuf;

use repodex::cli::{Cli, Commands, OrderArg, SourceArg};
use repodex::domain::models::SourceMode;
use repodex::RepositoryOrder;

#[test]
fn test_no_subcommand_defaults_to_sync() {
    let cli = Cli::try_parse_from(["repodex"]).unwrap();
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
    assert!(!cli.json);
}

#[test]
fn test_parse_sync_with_source_and_config() {
    let cli =
        Cli::try_parse_from(["repodex", "sync", "--source", "csv", "--config", "seed.yaml"]).unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("seed.yaml")));
    match cli.command {
        Some(Commands::Sync(args)) => {
            assert_eq!(args.source, Some(SourceArg::Csv));
            assert!(!args.upsert);
            assert_eq!(SourceMode::from(SourceArg::Csv), SourceMode::Csv);
        }
        other => panic!("Expected sync, got {other:?}"),
    }
}

#[test]
fn test_parse_sync_upsert() {
    let cli = Cli::try_parse_from(["repodex", "sync", "--source", "csv", "--upsert"]).unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Sync(args)) if args.upsert && args.source == Some(SourceArg::Csv)
    ));
}

#[test]
fn test_parse_list_order() {
    let cli = Cli::try_parse_from(["repodex", "--json", "list", "--order", "stars"]).unwrap();

    assert!(cli.json);
    match cli.command {
        Some(Commands::List(args)) => {
            assert_eq!(args.order, OrderArg::Stars);
            assert_eq!(RepositoryOrder::from(args.order), RepositoryOrder::StarsDesc);
        }
        other => panic!("Expected list, got {other:?}"),
    }

    let cli = Cli::try_parse_from(["repodex", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::List(args)) if args.order == OrderArg::Insertion
    ));
}

#[test]
fn test_parse_serve_overrides() {
    let cli = Cli::try_parse_from(["repodex", "serve", "--host", "0.0.0.0", "-p", "9000"]).unwrap();

    match cli.command {
        Some(Commands::Serve(args)) => {
            assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
            assert_eq!(args.port, Some(9000));
        }
        other => panic!("Expected serve, got {other:?}"),
    }
}

#[test]
fn test_rejects_unknown_values() {
    assert!(Cli::try_parse_from(["repodex", "sync", "--source", "ftp"]).is_err());
    assert!(Cli::try_parse_from(["repodex", "list", "--order", "forks"]).is_err());
    assert!(Cli::try_parse_from(["repodex", "serve", "--port", "http"]).is_err());
}
