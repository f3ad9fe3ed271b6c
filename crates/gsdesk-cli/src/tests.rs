use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["gsdesk"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_catalog_list_defaults() {
    let cli = Cli::try_parse_from(["gsdesk", "catalog", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            command: CatalogCommands::List {
                query: None,
                category: None,
                sort: None,
                desc: false,
                page: 1,
                page_size: None,
            }
        })
    ));
}

#[test]
fn parses_catalog_list_with_filters() {
    let cli = Cli::try_parse_from([
        "gsdesk",
        "catalog",
        "list",
        "--query",
        "작업대",
        "--category",
        "WRK",
        "--sort",
        "online",
        "--desc",
        "--page",
        "3",
        "--page-size",
        "25",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            command: CatalogCommands::List {
                query: Some(ref q),
                category: Some(ref c),
                sort: Some(gsdesk_core::SortKey::Online),
                desc: true,
                page: 3,
                page_size: Some(25),
            }
        }) if q == "작업대" && c == "WRK"
    ));
}

#[test]
fn rejects_unknown_sort_key() {
    assert!(Cli::try_parse_from(["gsdesk", "catalog", "list", "--sort", "price"]).is_err());
}

#[test]
fn rejects_zero_page_size() {
    assert!(Cli::try_parse_from(["gsdesk", "catalog", "list", "--page-size", "0"]).is_err());
}

#[test]
fn parses_catalog_categories() {
    let cli = Cli::try_parse_from(["gsdesk", "catalog", "categories"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            command: CatalogCommands::Categories
        })
    ));
}

#[test]
fn parses_upload_price_with_out_dir() {
    let cli = Cli::try_parse_from([
        "gsdesk",
        "upload",
        "price",
        "playauto.xlsx",
        "--out-dir",
        "exports",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Upload {
            command: UploadCommands::Price {
                ref file,
                out_dir: Some(ref dir),
                dry_run: false,
            }
        }) if file == &PathBuf::from("playauto.xlsx") && dir == &PathBuf::from("exports")
    ));
}

#[test]
fn parses_upload_option_dry_run() {
    let cli = Cli::try_parse_from(["gsdesk", "upload", "option", "options.csv", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Upload {
            command: UploadCommands::Option {
                out_dir: None,
                dry_run: true,
                ..
            }
        })
    ));
}

#[test]
fn upload_requires_file() {
    assert!(Cli::try_parse_from(["gsdesk", "upload", "price"]).is_err());
}

#[test]
fn parses_upload_validate_mode() {
    let cli = Cli::try_parse_from(["gsdesk", "upload", "validate", "f.csv", "--mode", "Option"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Upload {
            command: UploadCommands::Validate {
                mode: gsdesk_core::UploadMode::Option,
                ..
            }
        })
    ));
}

#[test]
fn upload_validate_requires_mode() {
    assert!(Cli::try_parse_from(["gsdesk", "upload", "validate", "f.csv"]).is_err());
}

#[test]
fn parses_estimate_items() {
    let cli = Cli::try_parse_from([
        "gsdesk",
        "estimate",
        "--item",
        "WRK-1200:2",
        "--item",
        "SNK-01",
        "--discount",
        "5",
    ])
    .unwrap();
    let Some(Commands::Estimate {
        items,
        discount,
        out_dir,
    }) = cli.command
    else {
        panic!("expected estimate command");
    };
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].code, "WRK-1200");
    assert_eq!(items[0].qty, 2);
    assert_eq!(items[1].qty, 1);
    assert!((discount - 5.0).abs() < f64::EPSILON);
    assert!(out_dir.is_none());
}

#[test]
fn estimate_requires_an_item() {
    assert!(Cli::try_parse_from(["gsdesk", "estimate"]).is_err());
}
