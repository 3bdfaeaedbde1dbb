use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_no_subcommand() {
    let cli = parse(&["khdl"]);
    assert!(cli.command.is_none());
    assert!(!cli.verbose);
}

#[test]
fn cli_parse_download_urls() {
    let cli = parse(&[
        "khdl",
        "download",
        "https://downloads.khinsider.com/game-soundtracks/album/a",
        "https://downloads.khinsider.com/game-soundtracks/album/b",
    ]);
    match cli.command {
        Some(CliCommand::Download(args)) => {
            assert_eq!(args.urls.len(), 2);
            assert!(args.urls[1].ends_with("/b"));
            assert!(args.input.is_none());
            assert!(args.output.is_none());
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_alias_and_paths() {
    let cli = parse(&["khdl", "-v", "dl", "--input", "albums.txt", "-o", "/tmp/ost"]);
    assert!(cli.verbose);
    match cli.command {
        Some(CliCommand::Download(args)) => {
            assert!(args.urls.is_empty());
            assert_eq!(args.input.as_deref(), Some(std::path::Path::new("albums.txt")));
            assert_eq!(args.output.as_deref(), Some(std::path::Path::new("/tmp/ost")));
        }
        _ => panic!("expected Download via alias"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["khdl", "config"]).command {
        Some(CliCommand::Config) => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["khdl", "status"]).is_err());
}
