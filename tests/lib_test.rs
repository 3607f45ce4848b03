//! Library integration tests.

use tkctl::TkctlError;

#[test]
fn error_types_are_public() {
    let err = TkctlError::UnknownCheckSuite {
        name: "storage".into(),
    };
    assert!(err.to_string().contains("storage"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> tkctl::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use tkctl::cli::{Cli, Commands, OutputFormat};

    let cli = Cli::parse_from(["tkctl", "check", "--output", "json"]);

    if let Commands::Check(args) = cli.command {
        assert_eq!(args.output, OutputFormat::Json);
    } else {
        panic!("Expected Check command");
    }
}

#[test]
fn version_gate_is_public() {
    assert!(tkctl::version::is_applicable("1.0.0", "1.0.0").unwrap());
}
