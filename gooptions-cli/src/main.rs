mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use gooptions_codegen::{Generator, Model, resolve_destination, write_output};
use gooptions_schema::open_descriptor_file;

/// A failed run: the error chain and the exit status it maps to.
#[derive(Debug)]
struct Failure {
    code: u8,
    error: anyhow::Error,
}

const EXIT_ARGS: u8 = 1;
const EXIT_ENVIRONMENT: u8 = 2;
const EXIT_DESCRIPTOR: u8 = 3;
const EXIT_MODEL: u8 = 4;
const EXIT_GENERATION: u8 = 5;
const EXIT_WRITE: u8 = 6;

trait ExitStatus<T> {
    fn or_exit(self, code: u8) -> Result<T, Failure>;
}

impl<T> ExitStatus<T> for anyhow::Result<T> {
    fn or_exit(self, code: u8) -> Result<T, Failure> {
        self.map_err(|error| Failure { code, error })
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(EXIT_ARGS);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("error: {:#}", failure.error);
            ExitCode::from(failure.code)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let cwd = std::env::current_dir()
        .context("failed to get current directory")
        .or_exit(EXIT_ENVIRONMENT)?;
    let source_dir = cwd.join(&cli.source);

    // Not `gooptions_codegen::generate_to_file`: generation and writing fail
    // with different exit codes, and `--stdout` skips the write.
    let source = generate(cli)?;

    if cli.stdout {
        print!("{source}");
        return Ok(());
    }

    let path = resolve_destination(&cli.type_name, &source_dir, cli.output.as_deref());
    write_output(&path, &source)
        .map_err(anyhow::Error::from)
        .or_exit(EXIT_WRITE)?;
    Ok(())
}

/// Loads the record and renders the options file without touching disk.
fn generate(cli: &Cli) -> Result<String, Failure> {
    let provider = open_descriptor_file(&cli.descriptor)
        .with_context(|| descriptor_context(&cli.descriptor))
        .or_exit(EXIT_DESCRIPTOR)?;

    let (package, record) = gooptions_schema::load_record(provider.as_ref(), &cli.type_name)
        .with_context(|| format!("failed to build model for type '{}'", cli.type_name))
        .or_exit(EXIT_MODEL)?;
    tracing::debug!("generating options for {}.{}", package, record.name);

    let model = Model::new(cli.generator_options(), package, record);
    Generator::new(&model)
        .generate()
        .with_context(|| format!("failed to generate options for type '{}'", cli.type_name))
        .or_exit(EXIT_GENERATION)
}

fn descriptor_context(path: &Path) -> String {
    format!("failed to load descriptor '{}'", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"{
  "package": { "path": "example.com/app/users" },
  "records": [
    {
      "name": "User",
      "fields": [
        { "name": "email", "type": { "kind": "basic", "name": "string" } },
        { "name": "Values", "type": { "kind": "typeParam", "name": "T" } }
      ]
    },
    {
      "name": "Account",
      "fields": [
        { "name": "Name", "type": { "kind": "basic", "name": "string" } }
      ]
    }
  ]
}"#;

    fn cli_for(dir: &Path, type_name: &str, extra: &[&str]) -> Cli {
        let descriptor = dir.join("users.json");
        std::fs::write(&descriptor, DESCRIPTOR).expect("write descriptor");

        let descriptor = descriptor.to_string_lossy().into_owned();
        let source = dir.to_string_lossy().into_owned();
        let mut args = vec![
            "gooptions",
            "--descriptor",
            descriptor.as_str(),
            "--type",
            type_name,
            "--source",
            source.as_str(),
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).expect("parse")
    }

    #[test]
    fn test_run_writes_default_destination() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = cli_for(dir.path(), "Account", &[]);

        run(&cli).expect("run");

        let written =
            std::fs::read_to_string(dir.path().join("account_options.go")).expect("read");
        assert!(written.starts_with("// DO NOT EDIT."));
        assert!(written.contains("func WithName(name string) Option {"));
    }

    #[test]
    fn test_stdout_skips_write() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = cli_for(dir.path(), "Account", &["--stdout"]);

        run(&cli).expect("run");
        assert!(!dir.path().join("account_options.go").exists());
    }

    #[test]
    fn test_missing_descriptor_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cli = cli_for(dir.path(), "Account", &[]);
        cli.descriptor = dir.path().join("missing.json");

        let failure = run(&cli).unwrap_err();
        assert_eq!(failure.code, EXIT_DESCRIPTOR);
    }

    #[test]
    fn test_unknown_type_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = cli_for(dir.path(), "Missing", &[]);

        let failure = run(&cli).unwrap_err();
        assert_eq!(failure.code, EXIT_MODEL);
        assert!(format!("{:#}", failure.error).contains("Missing"));
    }

    #[test]
    fn test_unsupported_shape_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cli = cli_for(dir.path(), "User", &[]);

        let failure = run(&cli).unwrap_err();
        assert_eq!(failure.code, EXIT_MODEL);
        assert!(!dir.path().join("user_options.go").exists());
    }

    #[test]
    fn test_unwritable_destination_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("blocker"), "x").expect("write");
        let cli = cli_for(dir.path(), "Account", &["--output", "blocker/account_options.go"]);

        let failure = run(&cli).unwrap_err();
        assert_eq!(failure.code, EXIT_WRITE);
    }
}
