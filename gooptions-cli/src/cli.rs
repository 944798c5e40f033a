use std::path::PathBuf;

use clap::Parser;
use gooptions_codegen::{FieldVisibility, GeneratorOptions};

#[derive(Parser, Debug)]
#[command(name = "gooptions", bin_name = "gooptions", version)]
#[command(about = "Generate functional options for a Go struct type")]
#[command(after_help = r#"EXAMPLES:
  gooptions --descriptor users.json --type User
  gooptions --descriptor users.xml --type User --source ./internal/users
  gooptions --descriptor users.json --type User --stdout --exported-only"#)]
pub struct Cli {
    /// Record descriptor file (.xml, otherwise JSON)
    #[arg(long, short = 'd', value_name = "FILE")]
    pub descriptor: PathBuf,

    /// Name of the struct type to generate options for
    #[arg(long = "type", short = 't', value_name = "NAME")]
    pub type_name: String,

    /// Directory of the package the type is declared in
    #[arg(long, short = 's', value_name = "DIR", default_value = ".")]
    pub source: PathBuf,

    /// Output file, relative to the source directory [default: <type>_options.go]
    #[arg(long, short = 'o', value_name = "PATH", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the generated file instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Name of the generated option function type
    #[arg(long, value_name = "NAME", default_value = "Option")]
    pub option_name: String,

    /// Prefix of every generated option function
    #[arg(long, value_name = "PREFIX", default_value = "With")]
    pub prefix: String,

    /// Only generate options for exported fields
    #[arg(long)]
    pub exported_only: bool,
}

impl Cli {
    pub fn generator_options(&self) -> GeneratorOptions {
        let visibility = if self.exported_only {
            FieldVisibility::ExportedOnly
        } else {
            FieldVisibility::All
        };

        GeneratorOptions::default()
            .option_name(self.option_name.clone())
            .option_prefix(self.prefix.clone())
            .visibility(visibility)
    }
}
