use clap::Parser;
use mpp2json::output::ErrorStyle;
use mpp2json::reader::mpxj::{MpxjConverter, DEFAULT_MAIN_CLASS};
use mpp2json::{Options, UniversalProjectReader};
use std::path::PathBuf;
use std::process::ExitCode;

/// Print the tasks and resources of a Microsoft Project file as JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Project file to read (.mpp or Microsoft Project XML)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// MPXJ jar, or a directory of jars, used to decode binary .mpp files
    #[arg(long, value_name = "PATH")]
    mpxj_classpath: Option<PathBuf>,

    /// Java executable used to run MPXJ
    #[arg(long, value_name = "PATH", default_value = "java")]
    java: PathBuf,

    /// MPXJ converter class
    #[arg(long, value_name = "CLASS", default_value = DEFAULT_MAIN_CLASS)]
    mpxj_main_class: String,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Shape of the error document
    #[arg(long, value_enum, default_value_t = ErrorStyle::Compat)]
    error_style: ErrorStyle,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let converter = args.mpxj_classpath.map(|location| MpxjConverter {
        java: args.java,
        location,
        main_class: args.mpxj_main_class,
    });
    let reader = UniversalProjectReader::new(converter);
    let options = Options {
        pretty: args.pretty,
        error_style: args.error_style,
    };

    let outcome = mpp2json::run(args.file.as_deref(), &reader, &options);
    println!("{}", outcome.document);
    ExitCode::from(outcome.exit_code)
}
