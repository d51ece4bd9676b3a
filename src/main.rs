use std::ffi::OsString;

use clap::Parser;

use pio_wrapper::config::WrapperConfig;
use pio_wrapper::report::Report;
use pio_wrapper::runner;

#[derive(Parser)]
#[command(
    name = "pio-wrapper",
    about = "Run PlatformIO and print only the lines that explain a failure",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Arguments passed to PlatformIO unchanged, whatever their encoding
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    args: Vec<OsString>,
}

impl Cli {
    /// Parse the process arguments with a leading `--` injected, so clap treats
    /// every user argument (including `-h` and a literal `--`) as a value.
    fn parse_passthrough() -> Self {
        let mut argv = std::env::args_os();
        let bin = argv.next().unwrap_or_else(|| OsString::from("pio-wrapper"));
        Self::parse_from(
            std::iter::once(bin)
                .chain(std::iter::once(OsString::from("--")))
                .chain(argv),
        )
    }
}

fn cmd_run(args: &[OsString], config: &WrapperConfig) -> i32 {
    if config.verbose {
        eprintln!(
            "[pio-wrapper] running {} with {} arg(s): {args:?}",
            config.program,
            args.len()
        );
    }

    let result = match runner::execute(&config.program, args) {
        Ok(r) => r,
        Err(e) if runner::is_not_found(&e) => {
            eprintln!(
                "\u{2717} Error: '{}' command not found. Ensure PlatformIO is installed and in PATH.",
                config.program
            );
            return 1;
        }
        Err(e) => {
            eprintln!("\u{2717} Error running pio wrapper: {e:#}");
            return 1;
        }
    };

    let report = Report::from_result(&result, config.tail_lines);
    if config.verbose {
        eprintln!(
            "[pio-wrapper] exit code {}, {} byte(s) captured, {} report",
            result.exit_code,
            result.combined.len(),
            report.kind()
        );
    }
    println!("{report}");

    result.exit_code
}

fn main() {
    let cli = Cli::parse_passthrough();
    let config = WrapperConfig::load();
    let exit_code = cmd_run(&cli.args, &config);
    std::process::exit(exit_code);
}
