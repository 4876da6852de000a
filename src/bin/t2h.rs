//! texhtml CLI - LaTeX to HTML live-preview renderer

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use texhtml::{
    constants::COMPILATION_ERROR_MESSAGE,
    diagnostics::{check_latex_with_marker, format_diagnostics},
    export::{export_tex, print_page, rich_text, write_print_page},
    latex2html::extract_preamble,
    latex_to_html,
    templates::{find_template, TEMPLATES},
    LatexRenderer, RenderError, RenderOptions, RenderWarning, SessionConfig,
};
#[cfg(feature = "cli")]
use tracing::{debug, info};
#[cfg(feature = "cli")]
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "t2h")]
#[command(version)]
#[command(about = "texhtml - LaTeX to HTML live-preview renderer", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Wrap the HTML in a standalone print page
    #[arg(long)]
    page: bool,

    /// Page title for --page (defaults to the document's \title)
    #[arg(long)]
    title: Option<String>,

    /// Strict mode: exit with error if any render warnings occur
    #[arg(long)]
    strict: bool,

    /// Keep unknown environment delimiters instead of dropping them
    #[arg(long)]
    keep_unknown_environments: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Session configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Render a document to HTML (default action)
    Render {
        /// Input file path
        input: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,

        /// Wrap the HTML in a standalone print page
        #[arg(long)]
        page: bool,

        /// Page title for --page
        #[arg(long)]
        title: Option<String>,

        /// Exit with error if any render warnings occur
        #[arg(long)]
        strict: bool,
    },

    /// Check LaTeX for constructs the preview will not render
    Check {
        /// Input file to check
        input: Option<String>,
    },

    /// Print a built-in starter document
    Template {
        /// Template name (see `t2h templates`)
        name: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List built-in templates
    Templates,

    /// Write a `.tex` copy of the source
    Export {
        /// Input file path
        input: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// File name without extension
        #[arg(short, long, default_value = "document")]
        stem: String,
    },

    /// Show version and feature info
    Info,
}

/// Options shared by the default action and `render`
#[cfg(feature = "cli")]
struct RenderArgs {
    input: Option<String>,
    output: Option<String>,
    page: bool,
    title: Option<String>,
    strict: bool,
    quiet: bool,
    color: bool,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match cli.config {
        Some(ref path) => SessionConfig::load(path).map_err(to_io)?,
        None => SessionConfig::default(),
    };
    if cli.keep_unknown_environments {
        config.render.strip_unknown_environments = false;
    }
    debug!(?config, "configuration loaded");

    let color = !cli.no_color;

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd, &config, color, cli.quiet);
    }

    run_render(
        RenderArgs {
            input: cli.input_file,
            output: cli.output,
            page: cli.page,
            title: cli.title,
            strict: cli.strict,
            quiet: cli.quiet,
            color,
        },
        &config.render,
    )
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

#[cfg(feature = "cli")]
fn handle_subcommand(
    cmd: Commands,
    config: &SessionConfig,
    color: bool,
    quiet: bool,
) -> io::Result<()> {
    match cmd {
        Commands::Render {
            input,
            output,
            page,
            title,
            strict,
        } => run_render(
            RenderArgs {
                input,
                output,
                page,
                title,
                strict,
                quiet,
                color,
            },
            &config.render,
        )?,

        Commands::Check { input } => {
            let content = read_input(input.as_deref())?;
            let result = check_latex_with_marker(&content, &config.render.error_marker);
            println!("{}", format_diagnostics(&result, color));

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Template { name, output } => {
            let template = find_template(&name)
                .ok_or_else(|| to_io(RenderError::UnknownTemplate { name: name.clone() }))?;
            info!(template = template.name, "template loaded");
            write_output(output.as_deref(), template.source)?;
        }

        Commands::Templates => {
            for template in TEMPLATES {
                println!("{:<10} {}", template.name, template.description);
            }
        }

        Commands::Export { input, dir, stem } => {
            let content = read_input(input.as_deref())?;
            let path = export_tex(&content, &dir, &stem).map_err(to_io)?;
            eprintln!("✓ Source written to: {}", path.display());
        }

        Commands::Info => {
            println!("texhtml - LaTeX to HTML live-preview renderer");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ Brace-balanced macro expansion with nested rendering");
            println!("  ✓ Title block from \\title, \\author, \\date and \\maketitle");
            println!("  ✓ Resume commands (\\resumeSubheading, \\resumeItem, ...)");
            println!("  ✓ itemize, enumerate and center environments");
            println!("  ✓ Print page export for print-to-PDF");
            println!("  ✓ LaTeX diagnostics and checking");
            println!();
            println!("Templates:");
            for template in TEMPLATES {
                println!("  - {}", template.name);
            }
            println!();
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn run_render(args: RenderArgs, options: &RenderOptions) -> io::Result<()> {
    let input = read_input(args.input.as_deref())?;

    if options.triggers_error(&input) {
        eprintln!("Error: {}", COMPILATION_ERROR_MESSAGE);
        std::process::exit(1);
    }

    let mut renderer = LatexRenderer::with_options(options.clone());
    let output = renderer.render_with_diagnostics(&input);

    // Print warnings to stderr (unless quiet mode)
    if !args.quiet && output.has_warnings() {
        print_warnings_to_stderr(&output.warnings, args.color);
    }

    // Check strict mode
    if args.strict && output.has_warnings() {
        eprintln!(
            "Error: {} render warning(s) in strict mode",
            output.warnings.len()
        );
        std::process::exit(1);
    }

    if args.page {
        let title = args
            .title
            .unwrap_or_else(|| document_title(&renderer, &input));
        match args.output.as_deref() {
            Some(path) => write_print_page(&output.html, &title, Path::new(path)).map_err(to_io)?,
            None => println!("{}", print_page(&output.html, &title)),
        }
    } else {
        write_output(args.output.as_deref(), &output.html)?;
    }
    if let Some(path) = args.output {
        if output.warnings.is_empty() {
            eprintln!("✓ Output written to: {}", path);
        } else {
            eprintln!(
                "⚠ Output written to: {} ({} warning(s))",
                path,
                output.warnings.len()
            );
        }
    }

    Ok(())
}

/// Plain-text `\title` of the document, for the print page
#[cfg(feature = "cli")]
fn document_title(renderer: &LatexRenderer, input: &str) -> String {
    let preamble = extract_preamble(input, renderer.today());
    rich_text(&latex_to_html(&preamble.title)).plain
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn write_output(path: Option<&str>, content: &str) -> io::Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", content)
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

#[cfg(feature = "cli")]
fn to_io(err: RenderError) -> io::Error {
    io::Error::other(err)
}

/// Print render warnings to stderr with optional color coding
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[RenderWarning], use_color: bool) {
    let (yellow, reset) = if use_color {
        ("\x1b[33m", "\x1b[0m")
    } else {
        ("", "")
    };

    eprintln!();
    eprintln!("{}Render Warnings ({}):{}", yellow, warnings.len(), reset);
    eprintln!();

    for warning in warnings {
        eprintln!("  {}[warning]{} {}", yellow, reset, warning);
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texhtml --features cli");
    eprintln!("  t2h [OPTIONS] [INPUT_FILE]");
}
