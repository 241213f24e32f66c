use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use tracing_subscriber::EnvFilter;

use formkit::io::{DocumentFormat, OutputOptions, OutputTarget, parse_form_str};
use formkit::{FormConfig, FormState, FormUI, UiOptions};

const LOG_ENV: &str = "FORMKIT_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "formkit",
    version,
    about = "Fill in a form definition (text, phone, date, file, address, select, currency) in the terminal"
)]
struct Cli {
    /// Form definition: file path, inline payload, or "-" for stdin
    #[arg(short = 'F', long = "form", value_name = "SPEC")]
    form: String,

    /// Title shown at the top of the form (overrides the definition's title)
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Output destinations ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Format for stdout and for files without a known extension
    #[arg(long = "format", value_name = "FORMAT")]
    format: Option<DocumentFormat>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Do not capture the mouse (popups then only close from the keyboard)
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Check the form definition and print a field summary instead of running the UI
    #[arg(long = "check")]
    check: bool,

    /// Write diagnostics to this file (the terminal belongs to the form)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log filter used with --log-file when FORMKIT_LOG is unset
    #[arg(long = "log-level", value_name = "FILTER", default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut diagnostics = DiagnosticCollector::default();
    let form = match load_form(&cli.form) {
        Ok(form) => Some(form),
        Err(err) => {
            diagnostics.push_input("form", format!("{err:#}"));
            None
        }
    };
    let output = build_output_options(&cli, &mut diagnostics);
    diagnostics.into_result()?;
    let Some(mut form) = form else {
        return Err(eyre!("no form definition loaded"));
    };
    if let Some(title) = &cli.title {
        form.title = Some(title.clone());
    }

    if cli.check {
        print!("{}", summarize(form)?);
        return Ok(());
    }

    let options = UiOptions::default().with_mouse(!cli.no_mouse);
    let mut ui = FormUI::new(form).with_options(options);
    if let Some(output) = output {
        ui = ui.with_output(output);
    }
    ui.run().map_err(|err| Report::msg(format!("{err:#}")))?;
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .wrap_err("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    tracing::info!(form = %cli.form, "formkit starting");
    Ok(())
}

fn load_form(spec: &str) -> Result<FormConfig> {
    if spec == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        return parse_any(&buffer, DocumentFormat::default(), "stdin");
    }

    let path = Path::new(spec);
    match fs::read_to_string(path) {
        Ok(contents) => {
            let format = DocumentFormat::from_path(path).unwrap_or_default();
            parse_any(&contents, format, &path.display().to_string())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            parse_any(spec, DocumentFormat::default(), "inline form")
        }
        Err(err) => Err(Report::new(err))
            .wrap_err_with(|| format!("failed to read form definition {}", path.display())),
    }
}

/// Try the preferred format first, then every other compiled-in format.
fn parse_any(contents: &str, preferred: DocumentFormat, label: &str) -> Result<FormConfig> {
    let primary = match parse_form_str(contents, preferred) {
        Ok(form) => return Ok(form),
        Err(err) => err,
    };
    for candidate in DocumentFormat::available() {
        if *candidate == preferred {
            continue;
        }
        if let Ok(form) = parse_form_str(contents, *candidate) {
            return Ok(form);
        }
    }
    Err(eyre!(
        "failed to parse {label}: tried {} (first error: {primary:#})",
        format_list()
    ))
}

fn summarize(form: FormConfig) -> Result<String> {
    let state = FormState::from_config(form).wrap_err("invalid form definition")?;
    let mut body = String::new();
    let _ = writeln!(
        body,
        "{}: {} field(s)",
        state.title.as_deref().unwrap_or("form"),
        state.len()
    );
    for field in state.fields() {
        let mut flags = Vec::new();
        if field.config().required {
            flags.push("required");
        }
        if field.is_disabled() {
            flags.push("disabled");
        }
        let _ = writeln!(
            body,
            "  {} ({}) {}{}",
            field.name(),
            field.variant(),
            field.rules().len() + formkit::validation::builtin_rules(field.variant()).len(),
            if flags.is_empty() {
                " rule(s)".to_string()
            } else {
                format!(" rule(s), {}", flags.join(", "))
            }
        );
    }
    Ok(body)
}

fn format_list() -> String {
    DocumentFormat::available()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

fn build_output_options(cli: &Cli, diagnostics: &mut DiagnosticCollector) -> Option<OutputOptions> {
    let mut targets = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        let target = OutputTarget::parse(raw);
        if let OutputTarget::File(path) = &target
            && path.exists()
            && !cli.force
        {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
        targets.push(target);
    }
    if targets.is_empty() {
        targets.push(OutputTarget::Stdout);
    }

    Some(
        OutputOptions::new(cli.format.unwrap_or_default())
            .with_pretty(!cli.no_pretty)
            .with_targets(targets),
    )
}
