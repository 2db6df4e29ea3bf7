// SPDX-License-Identifier: MPL-2.0
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use options_status::config;
use options_status::diagnostics::{DiagnosticsCollector, WarningEvent, WarningType};
use options_status::domain::status::DisplayDuration;
use options_status::i18n::locale::Locales;
use options_status::status::{surface_handle, DisplaySurface, StatusManager};

const HELP: &str = "\
options-status

USAGE:
  options-status [OPTIONS] MESSAGE...

OPTIONS:
  --config-dir DIR    Read settings.toml from DIR
  --lang TAG          Override the display language
  --severity NAME     success, error, warning or info (default: info)
  --duration-ms N     Display duration per message, 0 keeps it visible
  --no-queue          Drop messages that arrive while one is visible
  --report PATH       Write a diagnostics report to PATH
  -h, --help          Print this help
";

struct Flags {
    config_dir: Option<PathBuf>,
    lang: Option<String>,
    severity: String,
    duration_ms: Option<u64>,
    no_queue: bool,
    report: Option<PathBuf>,
    messages: Vec<String>,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    Ok(Flags {
        config_dir: args.opt_value_from_str("--config-dir")?,
        lang: args.opt_value_from_str("--lang")?,
        severity: args
            .opt_value_from_str("--severity")?
            .unwrap_or_else(|| "info".to_string()),
        duration_ms: args.opt_value_from_str("--duration-ms")?,
        no_queue: args.contains("--no-queue"),
        report: args.opt_value_from_str("--report")?,
        messages: args
            .finish()
            .into_iter()
            .filter_map(|arg| arg.into_string().ok())
            .collect(),
    })
}

/// Prints every rendered message to stderr.
struct TerminalSurface {
    text: String,
    tags: BTreeSet<String>,
}

impl DisplaySurface for TerminalSurface {
    fn is_attached(&self) -> bool {
        true
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    fn set_tags(&mut self, tags: &[&str]) {
        self.tags = tags.iter().map(|tag| (*tag).to_string()).collect();
        let tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
        if self.text.is_empty() {
            eprintln!("[{}]", tags.join(" "));
        } else {
            eprintln!("[{}] {}", tags.join(" "), self.text);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    let mut collector = DiagnosticsCollector::default();
    let diagnostics = collector.handle();

    let (mut settings, warning) = config::load_with_override(flags.config_dir.clone());
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
        diagnostics.log_warning(WarningEvent::new(WarningType::ConfigFallback, warning));
    }
    if flags.no_queue {
        settings.status.enable_queue = false;
    }

    let locales = Locales::new(flags.lang.clone(), &settings);
    println!("theme: {}", settings.general.theme_mode.as_str());
    println!(
        "dark: {}",
        if settings.general.theme_mode.is_dark() { "yes" } else { "no" }
    );
    println!("locale: {}", locales.current_locale());

    let surface = surface_handle(TerminalSurface {
        text: String::new(),
        tags: BTreeSet::new(),
    });
    let manager = StatusManager::new(&settings.status, Some(surface), Some(diagnostics));
    let duration = flags.duration_ms.map(DisplayDuration::from_millis);

    for message in &flags.messages {
        match manager.show_status_named(message, &flags.severity, duration) {
            Ok(true) => {}
            Ok(false) => eprintln!("not shown: {message}"),
            Err(err) => eprintln!("error: {err}"),
        }
    }

    // A drain spawned by an enqueue may still be pacing.
    loop {
        let summary = manager.process_queue().await;
        if summary.halted {
            eprintln!("queue drain stopped early");
            break;
        }
        if !manager.is_processing() && manager.queue_len() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    let statistics = manager.get_statistics();
    let validation = manager.validate_state();
    match serde_json::to_string_pretty(&(statistics, validation)) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("error: {err}"),
    }

    let mut code = ExitCode::SUCCESS;
    if let Some(path) = flags.report {
        collector.process_pending();
        match collector.export_to_file(&path, Some(&manager)) {
            Ok(path) => println!("report: {}", path.display()),
            Err(err) => {
                eprintln!("error: {err}");
                code = ExitCode::FAILURE;
            }
        }
    }

    manager.destroy(false);
    code
}
