mod cli;

use clap::Parser;
use tracing::{info, warn};

use cli::{Cli, Commands, FetchArgs};
use geofetch::config::Config;
use geofetch::hooks::HookRegistry;
use geofetch::modules::{ModuleArgs, ModuleRegistry, OptionKind};
use geofetch::observability::Metrics;
use geofetch::presets::{PresetStore, hook_pipeline};
use geofetch::worker::{self, HttpClient, HttpConfig};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch(args) => run_fetch(args).await?,
        Commands::Modules => list_modules(),
        Commands::Presets => list_presets(),
    }

    Ok(())
}

async fn run_fetch(args: FetchArgs) -> Result<(), AnyError> {
    let config = Config::load()?;
    let registry = ModuleRegistry::with_defaults();
    let metrics = Metrics::new();

    let module_args = ModuleArgs::from_pairs(args.options);
    let mut module = registry.build(&args.module, args.region, module_args)?;
    module.run()?;

    let entries = module.take_results();
    metrics.entries_planned(entries.len());

    if entries.is_empty() {
        info!(module = %args.module, "No fetchable entries planned");
        return Ok(());
    }

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let hooks = match &args.preset {
        Some(name) => match PresetStore::user().get(name) {
            Some(preset) => {
                hook_pipeline(&preset.hooks, &HookRegistry::with_defaults())
            }
            None => {
                warn!(preset = %name, "Unknown preset, fetching without hooks");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let dest_dir = args.dest.unwrap_or_else(|| config.output.dest_dir.clone());
    let client = HttpClient::new(HttpConfig::from(&config.download))?;

    let report =
        worker::run_entries(&entries, &hooks, &dest_dir, &client, &metrics).await?;

    let snapshot = metrics.snapshot();
    info!(
        planned = snapshot.entries_planned,
        completed = report.completed,
        failed = report.failed,
        hooks_applied = snapshot.hooks_applied,
        "geofetch run complete"
    );
    Ok(())
}

fn list_modules() {
    let registry = ModuleRegistry::with_defaults();
    for descriptor in registry.descriptors() {
        println!("{:<12} {}", descriptor.name, descriptor.help);
        for option in descriptor.options {
            let kind = match option.kind {
                OptionKind::Text => "text",
                OptionKind::Flag => "flag",
            };
            println!("    -O {:<14} [{kind}] {}", option.name, option.help);
        }
    }
}

fn list_presets() {
    let presets = PresetStore::user().load();
    if presets.is_empty() {
        println!("No presets defined");
        return;
    }
    for (name, preset) in presets {
        let hooks: Vec<&str> = preset.hooks.iter().map(|h| h.name.as_str()).collect();
        println!("{:<16} {} [{}]", name, preset.help, hooks.join(", "));
    }
}
