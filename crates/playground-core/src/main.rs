use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use playground_core::console::{
    ConsoleNavigator, ConsoleNotifier, DashboardBehavior, MemoryClipboard, OfflineDashboard,
    OfflineRenderer, TracingEventSink,
};
use playground_core::logging::{self, LogFormat};
use playground_core::session::{load_script, run_session};
use playground_core::{
    is_code_gen_supported, ChartContainer, Collaborators, Framework, PlaygroundConfig,
};

fn cli() -> Command {
    Command::new("playground")
        .version(playground_core::VERSION)
        .about("Playground view-state controller")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Emit logs as JSON lines"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(value_parser!(PathBuf))
                .global(true)
                .help("TOML configuration file"),
        )
        .subcommand(
            Command::new("catalog")
                .about("List frameworks and chart libraries")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Print the effective configuration")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON instead of TOML"),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Replay a scripted session against offline collaborators")
                .arg(
                    Arg::new("script")
                        .long("script")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON list of session steps"),
                )
                .arg(
                    Arg::new("dashboard")
                        .long("dashboard")
                        .default_value("supported")
                        .value_parser(["supported", "static", "broken"])
                        .help("How the offline dashboard answers the capability check"),
                )
                .arg(
                    Arg::new("no-clipboard")
                        .long("no-clipboard")
                        .action(ArgAction::SetTrue)
                        .help("Simulate a platform without clipboard access"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<PlaygroundConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => PlaygroundConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(PlaygroundConfig::default()),
    }
}

fn print_catalog(config: &PlaygroundConfig, json: bool) -> anyhow::Result<()> {
    if json {
        let frameworks: Vec<_> = Framework::ALL
            .iter()
            .map(|f| {
                serde_json::json!({
                    "id": f.id(),
                    "title": f.title(),
                    "docsLink": f.docs_link(),
                    "codeGeneration": is_code_gen_supported(*f),
                })
            })
            .collect();
        let catalog = serde_json::json!({
            "frameworks": frameworks,
            "chartLibraries": config.chart_libraries,
        });
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("Frameworks:");
    for framework in Framework::ALL {
        match framework.docs_link() {
            None => println!("  {:<8} {}", framework.id(), framework.title()),
            Some(link) => println!(
                "  {:<8} {} (no code generation, see {link})",
                framework.id(),
                framework.title()
            ),
        }
    }
    println!();
    println!("Chart libraries:");
    for library in config.chart_libraries.iter() {
        let marker = if library.id == config.default_chart_library { "*" } else { " " };
        println!(" {marker}{:<10} {}", library.id, library.title);
    }
    Ok(())
}

async fn simulate(config: &PlaygroundConfig, args: &ArgMatches) -> anyhow::Result<bool> {
    let script = args
        .get_one::<PathBuf>("script")
        .context("--script is required")?;
    let behavior: DashboardBehavior = args
        .get_one::<String>("dashboard")
        .map_or(Ok(DashboardBehavior::default()), |s| s.parse())
        .map_err(anyhow::Error::msg)?;

    let steps = load_script(script)?;
    println!("Replaying {} step(s) from {}", steps.len(), script.display());
    println!("Dashboard: {behavior:?}");
    println!();

    let mut collaborators = Collaborators::new(
        Arc::new(OfflineDashboard::new(behavior)),
        Arc::new(OfflineRenderer),
        Arc::new(ConsoleNotifier),
        Arc::new(ConsoleNavigator),
    )
    .with_events(Arc::new(TracingEventSink));
    if !args.get_flag("no-clipboard") {
        collaborators = collaborators.with_clipboard(Arc::new(MemoryClipboard::default()));
    }

    let mut container = ChartContainer::new(config, collaborators)?;
    let transcript = run_session(&mut container, &steps).await;

    println!();
    println!("{}", transcript.generate_text());
    Ok(!transcript.has_errors())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    logging::init(matches.get_count("verbose"), format);

    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("catalog", args)) => print_catalog(&config, args.get_flag("json"))?,
        Some(("config", args)) => {
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        Some(("simulate", args)) => {
            let passed = simulate(&config, args).await?;
            std::process::exit(if passed { 0 } else { 1 });
        }
        _ => {
            cli().print_help()?;
        }
    }
    Ok(())
}
