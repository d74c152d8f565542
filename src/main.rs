use clap::Parser;
use reboot_analysis::config::{ApiArgs, Cli, Command, SubmitArgs};
use reboot_analysis::core::engine::save_outcome;
use reboot_analysis::core::pipeline::build_plan;
use reboot_analysis::core::{ConfigProvider, MotionApi, MovementSource};
use reboot_analysis::domain::model::{AnalysisPlan, TypeEntry};
use reboot_analysis::utils::logger;
use reboot_analysis::{
    AnalysisConfig, AnalysisEngine, AnalysisPipeline, CsvMovementSource, LocalStorage,
    RebootClient, Result,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting reboot-analysis CLI");

    let result = match cli.command {
        Command::Submit(args) => submit(args).await,
        Command::MovementTypes(args) => list_types(args, TypeKind::Movement).await,
        Command::MocapTypes(args) => list_types(args, TypeKind::Mocap).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn submit(args: SubmitArgs) -> Result<()> {
    let config = args.resolve()?;
    tracing::debug!("Resolved config: {:?}", config);

    config.validate_plan()?;
    if !args.dry_run {
        config.validate_api()?;
    }
    tracing::info!("✅ Configuration loaded and validated successfully");

    let source = CsvMovementSource::new(
        config.csv_path().unwrap_or_default(),
        config.input.play_id_column.clone(),
        config.input.pitch_type_column.clone(),
    );

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no requests will be sent");
        let rows = source.read_movements()?;
        tracing::info!("Read {} movements", rows.len());
        let plan = build_plan(&config, &rows)?;
        print_plan(&plan)?;
        return Ok(());
    }

    let client = RebootClient::from_config(&config.api)?;
    let output_path = config.output_path().map(str::to_string);
    let engine = AnalysisEngine::new(AnalysisPipeline::new(source, client, config));
    let outcome = engine.run().await?;

    println!("{}", serde_json::to_string_pretty(&outcome.requested_analysis)?);

    if let Some(path) = output_path {
        let storage = LocalStorage::new(path.clone());
        let file = save_outcome(&storage, &outcome).await?;
        tracing::info!("📁 Outcome saved to: {}/{}", path, file);
    }

    Ok(())
}

fn print_plan(plan: &AnalysisPlan) -> Result<()> {
    println!("📋 Requested analysis: {}", plan.name);
    println!("POST /player_group_segments (primary)");
    println!("{}", serde_json::to_string_pretty(&plan.primary)?);
    println!("POST /player_group_segments (comparison)");
    println!("{}", serde_json::to_string_pretty(&plan.comparison)?);
    println!("POST /requested_analyses with the two returned analysis_segment_id values");
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum TypeKind {
    Movement,
    Mocap,
}

async fn list_types(args: ApiArgs, kind: TypeKind) -> Result<()> {
    let config: AnalysisConfig = args.resolve()?;
    config.validate_api()?;

    let client = RebootClient::from_config(&config.api)?;
    let entries = match kind {
        TypeKind::Movement => client.list_movement_types().await?,
        TypeKind::Mocap => client.list_mocap_types().await?,
    };
    tracing::info!("Fetched {} {:?} types", entries.len(), kind);
    print_types(&entries);
    Ok(())
}

fn print_types(entries: &[TypeEntry]) {
    for entry in entries {
        match entry.id {
            Some(id) => println!("{:>6}  {}", id, entry.label()),
            None => println!("{:>6}  {}", "-", entry.label()),
        }
    }
}
