use clap::Parser;
use package_advisor::core::render;
use package_advisor::core::ConfigProvider;
use package_advisor::utils::{logger, validation::Validate};
use package_advisor::{
    Advisor, AdvisorError, AdvisorSettings, CatalogFiles, CatalogStore, CliConfig, LocalStorage,
    OllamaClient, PromptBuilder, Session, TemplateSource,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting package-advisor");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => fail("Configuration validation failed", &e),
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    print!("{}", render::banner());

    let storage = LocalStorage::new(settings.data_dir().to_string());
    let store = CatalogStore::new(storage.clone(), CatalogFiles::from_config(&settings));
    let catalog = match store.load().await {
        Ok(catalog) => catalog,
        Err(e) => fail("Failed to load the package catalog", &e),
    };

    let template = settings
        .prompt_template()
        .map(|path| TemplateSource::File(path.to_string()))
        .unwrap_or(TemplateSource::Builtin);
    let prompt = PromptBuilder::new(storage, template);

    let advisor = if settings.model_enabled() {
        let client = match OllamaClient::new(
            settings.model_host(),
            settings.model_name(),
            settings.request_timeout(),
        ) {
            Ok(client) => client,
            Err(e) => fail("Failed to create the model client", &e),
        };
        tracing::info!("Using model {} at {}", settings.model_name(), client.endpoint());
        Advisor::new(prompt, client)
    } else {
        tracing::info!("Offline mode: keyword matching only");
        Advisor::offline(prompt)
    };

    let mut session = Session::new(catalog, advisor);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    session.run(stdin, &mut stdout, interrupt).await?;

    // The blocking stdin reader may still be parked on a read; do not wait for it.
    std::process::exit(0);
}

fn resolve_settings(cli: &CliConfig) -> package_advisor::Result<AdvisorSettings> {
    let settings = cli.resolve()?;
    settings.validate()?;
    Ok(settings)
}

fn fail(context: &str, e: &AdvisorError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
