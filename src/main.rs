use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use smart_meal::cli::{Cli, Command};
use smart_meal::collaborators::{
    pump_sensor, FallbackClassifier, FixedClassifier, FoodClassifier, PredictionFileClassifier,
    SimulatedScale,
};
use smart_meal::config::FusionConfig;
use smart_meal::error::{MealError, Result};
use smart_meal::fusion::{parse_weight, suggest};
use smart_meal::interface::{
    display_food_list, display_meal, display_summary, prompt_food, prompt_weight, prompt_yes_no,
};
use smart_meal::journal::{
    export_csv, load_snapshot, save_snapshot, JsonTableLoader, MealJournal, SharedTable,
    TableLoader,
};

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let command = cli.command.unwrap_or_default();

    // A table that fails to load is fatal.
    let table = JsonTableLoader::new(&cli.table).load()?;
    let journal_path = Path::new(&cli.journal);
    let journal = open_journal(journal_path, Arc::new(SharedTable::new(table)), config)?;

    match command {
        Command::Foods => {
            display_food_list(journal.table().food_ids());
            Ok(())
        }
        Command::Weigh {
            grams,
            simulate,
            base,
            jitter,
            seed,
        } => cmd_weigh(&journal, journal_path, grams, simulate, base, jitter, seed),
        Command::Log {
            food,
            image,
            allow_mock,
            weight,
        } => cmd_log(&journal, journal_path, food, image.as_deref(), allow_mock, weight),
        Command::Daily { limit } => {
            let summary = match limit {
                Some(n) => journal.summary(n),
                None => journal.daily_summary(),
            };
            display_summary(&summary);
            Ok(())
        }
        Command::Export { path } => {
            let entries = journal.entries();
            export_csv(&entries, &path)?;
            println!("Exported {} meals to {}", entries.len(), path.display());
            Ok(())
        }
        Command::Session => cmd_session(&journal, journal_path),
    }
}

/// Config file values, overridden by command-line flags.
fn load_config(cli: &Cli) -> Result<FusionConfig> {
    let mut config = match cli.config.as_deref() {
        Some(p) => FusionConfig::load(p)?,
        None => FusionConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.classifier_mode = mode;
    }
    if cli.threshold.is_some() {
        config.confidence_threshold = cli.threshold;
    }
    config.validate()?;
    Ok(config)
}

fn open_journal(path: &Path, table: Arc<SharedTable>, config: FusionConfig) -> Result<MealJournal> {
    match load_snapshot(path)? {
        Some(snapshot) => MealJournal::restore(table, config, snapshot),
        None => Ok(MealJournal::new(table, config)),
    }
}

/// Record a scale reading, typed or simulated.
fn cmd_weigh(
    journal: &MealJournal,
    journal_path: &Path,
    grams: Option<String>,
    simulate: bool,
    base: f64,
    jitter: f64,
    seed: u64,
) -> Result<()> {
    let recorded = if simulate {
        let mut scale = SimulatedScale::new(base, jitter, seed)?;
        pump_sensor(&mut scale, journal)?
    } else {
        let raw = grams.ok_or_else(|| {
            MealError::invalid_weight("sensor_weight", "missing (pass grams or --simulate)")
        })?;
        let grams = parse_weight("sensor_weight", &raw)?;
        journal.record_sensor_weight(grams)?;
        Some(grams)
    };

    match recorded {
        Some(g) => println!("Scale reading recorded: {:.1} g", g),
        None => println!("Scale returned no reading."),
    }

    save_snapshot(journal_path, &journal.snapshot())
}

/// Record one meal from a name or an image.
fn cmd_log(
    journal: &MealJournal,
    journal_path: &Path,
    food: Option<String>,
    image: Option<&Path>,
    allow_mock: bool,
    weight: Option<String>,
) -> Result<()> {
    let manual_weight = weight
        .map(|raw| parse_weight("weight", &raw))
        .transpose()?;

    let result = match (food, image) {
        (Some(label), _) => journal.record_meal(&label, manual_weight),
        (None, Some(image)) => {
            let mut backends: Vec<Box<dyn FoodClassifier + Send + Sync>> =
                vec![Box::new(PredictionFileClassifier)];
            if allow_mock {
                backends.push(Box::new(FixedClassifier::default()));
            }
            let predictions = FallbackClassifier::new(backends).classify(image)?;
            journal.record_classified_meal(&predictions, manual_weight)
        }
        (None, None) => {
            return Err(MealError::InvalidInput(
                "pass a food name or --image".to_string(),
            ));
        }
    };

    match result {
        Ok(outcome) => {
            display_meal(&outcome);
            save_snapshot(journal_path, &journal.snapshot())
        }
        Err(MealError::FoodNotRecognized { label }) => {
            let suggestions = suggest(&label, &journal.table(), 5);
            if !suggestions.is_empty() {
                eprintln!("Did you mean: {}", suggestions.join(", "));
            }
            Err(MealError::FoodNotRecognized { label })
        }
        Err(e) => Err(e),
    }
}

/// Interactive loop: pick foods and weights until the user is done.
fn cmd_session(journal: &MealJournal, journal_path: &Path) -> Result<()> {
    let table = journal.table();
    println!("Loaded {} foods", table.len());

    let mut recorded = 0;
    while let Some(food_id) = prompt_food(&table)? {
        let manual_weight = prompt_weight(journal.last_sensor_weight())?;

        match journal.record_meal(&food_id, manual_weight) {
            Ok(outcome) => {
                display_meal(&outcome);
                recorded += 1;
            }
            Err(e) if e.is_user_correctable() => println!("{}", e),
            Err(e) => return Err(e),
        }
    }

    display_summary(&journal.daily_summary());

    if recorded > 0 && prompt_yes_no("Save journal?", true)? {
        save_snapshot(journal_path, &journal.snapshot())?;
        println!("Journal saved.");
    }

    Ok(())
}
