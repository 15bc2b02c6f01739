use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use setlog_core::*;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "setlog")]
#[command(about = "Weight training set tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed an empty store with the default catalog
    Seed,

    /// List workout categories (default)
    Categories,

    /// List the exercises in one category
    Exercises {
        /// Category ID, as shown by `categories`
        #[arg(long)]
        category: String,
    },

    /// Show a session's sets, heaviest first
    Sets {
        /// Exercise ID, as shown by `exercises`
        #[arg(long)]
        exercise: String,

        /// Session date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record a new set
    Add {
        #[arg(long)]
        exercise: String,

        /// Session date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long)]
        weight: f64,

        #[arg(long)]
        reps: f64,
    },

    /// Rewrite one set's measurements
    Update {
        #[arg(long)]
        exercise: String,

        /// Session date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Row index, as shown by `sets`
        #[arg(long)]
        index: usize,

        #[arg(long)]
        weight: f64,

        #[arg(long)]
        reps: f64,
    },

    /// Delete one set
    Delete {
        #[arg(long)]
        exercise: String,

        /// Session date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Row index, as shown by `sets`
        #[arg(long)]
        index: usize,
    },

    /// Show every recorded set for an exercise, newest date first
    History {
        #[arg(long)]
        exercise: String,
    },

    /// Export an exercise's history to CSV
    Export {
        #[arg(long)]
        exercise: String,

        /// Output path, defaults to <exercise>.csv
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show the swipeable date strip around today
    Dates {
        /// Days either side of today to show
        #[arg(long, default_value_t = 3)]
        around: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    setlog_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let store = Arc::new(JsonlStore::open(data_dir.join("store"))?);

    let today = chrono::Local::now().date_naive();

    match cli.command {
        Some(Commands::Seed) => cmd_seed(&store),
        Some(Commands::Categories) => cmd_categories(store, today).await,
        Some(Commands::Exercises { category }) => cmd_exercises(store, today, &category).await,
        Some(Commands::Sets { exercise, date }) => {
            cmd_sets(store, exercise, date.unwrap_or(today), &config).await
        }
        Some(Commands::Add {
            exercise,
            date,
            weight,
            reps,
        }) => cmd_add(store, exercise, date.unwrap_or(today), weight, reps, &config).await,
        Some(Commands::Update {
            exercise,
            date,
            index,
            weight,
            reps,
        }) => {
            cmd_update(
                store,
                exercise,
                date.unwrap_or(today),
                index,
                weight,
                reps,
                &config,
            )
            .await
        }
        Some(Commands::Delete {
            exercise,
            date,
            index,
        }) => cmd_delete(store, exercise, date.unwrap_or(today), index, &config).await,
        Some(Commands::History { exercise }) => cmd_history(store, &exercise, &config).await,
        Some(Commands::Export { exercise, out }) => cmd_export(store, &exercise, out).await,
        Some(Commands::Dates { around }) => cmd_dates(today, around),
        None => {
            // Default to the drill-down root
            cmd_categories(store, today).await
        }
    }
}

fn cmd_seed(store: &JsonlStore) -> Result<()> {
    let catalog = build_default_catalog();
    let errors = catalog.validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    if !store.is_empty()? {
        eprintln!("Store already contains data - not seeding.");
        return Err(Error::InvalidState("store is not empty".into()));
    }

    for category in &catalog.categories {
        store.insert_category(category)?;
    }
    for exercise in &catalog.exercises {
        store.insert_exercise(exercise)?;
    }

    println!(
        "✓ Seeded {} categories and {} exercises",
        catalog.categories.len(),
        catalog.exercises.len()
    );
    Ok(())
}

async fn cmd_categories(store: Arc<JsonlStore>, today: NaiveDate) -> Result<()> {
    let mut navigator = DrillDownNavigator::new(store, today);
    navigator.load_categories().await?;

    display_header("CATEGORIES");
    if navigator.categories().is_empty() {
        println!("  (empty store - run `setlog seed` first)");
    }
    for category in navigator.categories() {
        println!("  {:<12} {}", category.id, category.name);
    }
    println!();
    Ok(())
}

async fn cmd_exercises(store: Arc<JsonlStore>, today: NaiveDate, category: &str) -> Result<()> {
    let mut navigator = DrillDownNavigator::new(store, today);
    navigator.load_categories().await?;
    navigator.choose_category_and_load(category).await?;

    display_header(&format!("EXERCISES: {}", category));
    for exercise in navigator.exercises() {
        println!("  {:<20} {}", exercise.id, exercise.name);
    }
    println!();
    Ok(())
}

async fn cmd_sets(
    store: Arc<JsonlStore>,
    exercise: String,
    date: NaiveDate,
    config: &Config,
) -> Result<()> {
    let scope = SessionScope {
        exercise_id: exercise,
        date,
    };
    let controller = SelectionController::open(store, scope).await?;

    display_session(&controller.editor_snapshot(), controller.scope(), config);
    Ok(())
}

async fn cmd_add(
    store: Arc<JsonlStore>,
    exercise: String,
    date: NaiveDate,
    weight: f64,
    reps: f64,
    config: &Config,
) -> Result<()> {
    let scope = SessionScope {
        exercise_id: exercise,
        date,
    };
    let mut controller = SelectionController::open(store, scope).await?;

    let set = controller.add_set(weight, reps).await?;
    println!(
        "✓ Logged {:.1} {} x {:.0}",
        set.weight, config.tracker.weight_unit, set.reps
    );

    display_session(&controller.editor_snapshot(), controller.scope(), config);
    Ok(())
}

async fn cmd_update(
    store: Arc<JsonlStore>,
    exercise: String,
    date: NaiveDate,
    index: usize,
    weight: f64,
    reps: f64,
    config: &Config,
) -> Result<()> {
    let scope = SessionScope {
        exercise_id: exercise,
        date,
    };
    let mut controller = SelectionController::open(store, scope).await?;

    let set_id = controller
        .sets()
        .at(index)
        .map(|s| s.id)
        .ok_or_else(|| Error::InvalidState(format!("no set at index {index}")))?;

    controller.select_or_toggle(set_id)?;
    controller.update_set(weight, reps).await?;
    println!(
        "✓ Updated set {} to {:.1} {} x {:.0}",
        index, weight, config.tracker.weight_unit, reps
    );

    display_session(&controller.editor_snapshot(), controller.scope(), config);
    Ok(())
}

async fn cmd_delete(
    store: Arc<JsonlStore>,
    exercise: String,
    date: NaiveDate,
    index: usize,
    config: &Config,
) -> Result<()> {
    let scope = SessionScope {
        exercise_id: exercise,
        date,
    };
    let mut controller = SelectionController::open(store, scope).await?;

    let set_id = controller
        .sets()
        .at(index)
        .map(|s| s.id)
        .ok_or_else(|| Error::InvalidState(format!("no set at index {index}")))?;

    controller.select_or_toggle(set_id)?;
    controller.delete_set().await?;
    println!("✓ Deleted set {}", index);

    display_session(&controller.editor_snapshot(), controller.scope(), config);
    Ok(())
}

async fn cmd_history(store: Arc<JsonlStore>, exercise: &str, config: &Config) -> Result<()> {
    let mut history = HistoryProjection::new(exercise);
    let request = history.begin_refresh();
    let fetched = store.list_all_sets(exercise).await;
    history.complete_refresh(request, fetched)?;

    let snapshot = history.snapshot();
    display_header(&format!("HISTORY: {}", exercise));
    if snapshot.entries.is_empty() {
        println!("  (no sets recorded)");
    }
    for set in &snapshot.entries {
        println!(
            "  {}  {:>6.1} {} x {:.0}",
            set.date, set.weight, config.tracker.weight_unit, set.reps
        );
    }
    println!();
    Ok(())
}

async fn cmd_export(
    store: Arc<JsonlStore>,
    exercise: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let out = out.unwrap_or_else(|| PathBuf::from(format!("{exercise}.csv")));
    let count = export_exercise_csv(store.as_ref(), exercise, &out).await?;

    println!("✓ Exported {} sets", count);
    println!("  CSV: {}", out.display());
    Ok(())
}

fn cmd_dates(today: NaiveDate, around: usize) -> Result<()> {
    // The strip is not symmetric around today; clamp to both ends
    let around = around
        .min(STARTING_PAGE)
        .min(PAGE_COUNT - 1 - STARTING_PAGE);
    let mut pager = date_pager(today);

    display_header("DATE STRIP");
    for offset in (STARTING_PAGE - around)..=(STARTING_PAGE + around) {
        let date = *pager.visit(offset)?;
        let marker = if offset == STARTING_PAGE { "●" } else { " " };
        println!("  {} page {:>5}  {}", marker, offset, date);
    }
    println!();
    println!(
        "  {} pages total, today at page {}",
        pager.page_count(),
        STARTING_PAGE
    );
    println!();
    Ok(())
}

fn display_header(title: &str) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
    println!();
}

fn display_session(snapshot: &EditorSnapshot, scope: &SessionScope, config: &Config) {
    display_header(&format!("{} on {}", scope.exercise_id, scope.date));

    if snapshot.sets.is_empty() {
        println!("  (no sets recorded)");
    }
    for (index, set) in snapshot.sets.iter().enumerate() {
        let marker = if snapshot.highlight_index == Some(index) {
            "→"
        } else {
            " "
        };
        println!(
            "  {} {:>2}. {:>6.1} {} x {:.0}",
            marker, index, set.weight, config.tracker.weight_unit, set.reps
        );
    }

    println!();
    let mode = if snapshot.is_add_mode { "add" } else { "edit" };
    println!("  Mode: {}", mode);
    println!();
}
