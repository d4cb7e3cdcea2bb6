//! gymstack - Personal workout tracker

use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};

use gymstack::backup;
use gymstack::db::SqliteStore;
use gymstack::exercises::{exercise_suggestions, resolve_muscle_group};
use gymstack::logger::{ExerciseEntry, WorkoutDraft, parse_exercise_spec, parse_reps, parse_weight};
use gymstack::models::{CustomExercise, Workout, new_id};
use gymstack::stats::{MAX_CALENDAR_DAYS, ProgressMetric, calculate_1rm};
use gymstack::store::WorkoutStore;
use gymstack::tools::{BAR_WEIGHTS, RestTimer, plates_per_side};
use gymstack::tui::App;

type Store = WorkoutStore<SqliteStore>;

#[derive(Parser)]
#[command(name = "gymstack")]
#[command(author, version, about = "Personal workout tracker")]
struct Cli {
    /// Database file
    #[arg(long, env = "GYMSTACK_DB", default_value = "gymstack.db", global = true)]
    db: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Log a workout
    Log {
        /// Workout name (defaults to "Quick Session")
        name: Option<String>,

        /// Exercise as NAME:GROUP:SETS[:u][:bw], e.g. "Bench Press:Chest:135x10,135x8".
        /// Blank sets ("_") reuse the last session's values
        #[arg(short, long = "exercise")]
        exercises: Vec<String>,

        /// Start from a saved template id
        #[arg(short, long)]
        template: Option<String>,

        /// Session length in minutes
        #[arg(short, long)]
        duration: Option<f64>,
    },

    /// Edit a logged workout
    Edit {
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// Add an exercise (same format as `log`)
        #[arg(short, long = "exercise")]
        exercises: Vec<String>,

        /// Remove the exercise at this position (1-based)
        #[arg(short, long)]
        remove: Vec<usize>,
    },

    /// List workout history
    List {
        /// Number of records to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show one workout in detail
    Show { id: String },

    /// Delete a workout
    Delete { id: String },

    /// Show training statistics and personal bests
    Stats,

    /// Muscle group load over the last 7 days
    Heatmap,

    /// Volume of the last 7 workouts
    Volume,

    /// Progress of one exercise over time
    Progress {
        exercise: String,

        /// Chart volume instead of estimated 1RM
        #[arg(long)]
        volume: bool,
    },

    /// Daily training calendar
    Calendar {
        #[arg(short, long, default_value = "28", value_parser = clap::value_parser!(i64).range(0..=MAX_CALENDAR_DAYS))]
        days: i64,
    },

    /// Sets from the last time an exercise was performed
    Last { exercise: String },

    /// Manage custom exercises
    #[command(subcommand)]
    Exercise(ExerciseCommand),

    /// Manage custom muscle groups
    #[command(subcommand)]
    Muscle(MuscleCommand),

    /// Manage workout templates
    #[command(subcommand)]
    Template(TemplateCommand),

    /// Write a JSON backup
    Export { path: String },

    /// Restore from a JSON backup (replaces history)
    Import { path: String },

    /// Plates to load per side
    Plates {
        target: String,

        #[arg(short, long, default_value = "45")]
        bar: f64,
    },

    /// Estimated one-rep max
    Orm { weight: String, reps: String },

    /// Rest timer countdown
    Timer {
        #[arg(default_value = "90")]
        seconds: u32,
    },
}

#[derive(Subcommand)]
enum ExerciseCommand {
    Add { name: String, muscle_group: String },
    List { muscle_group: Option<String> },
    Delete { id: String },
}

#[derive(Subcommand)]
enum MuscleCommand {
    Add { name: String },
    List,
    Delete { name: String },
}

#[derive(Subcommand)]
enum TemplateCommand {
    /// Save a logged workout as a template
    Save { workout_id: String },
    List,
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Commands that never touch storage
    match &cli.command {
        Some(Commands::Plates { target, bar }) => {
            print_plates(parse_weight(target), *bar);
            return Ok(());
        }
        Some(Commands::Orm { weight, reps }) => {
            let est = calculate_1rm(parse_weight(weight), parse_reps(reps));
            println!("Estimated 1RM: {:.0} lbs", est.round());
            return Ok(());
        }
        Some(Commands::Timer { seconds }) => return run_timer(*seconds).await,
        _ => {}
    }

    let storage = SqliteStore::open(&cli.db)?;
    let mut store = WorkoutStore::open(storage);

    match cli.command {
        Some(Commands::Log { name, exercises, template, duration }) => {
            let mut draft = match template {
                Some(id) => {
                    let template = store.find_template(&id).with_context(|| format!("no template {}", id))?;
                    WorkoutDraft::from_template(template)
                }
                None => WorkoutDraft::new(""),
            };
            if let Some(name) = name {
                draft.name = name;
            }
            draft.duration_minutes = duration;
            add_exercises(&store, &mut draft, &exercises)?;

            if draft.exercises.is_empty() {
                bail!("nothing to log: add at least one exercise with reps");
            }

            let saved = store.add_workout(draft.finish(Utc::now()));
            println!("Logged: {} (id: {})", saved.name, saved.id);
            print_workout(&saved);
        }

        Some(Commands::Edit { id, name, exercises, remove }) => {
            let workout = store.find_workout(&id).with_context(|| format!("no workout {}", id))?;
            let mut draft = WorkoutDraft::edit(workout);
            if let Some(name) = name {
                draft.name = name;
            }

            let mut positions = remove;
            positions.sort_unstable_by(|a, b| b.cmp(a));
            for pos in positions {
                if pos == 0 || draft.remove_exercise(pos - 1).is_none() {
                    bail!("no exercise at position {}", pos);
                }
            }
            add_exercises(&store, &mut draft, &exercises)?;

            let saved = store
                .update_workout(draft.finish(Utc::now()))
                .with_context(|| format!("no workout {}", id))?;
            println!("Updated: {}", saved.name);
            print_workout(&saved);
        }

        Some(Commands::List { limit }) => {
            println!("Recent workouts:");
            println!("{:-<72}", "");
            for w in store.history().iter().take(limit) {
                println!(
                    "{} | {:24} | {:2} ex | {:>8.0} vol | {}",
                    w.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    w.name,
                    w.exercises.len(),
                    w.volume,
                    w.id
                );
            }
        }

        Some(Commands::Show { id }) => {
            let workout = store.find_workout(&id).with_context(|| format!("no workout {}", id))?;
            print_workout(workout);
        }

        Some(Commands::Delete { id }) => {
            if store.delete_workout(&id) {
                println!("Deleted {}", id);
            } else {
                println!("No workout {}", id);
            }
        }

        Some(Commands::Stats) => {
            let summary = store.dashboard_summary(Utc::now());
            println!("Training Statistics");
            println!("{:-<40}", "");
            println!("Total workouts: {}", summary.total_workouts);
            println!("This week: {} ({:.0}% of goal)", summary.this_week, summary.goal_progress);
            println!();
            println!("Personal bests (est. 1RM):");
            for best in store.personal_bests() {
                println!(
                    "  {:24} {:>6.1}  ({}x{} on {})",
                    best.exercise,
                    best.estimated_1rm,
                    best.weight,
                    best.reps,
                    best.date.with_timezone(&Local).format("%Y-%m-%d")
                );
            }
        }

        Some(Commands::Heatmap) => {
            let heatmap = store.muscle_heatmap(Utc::now());
            if heatmap.is_empty() {
                println!("No training in the last 7 days");
            }
            for entry in heatmap {
                println!("{:12} {} {:>5.1}%  ({:.0})", entry.muscle, entry.bar(), entry.intensity, entry.volume);
            }
        }

        Some(Commands::Volume) => {
            for point in store.recent_volume_data() {
                println!(
                    "{} {} {:>8.0}",
                    point.label,
                    point.date.with_timezone(&Local).format("%m-%d"),
                    point.volume
                );
            }
        }

        Some(Commands::Progress { exercise, volume }) => {
            let metric = if volume { ProgressMetric::Volume } else { ProgressMetric::OneRepMax };
            let series = store.exercise_progress(&exercise, metric);
            if series.is_empty() {
                println!("No history for {}. Logged exercises:", exercise);
                for name in store.available_exercises() {
                    println!("  {}", name);
                }
            }
            for point in series {
                println!("{} {:>8.0}", point.date.with_timezone(&Local).format("%Y-%m-%d"), point.value);
            }
        }

        Some(Commands::Calendar { days }) => {
            let today = Local::now().date_naive();
            let marks = [".", "o", "O", "@"];
            for day in store.consistency_calendar(today, days) {
                println!(
                    "{} {} {:>8.0}",
                    day.date.format("%a %m-%d"),
                    marks[day.intensity.min(3) as usize],
                    day.volume
                );
            }
        }

        Some(Commands::Last { exercise }) => match store.last_exercise_stats(&exercise) {
            Some(sets) => {
                for (i, set) in sets.iter().enumerate() {
                    println!("Set {}: {} x {}", i + 1, set.weight, set.reps);
                }
            }
            None => println!("{} has never been logged", exercise),
        },

        Some(Commands::Exercise(cmd)) => match cmd {
            ExerciseCommand::Add { name, muscle_group } => {
                let id = new_id();
                store.add_custom_exercise(CustomExercise { id: id.clone(), name: name.clone(), muscle_group });
                println!("Added exercise {} (id: {})", name, id);
            }
            ExerciseCommand::List { muscle_group } => match muscle_group {
                Some(group) => {
                    for name in exercise_suggestions(&group, store.custom_exercises()) {
                        println!("{}", name);
                    }
                }
                None => {
                    for ex in store.custom_exercises() {
                        println!("{:24} {:12} {}", ex.name, ex.muscle_group, ex.id);
                    }
                }
            },
            ExerciseCommand::Delete { id } => {
                if !store.delete_custom_exercise(&id) {
                    println!("No custom exercise {}", id);
                }
            }
        },

        Some(Commands::Muscle(cmd)) => match cmd {
            MuscleCommand::Add { name } => {
                if !store.add_custom_muscle_group(name.trim()) {
                    println!("{} already exists", name);
                }
            }
            MuscleCommand::List => {
                for group in store.muscle_groups() {
                    println!("{}", group);
                }
            }
            MuscleCommand::Delete { name } => {
                if !store.delete_custom_muscle_group(&name) {
                    println!("No custom muscle group {}", name);
                }
            }
        },

        Some(Commands::Template(cmd)) => match cmd {
            TemplateCommand::Save { workout_id } => {
                let template = store
                    .save_workout_as_template(&workout_id)
                    .with_context(|| format!("no workout {}", workout_id))?;
                println!("Saved template {} (id: {})", template.name, template.id);
            }
            TemplateCommand::List => {
                for t in store.templates() {
                    let names: Vec<&str> = t.exercises.iter().map(|e| e.name.as_str()).collect();
                    println!("{} | {} | {}", t.id, t.name, names.join(", "));
                }
            }
            TemplateCommand::Delete { id } => {
                if !store.delete_template(&id) {
                    println!("No template {}", id);
                }
            }
        },

        Some(Commands::Export { path }) => {
            let json = backup::export(&store)?;
            std::fs::write(&path, json).with_context(|| format!("failed to write {}", path))?;
            println!("Exported {} workouts to {}", store.workouts().len(), path);
        }

        Some(Commands::Import { path }) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path))?;
            let count = backup::import(&mut store, &json)?;
            println!("Imported {} workouts", count);
        }

        Some(Commands::Tui) | None => {
            let mut app = App::new(store);
            app.run()?;
        }

        Some(Commands::Plates { .. } | Commands::Orm { .. } | Commands::Timer { .. }) => {}
    }

    Ok(())
}

/// Parse exercise specs, resolve groups and ghost values, add to the draft
fn add_exercises(store: &Store, draft: &mut WorkoutDraft, specs: &[String]) -> Result<()> {
    for spec in specs {
        let mut entry: ExerciseEntry =
            parse_exercise_spec(spec).with_context(|| format!("invalid exercise: {}", spec))?;

        if entry.muscle_group.is_empty() {
            entry.muscle_group = resolve_muscle_group(&entry.name, store.custom_exercises())
                .with_context(|| format!("unknown muscle group for {}, use NAME:GROUP:SETS", entry.name))?;
        }

        let name = entry.name.clone();
        if !draft.add_exercise(entry, store.last_exercise_stats(&name)) {
            println!("Skipped {}: no sets with reps", name);
        }
    }
    Ok(())
}

fn print_workout(workout: &Workout) {
    println!(
        "{} | {} | volume {:.0}{}",
        workout.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        workout.name,
        workout.volume,
        workout.duration_minutes.map(|m| format!(" | {:.0} min", m)).unwrap_or_default()
    );
    for ex in &workout.exercises {
        println!("  {} ({})", ex.name, ex.muscle_group);
        for set in &ex.sets {
            let pr = if set.is_pr() { "  PR" } else { "" };
            println!(
                "    {} x {}  (1RM ~{:.0}){}",
                set.weight,
                set.reps,
                calculate_1rm(set.weight, set.reps),
                pr
            );
        }
    }
}

fn print_plates(target: f64, bar: f64) {
    if !BAR_WEIGHTS.contains(&bar) {
        println!("Note: non-standard bar weight {}", bar);
    }
    let plates = plates_per_side(target, bar);
    if plates.is_empty() {
        println!("Bar only");
        return;
    }
    let list: Vec<String> = plates.iter().map(|p| p.to_string()).collect();
    println!("Per side: {}", list.join(" + "));
}

async fn run_timer(seconds: u32) -> Result<()> {
    use std::io::Write;

    let mut timer = RestTimer::new(seconds);
    timer.start();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await;

    print!("\rRest: {} ", timer.format_time());
    std::io::stdout().flush()?;
    while timer.is_active() {
        interval.tick().await;
        let done = timer.tick();
        print!("\rRest: {} ", timer.format_time());
        std::io::stdout().flush()?;
        if done {
            println!("\nTime to lift!");
        }
    }
    Ok(())
}
