use std::io::BufRead;

use clap::Parser;
use tracing::{debug, error};

use assistant::{Assistant, CommandHandler, Config, IngestOutcome};
use database::Database;

#[derive(Debug, Parser)]
#[command(name = "console")]
#[command(about = "Drive the Keeper assistant from a local terminal")]
struct Args {
    /// SQLite database URL. Overrides KEEPER_DATABASE_URL.
    #[arg(long)]
    database: Option<String>,

    /// User id all input is scoped to
    #[arg(long, default_value = "local")]
    user: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(database) = args.database {
        config.database_url = database;
    }

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let assistant = Assistant::new(db.clone(), config.clone());
    let handler = CommandHandler::new(db, config);

    // Each line is either a retrieval command (answered) or a message to
    // store (silent). Store failures are logged and the loop keeps going.
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match handler.handle(&args.user, &line).await {
            Ok(Some(reply)) => println!("{reply}"),
            Ok(None) => match assistant.ingest(&args.user, &line).await {
                Ok(IngestOutcome::Stored { category }) => {
                    debug!(user_id = %args.user, category = category.as_str(), "stored");
                }
                Ok(IngestOutcome::Skipped { reason }) => {
                    debug!(user_id = %args.user, reason = %reason, "skipped");
                }
                Err(err) => {
                    error!(user_id = %args.user, error = %err, "ingest failed");
                }
            },
            Err(err) => {
                error!(user_id = %args.user, error = %err, "command failed");
                println!("Sorry, there was an error processing your command.");
            }
        }
    }

    Ok(())
}
