use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use std::error::Error;
use std::path::PathBuf;
use trivia_api::db;
use trivia_api::db::queries::categories::{get_all_categories, import_categories};
use trivia_api::db::queries::questions::{get_all_questions, import_questions};
use trivia_api::db::{Category, Question};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database path
    db_path: PathBuf,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories and questions from csv files
    Import { path: PathBuf },
    /// Export categories and questions to csv files
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let pool = db::establish_connection(&cli.db_path.display().to_string())
        .await
        .expect("Cannot connect to DB");
    db::run_migrations(&pool).await.expect("Cannot run migrations");
    match cli.command {
        Commands::Export { path } => export_data(&pool, path).await.expect("Cannot export"),
        Commands::Import { path } => import_data(&pool, path).await.expect("Cannot import"),
    }
}

fn write_to(path: PathBuf, data: Vec<impl Serialize>) -> Result<(), Box<dyn Error>> {
    let file = std::fs::File::create(path)?;
    let mut wtr = csv::Writer::from_writer(file);
    for line in data {
        wtr.serialize(line)?;
    }
    wtr.flush()?;
    Ok(())
}

fn read_from<T: DeserializeOwned>(path: PathBuf) -> Result<Vec<T>, Box<dyn Error>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let mut out = Vec::new();
    for record in rdr.deserialize() {
        let record: T = record?;
        out.push(record);
    }
    Ok(out)
}

async fn export_data(pool: &SqlitePool, path: PathBuf) -> Result<(), Box<dyn Error>> {
    let categories = get_all_categories(pool).await?;
    let questions = get_all_questions(pool).await?;
    if !path.exists() {
        std::fs::create_dir_all(&path)?
    }
    write_to(path.join("categories.csv"), categories)?;
    write_to(path.join("questions.csv"), questions)?;
    Ok(())
}

async fn import_data(pool: &SqlitePool, path: PathBuf) -> Result<(), Box<dyn Error>> {
    let categories: Vec<Category> = read_from(path.join("categories.csv"))?;
    let questions: Vec<Question> = read_from(path.join("questions.csv"))?;
    import_categories(pool, categories).await?;
    import_questions(pool, questions).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_roundtrip_preserves_questions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.csv");
        let questions = vec![Question {
            id: 7,
            question: "Which country won the first ever soccer World Cup in 1930?".to_owned(),
            answer: "Uruguay".to_owned(),
            category: 6,
            difficulty: 4,
        }];
        write_to(path.clone(), questions).unwrap();

        let read: Vec<Question> = read_from(path).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].id, 7);
        assert_eq!(read[0].answer, "Uruguay");
    }

    #[test]
    fn csv_roundtrip_preserves_category_display_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.csv");
        let categories = vec![Category {
            id: 1,
            kind: "Science".to_owned(),
        }];
        write_to(path.clone(), categories).unwrap();

        let read: Vec<Category> = read_from(path).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].kind, "Science");
    }
}
