//! qaforum CLI - browse and edit a Q&A forum database

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use qaforum::config::{self, QaConfig};
use qaforum::storage::SqliteStore;
use qaforum::ui::{self, Icons};
use qaforum::{Error, Question, QuestionFollower, QuestionLike, Reply, User};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "qaforum")]
#[command(version)]
#[command(about = "Q&A forum database - users, questions, replies, follows and likes")]
#[command(long_about = r#"
qaforum reads and writes a SQLite forum database.

Example usage:
  qaforum init
  qaforum add-user Ada Lovelace
  qaforum ask --user 1 "Bernoulli numbers?" "How would the engine compute them?"
  qaforum reply --user 2 --question 1 "Like this."
  qaforum top --by likes -n 5
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the database schema
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// List all users
    Users,

    /// Show a user with their questions, replies, follows, likes and karma
    User {
        id: i64,
    },

    /// Add a user
    AddUser {
        fname: String,
        lname: String,
    },

    /// List all questions
    Questions,

    /// Show a question with its author, replies, followers and likers
    Question {
        id: i64,
    },

    /// Ask a question
    Ask {
        /// Author user id
        #[arg(short, long)]
        user: i64,
        title: String,
        body: String,
    },

    /// Reply to a question, optionally under another reply
    Reply {
        /// Author user id
        #[arg(short, long)]
        user: i64,

        /// Question being answered
        #[arg(short, long)]
        question: i64,

        /// Parent reply id
        #[arg(short, long)]
        parent: Option<i64>,

        body: String,
    },

    /// Follow a question
    Follow {
        #[arg(short, long)]
        user: i64,
        #[arg(short, long)]
        question: i64,
    },

    /// Like a question
    Like {
        #[arg(short, long)]
        user: i64,
        #[arg(short, long)]
        question: i64,
    },

    /// Top questions by followers or likes (ties in no particular order)
    Top {
        #[arg(long, value_enum, default_value = "likes")]
        by: RankBy,

        /// Number of questions
        #[arg(short, default_value = "10")]
        n: usize,
    },

    /// Show row counts
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum RankBy {
    Followers,
    Likes,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_saved(json: bool, what: &str, id: Option<i64>, value: &impl Serialize) -> anyhow::Result<()> {
    if json {
        return print_json(value);
    }
    ui::success(&format!("{} saved with id {}", what, id.unwrap_or_default()));
    Ok(())
}

fn print_questions(json: bool, questions: &[Question]) -> anyhow::Result<()> {
    if json {
        return print_json(&questions);
    }
    if questions.is_empty() {
        println!("{} No questions.", Icons::EMPTY);
    } else {
        println!("{}", ui::questions_table(questions));
    }
    Ok(())
}

fn print_users(json: bool, users: &[User]) -> anyhow::Result<()> {
    if json {
        return print_json(&users);
    }
    if users.is_empty() {
        println!("{} No users.", Icons::EMPTY);
    } else {
        println!("{}", ui::users_table(users));
    }
    Ok(())
}

fn open_store(cli: &Cli) -> anyhow::Result<(SqliteStore, PathBuf)> {
    let loaded = config::load_config(cli.config.as_deref())?;
    let db_path = config::resolve_database_path(cli.database.clone(), loaded.as_ref());
    config::ensure_db_dir(&db_path)?;
    tracing::debug!("Opening database {:?}", db_path);
    Ok((SqliteStore::open(&db_path)?, db_path))
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(&cli) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let json = cli.json;

    match &cli.command {
        Commands::Init { force } => {
            let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
            let db_path = cli.database.clone().unwrap_or_else(config::default_database_path);
            let qa_config = QaConfig {
                database: Some(db_path.to_string_lossy().to_string()),
            };
            config::write_config(&config_path, &qa_config, *force)?;
            config::ensure_db_dir(&db_path)?;
            SqliteStore::open(&db_path)?;

            tracing::info!("Initialized {:?} with database {:?}", config_path, db_path);
            if json {
                print_json(&qa_config)?;
            } else {
                ui::success(&format!("Wrote {}", config_path.display()));
                ui::info("Database", &db_path.display().to_string());
            }
        }

        Commands::Users => {
            let (store, _) = open_store(cli)?;
            print_users(json, &User::find_all(&store)?)?;
        }

        Commands::User { id } => {
            let (store, _) = open_store(cli)?;
            let user = User::find_by_id(&store, *id)?
                .ok_or(Error::NotFound { entity: "user", id: *id })?;

            let questions = user.authored_questions(&store)?;
            let replies = user.authored_replies(&store)?;
            let followed = user.followed_questions(&store)?;
            let liked = user.liked_questions(&store)?;
            let karma = user.average_karma(&store)?;

            if json {
                print_json(&serde_json::json!({
                    "user": user,
                    "questions": questions,
                    "replies": replies,
                    "followed_questions": followed,
                    "liked_questions": liked,
                    "average_karma": karma.value(),
                }))?;
            } else {
                ui::header(Icons::PERSON, &user.full_name());
                ui::info("Average karma", &karma.to_string());
                ui::info("Replies written", &replies.len().to_string());
                ui::section(Icons::QUESTION, "Asked");
                print_questions(false, &questions)?;
                ui::section(Icons::EYE, "Following");
                print_questions(false, &followed)?;
                ui::section(Icons::HEART, "Liked");
                print_questions(false, &liked)?;
            }
        }

        Commands::AddUser { fname, lname } => {
            let (store, _) = open_store(cli)?;
            let mut user = User::new(fname.as_str(), lname.as_str());
            user.save(&store)?;
            print_saved(json, "User", user.id, &user)?;
        }

        Commands::Questions => {
            let (store, _) = open_store(cli)?;
            print_questions(json, &Question::find_all(&store)?)?;
        }

        Commands::Question { id } => {
            let (store, _) = open_store(cli)?;
            let question = Question::find_by_id(&store, *id)?
                .ok_or(Error::NotFound { entity: "question", id: *id })?;

            let author = question.author(&store)?;
            let replies = question.replies(&store)?;
            let followers = question.followers(&store)?;
            let likers = question.likers(&store)?;
            let num_likes = question.num_likes(&store)?;

            if json {
                print_json(&serde_json::json!({
                    "question": question,
                    "author": author,
                    "replies": replies,
                    "followers": followers,
                    "likers": likers,
                    "num_likes": num_likes,
                }))?;
            } else {
                ui::header(Icons::QUESTION, &question.title);
                println!("{}", question.body);
                match &author {
                    Some(author) => ui::info("Asked by", &author.full_name()),
                    None => ui::warn(&format!("Author {} not found", question.user_id)),
                }
                ui::info("Likes", &num_likes.to_string());

                ui::section(Icons::REPLY, "Replies");
                if replies.is_empty() {
                    println!("{} No replies.", Icons::EMPTY);
                }
                for line in ui::reply_tree_lines(&replies) {
                    println!("{}", line);
                }
                ui::section(Icons::EYE, "Followers");
                print_users(false, &followers)?;
                ui::section(Icons::HEART, "Liked by");
                print_users(false, &likers)?;
            }
        }

        Commands::Ask { user, title, body } => {
            let (store, _) = open_store(cli)?;
            let mut question = Question::new(title.as_str(), body.as_str(), *user);
            question.save(&store)?;
            print_saved(json, "Question", question.id, &question)?;
        }

        Commands::Reply { user, question, parent, body } => {
            let (store, _) = open_store(cli)?;
            let mut reply = Reply::new(body.as_str(), *question, *user, *parent);
            reply.save(&store)?;
            print_saved(json, "Reply", reply.id, &reply)?;
        }

        Commands::Follow { user, question } => {
            let (store, _) = open_store(cli)?;
            let mut follow = QuestionFollower::new(*user, *question);
            follow.save(&store)?;
            print_saved(json, "Follow", follow.id, &follow)?;
        }

        Commands::Like { user, question } => {
            let (store, _) = open_store(cli)?;
            let mut like = QuestionLike::new(*user, *question);
            like.save(&store)?;
            print_saved(json, "Like", like.id, &like)?;
        }

        Commands::Top { by, n } => {
            let (store, _) = open_store(cli)?;
            let ranked = match by {
                RankBy::Followers => Question::most_followed(&store, *n)?,
                RankBy::Likes => Question::most_liked(&store, *n)?,
            };
            if !json {
                let label = match by {
                    RankBy::Followers => "Most followed",
                    RankBy::Likes => "Most liked",
                };
                ui::header(Icons::STAR, label);
                println!("{}", ui::dim("(equal counts appear in no particular order)"));
            }
            print_questions(json, &ranked)?;
        }

        Commands::Stats => {
            let (store, db_path) = open_store(cli)?;
            let stats = store.stats()?;
            if json {
                print_json(&stats)?;
            } else {
                ui::header(Icons::STATS, "qaforum statistics");
                ui::info(Icons::DATABASE, &db_path.display().to_string());
                println!("{}", ui::stats_table(&stats));
            }
        }
    }

    Ok(())
}
