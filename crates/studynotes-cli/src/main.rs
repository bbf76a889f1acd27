//! studynotes CLI: browse study notes, edit topics, and take quizzes.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "studynotes", version, about = "Study notes viewer and quiz runner")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for saved edits, favorites, and history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List subjects
    Subjects {
        /// Remember this subject as the current one
        #[arg(long)]
        select: Option<String>,
    },

    /// List the topics of a subject
    Topics {
        /// Subject id (defaults to the current subject)
        #[arg(long)]
        subject: Option<String>,

        /// Only topics matching this term
        #[arg(long)]
        search: Option<String>,

        /// Only favorite topics
        #[arg(long)]
        favorites: bool,
    },

    /// Show a topic and record the view
    Show {
        /// Topic id
        id: u32,

        /// Subject whose listing drives previous/next
        #[arg(long)]
        subject: Option<String>,

        /// Search term of the listing that drives previous/next
        #[arg(long)]
        search: Option<String>,

        /// Walk previous/next through favorite topics only
        #[arg(long)]
        favorites: bool,
    },

    /// Create a topic
    New {
        /// Subject id
        #[arg(long)]
        subject: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Markdown file with the topic body
        #[arg(long)]
        content_file: Option<PathBuf>,
    },

    /// Edit a topic
    Edit {
        /// Topic id
        id: u32,

        #[command(flatten)]
        fields: EditFields,
    },

    /// Delete a topic
    Delete {
        /// Topic id
        id: u32,
    },

    /// Toggle a topic as favorite
    Favorite {
        /// Topic id
        id: u32,
    },

    /// Recently viewed topics
    History,

    /// Take a quiz on stdin
    Quiz {
        /// Quiz TOML file (defaults to the configured or built-in quiz)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Directory to write the attempt report to
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compute weighted bimester and final grades
    Grades {
        #[command(flatten)]
        marks: commands::grades::Marks,
    },

    /// Validate catalog TOML files
    Validate {
        /// Path to catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// Discard saved edits, favorites, and history
    Reset,

    /// Create starter config and example catalog
    Init,
}

#[derive(Args)]
struct EditFields {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    description: Option<String>,

    /// Comma-separated tags, replacing the current ones
    #[arg(long)]
    tags: Option<String>,

    /// Markdown file replacing the topic body
    #[arg(long)]
    content_file: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("studynotes=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let ctx = commands::Context {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Subjects { select } => commands::subjects::execute(&ctx, select),
        Commands::Topics {
            subject,
            search,
            favorites,
        } => commands::topics::execute(&ctx, subject, search, favorites),
        Commands::Show {
            id,
            subject,
            search,
            favorites,
        } => commands::show::execute(&ctx, id, subject, search, favorites),
        Commands::New {
            subject,
            title,
            description,
            tags,
            content_file,
        } => commands::edit::create(&ctx, subject, title, description, tags, content_file),
        Commands::Edit { id, fields } => commands::edit::update(
            &ctx,
            id,
            fields.title,
            fields.description,
            fields.tags,
            fields.content_file,
        ),
        Commands::Delete { id } => commands::edit::delete(&ctx, id),
        Commands::Favorite { id } => commands::favorite::execute(&ctx, id),
        Commands::History => commands::history::execute(&ctx),
        Commands::Quiz { file, output } => commands::quiz::execute(&ctx, file, output),
        Commands::Grades { marks } => commands::grades::execute(marks),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::Reset => commands::reset::execute(&ctx),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
