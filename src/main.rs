use anyhow::Result;
use chset::areas::repository::Repository;
use chset::areas::settings::{DEFAULT_GIT_BINARY, UserParameters};
use chset::artifacts::core::telemetry::init_tracing;
use chset::artifacts::hashing::algorithm::Algorithm;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "chset",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Save the uncommitted changes of a git work tree",
    long_about = "This tool compares a git work tree with its HEAD commit and copies \
    every added and modified file, plus the HEAD content of every deleted file, \
    into a changeset directory described by a JSON manifest.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "save",
        about = "Write the changes of a work tree to a destination",
        long_about = "This command compares the work tree enclosing SOURCE with HEAD and writes \
        the changeset to DESTINATION/NAME along with DESTINATION/NAME.json. \
        DESTINATION must be an existing empty directory outside the work tree."
    )]
    Save {
        #[arg(index = 1, help = "A directory inside the work tree")]
        source: PathBuf,
        #[arg(index = 2, help = "An existing empty directory")]
        destination: PathBuf,
        #[arg(short, long, help = "The changeset name, defaults to the current local time")]
        name: Option<String>,
        #[arg(long, help = "Also copy files that did not change")]
        copy_unchanged: bool,
        #[arg(long, help = "Hash files with git hash-object")]
        external_hasher: bool,
        #[arg(long, help = "The git binary to run")]
        git: Option<String>,
    },
    #[command(
        name = "diff",
        about = "Show how the work tree differs from HEAD",
        long_about = "This command prints the added, modified and deleted files of the work tree. \
        With --all, unchanged and ignored files are listed too."
    )]
    Diff {
        #[arg(index = 1, help = "A directory inside the work tree")]
        path: Option<PathBuf>,
        #[arg(short, long, help = "List unchanged and ignored files too")]
        all: bool,
        #[arg(long, help = "Hash files with git hash-object")]
        external_hasher: bool,
        #[arg(long, help = "The git binary to run")]
        git: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Compute the blob object id of a file",
        long_about = "This command prints the git blob object id of a file inside the work tree."
    )]
    HashObject {
        #[arg(index = 1)]
        file: PathBuf,
        #[arg(short, long, value_enum, help = "The digest, defaults to the repository's")]
        algorithm: Option<Algorithm>,
        #[arg(long, help = "Hash with git hash-object")]
        external: bool,
    },
    #[command(
        name = "ls-tree",
        about = "List the blobs and submodules of HEAD",
        long_about = "This command prints every entry of the HEAD tree, recursively."
    )]
    LsTree {
        #[arg(index = 1, help = "A directory inside the work tree")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "status",
        about = "List the records of git status",
        long_about = "This command prints the parsed porcelain v2 status records, one per line."
    )]
    Status {
        #[arg(index = 1, help = "A directory inside the work tree")]
        path: Option<PathBuf>,
    },
}

async fn open(path: Option<&Path>, git: Option<&str>) -> Result<Repository> {
    let dir = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    Repository::open(
        &dir,
        git.unwrap_or(DEFAULT_GIT_BINARY),
        Box::new(std::io::stdout()),
    )
    .await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Save {
            source,
            destination,
            name,
            copy_unchanged,
            external_hasher,
            git,
        } => {
            let parameters =
                UserParameters::new(source.clone(), destination.clone(), name.clone(), git.clone())
                    .with_copy_unchanged(*copy_unchanged)
                    .with_external_hasher(*external_hasher);

            let source = parameters.source_dir()?;
            let repository = open(Some(source.as_path()), Some(parameters.git.as_str())).await?;
            let settings = parameters.resolve(repository.path())?;

            repository.save(&settings).await?
        }
        Commands::Diff {
            path,
            all,
            external_hasher,
            git,
        } => {
            let repository = open(path.as_deref(), git.as_deref()).await?;

            repository.diff(*all, *external_hasher).await?
        }
        Commands::HashObject {
            file,
            algorithm,
            external,
        } => {
            let repository = open(None, None).await?;

            repository.hash_object(file, *algorithm, *external)?
        }
        Commands::LsTree { path } => {
            let repository = open(path.as_deref(), None).await?;

            repository.ls_tree().await?
        }
        Commands::Status { path } => {
            let repository = open(path.as_deref(), None).await?;

            repository.status().await?
        }
    }

    Ok(())
}
