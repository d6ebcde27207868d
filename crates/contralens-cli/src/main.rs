mod display;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use contralens_core::{
    ACCEPTED_EXTENSIONS, ALL, DEFAULT_PAGE_SIZE, DashboardStats, ListEngine, ListView,
    SeededStepper, UploadQueue, is_accepted_document,
};
use contralens_store::{FileStore, LOGIN_REJECTED_MESSAGE, SessionManager};
use contralens_sync::{
    ContractList, ContractSource, DETAIL_FAILED_MESSAGE, DirFixtures, HttpFixtures, LoadState,
    load_detail,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const TICK: Duration = Duration::from_millis(200);
const MAX_UPLOAD_TICKS: usize = 200;

#[derive(Parser)]
#[command(name = "contralens", version, about = "Browse mock contract records")]
struct Cli {
    /// Fixture host URL, or a directory holding contract.json and contract-details.json.
    #[arg(long, env = "CONTRALENS_FIXTURES", default_value = "http://localhost:3000", global = true)]
    fixtures: String,

    /// File that persists the signed-in session.
    #[arg(long, env = "CONTRALENS_STATE", default_value = ".contralens/session.json", global = true)]
    state: PathBuf,

    /// Rows per page for `list`.
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, global = true)]
    page_size: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in (any username, password "test123").
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List contracts with optional search and filters.
    List {
        /// Case-insensitive match on name or parties.
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact status ("Active", "Expired", "Renewal Due") or "all".
        #[arg(long, default_value = ALL)]
        status: String,
        /// Exact risk ("High", "Medium", "Low") or "all".
        #[arg(long, default_value = ALL)]
        risk: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one contract with its clauses, insights, and evidence.
    Show { id: String },
    /// Headline counts across all contracts.
    Stats,
    /// Simulate uploading files. Nothing leaves this machine.
    Upload {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Seed for reproducible progress.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("contralens v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let engine = ListEngine::new(cli.page_size).context("invalid --page-size")?;

    let mut sessions = SessionManager::new(FileStore::new(&cli.state));
    if let Err(e) = sessions.restore_session().await {
        eprintln!("warning: {}", e.user_message());
    }

    match cli.command {
        Command::Login { username, password } => {
            match sessions.login(&username, &password).await {
                Ok(true) => println!("Logged in as {username}"),
                Ok(false) => bail!(LOGIN_REJECTED_MESSAGE),
                Err(e) => {
                    eprintln!("warning: {}", e.user_message());
                    println!("Logged in as {username} (this run only)");
                }
            }
        }
        Command::Logout => {
            sessions
                .logout()
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("Logged out");
        }
        Command::Whoami => match sessions.current_session() {
            Some(s) => println!("{}", s.username),
            None => println!("Not logged in"),
        },
        Command::List {
            search,
            status,
            risk,
            page,
        } => {
            require_session(&sessions)?;
            let mut list = ContractList::new(fixture_source(&cli.fixtures));
            let contracts = load_with_retry(&mut list).await?;

            let mut view = ListView::new();
            view.set_search(search);
            view.set_status_filter(status);
            view.set_risk_filter(risk);
            view.go_to(&engine, contracts, page);
            if view.criteria().page != page {
                eprintln!("note: page {page} is out of range, showing page {}", view.criteria().page);
            }
            display::print_contract_table(&view.page(&engine, contracts), view.empty_message());
        }
        Command::Show { id } => {
            require_session(&sessions)?;
            let source = fixture_source(&cli.fixtures);
            match load_detail(source.as_ref(), &id).await {
                LoadState::Ready(detail) => display::print_contract_card(&detail),
                LoadState::Failed { message, error } => {
                    tracing::debug!(%error, "detail lookup failed");
                    bail!(message);
                }
                LoadState::Loading => bail!(DETAIL_FAILED_MESSAGE),
            }
        }
        Command::Stats => {
            require_session(&sessions)?;
            let mut list = ContractList::new(fixture_source(&cli.fixtures));
            let contracts = load_with_retry(&mut list).await?;
            display::print_stats(&DashboardStats::from_contracts(contracts));
        }
        Command::Upload { files, seed } => {
            let seed = seed.unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or_default()
            });
            run_uploads(&files, seed).await?;
        }
    }

    Ok(())
}

fn require_session<S: contralens_store::KeyValueStore>(
    sessions: &SessionManager<S>,
) -> anyhow::Result<()> {
    if sessions.current_session().is_none() {
        bail!("Not logged in. Run `contralens login -u <name> -p test123` first.");
    }
    Ok(())
}

fn fixture_source(location: &str) -> Box<dyn ContractSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpFixtures::new(location.to_string()))
    } else {
        Box::new(DirFixtures::new(location))
    }
}

/// Load the list, offering a retry on each failure until it succeeds or
/// stdin is closed.
async fn load_with_retry<C: ContractSource>(
    list: &mut ContractList<C>,
) -> anyhow::Result<&[contralens_core::ContractSummary]> {
    list.load().await;
    let mut stdin = BufReader::new(tokio::io::stdin());
    while let LoadState::Failed { message, error } = list.state() {
        tracing::debug!(%error, "contract list fetch failed");
        eprint!("{message} Press Enter to retry or Ctrl-D to quit: ");
        std::io::stderr().flush().ok();
        if !wait_for_retry(&mut stdin).await? {
            eprintln!();
            bail!(*message);
        }
        list.retry().await;
    }
    list.contracts().context("contract list not loaded")
}

/// Consume one line of input. False once the input is closed.
async fn wait_for_retry<R: AsyncBufRead + Unpin>(input: &mut R) -> std::io::Result<bool> {
    let mut line = String::new();
    Ok(input.read_line(&mut line).await? > 0)
}

async fn run_uploads(files: &[PathBuf], seed: u64) -> anyhow::Result<()> {
    let mut queue = UploadQueue::new(SeededStepper::new(seed));
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        if !is_accepted_document(&name) {
            tracing::warn!(path = %path.display(), "skipping unsupported file type");
            eprintln!("skipping {name}: only {} files are accepted", ACCEPTED_EXTENSIONS.join(", "));
            continue;
        }
        let size = std::fs::metadata(path)
            .with_context(|| format!("reading {}", path.display()))?
            .len();
        queue.add(name, size);
    }
    if queue.files().is_empty() {
        bail!("no files to upload");
    }

    let mut ticks = 0;
    while !queue.is_idle() && ticks < MAX_UPLOAD_TICKS {
        tokio::time::sleep(TICK).await;
        queue.tick();
        ticks += 1;
        display::print_upload_progress(queue.files());
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn retry_prompt_reads_lines_until_input_closes() {
        let mut input: &[u8] = b"\n\nignored text\n";
        assert!(wait_for_retry(&mut input).await.unwrap());
        assert!(wait_for_retry(&mut input).await.unwrap());
        assert!(wait_for_retry(&mut input).await.unwrap());
        assert!(!wait_for_retry(&mut input).await.unwrap());
    }
}
