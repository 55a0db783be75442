//! Geek Launcher CLI — manage and open your website shortcuts from a terminal

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::Command;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use geeklauncher::data::{FileStore, KeyValueStore, Site, SiteDraft, SiteStore};
use geeklauncher::error::{LauncherError, Result};

#[derive(Parser)]
#[command(name = "geeklauncher", about = "Personal website launcher", version)]
struct Cli {
    /// Storage file (defaults to the config directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all sites
    List,
    /// Add a site; missing values are prompted for
    Add {
        /// Display name
        name: Option<String>,
        /// URL (https:// is added if no scheme is given)
        url: Option<String>,
    },
    /// Remove a site
    Delete {
        /// Site id
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a site in the browser
    Open {
        /// Site id
        id: String,
    },
    /// Print the favicon URL for a site
    Favicon {
        /// Site id
        id: String,
    },
    /// Print the storage file path
    Path,
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let storage = match cli.store {
        Some(path) => FileStore::new(path),
        None => FileStore::open_default()?,
    };

    // Reporting the path must not create the store
    if matches!(cli.command, Commands::Path) {
        println!("{}", storage.path().display());
        return Ok(());
    }

    let mut sites = SiteStore::load(storage);
    execute(cli.command, &mut sites)
}

fn execute<S: KeyValueStore>(command: Commands, sites: &mut SiteStore<S>) -> Result<()> {
    match command {
        Commands::List => {
            for site in sites.list() {
                println!("{:<15} {:<20} {}", site.id, site.name, site.url);
            }
        }
        Commands::Add { name, url } => {
            let mut draft = SiteDraft::new();
            draft.toggle_add_mode();
            draft.set_name(match name {
                Some(n) => n,
                None => prompt("Name: ")?,
            });
            draft.set_url(match url {
                Some(u) => u,
                None => prompt("URL: ")?,
            });

            let site = sites.submit(&mut draft)?;
            println!("Added {} ({}) as {}", site.name, site.url, site.id);
        }
        Commands::Delete { id, yes } => {
            if !yes && !is_yes(&prompt("Remove this website? [y/N] ")?) {
                println!("Cancelled");
                return Ok(());
            }
            match sites.delete(&id) {
                0 => println!("No site with id {}", id),
                n => println!("Removed {} site(s)", n),
            }
        }
        Commands::Open { id } => {
            let site = find(sites, &id)?;
            open_in_browser(&site.url)?;
        }
        Commands::Favicon { id } => {
            println!("{}", find(sites, &id)?.favicon_url());
        }
        // Answered by `run` before the store is loaded
        Commands::Path => {}
    }

    Ok(())
}

fn find<'a, S: KeyValueStore>(sites: &'a SiteStore<S>, id: &str) -> Result<&'a Site> {
    sites
        .get(id)
        .ok_or_else(|| LauncherError::NotFound(format!("no site with id {}", id)))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn prompt(label: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    stdout.write_all(label.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Hand the URL to the platform's default opener, which shows it in a new browser tab
fn open_in_browser(url: &str) -> io::Result<()> {
    opener_command(std::env::consts::OS, url).spawn()?;
    Ok(())
}

/// Opener invocation for `os` (as in `std::env::consts::OS`)
///
/// The URL is always passed as a single argument and never goes through a
/// shell, so `&` and other metacharacters reach the browser intact.
fn opener_command(os: &str, url: &str) -> Command {
    match os {
        "macos" => {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        }
        "windows" => {
            let mut cmd = Command::new("rundll32");
            cmd.arg("url.dll,FileProtocolHandler").arg(url);
            cmd
        }
        _ => {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use geeklauncher::data::MemoryStore;
    use geeklauncher::error::ValidationError;
    use std::env::temp_dir;
    use std::ffi::OsStr;
    use std::sync::atomic::{AtomicU32, Ordering};

    static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_path() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        temp_dir().join(format!("geeklauncher_cli_test_{}.json", id))
    }

    fn args(cmd: &Command) -> Vec<&OsStr> {
        cmd.get_args().collect()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add_with_store() {
        let cli = Cli::parse_from([
            "geeklauncher",
            "add",
            "Docs",
            "docs.rs",
            "--store",
            "/tmp/s.json",
        ]);
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s.json")));
        match cli.command {
            Commands::Add { name, url } => {
                assert_eq!(name.as_deref(), Some("Docs"));
                assert_eq!(url.as_deref(), Some("docs.rs"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_parse_delete_yes() {
        let cli = Cli::parse_from(["geeklauncher", "delete", "3", "-y"]);
        assert!(matches!(cli.command, Commands::Delete { ref id, yes: true } if id == "3"));
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
    }

    #[test]
    fn test_path_does_not_create_store() {
        let path = temp_path();
        let store = path.to_string_lossy().into_owned();
        let cli = Cli::parse_from(["geeklauncher", "path", "--store", store.as_str()]);

        run(cli).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_add_through_run_persists() {
        let path = temp_path();
        let store = path.to_string_lossy().into_owned();
        let cli = Cli::parse_from([
            "geeklauncher",
            "add",
            "Docs",
            "docs.rs",
            "--store",
            store.as_str(),
        ]);

        run(cli).unwrap();

        let sites = SiteStore::load(FileStore::new(&path));
        let last = sites.list().last().unwrap();
        assert_eq!(last.name, "Docs");
        assert_eq!(last.url, "https://docs.rs");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_add_empty_is_validation_error() {
        let mut sites = SiteStore::load(MemoryStore::new());
        let command = Commands::Add {
            name: Some("  ".to_string()),
            url: Some("docs.rs".to_string()),
        };

        let err = execute(command, &mut sites).unwrap_err();
        assert!(matches!(err, LauncherError::Validation(ValidationError::Empty)));
        assert_eq!(sites.len(), 5);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut sites = SiteStore::load(MemoryStore::new());
        let command = Commands::Favicon {
            id: "missing".to_string(),
        };

        let err = execute(command, &mut sites).unwrap_err();
        assert!(matches!(err, LauncherError::NotFound(_)));
        assert_eq!(err.to_string(), "Not found: no site with id missing");
    }

    #[test]
    fn test_delete_with_yes_removes() {
        let mut sites = SiteStore::load(MemoryStore::new());
        let command = Commands::Delete {
            id: "2".to_string(),
            yes: true,
        };

        execute(command, &mut sites).unwrap();
        assert!(sites.get("2").is_none());
        assert_eq!(sites.len(), 4);
    }

    #[test]
    fn test_windows_opener_keeps_ampersand() {
        let url = "https://x.com/?a=1&b=2";
        let cmd = opener_command("windows", url);

        assert_eq!(cmd.get_program(), "rundll32");
        assert_eq!(args(&cmd), [OsStr::new("url.dll,FileProtocolHandler"), OsStr::new(url)]);
    }

    #[test]
    fn test_unix_openers_pass_url_whole() {
        let url = "https://x.com/?a=1&b=2";

        let mac = opener_command("macos", url);
        assert_eq!(mac.get_program(), "open");
        assert_eq!(args(&mac), [OsStr::new(url)]);

        let linux = opener_command("linux", url);
        assert_eq!(linux.get_program(), "xdg-open");
        assert_eq!(args(&linux), [OsStr::new(url)]);
    }
}
